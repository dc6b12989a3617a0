//! Display-ready strings derived from a [`VehicleProfile`].
//!
//! Every branch the presentation layer would otherwise take (pluralization,
//! separators, missing values, empty sections) is decided here, so renderers
//! only print what they are given.

use serde::Serialize;

use crate::domain::model::{
    EnginePowertrain, FluidSpec, Issue, MaintenanceItem, Severity, VehicleProfile,
};

pub const CLAUSE_SEPARATOR: &str = " • ";
pub const NO_MAINTENANCE: &str = "No maintenance items recorded for this vehicle yet.";
pub const NO_ISSUES: &str = "No documented common issues for this vehicle yet.";
pub const NO_FLUIDS: &str = "No fluid specifications recorded for this vehicle yet.";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDisplayModel {
    pub title: String,
    pub year_label: String,
    pub make: String,
    pub model: String,
    pub body_style: Option<String>,
    pub drivetrains: Vec<String>,
    pub drivetrain_label: Option<String>,
    pub trim_count_label: Option<String>,
    pub trims: Vec<String>,
    pub engines: Vec<EngineDisplay>,
    pub fluids: Vec<FluidDisplay>,
    pub fluids_placeholder: Option<&'static str>,
    pub maintenance: Vec<MaintenanceDisplay>,
    pub maintenance_placeholder: Option<&'static str>,
    pub issues: Vec<IssueDisplay>,
    pub issues_placeholder: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineDisplay {
    pub name: String,
    pub output_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FluidDisplay {
    pub system: String,
    pub spec: String,
    pub capacity_label: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceDisplay {
    pub name: String,
    pub code: Option<String>,
    pub details: Option<String>,
    pub interval_label: Option<String>,
    pub severity: Option<Severity>,
    pub severity_label: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueDisplay {
    pub title: String,
    pub details: Option<String>,
    pub severity: Severity,
    pub severity_label: &'static str,
    pub reported_label: Option<String>,
}

impl VehicleDisplayModel {
    /// The model shown when there is no profile to display.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::empty()
    }
}

pub fn derive_display(profile: Option<&VehicleProfile>) -> VehicleDisplayModel {
    let Some(profile) = profile else {
        return VehicleDisplayModel::empty();
    };

    let year_label = year_label(profile.year_start, profile.year_end);

    VehicleDisplayModel {
        title: format!("{} {} {}", year_label, profile.make, profile.model),
        year_label,
        make: profile.make.clone(),
        model: profile.model.clone(),
        body_style: profile.body_style.clone(),
        drivetrains: profile.drivetrains.clone(),
        drivetrain_label: non_empty(profile.drivetrains.join(", ")),
        trim_count_label: trim_count_label(profile.trims.len()),
        trims: profile.trims.iter().map(|trim| trim.name.clone()).collect(),
        engines: profile.engines.iter().map(engine_display).collect(),
        fluids: profile.fluids.iter().map(fluid_display).collect(),
        fluids_placeholder: placeholder(&profile.fluids, NO_FLUIDS),
        maintenance: profile.maintenance.iter().map(maintenance_display).collect(),
        maintenance_placeholder: placeholder(&profile.maintenance, NO_MAINTENANCE),
        issues: profile.issues.iter().map(issue_display).collect(),
        issues_placeholder: placeholder(&profile.issues, NO_ISSUES),
    }
}

pub fn year_label(start: i32, end: i32) -> String {
    if start == end {
        start.to_string()
    } else {
        format!("{}-{}", start, end)
    }
}

pub fn trim_count_label(count: usize) -> Option<String> {
    match count {
        0 => None,
        1 => Some("1 trim".to_string()),
        n => Some(format!("{} trims", n)),
    }
}

pub fn interval_label(miles: Option<u32>, months: Option<u32>) -> Option<String> {
    let clauses: Vec<String> = [
        miles.map(|miles| format!("Every {} mi", group_thousands(u64::from(miles)))),
        months.map(|months| format!("Every {} months", months)),
    ]
    .into_iter()
    .flatten()
    .collect();

    non_empty(clauses.join(CLAUSE_SEPARATOR))
}

/// `1234567` -> `"1,234,567"`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

fn engine_display(engine: &EnginePowertrain) -> EngineDisplay {
    let clauses: Vec<String> = [
        engine.horsepower.map(|hp| format!("{} hp", format_quantity(hp))),
        engine.torque_nm.map(|nm| format!("{} Nm", format_quantity(nm))),
    ]
    .into_iter()
    .flatten()
    .collect();

    EngineDisplay {
        name: engine.name.clone(),
        output_label: non_empty(clauses.join(CLAUSE_SEPARATOR)),
    }
}

fn fluid_display(fluid: &FluidSpec) -> FluidDisplay {
    FluidDisplay {
        system: fluid.system.clone(),
        spec: fluid.spec.clone(),
        capacity_label: fluid.capacity_liters.map(|liters| format!("{:.1} L", liters)),
        notes: fluid.notes.clone(),
    }
}

fn maintenance_display(item: &MaintenanceItem) -> MaintenanceDisplay {
    MaintenanceDisplay {
        name: item.name.clone(),
        code: item.code.clone(),
        details: item.details.clone(),
        interval_label: interval_label(item.interval_miles, item.interval_months),
        severity: item.severity,
        severity_label: item.severity.map(Severity::label),
    }
}

fn issue_display(issue: &Issue) -> IssueDisplay {
    IssueDisplay {
        title: issue.title.clone(),
        details: issue.details.clone(),
        severity: issue.severity,
        severity_label: issue.severity.label(),
        reported_label: issue.reported_at.map(|at| at.format("%b %Y").to_string()),
    }
}

/// Whole numbers print without a fractional part.
fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

fn placeholder<T>(items: &[T], message: &'static str) -> Option<&'static str> {
    items.is_empty().then_some(message)
}

fn non_empty(text: String) -> Option<String> {
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Trim, VehicleId};
    use chrono::{TimeZone, Utc};

    fn profile() -> VehicleProfile {
        VehicleProfile {
            id: VehicleId::from(1u64),
            make: "Honda".into(),
            model: "Civic".into(),
            year_start: 2018,
            year_end: 2020,
            body_style: None,
            drivetrains: vec![],
            trims: vec![],
            engines: vec![],
            maintenance: vec![],
            issues: vec![],
            fluids: vec![],
        }
    }

    fn item(miles: Option<u32>, months: Option<u32>) -> MaintenanceItem {
        MaintenanceItem {
            name: "Oil change".into(),
            code: None,
            details: None,
            interval_miles: miles,
            interval_months: months,
            severity: None,
        }
    }

    fn issue(severity: Severity) -> Issue {
        Issue {
            title: "Clutch shudder".into(),
            details: None,
            severity,
            reported_at: None,
        }
    }

    #[test]
    fn test_year_label() {
        assert_eq!(year_label(2021, 2021), "2021");
        assert_eq!(year_label(2018, 2020), "2018-2020");
    }

    #[test]
    fn test_title_combines_year_make_model() {
        let display = derive_display(Some(&profile()));
        assert_eq!(display.title, "2018-2020 Honda Civic");
        assert_eq!(display.year_label, "2018-2020");
    }

    #[test]
    fn test_trim_count_label_pluralizes() {
        assert_eq!(trim_count_label(0), None);
        assert_eq!(trim_count_label(1).as_deref(), Some("1 trim"));
        assert_eq!(trim_count_label(3).as_deref(), Some("3 trims"));
    }

    #[test]
    fn test_interval_label_variants() {
        assert_eq!(interval_label(Some(5000), None).as_deref(), Some("Every 5,000 mi"));
        assert_eq!(interval_label(None, Some(6)).as_deref(), Some("Every 6 months"));
        assert_eq!(
            interval_label(Some(30000), Some(24)).as_deref(),
            Some("Every 30,000 mi • Every 24 months")
        );
        assert_eq!(interval_label(None, None), None);
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(105000), "105,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_issue_severity_labels() {
        let mut vehicle = profile();
        vehicle.issues = vec![
            issue(Severity::High),
            issue(Severity::Medium),
            issue(Severity::Low),
            issue(Severity::Unspecified),
        ];

        let labels: Vec<&str> = derive_display(Some(&vehicle))
            .issues
            .iter()
            .map(|issue| issue.severity_label)
            .collect();
        assert_eq!(labels, vec!["High", "Medium", "Low", "Info"]);
    }

    #[test]
    fn test_issue_reported_label_uses_month_and_year() {
        let mut vehicle = profile();
        let mut reported = issue(Severity::Low);
        reported.reported_at = Some(Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap());
        vehicle.issues = vec![reported];

        let display = derive_display(Some(&vehicle));
        assert_eq!(display.issues[0].reported_label.as_deref(), Some("Jan 2024"));
    }

    #[test]
    fn test_maintenance_item_without_intervals_has_no_label() {
        let mut vehicle = profile();
        vehicle.maintenance = vec![item(None, None), item(Some(5000), None)];

        let display = derive_display(Some(&vehicle));
        assert_eq!(display.maintenance[0].interval_label, None);
        assert_eq!(display.maintenance[1].interval_label.as_deref(), Some("Every 5,000 mi"));
        assert_eq!(display.maintenance_placeholder, None);
    }

    #[test]
    fn test_engine_output_label() {
        let mut vehicle = profile();
        vehicle.engines = vec![
            EnginePowertrain { name: "1.5T".into(), horsepower: Some(174.0), torque_nm: Some(220.0) },
            EnginePowertrain { name: "2.0".into(), horsepower: Some(158.5), torque_nm: None },
            EnginePowertrain { name: "EV".into(), horsepower: None, torque_nm: None },
        ];

        let display = derive_display(Some(&vehicle));
        assert_eq!(display.engines[0].output_label.as_deref(), Some("174 hp • 220 Nm"));
        assert_eq!(display.engines[1].output_label.as_deref(), Some("158.5 hp"));
        assert_eq!(display.engines[2].output_label, None);
    }

    #[test]
    fn test_fluid_capacity_label() {
        let mut vehicle = profile();
        vehicle.fluids = vec![FluidSpec {
            system: "Engine oil".into(),
            spec: "0W-20".into(),
            capacity_liters: Some(4.4),
            notes: None,
        }];

        let display = derive_display(Some(&vehicle));
        assert_eq!(display.fluids[0].capacity_label.as_deref(), Some("4.4 L"));
        assert_eq!(display.fluids_placeholder, None);
    }

    #[test]
    fn test_empty_sections_carry_placeholders() {
        let display = derive_display(Some(&profile()));
        assert_eq!(display.trim_count_label, None);
        assert_eq!(display.drivetrain_label, None);
        assert_eq!(display.maintenance_placeholder, Some(NO_MAINTENANCE));
        assert_eq!(display.issues_placeholder, Some(NO_ISSUES));
        assert_eq!(display.fluids_placeholder, Some(NO_FLUIDS));
    }

    #[test]
    fn test_trims_and_drivetrains() {
        let mut vehicle = profile();
        vehicle.trims = vec![Trim { name: "LX".into() }, Trim { name: "EX".into() }];
        vehicle.drivetrains = vec!["FWD".into(), "AWD".into()];

        let display = derive_display(Some(&vehicle));
        assert_eq!(display.trim_count_label.as_deref(), Some("2 trims"));
        assert_eq!(display.trims, vec!["LX", "EX"]);
        assert_eq!(display.drivetrain_label.as_deref(), Some("FWD, AWD"));
    }

    #[test]
    fn test_absent_profile_yields_empty_model() {
        let display = derive_display(None);
        assert_eq!(display, VehicleDisplayModel::empty());
        assert!(display.is_empty());
        assert!(!derive_display(Some(&profile())).is_empty());
    }

    #[test]
    fn test_derive_display_leaves_profile_untouched() {
        let mut vehicle = profile();
        vehicle.maintenance = vec![item(Some(7500), Some(12))];
        let before = vehicle.clone();

        let _ = derive_display(Some(&vehicle));
        assert_eq!(vehicle, before);
    }
}
