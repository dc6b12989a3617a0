//! Reconciles both backend schema generations into the canonical vehicle model.
//!
//! The older shape carries `year`, `drivetrain`, `fluids`, `common_issues` and
//! nested `interval` objects; the newer one carries `year_start`/`year_end`,
//! `drivetrains`, `issues` and flattened `interval_miles`/`interval_months`.
//! Both go through the same lookups below, with the newer key consulted first.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};

use crate::domain::model::{
    EnginePowertrain, FluidSpec, Issue, MaintenanceItem, RawRecord, Severity, Trim, VehicleId,
    VehicleProfile, VehicleSummary,
};
use crate::utils::error::{CarstoolError, Result};

type Object = Map<String, Value>;

pub fn normalize_summary(raw: &RawRecord) -> Result<VehicleSummary> {
    let obj = &raw.data;

    let id = text(obj, &["id"])
        .map(VehicleId::new)
        .ok_or_else(|| CarstoolError::missing("id"))?;
    let make = text(obj, &["make"]).ok_or_else(|| CarstoolError::missing("make"))?;
    let model = text(obj, &["model"]).ok_or_else(|| CarstoolError::missing("model"))?;
    let (year_start, year_end) = resolve_years(obj)?;

    Ok(VehicleSummary {
        id,
        make,
        model,
        year_start,
        year_end,
        drivetrain: drivetrains(obj).into_iter().next(),
    })
}

pub fn normalize_profile(raw: &RawRecord) -> Result<VehicleProfile> {
    let summary = normalize_summary(raw)?;
    let obj = &raw.data;

    Ok(VehicleProfile {
        id: summary.id,
        make: summary.make,
        model: summary.model,
        year_start: summary.year_start,
        year_end: summary.year_end,
        body_style: text(obj, &["body_style", "bodyStyle"]),
        drivetrains: drivetrains(obj),
        trims: entries(obj, &["trims"])
            .iter()
            .filter_map(|item| label(item, &["trim_name", "name"]))
            .map(|name| Trim { name })
            .collect(),
        engines: entries(obj, &["engines"])
            .iter()
            .filter_map(engine)
            .collect(),
        maintenance: entries(obj, &["maintenance"])
            .iter()
            .filter_map(maintenance_item)
            .collect(),
        issues: entries(obj, &["issues", "common_issues"])
            .iter()
            .filter_map(issue)
            .collect(),
        fluids: entries(obj, &["fluids"])
            .iter()
            .filter_map(fluid)
            .collect(),
    })
}

fn resolve_years(obj: &Object) -> Result<(i32, i32)> {
    let (start, end) = if let Some(start) = year(obj, "year_start") {
        (start, year(obj, "year_end").unwrap_or(start))
    } else if let Some(year) = year(obj, "year") {
        (year, year)
    } else {
        return Err(CarstoolError::missing("year"));
    };

    if end < start {
        return Err(CarstoolError::invalid(
            "year_end",
            format!("{} is before year_start {}", end, start),
        ));
    }
    Ok((start, end))
}

fn year(obj: &Object, key: &str) -> Option<i32> {
    integer(obj, &[key]).and_then(|value| i32::try_from(value).ok())
}

fn drivetrains(obj: &Object) -> Vec<String> {
    ["drivetrains", "drivetrain"]
        .iter()
        .filter_map(|key| obj.get(*key))
        .map(|value| labels(value, &["name", "type"]))
        .find(|found| !found.is_empty())
        .unwrap_or_default()
}

fn engine(item: &Value) -> Option<EnginePowertrain> {
    let name = label(item, &["engine_name", "name"])?;
    let obj = item.as_object();

    Some(EnginePowertrain {
        name,
        horsepower: obj.and_then(|o| non_negative(o, &["horsepower", "hp"])),
        torque_nm: obj.and_then(|o| non_negative(o, &["torque_nm", "torque"])),
    })
}

fn maintenance_item(item: &Value) -> Option<MaintenanceItem> {
    let name = label(item, &["name"])?;
    let Some(obj) = item.as_object() else {
        return Some(MaintenanceItem {
            name,
            code: None,
            details: None,
            interval_miles: None,
            interval_months: None,
            severity: None,
        });
    };

    let nested = obj.get("interval").and_then(Value::as_object);
    let interval = |flat: &str, nested_key: &str| {
        positive(obj, &[flat]).or_else(|| nested.and_then(|n| positive(n, &[nested_key])))
    };

    Some(MaintenanceItem {
        name,
        code: text(obj, &["code"]),
        details: text(obj, &["details", "description"]),
        interval_miles: interval("interval_miles", "miles_every"),
        interval_months: interval("interval_months", "months_every"),
        severity: text(obj, &["severity"]).map(|raw| Severity::from_raw(&raw)),
    })
}

fn issue(item: &Value) -> Option<Issue> {
    let obj = item.as_object()?;

    Some(Issue {
        title: text(obj, &["issue", "title"])?,
        details: text(obj, &["details", "description"]),
        severity: text(obj, &["severity"])
            .map(|raw| Severity::from_raw(&raw))
            .unwrap_or_default(),
        reported_at: timestamp(obj, &["ts", "reportedAt", "reported_at"]),
    })
}

fn fluid(item: &Value) -> Option<FluidSpec> {
    let obj = item.as_object()?;

    Some(FluidSpec {
        system: text(obj, &["system"])?,
        spec: text(obj, &["spec", "specification"])?,
        capacity_liters: non_negative(obj, &["capacity_liters", "capacity"]),
        notes: text(obj, &["notes"]),
    })
}

/// First key holding a non-empty array. Missing or empty arrays read as no entries.
fn entries<'a>(obj: &'a Object, keys: &[&str]) -> &'a [Value] {
    keys.iter()
        .filter_map(|key| obj.get(*key).and_then(Value::as_array))
        .find(|items| !items.is_empty())
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Wraps a single value into a one-element list; arrays are flattened one level.
fn labels(value: &Value, keys: &[&str]) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(|item| label(item, keys)).collect(),
        other => label(other, keys).into_iter().collect(),
    }
}

fn label(value: &Value, keys: &[&str]) -> Option<String> {
    match value {
        Value::Object(obj) => text(obj, keys),
        other => scalar_text(other),
    }
}

/// First non-empty textual value among `keys`.
fn text(obj: &Object, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .find_map(scalar_text)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn integer(obj: &Object, keys: &[&str]) -> Option<i64> {
    keys.iter().filter_map(|key| obj.get(*key)).find_map(|value| match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

fn number(obj: &Object, keys: &[&str]) -> Option<f64> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .find_map(|value| match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        })
        .filter(|value| value.is_finite())
}

fn non_negative(obj: &Object, keys: &[&str]) -> Option<f64> {
    number(obj, keys).filter(|value| *value >= 0.0)
}

fn positive(obj: &Object, keys: &[&str]) -> Option<u32> {
    integer(obj, keys)
        .filter(|value| *value > 0)
        .and_then(|value| u32::try_from(value).ok())
}

/// First non-empty timestamp value; an unparseable one reads as absent.
fn timestamp(obj: &Object, keys: &[&str]) -> Option<DateTime<Utc>> {
    let value = keys
        .iter()
        .filter_map(|key| obj.get(*key))
        .find(|value| match value {
            Value::String(s) => !s.trim().is_empty(),
            Value::Number(_) => true,
            _ => false,
        })?;

    match value {
        Value::Number(n) => n.as_i64().and_then(DateTime::<Utc>::from_timestamp_millis),
        Value::String(s) => parse_timestamp(s.trim()),
        _ => None,
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    // Naive timestamps are taken as UTC.
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
