use serde::Serialize;

use crate::core::display::year_label;
use crate::domain::model::VehicleSummary;

/// In-memory vehicle list answering make/model/year substring queries.
///
/// Years match on the range endpoints only: a 2018-2020 record is found by
/// "2018" and "2020" but not by "2019".
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    summaries: Vec<VehicleSummary>,
}

impl SearchIndex {
    pub fn build(summaries: Vec<VehicleSummary>) -> Self {
        Self { summaries }
    }

    /// Matching summaries in input order. An empty query matches everything.
    pub fn query(&self, text: &str) -> Vec<&VehicleSummary> {
        let needle = text.to_lowercase();
        self.summaries
            .iter()
            .filter(|summary| matches(summary, &needle))
            .collect()
    }

    pub fn summaries(&self) -> &[VehicleSummary] {
        &self.summaries
    }

    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }
}

fn matches(summary: &VehicleSummary, needle: &str) -> bool {
    summary.make.to_lowercase().contains(needle)
        || summary.model.to_lowercase().contains(needle)
        || summary.year_start.to_string().contains(needle)
        || summary.year_end.to_string().contains(needle)
}

pub fn result_count_label(count: usize) -> String {
    if count == 1 {
        "1 vehicle".to_string()
    } else {
        format!("{} vehicles", count)
    }
}

/// Strings for one entry of the vehicle list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryCard {
    pub id: String,
    pub year_label: String,
    pub make: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drivetrain: Option<String>,
}

impl From<&VehicleSummary> for SummaryCard {
    fn from(summary: &VehicleSummary) -> Self {
        Self {
            id: summary.id.to_string(),
            year_label: year_label(summary.year_start, summary.year_end),
            make: summary.make.clone(),
            model: summary.model.clone(),
            drivetrain: summary.drivetrain.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::VehicleId;

    fn summary(id: u64, make: &str, model: &str, start: i32, end: i32) -> VehicleSummary {
        VehicleSummary {
            id: VehicleId::from(id),
            make: make.to_string(),
            model: model.to_string(),
            year_start: start,
            year_end: end,
            drivetrain: None,
        }
    }

    fn fleet() -> SearchIndex {
        SearchIndex::build(vec![
            summary(1, "Honda", "Civic", 2018, 2020),
            summary(2, "Toyota", "Camry", 2019, 2019),
            summary(3, "Honda", "Accord", 2016, 2017),
            summary(4, "Ford", "F-150", 2021, 2021),
        ])
    }

    fn ids(results: Vec<&VehicleSummary>) -> Vec<String> {
        results.iter().map(|s| s.id.to_string()).collect()
    }

    #[test]
    fn test_empty_query_returns_everything_in_order() {
        let index = fleet();
        assert_eq!(ids(index.query("")), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let index = fleet();
        assert_eq!(index.query("HONDA"), index.query("honda"));
        assert_eq!(ids(index.query("HoNdA")), vec!["1", "3"]);
    }

    #[test]
    fn test_query_matches_model_substring() {
        let index = fleet();
        assert_eq!(ids(index.query("cor")), vec!["3"]);
        assert_eq!(ids(index.query("f-1")), vec!["4"]);
    }

    #[test]
    fn test_year_matches_range_endpoints_only() {
        let index = fleet();
        assert_eq!(ids(index.query("2018")), vec!["1"]);
        assert_eq!(ids(index.query("2020")), vec!["1"]);
        // 2019 is inside the Civic's range but only the Camry lists it as an endpoint.
        assert_eq!(ids(index.query("2019")), vec!["2"]);
    }

    #[test]
    fn test_partial_year_matches_by_substring() {
        let index = fleet();
        assert_eq!(ids(index.query("201")), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        assert!(fleet().query("tesla").is_empty());
        assert!(SearchIndex::default().query("").is_empty());
    }

    #[test]
    fn test_result_count_label() {
        assert_eq!(result_count_label(0), "0 vehicles");
        assert_eq!(result_count_label(1), "1 vehicle");
        assert_eq!(result_count_label(12), "12 vehicles");
    }

    #[test]
    fn test_summary_card_formats_year_range() {
        let mut civic = summary(1, "Honda", "Civic", 2018, 2020);
        civic.drivetrain = Some("FWD".to_string());

        let card = SummaryCard::from(&civic);
        assert_eq!(card.year_label, "2018-2020");
        assert_eq!(card.drivetrain.as_deref(), Some("FWD"));
    }
}
