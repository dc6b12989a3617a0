use crate::app::LoadState;
use crate::core::normalizer::normalize_summary;
use crate::core::search::{result_count_label, SearchIndex};
use crate::domain::model::VehicleSummary;
use crate::domain::ports::VehicleSource;

pub const LOAD_FAILED_MESSAGE: &str = "Unable to load vehicles.";

/// The vehicle list screen. Owns its own copy of the list.
pub struct ListView {
    state: LoadState<SearchIndex>,
    skipped: usize,
    empty: SearchIndex,
}

impl Default for ListView {
    fn default() -> Self {
        Self::new()
    }
}

impl ListView {
    pub fn new() -> Self {
        Self {
            state: LoadState::Loading,
            skipped: 0,
            empty: SearchIndex::default(),
        }
    }

    pub fn state(&self) -> &LoadState<SearchIndex> {
        &self.state
    }

    /// Fetches and indexes the list. Failures leave an empty list plus a notice.
    pub async fn load<S: VehicleSource + ?Sized>(&mut self, source: &S) {
        self.state = LoadState::Loading;
        self.skipped = 0;

        let records = match source.list_vehicles().await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!("❌ Vehicle list failed: {}", e);
                self.state = LoadState::Failed(LOAD_FAILED_MESSAGE.to_string());
                return;
            }
        };

        let mut summaries = Vec::with_capacity(records.len());
        for record in &records {
            match normalize_summary(record) {
                Ok(summary) => summaries.push(summary),
                Err(e) => {
                    self.skipped += 1;
                    tracing::warn!("🔶 Skipping vehicle record: {}", e);
                }
            }
        }

        tracing::info!(
            "📥 Indexed {} vehicles ({} skipped)",
            summaries.len(),
            self.skipped
        );
        self.state = LoadState::Ready(SearchIndex::build(summaries));
    }

    /// The loaded index, or an empty one while loading or after a failure.
    pub fn index(&self) -> &SearchIndex {
        self.state.ready().unwrap_or(&self.empty)
    }

    pub fn filter(&self, text: &str) -> Vec<&VehicleSummary> {
        self.index().query(text)
    }

    pub fn count_label(&self, text: &str) -> String {
        result_count_label(self.filter(text).len())
    }

    pub fn notice(&self) -> Option<&str> {
        match &self.state {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Records dropped because they could not be normalized.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{RawRecord, VehicleId};
    use crate::utils::error::{CarstoolError, Result};
    use async_trait::async_trait;
    use serde_json::json;

    struct StaticSource {
        list: Option<Vec<serde_json::Value>>,
    }

    #[async_trait]
    impl VehicleSource for StaticSource {
        async fn list_vehicles(&self) -> Result<Vec<RawRecord>> {
            match &self.list {
                Some(values) => values
                    .iter()
                    .cloned()
                    .map(RawRecord::try_from)
                    .collect(),
                None => Err(CarstoolError::UnexpectedStatus {
                    status: 502,
                    url: "http://test/vehicles".into(),
                }),
            }
        }

        async fn fetch_vehicle(&self, id: &VehicleId) -> Result<RawRecord> {
            Err(CarstoolError::NotFound { id: id.to_string() })
        }

        async fn health(&self) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_new_view_is_loading_and_empty() {
        let view = ListView::new();
        assert!(view.state().is_loading());
        assert!(view.filter("").is_empty());
        assert_eq!(view.notice(), None);
    }

    #[tokio::test]
    async fn test_load_skips_records_that_fail_normalization() {
        let source = StaticSource {
            list: Some(vec![
                json!({"id": 1, "year": 2019, "make": "Honda", "model": "Civic"}),
                json!({"id": 2, "year": 2020, "model": "Camry"}),
                json!({"id": 3, "year_start": 2018, "year_end": 2021, "make": "Ford", "model": "Ranger"}),
            ]),
        };

        let mut view = ListView::new();
        view.load(&source).await;

        assert_eq!(view.skipped(), 1);
        assert_eq!(view.index().len(), 2);
        assert_eq!(view.count_label(""), "2 vehicles");
        assert_eq!(view.count_label("ranger"), "1 vehicle");
    }

    #[tokio::test]
    async fn test_transport_failure_degrades_to_empty_with_notice() {
        let source = StaticSource { list: None };

        let mut view = ListView::new();
        view.load(&source).await;

        assert!(view.filter("").is_empty());
        assert_eq!(view.notice(), Some(LOAD_FAILED_MESSAGE));
        assert!(matches!(view.state(), LoadState::Failed(_)));
    }
}
