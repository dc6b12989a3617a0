use crate::domain::model::{json_kind, RawRecord, VehicleId};
use crate::domain::ports::{ConfigProvider, VehicleSource};
use crate::utils::error::{CarstoolError, Result};
use crate::utils::validation::validate_url;
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use url::Url;

/// Fetch gateway for the vehicle backend.
///
/// * `GET {base}/vehicles` - list-shaped raw records
/// * `GET {base}/vehicles/{id}` - one detail-shaped raw record
/// * `GET {base}/healthz` - liveness check
///
/// Path segments are percent-encoded, so an id never escapes `/vehicles/`.
pub struct HttpGateway {
    client: Client,
    base: Url,
}

impl HttpGateway {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        validate_url("api_base", config.api_base())?;
        let base = Url::parse(config.api_base()).map_err(|e| CarstoolError::InvalidConfigValueError {
            field: "api_base".to_string(),
            value: config.api_base().to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent())
            .build()?;

        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &str {
        self.base.as_str().trim_end_matches('/')
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // http(s) bases always have path segments.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get(&self, url: &Url) -> Result<Response> {
        tracing::debug!("📡 GET {}", url);
        let response = self.client.get(url.clone()).send().await?;
        tracing::debug!("📡 {} -> {}", url, response.status());
        Ok(response)
    }
}

fn ensure_success(response: &Response, url: &Url) -> Result<()> {
    if response.status().is_success() {
        return Ok(());
    }
    let status = response.status().as_u16();
    tracing::error!("❌ API request to {} failed with status: {}", url, status);
    Err(CarstoolError::UnexpectedStatus {
        status,
        url: url.to_string(),
    })
}

#[async_trait]
impl VehicleSource for HttpGateway {
    async fn list_vehicles(&self) -> Result<Vec<RawRecord>> {
        let url = self.url(&["vehicles"]);
        let response = self.get(&url).await?;
        ensure_success(&response, &url)?;

        let json_data: serde_json::Value = response.json().await?;
        let items = match json_data {
            serde_json::Value::Array(items) => items,
            other => {
                return Err(CarstoolError::invalid(
                    "vehicles",
                    format!("expected a JSON array, got {}", json_kind(&other)),
                ))
            }
        };

        let total = items.len();
        let records: Vec<RawRecord> = items
            .into_iter()
            .filter_map(|item| match RawRecord::try_from(item) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!("🔶 Skipping list entry: {}", e);
                    None
                }
            })
            .collect();

        tracing::info!("📡 Fetched {} of {} vehicle records", records.len(), total);
        Ok(records)
    }

    async fn fetch_vehicle(&self, id: &VehicleId) -> Result<RawRecord> {
        let url = self.url(&["vehicles", id.as_str()]);
        let response = self.get(&url).await?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::info!("🔍 Vehicle {} not found", id);
            return Err(CarstoolError::NotFound { id: id.to_string() });
        }
        ensure_success(&response, &url)?;

        let json_data: serde_json::Value = response.json().await?;
        RawRecord::try_from(json_data)
    }

    async fn health(&self) -> Result<()> {
        let url = self.url(&["healthz"]);
        let response = self.get(&url).await?;
        ensure_success(&response, &url)?;

        let body: serde_json::Value = response.json().await?;
        match body.get("status").and_then(|s| s.as_str()) {
            Some("ok") => Ok(()),
            other => Err(CarstoolError::invalid(
                "status",
                format!("backend reported {:?}", other.unwrap_or("nothing")),
            )),
        }
    }
}
