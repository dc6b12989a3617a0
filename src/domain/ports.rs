use crate::domain::model::{RawRecord, VehicleId};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn api_base(&self) -> &str;
    fn timeout(&self) -> Duration;
    fn user_agent(&self) -> &str;
}

/// Where raw vehicle records come from. The HTTP gateway is the production implementation.
#[async_trait]
pub trait VehicleSource: Send + Sync {
    async fn list_vehicles(&self) -> Result<Vec<RawRecord>>;
    async fn fetch_vehicle(&self, id: &VehicleId) -> Result<RawRecord>;
    async fn health(&self) -> Result<()>;
}
