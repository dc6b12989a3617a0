pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, Command};

pub use crate::core::{
    derive_display, normalize_profile, normalize_summary, SearchIndex, VehicleDisplayModel,
};
pub use adapters::HttpGateway;
pub use app::{DetailView, ListView, LoadState};
pub use config::{toml_config::TomlConfig, GatewayConfig};
pub use domain::model::{RawRecord, Severity, VehicleId, VehicleProfile, VehicleSummary};
pub use domain::ports::{ConfigProvider, VehicleSource};
pub use utils::error::{CarstoolError, Result};
