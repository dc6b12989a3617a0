#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::time::Duration;
use toml_config::TomlConfig;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Resolved settings injected into the fetch gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayConfig {
    pub api_base: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: concat!("carstool/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl GatewayConfig {
    /// Defaults, overlaid by the file, overlaid by explicit flags.
    pub fn resolve(
        file: Option<&TomlConfig>,
        api_base: Option<String>,
        timeout_seconds: Option<u64>,
    ) -> Self {
        let mut config = Self::default();

        if let Some(file) = file {
            if let Some(base_url) = &file.gateway.base_url {
                config.api_base = base_url.clone();
            }
            if let Some(timeout) = file.gateway.timeout_seconds {
                config.timeout_seconds = timeout;
            }
            if let Some(user_agent) = &file.gateway.user_agent {
                config.user_agent = user_agent.clone();
            }
        }

        if let Some(api_base) = api_base {
            config.api_base = api_base;
        }
        if let Some(timeout) = timeout_seconds {
            config.timeout_seconds = timeout;
        }
        config
    }
}

impl Validate for GatewayConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api_base", &self.api_base)?;
        validation::validate_positive_number("timeout_seconds", self.timeout_seconds, 1)?;
        validation::validate_non_empty_string("user_agent", &self.user_agent)?;
        Ok(())
    }
}

impl ConfigProvider for GatewayConfig {
    fn api_base(&self) -> &str {
        &self.api_base
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }
}
