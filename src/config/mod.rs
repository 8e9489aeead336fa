//! Configuration module for the forecast service.
//!
//! Loads structured configuration from environment variables, organized by
//! concern: Server, Model artifacts and Observability.

mod model_config;
mod observability_config;
mod server_config;

pub use model_config::{ModelEnvConfig, PredictorMode};
pub use observability_config::ObservabilityEnvConfig;
pub use server_config::ServerEnvConfig;

use anyhow::{Context, Result};

/// Main application configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub server: ServerEnvConfig,
    pub model: ModelEnvConfig,
    pub observability: ObservabilityEnvConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            server: ServerEnvConfig::from_env().context("Failed to load server config")?,
            model: ModelEnvConfig::from_env().context("Failed to load model config")?,
            observability: ObservabilityEnvConfig::from_env(),
        })
    }
}
