//! HTTP server configuration parsing from environment variables.

use anyhow::{Context, Result};
use std::env;

/// Server environment configuration
#[derive(Debug, Clone)]
pub struct ServerEnvConfig {
    pub bind_address: String,
    pub port: u16,
    /// Allowed CORS origins. Empty means permissive.
    pub cors_origins: Vec<String>,
}

impl Default for ServerEnvConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 5000,
            cors_origins: Vec::new(),
        }
    }
}

impl ServerEnvConfig {
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u16>()
            .context("Failed to parse PORT")?;

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            bind_address: env::var("SERVER_BIND_ADDRESS")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            port,
            cors_origins,
        })
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}
