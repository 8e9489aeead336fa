//! Gold forecast HTTP server
//!
//! Loads the model artifact bundle once at startup and serves forecasts over
//! HTTP. A missing artifact does not stop the server: prediction endpoints
//! answer "Model not loaded" until the bundle is fixed and the process
//! restarted.
//!
//! # Usage
//! ```sh
//! MODE=mock cargo run --bin server -- --port 5000
//! ```
//!
//! # Environment Variables
//! - `MODE` - `onnx` (default) or `mock`
//! - `MODEL_PATH`, `SCALER_PATH`, `SEED_PATH` - artifact locations
//! - `PORT` - listen port (default: 5000)
//! - `CORS_ORIGINS` - comma-separated allowed origins (default: permissive)

use anyhow::{Context, Result};
use clap::Parser;
use gold_forecast::application::bootstrap::ModelContext;
use gold_forecast::application::forecasting::ForecastService;
use gold_forecast::config::{Config, PredictorMode};
use gold_forecast::infrastructure::http::{AppState, build_router};
use gold_forecast::infrastructure::observability::Metrics;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(author, version, about = "Gold price forecast server", long_about = None)]
struct Cli {
    /// Listen port, overrides PORT
    #[arg(short, long)]
    port: Option<u16>,

    /// Predictor mode (onnx, mock), overrides MODE
    #[arg(long)]
    mode: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    info!("Gold Forecast Server {} starting...", env!("CARGO_PKG_VERSION"));

    let mut config = Config::from_env()?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(mode) = cli.mode.as_deref() {
        config.model.mode = PredictorMode::from_str(mode)?;
    }
    info!(
        "Configuration loaded: Mode={:?}, Model={:?}, Seed={:?}",
        config.model.mode, config.model.model_path, config.model.seed_path
    );

    let context = Arc::new(ModelContext::load(&config.model));
    let metrics = Metrics::new().context("Failed to register metrics")?;
    let service = ForecastService::new(context, metrics);
    if config.observability.enabled {
        info!("Metrics available at /api/metrics");
    } else {
        info!("Metrics endpoint disabled.");
    }

    let state = AppState::new(service, config.observability.enabled);
    let app = build_router(state, &config.server.cors_origins);

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl+C handler: {}", e);
        return;
    }
    info!("Shutdown signal received. Exiting...");
}
