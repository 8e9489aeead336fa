//! Gold Forecast CLI
//!
//! Loads the artifact bundle and prints forecasts as JSON to stdout.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use gold_forecast::application::bootstrap::ModelContext;
use gold_forecast::application::forecasting::ForecastService;
use gold_forecast::config::{ModelEnvConfig, PredictorMode};
use gold_forecast::domain::scenario::{ScenarioParameters, ScenarioPreset};
use gold_forecast::infrastructure::observability::Metrics;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about = "Gold price forecast CLI", long_about = None)]
struct Cli {
    /// Predictor mode (onnx, mock), overrides MODE
    #[arg(long, global = true)]
    mode: Option<String>,

    /// ONNX model file, overrides MODEL_PATH
    #[arg(long, global = true)]
    model: Option<PathBuf>,

    /// Scaler JSON file, overrides SCALER_PATH
    #[arg(long, global = true)]
    scaler: Option<PathBuf>,

    /// Seed window CSV/JSON file, overrides SEED_PATH
    #[arg(long, global = true)]
    seed: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Baseline forecast
    Predict {
        /// Number of days (1-30)
        #[arg(short, long, default_value_t = 7)]
        days: i64,
    },
    /// Forecast under a macro scenario
    Scenario {
        /// Number of days (1-30)
        #[arg(short, long, default_value_t = 7)]
        days: i64,

        /// Named preset; explicit parameters are added on top
        #[arg(long)]
        preset: Option<String>,

        /// Interest rate change in percentage points
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        interest_rate_change: f64,

        /// Inflation change in percentage points
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        inflation_change: f64,

        /// Dollar strength change in percent
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        dollar_strength_change: f64,

        /// Market volatility, 0-100
        #[arg(long, default_value_t = 0.0)]
        market_volatility: f64,

        /// Geopolitical risk, 0-100
        #[arg(long, default_value_t = 0.0)]
        geopolitical_risk: f64,
    },
    /// List named scenario presets
    Presets,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let overrides = ArtifactOverrides {
        mode: cli.mode,
        model: cli.model,
        scaler: cli.scaler,
        seed: cli.seed,
    };
    let today = ForecastService::today();

    let output = match cli.command {
        Commands::Presets => {
            let presets: Vec<_> = ScenarioPreset::all()
                .into_iter()
                .map(|p| {
                    serde_json::json!({
                        "name": p.to_string(),
                        "description": p.description(),
                        "parameters": p.parameters(),
                    })
                })
                .collect();
            serde_json::to_value(presets)?
        }
        Commands::Predict { days } => {
            let days = ForecastService::validate_days(Some(days))?;
            let service = load_service(overrides)?;
            info!("Forecasting {} days", days);
            serde_json::to_value(service.predict_days(days, today)?)?
        }
        Commands::Scenario {
            days,
            preset,
            interest_rate_change,
            inflation_change,
            dollar_strength_change,
            market_volatility,
            geopolitical_risk,
        } => {
            let days = ForecastService::validate_days(Some(days))?;
            let explicit = ScenarioParameters {
                interest_rate_change,
                inflation_change,
                dollar_strength_change,
                market_volatility,
                geopolitical_risk,
            };
            let params = scenario_params(preset.as_deref(), explicit)?;
            let service = load_service(overrides)?;
            serde_json::to_value(service.predict_scenario(days, params, today)?)?
        }
    };

    println!(
        "{}",
        serde_json::to_string_pretty(&output).context("Failed to serialize forecast")?
    );
    Ok(())
}

/// Preset parameters (if any) with the explicit deltas added on top.
fn scenario_params(
    preset: Option<&str>,
    explicit: ScenarioParameters,
) -> Result<ScenarioParameters> {
    let base = match preset {
        Some(name) => ScenarioPreset::from_str(name)?.parameters(),
        None => ScenarioParameters::default(),
    };
    Ok(ScenarioParameters {
        interest_rate_change: base.interest_rate_change + explicit.interest_rate_change,
        inflation_change: base.inflation_change + explicit.inflation_change,
        dollar_strength_change: base.dollar_strength_change + explicit.dollar_strength_change,
        market_volatility: base.market_volatility + explicit.market_volatility,
        geopolitical_risk: base.geopolitical_risk + explicit.geopolitical_risk,
    })
}

struct ArtifactOverrides {
    mode: Option<String>,
    model: Option<PathBuf>,
    scaler: Option<PathBuf>,
    seed: Option<PathBuf>,
}

fn load_service(overrides: ArtifactOverrides) -> Result<ForecastService> {
    let mut config = ModelEnvConfig::from_env()?;
    if let Some(mode) = overrides.mode.as_deref() {
        config.mode = PredictorMode::from_str(mode)?;
    }
    if let Some(path) = overrides.model {
        config.model_path = path;
    }
    if let Some(path) = overrides.scaler {
        config.scaler_path = path;
    }
    if let Some(path) = overrides.seed {
        config.seed_path = path;
    }

    let context = Arc::new(ModelContext::load(&config));
    if !context.is_ready() {
        bail!(
            "Model not loaded, missing: {}",
            context.status().missing().join(", ")
        );
    }
    Ok(ForecastService::new(context, Metrics::new()?))
}
