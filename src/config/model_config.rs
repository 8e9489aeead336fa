//! Model artifact configuration parsing from environment variables.
//!
//! Paths are resolved relative to the working directory. Each one falls back
//! to `ARTIFACT_FALLBACK_DIR/<file name>` when missing.

use anyhow::Result;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Which step predictor backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictorMode {
    /// ONNX Runtime LSTM from `MODEL_PATH`
    Onnx,
    /// Persistence baseline, no model file required
    Mock,
}

impl FromStr for PredictorMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "onnx" => Ok(PredictorMode::Onnx),
            "mock" => Ok(PredictorMode::Mock),
            _ => anyhow::bail!("Invalid MODE: {}. Must be 'onnx' or 'mock'", s),
        }
    }
}

/// Model artifact environment configuration
#[derive(Debug, Clone)]
pub struct ModelEnvConfig {
    pub mode: PredictorMode,
    pub model_path: PathBuf,
    pub scaler_path: PathBuf,
    pub seed_path: PathBuf,
    pub fallback_dir: PathBuf,
    /// Reported model type; mock mode reports the predictor name instead
    pub model_type: String,
    pub last_training_date: String,
    pub accuracy: String,
    pub description: String,
}

impl Default for ModelEnvConfig {
    fn default() -> Self {
        Self {
            mode: PredictorMode::Onnx,
            model_path: PathBuf::from("models/gold_price_lstm_model.onnx"),
            scaler_path: PathBuf::from("models/gold_price_scaler.json"),
            seed_path: PathBuf::from("data/last_60_prices.csv"),
            fallback_dir: PathBuf::from(".."),
            model_type: "LSTM".to_string(),
            last_training_date: "2023-08-17".to_string(),
            accuracy: "~96%".to_string(),
            description: "LSTM model trained on 10 years of gold price data (2013-2023)"
                .to_string(),
        }
    }
}

impl ModelEnvConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let mode_str = env::var("MODE").unwrap_or_else(|_| "onnx".to_string());

        Ok(Self {
            mode: PredictorMode::from_str(&mode_str)?,
            model_path: Self::path_var("MODEL_PATH", defaults.model_path),
            scaler_path: Self::path_var("SCALER_PATH", defaults.scaler_path),
            seed_path: Self::path_var("SEED_PATH", defaults.seed_path),
            fallback_dir: Self::path_var("ARTIFACT_FALLBACK_DIR", defaults.fallback_dir),
            model_type: env::var("MODEL_TYPE").unwrap_or(defaults.model_type),
            last_training_date: env::var("MODEL_LAST_TRAINING_DATE")
                .unwrap_or(defaults.last_training_date),
            accuracy: env::var("MODEL_ACCURACY").unwrap_or(defaults.accuracy),
            description: env::var("MODEL_DESCRIPTION").unwrap_or(defaults.description),
        })
    }

    fn path_var(key: &str, default: PathBuf) -> PathBuf {
        env::var(key).map(PathBuf::from).unwrap_or(default)
    }
}
