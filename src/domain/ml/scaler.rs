//! Value scaling between raw prices and the predictor's normalized domain.
//!
//! The constants must be the ones fitted at training time. They are loaded
//! from the artifact bundle and never refitted here.

use crate::domain::errors::ForecastError;
use serde::{Deserialize, Serialize};

/// Fitted transform parameters, as exported alongside the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalerParams {
    /// Min-max scaling into `feature_range`
    MinMax {
        data_min: f64,
        data_max: f64,
        #[serde(default = "default_feature_range")]
        feature_range: (f64, f64),
    },
    /// Standardization to zero mean, unit variance
    Standard { mean: f64, std: f64 },
}

fn default_feature_range() -> (f64, f64) {
    (0.0, 1.0)
}

impl ScalerParams {
    /// Checks that the transform is invertible with finite constants.
    pub fn validate(&self) -> Result<(), String> {
        match *self {
            ScalerParams::MinMax {
                data_min,
                data_max,
                feature_range: (lo, hi),
            } => {
                if ![data_min, data_max, lo, hi].iter().all(|v| v.is_finite()) {
                    return Err("min_max constants must be finite".to_string());
                }
                if data_max < data_min {
                    return Err(format!(
                        "data_max ({}) is below data_min ({})",
                        data_max, data_min
                    ));
                }
                if hi <= lo {
                    return Err(format!("feature_range ({}, {}) is empty", lo, hi));
                }
            }
            ScalerParams::Standard { mean, std } => {
                if !mean.is_finite() || !std.is_finite() {
                    return Err("standard constants must be finite".to_string());
                }
                if std < 0.0 {
                    return Err(format!("std ({}) is negative", std));
                }
            }
        }
        Ok(())
    }

    /// Multiplier and offset such that `normalized = raw * scale + offset`.
    fn affine(&self) -> (f64, f64) {
        match *self {
            ScalerParams::MinMax {
                data_min,
                data_max,
                feature_range: (lo, hi),
            } => {
                let range = data_max - data_min;
                // Constant features keep a unit range.
                let range = if range == 0.0 { 1.0 } else { range };
                let scale = (hi - lo) / range;
                (scale, lo - data_min * scale)
            }
            ScalerParams::Standard { mean, std } => {
                let std = if std == 0.0 { 1.0 } else { std };
                (1.0 / std, -mean / std)
            }
        }
    }
}

/// Bidirectional mapping between raw price units and normalized values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueScaler {
    params: Option<ScalerParams>,
}

impl ValueScaler {
    pub fn new(params: ScalerParams) -> Self {
        Self {
            params: Some(params),
        }
    }

    /// A scaler whose parameters were never loaded. Every call fails.
    pub fn unfitted() -> Self {
        Self { params: None }
    }

    pub fn min_max(data_min: f64, data_max: f64) -> Self {
        Self::new(ScalerParams::MinMax {
            data_min,
            data_max,
            feature_range: default_feature_range(),
        })
    }

    pub fn standard(mean: f64, std: f64) -> Self {
        Self::new(ScalerParams::Standard { mean, std })
    }

    pub fn is_fitted(&self) -> bool {
        self.params.is_some()
    }

    pub fn to_normalized(&self, raw: &[f64]) -> Result<Vec<f64>, ForecastError> {
        let (scale, offset) = self.affine()?;
        Ok(raw.iter().map(|x| x * scale + offset).collect())
    }

    pub fn to_raw(&self, normalized: &[f64]) -> Result<Vec<f64>, ForecastError> {
        let (scale, offset) = self.affine()?;
        Ok(normalized.iter().map(|y| (y - offset) / scale).collect())
    }

    fn affine(&self) -> Result<(f64, f64), ForecastError> {
        self.params
            .as_ref()
            .map(ScalerParams::affine)
            .ok_or(ForecastError::ScalerNotFitted)
    }
}
