use thiserror::Error;

/// Errors raised by a single-step predictor
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PredictorError {
    #[error("Predictor not loaded")]
    NotLoaded,

    #[error("Predictor runtime failure: {0}")]
    Runtime(String),

    #[error("Predictor returned a non-finite value: {0}")]
    NonFinite(f64),

    #[error("Predictor returned no output")]
    EmptyOutput,
}

/// Errors related to the autoregressive forecast rollout
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ForecastError {
    #[error("Invalid window: expected {expected} values, got {actual}")]
    InvalidWindow { expected: usize, actual: usize },

    #[error("Invalid horizon: {horizon} (must be between 1 and {max})")]
    InvalidHorizon { horizon: usize, max: usize },

    #[error("Value scaler is not fitted")]
    ScalerNotFitted,

    #[error("Prediction failed at step {step}: {source}")]
    PredictionFailed {
        step: usize,
        #[source]
        source: PredictorError,
    },
}

/// Errors related to loading the model artifact bundle
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("{kind} artifact not found at {path}")]
    NotFound { kind: &'static str, path: String },

    #[error("Failed to read {kind} artifact at {path}: {reason}")]
    Unreadable {
        kind: &'static str,
        path: String,
        reason: String,
    },

    #[error("Seed window at {path} has {actual} values, expected {expected}")]
    SeedLength {
        path: String,
        expected: usize,
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_error_formatting() {
        let error = ForecastError::InvalidHorizon {
            horizon: 31,
            max: 30,
        };

        let msg = error.to_string();
        assert!(msg.contains("31"));
        assert!(msg.contains("30"));
    }

    #[test]
    fn test_prediction_failed_keeps_cause() {
        let error = ForecastError::PredictionFailed {
            step: 3,
            source: PredictorError::NonFinite(f64::NAN),
        };

        assert!(error.to_string().contains("step 3"));
        let source = std::error::Error::source(&error).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("Predictor returned a non-finite value: NaN"));
    }
}
