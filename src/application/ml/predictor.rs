use crate::domain::errors::PredictorError;

/// Interface for single-step sequence models
pub trait StepPredictor: Send + Sync {
    /// Predict the next normalized value from a normalized window
    fn predict(&self, window: &[f64]) -> Result<f64, PredictorError>;

    /// Get model name/type
    fn name(&self) -> &str;

    /// Get model version/id
    fn version(&self) -> &str {
        "v1"
    }
}
