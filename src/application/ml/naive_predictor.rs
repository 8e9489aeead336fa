use super::predictor::StepPredictor;
use crate::domain::errors::PredictorError;

/// Persistence baseline: the next value equals the last observed one.
///
/// Used in mock mode so the service can run without an ONNX model.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaivePredictor;

impl StepPredictor for NaivePredictor {
    fn predict(&self, window: &[f64]) -> Result<f64, PredictorError> {
        window.last().copied().ok_or(PredictorError::EmptyOutput)
    }

    fn name(&self) -> &str {
        "Naive (persistence)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naive_repeats_last_value() {
        let predictor = NaivePredictor;
        assert_eq!(predictor.predict(&[0.1, 0.2, 0.7]), Ok(0.7));
        assert_eq!(predictor.predict(&[]), Err(PredictorError::EmptyOutput));
    }
}
