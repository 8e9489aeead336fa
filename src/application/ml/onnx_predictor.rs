use super::predictor::StepPredictor;
use crate::domain::errors::{ArtifactError, PredictorError};
use ort::session::Session;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;

/// Single-step LSTM exported to ONNX, input shape `[1, window, 1]`.
pub struct OnnxStepPredictor {
    // Held only for the duration of one `run` call
    session: Mutex<Session>,
}

impl OnnxStepPredictor {
    pub fn load(model_path: &Path) -> Result<Self, ArtifactError> {
        if !model_path.exists() {
            return Err(ArtifactError::NotFound {
                kind: "model",
                path: model_path.display().to_string(),
            });
        }

        let unreadable = |e: ort::Error| ArtifactError::Unreadable {
            kind: "model",
            path: model_path.display().to_string(),
            reason: e.to_string(),
        };

        let session = Session::builder()
            .map_err(unreadable)?
            .commit_from_file(model_path)
            .map_err(unreadable)?;

        info!("Successfully loaded ONNX model from {:?}", model_path);
        Ok(Self {
            session: Mutex::new(session),
        })
    }
}

impl StepPredictor for OnnxStepPredictor {
    fn predict(&self, window: &[f64]) -> Result<f64, PredictorError> {
        let flat_data: Vec<f32> = window.iter().map(|v| *v as f32).collect();
        let shape = vec![1, window.len(), 1];

        let input_value = ort::value::Value::from_array((shape.as_slice(), flat_data))
            .map_err(|e| PredictorError::Runtime(format!("Input value creation failed: {}", e)))?;

        let inputs = ort::inputs![input_value];

        let mut session = self
            .session
            .lock()
            .map_err(|e| PredictorError::Runtime(format!("Session lock failed: {}", e)))?;

        let outputs = session
            .run(inputs)
            .map_err(|e| PredictorError::Runtime(e.to_string()))?;

        let output_value = outputs
            .iter()
            .next()
            .map(|(_, v)| v)
            .ok_or(PredictorError::EmptyOutput)?;
        let data = output_value
            .try_extract_tensor::<f32>()
            .map_err(|e| PredictorError::Runtime(e.to_string()))?;

        let value = *data.1.iter().next().ok_or(PredictorError::EmptyOutput)? as f64;
        Ok(value)
    }

    fn name(&self) -> &str {
        "LSTM"
    }

    fn version(&self) -> &str {
        "onnx"
    }
}
