use crate::application::forecasting::ForecastEngine;
use crate::application::ml::{NaivePredictor, OnnxStepPredictor, StepPredictor};
use crate::config::{ModelEnvConfig, PredictorMode};
use crate::domain::errors::ArtifactError;
use crate::domain::forecast::Window;
use crate::domain::ml::ValueScaler;
use crate::infrastructure::artifacts;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Which parts of the artifact bundle were loaded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ArtifactStatus {
    pub model_loaded: bool,
    pub scaler_loaded: bool,
    pub data_loaded: bool,
}

impl ArtifactStatus {
    pub fn is_ready(&self) -> bool {
        self.model_loaded && self.scaler_loaded && self.data_loaded
    }

    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.model_loaded {
            missing.push("model");
        }
        if !self.scaler_loaded {
            missing.push("scaler");
        }
        if !self.data_loaded {
            missing.push("data");
        }
        missing
    }
}

/// Descriptive model facts reported by the model info endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelMetadata {
    pub model_type: String,
    pub last_training_date: String,
    pub accuracy: String,
    pub description: String,
}

impl ModelMetadata {
    pub fn from_config(config: &ModelEnvConfig) -> Self {
        Self {
            model_type: config.model_type.clone(),
            last_training_date: config.last_training_date.clone(),
            accuracy: config.accuracy.clone(),
            description: config.description.clone(),
        }
    }
}

impl Default for ModelMetadata {
    fn default() -> Self {
        Self::from_config(&ModelEnvConfig::default())
    }
}

/// Process-wide model state, built once at startup and read-only afterwards.
pub struct ModelContext {
    engine: Option<ForecastEngine>,
    seed: Option<Window>,
    status: ArtifactStatus,
    metadata: ModelMetadata,
}

impl ModelContext {
    /// Assemble a context from already-loaded parts.
    pub fn from_parts(
        predictor: Option<Arc<dyn StepPredictor>>,
        scaler: ValueScaler,
        seed: Option<Window>,
        model_type: impl Into<String>,
    ) -> Self {
        let metadata = ModelMetadata {
            model_type: model_type.into(),
            ..ModelMetadata::default()
        };
        Self::assemble(predictor, scaler, seed, metadata)
    }

    fn assemble(
        predictor: Option<Arc<dyn StepPredictor>>,
        scaler: ValueScaler,
        seed: Option<Window>,
        metadata: ModelMetadata,
    ) -> Self {
        let status = ArtifactStatus {
            model_loaded: predictor.is_some(),
            scaler_loaded: scaler.is_fitted(),
            data_loaded: seed.is_some(),
        };
        Self {
            engine: predictor.map(|p| ForecastEngine::new(p, scaler)),
            seed,
            status,
            metadata,
        }
    }

    /// Load every artifact named by `config`. Missing or unreadable artifacts
    /// are logged and leave the context not ready.
    pub fn load(config: &ModelEnvConfig) -> Self {
        let predictor = Self::load_predictor(config);

        let scaler = artifacts::require_artifact("scaler", &config.scaler_path, &config.fallback_dir)
            .and_then(|path| artifacts::load_scaler(&path));
        let scaler = log_outcome("scaler", scaler).unwrap_or_else(ValueScaler::unfitted);

        let seed = artifacts::require_artifact("seed", &config.seed_path, &config.fallback_dir)
            .and_then(|path| artifacts::load_seed(&path));
        let seed = log_outcome("seed", seed);

        let mut metadata = ModelMetadata::from_config(config);
        if config.mode == PredictorMode::Mock {
            if let Some(predictor) = &predictor {
                metadata.model_type = predictor.name().to_string();
            }
        }

        let context = Self::assemble(predictor, scaler, seed, metadata);
        if context.is_ready() {
            info!("All model components loaded successfully");
        } else {
            warn!(
                "Model context not ready, missing: {}",
                context.status.missing().join(", ")
            );
        }
        context
    }

    fn load_predictor(config: &ModelEnvConfig) -> Option<Arc<dyn StepPredictor>> {
        match config.mode {
            PredictorMode::Mock => {
                info!("MODE=mock: using persistence predictor");
                Some(Arc::new(NaivePredictor))
            }
            PredictorMode::Onnx => {
                let predictor =
                    artifacts::require_artifact("model", &config.model_path, &config.fallback_dir)
                        .and_then(|path| OnnxStepPredictor::load(&path));
                log_outcome("model", predictor).map(|p| Arc::new(p) as Arc<dyn StepPredictor>)
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status.is_ready()
    }

    pub fn status(&self) -> ArtifactStatus {
        self.status
    }

    pub fn model_type(&self) -> &str {
        &self.metadata.model_type
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    /// Version reported by the loaded predictor, if any
    pub fn model_version(&self) -> Option<&str> {
        self.engine.as_ref().map(|engine| engine.predictor().version())
    }

    /// Engine and seed, only when every artifact is present.
    pub fn ready_parts(&self) -> Option<(&ForecastEngine, &Window)> {
        if !self.is_ready() {
            return None;
        }
        Some((self.engine.as_ref()?, self.seed.as_ref()?))
    }
}

fn log_outcome<T>(kind: &str, result: Result<T, ArtifactError>) -> Option<T> {
    match result {
        Ok(value) => {
            info!("{} loaded successfully", kind);
            Some(value)
        }
        Err(ArtifactError::NotFound { .. }) => None,
        Err(e) => {
            error!("Failed to load {}: {}", kind, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::forecast::WINDOW_SIZE;

    #[test]
    fn test_missing_parts_are_reported() {
        let context = ModelContext::from_parts(None, ValueScaler::unfitted(), None, "LSTM");
        assert!(!context.is_ready());
        assert_eq!(context.status().missing(), vec!["model", "scaler", "data"]);
        assert!(context.ready_parts().is_none());
    }

    #[test]
    fn test_unfitted_scaler_blocks_readiness() {
        let seed = Window::new(vec![1900.0; WINDOW_SIZE]).unwrap();
        let context = ModelContext::from_parts(
            Some(Arc::new(NaivePredictor)),
            ValueScaler::unfitted(),
            Some(seed),
            "LSTM",
        );
        assert_eq!(context.status().missing(), vec!["scaler"]);
        assert!(context.ready_parts().is_none());
    }

    #[test]
    fn test_ready_context_exposes_engine() {
        let seed = Window::new(vec![1900.0; WINDOW_SIZE]).unwrap();
        let context = ModelContext::from_parts(
            Some(Arc::new(NaivePredictor)),
            ValueScaler::min_max(1000.0, 3000.0),
            Some(seed),
            "Naive",
        );
        assert!(context.is_ready());
        let (engine, seed) = context.ready_parts().unwrap();
        assert_eq!(engine.predictor().name(), "Naive (persistence)");
        assert_eq!(seed.last(), 1900.0);
        assert_eq!(context.model_type(), "Naive");
        assert_eq!(context.model_version(), Some("v1"));
        assert_eq!(context.metadata().accuracy, "~96%");
    }

    #[test]
    fn test_missing_model_has_no_version() {
        let context = ModelContext::from_parts(None, ValueScaler::unfitted(), None, "LSTM");
        assert_eq!(context.model_version(), None);
    }
}
