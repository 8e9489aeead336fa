pub mod model_context;

pub use model_context::{ArtifactStatus, ModelContext, ModelMetadata};
