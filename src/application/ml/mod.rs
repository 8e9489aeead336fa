pub mod naive_predictor;
pub mod onnx_predictor;
pub mod predictor;

pub use naive_predictor::NaivePredictor;
pub use onnx_predictor::OnnxStepPredictor;
pub use predictor::StepPredictor;
