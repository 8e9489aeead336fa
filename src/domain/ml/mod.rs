pub mod scaler;

pub use scaler::{ScalerParams, ValueScaler};
