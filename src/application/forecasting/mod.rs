pub mod engine;
pub mod service;

pub use engine::ForecastEngine;
pub use service::{ForecastService, ServiceError};
