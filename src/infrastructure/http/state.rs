use crate::application::forecasting::ForecastService;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Shared application state, passed to all route handlers via `axum::extract::State`.
pub struct AppState {
    pub service: ForecastService,
    pub started_at: DateTime<Utc>,
    /// Serve `/api/metrics`; disabled returns 404
    pub metrics_enabled: bool,
}

impl AppState {
    pub fn new(service: ForecastService, metrics_enabled: bool) -> Arc<Self> {
        Arc::new(Self {
            service,
            started_at: Utc::now(),
            metrics_enabled,
        })
    }
}
