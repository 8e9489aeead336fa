use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::warn;

use super::error::ApiError;
use super::state::AppState;
use crate::application::forecasting::service::{
    MultiDayForecast, NextDayForecast, ScenarioForecast,
};
use crate::application::forecasting::{ForecastService, ServiceError};
use crate::domain::forecast::{MAX_HORIZON, WINDOW_SIZE};
use crate::domain::scenario::{ScenarioParameters, ScenarioPreset};

const ENDPOINTS: &[&str] = &[
    "/api/health",
    "/api/test",
    "/api/model/info",
    "/api/metrics",
    "/api/predict/next",
    "/api/predict/week",
    "/api/predict/custom",
    "/api/predict/scenario",
    "/api/scenario/presets",
];

// ── Request bodies ───────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct CustomRequest {
    #[serde(default)]
    days: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ScenarioRequest {
    #[serde(default)]
    days: Option<i64>,
    #[serde(flatten)]
    params: ScenarioParameters,
}

// ── Route definitions ────────────────────────────────────────────────────

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health))
        .route("/api/test", get(test_connection))
        .route("/api/model/info", get(model_info))
        .route("/api/metrics", get(metrics))
        .route("/api/predict/next", get(predict_next))
        .route("/api/predict/week", get(predict_week))
        .route("/api/predict/custom", post(predict_custom))
        .route("/api/predict/scenario", post(predict_scenario))
        .route("/api/scenario/presets", get(scenario_presets))
}

/// Unwraps a JSON body, answering `{"error": ...}` with 400 on rejection.
fn json_body<T>(
    state: &AppState,
    endpoint: &'static str,
    body: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiError> {
    body.map(|Json(req)| req).map_err(|rejection| {
        let err = ApiError::from(rejection);
        warn!("{} rejected body: {}", endpoint, err);
        state.service.metrics().inc_requests(endpoint, err.outcome());
        err
    })
}

/// Runs a forecast off the async runtime and records the outcome.
async fn run_forecast<T, F>(
    state: &Arc<AppState>,
    endpoint: &'static str,
    f: F,
) -> Result<Json<T>, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&ForecastService) -> Result<T, ServiceError> + Send + 'static,
{
    let service = state.service.clone();
    let result = match tokio::task::spawn_blocking(move || f(&service)).await {
        Ok(r) => r.map_err(ApiError::from),
        Err(e) => Err(ApiError::from(e)),
    };

    match &result {
        Ok(_) => state.service.metrics().inc_requests(endpoint, "ok"),
        Err(e) => {
            warn!("{} failed: {}", endpoint, e);
            state.service.metrics().inc_requests(endpoint, e.outcome());
        }
    }
    result.map(Json)
}

// ── Handlers ─────────────────────────────────────────────────────────────

/// GET /: Service banner and endpoint list.
async fn root() -> Json<Value> {
    Json(json!({
        "message": "Gold Price Prediction API",
        "status": "running",
        "endpoints": ENDPOINTS,
    }))
}

/// GET /api/health: Liveness plus artifact load flags.
async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    let status = state.service.status();
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Local::now().to_rfc3339(),
        "model_loaded": status.model_loaded,
        "scaler_loaded": status.scaler_loaded,
        "data_loaded": status.data_loaded,
        "uptime_seconds": (chrono::Utc::now() - state.started_at).num_seconds(),
    }))
}

/// GET /api/test: Connectivity check used by clients before anything else.
async fn test_connection() -> Json<Value> {
    Json(json!({
        "message": "Backend API is working!",
        "timestamp": chrono::Local::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /api/model/info: Model description.
async fn model_info(State(state): State<Arc<AppState>>) -> Json<Value> {
    let status = state.service.status();
    let metadata = state.service.metadata();
    Json(json!({
        "success": true,
        "model_type": metadata.model_type,
        "model_version": state.service.model_version(),
        "last_training_date": metadata.last_training_date,
        "accuracy": metadata.accuracy,
        "description": metadata.description,
        "window_size": WINDOW_SIZE,
        "max_horizon": MAX_HORIZON,
        "ready": status.is_ready(),
        "model_loaded": status.model_loaded,
        "scaler_loaded": status.scaler_loaded,
        "data_loaded": status.data_loaded,
    }))
}

/// GET /api/metrics: Prometheus text exposition.
async fn metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    if !state.metrics_enabled {
        return (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            "# metrics disabled\n".to_string(),
        );
    }
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        state.service.metrics().render(),
    )
}

/// GET /api/predict/next: Next day's price.
async fn predict_next(
    State(state): State<Arc<AppState>>,
) -> Result<Json<NextDayForecast>, ApiError> {
    run_forecast(&state, "predict_next", |service| {
        service.predict_next(ForecastService::today())
    })
    .await
}

/// GET /api/predict/week: Next 7 days.
async fn predict_week(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MultiDayForecast>, ApiError> {
    run_forecast(&state, "predict_week", |service| {
        service.predict_days(7, ForecastService::today())
    })
    .await
}

/// POST /api/predict/custom: `{ "days": 1..=30 }`, default 7.
async fn predict_custom(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CustomRequest>, JsonRejection>,
) -> Result<Json<MultiDayForecast>, ApiError> {
    let req = json_body(&state, "predict_custom", body)?;
    run_forecast(&state, "predict_custom", move |service| {
        let days = ForecastService::validate_days(req.days)?;
        service.predict_days(days, ForecastService::today())
    })
    .await
}

/// POST /api/predict/scenario: Base and scenario-adjusted forecasts.
async fn predict_scenario(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ScenarioRequest>, JsonRejection>,
) -> Result<Json<ScenarioForecast>, ApiError> {
    let req = json_body(&state, "predict_scenario", body)?;
    run_forecast(&state, "predict_scenario", move |service| {
        let days = ForecastService::validate_days(req.days)?;
        service.predict_scenario(days, req.params, ForecastService::today())
    })
    .await
}

/// GET /api/scenario/presets: Named scenarios and their parameters.
async fn scenario_presets() -> Json<Value> {
    let presets: Vec<Value> = ScenarioPreset::all()
        .into_iter()
        .map(|preset| {
            let params = preset.parameters();
            json!({
                "name": preset.to_string(),
                "description": preset.description(),
                "parameters": params,
                "impact_pct": params.impact_factor() * 100.0,
            })
        })
        .collect();
    Json(json!({ "success": true, "presets": presets }))
}
