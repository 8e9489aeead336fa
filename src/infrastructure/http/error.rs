use crate::application::forecasting::ServiceError;
use crate::domain::errors::ForecastError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Unified error type for API responses.
#[derive(Debug)]
pub enum ApiError {
    Service(ServiceError),
    /// Request body could not be extracted
    BadRequest(String),
    Internal(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Service(e) => write!(f, "{e}"),
            Self::BadRequest(msg) => write!(f, "{msg}"),
            Self::Internal(msg) => write!(f, "internal_error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Service(ServiceError::InvalidDays { .. }) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Service(ServiceError::Forecast(
                ForecastError::InvalidWindow { .. } | ForecastError::InvalidHorizon { .. },
            )) => StatusCode::BAD_REQUEST,
            Self::Service(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn outcome(&self) -> &'static str {
        match self {
            Self::Service(ServiceError::NotReady { .. }) => "not_ready",
            Self::Service(ServiceError::InvalidDays { .. }) | Self::BadRequest(_) => {
                "invalid_request"
            }
            Self::Service(ServiceError::Forecast(ForecastError::PredictionFailed { .. })) => {
                "prediction_failed"
            }
            Self::Service(ServiceError::Forecast(_)) => "invalid_request",
            Self::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            // Keeps the message clients already match on
            Self::Service(ServiceError::NotReady { .. }) => json!({ "error": "Model not loaded" }),
            other => json!({ "error": other.to_string() }),
        };
        (status, axum::Json(body)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        Self::Service(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(e: tokio::task::JoinError) -> Self {
        Self::Internal(e.to_string())
    }
}
