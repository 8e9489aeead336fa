//! Request-level forecasting service.
//!
//! Sits between the HTTP facade and the core: checks readiness, validates the
//! requested number of days, pairs values with dates and shapes responses.

use crate::application::bootstrap::{ArtifactStatus, ModelContext, ModelMetadata};
use crate::domain::errors::ForecastError;
use crate::domain::forecast::{forecast_dates, DEFAULT_HORIZON, MAX_HORIZON};
use crate::domain::scenario::{ScenarioAdjuster, ScenarioParameters};
use crate::infrastructure::observability::Metrics;
use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

pub const CURRENCY: &str = "USD";
pub const UNIT: &str = "per ounce";

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Model not loaded (missing: {})", .missing.join(", "))]
    NotReady { missing: Vec<&'static str> },

    #[error("Days must be between 1 and {max}, got {days}")]
    InvalidDays { days: i64, max: usize },

    #[error(transparent)]
    Forecast(#[from] ForecastError),
}

#[derive(Debug, Clone, Serialize)]
pub struct NextDayForecast {
    pub success: bool,
    pub prediction: f64,
    pub prediction_date: NaiveDate,
    pub currency: &'static str,
    pub unit: &'static str,
    pub model_type: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MultiDayForecast {
    pub success: bool,
    pub predictions: Vec<f64>,
    pub dates: Vec<NaiveDate>,
    pub currency: &'static str,
    pub unit: &'static str,
    pub model_type: String,
    pub days_predicted: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioForecast {
    pub success: bool,
    pub base_predictions: Vec<f64>,
    pub scenario_predictions: Vec<f64>,
    pub dates: Vec<NaiveDate>,
    pub currency: &'static str,
    pub unit: &'static str,
    pub model_type: String,
    pub days_predicted: usize,
    pub scenario_params: ScenarioParameters,
}

#[derive(Clone)]
pub struct ForecastService {
    context: Arc<ModelContext>,
    metrics: Metrics,
}

impl ForecastService {
    pub fn new(context: Arc<ModelContext>, metrics: Metrics) -> Self {
        metrics
            .model_ready
            .set(if context.is_ready() { 1.0 } else { 0.0 });
        Self { context, metrics }
    }

    pub fn status(&self) -> ArtifactStatus {
        self.context.status()
    }

    pub fn is_ready(&self) -> bool {
        self.context.is_ready()
    }

    pub fn model_type(&self) -> &str {
        self.context.model_type()
    }

    pub fn metadata(&self) -> &ModelMetadata {
        self.context.metadata()
    }

    pub fn model_version(&self) -> Option<&str> {
        self.context.model_version()
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Local calendar date used as "today" for dating forecasts
    pub fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    /// Validates a caller-supplied day count; `None` means the default of 7.
    pub fn validate_days(days: Option<i64>) -> Result<usize, ServiceError> {
        let days = days.unwrap_or(DEFAULT_HORIZON as i64);
        if days < 1 || days > MAX_HORIZON as i64 {
            return Err(ServiceError::InvalidDays {
                days,
                max: MAX_HORIZON,
            });
        }
        Ok(days as usize)
    }

    /// Raw baseline forecast for `days` steps.
    pub fn baseline(&self, days: usize) -> Result<Vec<f64>, ServiceError> {
        let (engine, seed) = self
            .context
            .ready_parts()
            .ok_or_else(|| ServiceError::NotReady {
                missing: self.context.status().missing(),
            })?;

        let started = Instant::now();
        let result = engine.forecast(seed, days);
        self.metrics
            .rollout_seconds
            .observe(started.elapsed().as_secs_f64());
        Ok(result?)
    }

    pub fn predict_next(&self, today: NaiveDate) -> Result<NextDayForecast, ServiceError> {
        let predictions = self.baseline(1)?;
        let dates = forecast_dates(today, 1);
        Ok(NextDayForecast {
            success: true,
            prediction: predictions[0],
            prediction_date: dates[0],
            currency: CURRENCY,
            unit: UNIT,
            model_type: self.model_type().to_string(),
        })
    }

    pub fn predict_days(
        &self,
        days: usize,
        today: NaiveDate,
    ) -> Result<MultiDayForecast, ServiceError> {
        let predictions = self.baseline(days)?;
        Ok(MultiDayForecast {
            success: true,
            dates: forecast_dates(today, predictions.len()),
            days_predicted: predictions.len(),
            predictions,
            currency: CURRENCY,
            unit: UNIT,
            model_type: self.model_type().to_string(),
        })
    }

    pub fn predict_scenario(
        &self,
        days: usize,
        params: ScenarioParameters,
        today: NaiveDate,
    ) -> Result<ScenarioForecast, ServiceError> {
        let base_predictions = self.baseline(days)?;
        let scenario_predictions = ScenarioAdjuster::adjust(&base_predictions, &params);
        Ok(ScenarioForecast {
            success: true,
            dates: forecast_dates(today, base_predictions.len()),
            days_predicted: base_predictions.len(),
            base_predictions,
            scenario_predictions,
            currency: CURRENCY,
            unit: UNIT,
            model_type: self.model_type().to_string(),
            scenario_params: params,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ml::NaivePredictor;
    use crate::domain::forecast::{Window, WINDOW_SIZE};
    use crate::domain::ml::ValueScaler;

    fn service(ready: bool) -> ForecastService {
        let seed = ready.then(|| Window::new(vec![1950.0; WINDOW_SIZE]).unwrap());
        let context = ModelContext::from_parts(
            Some(Arc::new(NaivePredictor)),
            ValueScaler::min_max(1000.0, 3000.0),
            seed,
            "LSTM",
        );
        ForecastService::new(Arc::new(context), Metrics::new().unwrap())
    }

    #[test]
    fn test_validate_days() {
        assert_eq!(ForecastService::validate_days(None).unwrap(), 7);
        assert_eq!(ForecastService::validate_days(Some(30)).unwrap(), 30);
        for bad in [0, -3, 31] {
            assert!(matches!(
                ForecastService::validate_days(Some(bad)),
                Err(ServiceError::InvalidDays { .. })
            ));
        }
    }

    #[test]
    fn test_not_ready_never_calls_engine() {
        let service = service(false);
        let err = service.predict_days(7, ForecastService::today()).unwrap_err();
        match err {
            ServiceError::NotReady { missing } => assert_eq!(missing, vec!["data"]),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(service.metrics().model_ready.get(), 0.0);
    }

    #[test]
    fn test_multi_day_forecast_is_dated_from_tomorrow() {
        let service = service(true);
        let today = NaiveDate::from_ymd_opt(2024, 8, 17).unwrap();
        let response = service.predict_days(5, today).unwrap();

        assert_eq!(response.days_predicted, 5);
        assert_eq!(response.predictions.len(), 5);
        assert_eq!(response.dates[0], NaiveDate::from_ymd_opt(2024, 8, 18).unwrap());
        assert!(response.dates.windows(2).all(|d| d[0] < d[1]));
        assert!(response.predictions.iter().all(|p| (p - 1950.0).abs() < 1e-6));
    }

    #[test]
    fn test_scenario_forecast_applies_adjustment() {
        let service = service(true);
        let params = ScenarioParameters {
            interest_rate_change: 10.0,
            ..Default::default()
        };
        let response = service
            .predict_scenario(3, params, ForecastService::today())
            .unwrap();

        for (base, adjusted) in response
            .base_predictions
            .iter()
            .zip(&response.scenario_predictions)
        {
            assert!((adjusted - base * 0.95).abs() < 1e-6);
        }
        assert_eq!(response.scenario_params, params);
    }
}
