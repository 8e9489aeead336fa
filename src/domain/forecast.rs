use crate::domain::errors::ForecastError;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Number of historical values the predictor consumes per step.
pub const WINDOW_SIZE: usize = 60;

/// Longest horizon a single forecast call may request.
pub const MAX_HORIZON: usize = 30;

/// Horizon used when a caller doesn't ask for one.
pub const DEFAULT_HORIZON: usize = 7;

/// Fixed-length history of raw prices, most recent last.
///
/// # Invariants
///
/// - Always holds exactly [`WINDOW_SIZE`] values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Window {
    values: Vec<f64>,
}

impl Window {
    pub fn new(values: Vec<f64>) -> Result<Self, ForecastError> {
        if values.len() != WINDOW_SIZE {
            return Err(ForecastError::InvalidWindow {
                expected: WINDOW_SIZE,
                actual: values.len(),
            });
        }
        Ok(Self { values })
    }

    pub fn last(&self) -> f64 {
        self.values[WINDOW_SIZE - 1]
    }
}

impl AsRef<[f64]> for Window {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

/// Single dated forecast value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub price: f64,
    pub date: NaiveDate,
}

/// Validates a requested horizon against `1..=MAX_HORIZON`.
pub fn validate_horizon(horizon: usize) -> Result<usize, ForecastError> {
    if !(1..=MAX_HORIZON).contains(&horizon) {
        return Err(ForecastError::InvalidHorizon {
            horizon,
            max: MAX_HORIZON,
        });
    }
    Ok(horizon)
}

/// Calendar dates for `count` forecast steps: `today + 1 .. today + count`.
pub fn forecast_dates(today: NaiveDate, count: usize) -> Vec<NaiveDate> {
    (1..=count as u64)
        .filter_map(|offset| today.checked_add_days(Days::new(offset)))
        .collect()
}

/// Pairs forecast prices with their dates, starting tomorrow.
pub fn dated_points(prices: &[f64], today: NaiveDate) -> Vec<ForecastPoint> {
    prices
        .iter()
        .zip(forecast_dates(today, prices.len()))
        .map(|(&price, date)| ForecastPoint { price, date })
        .collect()
}
