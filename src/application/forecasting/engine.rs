//! Autoregressive multi-step rollout.
//!
//! The predictor only ever sees normalized values. Each step's normalized
//! output is fed back into the window; the denormalized value is only
//! reported to the caller.

use crate::application::ml::StepPredictor;
use crate::domain::errors::{ForecastError, PredictorError};
use crate::domain::forecast::{validate_horizon, WINDOW_SIZE};
use crate::domain::ml::ValueScaler;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::debug;

pub struct ForecastEngine {
    predictor: Arc<dyn StepPredictor>,
    scaler: ValueScaler,
}

impl ForecastEngine {
    pub fn new(predictor: Arc<dyn StepPredictor>, scaler: ValueScaler) -> Self {
        Self { predictor, scaler }
    }

    pub fn predictor(&self) -> &dyn StepPredictor {
        self.predictor.as_ref()
    }

    pub fn scaler(&self) -> &ValueScaler {
        &self.scaler
    }

    /// Forecast `horizon` raw prices following `seed`.
    ///
    /// `seed` is usually a [`Window`](crate::domain::forecast::Window); plain
    /// slices are accepted and length-checked.
    pub fn forecast<S>(&self, seed: S, horizon: usize) -> Result<Vec<f64>, ForecastError>
    where
        S: AsRef<[f64]>,
    {
        self.forecast_with_observer(seed, horizon, |_, _| {})
    }

    /// Same as [`forecast`](Self::forecast), calling `observer(step, window)`
    /// with the normalized window after each slide.
    pub fn forecast_with_observer<S, F>(
        &self,
        seed: S,
        horizon: usize,
        mut observer: F,
    ) -> Result<Vec<f64>, ForecastError>
    where
        S: AsRef<[f64]>,
        F: FnMut(usize, &[f64]),
    {
        let seed = seed.as_ref();
        if seed.len() != WINDOW_SIZE {
            return Err(ForecastError::InvalidWindow {
                expected: WINDOW_SIZE,
                actual: seed.len(),
            });
        }
        validate_horizon(horizon)?;

        debug!("Rolling out {} steps with {}", horizon, self.predictor.name());

        let mut current: VecDeque<f64> = self.scaler.to_normalized(seed)?.into();
        let mut predictions = Vec::with_capacity(horizon);

        for step in 0..horizon {
            let normalized_next = self
                .predictor
                .predict(current.make_contiguous())
                .and_then(|value| {
                    if value.is_finite() {
                        Ok(value)
                    } else {
                        Err(PredictorError::NonFinite(value))
                    }
                })
                .map_err(|source| ForecastError::PredictionFailed { step, source })?;

            let raw_next = self
                .scaler
                .to_raw(&[normalized_next])?
                .first()
                .copied()
                .ok_or(ForecastError::PredictionFailed {
                    step,
                    source: PredictorError::EmptyOutput,
                })?;
            if !raw_next.is_finite() {
                return Err(ForecastError::PredictionFailed {
                    step,
                    source: PredictorError::NonFinite(raw_next),
                });
            }
            predictions.push(raw_next);

            current.pop_front();
            current.push_back(normalized_next);
            observer(step, current.make_contiguous());
        }

        Ok(predictions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Predicts `last + drift` in normalized space and records every input
    struct DriftPredictor {
        drift: f64,
        seen: Mutex<Vec<Vec<f64>>>,
    }

    impl StepPredictor for DriftPredictor {
        fn predict(&self, window: &[f64]) -> Result<f64, PredictorError> {
            self.seen.lock().unwrap().push(window.to_vec());
            Ok(window[window.len() - 1] + self.drift)
        }

        fn name(&self) -> &str {
            "drift"
        }
    }

    fn engine(drift: f64) -> (ForecastEngine, Arc<DriftPredictor>) {
        let predictor = Arc::new(DriftPredictor {
            drift,
            seen: Mutex::new(Vec::new()),
        });
        let engine = ForecastEngine::new(predictor.clone(), ValueScaler::min_max(1000.0, 2000.0));
        (engine, predictor)
    }

    #[test]
    fn test_predictor_sees_normalized_feedback() {
        let (engine, predictor) = engine(0.01);
        let seed = vec![1500.0; WINDOW_SIZE];

        let out = engine.forecast(&seed, 3).unwrap();

        // 0.5 -> 0.51 -> 0.52 -> 0.53 normalized, i.e. +10 per step in raw units
        let expected = [1510.0, 1520.0, 1530.0];
        for (got, want) in out.iter().zip(expected) {
            assert!((got - want).abs() < 1e-6);
        }

        let seen = predictor.seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert!((seen[1][WINDOW_SIZE - 1] - 0.51).abs() < 1e-9);
        assert!((seen[2][WINDOW_SIZE - 1] - 0.52).abs() < 1e-9);
        assert!(seen.iter().all(|w| w.len() == WINDOW_SIZE));
    }

    #[test]
    fn test_window_slides_by_one() {
        let (engine, _) = engine(0.0);
        let seed: Vec<f64> = (0..WINDOW_SIZE).map(|i| 1000.0 + i as f64 * 10.0).collect();

        let mut windows = Vec::new();
        engine
            .forecast_with_observer(&seed, 2, |_, w| windows.push(w.to_vec()))
            .unwrap();

        let normalized = engine.scaler().to_normalized(&seed).unwrap();
        assert_eq!(&windows[0][..WINDOW_SIZE - 1], &normalized[1..]);
        assert_eq!(&windows[1][..WINDOW_SIZE - 2], &normalized[2..]);
    }

    #[test]
    fn test_invalid_inputs_fail_before_prediction() {
        let (engine, predictor) = engine(0.0);
        assert!(matches!(
            engine.forecast(&[1500.0; 59], 7),
            Err(ForecastError::InvalidWindow { actual: 59, .. })
        ));
        assert!(matches!(
            engine.forecast(&[1500.0; WINDOW_SIZE], 0),
            Err(ForecastError::InvalidHorizon { horizon: 0, .. })
        ));
        assert!(predictor.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_non_finite_output_fails_with_step() {
        let (engine, _) = engine(f64::INFINITY);
        let err = engine.forecast(&[1500.0; WINDOW_SIZE], 5).unwrap_err();
        assert_eq!(
            err,
            ForecastError::PredictionFailed {
                step: 0,
                source: PredictorError::NonFinite(f64::INFINITY),
            }
        );
    }

    #[test]
    fn test_non_invertible_scaler_fails_instead_of_nan() {
        use crate::application::ml::NaivePredictor;
        use crate::domain::ml::ScalerParams;

        let scaler = ValueScaler::new(ScalerParams::MinMax {
            data_min: 1000.0,
            data_max: 2000.0,
            feature_range: (0.5, 0.5),
        });
        let engine = ForecastEngine::new(Arc::new(NaivePredictor), scaler);

        let err = engine.forecast(&[1500.0; WINDOW_SIZE], 2).unwrap_err();
        assert!(matches!(
            err,
            ForecastError::PredictionFailed {
                step: 0,
                source: PredictorError::NonFinite(_),
            }
        ));
    }

    #[test]
    fn test_accepts_window() {
        use crate::domain::forecast::Window;

        let (engine, _) = engine(0.0);
        let window = Window::new(vec![1500.0; WINDOW_SIZE]).unwrap();
        let out = engine.forecast(&window, 2).unwrap();
        assert!(out.iter().all(|p| (p - 1500.0).abs() < 1e-6));
    }

    #[test]
    fn test_unfitted_scaler_is_reported() {
        let predictor = Arc::new(DriftPredictor {
            drift: 0.0,
            seen: Mutex::new(Vec::new()),
        });
        let engine = ForecastEngine::new(predictor, ValueScaler::unfitted());
        assert_eq!(
            engine.forecast(&[1500.0; WINDOW_SIZE], 1),
            Err(ForecastError::ScalerNotFitted)
        );
    }
}
