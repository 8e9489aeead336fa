//! Prometheus metrics definitions for the forecast service
//!
//! All metrics use the `gold_forecast_` prefix.

use prometheus::{
    CounterVec, Gauge, Histogram, HistogramOpts, Opts, Registry, TextEncoder,
    core::{AtomicF64, GenericGauge},
};
use std::sync::Arc;

/// Prometheus metrics for the forecast service
#[derive(Clone)]
pub struct Metrics {
    registry: Arc<Registry>,
    /// Requests by endpoint and outcome
    pub requests_total: CounterVec,
    /// Wall time of one autoregressive rollout
    pub rollout_seconds: Histogram,
    /// 1 when every artifact is loaded
    pub model_ready: GenericGauge<AtomicF64>,
}

impl Metrics {
    /// Create a new Metrics instance with all metrics registered
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let requests_total = CounterVec::new(
            Opts::new("gold_forecast_requests_total", "Forecast API requests"),
            &["endpoint", "outcome"],
        )?;
        registry.register(Box::new(requests_total.clone()))?;

        let rollout_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "gold_forecast_rollout_seconds",
                "Autoregressive rollout duration in seconds",
            )
            .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5]),
        )?;
        registry.register(Box::new(rollout_seconds.clone()))?;

        let model_ready = Gauge::with_opts(Opts::new(
            "gold_forecast_model_ready",
            "Whether the model artifact bundle is loaded (0/1)",
        ))?;
        registry.register(Box::new(model_ready.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            requests_total,
            rollout_seconds,
            model_ready,
        })
    }

    /// Render all metrics in Prometheus text format
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        encoder
            .encode_to_string(&metric_families)
            .unwrap_or_default()
    }

    /// Increment request counter
    pub fn inc_requests(&self, endpoint: &str, outcome: &str) {
        self.requests_total
            .with_label_values(&[endpoint, outcome])
            .inc();
    }
}
