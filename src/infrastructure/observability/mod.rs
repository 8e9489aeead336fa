//! Service observability
//!
//! Prometheus metrics exposed as text on `/api/metrics`, plus structured
//! `tracing` logs configured by the binaries.

pub mod metrics;

pub use metrics::Metrics;
