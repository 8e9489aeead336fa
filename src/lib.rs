//! Gold price forecasting service.
//!
//! An autoregressive rollout over a single-step sequence model, plus a
//! deterministic macro scenario adjustment layer.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

#[cfg(test)]
mod config_tests;
