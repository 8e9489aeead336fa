// Model context loaded at startup
pub mod bootstrap;

// Rollout engine and request-level service
pub mod forecasting;

// Step predictors
pub mod ml;
