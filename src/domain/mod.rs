// Forecast window and horizon rules
pub mod forecast;

// Value scaling for the sequence model
pub mod ml;

// Scenario adjustment layer
pub mod scenario;

// Domain-specific error types
pub mod errors;
