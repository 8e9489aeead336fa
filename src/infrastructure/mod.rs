pub mod artifacts;
pub mod http;
pub mod observability;
