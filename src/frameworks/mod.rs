// Frameworks layer: runtime configuration and observability bootstrap.

pub mod config;
pub mod telemetry;
