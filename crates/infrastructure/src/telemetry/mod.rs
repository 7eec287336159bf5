//! Logging setup
//!
//! Installs the global `tracing` subscriber. Metrics are emitted through the
//! `metrics` facade; installing a recorder is left to the host process.

mod subscriber;

pub use subscriber::{LogFormat, TelemetryConfig, TelemetryError, init_telemetry};
