//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: the CRM directory
//! adapter, cache backends (Redis, Moka, disabled), configuration loading,
//! logging setup, and the runtime that wires them together.

pub mod adapters;
pub mod cache;
pub mod config;
pub mod runtime;
pub mod telemetry;
#[cfg(test)]
pub mod testing;

pub use adapters::*;
pub use cache::{DisabledCache, MokaCache, RedisCache, RedisCacheConfig};
pub use config::{AppConfig, CacheBackend, ConfigError, Environment};
pub use runtime::SyncRuntime;
pub use telemetry::{LogFormat, TelemetryConfig, init_telemetry};
