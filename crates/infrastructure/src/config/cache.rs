//! Avatar cache configuration.

use std::{fmt, time::Duration};

use application::DEFAULT_AVATAR_NAMESPACE;
use serde::{Deserialize, Serialize};

use crate::cache::DEFAULT_REDIS_PORT;

/// Which key-value store backs the avatar cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// Shared Redis server
    #[default]
    Redis,
    /// In-process Moka cache
    Memory,
    /// No caching
    Disabled,
}

impl fmt::Display for CacheBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Redis => write!(f, "redis"),
            Self::Memory => write!(f, "memory"),
            Self::Disabled => write!(f, "disabled"),
        }
    }
}

/// Cache configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Backend selection (default: redis)
    #[serde(default)]
    pub backend: CacheBackend,

    /// Redis host; the redis backend is disabled when empty
    #[serde(default)]
    pub host: String,

    /// Redis port (default: 6379)
    #[serde(default = "default_cache_port")]
    pub port: u16,

    /// Namespace segment of avatar cache keys (default: nc)
    #[serde(default = "default_avatar_namespace")]
    pub avatar_namespace: String,

    /// Avatar entry lifetime in seconds (default: 10 minutes)
    #[serde(default = "default_avatar_ttl")]
    pub avatar_ttl_secs: u64,

    /// Redis connect timeout in milliseconds (default: 1000)
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_ms: u64,

    /// Maximum entries of the in-memory backend
    #[serde(default = "default_max_entries")]
    pub max_entries: u64,
}

const fn default_cache_port() -> u16 {
    DEFAULT_REDIS_PORT
}

fn default_avatar_namespace() -> String {
    DEFAULT_AVATAR_NAMESPACE.to_string()
}

const fn default_avatar_ttl() -> u64 {
    10 * 60 // 10 minutes
}

const fn default_connect_timeout() -> u64 {
    1000
}

const fn default_max_entries() -> u64 {
    10_000
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::default(),
            host: String::new(),
            port: default_cache_port(),
            avatar_namespace: default_avatar_namespace(),
            avatar_ttl_secs: default_avatar_ttl(),
            connect_timeout_ms: default_connect_timeout(),
            max_entries: default_max_entries(),
        }
    }
}

impl CacheConfig {
    /// Backend actually used: redis without a host falls back to disabled
    #[must_use]
    pub fn effective_backend(&self) -> CacheBackend {
        match self.backend {
            CacheBackend::Redis if self.host.trim().is_empty() => CacheBackend::Disabled,
            backend => backend,
        }
    }

    /// Avatar entry lifetime
    #[must_use]
    pub const fn avatar_ttl(&self) -> Duration {
        Duration::from_secs(self.avatar_ttl_secs)
    }

    /// Redis connect timeout
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = CacheConfig::default();
        assert_eq!(config.backend, CacheBackend::Redis);
        assert_eq!(config.port, 6379);
        assert_eq!(config.avatar_namespace, "nc");
        assert_eq!(config.avatar_ttl(), Duration::from_secs(600));
        assert_eq!(config.connect_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn redis_without_host_is_disabled() {
        let config = CacheConfig::default();
        assert_eq!(config.effective_backend(), CacheBackend::Disabled);

        let config = CacheConfig {
            host: "cache.internal".to_string(),
            ..CacheConfig::default()
        };
        assert_eq!(config.effective_backend(), CacheBackend::Redis);
    }

    #[test]
    fn memory_backend_needs_no_host() {
        let config: CacheConfig = serde_json::from_str(r#"{"backend":"memory"}"#).unwrap();
        assert_eq!(config.effective_backend(), CacheBackend::Memory);
    }

    #[test]
    fn backend_display_matches_serde() {
        for backend in [CacheBackend::Redis, CacheBackend::Memory, CacheBackend::Disabled] {
            let json = serde_json::to_string(&backend).unwrap();
            assert_eq!(json, format!("\"{backend}\""));
        }
    }
}
