//! Redis container for cache round-trip tests

use testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner};
use testcontainers_modules::redis::Redis;
use tracing::{debug, info};

use crate::cache::{DEFAULT_REDIS_PORT, RedisCacheConfig};

/// Configuration for Redis container
#[derive(Debug, Clone)]
pub struct RedisContainerConfig {
    /// Redis version tag (e.g., "7-alpine")
    pub version: String,
}

impl Default for RedisContainerConfig {
    fn default() -> Self {
        Self {
            version: "7-alpine".to_string(),
        }
    }
}

/// Redis container wrapper for integration tests.
#[derive(Debug)]
pub struct RedisContainer {
    _container: ContainerAsync<Redis>,
    host: String,
    port: u16,
}

impl RedisContainer {
    /// Start a new Redis container with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the container fails to start.
    pub async fn start() -> Result<Self, ContainerError> {
        Self::start_with_config(RedisContainerConfig::default()).await
    }

    /// Start a new Redis container with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the container fails to start.
    pub async fn start_with_config(config: RedisContainerConfig) -> Result<Self, ContainerError> {
        info!(version = %config.version, "Starting Redis container");

        let container = Redis::default()
            .with_tag(&config.version)
            .start()
            .await
            .map_err(|e| ContainerError::Start(e.to_string()))?;

        let host = container
            .get_host()
            .await
            .map_err(|e| ContainerError::Start(e.to_string()))?
            .to_string();

        let port = container
            .get_host_port_ipv4(DEFAULT_REDIS_PORT)
            .await
            .map_err(|e| ContainerError::Start(e.to_string()))?;

        debug!(host = %host, port = %port, "Redis container started");

        Ok(Self {
            _container: container,
            host,
            port,
        })
    }

    /// Cache settings pointing at this container
    pub fn cache_config(&self) -> RedisCacheConfig {
        RedisCacheConfig::new(self.host.as_str(), self.port)
    }
}

/// Errors that can occur when working with containers
#[derive(Debug, thiserror::Error)]
pub enum ContainerError {
    /// Container failed to start
    #[error("Container failed to start: {0}")]
    Start(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redis_config_default() {
        let config = RedisContainerConfig::default();
        assert_eq!(config.version, "7-alpine");
    }

    #[test]
    fn container_error_display() {
        let error = ContainerError::Start("test error".to_string());
        assert!(error.to_string().contains("test error"));
    }
}
