//! Redis cache implementation
//!
//! Shared network cache used by multi-process deployments. Values are stored
//! with `SET key value EX secs`. The connection is opened lazily on first use.
//! A failed connect, or a command that fails because the socket is gone, leaves
//! no connection behind, so the next call dials again.

use std::{
    future::Future,
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use application::{
    error::ApplicationError,
    ports::{CachePort, CacheStats},
};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, RedisError, RedisResult, aio::MultiplexedConnection};
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

/// Default Redis port
pub const DEFAULT_REDIS_PORT: u16 = 6379;

/// Connection settings for [`RedisCache`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedisCacheConfig {
    /// Host name or address
    pub host: String,
    /// TCP port
    pub port: u16,
    /// Upper bound for establishing the connection
    pub connect_timeout: Duration,
}

impl RedisCacheConfig {
    /// Settings for `host:port` with a one second connect timeout
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            connect_timeout: Duration::from_secs(1),
        }
    }

    /// Connection URL
    #[must_use]
    pub fn url(&self) -> String {
        format!("redis://{}:{}/", self.host, self.port)
    }
}

/// Redis-backed cache
///
/// Every backend error is returned as [`ApplicationError::Cache`]; callers
/// decide whether that is fatal.
pub struct RedisCache {
    client: Client,
    config: RedisCacheConfig,
    connection: Mutex<Option<MultiplexedConnection>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl std::fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCache")
            .field("url", &self.config.url())
            .field(
                "connected",
                &self.connection.try_lock().is_ok_and(|conn| conn.is_some()),
            )
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .field("misses", &self.misses.load(Ordering::Relaxed))
            .finish()
    }
}

fn cache_error(action: &str, e: &RedisError) -> ApplicationError {
    ApplicationError::Cache(format!("redis {action} failed: {e}"))
}

impl RedisCache {
    /// Create a cache for the given server
    ///
    /// No connection is made until the first command.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Configuration`] if the host does not form
    /// a valid Redis URL.
    pub fn new(config: RedisCacheConfig) -> Result<Self, ApplicationError> {
        let client = Client::open(config.url())
            .map_err(|e| ApplicationError::Configuration(format!("invalid redis url: {e}")))?;

        Ok(Self {
            client,
            config,
            connection: Mutex::new(None),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        })
    }

    /// Connection settings
    #[must_use]
    pub const fn config(&self) -> &RedisCacheConfig {
        &self.config
    }

    async fn connection(&self) -> Result<MultiplexedConnection, ApplicationError> {
        let mut slot = self.connection.lock().await;
        if let Some(conn) = slot.as_ref() {
            return Ok(conn.clone());
        }

        debug!(url = %self.config.url(), "Connecting to redis");
        let conn = tokio::time::timeout(
            self.config.connect_timeout,
            self.client.get_multiplexed_async_connection(),
        )
        .await
        .map_err(|_| {
            ApplicationError::Cache(format!(
                "redis connect timed out after {}ms",
                self.config.connect_timeout.as_millis()
            ))
        })?
        .map_err(|e| cache_error("connect", &e))?;

        *slot = Some(conn.clone());
        Ok(conn)
    }

    /// Run one command, forgetting the connection if the socket failed
    async fn run<T, F, Fut>(&self, action: &str, command: F) -> Result<T, ApplicationError>
    where
        F: FnOnce(MultiplexedConnection) -> Fut,
        Fut: Future<Output = RedisResult<T>>,
    {
        let conn = self.connection().await?;
        match command(conn).await {
            Ok(value) => Ok(value),
            Err(e) => {
                if e.is_io_error() || e.is_connection_dropped() || e.is_connection_refusal() {
                    warn!(error = %e, "Redis connection lost, reconnecting on next call");
                    self.connection.lock().await.take();
                }
                Err(cache_error(action, &e))
            },
        }
    }

    fn record(&self, hit: bool) {
        let (counter, result) = if hit {
            (&self.hits, "hit")
        } else {
            (&self.misses, "miss")
        };
        counter.fetch_add(1, Ordering::Relaxed);
        metrics::counter!("avatar_cache_requests_total", "backend" => "redis", "result" => result)
            .increment(1);
    }

    fn record_error() {
        metrics::counter!("avatar_cache_requests_total", "backend" => "redis", "result" => "error")
            .increment(1);
    }
}

#[async_trait]
impl CachePort for RedisCache {
    #[instrument(skip(self), level = "debug")]
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, ApplicationError> {
        let result = self
            .run("GET", |mut conn| async move {
                conn.get::<_, Option<Vec<u8>>>(key).await
            })
            .await;

        match result {
            Ok(found) => {
                self.record(found.is_some());
                debug!(key = %key, hit = found.is_some(), "Cache lookup");
                Ok(found)
            },
            Err(e) => {
                Self::record_error();
                warn!(key = %key, error = %e, "Redis read failed");
                Err(e)
            },
        }
    }

    #[instrument(skip(self, value), level = "debug")]
    async fn set_bytes(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl: Duration,
    ) -> Result<(), ApplicationError> {
        // EX 0 is rejected by the server
        let seconds = ttl.as_secs().max(1);
        self.run("SET", |mut conn| async move {
            conn.set_ex::<_, _, ()>(key, value, seconds).await
        })
        .await?;
        debug!(key = %key, ttl_secs = seconds, "Cache set");
        Ok(())
    }

    #[instrument(skip(self), level = "debug")]
    async fn invalidate(&self, key: &str) -> Result<(), ApplicationError> {
        self.run("DEL", |mut conn| async move { conn.del::<_, ()>(key).await })
            .await?;
        debug!(key = %key, "Cache invalidated");
        Ok(())
    }

    #[instrument(skip(self), level = "debug")]
    async fn exists(&self, key: &str) -> Result<bool, ApplicationError> {
        self.run("EXISTS", |mut conn| async move {
            conn.exists::<_, bool>(key).await
        })
        .await
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: 0,
        }
    }
}
