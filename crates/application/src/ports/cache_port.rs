//! Cache port definition
//!
//! Defines the key-value interface behind the avatar cache.
//! Implementations may use an in-process cache (Moka) or a shared
//! network store (Redis).

use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Byte-oriented key-value store with per-entry expiry
///
/// Every backend error surfaces as [`ApplicationError::Cache`]; callers
/// treat it as a miss.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CachePort: Send + Sync + std::fmt::Debug {
    /// Stored bytes, `None` when absent or expired
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, ApplicationError>;

    /// Store `value` for `ttl`, replacing any previous value and expiry
    async fn set_bytes(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl: Duration,
    ) -> Result<(), ApplicationError>;

    /// Remove one key
    async fn invalidate(&self, key: &str) -> Result<(), ApplicationError>;

    /// Whether a live entry exists for `key`
    async fn exists(&self, key: &str) -> Result<bool, ApplicationError>;

    /// Counters since construction
    fn stats(&self) -> CacheStats;
}

/// JSON-encoded values on top of [`CachePort`]
#[async_trait]
pub trait CachePortExt: CachePort {
    /// Decode a stored JSON value
    async fn get<T>(&self, key: &str) -> Result<Option<T>, ApplicationError>
    where
        T: serde::de::DeserializeOwned + Send,
    {
        match self.get_bytes(key).await? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes).map_err(|e| {
                    ApplicationError::Internal(format!("Cache deserialization error: {e}"))
                })?;
                Ok(Some(value))
            },
            None => Ok(None),
        }
    }

    /// Encode `value` as JSON and store it
    async fn set<T>(&self, key: &str, value: &T, ttl: Duration) -> Result<(), ApplicationError>
    where
        T: serde::Serialize + Send + Sync,
    {
        let bytes = serde_json::to_vec(value)
            .map_err(|e| ApplicationError::Internal(format!("Cache serialization error: {e}")))?;
        self.set_bytes(key, bytes, ttl).await
    }
}

impl<T: CachePort + ?Sized> CachePortExt for T {}

/// Lookup counters of a cache backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Current number of entries (0 when the backend cannot tell)
    pub entries: u64,
}

/// Standard TTL values for cached directory data
pub mod ttl {
    use std::time::Duration;

    /// Avatar descriptors resolved from the directory (10 minutes)
    pub const AVATAR: Duration = Duration::from_secs(600);
}
