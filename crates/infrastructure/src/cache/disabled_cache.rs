//! Cache backend that stores nothing
//!
//! Selected with `cache.backend = "disabled"` or when no Redis host is
//! configured. Every lookup misses, so avatars always come from the directory.

use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use application::{
    error::ApplicationError,
    ports::{CachePort, CacheStats},
};
use async_trait::async_trait;

/// Always-miss cache
#[derive(Debug, Default)]
pub struct DisabledCache {
    misses: AtomicU64,
}

impl DisabledCache {
    /// Create a disabled cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CachePort for DisabledCache {
    async fn get_bytes(&self, _key: &str) -> Result<Option<Vec<u8>>, ApplicationError> {
        self.misses.fetch_add(1, Ordering::Relaxed);
        Ok(None)
    }

    async fn set_bytes(
        &self,
        _key: &str,
        _value: Vec<u8>,
        _ttl: Duration,
    ) -> Result<(), ApplicationError> {
        Ok(())
    }

    async fn invalidate(&self, _key: &str) -> Result<(), ApplicationError> {
        Ok(())
    }

    async fn exists(&self, _key: &str) -> Result<bool, ApplicationError> {
        Ok(false)
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            misses: self.misses.load(Ordering::Relaxed),
            ..CacheStats::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stored_values_are_never_returned() {
        let cache = DisabledCache::new();
        cache
            .set_bytes("k", b"v".to_vec(), Duration::from_secs(60))
            .await
            .unwrap();

        assert!(cache.get_bytes("k").await.unwrap().is_none());
        assert!(!cache.exists("k").await.unwrap());
        assert_eq!(cache.stats().misses, 1);
        assert_eq!(cache.stats().hits, 0);
    }
}
