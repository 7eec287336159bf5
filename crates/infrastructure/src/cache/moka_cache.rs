//! In-process avatar cache backed by `moka`
//!
//! Process-local cache with per-entry TTL. Used when no shared store is
//! configured and as the fast backend in tests.

use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::{Duration, Instant},
};

use application::{
    error::ApplicationError,
    ports::{CachePort, CacheStats},
};
use async_trait::async_trait;
use moka::{Expiry, future::Cache};
use tracing::{debug, instrument};

/// Default maximum number of entries
const DEFAULT_MAX_ENTRIES: u64 = 10_000;

/// Sizing for [`MokaCache`]
#[derive(Debug, Clone, Copy)]
pub struct MokaCacheConfig {
    /// Maximum number of entries before eviction
    pub max_entries: u64,
}

impl Default for MokaCacheConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

/// Stored value together with the TTL it was written with
#[derive(Debug, Clone)]
struct Entry {
    bytes: Vec<u8>,
    ttl: Duration,
}

/// Expires each entry after the TTL given on `set_bytes`
struct PerEntryTtl;

impl Expiry<String, Entry> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &Entry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &Entry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Bounded in-memory cache
///
/// Unlike a cache-wide TTL, every entry lives for exactly the duration it was
/// stored with, matching `SET key value EX secs` on a network store.
pub struct MokaCache {
    cache: Cache<String, Entry>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl std::fmt::Debug for MokaCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaCache")
            .field("entries", &self.cache.entry_count())
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .field("misses", &self.misses.load(Ordering::Relaxed))
            .finish()
    }
}

impl MokaCache {
    /// Cache holding up to 10 000 entries
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MokaCacheConfig::default())
    }

    /// Cache with explicit sizing
    #[must_use]
    pub fn with_config(config: MokaCacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_entries)
            .expire_after(PerEntryTtl)
            .build();

        Self {
            cache,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    fn record(&self, hit: bool) {
        let (counter, result) = if hit {
            (&self.hits, "hit")
        } else {
            (&self.misses, "miss")
        };
        counter.fetch_add(1, Ordering::Relaxed);
        metrics::counter!("avatar_cache_requests_total", "backend" => "memory", "result" => result)
            .increment(1);
    }
}

impl Default for MokaCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CachePort for MokaCache {
    #[instrument(skip(self), level = "debug")]
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, ApplicationError> {
        let found = self.cache.get(key).await.map(|entry| entry.bytes);
        self.record(found.is_some());
        debug!(key = %key, hit = found.is_some(), "Cache lookup");
        Ok(found)
    }

    #[instrument(skip(self, value), level = "debug")]
    async fn set_bytes(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl: Duration,
    ) -> Result<(), ApplicationError> {
        self.cache
            .insert(key.to_string(), Entry { bytes: value, ttl })
            .await;
        debug!(key = %key, ttl_secs = ttl.as_secs(), "Cache set");
        Ok(())
    }

    #[instrument(skip(self), level = "debug")]
    async fn invalidate(&self, key: &str) -> Result<(), ApplicationError> {
        self.cache.invalidate(key).await;
        debug!(key = %key, "Cache invalidated");
        Ok(())
    }

    #[instrument(skip(self), level = "debug")]
    async fn exists(&self, key: &str) -> Result<bool, ApplicationError> {
        Ok(self.cache.contains_key(key))
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.cache.entry_count(),
        }
    }
}
