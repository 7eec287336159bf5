//! Cache implementations
//!
//! Backends for the application's [`CachePort`](application::ports::CachePort):
//! - `RedisCache`: shared network store, the production default
//! - `MokaCache`: in-process cache with per-entry TTL
//! - `DisabledCache`: stores nothing

mod disabled_cache;
mod moka_cache;
mod redis_cache;

pub use disabled_cache::DisabledCache;
pub use moka_cache::{MokaCache, MokaCacheConfig};
pub use redis_cache::{DEFAULT_REDIS_PORT, RedisCache, RedisCacheConfig};
