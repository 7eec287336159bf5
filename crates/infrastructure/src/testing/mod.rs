//! Testing utilities for infrastructure integration tests.
//!
//! Wraps testcontainers so cache tests can run against a real Redis server.
//! Tests using it are `#[ignore]`d by default since they need Docker.
//!
//! # Example
//!
//! ```ignore
//! use crate::{cache::RedisCache, testing::RedisContainer};
//!
//! #[tokio::test]
//! #[ignore = "requires Docker"]
//! async fn test_with_redis() {
//!     let redis = RedisContainer::start().await.unwrap();
//!     let cache = RedisCache::new(redis.cache_config()).unwrap();
//!     // Container is removed when dropped
//! }
//! ```

mod containers;

pub use containers::{ContainerError, RedisContainer, RedisContainerConfig};
