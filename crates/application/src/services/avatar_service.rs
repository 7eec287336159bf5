//! Avatar resolution with a time-bounded cache in front of the directory

use std::{sync::Arc, time::Duration};

use domain::{AvatarDescriptor, EmailAddress, StoreNumber};
use tracing::{debug, instrument, warn};

use crate::outcome::{IntegrationFailure, IntegrationOutcome};
use crate::ports::{CachePort, CachePortExt, DirectoryPort, ttl};

/// Namespace used in avatar cache keys unless configured otherwise
pub const DEFAULT_AVATAR_NAMESPACE: &str = "nc";

/// Avatar descriptors keyed by email address
///
/// Keys have the form `avatar::<namespace>::<email>`. Entries are advisory: a
/// backend error is logged and reported as a miss.
#[derive(Debug, Clone)]
pub struct AvatarCache {
    cache: Arc<dyn CachePort>,
    namespace: String,
}

impl AvatarCache {
    /// Create an avatar cache on top of a key-value backend
    #[must_use]
    pub fn new(cache: Arc<dyn CachePort>, namespace: impl Into<String>) -> Self {
        Self {
            cache,
            namespace: namespace.into(),
        }
    }

    /// Cache key for `email`
    #[must_use]
    pub fn key(&self, email: &EmailAddress) -> String {
        format!("avatar::{}::{}", self.namespace, email.as_str())
    }

    /// Look up a cached descriptor
    pub async fn get(&self, email: &EmailAddress) -> IntegrationOutcome<Option<AvatarDescriptor>> {
        let key = self.key(email);
        match self.cache.get::<AvatarDescriptor>(&key).await {
            Ok(cached) => IntegrationOutcome::success(cached),
            Err(e) => {
                warn!(key = %key, error = %e, "Avatar cache read failed");
                IntegrationOutcome::failed(IntegrationFailure::CacheUnavailable(e.to_string()))
            },
        }
    }

    /// Store a descriptor for `ttl`
    pub async fn put(
        &self,
        email: &EmailAddress,
        descriptor: &AvatarDescriptor,
        ttl: Duration,
    ) -> IntegrationOutcome<()> {
        let key = self.key(email);
        match self.cache.set(&key, descriptor, ttl).await {
            Ok(()) => IntegrationOutcome::success(()),
            Err(e) => {
                warn!(key = %key, error = %e, "Avatar cache write failed");
                IntegrationOutcome::failed(IntegrationFailure::CacheUnavailable(e.to_string()))
            },
        }
    }
}

/// Resolves avatars through the cache, falling back to the directory
pub struct AvatarService {
    directory: Arc<dyn DirectoryPort>,
    cache: AvatarCache,
    ttl: Duration,
}

impl std::fmt::Debug for AvatarService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AvatarService")
            .field("cache", &self.cache)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl AvatarService {
    /// Create an avatar service with the standard entry lifetime
    #[must_use]
    pub fn new(directory: Arc<dyn DirectoryPort>, cache: AvatarCache) -> Self {
        Self {
            directory,
            cache,
            ttl: ttl::AVATAR,
        }
    }

    /// Override the cache entry lifetime
    #[must_use]
    pub const fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Resolve the avatar for `email`
    ///
    /// Cache hits skip the directory. Directory hits are cached; misses and
    /// failures are not, so the next call asks the directory again. A directory
    /// hit that could not be read from or written to the cache is returned
    /// degraded with [`IntegrationFailure::CacheUnavailable`].
    #[instrument(skip(self), fields(store = %store, email = %email))]
    pub async fn resolve_avatar(
        &self,
        store: &StoreNumber,
        email: &EmailAddress,
    ) -> IntegrationOutcome<Option<AvatarDescriptor>> {
        let (cached, cache_failure) = self.cache.get(email).await.into_parts();
        if let Some(descriptor) = cached {
            debug!("Avatar cache hit");
            return IntegrationOutcome::success(Some(descriptor));
        }

        let lookup = self.directory.resolve_avatar(store, email).await;
        let Some(descriptor) = lookup.value() else {
            debug!("No avatar in directory");
            return lookup;
        };

        // a store that failed the read is not written to
        let cache_failure = match cache_failure {
            Some(failure) => Some(failure),
            None => self.cache.put(email, descriptor, self.ttl).await.into_parts().1,
        };
        match cache_failure {
            Some(failure) if lookup.is_success() => {
                IntegrationOutcome::degraded(lookup.into_value(), failure)
            },
            _ => lookup,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApplicationError;
    use crate::ports::{MockCachePort, MockDirectoryPort};

    fn store() -> StoreNumber {
        StoreNumber::new("1042").unwrap()
    }

    fn jane() -> EmailAddress {
        EmailAddress::new("Jane@Example.com").unwrap()
    }

    fn face() -> AvatarDescriptor {
        AvatarDescriptor::external_jpeg("https://img.example.com/face/42.jpg")
    }

    fn service(directory: MockDirectoryPort, cache: MockCachePort) -> AvatarService {
        AvatarService::new(
            Arc::new(directory),
            AvatarCache::new(Arc::new(cache), DEFAULT_AVATAR_NAMESPACE),
        )
    }

    #[test]
    fn key_uses_namespace_and_lowercased_email() {
        let cache = AvatarCache::new(Arc::new(MockCachePort::new()), "nc");
        assert_eq!(cache.key(&jane()), "avatar::nc::jane@example.com");
    }

    #[tokio::test]
    async fn cache_hit_skips_directory() {
        let mut cache = MockCachePort::new();
        cache
            .expect_get_bytes()
            .withf(|key| key == "avatar::nc::jane@example.com")
            .returning(|_| Ok(Some(serde_json::to_vec(&face()).unwrap())));
        cache.expect_set_bytes().times(0);
        let mut directory = MockDirectoryPort::new();
        directory.expect_resolve_avatar().times(0);

        let outcome = service(directory, cache).resolve_avatar(&store(), &jane()).await;
        assert!(outcome.is_success());
        assert_eq!(outcome.into_value(), Some(face()));
    }

    #[tokio::test]
    async fn directory_hit_is_cached_for_ten_minutes() {
        let mut cache = MockCachePort::new();
        cache.expect_get_bytes().returning(|_| Ok(None));
        cache
            .expect_set_bytes()
            .withf(|key, value, ttl| {
                key == "avatar::nc::jane@example.com"
                    && serde_json::from_slice::<AvatarDescriptor>(value).ok() == Some(face())
                    && ttl.as_secs() == 600
            })
            .times(1)
            .returning(|_, _, _| Ok(()));
        let mut directory = MockDirectoryPort::new();
        directory
            .expect_resolve_avatar()
            .times(1)
            .returning(|_, _| IntegrationOutcome::success(Some(face())));

        let outcome = service(directory, cache).resolve_avatar(&store(), &jane()).await;
        assert_eq!(outcome.into_value(), Some(face()));
    }

    #[tokio::test]
    async fn negative_result_is_not_cached() {
        let mut cache = MockCachePort::new();
        cache.expect_get_bytes().returning(|_| Ok(None));
        cache.expect_set_bytes().times(0);
        let mut directory = MockDirectoryPort::new();
        directory
            .expect_resolve_avatar()
            .returning(|_, _| IntegrationOutcome::success(None));

        let outcome = service(directory, cache).resolve_avatar(&store(), &jane()).await;
        assert!(outcome.into_value().is_none());
    }

    #[tokio::test]
    async fn unreachable_cache_falls_back_to_directory() {
        let mut cache = MockCachePort::new();
        cache
            .expect_get_bytes()
            .returning(|_| Err(ApplicationError::Cache("connection refused".into())));
        cache.expect_set_bytes().times(0);
        let mut directory = MockDirectoryPort::new();
        directory
            .expect_resolve_avatar()
            .times(1)
            .returning(|_, _| IntegrationOutcome::success(Some(face())));

        let outcome = service(directory, cache).resolve_avatar(&store(), &jane()).await;
        assert!(matches!(
            outcome.failure(),
            Some(IntegrationFailure::CacheUnavailable(_))
        ));
        assert_eq!(outcome.into_value(), Some(face()));
    }

    #[tokio::test]
    async fn failed_cache_write_degrades_directory_hit() {
        let mut cache = MockCachePort::new();
        cache.expect_get_bytes().returning(|_| Ok(None));
        cache
            .expect_set_bytes()
            .times(1)
            .returning(|_, _, _| Err(ApplicationError::Cache("read only replica".into())));
        let mut directory = MockDirectoryPort::new();
        directory
            .expect_resolve_avatar()
            .returning(|_, _| IntegrationOutcome::success(Some(face())));

        let outcome = service(directory, cache).resolve_avatar(&store(), &jane()).await;
        assert!(!outcome.is_success());
        assert_eq!(
            outcome.failure(),
            Some(&IntegrationFailure::CacheUnavailable(
                "Cache error: read only replica".into()
            ))
        );
        assert_eq!(outcome.into_value(), Some(face()));
    }

    #[tokio::test]
    async fn directory_failure_is_reported() {
        let mut cache = MockCachePort::new();
        cache.expect_get_bytes().returning(|_| Ok(None));
        let mut directory = MockDirectoryPort::new();
        directory.expect_resolve_avatar().returning(|_, _| {
            IntegrationOutcome::failed(IntegrationFailure::DirectoryUnavailable("HTTP 500".into()))
        });

        let outcome = service(directory, cache).resolve_avatar(&store(), &jane()).await;
        assert!(outcome.value().is_none());
        assert!(matches!(
            outcome.failure(),
            Some(IntegrationFailure::DirectoryUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn failed_put_is_tagged() {
        let mut cache = MockCachePort::new();
        cache
            .expect_set_bytes()
            .returning(|_, _, _| Err(ApplicationError::Cache("timeout".into())));
        let avatars = AvatarCache::new(Arc::new(cache), "nc");

        let outcome = avatars.put(&jane(), &face(), ttl::AVATAR).await;
        assert_eq!(
            outcome.failure(),
            Some(&IntegrationFailure::CacheUnavailable("Cache error: timeout".into()))
        );
    }
}
