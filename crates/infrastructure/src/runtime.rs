//! Wiring of adapters and services from configuration
//!
//! One [`SyncRuntime`] is built per process. It owns the shared HTTP client
//! and cache connection; the store number travels with each call.

use std::sync::Arc;

use application::{
    AvatarCache, AvatarService, CachePort, DirectoryPort, DirectorySyncService,
    RecipientSuggestionService,
};
use integration_crm::CrmClient;
use tracing::{info, warn};

use crate::{
    adapters::CrmDirectoryAdapter,
    cache::{DisabledCache, MokaCache, MokaCacheConfig, RedisCache, RedisCacheConfig},
    config::{AppConfig, CacheBackend, CacheConfig, ConfigError},
};

/// Services ready to handle mail events
pub struct SyncRuntime {
    directory: Arc<dyn DirectoryPort>,
    sync: DirectorySyncService,
    avatars: AvatarService,
    suggestions: RecipientSuggestionService,
    cache: Arc<dyn CachePort>,
    cache_backend: CacheBackend,
}

impl std::fmt::Debug for SyncRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncRuntime")
            .field("sync", &self.sync)
            .field("avatars", &self.avatars)
            .field("cache_backend", &self.cache_backend)
            .finish_non_exhaustive()
    }
}

impl SyncRuntime {
    /// Validate `config` and build every adapter and service
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the configuration is incomplete or
    /// the CRM client cannot be constructed. An unreachable cache is not an
    /// error; it degrades to misses at call time.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let adapter = CrmDirectoryAdapter::new(config.crm.to_client_config())
            .map_err(|e| ConfigError::Invalid(vec![e.to_string()]))?;
        let (cache, cache_backend) = build_cache(&config.cache)?;

        info!(
            endpoint = %config.crm.endpoint,
            cache = %cache_backend,
            strategy = %config.sync.match_strategy,
            "Directory sync runtime ready"
        );
        Ok(Self::assemble(Arc::new(adapter), cache, cache_backend, config))
    }

    /// Build the services over an existing CRM client and cache
    #[must_use]
    pub fn with_clients(
        crm: Arc<dyn CrmClient>,
        cache: Arc<dyn CachePort>,
        config: &AppConfig,
    ) -> Self {
        let adapter = Arc::new(CrmDirectoryAdapter::with_client(crm));
        Self::assemble(adapter, cache, config.cache.effective_backend(), config)
    }

    fn assemble(
        adapter: Arc<CrmDirectoryAdapter>,
        cache: Arc<dyn CachePort>,
        cache_backend: CacheBackend,
        config: &AppConfig,
    ) -> Self {
        let sync = DirectorySyncService::new(
            adapter.clone(),
            adapter.clone(),
            config.sync.to_sync_config(),
        );
        let avatars = AvatarService::new(
            adapter.clone(),
            AvatarCache::new(cache.clone(), config.cache.avatar_namespace.clone()),
        )
        .with_ttl(config.cache.avatar_ttl());
        let suggestions = RecipientSuggestionService::new(adapter.clone());

        Self {
            directory: adapter,
            sync,
            avatars,
            suggestions,
            cache,
            cache_backend,
        }
    }

    /// Direct directory access, bypassing the services
    #[must_use]
    pub fn directory(&self) -> Arc<dyn DirectoryPort> {
        self.directory.clone()
    }

    /// Mail event handling
    #[must_use]
    pub const fn sync(&self) -> &DirectorySyncService {
        &self.sync
    }

    /// Cached avatar resolution
    #[must_use]
    pub const fn avatars(&self) -> &AvatarService {
        &self.avatars
    }

    /// Recipient autocomplete
    #[must_use]
    pub const fn suggestions(&self) -> &RecipientSuggestionService {
        &self.suggestions
    }

    /// Replace the suggestion service, e.g. to register more recipient sources
    #[must_use]
    pub fn with_suggestions(mut self, suggestions: RecipientSuggestionService) -> Self {
        self.suggestions = suggestions;
        self
    }

    /// Shared cache backend
    #[must_use]
    pub fn cache(&self) -> Arc<dyn CachePort> {
        self.cache.clone()
    }

    /// Backend in use
    #[must_use]
    pub const fn cache_backend(&self) -> CacheBackend {
        self.cache_backend
    }
}

/// Select and construct the cache backend
fn build_cache(config: &CacheConfig) -> Result<(Arc<dyn CachePort>, CacheBackend), ConfigError> {
    let backend = config.effective_backend();
    if backend != config.backend {
        warn!("No cache host configured, avatar cache disabled");
    }

    let cache: Arc<dyn CachePort> = match backend {
        CacheBackend::Redis => {
            let redis = RedisCache::new(RedisCacheConfig {
                connect_timeout: config.connect_timeout(),
                ..RedisCacheConfig::new(config.host.trim(), config.port)
            })
            .map_err(|e| ConfigError::Invalid(vec![e.to_string()]))?;
            Arc::new(redis)
        },
        CacheBackend::Memory => Arc::new(MokaCache::with_config(MokaCacheConfig {
            max_entries: config.max_entries,
        })),
        CacheBackend::Disabled => Arc::new(DisabledCache::new()),
    };
    Ok((cache, backend))
}
