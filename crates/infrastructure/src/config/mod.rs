//! Application configuration
//!
//! Split into focused sub-modules:
//! - `crm`: directory endpoint, API key, timeout, time zone
//! - `cache`: avatar cache backend and TTL
//! - `sync`: values written on contact-history entries
//!
//! Sources, later ones winning: built-in defaults, an optional `config.toml`
//! in the working directory, then `DIRSYNC_*` environment variables with `__`
//! between nested keys (e.g. `DIRSYNC_CRM__API_KEY`).

mod cache;
mod crm;
mod sync;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use cache::{CacheBackend, CacheConfig};
pub use crm::CrmAppConfig;
pub use sync::SyncAppConfig;

use crate::telemetry::TelemetryConfig;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "DIRSYNC";

/// Application environment (development or production)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    #[default]
    Development,
    /// Production environment - the avatar cache must be shared
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Errors raised while loading or checking configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// The loaded values are unusable
    #[error("Invalid configuration: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development or production)
    #[serde(default)]
    pub environment: Option<Environment>,

    /// CRM directory connection
    #[serde(default)]
    pub crm: CrmAppConfig,

    /// Avatar cache
    #[serde(default)]
    pub cache: CacheConfig,

    /// Contact-history settings
    #[serde(default)]
    pub sync: SyncAppConfig,

    /// Logging
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (optional) and the environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from the given file (extension optional) and the
    /// environment
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            // Override with environment variables (e.g., DIRSYNC_CACHE__HOST)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Parse configuration from TOML text, without environment overrides
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Effective environment
    #[must_use]
    pub fn environment(&self) -> Environment {
        self.environment.unwrap_or_default()
    }

    /// Check that the configuration can start the pipeline
    ///
    /// Reports every problem found, not just the first.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut problems = Vec::new();

        let endpoint = self.crm.endpoint.trim();
        if endpoint.is_empty() {
            problems.push("crm.endpoint is required".to_string());
        } else if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            problems.push(format!("crm.endpoint must be an http(s) URL, got {endpoint}"));
        }
        if !self.crm.has_api_key() {
            problems.push("crm.api_key is required".to_string());
        }
        if self.crm.timeout_secs == 0 {
            problems.push("crm.timeout_secs must be greater than zero".to_string());
        }
        if self.crm.timezone.parse::<chrono_tz::Tz>().is_err() {
            problems.push(format!("crm.timezone is not a known zone: {}", self.crm.timezone));
        }

        if self.cache.avatar_ttl_secs == 0 {
            problems.push("cache.avatar_ttl_secs must be greater than zero".to_string());
        }
        if self.cache.avatar_namespace.trim().is_empty() {
            problems.push("cache.avatar_namespace must not be empty".to_string());
        }
        if self.environment() == Environment::Production
            && self.cache.effective_backend() != CacheBackend::Redis
        {
            problems.push(format!(
                "production requires the redis cache backend, got {}",
                self.cache.effective_backend()
            ));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(problems))
        }
    }
}

#[cfg(test)]
mod tests {
    use domain::MatchStrategy;

    use super::*;
    use crate::telemetry::LogFormat;

    const VALID: &str = r#"
        [crm]
        endpoint = "https://crm.example.com/"
        api_key = "k"
    "#;

    #[test]
    fn environment_parsing() {
        assert_eq!("dev".parse::<Environment>().unwrap(), Environment::Development);
        assert_eq!("PROD".parse::<Environment>().unwrap(), Environment::Production);
        assert!("staging".parse::<Environment>().is_err());
        assert_eq!(Environment::Production.to_string(), "production");
    }

    #[test]
    fn app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.environment(), Environment::Development);
        assert_eq!(config.crm.timeout_secs, 10);
        assert_eq!(config.cache.port, 6379);
        assert_eq!(config.sync.match_strategy, MatchStrategy::Fuzzy);
    }

    #[test]
    fn minimal_toml_fills_defaults() {
        let config = AppConfig::from_toml_str(VALID).unwrap();
        assert_eq!(config.crm.timeout_secs, 10);
        assert_eq!(config.crm.timezone, "UTC");
        assert_eq!(config.cache.avatar_namespace, "nc");
        assert_eq!(config.cache.avatar_ttl_secs, 600);
        assert_eq!(config.telemetry.log_format, LogFormat::Text);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn full_toml_is_parsed() {
        let config = AppConfig::from_toml_str(
            r#"
            environment = "production"

            [crm]
            endpoint = "https://crm.example.com"
            api_key = "k"
            timeout_secs = 4
            timezone = "America/Chicago"

            [cache]
            backend = "redis"
            host = "cache.internal"
            port = 6380

            [sync]
            match_strategy = "exact_email"
            contact_purpose = "Service"

            [telemetry]
            log_filter = "debug"
            log_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.environment(), Environment::Production);
        assert_eq!(config.crm.timezone, "America/Chicago");
        assert_eq!(config.cache.port, 6380);
        assert_eq!(config.sync.match_strategy, MatchStrategy::ExactEmail);
        assert_eq!(config.telemetry.log_format, LogFormat::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_endpoint_and_key_are_reported_together() {
        let err = AppConfig::default().validate().unwrap_err();
        let ConfigError::Invalid(problems) = &err else {
            panic!("expected Invalid, got {err:?}");
        };
        assert!(problems.iter().any(|p| p.contains("crm.endpoint")));
        assert!(problems.iter().any(|p| p.contains("crm.api_key")));
        assert!(err.to_string().contains("; "));
    }

    #[test]
    fn unknown_timezone_is_rejected() {
        let mut config = AppConfig::from_toml_str(VALID).unwrap();
        config.crm.timezone = "Mars/Olympus".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn non_http_endpoint_is_rejected() {
        let mut config = AppConfig::from_toml_str(VALID).unwrap();
        config.crm.endpoint = "ftp://crm.example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn production_without_redis_host_is_rejected() {
        let mut config = AppConfig::from_toml_str(VALID).unwrap();
        config.environment = Some(Environment::Production);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("redis"));
    }

    #[test]
    fn load_without_file_uses_defaults() {
        let config = AppConfig::load_from("does-not-exist").unwrap();
        assert_eq!(config.cache.avatar_ttl_secs, 600);
    }
}
