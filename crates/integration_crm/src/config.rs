//! CRM client configuration

use serde::{Deserialize, Serialize};

use crate::error::CrmError;

/// Configuration for the CRM REST client
#[derive(Clone, Serialize, Deserialize)]
pub struct CrmConfig {
    /// API base URL, e.g. `https://api.example.com/`
    pub base_url: String,

    /// Bearer token
    #[serde(skip_serializing)]
    pub api_key: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// IANA time zone used for `dateOfContact`
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl std::fmt::Debug for CrmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrmConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .field("timezone", &self.timezone)
            .finish()
    }
}

impl CrmConfig {
    /// Create a configuration with default timeout and time zone
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout_secs: default_timeout_secs(),
            timezone: default_timezone(),
        }
    }

    /// Create a configuration for testing (short timeout)
    #[must_use]
    pub fn for_testing(base_url: impl Into<String>) -> Self {
        Self {
            timeout_secs: 5,
            ..Self::new(base_url, "test-key")
        }
    }

    /// Base URL without trailing slashes
    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Parse the configured time zone
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not a known IANA zone.
    pub fn parsed_timezone(&self) -> Result<chrono_tz::Tz, CrmError> {
        self.timezone
            .parse::<chrono_tz::Tz>()
            .map_err(|_| CrmError::ConfigurationError(format!("unknown timezone: {}", self.timezone)))
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint or API key is missing, the timeout is
    /// zero, or the time zone is unknown.
    pub fn validate(&self) -> Result<(), CrmError> {
        if self.endpoint().trim().is_empty() {
            return Err(CrmError::ConfigurationError(
                "CRM endpoint is not configured".to_string(),
            ));
        }
        if !self.endpoint().starts_with("http://") && !self.endpoint().starts_with("https://") {
            return Err(CrmError::ConfigurationError(format!(
                "CRM endpoint must be an http(s) URL: {}",
                self.base_url
            )));
        }
        if self.api_key.trim().is_empty() {
            return Err(CrmError::ConfigurationError(
                "CRM API key is not configured".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(CrmError::ConfigurationError(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }
        self.parsed_timezone()?;
        Ok(())
    }
}
