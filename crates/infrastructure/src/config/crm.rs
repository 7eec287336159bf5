//! CRM directory connection settings.

use integration_crm::CrmConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// CRM connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrmAppConfig {
    /// API base URL
    #[serde(default)]
    pub endpoint: String,

    /// Bearer token (sensitive - uses `SecretString`)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_crm_timeout")]
    pub timeout_secs: u64,

    /// IANA time zone used for `dateOfContact` (default: UTC)
    #[serde(default = "default_crm_timezone")]
    pub timezone: String,
}

const fn default_crm_timeout() -> u64 {
    10
}

fn default_crm_timezone() -> String {
    "UTC".to_string()
}

impl Default for CrmAppConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: None,
            timeout_secs: default_crm_timeout(),
            timezone: default_crm_timezone(),
        }
    }
}

impl CrmAppConfig {
    /// Whether a non-blank API key is configured
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().trim().is_empty())
    }

    /// Build the client configuration
    ///
    /// The result is not validated here; the client validates on construction.
    #[must_use]
    pub fn to_client_config(&self) -> CrmConfig {
        let api_key = self
            .api_key
            .as_ref()
            .map(|key| key.expose_secret().to_string())
            .unwrap_or_default();

        CrmConfig {
            timeout_secs: self.timeout_secs,
            timezone: self.timezone.clone(),
            ..CrmConfig::new(self.endpoint.clone(), api_key)
        }
    }
}
