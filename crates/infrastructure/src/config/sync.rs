//! Directory sync settings.

use application::SyncConfig;
use domain::{ContactSource, DEFAULT_CONTACT_PURPOSE, MatchStrategy};
use serde::{Deserialize, Serialize};

/// Settings applied to every contact-history entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncAppConfig {
    /// How addresses are matched (default: fuzzy)
    #[serde(default)]
    pub match_strategy: MatchStrategy,

    /// Purpose category (default: Miscellaneous)
    #[serde(default = "default_contact_purpose")]
    pub contact_purpose: String,

    /// Source type shown in the directory
    #[serde(default = "default_source_type")]
    pub source_type: String,

    /// Source description shown in the directory
    #[serde(default = "default_source_description")]
    pub source_description: String,
}

fn default_contact_purpose() -> String {
    DEFAULT_CONTACT_PURPOSE.to_string()
}

fn default_source_type() -> String {
    ContactSource::default().kind
}

fn default_source_description() -> String {
    ContactSource::default().description
}

impl Default for SyncAppConfig {
    fn default() -> Self {
        Self {
            match_strategy: MatchStrategy::default(),
            contact_purpose: default_contact_purpose(),
            source_type: default_source_type(),
            source_description: default_source_description(),
        }
    }
}

impl SyncAppConfig {
    /// Service configuration for [`application::DirectorySyncService`]
    #[must_use]
    pub fn to_sync_config(&self) -> SyncConfig {
        SyncConfig {
            match_strategy: self.match_strategy,
            contact_purpose: self.contact_purpose.clone(),
            source: ContactSource::new(&self.source_type, &self.source_description),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_service_defaults() {
        assert_eq!(SyncAppConfig::default().to_sync_config(), SyncConfig::default());
    }

    #[test]
    fn overrides_are_applied() {
        let config: SyncAppConfig = serde_json::from_str(
            r#"{"match_strategy":"exact_email","contact_purpose":"Sales","source_type":"Mail"}"#,
        )
        .unwrap();

        let sync = config.to_sync_config();
        assert_eq!(sync.match_strategy, MatchStrategy::ExactEmail);
        assert_eq!(sync.contact_purpose, "Sales");
        assert_eq!(sync.source.kind, "Mail");
        assert_eq!(sync.source.description, "Process Pro Online Email");
    }
}
