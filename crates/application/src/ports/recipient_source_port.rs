//! Recipient source port
//!
//! Autocomplete merges suggestions from several sources: the host's address
//! book, previously collected addresses, contact groups, and the customer
//! directory.

use async_trait::async_trait;
use domain::CustomerRecord;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Source name attached to suggestions coming from the customer directory
pub const DIRECTORY_SOURCE: &str = "directory";

/// One autocomplete entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientSuggestion {
    /// Identifier within the originating source
    pub id: String,
    /// Display label
    pub label: String,
    /// Email address
    pub email: String,
    /// Originating source name
    pub source: String,
}

impl RecipientSuggestion {
    /// Suggestion for a directory customer
    #[must_use]
    pub fn from_customer(customer: &CustomerRecord) -> Self {
        Self {
            id: customer.id().to_string(),
            label: customer.label().to_string(),
            email: customer.email().to_string(),
            source: DIRECTORY_SOURCE.to_string(),
        }
    }
}

/// A non-directory source of recipient suggestions
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RecipientSourcePort: Send + Sync {
    /// Source name used in logs and on suggestions
    fn name(&self) -> &str;

    /// Find recipients matching `term`
    async fn find_matches(&self, term: &str) -> Result<Vec<RecipientSuggestion>, ApplicationError>;
}
