//! Contact-history entry posted to the directory

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    entities::CustomerRecord,
    value_objects::{CustomerId, EmployeeKey, StoreNumber},
};

/// Contact method recorded for every mail interaction
pub const CONTACT_METHOD_EMAIL: &str = "E-mail";

/// Purpose category used unless configured otherwise
pub const DEFAULT_CONTACT_PURPOSE: &str = "Miscellaneous";

/// Origin of a contact-history entry as shown in the directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSource {
    /// Source type
    pub kind: String,
    /// Human-readable source description
    pub description: String,
}

impl ContactSource {
    /// Create a source descriptor
    pub fn new(kind: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            description: description.into(),
        }
    }
}

impl Default for ContactSource {
    fn default() -> Self {
        Self::new("Process Pro Email", "Process Pro Online Email")
    }
}

/// One logged mail interaction with a customer
///
/// Write-once: built by the sync service, sent to the directory, and not
/// retained locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactHistoryEntry {
    /// Customer identifier
    pub customer_id: CustomerId,
    /// Customer display name
    pub customer_name: String,
    /// Employee whose mailbox saw the message
    pub employee: EmployeeKey,
    /// Store (tenant) of the employee
    pub store: StoreNumber,
    /// Contact method, always [`CONTACT_METHOD_EMAIL`]
    pub method: String,
    /// Purpose category
    pub purpose: String,
    /// Wall-clock time of the interaction
    pub contacted_at: DateTime<Utc>,
    /// Free-text notes
    pub notes: String,
    /// `true` for mail received from the customer
    pub incoming: bool,
    /// Origin descriptor
    pub source: ContactSource,
}

impl ContactHistoryEntry {
    /// Create an e-mail interaction entry for a resolved customer
    pub fn email(
        customer: &CustomerRecord,
        store: StoreNumber,
        employee: EmployeeKey,
        notes: impl Into<String>,
        incoming: bool,
    ) -> Self {
        Self {
            customer_id: customer.id().clone(),
            customer_name: customer.label().to_string(),
            employee,
            store,
            method: CONTACT_METHOD_EMAIL.to_string(),
            purpose: DEFAULT_CONTACT_PURPOSE.to_string(),
            contacted_at: Utc::now(),
            notes: notes.into(),
            incoming,
            source: ContactSource::default(),
        }
    }

    /// Override the purpose category
    #[must_use]
    pub fn with_purpose(mut self, purpose: impl Into<String>) -> Self {
        self.purpose = purpose.into();
        self
    }

    /// Override the source descriptor
    #[must_use]
    pub fn with_source(mut self, source: ContactSource) -> Self {
        self.source = source;
        self
    }

    /// Override the interaction time
    #[must_use]
    pub const fn at(mut self, contacted_at: DateTime<Utc>) -> Self {
        self.contacted_at = contacted_at;
        self
    }
}
