//! Customer record returned by a directory lookup

use serde::{Deserialize, Serialize};

use crate::{errors::DomainError, value_objects::CustomerId};

/// A customer resolved from the external directory
///
/// Immutable once created. Construction rejects records without a primary
/// email, so every `CustomerRecord` in circulation can be contacted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    id: CustomerId,
    label: String,
    email: String,
}

impl CustomerRecord {
    /// Create a customer record
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::IncompleteCustomer`] if the email is empty.
    pub fn new(
        id: impl Into<CustomerId>,
        label: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let email = email.into().trim().to_string();
        if email.is_empty() {
            return Err(DomainError::IncompleteCustomer(
                "primary email is empty".to_string(),
            ));
        }
        Ok(Self {
            id: id.into(),
            label: label.into(),
            email,
        })
    }

    /// External identifier
    pub const fn id(&self) -> &CustomerId {
        &self.id
    }

    /// Display name
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Primary email address
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Whether the primary email equals `address`, ignoring case
    pub fn has_email(&self, address: &str) -> bool {
        self.email.eq_ignore_ascii_case(address.trim())
    }
}
