//! Employee key value object

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Opaque key of the employee whose mailbox produced an event
///
/// The directory records it as the actor of a contact-history entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmployeeKey(String);

impl EmployeeKey {
    /// Create an employee key
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into().trim().to_string();
        if value.is_empty() {
            return Err(DomainError::InvalidEmployeeKey(value));
        }
        Ok(Self(value))
    }

    /// Get the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for EmployeeKey {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EmployeeKey> for String {
    fn from(key: EmployeeKey) -> Self {
        key.0
    }
}
