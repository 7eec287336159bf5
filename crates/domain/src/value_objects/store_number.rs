//! Store number value object
//!
//! The directory partitions customers by store (the tenant). The store number
//! is interpolated into the request path, so it is restricted to path-safe
//! characters.
//!
//! # Examples
//!
//! ```
//! use domain::StoreNumber;
//!
//! let store = StoreNumber::new("1042").unwrap();
//! assert_eq!(store.as_str(), "1042");
//!
//! assert!(StoreNumber::new("").is_err());
//! assert!(StoreNumber::new("10/42").is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Identifier of the store (tenant) a mailbox belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StoreNumber(String);

impl StoreNumber {
    /// Create a store number
    ///
    /// # Errors
    ///
    /// Returns an error if the value is empty or contains characters other
    /// than ASCII alphanumerics, `-` and `_`.
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into().trim().to_string();
        if value.is_empty() {
            return Err(DomainError::InvalidStoreNumber(value));
        }
        if !value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(DomainError::InvalidStoreNumber(value));
        }
        Ok(Self(value))
    }

    /// Get the store number as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoreNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for StoreNumber {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StoreNumber> for String {
    fn from(store: StoreNumber) -> Self {
        store.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_store_is_accepted() {
        assert_eq!(StoreNumber::new("1042").unwrap().as_str(), "1042");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(StoreNumber::new(" 77 ").unwrap().as_str(), "77");
    }

    #[test]
    fn dashes_and_underscores_are_allowed() {
        assert!(StoreNumber::new("north-1_b").is_ok());
    }

    #[test]
    fn empty_is_rejected() {
        assert!(matches!(
            StoreNumber::new("   "),
            Err(DomainError::InvalidStoreNumber(_))
        ));
    }

    #[test]
    fn path_characters_are_rejected() {
        assert!(StoreNumber::new("../admin").is_err());
        assert!(StoreNumber::new("12?x=1").is_err());
        assert!(StoreNumber::new("12 34").is_err());
    }

    #[test]
    fn deserialization_validates() {
        let ok: StoreNumber = serde_json::from_str("\"55\"").unwrap();
        assert_eq!(ok.as_str(), "55");
        assert!(serde_json::from_str::<StoreNumber>("\"a/b\"").is_err());
    }
}
