//! Email address value object with validation
//!
//! Mail headers handed over by the host are not always clean: they may carry
//! surrounding whitespace, mixed case, or Unicode non-characters left behind
//! by broken encoders. [`EmailAddress`] normalises all of that before
//! validating, so two spellings of the same mailbox compare equal and map to
//! the same cache key. The caller's spelling is kept alongside for requests
//! to systems that compare addresses case-sensitively.
//!
//! # Examples
//!
//! ```
//! use domain::EmailAddress;
//!
//! let email = EmailAddress::new("  Jane@Example.COM ").unwrap();
//! assert_eq!(email.as_str(), "jane@example.com");
//! assert_eq!(email.original(), "Jane@Example.COM");
//!
//! assert!(EmailAddress::new("invalid").is_err());
//! ```

use std::{
    fmt,
    hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::DomainError;

/// A validated email address
///
/// Equality, hashing and [`as_str`](Self::as_str) use the lower-cased form;
/// [`original`](Self::original) returns the trimmed spelling as given.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress {
    #[validate(email)]
    value: String,
    original: String,
}

/// Strip the non-characters U+FFFE and U+FFFF that some mail encoders emit
pub(crate) fn strip_noncharacters(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '\u{FFFE}' | '\u{FFFF}'))
        .collect()
}

impl EmailAddress {
    /// Create a new email address, normalising and validating it
    ///
    /// # Errors
    ///
    /// Returns an error if the address is not a syntactically valid email.
    pub fn new(email: impl AsRef<str>) -> Result<Self, DomainError> {
        let original = strip_noncharacters(email.as_ref()).trim().to_string();
        let value = original.to_lowercase();

        let candidate = Self { value, original };
        candidate
            .validate()
            .map_err(|e| DomainError::InvalidEmailAddress(e.to_string()))?;

        Ok(candidate)
    }

    /// Get the normalised (lower-cased) address
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Get the address as the caller spelled it, trimmed
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Get the domain part (after @)
    pub fn domain(&self) -> &str {
        self.value.rsplit_once('@').map_or("", |(_, domain)| domain)
    }
}

impl PartialEq for EmailAddress {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for EmailAddress {}

impl Hash for EmailAddress {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl TryFrom<&str> for EmailAddress {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EmailAddress> for String {
    fn from(email: EmailAddress) -> Self {
        email.original
    }
}
