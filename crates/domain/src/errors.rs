//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Invalid email address format
    #[error("Invalid email address: {0}")]
    InvalidEmailAddress(String),

    /// Store number is empty or contains characters that are not path-safe
    #[error("Invalid store number: {0}")]
    InvalidStoreNumber(String),

    /// Employee key is empty
    #[error("Invalid employee key: {0}")]
    InvalidEmployeeKey(String),

    /// A directory record is missing a required field
    #[error("Incomplete customer record: {0}")]
    IncompleteCustomer(String),
}
