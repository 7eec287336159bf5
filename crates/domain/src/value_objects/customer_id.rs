//! External customer identifier
//!
//! The directory returns numeric ids for most tenants but string ids for
//! migrated ones. The id is opaque to the pipeline and has to be echoed back
//! in the same JSON type when a contact-history entry is posted.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque customer identifier as issued by the directory
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomerId {
    /// Integer identifier
    Numeric(i64),
    /// String identifier
    Text(String),
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for CustomerId {
    fn from(id: i64) -> Self {
        Self::Numeric(id)
    }
}

impl From<&str> for CustomerId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl From<String> for CustomerId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}
