//! CRM client error types

use thiserror::Error;

/// Errors that can occur when talking to the CRM REST API
#[derive(Debug, Error)]
pub enum CrmError {
    /// Connection to the CRM could not be established
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP request failed before a response arrived
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The CRM rejected the request (4xx)
    #[error("Client error: HTTP {status}: {message}")]
    ClientError {
        /// HTTP status code
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// The CRM failed to handle the request (5xx)
    #[error("Server error: HTTP {status}: {message}")]
    ServerError {
        /// HTTP status code
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// Failed to parse response from the CRM
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}

impl CrmError {
    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_)
                | Self::RequestFailed(_)
                | Self::ServerError { .. }
                | Self::Timeout { .. }
        )
    }

    /// HTTP status carried by the error, if any
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::ClientError { status, .. } | Self::ServerError { status, .. } => Some(*status),
            _ => None,
        }
    }
}
