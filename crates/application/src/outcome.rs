//! Soft-fail results for calls into external integrations
//!
//! Directory lookups, cache reads and contact-history writes never fail the
//! caller. Instead they hand back the value the caller should continue with
//! (an empty list, `None`, `()`) together with a tag describing what went
//! wrong. Callers that only care about the value use [`IntegrationOutcome::into_value`];
//! callers that report on degradation inspect [`IntegrationOutcome::failure`].
//!
//! # Examples
//!
//! ```
//! use application::{IntegrationFailure, IntegrationOutcome};
//!
//! let hit = IntegrationOutcome::success(vec![1, 2]);
//! assert!(hit.is_success());
//!
//! let miss: IntegrationOutcome<Vec<u32>> =
//!     IntegrationOutcome::failed(IntegrationFailure::DirectoryUnavailable("503".into()));
//! assert!(miss.value().is_empty());
//! ```

use thiserror::Error;

/// Why an integration call fell back to its default value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrationFailure {
    /// The customer directory could not be queried
    #[error("directory unavailable: {0}")]
    DirectoryUnavailable(String),

    /// The key-value cache could not be reached
    #[error("cache unavailable: {0}")]
    CacheUnavailable(String),

    /// The contact-history entry was not stored
    #[error("contact history write failed: {0}")]
    RecordWriteFailure(String),
}

/// A value plus an optional soft-failure tag
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct IntegrationOutcome<T> {
    value: T,
    failure: Option<IntegrationFailure>,
}

impl<T> IntegrationOutcome<T> {
    /// Successful call
    pub const fn success(value: T) -> Self {
        Self {
            value,
            failure: None,
        }
    }

    /// Failed call that continues with `fallback`
    pub const fn degraded(fallback: T, failure: IntegrationFailure) -> Self {
        Self {
            value: fallback,
            failure: Some(failure),
        }
    }

    /// Failed call that continues with the type's default value
    pub fn failed(failure: IntegrationFailure) -> Self
    where
        T: Default,
    {
        Self::degraded(T::default(), failure)
    }

    /// Whether the call completed without a soft failure
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    /// Borrow the value
    pub const fn value(&self) -> &T {
        &self.value
    }

    /// Take the value, discarding the failure tag
    pub fn into_value(self) -> T {
        self.value
    }

    /// The failure tag, if any
    pub const fn failure(&self) -> Option<&IntegrationFailure> {
        self.failure.as_ref()
    }

    /// Split into value and failure tag
    pub fn into_parts(self) -> (T, Option<IntegrationFailure>) {
        (self.value, self.failure)
    }

    /// Transform the value, keeping the failure tag
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> IntegrationOutcome<U> {
        IntegrationOutcome {
            value: f(self.value),
            failure: self.failure,
        }
    }
}
