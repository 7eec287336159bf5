//! Customer directory port
//!
//! Lookups are soft-fail: an unreachable or misbehaving directory yields an
//! empty result tagged [`IntegrationFailure::DirectoryUnavailable`](crate::IntegrationFailure),
//! never an error.

use async_trait::async_trait;
use domain::{AvatarDescriptor, CustomerRecord, DirectoryQuery, EmailAddress, StoreNumber};
#[cfg(test)]
use mockall::automock;

use crate::outcome::IntegrationOutcome;

/// Port for resolving customers in the external directory
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DirectoryPort: Send + Sync {
    /// Find customers of `store` matching `query`
    ///
    /// Records without a primary email are never returned. Order follows the
    /// directory's response.
    async fn resolve(
        &self,
        store: &StoreNumber,
        query: &DirectoryQuery,
    ) -> IntegrationOutcome<Vec<CustomerRecord>>;

    /// Find the face image of the customer whose primary email is `email`
    async fn resolve_avatar(
        &self,
        store: &StoreNumber,
        email: &EmailAddress,
    ) -> IntegrationOutcome<Option<AvatarDescriptor>>;
}
