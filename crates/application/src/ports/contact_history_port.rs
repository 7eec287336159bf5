//! Contact-history port

use async_trait::async_trait;
use domain::ContactHistoryEntry;
#[cfg(test)]
use mockall::automock;

use crate::outcome::IntegrationOutcome;

/// Port for recording customer interactions in the directory
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ContactHistoryPort: Send + Sync {
    /// Store one entry
    ///
    /// A rejected or failed write comes back tagged
    /// [`IntegrationFailure::RecordWriteFailure`](crate::IntegrationFailure).
    async fn record(&self, entry: &ContactHistoryEntry) -> IntegrationOutcome<()>;
}
