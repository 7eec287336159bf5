//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod cache_port;
mod contact_history_port;
mod directory_port;
mod recipient_source_port;

#[cfg(test)]
pub use cache_port::MockCachePort;
pub use cache_port::{CachePort, CachePortExt, CacheStats, ttl};
pub use contact_history_port::ContactHistoryPort;
#[cfg(test)]
pub use contact_history_port::MockContactHistoryPort;
pub use directory_port::DirectoryPort;
#[cfg(test)]
pub use directory_port::MockDirectoryPort;
#[cfg(test)]
pub use recipient_source_port::MockRecipientSourcePort;
pub use recipient_source_port::{DIRECTORY_SOURCE, RecipientSourcePort, RecipientSuggestion};
