//! Application services - Use case implementations

mod avatar_service;
mod directory_sync_service;
mod recipient_suggestion_service;

pub use avatar_service::{AvatarCache, AvatarService, DEFAULT_AVATAR_NAMESPACE};
pub use directory_sync_service::{DirectorySyncService, SyncConfig, SyncReport};
pub use recipient_suggestion_service::RecipientSuggestionService;
