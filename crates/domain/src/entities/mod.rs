//! Domain entities - records exchanged with the directory and mail events

mod avatar;
mod contact_history;
mod customer;
mod mail_message;

pub use avatar::AvatarDescriptor;
pub use contact_history::{
    CONTACT_METHOD_EMAIL, ContactHistoryEntry, ContactSource, DEFAULT_CONTACT_PURPOSE,
};
pub use customer::CustomerRecord;
pub use mail_message::{MailAddress, MessageReceived, MessageSent};
