//! Domain layer for the directory sync pipeline
//!
//! Contains the customer, contact-history, avatar and mail-event types shared
//! by every other crate, together with their validated value objects.
//! This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
