//! Application layer - Use cases and orchestration
//!
//! Contains the ports the pipeline talks to (directory, contact history,
//! cache, recipient sources), the soft-fail outcome type, and the services
//! that turn mail events into directory calls.

pub mod error;
pub mod outcome;
pub mod ports;
pub mod services;
pub mod sync_context;

pub use error::ApplicationError;
pub use outcome::{IntegrationFailure, IntegrationOutcome};
pub use ports::*;
pub use services::*;
pub use sync_context::SyncContext;
