//! Per-event context for directory sync
//!
//! A `SyncContext` carries the tenant (store) and the employee whose mailbox
//! produced the event, plus a correlation id for logs and the event time used
//! as the contact-history timestamp.
//!
//! # Examples
//!
//! ```
//! use application::SyncContext;
//! use domain::{EmployeeKey, StoreNumber};
//!
//! let ctx = SyncContext::new(
//!     StoreNumber::new("1042").unwrap(),
//!     EmployeeKey::new("E-7").unwrap(),
//! );
//! assert_eq!(ctx.store().as_str(), "1042");
//! assert!(!ctx.correlation_id().is_nil());
//! ```

use chrono::{DateTime, Utc};
use domain::{EmployeeKey, StoreNumber};
use uuid::Uuid;

/// Tenant, employee and tracing metadata for one mail event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncContext {
    store: StoreNumber,
    employee: EmployeeKey,
    correlation_id: Uuid,
    timestamp: DateTime<Utc>,
}

impl SyncContext {
    /// Create a context for an event happening now
    #[must_use]
    pub fn new(store: StoreNumber, employee: EmployeeKey) -> Self {
        Self::restore(store, employee, Uuid::new_v4(), Utc::now())
    }

    /// Create a context with all fields specified
    ///
    /// Used when replaying events whose time is known.
    #[must_use]
    pub const fn restore(
        store: StoreNumber,
        employee: EmployeeKey,
        correlation_id: Uuid,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            store,
            employee,
            correlation_id,
            timestamp,
        }
    }

    /// Store (tenant) of the mailbox
    #[must_use]
    pub const fn store(&self) -> &StoreNumber {
        &self.store
    }

    /// Employee owning the mailbox
    #[must_use]
    pub const fn employee(&self) -> &EmployeeKey {
        &self.employee
    }

    /// Correlation id for logs
    #[must_use]
    pub const fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    /// Event time
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
