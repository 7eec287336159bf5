#![forbid(unsafe_code)]
//! Customer directory integration
//!
//! REST client for the CRM's customer search and contact-history endpoints.
//! Errors are returned as [`CrmError`]; deciding which of them are fatal is
//! left to the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_crm::{CrmClient, CrmConfig, CustomerSearch, HttpCrmClient};
//!
//! let client = HttpCrmClient::new(CrmConfig::new("https://crm.example.com", api_key))?;
//! let customers = client
//!     .search_customers("1042", &CustomerSearch::by_name_or_email("jane@example.com"))
//!     .await?;
//! ```

mod client;
mod config;
mod error;
mod filter;
mod models;

pub use client::{CrmClient, HttpCrmClient};
pub use config::CrmConfig;
pub use error::CrmError;
pub use filter::{Comparison, CustomerSearch, FieldFilter, Relation, fields};
pub use models::{Customer, CustomerKey, NewContactHistory};
