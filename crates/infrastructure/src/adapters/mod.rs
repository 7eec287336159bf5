//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod crm_directory_adapter;

pub use crm_directory_adapter::CrmDirectoryAdapter;
