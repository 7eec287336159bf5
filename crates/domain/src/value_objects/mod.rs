//! Value Objects - Immutable, identity-less domain primitives

mod customer_id;
mod directory_query;
mod email_address;
mod employee_key;
mod store_number;

pub use customer_id::CustomerId;
pub use directory_query::{DirectoryQuery, MatchStrategy};
pub use email_address::EmailAddress;
pub(crate) use email_address::strip_noncharacters;
pub use employee_key::EmployeeKey;
pub use store_number::StoreNumber;
