//! CRM API data models

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Customer identifier as sent by the CRM (integer or string)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomerKey {
    /// Numeric identifier
    Number(i64),
    /// String identifier
    Text(String),
}

impl fmt::Display for CustomerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A customer with a usable primary email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    /// CRM identifier
    pub id: CustomerKey,
    /// Full name, falling back to the email when the CRM has none
    pub name: String,
    /// Primary email address
    pub email: String,
}

/// Response envelope of the customer endpoint
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CustomerListResponse {
    #[serde(default)]
    pub data: Vec<ApiCustomer>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ApiCustomer {
    pub id: Option<CustomerKey>,
    #[serde(default)]
    pub name: Option<ApiName>,
    #[serde(default)]
    pub communication: Option<ApiCommunication>,
    #[serde(default, rename = "driversLicense")]
    pub drivers_license: Option<ApiDriversLicense>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ApiName {
    pub full: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ApiCommunication {
    pub email: Option<ApiEmail>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ApiEmail {
    pub primary: Option<ApiAddress>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ApiAddress {
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ApiDriversLicense {
    pub image: Option<ApiImage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ApiImage {
    pub face: Option<String>,
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

impl ApiCustomer {
    pub(crate) fn primary_email(&self) -> Option<&str> {
        non_empty(
            self.communication
                .as_ref()
                .and_then(|c| c.email.as_ref())
                .and_then(|e| e.primary.as_ref())
                .and_then(|p| p.address.as_ref()),
        )
    }

    pub(crate) fn full_name(&self) -> Option<&str> {
        non_empty(self.name.as_ref().and_then(|n| n.full.as_ref()))
    }

    pub(crate) fn face_image(&self) -> Option<&str> {
        non_empty(
            self.drivers_license
                .as_ref()
                .and_then(|d| d.image.as_ref())
                .and_then(|i| i.face.as_ref()),
        )
    }

    /// Convert into a [`Customer`], dropping records without id or email
    pub(crate) fn into_customer(self) -> Option<Customer> {
        let email = self.primary_email()?.to_string();
        let name = self.full_name().unwrap_or(&email).to_string();
        let id = self.id?;
        Some(Customer { id, name, email })
    }
}

/// A contact-history entry to create
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContactHistory {
    /// Customer identifier
    pub customer_id: CustomerKey,
    /// Customer display name
    pub customer_name: String,
    /// Employee identifier
    pub employee_id: String,
    /// Store number
    pub store_number: String,
    /// Contact method
    pub method: String,
    /// Purpose category
    pub purpose: String,
    /// Interaction time
    pub contacted_at: DateTime<Utc>,
    /// Free-text notes
    pub notes: String,
    /// Direction flag
    pub incoming: bool,
    /// Source type
    pub source_type: String,
    /// Source description
    pub source_description: String,
}

/// Wire body of `POST v2/customers/contacthistory/`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ContactHistoryRequest<'a> {
    pub customer: CustomerRef<'a>,
    pub employee: EmployeeRef<'a>,
    pub store: StoreRef<'a>,
    pub method: &'a str,
    pub purpose: &'a str,
    pub date_of_contact: String,
    pub notes: &'a str,
    pub incoming: bool,
    pub source: SourceRef<'a>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct CustomerRef<'a> {
    pub id: &'a CustomerKey,
    pub name: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct EmployeeRef<'a> {
    pub id: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct StoreRef<'a> {
    pub number: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct SourceRef<'a> {
    #[serde(rename = "type")]
    pub kind: &'a str,
    pub description: &'a str,
}

/// Format used for `dateOfContact`
pub(crate) const CONTACT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

impl<'a> ContactHistoryRequest<'a> {
    pub(crate) fn new(entry: &'a NewContactHistory, timezone: chrono_tz::Tz) -> Self {
        Self {
            customer: CustomerRef {
                id: &entry.customer_id,
                name: &entry.customer_name,
            },
            employee: EmployeeRef {
                id: &entry.employee_id,
            },
            store: StoreRef {
                number: &entry.store_number,
            },
            method: &entry.method,
            purpose: &entry.purpose,
            date_of_contact: entry
                .contacted_at
                .with_timezone(&timezone)
                .format(CONTACT_DATE_FORMAT)
                .to_string(),
            notes: &entry.notes,
            incoming: entry.incoming,
            source: SourceRef {
                kind: &entry.source_type,
                description: &entry.source_description,
            },
        }
    }
}
