//! CRM REST client
//!
//! HTTP client for the customer and contact-history endpoints.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::{debug, instrument};

use crate::{
    config::CrmConfig,
    error::CrmError,
    filter::CustomerSearch,
    models::{
        ApiCustomer, ContactHistoryRequest, Customer, CustomerListResponse, NewContactHistory,
    },
};

/// CRM client trait for customer lookups and contact history
#[async_trait]
pub trait CrmClient: Send + Sync {
    /// Search customers of `store`, dropping records without a primary email
    async fn search_customers(
        &self,
        store: &str,
        search: &CustomerSearch,
    ) -> Result<Vec<Customer>, CrmError>;

    /// Face image URL of the customer whose primary email is `email`
    async fn find_contact_picture(
        &self,
        store: &str,
        email: &str,
    ) -> Result<Option<String>, CrmError>;

    /// Create one contact-history entry
    async fn create_contact_history(&self, entry: &NewContactHistory) -> Result<(), CrmError>;
}

/// reqwest-based CRM client
///
/// One instance is shared by all tenants; the store number is passed per call.
#[derive(Debug)]
pub struct HttpCrmClient {
    client: Client,
    config: CrmConfig,
    timezone: chrono_tz::Tz,
}

impl HttpCrmClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: CrmConfig) -> Result<Self, CrmError> {
        config.validate()?;
        let timezone = config.parsed_timezone()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CrmError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config,
            timezone,
        })
    }

    /// Get the client configuration
    #[must_use]
    pub const fn config(&self) -> &CrmConfig {
        &self.config
    }

    fn customers_url(&self, store: &str) -> String {
        format!("{}/v2/customers/customer/{store}", self.config.endpoint())
    }

    fn contact_history_url(&self) -> String {
        format!("{}/v2/customers/contacthistory/", self.config.endpoint())
    }

    fn map_transport_error(&self, e: &reqwest::Error) -> CrmError {
        if e.is_timeout() {
            CrmError::Timeout {
                timeout_secs: self.config.timeout_secs,
            }
        } else if e.is_connect() {
            CrmError::ConnectionFailed(e.to_string())
        } else {
            CrmError::RequestFailed(e.to_string())
        }
    }

    /// Turn 4xx/5xx responses into errors
    async fn check_status(response: Response) -> Result<Response, CrmError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .text()
            .await
            .ok()
            .filter(|body| !body.trim().is_empty())
            .unwrap_or_else(|| status.canonical_reason().unwrap_or_default().to_string());

        if status.is_server_error() {
            Err(CrmError::ServerError {
                status: status.as_u16(),
                message,
            })
        } else {
            Err(CrmError::ClientError {
                status: status.as_u16(),
                message,
            })
        }
    }

    async fn fetch_customers(
        &self,
        store: &str,
        search: &CustomerSearch,
    ) -> Result<CustomerListResponse, CrmError> {
        let url = self.customers_url(store);
        debug!(url = %url, filters = search.filters().len(), "Searching customers");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.config.api_key)
            .query(&search.to_query_pairs())
            .send()
            .await
            .map_err(|e| self.map_transport_error(&e))?;

        Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| CrmError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl CrmClient for HttpCrmClient {
    #[instrument(skip(self, search))]
    async fn search_customers(
        &self,
        store: &str,
        search: &CustomerSearch,
    ) -> Result<Vec<Customer>, CrmError> {
        let body = self.fetch_customers(store, search).await?;
        let received = body.data.len();

        let customers: Vec<Customer> = body
            .data
            .into_iter()
            .filter_map(ApiCustomer::into_customer)
            .collect();

        debug!(received, kept = customers.len(), "Customer search completed");
        Ok(customers)
    }

    #[instrument(skip(self))]
    async fn find_contact_picture(
        &self,
        store: &str,
        email: &str,
    ) -> Result<Option<String>, CrmError> {
        let body = self
            .fetch_customers(store, &CustomerSearch::avatar_for(email))
            .await?;

        Ok(body
            .data
            .first()
            .and_then(|record| record.face_image())
            .map(ToString::to_string))
    }

    #[instrument(skip(self, entry), fields(customer_id = %entry.customer_id, incoming = entry.incoming))]
    async fn create_contact_history(&self, entry: &NewContactHistory) -> Result<(), CrmError> {
        let url = self.contact_history_url();
        let body = ContactHistoryRequest::new(entry, self.timezone);
        debug!(url = %url, date_of_contact = %body.date_of_contact, "Creating contact history");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_transport_error(&e))?;

        Self::check_status(response).await?;
        Ok(())
    }
}
