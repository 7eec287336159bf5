//! CRM directory adapter - Implements `DirectoryPort` and `ContactHistoryPort`
//! using `integration_crm`

use std::sync::Arc;

use application::{
    outcome::{IntegrationFailure, IntegrationOutcome},
    ports::{ContactHistoryPort, DirectoryPort},
};
use async_trait::async_trait;
use domain::{
    AvatarDescriptor, ContactHistoryEntry, CustomerId, CustomerRecord, DirectoryQuery,
    EmailAddress, MatchStrategy, StoreNumber,
};
use integration_crm::{
    CrmClient, CrmConfig, CrmError, Customer, CustomerKey, CustomerSearch, HttpCrmClient,
    NewContactHistory,
};
use tracing::{debug, instrument, warn};

/// Adapter exposing the CRM as the customer directory
///
/// Every [`CrmError`] is turned into a soft failure: lookups come back empty,
/// writes come back unconfirmed, and the cause is logged and carried in the
/// outcome's failure tag.
pub struct CrmDirectoryAdapter {
    client: Arc<dyn CrmClient>,
}

impl std::fmt::Debug for CrmDirectoryAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrmDirectoryAdapter").finish_non_exhaustive()
    }
}

impl CrmDirectoryAdapter {
    /// Create an adapter backed by an HTTP client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: CrmConfig) -> Result<Self, CrmError> {
        Ok(Self::with_client(Arc::new(HttpCrmClient::new(config)?)))
    }

    /// Create an adapter over an existing client
    #[must_use]
    pub fn with_client(client: Arc<dyn CrmClient>) -> Self {
        Self { client }
    }

    fn search_for(query: &DirectoryQuery) -> CustomerSearch {
        match query.strategy() {
            MatchStrategy::Fuzzy => CustomerSearch::by_name_or_email(query.term()),
            MatchStrategy::ExactEmail => CustomerSearch::by_exact_email(query.term()),
        }
    }

    fn map_customer(customer: Customer) -> Option<CustomerRecord> {
        let id = match customer.id {
            CustomerKey::Number(n) => CustomerId::Numeric(n),
            CustomerKey::Text(s) => CustomerId::Text(s),
        };
        CustomerRecord::new(id, customer.name, customer.email).ok()
    }

    fn map_entry(entry: &ContactHistoryEntry) -> NewContactHistory {
        NewContactHistory {
            customer_id: match &entry.customer_id {
                CustomerId::Numeric(n) => CustomerKey::Number(*n),
                CustomerId::Text(s) => CustomerKey::Text(s.clone()),
            },
            customer_name: entry.customer_name.clone(),
            employee_id: entry.employee.as_str().to_string(),
            store_number: entry.store.as_str().to_string(),
            method: entry.method.clone(),
            purpose: entry.purpose.clone(),
            contacted_at: entry.contacted_at,
            notes: entry.notes.clone(),
            incoming: entry.incoming,
            source_type: entry.source.kind.clone(),
            source_description: entry.source.description.clone(),
        }
    }

    /// Short cause string carried in the failure tag
    fn describe(error: &CrmError) -> String {
        error.status().map_or_else(
            || error.to_string(),
            |status| format!("HTTP {status}: {error}"),
        )
    }
}

#[async_trait]
impl DirectoryPort for CrmDirectoryAdapter {
    #[instrument(skip(self, query), fields(store = %store, strategy = %query.strategy()))]
    async fn resolve(
        &self,
        store: &StoreNumber,
        query: &DirectoryQuery,
    ) -> IntegrationOutcome<Vec<CustomerRecord>> {
        if query.is_blank() {
            return IntegrationOutcome::success(Vec::new());
        }

        match self
            .client
            .search_customers(store.as_str(), &Self::search_for(query))
            .await
        {
            Ok(customers) => {
                let records: Vec<CustomerRecord> = customers
                    .into_iter()
                    .filter_map(Self::map_customer)
                    .collect();
                let outcome = if records.is_empty() { "miss" } else { "hit" };
                metrics::counter!("directory_lookups_total", "outcome" => outcome).increment(1);
                debug!(count = records.len(), "Directory lookup completed");
                IntegrationOutcome::success(records)
            },
            Err(e) => {
                metrics::counter!("directory_lookups_total", "outcome" => "error").increment(1);
                warn!(error = %e, retryable = e.is_retryable(), "Directory lookup failed");
                IntegrationOutcome::failed(IntegrationFailure::DirectoryUnavailable(
                    Self::describe(&e),
                ))
            },
        }
    }

    #[instrument(skip(self), fields(store = %store, email = %email))]
    async fn resolve_avatar(
        &self,
        store: &StoreNumber,
        email: &EmailAddress,
    ) -> IntegrationOutcome<Option<AvatarDescriptor>> {
        match self
            .client
            .find_contact_picture(store.as_str(), email.original())
            .await
        {
            Ok(face) => {
                let outcome = if face.is_some() { "hit" } else { "miss" };
                metrics::counter!("avatar_lookups_total", "outcome" => outcome).increment(1);
                debug!(found = face.is_some(), "Avatar lookup completed");
                IntegrationOutcome::success(face.map(AvatarDescriptor::external_jpeg))
            },
            Err(e) => {
                metrics::counter!("avatar_lookups_total", "outcome" => "error").increment(1);
                warn!(error = %e, "Avatar lookup failed");
                IntegrationOutcome::failed(IntegrationFailure::DirectoryUnavailable(
                    Self::describe(&e),
                ))
            },
        }
    }
}

#[async_trait]
impl ContactHistoryPort for CrmDirectoryAdapter {
    #[instrument(skip(self, entry), fields(store = %entry.store, customer_id = %entry.customer_id, incoming = entry.incoming))]
    async fn record(&self, entry: &ContactHistoryEntry) -> IntegrationOutcome<()> {
        match self
            .client
            .create_contact_history(&Self::map_entry(entry))
            .await
        {
            Ok(()) => {
                metrics::counter!("contact_history_writes_total", "outcome" => "success")
                    .increment(1);
                debug!("Contact history recorded");
                IntegrationOutcome::success(())
            },
            Err(e) => {
                metrics::counter!("contact_history_writes_total", "outcome" => "error")
                    .increment(1);
                warn!(error = %e, "Contact history write failed");
                IntegrationOutcome::failed(IntegrationFailure::RecordWriteFailure(
                    Self::describe(&e),
                ))
            },
        }
    }
}
