//! Recipient autocomplete
//!
//! Merges suggestions from the registered recipient sources with customers
//! from the directory. Sources are queried in registration order and the
//! directory last; a failing source contributes nothing.

use std::sync::Arc;

use domain::{DirectoryQuery, StoreNumber};
use tracing::{debug, instrument, warn};

use crate::ports::{DirectoryPort, RecipientSourcePort, RecipientSuggestion};

/// Service answering recipient autocomplete queries
pub struct RecipientSuggestionService {
    sources: Vec<Arc<dyn RecipientSourcePort>>,
    directory: Arc<dyn DirectoryPort>,
}

impl std::fmt::Debug for RecipientSuggestionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.sources.iter().map(|s| s.name()).collect();
        f.debug_struct("RecipientSuggestionService")
            .field("sources", &names)
            .finish_non_exhaustive()
    }
}

impl RecipientSuggestionService {
    /// Create a service backed by the directory only
    #[must_use]
    pub fn new(directory: Arc<dyn DirectoryPort>) -> Self {
        Self {
            sources: Vec::new(),
            directory,
        }
    }

    /// Register an additional source, queried before the directory
    #[must_use]
    pub fn with_source(mut self, source: Arc<dyn RecipientSourcePort>) -> Self {
        self.sources.push(source);
        self
    }

    /// Find suggestions for `term` within `store`
    #[instrument(skip(self), fields(store = %store))]
    pub async fn find_matches(&self, store: &StoreNumber, term: &str) -> Vec<RecipientSuggestion> {
        let query = DirectoryQuery::new(term);
        if query.is_blank() {
            return Vec::new();
        }

        let mut suggestions = Vec::new();
        for source in &self.sources {
            match source.find_matches(query.term()).await {
                Ok(found) => suggestions.extend(found),
                Err(e) => warn!(source = source.name(), error = %e, "Recipient source failed"),
            }
        }

        let customers = self.directory.resolve(store, &query).await.into_value();
        suggestions.extend(customers.iter().map(RecipientSuggestion::from_customer));

        debug!(count = suggestions.len(), "Recipient suggestions collected");
        suggestions
    }
}
