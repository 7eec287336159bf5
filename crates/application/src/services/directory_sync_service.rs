//! Directory sync service
//!
//! Turns mail events into contact-history entries: each address on the event
//! is looked up in the customer directory and, when it resolves, one entry is
//! written for the first matching customer. Calls run one after another, in
//! header order. Lookups without a match and failed writes are skipped; the
//! returned [`SyncReport`] says what happened.

use std::sync::Arc;

use domain::{
    ContactHistoryEntry, ContactSource, DEFAULT_CONTACT_PURPOSE, DirectoryQuery, MailAddress,
    MatchStrategy, MessageReceived, MessageSent,
};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::ports::{ContactHistoryPort, DirectoryPort};
use crate::sync_context::SyncContext;

/// Configuration for the directory sync service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// How addresses are matched against the directory
    pub match_strategy: MatchStrategy,
    /// Purpose category written on every entry
    pub contact_purpose: String,
    /// Source descriptor written on every entry
    pub source: ContactSource,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            match_strategy: MatchStrategy::default(),
            contact_purpose: DEFAULT_CONTACT_PURPOSE.to_string(),
            source: ContactSource::default(),
        }
    }
}

/// Counters describing one sync run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Directory lookups issued
    pub lookups: u32,
    /// Lookups that resolved to a customer
    pub matched: u32,
    /// Contact-history entries stored
    pub recorded: u32,
    /// Contact-history writes that failed
    pub failed_writes: u32,
    /// Lookups that fell back because the directory was unavailable
    pub degraded_lookups: u32,
}

impl SyncReport {
    /// Add another report's counters to this one
    pub const fn absorb(&mut self, other: Self) {
        self.lookups += other.lookups;
        self.matched += other.matched;
        self.recorded += other.recorded;
        self.failed_writes += other.failed_writes;
        self.degraded_lookups += other.degraded_lookups;
    }

    /// Whether every lookup and write completed without a soft failure
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.failed_writes == 0 && self.degraded_lookups == 0
    }
}

/// Orchestrates directory lookups and contact-history writes for mail events
pub struct DirectorySyncService {
    directory: Arc<dyn DirectoryPort>,
    history: Arc<dyn ContactHistoryPort>,
    config: SyncConfig,
}

impl std::fmt::Debug for DirectorySyncService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectorySyncService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl DirectorySyncService {
    /// Create a new sync service
    #[must_use]
    pub fn new(
        directory: Arc<dyn DirectoryPort>,
        history: Arc<dyn ContactHistoryPort>,
        config: SyncConfig,
    ) -> Self {
        Self {
            directory,
            history,
            config,
        }
    }

    /// Get the service configuration
    #[must_use]
    pub const fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Record an inbound message against its sender
    ///
    /// Only the first `From` address with an email is considered. A message
    /// without one is a no-op.
    #[instrument(skip(self, ctx, message), fields(correlation_id = %ctx.correlation_id(), store = %ctx.store()))]
    pub async fn on_message_received(
        &self,
        ctx: &SyncContext,
        message: &MessageReceived,
    ) -> SyncReport {
        let mut report = SyncReport::default();

        let Some(sender) = message.sender() else {
            debug!("Received message has no sender address");
            return report;
        };

        self.sync_address(ctx, sender, &message.history_notes(), true, &mut report)
            .await;

        info!(
            matched = report.matched,
            recorded = report.recorded,
            "Processed received message"
        );
        report
    }

    /// Record an outbound message against each of its recipients
    #[instrument(skip(self, ctx, message), fields(correlation_id = %ctx.correlation_id(), store = %ctx.store(), recipients = message.to.len()))]
    pub async fn on_message_sent(&self, ctx: &SyncContext, message: &MessageSent) -> SyncReport {
        let mut report = SyncReport::default();
        let notes = message.history_notes();

        for recipient in &message.to {
            if !recipient.has_email() {
                debug!(label = recipient.label(), "Skipping recipient without email");
                continue;
            }
            self.sync_address(ctx, recipient, &notes, false, &mut report)
                .await;
        }

        info!(
            lookups = report.lookups,
            matched = report.matched,
            recorded = report.recorded,
            "Processed sent message"
        );
        report
    }

    /// Record a batch of newly synchronised inbound messages, in order
    ///
    /// Every entry of the batch is dated with the context's timestamp, the
    /// time of the synchronisation, rather than the moment its write is sent.
    #[instrument(skip(self, ctx, messages), fields(correlation_id = %ctx.correlation_id(), count = messages.len()))]
    pub async fn on_messages_synchronized(
        &self,
        ctx: &SyncContext,
        messages: &[MessageReceived],
    ) -> SyncReport {
        let mut report = SyncReport::default();
        for message in messages {
            report.absorb(self.on_message_received(ctx, message).await);
        }
        report
    }

    async fn sync_address(
        &self,
        ctx: &SyncContext,
        address: &MailAddress,
        notes: &str,
        incoming: bool,
        report: &mut SyncReport,
    ) {
        let query = DirectoryQuery::with_strategy(address.email(), self.config.match_strategy);
        if query.is_blank() {
            return;
        }

        report.lookups += 1;
        let (customers, failure) = self.directory.resolve(ctx.store(), &query).await.into_parts();
        if let Some(failure) = failure {
            report.degraded_lookups += 1;
            debug!(email = address.email(), %failure, "Lookup degraded");
        }

        let Some(customer) = customers.into_iter().next() else {
            debug!(email = address.email(), "No directory match");
            return;
        };
        report.matched += 1;

        let entry = ContactHistoryEntry::email(
            &customer,
            ctx.store().clone(),
            ctx.employee().clone(),
            notes,
            incoming,
        )
        .with_purpose(self.config.contact_purpose.clone())
        .with_source(self.config.source.clone())
        .at(ctx.timestamp());

        let written = self.history.record(&entry).await;
        match written.failure() {
            None => {
                report.recorded += 1;
                debug!(customer_id = %customer.id(), incoming, "Contact history recorded");
            },
            Some(failure) => {
                report.failed_writes += 1;
                warn!(customer_id = %customer.id(), %failure, "Contact history not recorded");
            },
        }
    }
}
