//! Command-line arguments

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use domain::MatchStrategy;

/// Directory sync CLI
#[derive(Debug, Parser)]
#[command(name = "directory-sync-cli")]
#[command(author, version, about = "Customer directory sync tools", long_about = None)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file, extension optional
    #[arg(short, long, default_value = "config", env = "DIRSYNC_CONFIG", global = true)]
    pub config: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// Store selection shared by every directory command
#[derive(Debug, Clone, Args)]
pub struct StoreArgs {
    /// Store (tenant) number
    #[arg(short, long, env = "DIRSYNC_STORE")]
    pub store: String,
}

/// Mailbox owner for replayed events
#[derive(Debug, Clone, Args)]
pub struct MailboxArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Employee key of the mailbox owner
    #[arg(short, long, env = "DIRSYNC_EMPLOYEE")]
    pub employee: String,

    /// Event time (RFC 3339), defaults to now
    #[arg(long)]
    pub at: Option<DateTime<Utc>>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Look up customers by name or email
    Lookup {
        #[command(flatten)]
        store: StoreArgs,

        /// Name or email to search for
        term: String,

        /// Matching strategy
        #[arg(long, default_value_t = MatchStrategy::Fuzzy)]
        strategy: MatchStrategy,
    },

    /// Resolve the avatar of a customer email
    Avatar {
        #[command(flatten)]
        store: StoreArgs,

        /// Customer email
        email: String,
    },

    /// Record a received message against its sender
    ///
    /// Example: directory-sync-cli replay-received -s 1042 -e E-7 --from "Jane <jane@example.com>" --subject Hello
    ReplayReceived {
        #[command(flatten)]
        mailbox: MailboxArgs,

        /// Sender, `email` or `Label <email>`; repeat for several
        #[arg(long = "from", required = true)]
        from: Vec<String>,

        /// Message subject
        #[arg(long, default_value = "")]
        subject: String,
    },

    /// Record a sent message against each recipient
    ReplaySent {
        #[command(flatten)]
        mailbox: MailboxArgs,

        /// Recipient, `email` or `Label <email>`; repeat for several
        #[arg(long = "to", required = true)]
        to: Vec<String>,

        /// Message subject
        #[arg(long, default_value = "")]
        subject: String,

        /// Message body
        #[arg(long, default_value = "")]
        body: String,
    },

    /// Suggest recipients for an autocomplete term
    Suggest {
        #[command(flatten)]
        store: StoreArgs,

        /// Partial name or email
        term: String,
    },

    /// Validate the configuration and print a summary
    CheckConfig,
}

/// Determine log filter level from verbosity count
pub const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
