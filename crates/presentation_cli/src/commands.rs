//! Command execution
//!
//! Every command returns a JSON value; printing is left to `main`.

use anyhow::Context;
use application::SyncContext;
use chrono::Utc;
use domain::{
    DirectoryQuery, EmailAddress, EmployeeKey, MailAddress, MessageReceived, MessageSent,
    StoreNumber,
};
use infrastructure::{AppConfig, SyncRuntime};
use serde_json::{Value, json};
use tracing::warn;
use uuid::Uuid;

use crate::cli::{Commands, MailboxArgs, StoreArgs};

/// Parse `email` or `Label <email>`
pub fn parse_address(raw: &str) -> MailAddress {
    let raw = raw.trim();
    match (raw.rfind('<'), raw.strip_suffix('>')) {
        (Some(open), Some(inner)) => {
            let label = raw[..open].trim().trim_matches('"');
            MailAddress::from_raw(label, &inner[open + 1..])
        },
        _ => MailAddress::new(raw),
    }
}

fn store_number(args: &StoreArgs) -> anyhow::Result<StoreNumber> {
    StoreNumber::new(args.store.as_str()).context("invalid --store")
}

fn sync_context(args: &MailboxArgs) -> anyhow::Result<SyncContext> {
    let store = store_number(&args.store)?;
    let employee = EmployeeKey::new(args.employee.as_str()).context("invalid --employee")?;
    Ok(SyncContext::restore(
        store,
        employee,
        Uuid::new_v4(),
        args.at.unwrap_or_else(Utc::now),
    ))
}

fn check_config(config: &AppConfig) -> anyhow::Result<Value> {
    config.validate()?;
    Ok(json!({
        "environment": config.environment().to_string(),
        "crm": {
            "endpoint": config.crm.endpoint,
            "timeout_secs": config.crm.timeout_secs,
            "timezone": config.crm.timezone,
        },
        "cache": {
            "backend": config.cache.effective_backend().to_string(),
            "avatar_namespace": config.cache.avatar_namespace,
            "avatar_ttl_secs": config.cache.avatar_ttl_secs,
        },
        "sync": {
            "match_strategy": config.sync.match_strategy.to_string(),
            "contact_purpose": config.sync.contact_purpose,
        },
    }))
}

/// Run `command` against the configured directory
pub async fn execute(command: &Commands, config: &AppConfig) -> anyhow::Result<Value> {
    if matches!(command, Commands::CheckConfig) {
        return check_config(config);
    }

    let runtime = SyncRuntime::from_config(config)?;

    let value = match command {
        Commands::Lookup {
            store,
            term,
            strategy,
        } => {
            let query = DirectoryQuery::with_strategy(term, *strategy);
            let (customers, failure) = runtime
                .directory()
                .resolve(&store_number(store)?, &query)
                .await
                .into_parts();
            if let Some(failure) = failure {
                warn!(%failure, "Lookup degraded");
            }
            serde_json::to_value(customers)?
        },

        Commands::Avatar { store, email } => {
            let email = EmailAddress::new(email).context("invalid email")?;
            let (avatar, failure) = runtime
                .avatars()
                .resolve_avatar(&store_number(store)?, &email)
                .await
                .into_parts();
            if let Some(failure) = failure {
                warn!(%failure, "Avatar lookup degraded");
            }
            serde_json::to_value(avatar)?
        },

        Commands::ReplayReceived {
            mailbox,
            from,
            subject,
        } => {
            let message =
                MessageReceived::new(from.iter().map(|a| parse_address(a)).collect(), subject);
            let report = runtime
                .sync()
                .on_message_received(&sync_context(mailbox)?, &message)
                .await;
            serde_json::to_value(report)?
        },

        Commands::ReplaySent {
            mailbox,
            to,
            subject,
            body,
        } => {
            let message = MessageSent::new(
                to.iter().map(|a| parse_address(a)).collect(),
                subject,
                body,
            );
            let report = runtime
                .sync()
                .on_message_sent(&sync_context(mailbox)?, &message)
                .await;
            serde_json::to_value(report)?
        },

        Commands::Suggest { store, term } => {
            let suggestions = runtime
                .suggestions()
                .find_matches(&store_number(store)?, term)
                .await;
            serde_json::to_value(suggestions)?
        },

        Commands::CheckConfig => check_config(config)?,
    };

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain_address() {
        let address = parse_address(" jane@example.com ");
        assert_eq!(address.email(), "jane@example.com");
        assert_eq!(address.label(), "jane@example.com");
    }

    #[test]
    fn parse_labelled_address() {
        let address = parse_address("\"Jane Doe\" <jane@example.com>");
        assert_eq!(address.email(), "jane@example.com");
        assert_eq!(address.label(), "Jane Doe");
    }

    #[test]
    fn parse_unterminated_bracket_is_taken_literally() {
        let address = parse_address("Jane <jane@example.com");
        assert_eq!(address.email(), "Jane <jane@example.com");
    }

    #[test]
    fn check_config_reports_problems() {
        let err = check_config(&AppConfig::default()).unwrap_err();
        assert!(err.to_string().contains("crm.endpoint"));
    }

    #[test]
    fn check_config_summarizes_valid_config() {
        let config = AppConfig::from_toml_str(
            r#"
            [crm]
            endpoint = "https://crm.example.com"
            api_key = "secret-key"
            "#,
        )
        .unwrap();

        let summary = check_config(&config).unwrap();
        assert_eq!(summary["cache"]["backend"], "disabled");
        assert_eq!(summary["crm"]["timezone"], "UTC");
        assert!(!summary.to_string().contains("secret-key"));
    }
}
