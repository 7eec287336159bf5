//! Directory sync CLI
//!
//! Prints each command's result as JSON on stdout; logs go to stderr.

#![allow(clippy::print_stdout)]

use anyhow::Context;
use clap::Parser;
use infrastructure::{AppConfig, init_telemetry};
use presentation_cli::{
    cli::{Cli, log_filter_from_verbosity},
    commands,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_from(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config))?;
    if cli.verbose > 0 {
        config.telemetry.log_filter = log_filter_from_verbosity(cli.verbose).to_string();
    }
    init_telemetry(&config.telemetry)?;

    let output = commands::execute(&cli.command, &config).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
