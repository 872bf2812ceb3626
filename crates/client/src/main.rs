//! `stockroom` CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use stockroom_client::cli::Cli;
use stockroom_client::{AppState, commands};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    stockroom_observability::init();

    let cli = Cli::parse();
    let config = cli.config()?;
    tracing::debug!(data_dir = ?config.data_dir, "configuration loaded");

    let state = AppState::new(config)?;
    commands::execute(cli.command, &state).await
}
