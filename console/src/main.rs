//! LocTur Admin - Command-line console
//!
//! Boots a console against the backend, signs in when needed and prints the
//! answer of one command as a JSON result envelope.

mod cli;
mod commands;
mod error;
mod state;

use clap::Parser;
use std::process::ExitCode;

use cli::Cli;
use commands::CommandResult;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Initialize logging
    loctur_core::init_logging();

    let cli = Cli::parse();
    let state = AppState::new(cli.config(), cli.credentials())?;

    let phase = state.initialize().await;
    tracing::debug!(%phase, "Session settled");

    let result: CommandResult<_> = commands::execute(&state, cli.command).await;
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(if result.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
