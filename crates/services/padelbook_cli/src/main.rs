//! Padelbook CLI
//!
//! Terminal front end for the padel court booking backend: register, log in,
//! browse courts and availability, book, and manage reservations.

mod app_state;
mod commands;
mod prompt;
mod render;


use std::process::ExitCode;

use clap::Parser;
use padelbook_config::load_config;
use tracing::{debug, info};

use crate::app_state::AppState;
use crate::commands::{AlreadyReported, Command};

#[derive(Parser, Debug)]
#[command(name = "padelbook")]
#[command(version, about = "Book padel courts from the terminal", long_about = None)]
struct Cli {
    /// Backend base URL, e.g. http://127.0.0.1:5000/api
    #[arg(long, global = true, env = "PADELBOOK_API_URL")]
    api_url: Option<String>,

    /// Answer every confirmation with yes
    #[arg(short, long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = load_config()?;
    if let Some(api_url) = cli.api_url {
        config.api.base_url = api_url;
    }
    padelbook_common::init_from_config(&config.logging);
    info!(version = env!("CARGO_PKG_VERSION"), "starting padelbook");
    debug!(base_url = %config.api.base_url, "backend configured");

    let state = AppState::build(&config, cli.yes)?;
    finish(commands::run(cli.command, &state).await)
}

/// Exit status for a finished command. Failures the port already showed exit
/// non-zero without being printed again.
fn finish(result: anyhow::Result<()>) -> anyhow::Result<ExitCode> {
    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) if err.is::<AlreadyReported>() => {
            debug!(error = %err, "command failed");
            Ok(ExitCode::FAILURE)
        }
        Err(err) => {
            padelbook_common::log_error(&err, "command failed");
            Err(err)
        }
    }
}
