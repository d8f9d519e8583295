//! `ewiki` - command-line client for the EWiki backend.
//!
//! Run with: `ewiki <command>`
//!
//! This is a user-facing tool, so `println!` and `eprintln!` are used for
//! command output; diagnostics go through `tracing` on stderr.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

mod cli;
mod commands;
mod logging;

use cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    // Before parsing so `.env` can feed clap's `env` fallbacks.
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();
    logging::init(cli.log_json);

    match dotenv {
        Ok(path) => debug!(path = %path.display(), "loaded .env"),
        Err(err) => debug!(error = %err, "no .env loaded"),
    }

    match commands::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
