//! kubetpl CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Resource set, template or kubectl error
//! - 2: Invalid arguments (reported by clap)

use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod cli;
mod config;
mod run;

use cli::Cli;
use config::RunConfig;

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const FAILURE: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
}

/// Log to stderr so rendered documents on stdout stay clean.
fn init_logging(verbose: bool, quiet: bool) {
    let default_directives = if verbose {
        "kubetpl=debug,warn"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    let log_result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal()),
        )
        .with(filter)
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let config = match RunConfig::try_from(cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::from(ExitCodes::INVALID_ARGS);
        }
    };

    match run::execute_to_stdout(&config).await {
        Ok(summary) => {
            info!(
                "Done: {} rendered, {} applied",
                summary.rendered, summary.applied
            );
            ExitCode::from(ExitCodes::SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(ExitCodes::FAILURE)
        }
    }
}
