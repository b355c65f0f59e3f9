//! # Rebind
//!
//! Entry point: parse arguments, set up logging, run the command.

use clap::Parser;
use rebind::cli::{self, Cli};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli::execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", cli::failure_message(&e));
            ExitCode::FAILURE
        }
    }
}

/// RUST_LOG wins over `--log-level`. Logs go to stderr so stdout carries
/// only the transcript.
fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
