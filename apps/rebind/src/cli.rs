//! # CLI Commands
//!
//! Argument definitions and the command handlers behind them. Handlers take
//! plain arguments so tests can call them directly.

use crate::AppError;
use crate::scenario::{Scenario, Transcript};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

/// Override methods on live objects and show the effect.
#[derive(Debug, Parser)]
#[command(name = "rebind", version, about)]
pub struct Cli {
    /// Log filter used when RUST_LOG is unset (e.g. "info", "rebind=debug").
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the built-in three-greeter demonstration.
    Demo {
        /// Print the transcript as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Load, validate and run a scenario file.
    Run {
        /// Path to a JSON scenario file.
        scenario: PathBuf,
        /// Print the transcript as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Load and validate a scenario file without running it.
    Validate {
        /// Path to a JSON scenario file.
        scenario: PathBuf,
    },
}

/// Dispatch a parsed command line.
pub fn execute(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Commands::Demo { json } => cmd_demo(json),
        Commands::Run { scenario, json } => cmd_run(&scenario, json),
        Commands::Validate { scenario } => cmd_validate(&scenario),
    }
}

pub fn cmd_demo(json: bool) -> Result<(), AppError> {
    let transcript = Scenario::builtin().run()?;
    print_transcript(&transcript, json)
}

pub fn cmd_run(path: &Path, json: bool) -> Result<(), AppError> {
    let scenario = Scenario::load(path)?;
    let transcript = scenario.run()?;
    info!(
        path = %path.display(),
        overrides = transcript.applied.len(),
        "scenario complete"
    );
    print_transcript(&transcript, json)
}

pub fn cmd_validate(path: &Path) -> Result<(), AppError> {
    let scenario = Scenario::load(path)?;
    scenario.validate()?;
    println!(
        "{}: ok ({} objects, {} overrides)",
        path.display(),
        scenario.objects.len(),
        scenario.overrides.len()
    );
    Ok(())
}

/// The single stderr line printed when a command fails.
pub fn failure_message(error: &AppError) -> String {
    format!("error: {error}")
}

/// Render a transcript as plain text or pretty JSON.
pub fn render_transcript(transcript: &Transcript, json: bool) -> Result<String, AppError> {
    if json {
        Ok(serde_json::to_string_pretty(transcript)?)
    } else {
        Ok(transcript.to_string())
    }
}

fn print_transcript(transcript: &Transcript, json: bool) -> Result<(), AppError> {
    let rendered = render_transcript(transcript, json)?;
    if json {
        println!("{rendered}");
    } else {
        print!("{rendered}");
    }
    Ok(())
}
