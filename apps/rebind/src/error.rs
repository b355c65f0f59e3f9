//! # App Errors

use rebind_core::RebindError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the CLI layer.
#[derive(Debug, Error)]
pub enum AppError {
    /// Reading a scenario file failed.
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Scenario JSON was malformed, or the transcript could not be encoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An object operation failed while running a scenario.
    #[error(transparent)]
    Rebind(#[from] RebindError),

    /// The scenario parsed but is not runnable.
    #[error("invalid scenario: {0}")]
    Scenario(String),
}
