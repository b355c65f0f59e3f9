//! # Rebind Library
//!
//! This library exposes the Rebind modules for testing and integration.
//!
//! The main binary uses these modules through the `main.rs` entry point.

pub mod cli;
pub mod error;
pub mod scenario;

pub use error::AppError;

// Re-export rebind_core for convenience
pub use rebind_core;
