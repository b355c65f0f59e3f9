//! # Error Types
//!
//! Every failure in the core is a [`RebindError`]. Failures are surfaced to
//! the caller as-is; nothing is retried or swallowed internally.

use thiserror::Error;

/// Result alias used throughout the core.
pub type Result<T> = std::result::Result<T, RebindError>;

/// Errors raised while dispatching or overriding methods.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RebindError {
    /// The method already has an original recorded in the registry.
    ///
    /// `registered` holds the registry contents at the time of the attempt.
    #[error("duplicate override of `{method}`: registry already holds {registered:?}")]
    DuplicateOverride {
        method: String,
        registered: Vec<String>,
    },

    /// The object has no method bound under this name.
    #[error("object `{object}` has no method `{method}`")]
    MissingMethod { object: String, method: String },

    /// No original was recorded for this method, so there is nothing to call
    /// through to or restore.
    #[error("method `{method}` on object `{object}` has not been overridden")]
    NotOverridden { object: String, method: String },

    /// A method read an attribute that is not set.
    #[error("object `{object}` has no attribute `{attribute}`")]
    MissingAttribute { object: String, attribute: String },

    /// An attribute holds a value of the wrong kind.
    #[error("attribute `{attribute}` expected {expected}, found {found}")]
    AttributeType {
        attribute: String,
        expected: &'static str,
        found: &'static str,
    },
}

// =============================================================================
// TESTS
// =============================================================================
