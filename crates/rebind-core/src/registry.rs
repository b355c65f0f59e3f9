//! # Override Registry
//!
//! Per-object record of the method bodies displaced by overrides.
//!
//! The registry is attached to an object on its first override and lives as
//! long as the object. Entries are only removed by an explicit restore.

use crate::{MethodRef, RebindError, Result};
use std::collections::BTreeMap;
use std::fmt;

/// Maps a method name to the original body it held before being overridden.
///
/// Each name appears at most once; see [`OverrideRegistry::record`].
#[derive(Clone, Default)]
pub struct OverrideRegistry {
    originals: BTreeMap<String, MethodRef>,
}

impl OverrideRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `original` as the displaced body of `method`.
    ///
    /// Fails with [`RebindError::DuplicateOverride`] if `method` is already
    /// recorded; the registry is unchanged in that case.
    pub fn record(&mut self, method: &str, original: MethodRef) -> Result<()> {
        self.ensure_vacant(method)?;
        self.originals.insert(method.to_string(), original);
        Ok(())
    }

    /// Fail if `method` already has an original recorded.
    pub fn ensure_vacant(&self, method: &str) -> Result<()> {
        if self.originals.contains_key(method) {
            return Err(RebindError::DuplicateOverride {
                method: method.to_string(),
                registered: self.names(),
            });
        }
        Ok(())
    }

    /// The original body recorded for `method`.
    #[must_use]
    pub fn get(&self, method: &str) -> Option<&MethodRef> {
        self.originals.get(method)
    }

    #[must_use]
    pub fn contains(&self, method: &str) -> bool {
        self.originals.contains_key(method)
    }

    /// Remove and return the original recorded for `method`.
    pub fn take(&mut self, method: &str) -> Option<MethodRef> {
        self.originals.remove(method)
    }

    /// Recorded method names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.originals.keys().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.originals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.originals.is_empty()
    }
}

impl fmt::Debug for OverrideRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.originals.keys()).finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
