//! # Values and Attributes
//!
//! Attribute values and method results share one small value type.
//! Attribute maps are `BTreeMap`s so iteration order is deterministic.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Named attributes of an object.
pub type Attributes = BTreeMap<String, Value>;

/// A dynamically typed attribute or return value.
///
/// Serialized untagged, so JSON `null`, `true`, `1` and `"text"` map to
/// `Unit`, `Bool`, `Int` and `Text`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Unit,
    Bool(bool),
    Int(i64),
    Text(String),
}

impl Value {
    /// Name of the variant, used in type mismatch errors.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unit => "unit",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Text(_) => "text",
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unit => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

// =============================================================================
// ATTRIBUTE UPDATES
// =============================================================================

/// Named attribute values written onto an object alongside an override.
///
/// Updates overwrite existing attributes of the same name unconditionally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeUpdates(Attributes);

impl AttributeUpdates {
    /// Create an empty update set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace one named value.
    #[must_use]
    pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Names of the attributes this update touches, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub(crate) fn apply_to(self, attributes: &mut Attributes) {
        attributes.extend(self.0);
    }
}

impl From<Attributes> for AttributeUpdates {
    fn from(attributes: Attributes) -> Self {
        Self(attributes)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for AttributeUpdates {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================
