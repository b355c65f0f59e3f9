//! # Objects
//!
//! An object is a label, a class name, a map of attributes, and its own table
//! of method bindings. Overriding a method on one object never touches the
//! table of any other object, including objects of the same class.

use crate::overrides::{self, BoundMethod};
use crate::{
    AttributeUpdates, Attributes, Method, MethodRef, OverrideRegistry, RebindError, Result, Value,
};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// A live instance with named, mutable attributes and methods.
pub struct Object {
    /// Identifies the object in errors and transcripts.
    label: String,

    /// Name of the class this object was created from.
    class: String,

    /// Data attributes.
    pub(crate) attributes: Attributes,

    /// Current method bindings: name -> body.
    pub(crate) methods: BTreeMap<String, MethodRef>,

    /// Displaced originals. Created on first override.
    pub(crate) registry: Option<OverrideRegistry>,
}

impl Object {
    /// Create an object with no attributes and no methods.
    #[must_use]
    pub fn new(label: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            class: class.into(),
            attributes: Attributes::new(),
            methods: BTreeMap::new(),
            registry: None,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn class(&self) -> &str {
        &self.class
    }

    // =========================================================================
    // ATTRIBUTES
    // =========================================================================

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Set one attribute, returning the previous value.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.attributes.insert(name.into(), value.into())
    }

    /// Write every update onto this object, overwriting existing values.
    pub fn apply_updates(&mut self, updates: AttributeUpdates) {
        updates.apply_to(&mut self.attributes);
    }

    /// Read an attribute that must be set.
    pub fn require_attribute(&self, name: &str) -> Result<&Value> {
        self.attributes
            .get(name)
            .ok_or_else(|| RebindError::MissingAttribute {
                object: self.label.clone(),
                attribute: name.to_string(),
            })
    }

    /// Read an attribute that must hold an integer.
    pub fn int_attribute(&self, name: &str) -> Result<i64> {
        let value = self.require_attribute(name)?;
        value.as_int().ok_or_else(|| RebindError::AttributeType {
            attribute: name.to_string(),
            expected: "int",
            found: value.kind(),
        })
    }

    /// Read an attribute that must hold text.
    pub fn text_attribute(&self, name: &str) -> Result<&str> {
        let value = self.require_attribute(name)?;
        value.as_text().ok_or_else(|| RebindError::AttributeType {
            attribute: name.to_string(),
            expected: "text",
            found: value.kind(),
        })
    }

    // =========================================================================
    // METHODS
    // =========================================================================

    /// Bind `method` under `name`, replacing any existing binding.
    ///
    /// This is plain definition; it does not touch the override registry.
    pub fn define(&mut self, name: impl Into<String>, method: impl Method + 'static) {
        self.methods.insert(name.into(), Rc::new(method));
    }

    /// Bind an already shared method body under `name`.
    pub fn define_shared(&mut self, name: impl Into<String>, method: MethodRef) {
        self.methods.insert(name.into(), method);
    }

    #[must_use]
    pub fn has_method(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// Names of the bound methods in sorted order.
    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }

    /// Invoke the current binding of `name` with this object as receiver.
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value> {
        let method = self
            .methods
            .get(name)
            .ok_or_else(|| self.missing_method(name))?;
        method.invoke(self, args)
    }

    /// Invoke the original that an override of `name` displaced.
    ///
    /// Replacements use this to call through to the behavior they replaced.
    pub fn call_original(&self, name: &str, args: &[Value]) -> Result<Value> {
        let original = self
            .registry
            .as_ref()
            .and_then(|registry| registry.get(name))
            .ok_or_else(|| RebindError::NotOverridden {
                object: self.label.clone(),
                method: name.to_string(),
            })?;
        original.invoke(self, args)
    }

    // =========================================================================
    // OVERRIDES
    // =========================================================================

    /// Take a bound reference to the method currently held under `name`.
    ///
    /// Fails with [`RebindError::MissingMethod`] if nothing is bound there.
    pub fn bind(&mut self, name: &str) -> Result<BoundMethod<'_>> {
        BoundMethod::new(self, name)
    }

    /// Override `name` on this object. See [`overrides::override_method`].
    pub fn override_method(
        &mut self,
        name: &str,
        replacement: impl Method + 'static,
        updates: AttributeUpdates,
    ) -> Result<()> {
        overrides::override_method(self.bind(name)?, replacement, updates)
    }

    /// Undo the override of `name`. See [`overrides::restore_original`].
    pub fn restore(&mut self, name: &str) -> Result<()> {
        overrides::restore_original(self, name)
    }

    /// The override registry, if any override was ever applied.
    #[must_use]
    pub fn registry(&self) -> Option<&OverrideRegistry> {
        self.registry.as_ref()
    }

    /// Whether `name` currently has an original recorded.
    #[must_use]
    pub fn is_overridden(&self, name: &str) -> bool {
        self.registry
            .as_ref()
            .is_some_and(|registry| registry.contains(name))
    }

    pub(crate) fn missing_method(&self, name: &str) -> RebindError {
        RebindError::MissingMethod {
            object: self.label.clone(),
            method: name.to_string(),
        }
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("label", &self.label)
            .field("class", &self.class)
            .field("attributes", &self.attributes)
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .field("registry", &self.registry)
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
