//! # Classes
//!
//! A class is a named method table used to stamp out objects. Each object
//! receives its own copy of the table, so later overrides on one instance do
//! not leak into the class or its other instances.

use crate::{Method, MethodRef, Object, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Template for objects sharing a set of method bodies.
#[derive(Clone)]
pub struct Class {
    name: String,
    methods: BTreeMap<String, MethodRef>,
}

impl Class {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: BTreeMap::new(),
        }
    }

    /// Add a method to the template.
    #[must_use]
    pub fn with_method(mut self, name: impl Into<String>, method: impl Method + 'static) -> Self {
        self.methods.insert(name.into(), Rc::new(method));
        self
    }

    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }

    /// Create an object of this class with the given initial attributes.
    pub fn instantiate<K, V>(
        &self,
        label: impl Into<String>,
        attributes: impl IntoIterator<Item = (K, V)>,
    ) -> Object
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let mut object = Object::new(label, self.name.clone());
        for (name, method) in &self.methods {
            object.define_shared(name.clone(), Rc::clone(method));
        }
        for (name, value) in attributes {
            object.set_attribute(name, value);
        }
        object
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Class")
            .field("name", &self.name)
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .finish()
    }
}
