//! # Override Operation
//!
//! Replaces one named method on one object while keeping the displaced
//! original reachable through the object's [`OverrideRegistry`].
//!
//! Order of effects in [`override_method`]:
//! 1. Resolve the object and current body from the [`BoundMethod`].
//! 2. Attach an empty registry if the object has none.
//! 3. Fail with `DuplicateOverride` if the name is already recorded.
//! 4. Record the current body under the name.
//! 5. Bind the replacement under the name.
//! 6. Apply the attribute updates.
//!
//! Every check happens before step 4, so a failed call mutates nothing.

use crate::{AttributeUpdates, Method, MethodRef, Object, OverrideRegistry, RebindError, Result, Value};
use std::rc::Rc;

/// A method body paired with the object it is bound on.
///
/// Holds the object mutably, so the binding cannot change between taking the
/// reference and using it for an override.
pub struct BoundMethod<'a> {
    object: &'a mut Object,
    name: String,
    current: MethodRef,
}

impl<'a> BoundMethod<'a> {
    pub(crate) fn new(object: &'a mut Object, name: &str) -> Result<Self> {
        let current = object
            .methods
            .get(name)
            .cloned()
            .ok_or_else(|| object.missing_method(name))?;
        Ok(Self {
            object,
            name: name.to_string(),
            current,
        })
    }

    /// Name the method is bound under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The object the method is bound on.
    #[must_use]
    pub fn object(&self) -> &Object {
        &*self.object
    }

    /// Invoke the bound body with its object as receiver.
    pub fn call(&self, args: &[Value]) -> Result<Value> {
        self.current.invoke(&*self.object, args)
    }
}

/// Override the method `target` refers to with `replacement`.
///
/// On success the object's binding for the name is `replacement`, the
/// previous body is recorded in the object's registry, and `updates` have
/// been written onto the object's attributes.
///
/// Not idempotent: overriding a name that is already recorded fails with
/// [`RebindError::DuplicateOverride`] and leaves the object unchanged.
pub fn override_method(
    target: BoundMethod<'_>,
    replacement: impl Method + 'static,
    updates: AttributeUpdates,
) -> Result<()> {
    let BoundMethod {
        object,
        name,
        current,
    } = target;

    let registry = object.registry.get_or_insert_with(OverrideRegistry::new);
    registry.record(&name, current)?;

    object.methods.insert(name, Rc::new(replacement));
    object.apply_updates(updates);
    Ok(())
}

/// Reinstate the original body of `name` and drop its registry entry.
///
/// Afterwards `name` may be overridden again. The registry itself stays
/// attached to the object.
pub fn restore_original(object: &mut Object, name: &str) -> Result<()> {
    let original = object
        .registry
        .as_mut()
        .and_then(|registry| registry.take(name))
        .ok_or_else(|| RebindError::NotOverridden {
            object: object.label().to_string(),
            method: name.to_string(),
        })?;
    object.methods.insert(name.to_string(), original);
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::{Class, from_fn};

    fn greeter() -> Class {
        Class::new("greeter").with_method(
            "show",
            from_fn(|this, _| Ok(Value::from(this.text_attribute("name")?))),
        )
    }

    fn announce(this: &Object, args: &[Value]) -> Result<Value> {
        let number = this.int_attribute("number")?;
        let original = this.call_original("show", args)?;
        Ok(Value::Text(format!("Hello from number {number}\n{original}")))
    }

    #[test]
    fn first_override_rebinds_slot() {
        let mut a = greeter().instantiate("a", [("name", "I am A")]);

        override_method(
            a.bind("show").unwrap(),
            from_fn(|_, _| Ok(Value::from("replaced"))),
            AttributeUpdates::new(),
        )
        .unwrap();

        assert_eq!(a.call("show", &[]).unwrap(), Value::from("replaced"));
    }

    #[test]
    fn original_stays_invocable() {
        let mut a = greeter().instantiate("a", [("name", "I am A")]);
        let before = a.call("show", &[]).unwrap();

        a.override_method("show", from_fn(|_, _| Ok(Value::Unit)), AttributeUpdates::new())
            .unwrap();

        assert_eq!(a.call_original("show", &[]).unwrap(), before);
    }

    #[test]
    fn duplicate_override_changes_nothing() {
        let mut a = greeter().instantiate("a", [("name", "I am A")]);
        a.override_method(
            "show",
            from_fn(|_, _| Ok(Value::from("first"))),
            AttributeUpdates::new().set("number", 1),
        )
        .unwrap();

        let result = a.override_method(
            "show",
            from_fn(|_, _| Ok(Value::from("second"))),
            AttributeUpdates::new().set("number", 2),
        );

        assert_eq!(
            result,
            Err(RebindError::DuplicateOverride {
                method: "show".to_string(),
                registered: vec!["show".to_string()],
            })
        );
        assert_eq!(a.call("show", &[]).unwrap(), Value::from("first"));
        assert_eq!(a.call_original("show", &[]).unwrap(), Value::from("I am A"));
        assert_eq!(a.attribute("number"), Some(&Value::Int(1)));
    }

    #[test]
    fn missing_method_creates_no_registry() {
        let mut a = greeter().instantiate("a", [("name", "I am A")]);
        let result = a.override_method(
            "greet",
            from_fn(|_, _| Ok(Value::Unit)),
            AttributeUpdates::new().set("number", 1),
        );

        assert!(matches!(result, Err(RebindError::MissingMethod { .. })));
        assert!(a.registry().is_none());
        assert!(a.attribute("number").is_none());
    }

    #[test]
    fn updates_overwrite_and_add() {
        let mut b = greeter().instantiate("b", [("name", "I am B")]);
        b.override_method(
            "show",
            from_fn(announce),
            AttributeUpdates::new()
                .set("name", "I am still B")
                .set("number", 2),
        )
        .unwrap();

        assert_eq!(b.attribute("name"), Some(&Value::from("I am still B")));
        assert_eq!(b.attribute("number"), Some(&Value::Int(2)));
    }

    #[test]
    fn objects_of_one_class_stay_independent() {
        let class = greeter();
        let mut x = class.instantiate("x", [("name", "X")]);
        let y = class.instantiate("y", [("name", "Y")]);

        x.override_method("show", from_fn(|_, _| Ok(Value::from("patched"))), AttributeUpdates::new())
            .unwrap();

        assert_eq!(y.call("show", &[]).unwrap(), Value::from("Y"));
        assert!(y.registry().is_none());
        assert_eq!(class.instantiate("z", [("name", "Z")]).call("show", &[]).unwrap(), Value::from("Z"));
    }

    #[test]
    fn restore_allows_second_override() {
        let mut a = greeter().instantiate("a", [("name", "I am A")]);
        a.override_method("show", from_fn(|_, _| Ok(Value::from("first"))), AttributeUpdates::new())
            .unwrap();

        restore_original(&mut a, "show").unwrap();
        assert_eq!(a.call("show", &[]).unwrap(), Value::from("I am A"));
        assert!(a.registry().is_some_and(|registry| registry.is_empty()));

        a.override_method("show", from_fn(|_, _| Ok(Value::from("second"))), AttributeUpdates::new())
            .unwrap();
        assert_eq!(a.call("show", &[]).unwrap(), Value::from("second"));
    }

    #[test]
    fn restore_without_override_fails() {
        let mut a = greeter().instantiate("a", [("name", "I am A")]);
        assert!(matches!(
            a.restore("show"),
            Err(RebindError::NotOverridden { .. })
        ));
    }

    #[test]
    fn bound_method_calls_current_body() {
        let mut a = greeter().instantiate("a", [("name", "I am A")]);
        let bound = a.bind("show").unwrap();
        assert_eq!(bound.name(), "show");
        assert_eq!(bound.object().label(), "a");
        assert_eq!(bound.call(&[]).unwrap(), Value::from("I am A"));
    }

    #[test]
    fn three_greeters_scenario() {
        let class = greeter();
        let mut a = class.instantiate("a", [("name", "I am A")]);
        let mut b = class.instantiate("b", [("name", "I am B")]);
        let c = class.instantiate("c", [("name", "I am C")]);

        a.override_method("show", from_fn(announce), AttributeUpdates::new().set("number", 1))
            .unwrap();
        b.override_method(
            "show",
            from_fn(announce),
            AttributeUpdates::new()
                .set("name", "I am still B")
                .set("number", 2),
        )
        .unwrap();

        assert_eq!(
            a.call("show", &[]).unwrap(),
            Value::from("Hello from number 1\nI am A")
        );
        assert_eq!(
            b.call("show", &[]).unwrap(),
            Value::from("Hello from number 2\nI am still B")
        );
        assert_eq!(c.call("show", &[]).unwrap(), Value::from("I am C"));
    }
}
