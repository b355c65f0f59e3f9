//! Property tests for the override operation.
//!
//! Method names and attribute sets are generated; the invariants checked are
//! the at-most-once registry rule, attribute updates, and isolation between
//! objects of the same class.

#![allow(clippy::unwrap_used, clippy::panic)]

use proptest::prelude::*;
use rebind_core::{AttributeUpdates, Class, Method, RebindError, Value, from_fn};
use std::collections::BTreeMap;

// =============================================================================
// STRATEGIES
// =============================================================================

fn method_name() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

fn value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Unit),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        "[ -~]{0,16}".prop_map(Value::Text),
    ]
}

fn updates() -> impl Strategy<Value = BTreeMap<String, Value>> {
    prop::collection::btree_map("[a-z]{1,6}", value(), 0..6)
}

/// Class whose methods each return their own name.
fn class_with(names: &[String]) -> Class {
    names.iter().fold(Class::new("generated"), |class, name| {
        let owned = name.clone();
        class.with_method(
            name.clone(),
            from_fn(move |_, _| Ok(Value::Text(owned.clone()))),
        )
    })
}

fn replacement() -> impl Method {
    from_fn(|_, _| Ok(Value::from("replacement")))
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn second_override_of_any_name_is_rejected(name in method_name()) {
        let class = class_with(std::slice::from_ref(&name));
        let mut object = class.instantiate("x", Vec::<(String, Value)>::new());

        prop_assert!(object.override_method(&name, replacement(), AttributeUpdates::new()).is_ok());

        let second = object.override_method(
            &name,
            from_fn(|_, _| Ok(Value::from("second"))),
            AttributeUpdates::new(),
        );
        let is_duplicate = matches!(second, Err(RebindError::DuplicateOverride { .. }));
        prop_assert!(is_duplicate);
        prop_assert_eq!(object.call(&name, &[]).unwrap(), Value::from("replacement"));
        prop_assert_eq!(object.call_original(&name, &[]).unwrap(), Value::Text(name.clone()));
    }

    #[test]
    fn distinct_names_each_override_once(names in prop::collection::btree_set(method_name(), 1..6)) {
        let names: Vec<String> = names.into_iter().collect();
        let mut object = class_with(&names).instantiate("x", Vec::<(String, Value)>::new());

        for name in &names {
            prop_assert!(object.override_method(name, replacement(), AttributeUpdates::new()).is_ok());
        }

        let registry = object.registry().unwrap();
        prop_assert_eq!(registry.names(), names.clone());
        for name in &names {
            prop_assert_eq!(object.call_original(name, &[]).unwrap(), Value::Text(name.clone()));
        }
    }

    #[test]
    fn updates_hold_exactly_after_override(
        initial in updates(),
        applied in updates(),
    ) {
        let class = class_with(&["show".to_string()]);
        let mut object = class.instantiate("x", initial.clone());

        object
            .override_method("show", replacement(), AttributeUpdates::from(applied.clone()))
            .unwrap();

        for (name, value) in &applied {
            prop_assert_eq!(object.attribute(name), Some(value));
        }
        for (name, value) in initial.iter().filter(|(name, _)| !applied.contains_key(*name)) {
            prop_assert_eq!(object.attribute(name), Some(value));
        }
    }

    #[test]
    fn override_leaves_sibling_untouched(name in method_name()) {
        let class = class_with(std::slice::from_ref(&name));
        let mut x = class.instantiate("x", Vec::<(String, Value)>::new());
        let y = class.instantiate("y", Vec::<(String, Value)>::new());

        x.override_method(&name, replacement(), AttributeUpdates::new().set("number", 1))
            .unwrap();

        prop_assert_eq!(y.call(&name, &[]).unwrap(), Value::Text(name.clone()));
        prop_assert!(y.registry().is_none());
        prop_assert!(y.attribute("number").is_none());
    }
}
