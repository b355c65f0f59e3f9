//! # Rebind Core
//!
//! Per-object method overriding for single-threaded programs.
//!
//! An [`Object`] owns a table of named methods and a map of named attributes.
//! [`override_method`] swaps one method on one object for a replacement while
//! recording the displaced original in that object's [`OverrideRegistry`], so
//! the replacement can still call through to it.
//!
//! ```
//! use rebind_core::{AttributeUpdates, Class, Value, from_fn};
//!
//! let greeter = Class::new("greeter").with_method(
//!     "show",
//!     from_fn(|this, _| Ok(this.attribute("name").cloned().unwrap_or(Value::Unit))),
//! );
//! let mut a = greeter.instantiate("a", [("name", Value::from("I am A"))]);
//!
//! a.override_method(
//!     "show",
//!     from_fn(|this, args| {
//!         let number = this.int_attribute("number")?;
//!         let original = this.call_original("show", args)?;
//!         Ok(Value::Text(format!("Hello from number {number}\n{original}")))
//!     }),
//!     AttributeUpdates::new().set("number", 1),
//! )?;
//!
//! assert_eq!(
//!     a.call("show", &[])?,
//!     Value::from("Hello from number 1\nI am A")
//! );
//! # Ok::<(), rebind_core::RebindError>(())
//! ```
//!
//! ## Invariants
//!
//! - A method name is recorded in an object's registry at most once.
//! - The registry is written before the method slot, so it always holds the
//!   displaced original and never the replacement.
//! - A failed override leaves the object untouched.

pub mod class;
pub mod error;
pub mod method;
pub mod object;
pub mod overrides;
pub mod registry;
pub mod value;

pub use class::Class;
pub use error::{RebindError, Result};
pub use method::{FnMethod, Method, MethodRef, from_fn};
pub use object::Object;
pub use overrides::{BoundMethod, override_method, restore_original};
pub use registry::OverrideRegistry;
pub use value::{AttributeUpdates, Attributes, Value};
