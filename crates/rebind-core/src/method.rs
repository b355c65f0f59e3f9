//! # Methods
//!
//! A method is anything that can be invoked against an [`Object`]. The object
//! dispatching the call always passes itself as `this`, which is how a method
//! stays bound to its instance: bindings live in the object's own table and
//! are never invoked with any other receiver.

use crate::{Object, Result, Value};
use std::rc::Rc;

/// An invocable method body.
pub trait Method {
    /// Run the method with `this` as the receiver.
    fn invoke(&self, this: &Object, args: &[Value]) -> Result<Value>;
}

/// Shared handle to a method body.
///
/// `Rc` rather than `Arc`: method tables are single-threaded.
pub type MethodRef = Rc<dyn Method>;

/// Adapter turning a closure or `fn` into a [`Method`].
#[derive(Clone, Copy)]
pub struct FnMethod<F>(F);

impl<F> Method for FnMethod<F>
where
    F: Fn(&Object, &[Value]) -> Result<Value>,
{
    fn invoke(&self, this: &Object, args: &[Value]) -> Result<Value> {
        (self.0)(this, args)
    }
}

/// Wrap a closure or `fn` as a [`Method`].
///
/// ```
/// use rebind_core::from_fn;
///
/// let show = from_fn(|this, _args| Ok(this.attribute("name").cloned().unwrap_or_default()));
/// # let _ = show;
/// ```
pub fn from_fn<F>(f: F) -> FnMethod<F>
where
    F: Fn(&Object, &[Value]) -> Result<Value>,
{
    FnMethod(f)
}

// =============================================================================
// TESTS
// =============================================================================
