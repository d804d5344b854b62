//! Resolver Port
//!
//! Rules that need other objects built (an instance factory method, a
//! mocking adapter's constructor arguments) call back into the engine through
//! this port, keeping the recursion guard and diagnostics intact.

use crate::error::Result;
use crate::value_objects::{TypeKey, TypeStack, Value};

/// Re-entry point into the resolution engine
pub trait Resolver {
    /// Resolve `request` as if it were requested from within `stack`
    fn resolve_within(&self, request: &TypeKey, stack: &TypeStack) -> Result<Option<Value>>;
}
