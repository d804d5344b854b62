//! Mocking Adapter Port
//!
//! Contract between the double-creating rule and whatever produces test
//! doubles. The engine only depends on this trait; adapters decide how a
//! double for an abstract type is made.

use std::fmt;

use crate::error::{Error, Result};
use crate::value_objects::{TypeKey, Value};

/// Produces test doubles for requested types
pub trait MockingAdapter: Send + Sync + fmt::Debug {
    /// Adapter name used in logs and errors
    fn name(&self) -> &str;

    /// Create a double, or `None` when the adapter cannot double `target`
    fn create_double_or_none(&self, target: &TypeKey, arguments: &[Value]) -> Option<Value>;

    /// Create a double, failing when the adapter cannot double `target`
    fn create_double(&self, target: &TypeKey, arguments: &[Value]) -> Result<Value> {
        self.create_double_or_none(target, arguments).ok_or_else(|| {
            Error::mocking_library(format!(
                "{} cannot create a double for {}",
                self.name(),
                target.full_name()
            ))
        })
    }

    /// Whether the library backing this adapter is available at all
    fn is_backing_library_present(&self) -> bool;

    /// Fail unless the backing library is present and usable
    fn ensure_backing_library_works(&self) -> Result<()>;

    /// Optional inspection capability
    fn as_inspection(&self) -> Option<&dyn MockInspection> {
        None
    }
}

/// Inspection of doubles an adapter created
pub trait MockInspection {
    /// Whether `candidate` is a double created by this adapter
    fn is_my_double(&self, candidate: &Value) -> bool;

    /// The adapter-side object behind `candidate`, if it is one of ours
    fn owning_double(&self, candidate: &Value) -> Option<Value>;
}
