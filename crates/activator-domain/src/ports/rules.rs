//! Rule Capability Ports
//!
//! A rule is an immutable strategy object. The engine never asks what a rule
//! *is*; it asks which capabilities the rule exposes and calls the matching
//! trait. A single rule may expose several capabilities (the default
//! pipeline composite exposes type search, search by name and constructor
//! choice at once).

use std::fmt;
use std::sync::Arc;

use super::{Resolver, TypeCatalog};
use crate::error::Result;
use crate::value_objects::{ConstructorDescriptor, SearchAnchor, TypeDescriptor, TypeKey, TypeStack, Value};

/// Everything a rule may look at while answering one request
#[derive(Clone, Copy)]
pub struct RuleContext<'a> {
    /// Types waiting to be built, the current request last
    pub stack: &'a TypeStack,
    /// Caller-supplied anchor, if any
    pub anchor: Option<&'a SearchAnchor>,
    /// Type descriptions available to the engine
    pub catalog: &'a dyn TypeCatalog,
    /// Re-entry point for rules that need other objects built
    pub resolver: &'a dyn Resolver,
}

impl fmt::Debug for RuleContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleContext")
            .field("stack", self.stack)
            .field("anchor", &self.anchor)
            .finish_non_exhaustive()
    }
}

/// Supplies a ready-made value for a request
pub trait SuppliesInstance {
    /// Return a value for `request`, or `None` to let the next rule try
    ///
    /// A configuration error aborts the whole resolution; any other error is
    /// recorded and the node becomes absent.
    fn supply(&self, request: &TypeKey, ctx: &RuleContext<'_>) -> Result<Option<Value>>;
}

/// Narrows an abstract type to a concrete one
pub trait FindsConcreteType {
    /// A concrete type assignable to `request`, if one is found
    fn find_concrete_type(&self, request: &TypeKey, ctx: &RuleContext<'_>) -> Option<TypeKey>;
}

/// Locates a concrete type from a partial name
pub trait FindsConcreteTypeByName {
    /// A concrete type whose full name ends with `suffix`
    fn find_concrete_type_by_name(&self, suffix: &str, ctx: &RuleContext<'_>) -> Option<TypeKey>;
}

/// Picks the constructor used to build a concrete type
pub trait ChoosesConstructor {
    /// Chosen constructor, or `None` when no candidate is acceptable
    fn choose_constructor<'d>(
        &self,
        descriptor: &'d TypeDescriptor,
        stack: &TypeStack,
    ) -> Option<&'d ConstructorDescriptor>;
}

/// A strategy object exposing one or more capabilities
pub trait Rule: Send + Sync + fmt::Debug {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Instance-supply capability
    fn as_instance_supplier(&self) -> Option<&dyn SuppliesInstance> {
        None
    }

    /// Type-search capability
    fn as_type_finder(&self) -> Option<&dyn FindsConcreteType> {
        None
    }

    /// Type-search-by-name capability
    fn as_type_finder_by_name(&self) -> Option<&dyn FindsConcreteTypeByName> {
        None
    }

    /// Constructor-selection capability
    fn as_constructor_chooser(&self) -> Option<&dyn ChoosesConstructor> {
        None
    }
}

/// Shared handle to a rule
pub type RuleHandle = Arc<dyn Rule>;
