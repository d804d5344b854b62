//! # Domain Layer
//!
//! Core types of the activator: type identity, type-erased values, type
//! descriptors standing in for reflection, activation diagnostics and the
//! ports the engine and its rules talk through.
//!
//! ## Architecture
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`value_objects`] | `TypeKey`, `Value`, `TypeStack`, descriptors, diagnostics records |
//! | [`ports`] | Rule capability traits, `TypeCatalog`, `Resolver`, `MockingAdapter` |
//! | [`error`] | Domain error type |
//! | [`constants`] | Defaults shared across layers |
//!
//! ## Example
//!
//! ```
//! use activator_domain::{TypeKey, Value};
//!
//! let value = Value::new(7_u32);
//! assert_eq!(value.type_key(), TypeKey::of::<u32>());
//! assert_eq!(*value.get::<u32>().unwrap(), 7);
//! ```

/// Domain-level constants
pub mod constants;
/// Error handling types
pub mod error;
/// Port interfaces
pub mod ports;
/// Value objects
pub mod value_objects;

pub use error::{Error, Result, catch_construction_panic};
pub use ports::{
    ChoosesConstructor, FindsConcreteType, FindsConcreteTypeByName, MockInspection,
    MockingAdapter, Resolver, Rule, RuleContext, RuleHandle, SuppliesInstance, TypeCatalog,
};
pub use value_objects::{
    ActivationKind, ActivationRecord, Arguments, ConstructorDescriptor, ErrorRecord,
    MethodDescriptor, NameFormat, Parameter, Receiver, SearchAnchor, Supplier, TypeBuilder,
    TypeDescriptor, TypeKey, TypeKind, TypeStack, Value, Visibility,
};
