//! Domain Port Interfaces
//!
//! Boundary contracts between the engine, the rules it runs and the
//! collaborators it depends on.
//!
//! ## Organization
//!
//! - **rules** - Rule capability traits and the context handed to rules
//! - **catalog** - Type descriptions standing in for reflection
//! - **resolver** - Re-entry into the engine from inside a rule
//! - **mocking** - Test double adapters

/// Type catalog port and built-in descriptors
pub mod catalog;
/// Mocking adapter port
pub mod mocking;
/// Engine re-entry port
pub mod resolver;
/// Rule capability ports
pub mod rules;

pub use catalog::{TypeCatalog, builtin_descriptor};
pub use mocking::{MockInspection, MockingAdapter};
pub use resolver::Resolver;
pub use rules::{
    ChoosesConstructor, FindsConcreteType, FindsConcreteTypeByName, Rule, RuleContext, RuleHandle,
    SuppliesInstance,
};
