//! Application Layer - Activator
//!
//! The resolution engine and everything it needs to run: ordered rule sets,
//! type catalogs, and the compile-time registries for activatable types and
//! declared rules.
//!
//! ## Architecture
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`engine`] | `AnythingActivator`, its builder and `RuleSet` |
//! | [`catalog`] | In-memory and `linkme`-backed type catalogs |
//! | [`registry`] | `linkme` slices for types and rule declarations |
//!
//! ## Dependencies
//!
//! - `activator-domain`: type model, values, ports
//! - `activator-rules`: default pipeline and terminal constructor chooser

pub mod catalog;
pub mod engine;
pub mod registry;

pub use catalog::{InMemoryTypeCatalog, LinkedTypeCatalog};
pub use engine::{ActivatorBuilder, AnythingActivator, RecursionFallback, RuleSet};
pub use registry::{
    ACTIVATABLE_TYPES, RULE_DECLARATIONS, RuleDeclaration, TypeEntry, declared_rules_for,
    list_activatable_types,
};
