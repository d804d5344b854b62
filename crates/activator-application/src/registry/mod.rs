//! Compile-time Registries
//!
//! Uses the `linkme` crate so that types and rule declarations can be
//! registered next to the code they describe and discovered at runtime.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Registration Flow                          │
//! ├────────────────────────────────────────────────────────────────┤
//! │  1. Code defines:    #[linkme::distributed_slice(ACTIVATABLE_   │
//! │                      TYPES)] static ENTRY: TypeEntry = ...      │
//! │                              ↓                                  │
//! │  2. Registry holds:  pub static ACTIVATABLE_TYPES: [TypeEntry]  │
//! │                              ↓                                  │
//! │  3. Catalog indexes: LinkedTypeCatalog (once per process)       │
//! │                              ↓                                  │
//! │  4. Engine resolves: type search scans the catalog              │
//! └────────────────────────────────────────────────────────────────┘
//! ```

/// Rule declarations keyed by owner type
pub mod rules;
/// Activatable type descriptors
pub mod types;

pub use rules::{RULE_DECLARATIONS, RuleDeclaration, declared_rules_for};
pub use types::{ACTIVATABLE_TYPES, TypeEntry, list_activatable_types};
