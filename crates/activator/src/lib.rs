//! # Activator
//!
//! Builds arbitrary object graphs for tests. Ask for a type and the engine
//! walks an ordered set of rules: pooled or fixed instances first, then a
//! concrete type for anything abstract, then a constructor whose parameters
//! are resolved the same way, all the way down.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use activator::{AnythingActivator, InMemoryTypeCatalog, Parameter, TypeDescriptor};
//!
//! struct Greeting {
//!     text: String,
//! }
//!
//! let catalog = InMemoryTypeCatalog::new().with(
//!     TypeDescriptor::composite::<Greeting>(module_path!())
//!         .constructor(vec![Parameter::required::<String>("text")], |args| {
//!             Ok(Greeting {
//!                 text: args.required::<String>(0)?.to_string(),
//!             })
//!         })
//!         .build(),
//! );
//!
//! let mut activator = AnythingActivator::builder()
//!     .catalog(Arc::new(catalog))
//!     .build()
//!     .unwrap();
//! let greeting = activator.try_resolve::<Greeting>().unwrap();
//! assert!(greeting.text.starts_with("for"));
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Type model, values, errors and rule capability ports
//! - `rules` - Built-in rules and the default pipeline
//! - `application` - The engine, rule sets, catalogs and registries
//! - `infrastructure` - Configuration, logging and bootstrap

use std::sync::Arc;

use once_cell::sync::Lazy;
use tracing::debug;

/// Domain layer - type model and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use activator_domain::*;
}

/// Built-in rules
///
/// Re-exports from the rules crate for convenience
pub mod rules {
    pub use activator_rules::*;
}

/// Application layer - engine, catalogs, registries
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use activator_application::*;
}

/// Infrastructure layer - config, logging, bootstrap
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use activator_infrastructure::*;
}

// Re-export commonly used types at the crate root
pub use application::{
    ACTIVATABLE_TYPES, ActivatorBuilder, AnythingActivator, InMemoryTypeCatalog,
    LinkedTypeCatalog, RULE_DECLARATIONS, RuleDeclaration, RuleSet, TypeEntry,
};
pub use domain::*;
pub use rules::DefaultRules;

/// Registration macros for [`ACTIVATABLE_TYPES`] and [`RULE_DECLARATIONS`]
///
/// Crates that only depend on `activator` register with
/// `#[activator::linkme::distributed_slice(ACTIVATABLE_TYPES)]` plus
/// `#[linkme(crate = activator::linkme)]`.
pub use linkme;

/// The process-wide default rule set
///
/// Built once on first use and never modified. Engines created by the
/// `activate` helpers share its rules.
pub static DEFAULT_RULES: Lazy<RuleSet> = Lazy::new(RuleSet::defaults);

/// Engine builder whose default pipeline is [`DEFAULT_RULES`]
pub fn default_builder() -> ActivatorBuilder {
    AnythingActivator::builder().shared_default_rules(&DEFAULT_RULES)
}

/// Build a `T` from registered types with the default rules
pub fn activate<T: ?Sized + 'static>() -> Result<Arc<T>> {
    debug!(request = std::any::type_name::<T>(), "Activating with default rules");
    default_builder().build()?.try_resolve::<T>()
}

/// Build a `T`, searching relative to `anchor` and using the rules its type
/// declares
pub fn activate_with_anchor<T: ?Sized + 'static>(anchor: SearchAnchor) -> Result<Arc<T>> {
    default_builder()
        .anchor_with_declared_rules(anchor)
        .build()?
        .try_resolve::<T>()
}

/// Build a `T` with `rules` ahead of the default rules
pub fn activate_with<T, I>(rules: I) -> Result<Arc<T>>
where
    T: ?Sized + 'static,
    I: IntoIterator<Item = RuleHandle>,
{
    default_builder().rules(rules).build()?.try_resolve::<T>()
}
