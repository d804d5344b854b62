//! Activatable Type Registry
//!
//! Types register their descriptors at compile time through a `linkme`
//! distributed slice; [`crate::catalog::LinkedTypeCatalog`] reads them.

use activator_domain::TypeDescriptor;

/// Registry entry for one activatable type
///
/// ```ignore
/// use activator_application::registry::{ACTIVATABLE_TYPES, TypeEntry};
///
/// #[linkme::distributed_slice(ACTIVATABLE_TYPES)]
/// static LEDGER: TypeEntry = TypeEntry {
///     name: "billing::Ledger",
///     describe: || TypeDescriptor::composite::<Ledger>(module_path!()).build(),
/// };
/// ```
pub struct TypeEntry {
    /// Type name, for listings
    pub name: &'static str,
    /// Produces the descriptor
    pub describe: fn() -> TypeDescriptor,
}

/// Every registered activatable type
#[linkme::distributed_slice]
pub static ACTIVATABLE_TYPES: [TypeEntry] = [..];

/// Names of all registered activatable types, sorted
pub fn list_activatable_types() -> Vec<&'static str> {
    let mut names: Vec<_> = ACTIVATABLE_TYPES.iter().map(|entry| entry.name).collect();
    names.sort_unstable();
    names
}
