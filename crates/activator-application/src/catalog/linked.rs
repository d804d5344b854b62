//! Catalog backed by compile-time registration

use std::sync::Arc;

use activator_domain::{TypeCatalog, TypeDescriptor, TypeKey};
use once_cell::sync::Lazy;
use tracing::debug;

use super::InMemoryTypeCatalog;
use crate::registry::ACTIVATABLE_TYPES;

static LINKED: Lazy<InMemoryTypeCatalog> = Lazy::new(|| {
    let mut descriptors: Vec<TypeDescriptor> =
        ACTIVATABLE_TYPES.iter().map(|entry| (entry.describe)()).collect();
    // link order is unspecified
    descriptors.sort_by(|a, b| a.key().cmp(&b.key()));
    debug!(count = descriptors.len(), "Linked type catalog indexed");
    InMemoryTypeCatalog::from_descriptors(descriptors)
});

/// Catalog of every type registered in [`ACTIVATABLE_TYPES`]
///
/// The index is built once per process, on first use, and visits types
/// sorted by full name.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkedTypeCatalog;

impl LinkedTypeCatalog {
    /// The linked catalog
    pub fn new() -> Self {
        Self
    }
}

impl TypeCatalog for LinkedTypeCatalog {
    fn registered(&self, key: &TypeKey) -> Option<Arc<TypeDescriptor>> {
        LINKED.registered(key)
    }

    fn registered_types(&self) -> Vec<Arc<TypeDescriptor>> {
        LINKED.registered_types()
    }
}
