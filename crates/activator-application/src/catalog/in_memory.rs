//! Explicitly assembled type catalog

use std::collections::HashMap;
use std::sync::Arc;

use activator_domain::{TypeCatalog, TypeDescriptor, TypeKey};

/// Catalog holding exactly the descriptors it was given
///
/// Types are visited in registration order. Registering a type twice
/// replaces the earlier descriptor in place.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTypeCatalog {
    types: Vec<Arc<TypeDescriptor>>,
    index: HashMap<TypeKey, usize>,
}

impl InMemoryTypeCatalog {
    /// An empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog of `descriptors`, in order
    pub fn from_descriptors<I: IntoIterator<Item = TypeDescriptor>>(descriptors: I) -> Self {
        let mut catalog = Self::new();
        for descriptor in descriptors {
            catalog.register(descriptor);
        }
        catalog
    }

    /// Add a descriptor
    #[must_use]
    pub fn with(mut self, descriptor: TypeDescriptor) -> Self {
        self.register(descriptor);
        self
    }

    /// Add or replace a descriptor
    pub fn register(&mut self, descriptor: TypeDescriptor) {
        let key = descriptor.key();
        let descriptor = Arc::new(descriptor);
        match self.index.get(&key) {
            Some(&position) => self.types[position] = descriptor,
            None => {
                self.index.insert(key, self.types.len());
                self.types.push(descriptor);
            }
        }
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether no type is registered
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeCatalog for InMemoryTypeCatalog {
    fn registered(&self, key: &TypeKey) -> Option<Arc<TypeDescriptor>> {
        self.index.get(key).map(|&position| Arc::clone(&self.types[position]))
    }

    fn registered_types(&self) -> Vec<Arc<TypeDescriptor>> {
        self.types.clone()
    }
}
