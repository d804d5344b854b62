//! Type Catalog Port
//!
//! Stands in for runtime reflection: a catalog enumerates the code modules
//! and the types each of them contains, and describes any type by key.
//! Primitive and text kinds are described without registration.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::constants::BUILTIN_MODULE;
use crate::value_objects::{TypeDescriptor, TypeKey, Value};

static BUILTINS: Lazy<HashMap<TypeKey, Arc<TypeDescriptor>>> = Lazy::new(|| {
    macro_rules! value_kinds {
        ($($ty:ty),*) => {
            vec![$(TypeDescriptor::value_type::<$ty>(BUILTIN_MODULE)),*]
        };
    }
    let mut descriptors = value_kinds!(
        bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64
    );
    descriptors.push(TypeDescriptor::text_type(BUILTIN_MODULE));
    descriptors
        .into_iter()
        .map(|d| (d.key(), Arc::new(d)))
        .collect()
});

/// Descriptor of a built-in primitive or text kind
pub fn builtin_descriptor(key: &TypeKey) -> Option<Arc<TypeDescriptor>> {
    BUILTINS.get(key).cloned()
}

/// Source of type descriptions
pub trait TypeCatalog: Send + Sync {
    /// Registered descriptor for `key`
    fn registered(&self, key: &TypeKey) -> Option<Arc<TypeDescriptor>>;

    /// Every registered descriptor, in catalog order
    fn registered_types(&self) -> Vec<Arc<TypeDescriptor>>;

    /// Descriptor for `key`, falling back to the built-in kinds
    fn describe(&self, key: &TypeKey) -> Option<Arc<TypeDescriptor>> {
        self.registered(key).or_else(|| builtin_descriptor(key))
    }

    /// Distinct code modules, in order of first appearance
    fn modules(&self) -> Vec<&'static str> {
        let mut modules: Vec<&'static str> = Vec::new();
        for descriptor in self.registered_types() {
            let module = descriptor.code_module();
            if !modules.contains(&module) {
                modules.push(module);
            }
        }
        modules
    }

    /// Registered types whose code module is `module`
    fn types_in_module(&self, module: &str) -> Vec<Arc<TypeDescriptor>> {
        self.registered_types()
            .into_iter()
            .filter(|d| d.code_module() == module)
            .collect()
    }

    /// Whether a value of `from` can stand in for `to`
    fn is_assignable(&self, from: &TypeKey, to: &TypeKey) -> bool {
        from == to || self.describe(from).is_some_and(|d| d.is_assignable_to(to))
    }

    /// Convert `value` into a value of `to`, upcasting when needed
    fn coerce(&self, value: &Value, to: &TypeKey) -> Option<Value> {
        if value.type_key() == *to {
            return Some(value.clone());
        }
        self.describe(&value.type_key())
            .and_then(|d| d.upcast(value, to))
    }
}
