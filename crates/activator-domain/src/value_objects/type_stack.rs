//! Types waiting to be built

use std::fmt;

use super::TypeKey;

/// Ordered, de-duplicated sequence of types on the active resolution chain
///
/// Pushing is a set-like union: a type already present keeps its position.
/// Cycle avoidance and context-sensitive rules read the stack, the engine
/// never mutates a stack it has handed to a rule.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct TypeStack {
    types: Vec<TypeKey>,
}

impl TypeStack {
    /// Empty stack, used for a top-level request
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of this stack with `key` appended unless already present
    pub fn with(&self, key: TypeKey) -> Self {
        let mut types = self.types.clone();
        if !types.contains(&key) {
            types.push(key);
        }
        Self { types }
    }

    /// Whether `key` is waiting to be built
    pub fn contains(&self, key: &TypeKey) -> bool {
        self.types.contains(key)
    }

    /// Number of distinct types on the stack
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the stack is empty
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Most recently pushed type
    pub fn last(&self) -> Option<&TypeKey> {
        self.types.last()
    }

    /// The type one level below the most recent one
    ///
    /// For a parameter request this is the type whose constructor asked for
    /// it.
    pub fn caller(&self) -> Option<&TypeKey> {
        self.types.iter().rev().nth(1)
    }

    /// Iterate from the outermost request inwards
    pub fn iter(&self) -> impl Iterator<Item = &TypeKey> {
        self.types.iter()
    }

    /// Stack contents as a slice
    pub fn as_slice(&self) -> &[TypeKey] {
        &self.types
    }
}

impl fmt::Debug for TypeStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.types.iter().map(TypeKey::full_name))
            .finish()
    }
}

impl<'a> IntoIterator for &'a TypeStack {
    type Item = &'a TypeKey;
    type IntoIter = std::slice::Iter<'a, TypeKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.types.iter()
    }
}

impl FromIterator<TypeKey> for TypeStack {
    fn from_iter<I: IntoIterator<Item = TypeKey>>(iter: I) -> Self {
        iter.into_iter()
            .fold(TypeStack::new(), |stack, key| stack.with(key))
    }
}
