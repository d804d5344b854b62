//! Type identity

use std::any::{TypeId, type_name};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identity of a type that can be requested from the engine
///
/// Wraps a [`TypeId`] together with the full type name so diagnostics stay
/// readable. Equality, ordering and hashing use the [`TypeId`] only.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Key of `T`, which may be unsized (`dyn Trait`, `str`)
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Underlying type id
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Full path name, e.g. `billing::ledger::Ledger`
    pub fn full_name(&self) -> &'static str {
        self.name
    }

    /// Last path segment before generic arguments, e.g. `Ledger`
    ///
    /// Trait objects keep their `dyn` prefix and lose their extra bounds:
    /// `dyn billing::Store + Send + Sync` becomes `dyn Store`.
    pub fn short_name(&self) -> String {
        let (prefix, rest) = match self.name.strip_prefix("dyn ") {
            Some(rest) => ("dyn ", without_bounds(rest)),
            None => ("", self.name),
        };
        let (path, generics) = match rest.find('<') {
            Some(idx) => rest.split_at(idx),
            None => (rest, ""),
        };
        let last = path.rsplit("::").next().unwrap_or(path);
        format!("{prefix}{last}{generics}")
    }

    /// Whether the full name ends with `suffix`
    pub fn name_ends_with(&self, suffix: &str) -> bool {
        self.name.ends_with(suffix)
    }
}

/// Drop trailing ` + Send + Sync` style bounds outside any generic arguments
fn without_bounds(name: &str) -> &str {
    let mut depth = 0usize;
    for (idx, ch) in name.char_indices() {
        match ch {
            '<' | '(' => depth += 1,
            '>' | ')' => depth = depth.saturating_sub(1),
            '+' if depth == 0 => return name[..idx].trim_end(),
            _ => {}
        }
    }
    name
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for TypeKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TypeKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(other.name)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({})", self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
