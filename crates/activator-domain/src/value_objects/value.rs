//! Type-erased values produced and consumed by the engine

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use super::TypeKey;

/// A shared, type-erased value
///
/// The erased payload is always an `Arc<T>`, which lets `T` be unsized: a
/// value built from `Arc<dyn Store>` is retrieved with `get::<dyn Store>()`.
/// Cloning a `Value` shares the payload, so identity survives every hop
/// through the engine.
#[derive(Clone)]
pub struct Value {
    type_key: TypeKey,
    inner: Arc<dyn Any + Send + Sync>,
}

impl Value {
    /// Wrap an owned value
    pub fn new<T: Send + Sync + 'static>(value: T) -> Self {
        Self::from_arc(Arc::new(value))
    }

    /// Wrap an already shared value, keeping its identity
    pub fn from_arc<T: ?Sized + Send + Sync + 'static>(value: Arc<T>) -> Self {
        Self {
            type_key: TypeKey::of::<T>(),
            inner: Arc::new(value),
        }
    }

    /// Wrap a string as a text-kind value
    pub fn text<S: Into<String>>(text: S) -> Self {
        Self::new(text.into())
    }

    /// The type this value was created as
    pub fn type_key(&self) -> TypeKey {
        self.type_key
    }

    /// Retrieve the payload as `Arc<T>` if this value was created as `T`
    pub fn get<T: ?Sized + 'static>(&self) -> Option<Arc<T>> {
        self.inner.downcast_ref::<Arc<T>>().cloned()
    }

    /// Whether this value was created as `T`
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.inner.is::<Arc<T>>()
    }

    /// Whether both values share the same payload
    pub fn ptr_eq(&self, other: &Value) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Human-readable rendering used in activation records
    ///
    /// Text and primitive payloads render their content, everything else
    /// renders its short type name.
    pub fn render(&self) -> String {
        macro_rules! render_as {
            ($($ty:ty),*) => {
                $(
                    if let Some(v) = self.get::<$ty>() {
                        return v.to_string();
                    }
                )*
            };
        }
        if let Some(text) = self.get::<String>() {
            return format!("{text:?}");
        }
        render_as!(
            bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64
        );
        self.type_key.short_name()
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Value")
            .field("type", &self.type_key.full_name())
            .field("rendered", &self.render())
            .finish()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// A zero-argument callable producing `T`
///
/// Requesting `Supplier<T>` instead of `T` lets a dependency defer creation;
/// the instance pool answers such requests from its pooled values.
pub struct Supplier<T: ?Sized> {
    source: Arc<dyn Fn() -> Arc<T> + Send + Sync>,
}

impl<T: ?Sized> Supplier<T> {
    /// Create a supplier from a closure
    pub fn new<F>(source: F) -> Self
    where
        F: Fn() -> Arc<T> + Send + Sync + 'static,
    {
        Self {
            source: Arc::new(source),
        }
    }

    /// Invoke the supplier
    pub fn get(&self) -> Arc<T> {
        (self.source)()
    }
}

impl<T: ?Sized> Clone for Supplier<T> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<T: ?Sized + 'static> fmt::Debug for Supplier<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Supplier<{}>", std::any::type_name::<T>())
    }
}

/// Caller-supplied reference object for location-relative search
///
/// The anchor's runtime type locates the code module searched by
/// anchor-relative rules, and the anchor itself can act as the receiver of a
/// named factory method.
#[derive(Clone, Debug)]
pub struct SearchAnchor(Value);

impl SearchAnchor {
    /// Anchor on a shared object
    pub fn new<T: Send + Sync + 'static>(anchor: Arc<T>) -> Self {
        Self(Value::from_arc(anchor))
    }

    /// Runtime type of the anchor
    pub fn type_key(&self) -> TypeKey {
        self.0.type_key()
    }

    /// The anchor as a value
    pub fn value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for SearchAnchor {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
