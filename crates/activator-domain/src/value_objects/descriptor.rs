//! Type descriptors
//!
//! Rust has no runtime reflection, so every type the engine can build is
//! described up front: its kind, the constructors it offers, the abstract
//! types it can stand in for, and any named methods a factory rule may call.
//! Descriptors are registered in a [`crate::ports::TypeCatalog`].

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;

use super::{TypeKey, TypeStack, Value};
use crate::error::{Error, Result, catch_construction_panic};

type ConstructFn = Arc<dyn Fn(&Arguments) -> Result<Value> + Send + Sync>;
type InstantiateFn = Arc<dyn Fn() -> Result<Value> + Send + Sync>;
type DefaultFn = Arc<dyn Fn() -> Option<Value> + Send + Sync>;
type UpcastFn = Arc<dyn Fn(&Value) -> Option<Value> + Send + Sync>;
type MethodFn = Arc<dyn Fn(Option<&Value>, &[Value]) -> Result<Value> + Send + Sync>;

/// Broad category of a type, deciding which resolution step handles it
#[derive(Clone, Debug)]
pub enum TypeKind {
    /// Trait objects and other types that cannot be instantiated directly
    Abstract,
    /// The text kind; values are synthesized from the requesting type
    Text,
    /// A primitive or value kind with a zero value
    Value {
        /// Produces the zero value
        zero: fn() -> Value,
    },
    /// A concrete type built through its constructors
    Composite,
}

/// Constructor visibility
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Visibility {
    /// Callable by anyone
    Public,
    /// Restricted; still invokable by the engine
    NonPublic,
}

/// A constructor or factory parameter
#[derive(Clone)]
pub struct Parameter {
    name: &'static str,
    type_key: TypeKey,
    default: Option<DefaultFn>,
}

impl Parameter {
    /// A parameter that must be resolved
    pub fn required<T: ?Sized + 'static>(name: &'static str) -> Self {
        Self {
            name,
            type_key: TypeKey::of::<T>(),
            default: None,
        }
    }

    /// An optional parameter whose declared default is absence
    pub fn optional<T: ?Sized + 'static>(name: &'static str) -> Self {
        Self::optional_with::<T, _>(name, || None)
    }

    /// An optional parameter with a declared default
    pub fn optional_with<T, F>(name: &'static str, default: F) -> Self
    where
        T: ?Sized + 'static,
        F: Fn() -> Option<Value> + Send + Sync + 'static,
    {
        Self {
            name,
            type_key: TypeKey::of::<T>(),
            default: Some(Arc::new(default)),
        }
    }

    /// Parameter name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Parameter type
    pub fn type_key(&self) -> TypeKey {
        self.type_key
    }

    /// Whether the parameter declares a default
    pub fn is_optional(&self) -> bool {
        self.default.is_some()
    }

    /// The declared default, absent for required parameters
    pub fn default_value(&self) -> Option<Value> {
        self.default.as_ref().and_then(|default| default())
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parameter")
            .field("name", &self.name)
            .field("type", &self.type_key.full_name())
            .field("optional", &self.is_optional())
            .finish()
    }
}

/// Resolved arguments handed to a constructor
#[derive(Clone, Debug, Default)]
pub struct Arguments {
    slots: Vec<(TypeKey, Option<Value>)>,
}

impl Arguments {
    /// Arguments for a parameterless constructor
    pub fn empty() -> Self {
        Self::default()
    }

    /// Pair each parameter with its resolved value
    pub fn new(parameters: &[Parameter], values: Vec<Option<Value>>) -> Self {
        Self {
            slots: parameters
                .iter()
                .map(Parameter::type_key)
                .zip(values)
                .collect(),
        }
    }

    /// Number of arguments
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether there are no arguments
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Raw value at `index`, absent when resolution yielded nothing
    pub fn value(&self, index: usize) -> Option<&Value> {
        self.slots.get(index).and_then(|(_, value)| value.as_ref())
    }

    /// Typed value at `index`, absent when missing or of another type
    pub fn get<T: ?Sized + 'static>(&self, index: usize) -> Option<Arc<T>> {
        self.value(index).and_then(Value::get::<T>)
    }

    /// Typed value at `index`, failing when it is absent
    pub fn required<T: ?Sized + 'static>(&self, index: usize) -> Result<Arc<T>> {
        self.get::<T>(index).ok_or_else(|| {
            let type_name = self
                .slots
                .get(index)
                .map_or_else(|| std::any::type_name::<T>(), |(key, _)| key.full_name());
            Error::missing_argument(index, type_name)
        })
    }

    /// Rendered arguments for diagnostics; absent values render as `None`
    pub fn render(&self) -> Vec<String> {
        self.slots
            .iter()
            .map(|(_, value)| value.as_ref().map_or_else(|| "None".to_string(), Value::render))
            .collect()
    }
}

/// One candidate constructor of a concrete type
#[derive(Clone)]
pub struct ConstructorDescriptor {
    parameters: Vec<Parameter>,
    visibility: Visibility,
    construct: ConstructFn,
}

impl ConstructorDescriptor {
    /// A public constructor
    pub fn public<F>(parameters: Vec<Parameter>, construct: F) -> Self
    where
        F: Fn(&Arguments) -> Result<Value> + Send + Sync + 'static,
    {
        Self::with_visibility(Visibility::Public, parameters, construct)
    }

    /// A non-public constructor
    pub fn non_public<F>(parameters: Vec<Parameter>, construct: F) -> Self
    where
        F: Fn(&Arguments) -> Result<Value> + Send + Sync + 'static,
    {
        Self::with_visibility(Visibility::NonPublic, parameters, construct)
    }

    /// A constructor with explicit visibility
    pub fn with_visibility<F>(visibility: Visibility, parameters: Vec<Parameter>, construct: F) -> Self
    where
        F: Fn(&Arguments) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            parameters,
            visibility,
            construct: Arc::new(construct),
        }
    }

    /// Ordered parameters
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Number of parameters
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    /// Declared visibility
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Whether the constructor is public
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    /// Whether choosing this constructor would re-request a type already on
    /// the stack through a non-optional parameter
    pub fn would_recurse(&self, stack: &TypeStack) -> bool {
        self.parameters
            .iter()
            .any(|p| !p.is_optional() && stack.contains(&p.type_key()))
    }

    /// Run the constructor
    pub fn invoke(&self, arguments: &Arguments) -> Result<Value> {
        (self.construct)(arguments)
    }

    /// Rendered signature, e.g. `Ledger(store: dyn Store, name: String)`
    pub fn signature(&self, owner: &TypeKey) -> String {
        let params = self
            .parameters
            .iter()
            .map(|p| {
                let optional = if p.is_optional() { "?" } else { "" };
                format!("{}{optional}: {}", p.name, p.type_key.short_name())
            })
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}({params})", owner.short_name())
    }
}

impl fmt::Debug for ConstructorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorDescriptor")
            .field("parameters", &self.parameters)
            .field("visibility", &self.visibility)
            .finish_non_exhaustive()
    }
}

/// Whether a method needs an instance of its declaring type
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Receiver {
    /// Associated function, no receiver
    Static,
    /// Method on an instance
    Instance,
}

/// A named method that a factory rule may invoke
#[derive(Clone)]
pub struct MethodDescriptor {
    name: &'static str,
    returns: TypeKey,
    receiver: Receiver,
    invoke: MethodFn,
}

impl MethodDescriptor {
    /// Method name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared return type
    pub fn returns(&self) -> TypeKey {
        self.returns
    }

    /// Receiver requirement
    pub fn receiver(&self) -> Receiver {
        self.receiver
    }

    /// Call the method
    pub fn invoke(&self, receiver: Option<&Value>, arguments: &[Value]) -> Result<Value> {
        (self.invoke)(receiver, arguments)
    }
}

impl fmt::Debug for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDescriptor")
            .field("name", &self.name)
            .field("returns", &self.returns.full_name())
            .field("receiver", &self.receiver)
            .finish_non_exhaustive()
    }
}

/// Conversion from a concrete type to an abstract type it implements
#[derive(Clone)]
pub struct Upcast {
    target: TypeKey,
    convert: UpcastFn,
}

impl Upcast {
    /// The abstract type produced
    pub fn target(&self) -> TypeKey {
        self.target
    }

    /// Convert a value of the declaring type
    pub fn apply(&self, value: &Value) -> Option<Value> {
        (self.convert)(value)
    }
}

/// Everything the engine knows about one type
#[derive(Clone)]
pub struct TypeDescriptor {
    key: TypeKey,
    module_path: &'static str,
    kind: TypeKind,
    constructors: Vec<ConstructorDescriptor>,
    instantiate: Option<InstantiateFn>,
    upcasts: Vec<Upcast>,
    methods: Vec<MethodDescriptor>,
}

impl TypeDescriptor {
    fn bare(key: TypeKey, module_path: &'static str, kind: TypeKind) -> Self {
        Self {
            key,
            module_path,
            kind,
            constructors: Vec::new(),
            instantiate: None,
            upcasts: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Describe an abstract type (usually `dyn Trait`)
    pub fn abstract_type<T: ?Sized + 'static>(module_path: &'static str) -> Self {
        Self::bare(TypeKey::of::<T>(), module_path, TypeKind::Abstract)
    }

    /// Describe a value kind whose zero value is `T::default()`
    pub fn value_type<T: Default + Send + Sync + 'static>(module_path: &'static str) -> Self {
        Self::bare(
            TypeKey::of::<T>(),
            module_path,
            TypeKind::Value { zero: zero_of::<T> },
        )
    }

    /// Describe the text kind
    pub fn text_type(module_path: &'static str) -> Self {
        Self::bare(TypeKey::of::<String>(), module_path, TypeKind::Text)
    }

    /// Start describing a composite type
    pub fn composite<T: Send + Sync + 'static>(module_path: &'static str) -> TypeBuilder<T> {
        TypeBuilder {
            descriptor: Self::bare(TypeKey::of::<T>(), module_path, TypeKind::Composite),
            _marker: PhantomData,
        }
    }

    /// Type identity
    pub fn key(&self) -> TypeKey {
        self.key
    }

    /// Module path given at registration
    pub fn module_path(&self) -> &'static str {
        self.module_path
    }

    /// Code module (crate) containing the type: the first path segment
    pub fn code_module(&self) -> &'static str {
        code_module_of(self.module_path)
    }

    /// Kind of the type
    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    /// Whether the type cannot be instantiated directly
    pub fn is_abstract(&self) -> bool {
        matches!(self.kind, TypeKind::Abstract)
    }

    /// Declared constructors, in declaration order
    pub fn constructors(&self) -> &[ConstructorDescriptor] {
        &self.constructors
    }

    /// Declared methods
    pub fn methods(&self) -> &[MethodDescriptor] {
        &self.methods
    }

    /// Method by name
    pub fn method(&self, name: &str) -> Option<&MethodDescriptor> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// Whether a direct instantiation function was registered
    pub fn can_instantiate_directly(&self) -> bool {
        self.instantiate.is_some()
    }

    /// Instantiate without a constructor, if registered
    ///
    /// A panic in the instantiation function becomes a construction error.
    pub fn instantiate(&self) -> Option<Result<Value>> {
        self.instantiate
            .as_ref()
            .map(|instantiate| catch_construction_panic(self.key.full_name(), || instantiate()))
    }

    /// Zero value of a value kind
    pub fn zero_value(&self) -> Option<Value> {
        match self.kind {
            TypeKind::Value { zero } => Some(zero()),
            _ => None,
        }
    }

    /// Whether values of this type can stand in for `target`
    pub fn is_assignable_to(&self, target: &TypeKey) -> bool {
        self.key == *target || self.upcasts.iter().any(|u| u.target == *target)
    }

    /// Convert `value` (of this type) into a value of `target`
    pub fn upcast(&self, value: &Value, target: &TypeKey) -> Option<Value> {
        if value.type_key() == *target {
            return Some(value.clone());
        }
        self.upcasts
            .iter()
            .find(|u| u.target == *target)
            .and_then(|u| u.apply(value))
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("key", &self.key.full_name())
            .field("module_path", &self.module_path)
            .field("kind", &self.kind)
            .field("constructors", &self.constructors)
            .field(
                "implements",
                &self
                    .upcasts
                    .iter()
                    .map(|u| u.target.full_name())
                    .collect::<Vec<_>>(),
            )
            .field("methods", &self.methods)
            .finish_non_exhaustive()
    }
}

/// Code module (crate name) of a module path
pub fn code_module_of(module_path: &str) -> &str {
    module_path.split("::").next().unwrap_or(module_path)
}

fn zero_of<T: Default + Send + Sync + 'static>() -> Value {
    Value::new(T::default())
}

/// Typed builder for composite descriptors
pub struct TypeBuilder<T> {
    descriptor: TypeDescriptor,
    _marker: PhantomData<fn() -> Arc<T>>,
}

impl<T: Send + Sync + 'static> TypeBuilder<T> {
    /// Add a public constructor producing `T`
    #[must_use]
    pub fn constructor<F>(self, parameters: Vec<Parameter>, construct: F) -> Self
    where
        F: Fn(&Arguments) -> Result<T> + Send + Sync + 'static,
    {
        self.raw_constructor(ConstructorDescriptor::public(parameters, move |args| {
            construct(args).map(Value::new)
        }))
    }

    /// Add a non-public constructor producing `T`
    #[must_use]
    pub fn non_public_constructor<F>(self, parameters: Vec<Parameter>, construct: F) -> Self
    where
        F: Fn(&Arguments) -> Result<T> + Send + Sync + 'static,
    {
        self.raw_constructor(ConstructorDescriptor::non_public(parameters, move |args| {
            construct(args).map(Value::new)
        }))
    }

    /// Add a prepared constructor descriptor
    #[must_use]
    pub fn raw_constructor(mut self, constructor: ConstructorDescriptor) -> Self {
        self.descriptor.constructors.push(constructor);
        self
    }

    /// Register a direct instantiation used when no constructor is chosen
    #[must_use]
    pub fn instantiate_with<F>(mut self, instantiate: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.descriptor.instantiate = Some(Arc::new(move || Ok(Value::new(instantiate()))));
        self
    }

    /// Declare that `T` can stand in for the abstract type `I`
    #[must_use]
    pub fn implements<I: ?Sized + Send + Sync + 'static>(mut self, upcast: fn(Arc<T>) -> Arc<I>) -> Self {
        self.descriptor.upcasts.push(Upcast {
            target: TypeKey::of::<I>(),
            convert: Arc::new(move |value: &Value| {
                value.get::<T>().map(|concrete| Value::from_arc(upcast(concrete)))
            }),
        });
        self
    }

    /// Declare a method callable on an instance of `T`, returning an `R`
    #[must_use]
    pub fn instance_method<R, F>(mut self, name: &'static str, method: F) -> Self
    where
        R: ?Sized + 'static,
        F: Fn(&T, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        let owner = TypeKey::of::<T>();
        self.descriptor.methods.push(MethodDescriptor {
            name,
            returns: TypeKey::of::<R>(),
            receiver: Receiver::Instance,
            invoke: Arc::new(move |receiver, args| {
                let receiver = receiver.and_then(Value::get::<T>).ok_or_else(|| {
                    Error::construction(
                        owner.full_name(),
                        format!("method {name} requires a {} receiver", owner.short_name()),
                    )
                })?;
                method(&receiver, args)
            }),
        });
        self
    }

    /// Declare an associated function of `T`, returning an `R`
    #[must_use]
    pub fn static_method<R, F>(mut self, name: &'static str, method: F) -> Self
    where
        R: ?Sized + 'static,
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.descriptor.methods.push(MethodDescriptor {
            name,
            returns: TypeKey::of::<R>(),
            receiver: Receiver::Static,
            invoke: Arc::new(move |_, args| method(args)),
        });
        self
    }

    /// Finish the descriptor
    pub fn build(self) -> TypeDescriptor {
        self.descriptor
    }
}

impl<T: Default + Send + Sync + 'static> TypeBuilder<T> {
    /// Register `T::default()` as the direct instantiation
    #[must_use]
    pub fn with_default(self) -> Self {
        self.instantiate_with(T::default)
    }
}
