use activator_domain::{
    Error, MethodDescriptor, Receiver, Result, Rule, RuleContext, SuppliesInstance, TypeCatalog,
    TypeDescriptor, TypeKey, Value, catch_construction_panic,
};
use tracing::debug;

/// Build the target type by calling a named method
///
/// The method lives on an explicit factory type, or, without one, on the
/// search anchor. With a factory type the method is validated when the rule
/// is created; anchor methods are validated on first use. Fixed arguments are
/// passed to the method as given.
#[derive(Debug, Clone)]
pub struct CreateFromFactoryMethod {
    target: TypeKey,
    factory: Option<TypeKey>,
    method: String,
    arguments: Vec<Value>,
}

impl CreateFromFactoryMethod {
    /// Build `target` with `factory::method(arguments)`
    ///
    /// Fails with a configuration error when the factory type is unknown,
    /// has no such method, or the method's return type cannot stand in for
    /// the target.
    pub fn new(
        target: TypeKey,
        factory: TypeKey,
        method: impl Into<String>,
        arguments: Vec<Value>,
        catalog: &dyn TypeCatalog,
    ) -> Result<Self> {
        let rule = Self {
            target,
            factory: Some(factory),
            method: method.into(),
            arguments,
        };
        let descriptor = rule.describe_factory(&factory, catalog)?;
        rule.ensure_method(&descriptor, catalog)?;
        Ok(rule)
    }

    /// Typed form of [`CreateFromFactoryMethod::new`]
    pub fn of<T: ?Sized + 'static, F: ?Sized + 'static>(
        method: impl Into<String>,
        arguments: Vec<Value>,
        catalog: &dyn TypeCatalog,
    ) -> Result<Self> {
        Self::new(TypeKey::of::<T>(), TypeKey::of::<F>(), method, arguments, catalog)
    }

    /// Build `target` with a method on the search anchor
    pub fn on_anchor(target: TypeKey, method: impl Into<String>, arguments: Vec<Value>) -> Self {
        Self {
            target,
            factory: None,
            method: method.into(),
            arguments,
        }
    }

    /// Target type
    pub fn target(&self) -> TypeKey {
        self.target
    }

    fn describe_factory(
        &self,
        factory: &TypeKey,
        catalog: &dyn TypeCatalog,
    ) -> Result<std::sync::Arc<TypeDescriptor>> {
        catalog.describe(factory).ok_or_else(|| {
            Error::configuration(format!(
                "CreateFromFactoryMethod({}, {}, {}): {} is not in the type catalog",
                self.target.short_name(),
                factory.short_name(),
                self.method,
                factory.full_name()
            ))
        })
    }

    fn ensure_method(&self, descriptor: &TypeDescriptor, catalog: &dyn TypeCatalog) -> Result<MethodDescriptor> {
        let method = descriptor.method(&self.method).ok_or_else(|| {
            Error::configuration(format!(
                "CreateFromFactoryMethod({}, {}): there is no method {}::{}",
                self.target.short_name(),
                self.method,
                descriptor.key().full_name(),
                self.method
            ))
        })?;
        if !catalog.is_assignable(&method.returns(), &self.target) {
            return Err(Error::configuration(format!(
                "CreateFromFactoryMethod({}, {}, {}) doesn't work because the return type {} is not assignable to {}",
                self.target.short_name(),
                descriptor.key().short_name(),
                self.method,
                method.returns().full_name(),
                self.target.full_name()
            )));
        }
        Ok(method.clone())
    }
}

impl SuppliesInstance for CreateFromFactoryMethod {
    fn supply(&self, request: &TypeKey, ctx: &RuleContext<'_>) -> Result<Option<Value>> {
        if *request != self.target {
            return Ok(None);
        }
        let (method, receiver) = match (&self.factory, ctx.anchor) {
            (Some(factory), _) => {
                let descriptor = self.describe_factory(factory, ctx.catalog)?;
                let method = self.ensure_method(&descriptor, ctx.catalog)?;
                let receiver = match method.receiver() {
                    Receiver::Static => None,
                    Receiver::Instance => {
                        let built = ctx.resolver.resolve_within(factory, ctx.stack)?;
                        Some(built.ok_or_else(|| {
                            Error::construction(
                                self.target.full_name(),
                                format!("factory {} could not be built", factory.full_name()),
                            )
                        })?)
                    }
                };
                (method, receiver)
            }
            (None, Some(anchor)) => {
                let descriptor = self.describe_factory(&anchor.type_key(), ctx.catalog)?;
                let method = self.ensure_method(&descriptor, ctx.catalog)?;
                (method, Some(anchor.value().clone()))
            }
            (None, None) => {
                return Err(Error::configuration(format!(
                    "CreateFromFactoryMethod({}, {}) has no factory type and no search anchor was given",
                    self.target.short_name(),
                    self.method
                )));
            }
        };
        debug!(target_type = %self.target, method = %self.method, "Invoking factory method");
        let produced = catch_construction_panic(self.target.full_name(), || {
            method.invoke(receiver.as_ref(), &self.arguments)
        })?;
        ctx.catalog
            .coerce(&produced, &self.target)
            .map(Some)
            .ok_or_else(|| Error::not_assignable(produced.type_key().full_name(), self.target.full_name()))
    }
}

impl Rule for CreateFromFactoryMethod {
    fn name(&self) -> &str {
        "create_from_factory_method"
    }

    fn as_instance_supplier(&self) -> Option<&dyn SuppliesInstance> {
        Some(self)
    }
}
