use std::sync::Arc;

use activator_domain::{Result, Rule, RuleContext, SuppliesInstance, Supplier, TypeKey, Value};

/// A pool of pre-built instances
///
/// A request is answered with the first pooled value that can stand in for
/// it. With supplier support on, a request for `Supplier<T>` is answered with
/// a closure returning a pooled `Arc<T>`. Values added through
/// [`ActivateInstances::with`] answer their own `Supplier<T>`; for any other
/// `T`, including abstract types and values added with
/// [`ActivateInstances::with_value`], declare it with
/// [`ActivateInstances::supplying`].
#[derive(Debug, Clone, Default)]
pub struct ActivateInstances {
    instances: Vec<Value>,
    suppliers: Vec<Value>,
    supplied: Vec<SuppliedType>,
    supply_suppliers: bool,
}

/// A `Supplier<T>` answered from any pooled value that stands in for `T`
#[derive(Clone, Copy)]
struct SuppliedType {
    supplier: TypeKey,
    target: TypeKey,
    wrap: fn(&Value) -> Option<Value>,
}

impl SuppliedType {
    fn of<T: ?Sized + Send + Sync + 'static>() -> Self {
        Self {
            supplier: TypeKey::of::<Supplier<T>>(),
            target: TypeKey::of::<T>(),
            wrap: wrap_supplier::<T>,
        }
    }
}

impl std::fmt::Debug for SuppliedType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SuppliedType").field(&self.supplier).finish()
    }
}

fn wrap_supplier<T: ?Sized + Send + Sync + 'static>(value: &Value) -> Option<Value> {
    let shared = value.get::<T>()?;
    Some(Value::new(Supplier::<T>::new(move || Arc::clone(&shared))))
}

impl ActivateInstances {
    /// An empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// A pool of already erased values
    pub fn from_values<I: IntoIterator<Item = Value>>(values: I) -> Self {
        Self {
            instances: values.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Add a shared instance, typed as `T`
    #[must_use]
    pub fn with<T: ?Sized + Send + Sync + 'static>(mut self, instance: Arc<T>) -> Self {
        let captured = Arc::clone(&instance);
        self.suppliers
            .push(Value::new(Supplier::<T>::new(move || Arc::clone(&captured))));
        self.instances.push(Value::from_arc(instance));
        self
    }

    /// Add an already erased value
    #[must_use]
    pub fn with_value(mut self, value: Value) -> Self {
        self.instances.push(value);
        self
    }

    /// Also answer `Supplier<T>` requests
    #[must_use]
    pub fn also_supply_suppliers(mut self) -> Self {
        self.supply_suppliers = true;
        self
    }

    /// Answer `Supplier<T>` from any pooled value that stands in for `T`
    ///
    /// Turns supplier support on.
    #[must_use]
    pub fn supplying<T: ?Sized + Send + Sync + 'static>(mut self) -> Self {
        self.supplied.push(SuppliedType::of::<T>());
        self.supply_suppliers = true;
        self
    }

    /// Pooled values, in insertion order
    pub fn instances(&self) -> &[Value] {
        &self.instances
    }

    /// Whether `Supplier<T>` requests are answered
    pub fn supplies_suppliers(&self) -> bool {
        self.supply_suppliers
    }
}

impl SuppliesInstance for ActivateInstances {
    fn supply(&self, request: &TypeKey, ctx: &RuleContext<'_>) -> Result<Option<Value>> {
        let pooled = self
            .instances
            .iter()
            .find_map(|value| ctx.catalog.coerce(value, request));
        if pooled.is_some() || !self.supply_suppliers {
            return Ok(pooled);
        }
        if let Some(supplier) = self.suppliers.iter().find(|s| s.type_key() == *request) {
            return Ok(Some(supplier.clone()));
        }
        Ok(self
            .supplied
            .iter()
            .filter(|supplied| supplied.supplier == *request)
            .find_map(|supplied| {
                self.instances
                    .iter()
                    .find_map(|value| ctx.catalog.coerce(value, &supplied.target))
                    .and_then(|value| (supplied.wrap)(&value))
            }))
    }
}

impl Rule for ActivateInstances {
    fn name(&self) -> &str {
        "activate_instances"
    }

    fn as_instance_supplier(&self) -> Option<&dyn SuppliesInstance> {
        Some(self)
    }
}
