use std::sync::Arc;

use activator_domain::{Result, Rule, RuleContext, SuppliesInstance, TypeKey, Value};

/// Always answer with one fixed value
///
/// Any request the value can stand in for is answered with it, so the same
/// instance shows up wherever it is needed in the graph.
#[derive(Debug, Clone)]
pub struct ActivateForType {
    value: Value,
}

impl ActivateForType {
    /// Answer with `value`, typed as `T`
    pub fn new<T: ?Sized + Send + Sync + 'static>(value: Arc<T>) -> Self {
        Self::from_value(Value::from_arc(value))
    }

    /// Answer with an already erased value
    pub fn from_value(value: Value) -> Self {
        Self { value }
    }

    /// The fixed value
    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl SuppliesInstance for ActivateForType {
    fn supply(&self, request: &TypeKey, ctx: &RuleContext<'_>) -> Result<Option<Value>> {
        Ok(ctx.catalog.coerce(&self.value, request))
    }
}

impl Rule for ActivateForType {
    fn name(&self) -> &str {
        "activate_for_type"
    }

    fn as_instance_supplier(&self) -> Option<&dyn SuppliesInstance> {
        Some(self)
    }
}
