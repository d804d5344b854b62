use std::sync::Arc;

use activator_domain::{
    Error, MockingAdapter, Result, Rule, RuleContext, SuppliesInstance, TypeKey, Value,
};

/// Answer requests for the listed types with test doubles
///
/// Doubles come from a [`MockingAdapter`]. Without an adapter, or with one
/// whose backing library does not work, a matching request fails.
#[derive(Debug, Clone)]
pub struct CreateFromMock {
    targets: Vec<TypeKey>,
    arguments: Vec<Value>,
    adapter: Option<Arc<dyn MockingAdapter>>,
}

impl CreateFromMock {
    /// Double each of `targets`
    pub fn new<I: IntoIterator<Item = TypeKey>>(targets: I) -> Self {
        Self {
            targets: targets.into_iter().collect(),
            arguments: Vec::new(),
            adapter: None,
        }
    }

    /// Double `T`
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::new([TypeKey::of::<T>()])
    }

    /// Pass `arguments` to the adapter when creating a double
    #[must_use]
    pub fn with_arguments(mut self, arguments: Vec<Value>) -> Self {
        self.arguments = arguments;
        self
    }

    /// Use `adapter` to create doubles
    #[must_use]
    pub fn with_adapter(mut self, adapter: Arc<dyn MockingAdapter>) -> Self {
        self.adapter = Some(adapter);
        self
    }

    /// Doubled types
    pub fn targets(&self) -> &[TypeKey] {
        &self.targets
    }

    /// Configured adapter
    pub fn adapter(&self) -> Option<&Arc<dyn MockingAdapter>> {
        self.adapter.as_ref()
    }

    /// Whether `candidate` is a double created by this rule's adapter
    pub fn is_known_double(&self, candidate: &Value) -> bool {
        self.adapter
            .as_deref()
            .and_then(MockingAdapter::as_inspection)
            .is_some_and(|inspection| inspection.is_my_double(candidate))
    }
}

impl SuppliesInstance for CreateFromMock {
    fn supply(&self, request: &TypeKey, _ctx: &RuleContext<'_>) -> Result<Option<Value>> {
        if !self.targets.contains(request) {
            return Ok(None);
        }
        let adapter = self.adapter.as_ref().ok_or_else(|| {
            Error::mocking_library(format!(
                "no mocking adapter configured to double {}",
                request.full_name()
            ))
        })?;
        adapter.ensure_backing_library_works()?;
        Ok(adapter.create_double_or_none(request, &self.arguments))
    }
}

impl Rule for CreateFromMock {
    fn name(&self) -> &str {
        "create_from_mock"
    }

    fn as_instance_supplier(&self) -> Option<&dyn SuppliesInstance> {
        Some(self)
    }
}
