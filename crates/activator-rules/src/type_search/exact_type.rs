use activator_domain::{FindsConcreteType, FindsConcreteTypeByName, Rule, RuleContext, TypeKey};

/// Literal mapping from a requested type to the type to build instead
///
/// By name, the rule answers when the name equals the short or full name of
/// the required type. Trait objects also match on the bare trait name, so
/// `Store` finds a mapping for `dyn Store`.
#[derive(Debug, Clone, Copy)]
pub struct ChooseExactType {
    required: TypeKey,
    substitute: TypeKey,
}

impl ChooseExactType {
    /// Build `U` whenever `T` is requested
    pub fn new<T: ?Sized + 'static, U: ?Sized + 'static>() -> Self {
        Self::between(TypeKey::of::<T>(), TypeKey::of::<U>())
    }

    /// Build `substitute` whenever `required` is requested
    pub fn between(required: TypeKey, substitute: TypeKey) -> Self {
        Self {
            required,
            substitute,
        }
    }
}

impl FindsConcreteType for ChooseExactType {
    fn find_concrete_type(&self, request: &TypeKey, _ctx: &RuleContext<'_>) -> Option<TypeKey> {
        (*request == self.required).then_some(self.substitute)
    }
}

impl FindsConcreteTypeByName for ChooseExactType {
    fn find_concrete_type_by_name(&self, suffix: &str, _ctx: &RuleContext<'_>) -> Option<TypeKey> {
        let short = self.required.short_name();
        let matches = short == suffix
            || short.strip_prefix("dyn ") == Some(suffix)
            || self.required.full_name() == suffix;
        matches.then_some(self.substitute)
    }
}

impl Rule for ChooseExactType {
    fn name(&self) -> &str {
        "choose_exact_type"
    }

    fn as_type_finder(&self) -> Option<&dyn FindsConcreteType> {
        Some(self)
    }

    fn as_type_finder_by_name(&self) -> Option<&dyn FindsConcreteTypeByName> {
        Some(self)
    }
}
