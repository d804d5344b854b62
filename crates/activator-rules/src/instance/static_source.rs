use activator_domain::{
    Error, Receiver, Result, Rule, RuleContext, SuppliesInstance, TypeKey, Value,
    catch_construction_panic,
};

/// Answer with the value of a named associated function on a source type
///
/// The function is looked up in the source type's descriptor and called
/// without receiver or arguments each time a matching request arrives. A
/// missing source type or function is a configuration error.
#[derive(Debug, Clone)]
pub struct ActivateUsingStatic {
    required: TypeKey,
    source: TypeKey,
    member: String,
}

impl ActivateUsingStatic {
    /// Answer requests for `T` with `S::member()`
    pub fn new<T: ?Sized + 'static, S: ?Sized + 'static>(member: impl Into<String>) -> Self {
        Self::between(TypeKey::of::<T>(), TypeKey::of::<S>(), member)
    }

    /// Answer requests for `required` with `source::member()`
    pub fn between(required: TypeKey, source: TypeKey, member: impl Into<String>) -> Self {
        Self {
            required,
            source,
            member: member.into(),
        }
    }
}

impl SuppliesInstance for ActivateUsingStatic {
    fn supply(&self, request: &TypeKey, ctx: &RuleContext<'_>) -> Result<Option<Value>> {
        if !ctx.catalog.is_assignable(&self.required, request) {
            return Ok(None);
        }
        let method = ctx
            .catalog
            .describe(&self.source)
            .and_then(|d| d.method(&self.member).cloned())
            .filter(|m| m.receiver() == Receiver::Static)
            .ok_or_else(|| {
                Error::configuration(format!(
                    "ActivateUsingStatic({}, {}, {}): there is no associated function {}::{}",
                    self.required.short_name(),
                    self.source.short_name(),
                    self.member,
                    self.source.full_name(),
                    self.member
                ))
            })?;
        let value = catch_construction_panic(request.full_name(), || method.invoke(None, &[]))?;
        ctx.catalog
            .coerce(&value, request)
            .map(Some)
            .ok_or_else(|| Error::not_assignable(value.type_key().full_name(), request.full_name()))
    }
}

impl Rule for ActivateUsingStatic {
    fn name(&self) -> &str {
        "activate_using_static"
    }

    fn as_instance_supplier(&self) -> Option<&dyn SuppliesInstance> {
        Some(self)
    }
}
