use activator_domain::{FindsConcreteType, FindsConcreteTypeByName, Rule, RuleContext, TypeKey};

use super::{anchor_module, scan_modules, scan_modules_by_name};

/// Look only in the code module of the search anchor
///
/// Finds nothing when no anchor was given.
#[derive(Debug, Clone, Copy, Default)]
pub struct FindInAnchorModule;

impl FindInAnchorModule {
    /// Create the rule
    pub fn new() -> Self {
        Self
    }
}

impl FindsConcreteType for FindInAnchorModule {
    fn find_concrete_type(&self, request: &TypeKey, ctx: &RuleContext<'_>) -> Option<TypeKey> {
        let module = anchor_module(ctx)?;
        scan_modules([module], request, ctx.catalog)
    }
}

impl FindsConcreteTypeByName for FindInAnchorModule {
    fn find_concrete_type_by_name(&self, suffix: &str, ctx: &RuleContext<'_>) -> Option<TypeKey> {
        let module = anchor_module(ctx)?;
        scan_modules_by_name([module], suffix, ctx.catalog)
    }
}

impl Rule for FindInAnchorModule {
    fn name(&self) -> &str {
        "find_in_anchor_module"
    }

    fn as_type_finder(&self) -> Option<&dyn FindsConcreteType> {
        Some(self)
    }

    fn as_type_finder_by_name(&self) -> Option<&dyn FindsConcreteTypeByName> {
        Some(self)
    }
}
