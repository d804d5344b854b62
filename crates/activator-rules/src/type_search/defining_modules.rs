use activator_domain::{FindsConcreteType, Rule, RuleContext, TypeKey};

use super::{code_module_of_type, scan_modules};

/// Look in the code module defining the request and in those defining every
/// type waiting to be built
///
/// Has no search-by-name capability: a bare name carries no defining module.
#[derive(Debug, Clone, Copy, Default)]
pub struct FindInDefiningModules;

impl FindInDefiningModules {
    /// Create the rule
    pub fn new() -> Self {
        Self
    }
}

impl FindsConcreteType for FindInDefiningModules {
    fn find_concrete_type(&self, request: &TypeKey, ctx: &RuleContext<'_>) -> Option<TypeKey> {
        let mut modules = vec![code_module_of_type(request, ctx.catalog)];
        for key in ctx.stack {
            let module = code_module_of_type(key, ctx.catalog);
            if !modules.contains(&module) {
                modules.push(module);
            }
        }
        scan_modules(modules, request, ctx.catalog)
    }
}

impl Rule for FindInDefiningModules {
    fn name(&self) -> &str {
        "find_in_defining_modules"
    }

    fn as_type_finder(&self) -> Option<&dyn FindsConcreteType> {
        Some(self)
    }
}
