use activator_domain::{FindsConcreteType, FindsConcreteTypeByName, Rule, RuleContext, TypeKey};

use super::{scan_modules, scan_modules_by_name};

/// Look in one named code module
#[derive(Debug, Clone)]
pub struct FindInModule {
    module: String,
}

impl FindInModule {
    /// Search the code module called `module` (a crate name)
    pub fn new<S: Into<String>>(module: S) -> Self {
        Self {
            module: module.into(),
        }
    }

    /// Searched module
    pub fn module(&self) -> &str {
        &self.module
    }
}

impl FindsConcreteType for FindInModule {
    fn find_concrete_type(&self, request: &TypeKey, ctx: &RuleContext<'_>) -> Option<TypeKey> {
        scan_modules([self.module.as_str()], request, ctx.catalog)
    }
}

impl FindsConcreteTypeByName for FindInModule {
    fn find_concrete_type_by_name(&self, suffix: &str, ctx: &RuleContext<'_>) -> Option<TypeKey> {
        scan_modules_by_name([self.module.as_str()], suffix, ctx.catalog)
    }
}

impl Rule for FindInModule {
    fn name(&self) -> &str {
        "find_in_module"
    }

    fn as_type_finder(&self) -> Option<&dyn FindsConcreteType> {
        Some(self)
    }

    fn as_type_finder_by_name(&self) -> Option<&dyn FindsConcreteTypeByName> {
        Some(self)
    }
}
