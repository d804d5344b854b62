use activator_domain::constants::DEFAULT_IGNORED_MODULES;
use activator_domain::{FindsConcreteType, FindsConcreteTypeByName, Rule, RuleContext, TypeKey};

use super::{scan_modules, scan_modules_by_name};

/// Look in every code module the catalog knows, skipping ignored ones
///
/// A module is skipped when its name starts with any ignore-list entry.
#[derive(Debug, Clone)]
pub struct FindInBaseLocation {
    ignore: Vec<String>,
}

impl FindInBaseLocation {
    /// Create the rule with the default ignore list
    pub fn new() -> Self {
        Self::ignoring(DEFAULT_IGNORED_MODULES.iter().copied())
    }

    /// Create the rule with a custom ignore list
    pub fn ignoring<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ignore: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Module name prefixes that are skipped
    pub fn ignored(&self) -> &[String] {
        &self.ignore
    }

    fn searched_modules(&self, ctx: &RuleContext<'_>) -> Vec<&'static str> {
        ctx.catalog
            .modules()
            .into_iter()
            .filter(|module| !self.ignore.iter().any(|prefix| module.starts_with(prefix.as_str())))
            .collect()
    }
}

impl Default for FindInBaseLocation {
    fn default() -> Self {
        Self::new()
    }
}

impl FindsConcreteType for FindInBaseLocation {
    fn find_concrete_type(&self, request: &TypeKey, ctx: &RuleContext<'_>) -> Option<TypeKey> {
        scan_modules(self.searched_modules(ctx), request, ctx.catalog)
    }
}

impl FindsConcreteTypeByName for FindInBaseLocation {
    fn find_concrete_type_by_name(&self, suffix: &str, ctx: &RuleContext<'_>) -> Option<TypeKey> {
        scan_modules_by_name(self.searched_modules(ctx), suffix, ctx.catalog)
    }
}

impl Rule for FindInBaseLocation {
    fn name(&self) -> &str {
        "find_in_base_location"
    }

    fn as_type_finder(&self) -> Option<&dyn FindsConcreteType> {
        Some(self)
    }

    fn as_type_finder_by_name(&self) -> Option<&dyn FindsConcreteTypeByName> {
        Some(self)
    }
}
