//! Engine configuration

use std::sync::Arc;

use activator_domain::constants::DEFAULT_RECURSION_LIMIT;
use activator_domain::{Result, RuleHandle, SearchAnchor, TypeCatalog, TypeKey, Value};
use activator_rules::{ActivateInstances, DefaultRules};
use tracing::debug;

use super::{AnythingActivator, RecursionFallback, RuleSet, zero_value_fallback};
use crate::catalog::LinkedTypeCatalog;
use crate::registry::declared_rules_for;

/// Builder for [`AnythingActivator`]
///
/// Rules end up in this order: explicit rules, the instance pool, rules
/// declared by the anchor type, then the default pipeline (a fresh
/// [`DefaultRules`] unless a shared set is given).
pub struct ActivatorBuilder {
    rules: Vec<RuleHandle>,
    pool: Option<ActivateInstances>,
    anchor: Option<SearchAnchor>,
    use_declared_rules: bool,
    include_default_rules: bool,
    default_rules: DefaultRules,
    shared_defaults: Option<RuleSet>,
    recursion_limit: usize,
    fallback: RecursionFallback,
    catalog: Option<Arc<dyn TypeCatalog>>,
}

impl ActivatorBuilder {
    /// A builder with default settings
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            pool: None,
            anchor: None,
            use_declared_rules: false,
            include_default_rules: true,
            default_rules: DefaultRules::new(),
            shared_defaults: None,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
            fallback: zero_value_fallback(),
            catalog: None,
        }
    }

    /// Append a rule
    #[must_use]
    pub fn rule(mut self, rule: RuleHandle) -> Self {
        self.rules.push(rule);
        self
    }

    /// Append several rules, in order
    #[must_use]
    pub fn rules<I: IntoIterator<Item = RuleHandle>>(mut self, rules: I) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Add a shared instance to the pool
    #[must_use]
    pub fn instance<T: ?Sized + Send + Sync + 'static>(mut self, instance: Arc<T>) -> Self {
        self.pool = Some(self.pool.take().unwrap_or_default().with(instance));
        self
    }

    /// Add an erased value to the pool
    #[must_use]
    pub fn instance_value(mut self, value: Value) -> Self {
        self.pool = Some(self.pool.take().unwrap_or_default().with_value(value));
        self
    }

    /// Let the pool answer `Supplier<T>` requests too
    ///
    /// Only instances added with [`ActivatorBuilder::instance`] answer their
    /// own `Supplier<T>` this way. Use [`ActivatorBuilder::supplier_of`] for
    /// abstract `T` or for values added with
    /// [`ActivatorBuilder::instance_value`].
    #[must_use]
    pub fn supply_suppliers(mut self) -> Self {
        self.pool = Some(self.pool.take().unwrap_or_default().also_supply_suppliers());
        self
    }

    /// Answer `Supplier<T>` from any pooled value that stands in for `T`
    #[must_use]
    pub fn supplier_of<T: ?Sized + Send + Sync + 'static>(mut self) -> Self {
        self.pool = Some(self.pool.take().unwrap_or_default().supplying::<T>());
        self
    }

    /// Set the search anchor
    #[must_use]
    pub fn anchor(mut self, anchor: SearchAnchor) -> Self {
        self.anchor = Some(anchor);
        self
    }

    /// Set the search anchor and use the rules its type declares
    #[must_use]
    pub fn anchor_with_declared_rules(mut self, anchor: SearchAnchor) -> Self {
        self.anchor = Some(anchor);
        self.use_declared_rules = true;
        self
    }

    /// Whether to append the default pipeline (on by default)
    #[must_use]
    pub fn include_default_rules(mut self, include: bool) -> Self {
        self.include_default_rules = include;
        self
    }

    /// Replace the default pipeline with a customised one
    #[must_use]
    pub fn default_rules(mut self, default_rules: DefaultRules) -> Self {
        self.default_rules = default_rules;
        self.shared_defaults = None;
        self
    }

    /// Use the rules of an existing set as the default pipeline
    #[must_use]
    pub fn shared_default_rules(mut self, rules: &RuleSet) -> Self {
        self.shared_defaults = Some(rules.clone());
        self
    }

    /// Maximum depth of the resolution chain
    #[must_use]
    pub fn recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = limit;
        self
    }

    /// Value returned in place of a request beyond the recursion limit
    #[must_use]
    pub fn recursion_fallback<F>(mut self, fallback: F) -> Self
    where
        F: Fn(&TypeKey, &dyn TypeCatalog) -> Option<Value> + Send + Sync + 'static,
    {
        self.fallback = Arc::new(fallback);
        self
    }

    /// Type catalog to use; defaults to [`LinkedTypeCatalog`]
    #[must_use]
    pub fn catalog(mut self, catalog: Arc<dyn TypeCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Build the engine
    ///
    /// Fails when a rule declaration of the anchor type cannot build its
    /// rules.
    pub fn build(self) -> Result<AnythingActivator> {
        let mut rules = RuleSet::new(self.rules);
        if let Some(pool) = self.pool {
            rules.push(Arc::new(pool));
        }
        if self.use_declared_rules
            && let Some(anchor) = &self.anchor
        {
            rules.extend(declared_rules_for(&anchor.type_key())?);
        }
        if self.include_default_rules {
            match self.shared_defaults {
                Some(shared) => rules.extend(shared.rules().iter().cloned()),
                None => rules.extend(self.default_rules.into_pipeline()),
            }
        }
        let catalog = self
            .catalog
            .unwrap_or_else(|| Arc::new(LinkedTypeCatalog::new()));
        debug!(rules = ?rules, recursion_limit = self.recursion_limit, "Activator built");
        Ok(AnythingActivator::from_parts(
            rules,
            catalog,
            self.anchor,
            self.recursion_limit,
            self.fallback,
        ))
    }
}

impl Default for ActivatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
