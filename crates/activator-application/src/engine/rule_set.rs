//! Ordered rule collections

use std::fmt;

use activator_domain::{
    ChoosesConstructor, ConstructorDescriptor, Rule, RuleContext, RuleHandle, SuppliesInstance,
    TypeDescriptor, TypeKey, TypeStack,
};
use activator_rules::{ConstructorWithFewestParameters, default_pipeline};

/// Ordered sequence of rules
///
/// For every capability the rules are asked in order and the first answer
/// wins. Constructor choice always ends with a fewest-parameters chooser
/// that ignores visibility, so a type with any acceptable constructor can be
/// built regardless of the configured rules.
#[derive(Clone, Default)]
pub struct RuleSet {
    rules: Vec<RuleHandle>,
}

impl RuleSet {
    /// A rule set of `rules`, in order
    pub fn new(rules: Vec<RuleHandle>) -> Self {
        Self { rules }
    }

    /// The default pipeline
    pub fn defaults() -> Self {
        Self::new(default_pipeline())
    }

    /// `rules` followed by the default pipeline
    pub fn from_defaults_and(rules: Vec<RuleHandle>) -> Self {
        let mut set = Self::new(rules);
        set.extend(default_pipeline());
        set
    }

    /// Append a rule
    pub fn push(&mut self, rule: RuleHandle) {
        self.rules.push(rule);
    }

    /// The rules, in order
    pub fn rules(&self) -> &[RuleHandle] {
        &self.rules
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set holds no rule
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules able to supply instances, in order
    pub fn instance_suppliers(&self) -> impl Iterator<Item = (&dyn Rule, &dyn SuppliesInstance)> {
        self.rules
            .iter()
            .filter_map(|rule| rule.as_instance_supplier().map(|supplier| (rule.as_ref(), supplier)))
    }

    /// First concrete type any type-search rule finds for `request`
    pub fn find_concrete_type(&self, request: &TypeKey, ctx: &RuleContext<'_>) -> Option<TypeKey> {
        self.rules
            .iter()
            .filter_map(|rule| rule.as_type_finder())
            .find_map(|finder| finder.find_concrete_type(request, ctx))
    }

    /// First concrete type any search-by-name rule finds for `suffix`
    pub fn find_concrete_type_by_name(&self, suffix: &str, ctx: &RuleContext<'_>) -> Option<TypeKey> {
        self.rules
            .iter()
            .filter_map(|rule| rule.as_type_finder_by_name())
            .find_map(|finder| finder.find_concrete_type_by_name(suffix, ctx))
    }

    /// Constructor chosen by the first chooser with an answer
    pub fn choose_constructor<'d>(
        &self,
        descriptor: &'d TypeDescriptor,
        stack: &TypeStack,
    ) -> Option<&'d ConstructorDescriptor> {
        self.rules
            .iter()
            .filter_map(|rule| rule.as_constructor_chooser())
            .find_map(|chooser| chooser.choose_constructor(descriptor, stack))
            .or_else(|| ConstructorWithFewestParameters::terminal().choose_constructor(descriptor, stack))
    }
}

impl Extend<RuleHandle> for RuleSet {
    fn extend<I: IntoIterator<Item = RuleHandle>>(&mut self, iter: I) {
        self.rules.extend(iter);
    }
}

impl FromIterator<RuleHandle> for RuleSet {
    fn from_iter<I: IntoIterator<Item = RuleHandle>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.rules.iter().map(|rule| rule.name()))
            .finish()
    }
}
