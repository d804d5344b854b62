//! Declared Rule Registry
//!
//! A type can declare the rules to use whenever it is the search anchor.
//! Declarations are collected at compile time through a `linkme` slice and
//! picked up by [`crate::engine::ActivatorBuilder::anchor_with_declared_rules`].

use activator_domain::{Result, RuleHandle, TypeKey};
use tracing::debug;

/// Rules declared by one owner type
///
/// ```ignore
/// use activator_application::registry::{RULE_DECLARATIONS, RuleDeclaration};
///
/// #[linkme::distributed_slice(RULE_DECLARATIONS)]
/// static LEDGER_FIXTURE_RULES: RuleDeclaration = RuleDeclaration {
///     owner: TypeKey::of::<LedgerFixture>,
///     rules: || Ok(vec![Arc::new(FindInModule::new("storage"))]),
/// };
/// ```
pub struct RuleDeclaration {
    /// The declaring type
    pub owner: fn() -> TypeKey,
    /// Builds the declared rules, in order
    pub rules: fn() -> Result<Vec<RuleHandle>>,
}

/// Every rule declaration
#[linkme::distributed_slice]
pub static RULE_DECLARATIONS: [RuleDeclaration] = [..];

/// Rules declared by `owner`, in declaration order
///
/// Fails when a declaration cannot build its rules.
pub fn declared_rules_for(owner: &TypeKey) -> Result<Vec<RuleHandle>> {
    let mut rules = Vec::new();
    for declaration in RULE_DECLARATIONS.iter().filter(|d| (d.owner)() == *owner) {
        rules.extend((declaration.rules)()?);
    }
    debug!(owner = %owner, count = rules.len(), "Declared rules collected");
    Ok(rules)
}
