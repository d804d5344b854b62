//! Resolution engine
//!
//! A request walks through the rule set: instance-supply rules first, then
//! type search for abstract types, then synthesized values for text and
//! value kinds, then constructor choice and recursive resolution of every
//! constructor parameter.

mod activator;
mod builder;
mod rule_set;

pub use activator::{AnythingActivator, RecursionFallback, zero_value_fallback};
pub use builder::ActivatorBuilder;
pub use rule_set::RuleSet;
