//! Constructor-selection rules
//!
//! Both choosers veto any constructor with a non-optional parameter whose
//! type is already waiting to be built, then order what is left: public
//! constructors first when `prefer_public` is set, then by parameter count,
//! ties broken by declaration order.

use std::cmp::Ordering;

use activator_domain::{
    ChoosesConstructor, ConstructorDescriptor, Rule, TypeDescriptor, TypeStack,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Preference {
    Most,
    Fewest,
}

fn choose<'d>(
    descriptor: &'d TypeDescriptor,
    stack: &TypeStack,
    prefer_public: bool,
    preference: Preference,
) -> Option<&'d ConstructorDescriptor> {
    descriptor
        .constructors()
        .iter()
        .enumerate()
        .filter(|(_, c)| !c.would_recurse(stack))
        .min_by(|(ia, a), (ib, b)| {
            let visibility = if prefer_public {
                b.is_public().cmp(&a.is_public())
            } else {
                Ordering::Equal
            };
            let arity = match preference {
                Preference::Most => b.arity().cmp(&a.arity()),
                Preference::Fewest => a.arity().cmp(&b.arity()),
            };
            visibility.then(arity).then(ia.cmp(ib))
        })
        .map(|(_, c)| c)
}

/// Prefer the constructor with the most parameters
#[derive(Debug, Clone, Copy)]
pub struct ConstructorWithMostParameters {
    /// Order public constructors before non-public ones
    pub prefer_public: bool,
}

impl ConstructorWithMostParameters {
    /// Create the rule, preferring public constructors
    pub fn new() -> Self {
        Self {
            prefer_public: true,
        }
    }

    /// Create the rule with an explicit visibility preference
    pub fn with_prefer_public(prefer_public: bool) -> Self {
        Self { prefer_public }
    }
}

impl Default for ConstructorWithMostParameters {
    fn default() -> Self {
        Self::new()
    }
}

impl ChoosesConstructor for ConstructorWithMostParameters {
    fn choose_constructor<'d>(
        &self,
        descriptor: &'d TypeDescriptor,
        stack: &TypeStack,
    ) -> Option<&'d ConstructorDescriptor> {
        choose(descriptor, stack, self.prefer_public, Preference::Most)
    }
}

impl Rule for ConstructorWithMostParameters {
    fn name(&self) -> &str {
        "constructor_with_most_parameters"
    }

    fn as_constructor_chooser(&self) -> Option<&dyn ChoosesConstructor> {
        Some(self)
    }
}

/// Prefer the constructor with the fewest parameters
#[derive(Debug, Clone, Copy)]
pub struct ConstructorWithFewestParameters {
    /// Order public constructors before non-public ones
    pub prefer_public: bool,
}

impl ConstructorWithFewestParameters {
    /// Create the rule, preferring public constructors
    pub fn new() -> Self {
        Self {
            prefer_public: true,
        }
    }

    /// Create the rule with an explicit visibility preference
    pub fn with_prefer_public(prefer_public: bool) -> Self {
        Self { prefer_public }
    }

    /// The chooser every rule set consults last
    pub fn terminal() -> Self {
        Self::with_prefer_public(false)
    }
}

impl Default for ConstructorWithFewestParameters {
    fn default() -> Self {
        Self::new()
    }
}

impl ChoosesConstructor for ConstructorWithFewestParameters {
    fn choose_constructor<'d>(
        &self,
        descriptor: &'d TypeDescriptor,
        stack: &TypeStack,
    ) -> Option<&'d ConstructorDescriptor> {
        choose(descriptor, stack, self.prefer_public, Preference::Fewest)
    }
}

impl Rule for ConstructorWithFewestParameters {
    fn name(&self) -> &str {
        "constructor_with_fewest_parameters"
    }

    fn as_constructor_chooser(&self) -> Option<&dyn ChoosesConstructor> {
        Some(self)
    }
}
