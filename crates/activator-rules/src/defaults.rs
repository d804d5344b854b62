//! The default rule pipeline
//!
//! Type search in the modules defining the request, then the anchor's
//! module, then every module in the catalog; constructor choice by most
//! parameters, then fewest.

use std::sync::Arc;

use activator_domain::{
    ChoosesConstructor, ConstructorDescriptor, FindsConcreteType, FindsConcreteTypeByName, Rule,
    RuleContext, RuleHandle, TypeDescriptor, TypeKey, TypeStack,
};

use crate::constructor::{ConstructorWithFewestParameters, ConstructorWithMostParameters};
use crate::type_search::{FindInAnchorModule, FindInBaseLocation, FindInDefiningModules};

/// The default pipeline as a single composite rule
///
/// Exposes type search, type search by name and constructor choice, each
/// answering with the first of its parts that finds something.
#[derive(Debug, Clone)]
pub struct DefaultRules {
    defining_modules: FindInDefiningModules,
    anchor_module: FindInAnchorModule,
    base_location: FindInBaseLocation,
    most_parameters: ConstructorWithMostParameters,
    fewest_parameters: ConstructorWithFewestParameters,
}

impl DefaultRules {
    /// The default pipeline with default settings
    pub fn new() -> Self {
        Self {
            defining_modules: FindInDefiningModules::new(),
            anchor_module: FindInAnchorModule::new(),
            base_location: FindInBaseLocation::new(),
            most_parameters: ConstructorWithMostParameters::new(),
            fewest_parameters: ConstructorWithFewestParameters::new(),
        }
    }

    /// Skip these module prefixes in the base-location scan
    #[must_use]
    pub fn ignoring<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.base_location = FindInBaseLocation::ignoring(prefixes);
        self
    }

    /// Set the visibility preference of both constructor choosers
    #[must_use]
    pub fn prefer_public(mut self, prefer_public: bool) -> Self {
        self.most_parameters.prefer_public = prefer_public;
        self.fewest_parameters.prefer_public = prefer_public;
        self
    }

    /// The parts as separate rules, in pipeline order
    pub fn into_pipeline(self) -> Vec<RuleHandle> {
        vec![
            Arc::new(self.defining_modules),
            Arc::new(self.anchor_module),
            Arc::new(self.base_location),
            Arc::new(self.most_parameters),
            Arc::new(self.fewest_parameters),
        ]
    }
}

impl Default for DefaultRules {
    fn default() -> Self {
        Self::new()
    }
}

/// The default pipeline as separate rules
pub fn default_pipeline() -> Vec<RuleHandle> {
    DefaultRules::new().into_pipeline()
}

impl FindsConcreteType for DefaultRules {
    fn find_concrete_type(&self, request: &TypeKey, ctx: &RuleContext<'_>) -> Option<TypeKey> {
        self.defining_modules
            .find_concrete_type(request, ctx)
            .or_else(|| self.anchor_module.find_concrete_type(request, ctx))
            .or_else(|| self.base_location.find_concrete_type(request, ctx))
    }
}

impl FindsConcreteTypeByName for DefaultRules {
    fn find_concrete_type_by_name(&self, suffix: &str, ctx: &RuleContext<'_>) -> Option<TypeKey> {
        self.anchor_module
            .find_concrete_type_by_name(suffix, ctx)
            .or_else(|| self.base_location.find_concrete_type_by_name(suffix, ctx))
    }
}

impl ChoosesConstructor for DefaultRules {
    fn choose_constructor<'d>(
        &self,
        descriptor: &'d TypeDescriptor,
        stack: &TypeStack,
    ) -> Option<&'d ConstructorDescriptor> {
        self.most_parameters
            .choose_constructor(descriptor, stack)
            .or_else(|| self.fewest_parameters.choose_constructor(descriptor, stack))
    }
}

impl Rule for DefaultRules {
    fn name(&self) -> &str {
        "default_rules"
    }

    fn as_type_finder(&self) -> Option<&dyn FindsConcreteType> {
        Some(self)
    }

    fn as_type_finder_by_name(&self) -> Option<&dyn FindsConcreteTypeByName> {
        Some(self)
    }

    fn as_constructor_chooser(&self) -> Option<&dyn ChoosesConstructor> {
        Some(self)
    }
}
