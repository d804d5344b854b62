//! The resolution engine

use std::cell::{Cell, RefCell};
use std::fmt::{self, Write as _};
use std::sync::Arc;

use activator_domain::constants::TEXT_VALUE_PREFIX;
use activator_domain::{
    ActivationKind, ActivationRecord, Arguments, Error, ErrorRecord, NameFormat, Resolver, Result,
    RuleContext, SearchAnchor, TypeCatalog, TypeDescriptor, TypeKey, TypeKind, TypeStack, Value,
    catch_construction_panic,
};
use serde::Serialize;
use tracing::{debug, trace, warn};

use super::{ActivatorBuilder, RuleSet};

/// Produces the value returned when the chain gets too deep
pub type RecursionFallback = Arc<dyn Fn(&TypeKey, &dyn TypeCatalog) -> Option<Value> + Send + Sync>;

/// Default fallback: the zero value of value kinds, absence otherwise
pub fn zero_value_fallback() -> RecursionFallback {
    Arc::new(|request: &TypeKey, catalog: &dyn TypeCatalog| {
        catalog.describe(request).and_then(|d| d.zero_value())
    })
}

#[derive(Serialize)]
struct Diagnostics<'a> {
    activations: &'a [ActivationRecord],
    errors: &'a [ErrorRecord],
}

/// Builds object graphs for requested types
///
/// Each top-level request resets the diagnostics, which then describe how
/// the last graph was built: one activation record per node, in the order
/// nodes were completed, and one error record per failure that was
/// swallowed. Configuration errors are never swallowed.
pub struct AnythingActivator {
    rules: RuleSet,
    catalog: Arc<dyn TypeCatalog>,
    anchor: Option<SearchAnchor>,
    recursion_limit: usize,
    fallback: RecursionFallback,
    last_activation_tree: Vec<ActivationRecord>,
    last_errors: Vec<ErrorRecord>,
}

impl AnythingActivator {
    pub(super) fn from_parts(
        rules: RuleSet,
        catalog: Arc<dyn TypeCatalog>,
        anchor: Option<SearchAnchor>,
        recursion_limit: usize,
        fallback: RecursionFallback,
    ) -> Self {
        Self {
            rules,
            catalog,
            anchor,
            recursion_limit,
            fallback,
            last_activation_tree: Vec::new(),
            last_errors: Vec::new(),
        }
    }

    /// Start configuring an engine
    pub fn builder() -> ActivatorBuilder {
        ActivatorBuilder::new()
    }

    /// Build a `T`, or `None` when it could not be built
    pub fn resolve<T: ?Sized + 'static>(&mut self) -> Result<Option<Arc<T>>> {
        let value = self.resolve_type(&TypeKey::of::<T>())?;
        Ok(value.and_then(|v| v.get::<T>()))
    }

    /// Build a `T`, failing with the recorded errors when it could not be
    /// built
    pub fn try_resolve<T: ?Sized + 'static>(&mut self) -> Result<Arc<T>> {
        let key = TypeKey::of::<T>();
        match self.resolve::<T>()? {
            Some(value) => Ok(value),
            None => Err(Error::unresolvable(
                key.full_name(),
                self.last_errors.iter().map(|e| e.error().to_string()).collect(),
            )),
        }
    }

    /// Build a value of the type identified by `key`
    pub fn resolve_type(&mut self, key: &TypeKey) -> Result<Option<Value>> {
        debug!(request = %key, "Resolving");
        let session = self.session();
        let result = session.build(key, &TypeStack::new());
        let records = session.into_records();
        self.keep(records);
        result
    }

    /// Build a value of the concrete type whose full name ends with `suffix`
    ///
    /// The type is located by the search-by-name rules, anchor-relative
    /// ones included.
    pub fn resolve_named(&mut self, suffix: &str) -> Result<Option<Value>> {
        debug!(suffix, "Resolving by name");
        let session = self.session();
        let stack = TypeStack::new();
        let found = self
            .rules
            .find_concrete_type_by_name(suffix, &session.context(&stack));
        let result = match found {
            Some(key) => session.build(&key, &stack),
            None => {
                session.record_error(
                    ActivationRecord::new(ActivationKind::AbstractSubstitution, &[]),
                    &Error::no_concrete_type(suffix),
                );
                Ok(None)
            }
        };
        let records = session.into_records();
        self.keep(records);
        result
    }

    /// Activation records of the last resolution
    pub fn last_activation_tree(&self) -> &[ActivationRecord] {
        &self.last_activation_tree
    }

    /// Errors swallowed during the last resolution
    pub fn last_errors(&self) -> &[ErrorRecord] {
        &self.last_errors
    }

    /// Human-readable account of the last resolution
    pub fn diagnostics_report(&self, names: NameFormat) -> String {
        let mut report = String::new();
        for record in &self.last_activation_tree {
            let _ = writeln!(report, "{}", record.render(names));
        }
        if !self.last_errors.is_empty() {
            report.push_str("Errors:\n");
            for error in &self.last_errors {
                let _ = writeln!(report, "{} : {}", error.context().render(names), error.error());
            }
        }
        report
    }

    /// The last resolution's diagnostics as JSON
    pub fn diagnostics_json(&self) -> Result<serde_json::Value> {
        serde_json::to_value(Diagnostics {
            activations: &self.last_activation_tree,
            errors: &self.last_errors,
        })
        .map_err(|e| Error::internal(format!("Failed to serialize diagnostics: {e}")))
    }

    /// Configured rules
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Configured anchor
    pub fn anchor(&self) -> Option<&SearchAnchor> {
        self.anchor.as_ref()
    }

    /// Maximum depth of the resolution chain
    pub fn recursion_limit(&self) -> usize {
        self.recursion_limit
    }

    /// Type catalog in use
    pub fn catalog(&self) -> &Arc<dyn TypeCatalog> {
        &self.catalog
    }

    fn session(&self) -> Session<'_> {
        Session {
            rules: &self.rules,
            catalog: self.catalog.as_ref(),
            anchor: self.anchor.as_ref(),
            recursion_limit: self.recursion_limit,
            fallback: &self.fallback,
            depth: Cell::new(0),
            activations: RefCell::new(Vec::new()),
            errors: RefCell::new(Vec::new()),
        }
    }

    fn keep(&mut self, (activations, errors): (Vec<ActivationRecord>, Vec<ErrorRecord>)) {
        self.last_activation_tree = activations;
        self.last_errors = errors;
    }
}

impl fmt::Debug for AnythingActivator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnythingActivator")
            .field("rules", &self.rules)
            .field("anchor", &self.anchor)
            .field("recursion_limit", &self.recursion_limit)
            .finish_non_exhaustive()
    }
}

/// State of one top-level resolution
struct Session<'e> {
    rules: &'e RuleSet,
    catalog: &'e dyn TypeCatalog,
    anchor: Option<&'e SearchAnchor>,
    recursion_limit: usize,
    fallback: &'e RecursionFallback,
    depth: Cell<usize>,
    activations: RefCell<Vec<ActivationRecord>>,
    errors: RefCell<Vec<ErrorRecord>>,
}

impl Session<'_> {
    fn context<'a>(&'a self, stack: &'a TypeStack) -> RuleContext<'a> {
        RuleContext {
            stack,
            anchor: self.anchor,
            catalog: self.catalog,
            resolver: self,
        }
    }

    fn into_records(self) -> (Vec<ActivationRecord>, Vec<ErrorRecord>) {
        (self.activations.into_inner(), self.errors.into_inner())
    }

    fn record(&self, how: ActivationKind, stack: &TypeStack) {
        self.activations
            .borrow_mut()
            .push(ActivationRecord::new(how, stack.as_slice()));
    }

    fn record_error(&self, context: ActivationRecord, error: &Error) {
        warn!(context = %context, error = %error, "Activation failed");
        self.errors.borrow_mut().push(ErrorRecord::new(context, error));
    }

    /// Record a non-configuration failure against the node and make it
    /// absent; configuration errors pass through
    fn settle(&self, how: ActivationKind, stack: &TypeStack, result: Result<Option<Value>>) -> Result<Option<Value>> {
        match result {
            Err(error) if !error.is_configuration() => {
                self.record_error(ActivationRecord::new(how, stack.as_slice()), &error);
                Ok(None)
            }
            other => other,
        }
    }

    fn build(&self, request: &TypeKey, stack: &TypeStack) -> Result<Option<Value>> {
        let depth = self.depth.get();
        let stack = stack.with(*request);
        if depth >= self.recursion_limit {
            debug!(request = %request, depth, "Recursion limit reached");
            self.record(ActivationKind::RecursionLimit, &stack);
            return Ok((self.fallback)(request, self.catalog));
        }
        self.depth.set(depth + 1);
        let result = self.build_node(request, &stack);
        self.depth.set(depth);
        result
    }

    fn build_node(&self, request: &TypeKey, stack: &TypeStack) -> Result<Option<Value>> {
        let ctx = self.context(stack);
        for (rule, supplier) in self.rules.instance_suppliers() {
            match supplier.supply(request, &ctx) {
                Ok(Some(value)) => {
                    trace!(request = %request, rule = rule.name(), "Supplied by instance rule");
                    self.record(ActivationKind::InstanceRule, stack);
                    return Ok(Some(value));
                }
                Ok(None) => {}
                Err(error) => return self.settle(ActivationKind::InstanceRule, stack, Err(error)),
            }
        }

        let Some(descriptor) = self.catalog.describe(request) else {
            return self.settle(
                ActivationKind::Constructed,
                stack,
                Err(Error::unknown_type(request.full_name())),
            );
        };

        match descriptor.kind() {
            TypeKind::Abstract => {
                let result = self.substitute(request, stack);
                self.settle(ActivationKind::AbstractSubstitution, stack, result)
            }
            TypeKind::Text => {
                let caller = stack.caller().map_or("", TypeKey::full_name);
                trace!(request = %request, caller, "Synthesized text");
                self.record(ActivationKind::ValueKind, stack);
                Ok(Some(Value::text(format!("{TEXT_VALUE_PREFIX}{caller}"))))
            }
            TypeKind::Value { zero } => {
                self.record(ActivationKind::ValueKind, stack);
                Ok(Some(zero()))
            }
            TypeKind::Composite => {
                let result = self.construct(&descriptor, stack);
                self.settle(ActivationKind::Constructed, stack, result)
            }
        }
    }

    fn substitute(&self, request: &TypeKey, stack: &TypeStack) -> Result<Option<Value>> {
        let concrete = self
            .rules
            .find_concrete_type(request, &self.context(stack))
            .ok_or_else(|| Error::no_concrete_type(request.full_name()))?;
        trace!(request = %request, concrete = %concrete, "Substituting concrete type");
        let Some(built) = self.build(&concrete, stack)? else {
            return Ok(None);
        };
        let value = self
            .catalog
            .coerce(&built, request)
            .ok_or_else(|| Error::not_assignable(concrete.full_name(), request.full_name()))?;
        self.record(ActivationKind::AbstractSubstitution, stack);
        Ok(Some(value))
    }

    fn construct(&self, descriptor: &TypeDescriptor, stack: &TypeStack) -> Result<Option<Value>> {
        let Some(constructor) = self.rules.choose_constructor(descriptor, stack) else {
            let value = descriptor
                .instantiate()
                .ok_or_else(|| Error::no_constructor(descriptor.key().full_name()))??;
            self.record(ActivationKind::NoConstructor, stack);
            return Ok(Some(value));
        };

        let mut values = Vec::with_capacity(constructor.arity());
        for parameter in constructor.parameters() {
            let key = parameter.type_key();
            let value = if parameter.is_optional() && stack.contains(&key) {
                parameter.default_value()
            } else {
                self.build(&key, stack)?
            };
            values.push(value);
        }
        let arguments = Arguments::new(constructor.parameters(), values);
        let value = catch_construction_panic(descriptor.key().full_name(), || {
            constructor.invoke(&arguments)
        })?;
        let record = ActivationRecord::new(ActivationKind::Constructed, stack.as_slice())
            .with_constructor(constructor.signature(&descriptor.key()), arguments.render());
        self.activations.borrow_mut().push(record);
        Ok(Some(value))
    }
}

impl Resolver for Session<'_> {
    fn resolve_within(&self, request: &TypeKey, stack: &TypeStack) -> Result<Option<Value>> {
        self.build(request, stack)
    }
}
