//! Shared fixtures: a small billing domain spread over two code modules

use std::sync::Arc;

use activator_domain::{
    Parameter, Resolver, Result, RuleContext, SearchAnchor, TypeCatalog, TypeDescriptor, TypeKey,
    TypeStack, Value,
};

pub trait Store: Send + Sync {
    fn label(&self) -> String;
}

pub struct MemoryStore;

impl Store for MemoryStore {
    fn label(&self) -> String {
        "memory".to_string()
    }
}

pub trait Clock: Send + Sync {}

pub struct SystemClock;

impl Clock for SystemClock {}

pub struct Ledger {
    pub store: Arc<dyn Store>,
}

pub struct Anchor;

pub struct TestCatalog {
    pub types: Vec<Arc<TypeDescriptor>>,
}

impl TypeCatalog for TestCatalog {
    fn registered(&self, key: &TypeKey) -> Option<Arc<TypeDescriptor>> {
        self.types.iter().find(|d| d.key() == *key).cloned()
    }

    fn registered_types(&self) -> Vec<Arc<TypeDescriptor>> {
        self.types.clone()
    }
}

/// `billing` holds the store port and ledger, `storage` the store
/// implementation, `timing` the clock pair, `fixtures` the anchor.
pub fn catalog() -> TestCatalog {
    TestCatalog {
        types: vec![
            Arc::new(TypeDescriptor::abstract_type::<dyn Store>("billing::ports")),
            Arc::new(
                TypeDescriptor::composite::<Ledger>("billing::ledger")
                    .constructor(vec![Parameter::required::<dyn Store>("store")], |args| {
                        Ok(Ledger {
                            store: args.required::<dyn Store>(0)?,
                        })
                    })
                    .build(),
            ),
            Arc::new(
                TypeDescriptor::composite::<MemoryStore>("storage::memory")
                    .constructor(Vec::new(), |_| Ok(MemoryStore))
                    .implements::<dyn Store>(|s| s)
                    .build(),
            ),
            Arc::new(TypeDescriptor::abstract_type::<dyn Clock>("timing")),
            Arc::new(
                TypeDescriptor::composite::<SystemClock>("timing::system")
                    .constructor(Vec::new(), |_| Ok(SystemClock))
                    .implements::<dyn Clock>(|c| c)
                    .build(),
            ),
            Arc::new(
                TypeDescriptor::composite::<Anchor>("fixtures")
                    .constructor(Vec::new(), |_| Ok(Anchor))
                    .build(),
            ),
        ],
    }
}

/// Resolver that can only build types through a zero-argument constructor
pub struct ShallowResolver<'a> {
    pub catalog: &'a TestCatalog,
}

impl Resolver for ShallowResolver<'_> {
    fn resolve_within(&self, request: &TypeKey, _stack: &TypeStack) -> Result<Option<Value>> {
        let Some(descriptor) = self.catalog.describe(request) else {
            return Ok(None);
        };
        match descriptor.constructors().iter().find(|c| c.arity() == 0) {
            Some(constructor) => constructor.invoke(&activator_domain::Arguments::empty()).map(Some),
            None => Ok(None),
        }
    }
}

pub fn context<'a>(
    catalog: &'a TestCatalog,
    resolver: &'a ShallowResolver<'a>,
    stack: &'a TypeStack,
    anchor: Option<&'a SearchAnchor>,
) -> RuleContext<'a> {
    RuleContext {
        stack,
        anchor,
        catalog,
        resolver,
    }
}
