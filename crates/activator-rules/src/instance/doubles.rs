use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use activator_domain::{MockInspection, MockingAdapter, Result, TypeKey, Value};
use dashmap::DashMap;
use tracing::debug;

type DoubleFactory = Arc<dyn Fn(&[Value]) -> CreatedDouble + Send + Sync>;

struct CreatedDouble {
    double: Value,
    tracked: TrackedDouble,
    concrete_type: TypeKey,
    address: usize,
}

/// Weak handle on a handed-out double; the registry never keeps one alive
struct TrackedDouble {
    upgrade: Box<dyn Fn() -> Option<Value> + Send + Sync>,
    address_of: fn(&Value) -> Option<usize>,
}

impl TrackedDouble {
    fn concrete(&self) -> Option<Value> {
        (self.upgrade)()
    }

    fn is_alive(&self) -> bool {
        self.concrete().is_some()
    }
}

struct Registration {
    factory: DoubleFactory,
    address_of: fn(&Value) -> Option<usize>,
}

fn data_address<I: ?Sized + 'static>(value: &Value) -> Option<usize> {
    value.get::<I>().map(|shared| Arc::as_ptr(&shared).cast::<()>().addr())
}

/// Mocking adapter over caller-registered double factories
///
/// Each registration says how to make a double for one abstract type. The
/// registry tracks the doubles it hands out through weak handles, so it can
/// later tell whether a value is one of its live doubles and return the
/// concrete double object behind an abstract handle. Dropped doubles are
/// forgotten.
#[derive(Default)]
pub struct DoubleRegistry {
    registrations: HashMap<TypeKey, Registration>,
    created: DashMap<usize, TrackedDouble>,
}

impl DoubleRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register how to double `I` with a `D`
    #[must_use]
    pub fn register<I, D, F>(mut self, factory: F, upcast: fn(Arc<D>) -> Arc<I>) -> Self
    where
        I: ?Sized + Send + Sync + 'static,
        D: Send + Sync + 'static,
        F: Fn(&[Value]) -> D + Send + Sync + 'static,
    {
        let factory: DoubleFactory = Arc::new(move |arguments| {
            let concrete = Arc::new(factory(arguments));
            let address = Arc::as_ptr(&concrete).cast::<()>().addr();
            let weak = Arc::downgrade(&concrete);
            CreatedDouble {
                double: Value::from_arc(upcast(concrete)),
                tracked: TrackedDouble {
                    upgrade: Box::new(move || weak.upgrade().map(Value::from_arc)),
                    address_of: data_address::<D>,
                },
                concrete_type: TypeKey::of::<D>(),
                address,
            }
        });
        self.registrations.insert(
            TypeKey::of::<I>(),
            Registration {
                factory,
                address_of: data_address::<I>,
            },
        );
        self
    }

    /// Number of handed-out doubles that are still alive
    pub fn created_count(&self) -> usize {
        self.prune();
        self.created.len()
    }

    fn prune(&self) {
        self.created.retain(|_, tracked| tracked.is_alive());
    }

    fn live_double(&self, address: usize) -> Option<Value> {
        self.created.get(&address).and_then(|entry| entry.value().concrete())
    }

    fn address_of(&self, candidate: &Value) -> Option<usize> {
        self.registrations
            .get(&candidate.type_key())
            .and_then(|registration| (registration.address_of)(candidate))
            .or_else(|| {
                self.created
                    .iter()
                    .find(|entry| (entry.value().address_of)(candidate) == Some(*entry.key()))
                    .map(|entry| *entry.key())
            })
    }
}

impl fmt::Debug for DoubleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut doubled: Vec<_> = self.registrations.keys().map(TypeKey::full_name).collect();
        doubled.sort_unstable();
        f.debug_struct("DoubleRegistry")
            .field("doubles", &doubled)
            .field("created", &self.created.len())
            .finish()
    }
}

impl MockingAdapter for DoubleRegistry {
    fn name(&self) -> &str {
        "double_registry"
    }

    fn create_double_or_none(&self, target: &TypeKey, arguments: &[Value]) -> Option<Value> {
        let registration = self.registrations.get(target)?;
        let created = (registration.factory)(arguments);
        debug!(target_type = %target, double = %created.concrete_type, "Created double");
        self.prune();
        self.created.insert(created.address, created.tracked);
        Some(created.double)
    }

    fn is_backing_library_present(&self) -> bool {
        true
    }

    fn ensure_backing_library_works(&self) -> Result<()> {
        Ok(())
    }

    fn as_inspection(&self) -> Option<&dyn MockInspection> {
        Some(self)
    }
}

impl MockInspection for DoubleRegistry {
    fn is_my_double(&self, candidate: &Value) -> bool {
        self.owning_double(candidate).is_some()
    }

    fn owning_double(&self, candidate: &Value) -> Option<Value> {
        let address = self.address_of(candidate)?;
        self.live_double(address)
    }
}
