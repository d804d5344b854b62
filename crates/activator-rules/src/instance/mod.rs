//! Instance-supply rules
//!
//! Rules consulted first for every request. Each either hands back a value
//! for the request or steps aside so the next rule, and eventually type
//! search and construction, can handle it.

mod doubles;
mod factory_method;
mod for_type;
mod instances;
mod mock;
mod static_source;

pub use doubles::DoubleRegistry;
pub use factory_method::CreateFromFactoryMethod;
pub use for_type::ActivateForType;
pub use instances::ActivateInstances;
pub use mock::CreateFromMock;
pub use static_source::ActivateUsingStatic;
