//! # Built-in Rules
//!
//! Strategy objects the engine consults while resolving a request:
//!
//! | Module | Capability |
//! |--------|------------|
//! | [`instance`] | Supply ready-made values (fixed mapping, pool, factory method, doubles) |
//! | [`type_search`] | Narrow an abstract request to a concrete type |
//! | [`constructor`] | Choose the constructor of a concrete type |
//! | [`defaults`] | The default pipeline, separately or as one composite rule |
//!
//! Rules are immutable once built and shared through `Arc<dyn Rule>`.

pub mod constructor;
pub mod defaults;
pub mod instance;
pub mod type_search;

pub use constructor::{ConstructorWithFewestParameters, ConstructorWithMostParameters};
pub use defaults::{DefaultRules, default_pipeline};
pub use instance::{
    ActivateForType, ActivateInstances, ActivateUsingStatic, CreateFromFactoryMethod,
    CreateFromMock, DoubleRegistry,
};
pub use type_search::{
    ChooseExactType, FindInAnchorModule, FindInBaseLocation, FindInDefiningModules, FindInModule,
};
