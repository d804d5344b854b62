//! Configuration
//!
//! [`ActivatorConfig`] holds the engine settings; [`ConfigLoader`] merges
//! defaults, a TOML file and environment variables through figment.

pub mod loader;
pub mod types;

pub use loader::{ConfigLoader, validate_config};
pub use types::{ActivatorConfig, LoggingConfig};
