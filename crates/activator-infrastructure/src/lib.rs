//! Infrastructure Layer - Activator
//!
//! Cross-cutting concerns around the engine.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | `ActivatorConfig` and its figment loader |
//! | [`logging`] | tracing-subscriber setup |
//! | [`bootstrap`] | Engine builders from configuration |
//! | [`error_ext`] | Context extensions for foreign errors |

pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;

pub use bootstrap::{activator_from_config, builder_from_config, load_activator};
pub use config::{ActivatorConfig, ConfigLoader, LoggingConfig, validate_config};
pub use error_ext::ErrorContext;
pub use logging::{init_logging, parse_log_level, try_init_logging};
