//! Structured logging with tracing
//!
//! Installs a global subscriber filtered by `ACTIVATOR_LOG` when set, the
//! configured level otherwise, writing plain or JSON lines.

use std::path::Path;

use activator_domain::{Error, Result};
use tracing::{Level, info, warn};
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub use crate::config::LoggingConfig;
use crate::constants::LOG_ENV_VAR;
use crate::error_ext::ErrorContext;

/// Initialize logging with the provided configuration
///
/// Fails on an invalid level or when a global subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let level = parse_log_level(&config.level)?;
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(&config.level));
    let registry = Registry::default().with(filter);

    // layer types differ, hence the two branches
    if config.json_format {
        registry
            .with(fmt::layer().json().with_target(true))
            .try_init()
            .context("Failed to install the tracing subscriber")?;
    } else {
        registry
            .with(fmt::layer().with_target(true))
            .try_init()
            .context("Failed to install the tracing subscriber")?;
    }

    info!("Logging initialized with level: {}", level);
    Ok(())
}

/// Like [`init_logging`], but tolerates an already installed subscriber
///
/// Returns whether this call installed one. Meant for tests, where every
/// test may try to set up logging.
pub fn try_init_logging(config: &LoggingConfig) -> bool {
    init_logging(config).is_ok()
}

/// Parse log level string to tracing Level
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(Error::configuration(format!(
            "Invalid log level: {level}. Use trace, debug, info, warn, or error"
        ))),
    }
}

/// Log configuration loading status
pub fn log_config_loaded(config_path: &Path, success: bool) {
    if success {
        info!("Configuration loaded from {}", config_path.display());
    } else {
        warn!("Configuration file not found: {}", config_path.display());
    }
}
