//! Configuration types

use activator_domain::constants::{DEFAULT_IGNORED_MODULES, DEFAULT_RECURSION_LIMIT};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_LOG_LEVEL;

/// Engine settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivatorConfig {
    /// Maximum depth of the resolution chain
    pub recursion_limit: usize,

    /// Append the default pipeline after explicit rules
    pub include_default_rules: bool,

    /// Module prefixes skipped by the base-location type search
    pub ignore_modules: Vec<String>,

    /// Let the default constructor choosers favour public constructors
    pub prefer_public_constructors: bool,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Default for ActivatorConfig {
    fn default() -> Self {
        Self {
            recursion_limit: DEFAULT_RECURSION_LIMIT,
            include_default_rules: true,
            ignore_modules: DEFAULT_IGNORED_MODULES.iter().map(ToString::to_string).collect(),
            prefer_public_constructors: true,
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON output format
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
        }
    }
}
