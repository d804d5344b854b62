//! Infrastructure constants

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "activator.toml";

/// Configuration directory name, under the user config directory
pub const DEFAULT_CONFIG_DIR: &str = "activator";

/// Prefix of configuration environment variables
pub const CONFIG_ENV_PREFIX: &str = "ACTIVATOR";

/// Separator for nested keys in environment variables
/// (`ACTIVATOR_LOGGING__LEVEL` sets `logging.level`)
pub const CONFIG_ENV_NESTING: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Environment variable holding a tracing filter directive
pub const LOG_ENV_VAR: &str = "ACTIVATOR_LOG";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";
