//! Configuration loader
//!
//! Merges, later sources overriding earlier ones:
//! 1. `ActivatorConfig::default()`
//! 2. a TOML file, explicit or discovered
//! 3. environment variables such as `ACTIVATOR_RECURSION_LIMIT` or
//!    `ACTIVATOR_LOGGING__LEVEL`

use std::env;
use std::path::{Path, PathBuf};

use activator_domain::{Error, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};

use crate::config::ActivatorConfig;
use crate::constants::{
    CONFIG_ENV_NESTING, CONFIG_ENV_PREFIX, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME, LOG_ENV_VAR,
};
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix, without the trailing underscore
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    #[must_use]
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    #[must_use]
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    pub fn load(&self) -> Result<ActivatorConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(ActivatorConfig::default()));

        if let Some(config_path) = &self.config_path {
            let found = config_path.exists();
            if found {
                figment = figment.merge(Toml::file(config_path));
            }
            log_config_loaded(config_path, found);
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            log_config_loaded(&default_path, true);
        }

        // the log filter variable shares the prefix
        let log_key = LOG_ENV_VAR
            .strip_prefix(&format!("{}_", self.env_prefix))
            .unwrap_or(LOG_ENV_VAR)
            .to_lowercase();
        figment = figment.merge(
            Env::prefixed(&format!("{}_", self.env_prefix))
                .split(CONFIG_ENV_NESTING)
                .ignore(&[log_key.as_str()]),
        );

        let config: ActivatorConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_config(&config)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &ActivatorConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).io_context("Failed to write config file")?;

        Ok(())
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// First existing configuration file among the usual locations
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            Some(current_dir.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
            dirs::home_dir().map(|d| {
                d.join(format!(".{DEFAULT_CONFIG_DIR}"))
                    .join(DEFAULT_CONFIG_FILENAME)
            }),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate configuration values
pub fn validate_config(config: &ActivatorConfig) -> Result<()> {
    if config.recursion_limit == 0 {
        return Err(Error::configuration("Recursion limit cannot be 0"));
    }
    if config.ignore_modules.iter().any(String::is_empty) {
        return Err(Error::configuration(
            "Ignored module prefixes cannot be empty: an empty prefix ignores every module",
        ));
    }
    parse_log_level(&config.logging.level)?;
    Ok(())
}
