//! Engine bootstrap from configuration

use activator_application::{ActivatorBuilder, AnythingActivator};
use activator_domain::Result;
use activator_rules::DefaultRules;
use tracing::info;

use crate::config::{ActivatorConfig, ConfigLoader, validate_config};

/// Engine builder carrying the configured settings
///
/// Further rules, instances or an anchor can be added before building.
pub fn builder_from_config(config: &ActivatorConfig) -> ActivatorBuilder {
    let default_rules = DefaultRules::new()
        .ignoring(config.ignore_modules.iter().cloned())
        .prefer_public(config.prefer_public_constructors);

    info!(
        recursion_limit = config.recursion_limit,
        include_default_rules = config.include_default_rules,
        ignored_modules = config.ignore_modules.len(),
        "Activator configured"
    );

    AnythingActivator::builder()
        .default_rules(default_rules)
        .include_default_rules(config.include_default_rules)
        .recursion_limit(config.recursion_limit)
}

/// Validate `config` and build an engine from it
pub fn activator_from_config(config: &ActivatorConfig) -> Result<AnythingActivator> {
    validate_config(config)?;
    builder_from_config(config).build()
}

/// Load configuration from the default sources and build an engine
pub fn load_activator() -> Result<AnythingActivator> {
    let config = ConfigLoader::new().load()?;
    builder_from_config(&config).build()
}
