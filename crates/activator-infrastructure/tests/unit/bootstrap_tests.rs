//! Engine bootstrap tests

#[cfg(test)]
mod tests {
    use activator_infrastructure::bootstrap::{activator_from_config, builder_from_config};
    use activator_infrastructure::config::ActivatorConfig;

    #[test]
    fn test_builder_carries_settings() {
        let config = ActivatorConfig {
            recursion_limit: 7,
            ..ActivatorConfig::default()
        };
        let activator = builder_from_config(&config).build().expect("activator");

        assert_eq!(activator.recursion_limit(), 7);
        assert_eq!(activator.rules().len(), 5);
    }

    #[test]
    fn test_default_rules_can_be_left_out() {
        let config = ActivatorConfig {
            include_default_rules: false,
            ..ActivatorConfig::default()
        };
        let activator = builder_from_config(&config).build().expect("activator");
        assert!(activator.rules().is_empty());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = ActivatorConfig {
            recursion_limit: 0,
            ..ActivatorConfig::default()
        };
        assert!(activator_from_config(&config).is_err());
    }

    #[test]
    fn test_configured_engine_resolves_builtins() {
        let mut activator = activator_from_config(&ActivatorConfig::default()).expect("activator");
        let value = activator.resolve::<i32>().expect("resolve");
        assert_eq!(value.map(|v| *v), Some(0));
    }
}
