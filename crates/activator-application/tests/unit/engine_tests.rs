//! End-to-end tests of the resolution algorithm

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use activator_domain::{
        ActivationKind, ChoosesConstructor, ConstructorDescriptor, Error, Rule, TypeDescriptor,
        TypeKey, TypeStack, Value,
    };
    use activator_rules::{ConstructorWithFewestParameters, ConstructorWithMostParameters};

    use crate::fixtures::{
        Chicken, Controller, Fuse, Hidden, Node, Orphan, Panel, Plain, Repository, Service,
        SqlRepository, TwoWays, Unregistered, activator, builder,
    };

    #[test]
    fn test_concrete_type_with_parameterless_constructor() {
        let mut activator = activator();
        let plain = activator.resolve::<Plain>().expect("resolve");
        assert!(plain.is_some());
        assert!(activator.last_errors().is_empty());
    }

    #[test]
    fn test_abstract_type_resolves_to_its_only_implementation() {
        let mut activator = activator();
        let repository = activator
            .resolve::<dyn Repository>()
            .expect("resolve")
            .expect("repository");

        let expected = format!("sql:for{}", TypeKey::of::<SqlRepository>().full_name());
        assert_eq!(repository.name(), expected);
        assert!(activator
            .last_activation_tree()
            .iter()
            .any(|r| r.how() == ActivationKind::AbstractSubstitution));
    }

    #[test]
    fn test_graph_is_built_recursively() {
        let mut activator = activator();
        let controller = activator.try_resolve::<Controller>().expect("controller");

        assert_eq!(controller.service.retries, 0);
        assert_eq!(
            controller.title,
            format!("for{}", TypeKey::of::<Controller>().full_name())
        );
    }

    #[test]
    fn test_root_text_request_is_for() {
        let mut activator = activator();
        let text = activator.resolve::<String>().expect("resolve").expect("text");
        assert_eq!(text.as_str(), "for");
    }

    #[test]
    fn test_value_kind_resolves_to_zero() {
        let mut activator = activator();
        assert_eq!(activator.resolve::<u64>().expect("resolve").map(|v| *v), Some(0));
        assert_eq!(activator.resolve::<bool>().expect("resolve").map(|v| *v), Some(false));
    }

    #[test]
    fn test_fewest_parameters_only() {
        let mut activator = builder()
            .include_default_rules(false)
            .rule(Arc::new(ConstructorWithFewestParameters::new()))
            .build()
            .expect("activator");

        let built = activator.try_resolve::<TwoWays>().expect("two ways");
        assert!(built.first.is_none());
        assert!(built.second.is_none());
    }

    #[test]
    fn test_most_parameters_only() {
        let mut activator = builder()
            .include_default_rules(false)
            .rule(Arc::new(ConstructorWithMostParameters::new()))
            .build()
            .expect("activator");

        let built = activator.try_resolve::<TwoWays>().expect("two ways");
        assert!(built.first.as_deref().is_some_and(|s| !s.is_empty()));
        assert!(built.second.as_deref().is_some_and(|s| !s.is_empty()));
    }

    #[derive(Debug)]
    struct SingleArgumentConstructor;

    impl ChoosesConstructor for SingleArgumentConstructor {
        fn choose_constructor<'d>(
            &self,
            descriptor: &'d TypeDescriptor,
            _stack: &TypeStack,
        ) -> Option<&'d ConstructorDescriptor> {
            descriptor.constructors().iter().find(|c| c.arity() == 1)
        }
    }

    impl Rule for SingleArgumentConstructor {
        fn name(&self) -> &str {
            "single_argument_constructor"
        }

        fn as_constructor_chooser(&self) -> Option<&dyn ChoosesConstructor> {
            Some(self)
        }
    }

    #[test]
    fn test_custom_chooser_reaches_middle_constructor() {
        let mut activator = builder()
            .rule(Arc::new(SingleArgumentConstructor))
            .build()
            .expect("activator");

        let built = activator.try_resolve::<TwoWays>().expect("two ways");
        assert!(built.first.is_some());
        assert!(built.second.is_none());
    }

    #[test]
    fn test_panicking_constructor_leaves_siblings_intact() {
        let mut activator = activator();
        let panel = activator.try_resolve::<Panel>().expect("panel");

        assert!(panel.plain.is_some());
        assert!(panel.fuse.is_none());
        assert_eq!(activator.last_errors().len(), 1);
        assert_eq!(
            activator.last_errors()[0].context().requested(),
            Some(&TypeKey::of::<Fuse>())
        );
        assert!(activator.last_errors()[0].error().contains("panicked: fuse blown"));

        // The session is still usable after the panic
        assert!(activator.resolve::<Plain>().expect("resolve").is_some());
        assert!(activator.last_errors().is_empty());
    }

    #[test]
    fn test_optional_cycle_terminates_with_default() {
        let mut activator = activator();
        let chicken = activator.try_resolve::<Chicken>().expect("chicken");
        assert!(chicken.egg.chicken.is_none());
    }

    #[derive(Debug)]
    struct FirstConstructor;

    impl ChoosesConstructor for FirstConstructor {
        fn choose_constructor<'d>(
            &self,
            descriptor: &'d TypeDescriptor,
            _stack: &TypeStack,
        ) -> Option<&'d ConstructorDescriptor> {
            descriptor.constructors().first()
        }
    }

    impl Rule for FirstConstructor {
        fn name(&self) -> &str {
            "first_constructor"
        }

        fn as_constructor_chooser(&self) -> Option<&dyn ChoosesConstructor> {
            Some(self)
        }
    }

    #[test]
    fn test_recursion_limit_stops_unvetoed_cycle() {
        let mut activator = builder()
            .rule(Arc::new(FirstConstructor))
            .recursion_limit(5)
            .build()
            .expect("activator");

        let node = activator.try_resolve::<Node>().expect("node");
        assert_eq!(node.chain_length(), 5);
        let limits = activator
            .last_activation_tree()
            .iter()
            .filter(|r| r.how() == ActivationKind::RecursionLimit)
            .count();
        assert_eq!(limits, 1);
    }

    #[test]
    fn test_recursion_fallback_is_configurable() {
        let mut activator = builder()
            .recursion_limit(0)
            .recursion_fallback(|_: &TypeKey, _: &dyn activator_domain::TypeCatalog| {
                Some(Value::new(7_u32))
            })
            .build()
            .expect("activator");

        assert_eq!(activator.resolve::<u32>().expect("resolve").map(|v| *v), Some(7));
    }

    #[test]
    fn test_vetoed_cycle_without_instantiation_is_recorded() {
        let mut activator = activator();
        // Node needs a Node: the veto leaves no constructor
        assert!(activator.resolve::<Node>().expect("resolve").is_none());
        assert!(activator.last_errors()[0].error().contains("No constructor"));
    }

    #[test]
    fn test_non_public_constructor_is_used() {
        let mut activator = activator();
        assert!(activator.resolve::<Hidden>().expect("resolve").is_some());
    }

    #[test]
    fn test_unknown_type_is_recorded() {
        let mut activator = activator();
        assert!(activator.resolve::<Unregistered>().expect("resolve").is_none());
        assert_eq!(activator.last_errors().len(), 1);

        match activator.try_resolve::<Unregistered>() {
            Err(Error::Unresolvable { reasons, .. }) => {
                assert!(reasons[0].contains("Unknown type"));
            }
            other => panic!("Expected Unresolvable error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_abstract_without_implementation_is_recorded() {
        let mut activator = activator();
        assert!(activator.resolve::<dyn Orphan>().expect("resolve").is_none());
        assert!(activator.last_errors()[0].error().contains("No concrete type"));
    }

    #[test]
    fn test_resolve_named() {
        let mut activator = activator();
        let value = activator
            .resolve_named("SqlRepository")
            .expect("resolve")
            .expect("value");
        assert!(value.is::<SqlRepository>());

        assert!(activator.resolve_named("Nothing").expect("resolve").is_none());
        assert_eq!(activator.last_errors().len(), 1);
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let mut activator = activator();
        activator.resolve::<Controller>().expect("first");
        let first = activator.diagnostics_report(activator_domain::NameFormat::Full);
        activator.resolve::<Controller>().expect("second");
        let second = activator.diagnostics_report(activator_domain::NameFormat::Full);

        assert_eq!(first, second);
    }

    #[test]
    fn test_diagnostics_reset_per_request() {
        let mut activator = activator();
        activator.resolve::<Controller>().expect("controller");
        let controller_records = activator.last_activation_tree().len();
        activator.resolve::<Plain>().expect("plain");

        assert!(controller_records > 1);
        assert_eq!(activator.last_activation_tree().len(), 1);
    }

    #[test]
    fn test_service_gets_repository_and_zero_retries() {
        let mut activator = activator();
        let service = activator.try_resolve::<Service>().expect("service");
        assert_eq!(service.retries, 0);
        assert!(service.repository.name().starts_with("sql:for"));
    }
}
