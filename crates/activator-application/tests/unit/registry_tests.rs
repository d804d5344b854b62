//! Compile-time registration through linkme

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use activator_application::{
        ACTIVATABLE_TYPES, AnythingActivator, LinkedTypeCatalog, RULE_DECLARATIONS,
        RuleDeclaration, TypeEntry, declared_rules_for, list_activatable_types,
    };
    use activator_domain::{
        Parameter, Result, RuleHandle, SearchAnchor, TypeCatalog, TypeDescriptor, TypeKey,
    };
    use activator_rules::ActivateForType;

    use crate::fixtures::Plain;

    pub trait Widget: Send + Sync {
        fn label(&self) -> &'static str;
    }

    pub struct BasicWidget;

    impl Widget for BasicWidget {
        fn label(&self) -> &'static str {
            "basic"
        }
    }

    struct SpecialWidget;

    impl Widget for SpecialWidget {
        fn label(&self) -> &'static str {
            "special"
        }
    }

    pub struct Gadget {
        widget: Arc<dyn Widget>,
    }

    struct GadgetAnchor;

    fn describe_widget() -> TypeDescriptor {
        TypeDescriptor::abstract_type::<dyn Widget>(module_path!())
    }

    fn describe_basic_widget() -> TypeDescriptor {
        TypeDescriptor::composite::<BasicWidget>(module_path!())
            .constructor(Vec::new(), |_| Ok(BasicWidget))
            .implements::<dyn Widget>(|w| w)
            .build()
    }

    fn describe_gadget() -> TypeDescriptor {
        TypeDescriptor::composite::<Gadget>(module_path!())
            .constructor(vec![Parameter::required::<dyn Widget>("widget")], |args| {
                Ok(Gadget {
                    widget: args.required::<dyn Widget>(0)?,
                })
            })
            .build()
    }

    fn gadget_anchor_rules() -> Result<Vec<RuleHandle>> {
        let widget: Arc<dyn Widget> = Arc::new(SpecialWidget);
        let rule: RuleHandle = Arc::new(ActivateForType::new(widget));
        Ok(vec![rule])
    }

    #[linkme::distributed_slice(ACTIVATABLE_TYPES)]
    static WIDGET: TypeEntry = TypeEntry {
        name: "registry::Widget",
        describe: describe_widget,
    };

    #[linkme::distributed_slice(ACTIVATABLE_TYPES)]
    static BASIC_WIDGET: TypeEntry = TypeEntry {
        name: "registry::BasicWidget",
        describe: describe_basic_widget,
    };

    #[linkme::distributed_slice(ACTIVATABLE_TYPES)]
    static GADGET: TypeEntry = TypeEntry {
        name: "registry::Gadget",
        describe: describe_gadget,
    };

    #[linkme::distributed_slice(RULE_DECLARATIONS)]
    static GADGET_ANCHOR_RULES: RuleDeclaration = RuleDeclaration {
        owner: TypeKey::of::<GadgetAnchor>,
        rules: gadget_anchor_rules,
    };

    #[test]
    fn test_registered_types_are_listed() {
        let names = list_activatable_types();
        assert!(names.contains(&"registry::Gadget"));
        assert!(names.contains(&"registry::Widget"));
        assert!(names.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_linked_catalog_indexes_registrations() {
        let catalog = LinkedTypeCatalog::new();
        assert!(catalog.registered(&TypeKey::of::<Gadget>()).is_some());
        assert!(catalog.registered(&TypeKey::of::<SpecialWidget>()).is_none());
        assert!(catalog.registered_types().len() >= 3);
    }

    #[test]
    fn test_default_catalog_is_linked() {
        let mut activator = AnythingActivator::builder().build().expect("activator");
        let gadget = activator.try_resolve::<Gadget>().expect("gadget");
        assert_eq!(gadget.widget.label(), "basic");
    }

    #[test]
    fn test_declared_rules_of_the_anchor_apply() {
        let mut activator = AnythingActivator::builder()
            .anchor_with_declared_rules(SearchAnchor::new(Arc::new(GadgetAnchor)))
            .build()
            .expect("activator");

        let gadget = activator.try_resolve::<Gadget>().expect("gadget");
        assert_eq!(gadget.widget.label(), "special");
        assert_eq!(activator.rules().rules()[0].name(), "activate_for_type");
    }

    #[test]
    fn test_plain_anchor_ignores_declarations() {
        let mut activator = AnythingActivator::builder()
            .anchor(SearchAnchor::new(Arc::new(GadgetAnchor)))
            .build()
            .expect("activator");

        let gadget = activator.try_resolve::<Gadget>().expect("gadget");
        assert_eq!(gadget.widget.label(), "basic");
    }

    #[test]
    fn test_types_without_declarations() {
        let rules = declared_rules_for(&TypeKey::of::<Plain>()).expect("rules");
        assert!(rules.is_empty());
        assert_eq!(
            declared_rules_for(&TypeKey::of::<GadgetAnchor>())
                .expect("rules")
                .len(),
            1
        );
    }
}
