//! Unit tests for type-search rules

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use activator_domain::{
        FindsConcreteType, FindsConcreteTypeByName, Rule, SearchAnchor, TypeKey, TypeStack,
    };
    use activator_rules::{
        ChooseExactType, FindInAnchorModule, FindInBaseLocation, FindInDefiningModules,
        FindInModule,
    };

    use crate::support::{
        Anchor, Clock, Ledger, MemoryStore, ShallowResolver, Store, SystemClock, catalog, context,
    };

    #[test]
    fn test_defining_modules_searches_request_module() {
        let catalog = catalog();
        let resolver = ShallowResolver { catalog: &catalog };
        let stack = TypeStack::new().with(TypeKey::of::<dyn Clock>());
        let ctx = context(&catalog, &resolver, &stack, None);

        let found = FindInDefiningModules::new().find_concrete_type(&TypeKey::of::<dyn Clock>(), &ctx);
        assert_eq!(found, Some(TypeKey::of::<SystemClock>()));
    }

    #[test]
    fn test_defining_modules_does_not_search_unrelated_modules() {
        let catalog = catalog();
        let resolver = ShallowResolver { catalog: &catalog };
        let stack = TypeStack::new()
            .with(TypeKey::of::<Ledger>())
            .with(TypeKey::of::<dyn Store>());
        let ctx = context(&catalog, &resolver, &stack, None);

        // the implementation lives in `storage`, neither `billing` module has it
        let found = FindInDefiningModules::new().find_concrete_type(&TypeKey::of::<dyn Store>(), &ctx);
        assert_eq!(found, None);
    }

    #[test]
    fn test_defining_modules_has_no_search_by_name() {
        assert!(FindInDefiningModules::new().as_type_finder_by_name().is_none());
    }

    #[test]
    fn test_anchor_module_requires_anchor() {
        let catalog = catalog();
        let resolver = ShallowResolver { catalog: &catalog };
        let stack = TypeStack::new();
        let rule = FindInAnchorModule::new();

        let without = context(&catalog, &resolver, &stack, None);
        assert_eq!(rule.find_concrete_type(&TypeKey::of::<dyn Store>(), &without), None);

        let anchor = SearchAnchor::new(Arc::new(MemoryStore));
        let with = context(&catalog, &resolver, &stack, Some(&anchor));
        assert_eq!(
            rule.find_concrete_type(&TypeKey::of::<dyn Store>(), &with),
            Some(TypeKey::of::<MemoryStore>())
        );
    }

    #[test]
    fn test_anchor_module_by_name() {
        let catalog = catalog();
        let resolver = ShallowResolver { catalog: &catalog };
        let stack = TypeStack::new();
        let anchor = SearchAnchor::new(Arc::new(SystemClock));
        let ctx = context(&catalog, &resolver, &stack, Some(&anchor));

        assert_eq!(
            FindInAnchorModule::new().find_concrete_type_by_name("SystemClock", &ctx),
            Some(TypeKey::of::<SystemClock>())
        );
        assert_eq!(FindInAnchorModule::new().find_concrete_type_by_name("MemoryStore", &ctx), None);
    }

    #[test]
    fn test_base_location_scans_every_module() {
        let catalog = catalog();
        let resolver = ShallowResolver { catalog: &catalog };
        let stack = TypeStack::new();
        let ctx = context(&catalog, &resolver, &stack, None);

        assert_eq!(
            FindInBaseLocation::new().find_concrete_type(&TypeKey::of::<dyn Store>(), &ctx),
            Some(TypeKey::of::<MemoryStore>())
        );
    }

    #[test]
    fn test_base_location_skips_ignored_prefixes() {
        let catalog = catalog();
        let resolver = ShallowResolver { catalog: &catalog };
        let stack = TypeStack::new();
        let ctx = context(&catalog, &resolver, &stack, None);
        let rule = FindInBaseLocation::ignoring(["stor"]);

        assert_eq!(rule.find_concrete_type(&TypeKey::of::<dyn Store>(), &ctx), None);
        assert_eq!(
            rule.find_concrete_type_by_name("Anchor", &ctx),
            Some(TypeKey::of::<Anchor>())
        );
    }

    #[test]
    fn test_find_in_module() {
        let catalog = catalog();
        let resolver = ShallowResolver { catalog: &catalog };
        let stack = TypeStack::new();
        let ctx = context(&catalog, &resolver, &stack, None);

        assert_eq!(
            FindInModule::new("timing").find_concrete_type(&TypeKey::of::<dyn Clock>(), &ctx),
            Some(TypeKey::of::<SystemClock>())
        );
        assert_eq!(
            FindInModule::new("timing").find_concrete_type(&TypeKey::of::<dyn Store>(), &ctx),
            None
        );
    }

    #[test]
    fn test_choose_exact_type() {
        let catalog = catalog();
        let resolver = ShallowResolver { catalog: &catalog };
        let stack = TypeStack::new();
        let ctx = context(&catalog, &resolver, &stack, None);
        let rule = ChooseExactType::new::<dyn Store, MemoryStore>();

        assert_eq!(
            rule.find_concrete_type(&TypeKey::of::<dyn Store>(), &ctx),
            Some(TypeKey::of::<MemoryStore>())
        );
        assert_eq!(rule.find_concrete_type(&TypeKey::of::<dyn Clock>(), &ctx), None);
        assert_eq!(
            rule.find_concrete_type_by_name("dyn Store", &ctx),
            Some(TypeKey::of::<MemoryStore>())
        );
    }

    #[test]
    fn test_exact_type_by_bare_trait_name() {
        let catalog = catalog();
        let resolver = ShallowResolver { catalog: &catalog };
        let stack = TypeStack::new();
        let ctx = context(&catalog, &resolver, &stack, None);
        let store = ChooseExactType::new::<dyn Store + Send + Sync, MemoryStore>();
        let clock = ChooseExactType::new::<dyn Clock + Send + Sync, SystemClock>();

        assert_eq!(
            store.find_concrete_type_by_name("Store", &ctx),
            Some(TypeKey::of::<MemoryStore>())
        );
        assert_eq!(
            store.find_concrete_type_by_name("dyn Store", &ctx),
            Some(TypeKey::of::<MemoryStore>())
        );
        // Auto-trait bounds never make unrelated mappings collide
        assert_eq!(store.find_concrete_type_by_name("Sync", &ctx), None);
        assert_eq!(store.find_concrete_type_by_name("dyn Sync", &ctx), None);
        assert_eq!(clock.find_concrete_type_by_name("Store", &ctx), None);
    }
}
