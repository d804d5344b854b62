//! Unit tests for type descriptors and constructors

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use activator_domain::{
        Arguments, Error, Parameter, Receiver, TypeDescriptor, TypeKey, TypeKind, TypeStack, Value,
    };

    trait Store: Send + Sync {
        fn label(&self) -> String;
    }

    struct MemoryStore {
        label: String,
    }

    impl Store for MemoryStore {
        fn label(&self) -> String {
            self.label.clone()
        }
    }

    struct Ledger;

    fn memory_store() -> TypeDescriptor {
        TypeDescriptor::composite::<MemoryStore>("billing::stores")
            .constructor(vec![Parameter::required::<String>("label")], |args| {
                Ok(MemoryStore {
                    label: args.required::<String>(0)?.to_string(),
                })
            })
            .implements::<dyn Store>(|s| s)
            .instance_method::<dyn Store, _>("reopen", |store, _| {
                Ok(Value::from_arc::<dyn Store>(Arc::new(MemoryStore {
                    label: format!("{}-again", store.label),
                })))
            })
            .build()
    }

    #[test]
    fn test_code_module_is_first_path_segment() {
        let descriptor = memory_store();
        assert_eq!(descriptor.module_path(), "billing::stores");
        assert_eq!(descriptor.code_module(), "billing");
        assert!(matches!(descriptor.kind(), TypeKind::Composite));
    }

    #[test]
    fn test_constructor_invokes_with_arguments() {
        let descriptor = memory_store();
        let constructor = &descriptor.constructors()[0];
        let args = Arguments::new(constructor.parameters(), vec![Some(Value::text("main"))]);

        let value = constructor.invoke(&args).expect("construct");
        let store = value.get::<MemoryStore>().expect("MemoryStore");
        assert_eq!(store.label, "main");
    }

    #[test]
    fn test_missing_argument_is_reported() {
        let descriptor = memory_store();
        let constructor = &descriptor.constructors()[0];
        let args = Arguments::new(constructor.parameters(), vec![None]);

        match constructor.invoke(&args) {
            Err(Error::MissingArgument { index, .. }) => assert_eq!(index, 0),
            other => panic!("Expected MissingArgument, got {other:?}"),
        }
    }

    #[test]
    fn test_upcast_preserves_identity() {
        let descriptor = memory_store();
        let concrete = Arc::new(MemoryStore {
            label: "a".to_string(),
        });
        let value = Value::from_arc(Arc::clone(&concrete));

        let upcast = descriptor
            .upcast(&value, &TypeKey::of::<dyn Store>())
            .expect("upcast to dyn Store");
        let store = upcast.get::<dyn Store>().expect("dyn Store payload");
        assert_eq!(
            Arc::as_ptr(&store).cast::<()>(),
            Arc::as_ptr(&concrete).cast::<()>()
        );
        assert!(descriptor.is_assignable_to(&TypeKey::of::<dyn Store>()));
        assert!(!descriptor.is_assignable_to(&TypeKey::of::<Ledger>()));
    }

    #[test]
    fn test_instance_method_requires_receiver() {
        let descriptor = memory_store();
        let method = descriptor.method("reopen").expect("reopen");
        assert_eq!(method.receiver(), Receiver::Instance);
        assert_eq!(method.returns(), TypeKey::of::<dyn Store>());

        assert!(method.invoke(None, &[]).is_err());

        let receiver = Value::new(MemoryStore {
            label: "x".to_string(),
        });
        let result = method.invoke(Some(&receiver), &[]).expect("invoke");
        assert_eq!(result.get::<dyn Store>().expect("store").label(), "x-again");
    }

    #[test]
    fn test_would_recurse_ignores_optional_parameters() {
        let descriptor = TypeDescriptor::composite::<Ledger>("billing")
            .constructor(vec![Parameter::required::<MemoryStore>("store")], |_| Ok(Ledger))
            .constructor(vec![Parameter::optional::<MemoryStore>("store")], |_| Ok(Ledger))
            .build();
        let stack = TypeStack::new()
            .with(TypeKey::of::<MemoryStore>())
            .with(TypeKey::of::<Ledger>());

        assert!(descriptor.constructors()[0].would_recurse(&stack));
        assert!(!descriptor.constructors()[1].would_recurse(&stack));
    }

    #[test]
    fn test_signature_uses_short_names() {
        let descriptor = memory_store();
        assert_eq!(
            descriptor.constructors()[0].signature(&descriptor.key()),
            "MemoryStore(label: String)"
        );
    }

    #[test]
    fn test_value_type_zero_value() {
        #[derive(Default)]
        struct Money(i64);

        let descriptor = TypeDescriptor::value_type::<Money>("billing");
        let zero = descriptor.zero_value().expect("zero");
        assert_eq!(zero.get::<Money>().expect("Money").0, 0);
    }

    #[test]
    fn test_short_name_drops_trait_object_bounds() {
        assert_eq!(TypeKey::of::<dyn Store + Send + Sync>().short_name(), "dyn Store");
        assert_eq!(TypeKey::of::<dyn Store>().short_name(), "dyn Store");
        assert_eq!(
            TypeKey::of::<dyn Fn() -> u32 + Send>().short_name(),
            "dyn Fn() -> u32"
        );
    }

    #[test]
    fn test_panicking_instantiation_becomes_construction_error() {
        let descriptor = TypeDescriptor::composite::<Ledger>("billing")
            .instantiate_with(|| -> Ledger { panic!("ledger offline") })
            .build();

        match descriptor.instantiate() {
            Some(Err(Error::Construction { message, .. })) => {
                assert!(message.contains("panicked: ledger offline"));
            }
            other => panic!("expected a construction error, got {:?}", other.map(|r| r.is_ok())),
        }
    }
}
