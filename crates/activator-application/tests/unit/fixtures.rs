//! A small service graph described in an in-memory catalog

use std::sync::Arc;

use activator_application::{ActivatorBuilder, AnythingActivator, InMemoryTypeCatalog};
use activator_domain::{Parameter, TypeDescriptor};

pub trait Repository: Send + Sync {
    fn name(&self) -> String;
}

pub struct SqlRepository {
    pub connection: String,
}

impl Repository for SqlRepository {
    fn name(&self) -> String {
        format!("sql:{}", self.connection)
    }
}

pub struct Service {
    pub repository: Arc<dyn Repository>,
    pub retries: u32,
}

pub struct Controller {
    pub service: Arc<Service>,
    pub title: String,
}

pub struct Plain;

pub struct TwoWays {
    pub first: Option<String>,
    pub second: Option<String>,
}

pub struct Fuse;

pub struct Panel {
    pub plain: Option<Arc<Plain>>,
    pub fuse: Option<Arc<Fuse>>,
}

pub struct Chicken {
    pub egg: Arc<Egg>,
}

pub struct Egg {
    pub chicken: Option<Arc<Chicken>>,
}

pub struct Node {
    pub next: Option<Arc<Node>>,
}

impl Node {
    pub fn chain_length(&self) -> usize {
        1 + self.next.as_ref().map_or(0, |next| next.chain_length())
    }
}

pub struct Hidden;

pub trait Orphan: Send + Sync {}

pub struct Unregistered;

pub fn catalog() -> InMemoryTypeCatalog {
    InMemoryTypeCatalog::new()
        .with(TypeDescriptor::abstract_type::<dyn Repository>(module_path!()))
        .with(
            TypeDescriptor::composite::<SqlRepository>(module_path!())
                .constructor(vec![Parameter::required::<String>("connection")], |args| {
                    Ok(SqlRepository {
                        connection: args.required::<String>(0)?.to_string(),
                    })
                })
                .implements::<dyn Repository>(|r| r)
                .build(),
        )
        .with(
            TypeDescriptor::composite::<Service>(module_path!())
                .constructor(
                    vec![
                        Parameter::required::<dyn Repository>("repository"),
                        Parameter::required::<u32>("retries"),
                    ],
                    |args| {
                        Ok(Service {
                            repository: args.required::<dyn Repository>(0)?,
                            retries: *args.required::<u32>(1)?,
                        })
                    },
                )
                .build(),
        )
        .with(
            TypeDescriptor::composite::<Controller>(module_path!())
                .constructor(
                    vec![
                        Parameter::required::<Service>("service"),
                        Parameter::required::<String>("title"),
                    ],
                    |args| {
                        Ok(Controller {
                            service: args.required::<Service>(0)?,
                            title: args.required::<String>(1)?.to_string(),
                        })
                    },
                )
                .build(),
        )
        .with(
            TypeDescriptor::composite::<Plain>(module_path!())
                .constructor(Vec::new(), |_| Ok(Plain))
                .build(),
        )
        .with(
            TypeDescriptor::composite::<TwoWays>(module_path!())
                .constructor(Vec::new(), |_| {
                    Ok(TwoWays {
                        first: None,
                        second: None,
                    })
                })
                .constructor(vec![Parameter::required::<String>("first")], |args| {
                    Ok(TwoWays {
                        first: args.get::<String>(0).map(|s| s.to_string()),
                        second: None,
                    })
                })
                .constructor(
                    vec![
                        Parameter::required::<String>("first"),
                        Parameter::required::<String>("second"),
                    ],
                    |args| {
                        Ok(TwoWays {
                            first: args.get::<String>(0).map(|s| s.to_string()),
                            second: args.get::<String>(1).map(|s| s.to_string()),
                        })
                    },
                )
                .build(),
        )
        .with(
            TypeDescriptor::composite::<Fuse>(module_path!())
                .constructor(Vec::new(), |_| -> activator_domain::Result<Fuse> {
                    panic!("fuse blown")
                })
                .build(),
        )
        .with(
            TypeDescriptor::composite::<Panel>(module_path!())
                .constructor(
                    vec![
                        Parameter::required::<Plain>("plain"),
                        Parameter::optional::<Fuse>("fuse"),
                    ],
                    |args| {
                        Ok(Panel {
                            plain: args.get::<Plain>(0),
                            fuse: args.get::<Fuse>(1),
                        })
                    },
                )
                .build(),
        )
        .with(
            TypeDescriptor::composite::<Chicken>(module_path!())
                .constructor(vec![Parameter::required::<Egg>("egg")], |args| {
                    Ok(Chicken {
                        egg: args.required::<Egg>(0)?,
                    })
                })
                .build(),
        )
        .with(
            TypeDescriptor::composite::<Egg>(module_path!())
                .constructor(vec![Parameter::optional::<Chicken>("chicken")], |args| {
                    Ok(Egg {
                        chicken: args.get::<Chicken>(0),
                    })
                })
                .build(),
        )
        .with(
            TypeDescriptor::composite::<Node>(module_path!())
                .constructor(vec![Parameter::required::<Node>("next")], |args| {
                    Ok(Node {
                        next: args.get::<Node>(0),
                    })
                })
                .build(),
        )
        .with(
            TypeDescriptor::composite::<Hidden>(module_path!())
                .non_public_constructor(Vec::new(), |_| Ok(Hidden))
                .build(),
        )
        .with(TypeDescriptor::abstract_type::<dyn Orphan>(module_path!()))
}

pub fn builder() -> ActivatorBuilder {
    AnythingActivator::builder().catalog(Arc::new(catalog()))
}

pub fn activator() -> AnythingActivator {
    builder().build().expect("activator")
}
