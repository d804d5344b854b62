//! Value objects of the activation domain

mod activation;
mod descriptor;
mod type_key;
mod type_stack;
mod value;

pub use activation::{ActivationKind, ActivationRecord, ErrorRecord, NameFormat};
pub use descriptor::{
    Arguments, ConstructorDescriptor, MethodDescriptor, Parameter, Receiver, TypeBuilder,
    TypeDescriptor, TypeKind, Upcast, Visibility, code_module_of,
};
pub use type_key::TypeKey;
pub use type_stack::TypeStack;
pub use value::{SearchAnchor, Supplier, Value};
