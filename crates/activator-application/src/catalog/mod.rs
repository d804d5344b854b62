//! Type catalog implementations

mod in_memory;
mod linked;

pub use in_memory::InMemoryTypeCatalog;
pub use linked::LinkedTypeCatalog;
