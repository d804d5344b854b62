//! Type-search rules
//!
//! Each rule decides *where* to look for a concrete type standing in for an
//! abstract request. The scanning itself is shared: candidates are
//! registered, concrete, and assignable to the request, visited in catalog
//! order.

mod anchor_module;
mod base_location;
mod defining_modules;
mod exact_type;
mod module;

pub use anchor_module::FindInAnchorModule;
pub use base_location::FindInBaseLocation;
pub use defining_modules::FindInDefiningModules;
pub use exact_type::ChooseExactType;
pub use module::FindInModule;

use activator_domain::value_objects::code_module_of;
use activator_domain::{RuleContext, SearchAnchor, TypeCatalog, TypeKey};
use tracing::trace;

/// First concrete type assignable to `request` found in `modules`
pub(crate) fn scan_modules<'m, I>(modules: I, request: &TypeKey, catalog: &dyn TypeCatalog) -> Option<TypeKey>
where
    I: IntoIterator<Item = &'m str>,
{
    modules.into_iter().find_map(|module| {
        let found = catalog
            .types_in_module(module)
            .into_iter()
            .find(|d| !d.is_abstract() && d.is_assignable_to(request))
            .map(|d| d.key());
        if let Some(key) = &found {
            trace!(module, request = %request, found = %key, "Concrete type found");
        }
        found
    })
}

/// First concrete type in `modules` whose full name ends with `suffix`
pub(crate) fn scan_modules_by_name<'m, I>(modules: I, suffix: &str, catalog: &dyn TypeCatalog) -> Option<TypeKey>
where
    I: IntoIterator<Item = &'m str>,
{
    modules.into_iter().find_map(|module| {
        catalog
            .types_in_module(module)
            .into_iter()
            .find(|d| !d.is_abstract() && d.key().name_ends_with(suffix))
            .map(|d| d.key())
    })
}

/// Code module containing `key`
///
/// Registered types answer from their descriptor; anything else falls back
/// to the first segment of the type name.
pub(crate) fn code_module_of_type(key: &TypeKey, catalog: &dyn TypeCatalog) -> &'static str {
    catalog
        .describe(key)
        .map_or_else(|| code_module_of(key.full_name().trim_start_matches("dyn ")), |d| d.code_module())
}

/// Code module of the anchor in `ctx`, if any
pub(crate) fn anchor_module(ctx: &RuleContext<'_>) -> Option<&'static str> {
    ctx.anchor
        .map(SearchAnchor::type_key)
        .map(|key| code_module_of_type(&key, ctx.catalog))
}
