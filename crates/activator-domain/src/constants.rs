//! Domain layer constants
//!
//! Defaults shared by the engine, the built-in rules and the configuration
//! layer. Infrastructure-specific constants remain in
//! `activator_infrastructure::constants`.

// ============================================================================
// RESOLUTION CONSTANTS
// ============================================================================

/// Default maximum number of frames on the active resolution chain
pub const DEFAULT_RECURSION_LIMIT: usize = 99;

/// Prefix of the synthesized value for a text-kind request
pub const TEXT_VALUE_PREFIX: &str = "for";

// ============================================================================
// TYPE SEARCH CONSTANTS
// ============================================================================

/// Code modules skipped by the base-location scan unless configured otherwise
///
/// Covers the standard library, the rule infrastructure itself, and the
/// logging, registration and mocking crates a test binary typically links.
pub const DEFAULT_IGNORED_MODULES: &[&str] = &[
    "core", "std", "alloc", "activator", "tracing", "linkme", "mockall",
];

/// Code module reported for built-in primitive and text descriptors
pub const BUILTIN_MODULE: &str = "core";
