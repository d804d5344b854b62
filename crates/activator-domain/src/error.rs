//! Error handling types
//!
//! Two classes of error exist. Configuration errors describe a rule the caller
//! could never have satisfied (a factory method that does not exist, a return
//! type that cannot stand in for the target) and always propagate to the
//! caller. Every other variant is a resolution-time failure: the engine records
//! it against the node where it happened and carries on with an absent value.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Activator
#[derive(Error, Debug)]
pub enum Error {
    /// A rule was declared in a way that can never work
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// No type-search rule produced a concrete type for an abstract request
    #[error("No concrete type found for {type_name}")]
    NoConcreteType {
        /// The abstract type that was requested
        type_name: String,
    },

    /// The requested type is neither built in nor known to the catalog
    #[error("Unknown type {type_name}: not registered in the type catalog")]
    UnknownType {
        /// The type that was requested
        type_name: String,
    },

    /// A composite type has no usable constructor and no direct instantiation
    #[error("No constructor available for {type_name}")]
    NoConstructor {
        /// The type that could not be instantiated
        type_name: String,
    },

    /// A constructor, factory method or instantiation function failed
    #[error("Failed to construct {type_name}: {message}")]
    Construction {
        /// The type being constructed
        type_name: String,
        /// Description of the failure
        message: String,
    },

    /// A constructor asked for an argument that was not resolved
    #[error("Missing argument {index} ({type_name})")]
    MissingArgument {
        /// Position of the argument
        index: usize,
        /// Expected argument type
        type_name: String,
    },

    /// A value could not be converted to the requested type
    #[error("{from} is not assignable to {to}")]
    NotAssignable {
        /// Runtime type of the value
        from: String,
        /// Requested type
        to: String,
    },

    /// The mocking adapter could not produce a double
    #[error("Mocking library error: {message}")]
    MockingLibrary {
        /// Description of the adapter failure
        message: String,
    },

    /// The root request could not be resolved
    #[error("Could not resolve {type_name}: {}", reasons.join("; "))]
    Unresolvable {
        /// The root type
        type_name: String,
        /// Messages of the errors recorded during resolution
        reasons: Vec<String>,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Whether this error must propagate instead of being recorded
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}

// Resolution error creation methods
impl Error {
    /// Create a no-concrete-type error
    pub fn no_concrete_type<S: Into<String>>(type_name: S) -> Self {
        Self::NoConcreteType {
            type_name: type_name.into(),
        }
    }

    /// Create an unknown type error
    pub fn unknown_type<S: Into<String>>(type_name: S) -> Self {
        Self::UnknownType {
            type_name: type_name.into(),
        }
    }

    /// Create a no-constructor error
    pub fn no_constructor<S: Into<String>>(type_name: S) -> Self {
        Self::NoConstructor {
            type_name: type_name.into(),
        }
    }

    /// Create a construction error
    pub fn construction<S: Into<String>, M: Into<String>>(type_name: S, message: M) -> Self {
        Self::Construction {
            type_name: type_name.into(),
            message: message.into(),
        }
    }

    /// Create a missing argument error
    pub fn missing_argument<S: Into<String>>(index: usize, type_name: S) -> Self {
        Self::MissingArgument {
            index,
            type_name: type_name.into(),
        }
    }

    /// Create a not-assignable error
    pub fn not_assignable<F: Into<String>, T: Into<String>>(from: F, to: T) -> Self {
        Self::NotAssignable {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Create a mocking library error
    pub fn mocking_library<S: Into<String>>(message: S) -> Self {
        Self::MockingLibrary {
            message: message.into(),
        }
    }

    /// Create a construction error from a caught panic payload
    pub fn from_panic<S: Into<String>>(type_name: S, payload: &(dyn Any + Send)) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(ToString::to_string)
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        Self::construction(type_name, format!("panicked: {message}"))
    }

    /// Create an unresolvable root error
    pub fn unresolvable<S: Into<String>>(type_name: S, reasons: Vec<String>) -> Self {
        Self::Unresolvable {
            type_name: type_name.into(),
            reasons,
        }
    }
}

// I/O and internal error creation methods
impl Error {
    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Run user-supplied construction code, turning a panic into
/// [`Error::Construction`] for `type_name`
pub fn catch_construction_panic<T, F>(type_name: &str, construct: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    catch_unwind(AssertUnwindSafe(construct))
        .unwrap_or_else(|payload| Err(Error::from_panic(type_name, payload.as_ref())))
}
