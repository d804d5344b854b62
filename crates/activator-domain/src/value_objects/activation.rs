//! Diagnostics produced by a resolution
//!
//! Every node the engine visits leaves an [`ActivationRecord`]; every failure
//! it swallows leaves an [`ErrorRecord`]. Both render as text for humans and
//! serialize to JSON for tooling.

use std::fmt;

use serde::Serialize;

use super::TypeKey;

/// How a node of the object graph was produced
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ActivationKind {
    /// Returned by an instance-supply rule
    InstanceRule,
    /// Zero value of a value kind, or synthesized text
    ValueKind,
    /// Instantiated without a constructor
    NoConstructor,
    /// Built by invoking a constructor
    Constructed,
    /// Replaced by the fallback because the chain got too deep
    RecursionLimit,
    /// An abstract request answered with a concrete substitute
    AbstractSubstitution,
}

impl fmt::Display for ActivationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InstanceRule => "ActivateInstanceRule",
            Self::ValueKind => "ValueType",
            Self::NoConstructor => "NoConstructor",
            Self::Constructed => "Constructed",
            Self::RecursionLimit => "RecursionLimit",
            Self::AbstractSubstitution => "AbstractSubstitution",
        };
        f.write_str(label)
    }
}

/// Name format used when rendering records
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NameFormat {
    /// Last path segment only
    #[default]
    Short,
    /// Full path
    Full,
}

impl NameFormat {
    fn apply(self, key: &TypeKey) -> String {
        match self {
            Self::Short => key.short_name(),
            Self::Full => key.full_name().to_string(),
        }
    }
}

/// One node of the activation tree
#[derive(Clone, Debug, Serialize)]
pub struct ActivationRecord {
    how: ActivationKind,
    #[serde(serialize_with = "serialize_stack")]
    type_stack: Vec<TypeKey>,
    constructor: Option<String>,
    parameters: Vec<String>,
}

impl ActivationRecord {
    /// Record for a node, with the stack as it was when the node was built
    pub fn new(how: ActivationKind, type_stack: &[TypeKey]) -> Self {
        Self {
            how,
            type_stack: type_stack.to_vec(),
            constructor: None,
            parameters: Vec::new(),
        }
    }

    /// Attach the chosen constructor and the rendered arguments
    #[must_use]
    pub fn with_constructor(mut self, signature: String, parameters: Vec<String>) -> Self {
        self.constructor = Some(signature);
        self.parameters = parameters;
        self
    }

    /// How the node was produced
    pub fn how(&self) -> ActivationKind {
        self.how
    }

    /// Stack snapshot, outermost first
    pub fn type_stack(&self) -> &[TypeKey] {
        &self.type_stack
    }

    /// Type this record describes
    pub fn requested(&self) -> Option<&TypeKey> {
        self.type_stack.last()
    }

    /// Chosen constructor signature, if one was invoked
    pub fn constructor(&self) -> Option<&str> {
        self.constructor.as_deref()
    }

    /// Rendered argument values
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    /// Render as `({how} [A->B ] ctor( p1,p2 ))`
    pub fn render(&self, names: NameFormat) -> String {
        let stack = self
            .type_stack
            .iter()
            .map(|key| names.apply(key))
            .collect::<Vec<_>>()
            .join("->");
        let constructor = self.constructor.as_deref().unwrap_or("");
        format!(
            "({} [{stack} ] {constructor}( {} ))",
            self.how,
            self.parameters.join(",")
        )
    }
}

impl fmt::Display for ActivationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(NameFormat::Short))
    }
}

/// A failure swallowed while building a node
#[derive(Clone, Debug, Serialize)]
pub struct ErrorRecord {
    context: ActivationRecord,
    error: String,
}

impl ErrorRecord {
    /// Capture an error together with where it happened
    pub fn new(context: ActivationRecord, error: &crate::error::Error) -> Self {
        Self {
            context,
            error: error.to_string(),
        }
    }

    /// Where the failure happened
    pub fn context(&self) -> &ActivationRecord {
        &self.context
    }

    /// Rendered error
    pub fn error(&self) -> &str {
        &self.error
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {}", self.context, self.error)
    }
}

fn serialize_stack<S: serde::Serializer>(stack: &[TypeKey], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(stack.iter().map(TypeKey::full_name))
}
