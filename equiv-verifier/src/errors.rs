//! Verifier error types

use equiv_core::{MethodResult, ModelError, Thrown};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Main verifier error type
#[derive(Error, Debug)]
pub enum VerifierError {
    /// The test author configured something that cannot work
    #[error("Precondition: {0}")]
    Configuration(String),

    /// No strategy could produce an instance of a class
    #[error("Could not instantiate {class}: {reason}")]
    Instantiation { class: String, reason: String },

    /// The class under test breaks the equality contract
    #[error("{0}")]
    Violation(#[from] Violation),

    /// Object model failure
    #[error("Object model error: {0}")]
    Model(#[from] ModelError),

    /// Failure of the surrounding execution machinery
    #[error("Execution error: {0}")]
    Execution(String),
}

/// Result type alias
pub type VerifierResult<T> = std::result::Result<T, VerifierError>;

impl VerifierError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create an instantiation error
    pub fn instantiation(class: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Instantiation {
            class: class.into(),
            reason: reason.into(),
        }
    }

    /// The contract violation, if this error is one
    pub fn violation(&self) -> Option<&Violation> {
        match self {
            Self::Violation(violation) => Some(violation),
            _ => None,
        }
    }

    pub fn is_violation(&self) -> bool {
        matches!(self, Self::Violation(_))
    }
}

/// The checks of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CheckKind {
    Preconditions,
    Reflexivity,
    Symmetry,
    Transitivity,
    Consistency,
    NullTolerance,
    TypeTolerance,
    NullFields,
    HashConsistency,
    SignificantFields,
    Hierarchy,
    Examples,
}

impl CheckKind {
    /// Short property name used as the prefix of violation messages
    pub fn property(&self) -> &'static str {
        match self {
            CheckKind::Preconditions => "Precondition",
            CheckKind::Reflexivity => "Reflexivity",
            CheckKind::Symmetry => "Symmetry",
            CheckKind::Transitivity => "Transitivity",
            CheckKind::Consistency => "Consistency",
            CheckKind::NullTolerance => "Non-nullity",
            CheckKind::TypeTolerance => "Type-check",
            CheckKind::NullFields => "Non-nullity",
            CheckKind::HashConsistency => "hashCode",
            CheckKind::SignificantFields => "Significant fields",
            CheckKind::Hierarchy => "Subclass",
            CheckKind::Examples => "Relaxed equality",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A broken law of the equality contract
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{property}: {message}")]
pub struct Violation {
    /// Check that found the problem
    pub check: CheckKind,
    /// Short property name, e.g. "Symmetry"
    pub property: String,
    pub message: String,
    /// Fields the violation is attributed to
    pub fields: Vec<String>,
    /// Exception thrown by the class under test, if that is what went wrong
    pub cause: Option<Thrown>,
}

impl Violation {
    pub fn new(check: CheckKind, message: impl Into<String>) -> Self {
        Self {
            check,
            property: check.property().to_string(),
            message: message.into(),
            fields: Vec::new(),
            cause: None,
        }
    }

    /// A method of the class under test threw while `action` was probed
    pub fn thrown(check: CheckKind, action: &str, thrown: Thrown) -> Self {
        Self {
            cause: Some(thrown.clone()),
            ..Self::new(check, format!("{} throws {}", action, thrown))
        }
    }

    /// A suppressed warning whose check would have passed
    pub fn unnecessary_suppression(check: CheckKind, message: impl Into<String>) -> Self {
        Self::new(check, message).with_property("Unnecessary suppression")
    }

    pub fn with_property(mut self, property: impl Into<String>) -> Self {
        self.property = property.into();
        self
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.fields.push(field.into());
        self
    }

    pub fn with_cause(mut self, cause: Thrown) -> Self {
        self.cause = Some(cause);
        self
    }
}

/// Attach check context to exceptions thrown by the class under test
pub trait ThrownExt<T> {
    fn during(self, check: CheckKind, action: &str) -> VerifierResult<T>;
}

impl<T> ThrownExt<T> for MethodResult<T> {
    fn during(self, check: CheckKind, action: &str) -> VerifierResult<T> {
        self.map_err(|thrown| Violation::thrown(check, action, thrown).into())
    }
}

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;
