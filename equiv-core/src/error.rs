//! Error types for the object model

use std::fmt;
use thiserror::Error;

/// Errors raised by the object model itself
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Class {class} does not contain field {field}.")]
    NoSuchField { class: String, field: String },

    #[error("Type error: field {field} expects {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: String,
        actual: String,
    },

    #[error("Cannot instantiate {class}: {reason}")]
    NotInstantiable { class: String, reason: String },

    #[error("Constructor of {class} threw {thrown}")]
    ConstructorFailed { class: String, thrown: Thrown },

    #[error("Unknown type: {0}")]
    UnknownType(String),

    #[error("Duplicate definition: {0}")]
    Duplicate(String),
}

impl ModelError {
    /// Create a not-instantiable error
    pub fn not_instantiable(class: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::NotInstantiable {
            class: class.into(),
            reason: reason.into(),
        }
    }

    /// Create a missing-field error
    pub fn no_such_field(class: impl Into<String>, field: impl Into<String>) -> Self {
        Self::NoSuchField {
            class: class.into(),
            field: field.into(),
        }
    }
}

/// Result type for object model operations
pub type ModelResult<T> = std::result::Result<T, ModelError>;

/// An exception thrown by a behaviour closure of a class
///
/// The verifier never swallows these: they end up as the cause of the
/// reported violation, message included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thrown {
    /// Simple name of the exception type, e.g. `NullPointerException`
    pub exception: String,
    /// Optional detail message
    pub message: Option<String>,
}

impl Thrown {
    /// Create a thrown exception with a message
    pub fn new(exception: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            exception: exception.into(),
            message: Some(message.into()),
        }
    }

    /// Create a thrown exception without a message
    pub fn of(exception: impl Into<String>) -> Self {
        Self {
            exception: exception.into(),
            message: None,
        }
    }

    pub fn null_pointer() -> Self {
        Self::of("NullPointerException")
    }

    pub fn class_cast(message: impl Into<String>) -> Self {
        Self::new("ClassCastException", message)
    }

    pub fn illegal_state(message: impl Into<String>) -> Self {
        Self::new("IllegalStateException", message)
    }

    pub fn illegal_argument(message: impl Into<String>) -> Self {
        Self::new("IllegalArgumentException", message)
    }

    pub fn unsupported_operation(message: impl Into<String>) -> Self {
        Self::new("UnsupportedOperationException", message)
    }

    /// The detail message, or an empty string
    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or("")
    }
}

impl fmt::Display for Thrown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {}", self.exception, message),
            None => write!(f, "{}", self.exception),
        }
    }
}

impl std::error::Error for Thrown {}

/// Result of invoking a behaviour closure
pub type MethodResult<T> = std::result::Result<T, Thrown>;
