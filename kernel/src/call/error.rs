//! `CallError`: a failure raised by a user-supplied callable.

use std::fmt;

/// Error class for non-numeric input to a numeric function.
pub const CLASS_INVALID_INPUT: &str = "invalid_input";
/// Error class for an argument of the wrong type or shape.
pub const CLASS_TYPE_ERROR: &str = "type_error";
/// Error class for a required argument that was not supplied.
pub const CLASS_MISSING_ARGUMENT: &str = "missing_argument";
/// Error class for a panic caught by a failure-isolating adapter.
pub const CLASS_PANIC: &str = "panic";

/// A callable failure: an error class plus a human-readable message.
///
/// The class is a short machine-matchable tag (see the `CLASS_*`
/// constants); callables may use their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallError {
    pub class: String,
    pub message: String,
}

impl CallError {
    #[must_use]
    pub fn new(class: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(CLASS_INVALID_INPUT, message)
    }

    #[must_use]
    pub fn type_error(message: impl Into<String>) -> Self {
        Self::new(CLASS_TYPE_ERROR, message)
    }

    #[must_use]
    pub fn missing_argument(name: &str) -> Self {
        Self::new(
            CLASS_MISSING_ARGUMENT,
            format!("argument {name:?} is missing, with no default"),
        )
    }

    #[must_use]
    pub fn panic(message: impl Into<String>) -> Self {
        Self::new(CLASS_PANIC, message)
    }

    #[must_use]
    pub fn is_class(&self, class: &str) -> bool {
        self.class == class
    }
}

impl fmt::Display for CallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.class, self.message)
    }
}

impl std::error::Error for CallError {}
