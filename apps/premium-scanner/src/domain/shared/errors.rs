//! Domain errors for the premium scanner.

use std::fmt;

/// Domain-level errors that can occur in business logic.
///
/// These errors are independent of infrastructure concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid value for a field.
    InvalidValue {
        /// Field name.
        field: String,
        /// Error message.
        message: String,
    },

    /// Unrecognized option side tag.
    UnknownOptionSide {
        /// The tag as received.
        tag: String,
    },
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { field, message } => {
                write!(f, "Invalid value for '{field}': {message}")
            }
            Self::UnknownOptionSide { tag } => {
                write!(f, "Unknown option side '{tag}' (expected PE or CE)")
            }
        }
    }
}

impl std::error::Error for DomainError {}
