//! Core error types.

use thiserror::Error;

/// Core errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A required field was missing or blank.
    #[error("validation error: {message}")]
    Validation {
        /// Name of the offending field.
        field: &'static str,
        /// Human readable description.
        message: String,
    },
}

impl Error {
    /// Create a validation error for `field`.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Error::Validation {
            field,
            message: message.into(),
        }
    }

    /// The field this error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Error::Validation { field, .. } => *field,
        }
    }
}

/// Result alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
