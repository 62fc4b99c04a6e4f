//! Error types for the Customer store.

use crate::validation::ValidationError;
use thiserror::Error;

/// Errors that can occur during customer operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CustomerError {
    /// A field failed validation.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// Another customer already uses this email.
    #[error("Email already exists.")]
    DuplicateEmail(String),

    /// The requested customer was not found.
    #[error("Customer not found: {0}")]
    NotFound(String),

    /// The customer store could not be reached.
    #[error("Customer store unavailable: {0}")]
    StoreUnavailable(String),
}

impl CustomerError {
    pub fn code(&self) -> &'static str {
        match self {
            CustomerError::Invalid(e) => e.code(),
            CustomerError::DuplicateEmail(_) => "DuplicateEmail",
            CustomerError::NotFound(_) => "CustomerNotFound",
            CustomerError::StoreUnavailable(_) => "UnknownError",
        }
    }
}
