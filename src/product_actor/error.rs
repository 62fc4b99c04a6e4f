//! Error types for the Product store.

use crate::validation::ValidationError;
use thiserror::Error;

/// Errors that can occur during product operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// The requested product was not found.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// Restocking would push the stock past `u32::MAX`.
    #[error("Stock overflow for {name}: {stock} + {amount}")]
    StockOverflow { name: String, stock: u32, amount: u32 },

    /// The product store could not be reached.
    #[error("Product store unavailable: {0}")]
    StoreUnavailable(String),
}

impl ProductError {
    pub fn code(&self) -> &'static str {
        match self {
            ProductError::Invalid(e) => e.code(),
            ProductError::NotFound(_) => "ProductNotFound",
            ProductError::StockOverflow { .. } => "StockOverflow",
            ProductError::StoreUnavailable(_) => "UnknownError",
        }
    }
}
