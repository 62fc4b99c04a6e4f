//! Error types for the Order store.

use crate::customer_actor::CustomerError;
use crate::model::CustomerId;
use crate::product_actor::ProductError;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The order references a customer that does not exist.
    #[error("Invalid customer ID.")]
    CustomerNotFound(CustomerId),

    /// None of the requested products exist.
    #[error("No valid products found for provided IDs.")]
    NoValidProducts,

    /// A sum of order amounts does not fit in a `Decimal`.
    #[error("Order amount overflow.")]
    TotalOverflow,

    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// Resolving the customer failed.
    #[error(transparent)]
    Customer(#[from] CustomerError),

    /// Resolving the products failed.
    #[error(transparent)]
    Product(#[from] ProductError),

    /// The order store could not be reached.
    #[error("Order store unavailable: {0}")]
    StoreUnavailable(String),
}

impl OrderError {
    pub fn code(&self) -> &'static str {
        match self {
            OrderError::CustomerNotFound(_) => "CustomerNotFound",
            OrderError::NoValidProducts => "NoValidProducts",
            OrderError::TotalOverflow => "TotalOverflow",
            OrderError::NotFound(_) => "OrderNotFound",
            OrderError::Customer(e) => e.code(),
            OrderError::Product(e) => e.code(),
            OrderError::StoreUnavailable(_) => "UnknownError",
        }
    }
}
