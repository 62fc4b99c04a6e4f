//! Service-level error aggregating every store's error enum.

use crate::customer_actor::CustomerError;
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;
use crate::query::QueryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrmError {
    #[error(transparent)]
    Customer(#[from] CustomerError),

    #[error(transparent)]
    Product(#[from] ProductError),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("Failed to encode response: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl CrmError {
    /// Stable error code reported in API responses.
    pub fn code(&self) -> &'static str {
        match self {
            CrmError::Customer(e) => e.code(),
            CrmError::Product(e) => e.code(),
            CrmError::Order(e) => e.code(),
            CrmError::Query(e) => e.code(),
            CrmError::Encoding(_) => "UnknownError",
        }
    }
}
