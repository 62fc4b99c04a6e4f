//! List-query helpers: `orderBy` parsing and sorting, and Relay-style
//! connection pagination.

pub mod connection;
pub mod ordering;

pub use connection::*;
pub use ordering::*;

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum QueryError {
    #[error("Cannot order by \"{0}\".")]
    InvalidOrderBy(String),

    #[error("Invalid cursor: {0}")]
    InvalidCursor(String),
}

impl QueryError {
    pub fn code(&self) -> &'static str {
        match self {
            QueryError::InvalidOrderBy(_) => "InvalidOrderBy",
            QueryError::InvalidCursor(_) => "InvalidCursor",
        }
    }
}
