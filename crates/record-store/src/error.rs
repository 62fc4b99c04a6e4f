//! # Store Errors
//!
//! Errors raised by the store itself, as opposed to the record-level errors that
//! travel boxed inside [`StoreError::RecordError`].

/// Errors that can occur within the record store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store closed")]
    StoreClosed,
    #[error("Store dropped response channel")]
    ResponseDropped,
    #[error("Record not found: {0}")]
    NotFound(String),
    #[error("Unique key already taken: {0}")]
    UniqueViolation(String),
    #[error("Record error: {0}")]
    RecordError(Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    pub(crate) fn record<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        StoreError::RecordError(Box::new(error))
    }

    /// Recovers the typed record error, if that is what this is.
    ///
    /// Returns the original error unchanged when it is not a `RecordError` of type `E`.
    pub fn downcast_record<E>(self) -> Result<E, StoreError>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match self {
            StoreError::RecordError(inner) => match inner.downcast::<E>() {
                Ok(error) => Ok(*error),
                Err(inner) => Err(StoreError::RecordError(inner)),
            },
            other => Err(other),
        }
    }
}
