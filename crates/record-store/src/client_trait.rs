//! # RecordClient Trait
//!
//! Common interface for entity-specific clients, adding default `get` and `list`
//! methods on top of a generic `StoreClient`.
use crate::{Record, StoreClient, StoreError};
use async_trait::async_trait;

/// Trait for entity-specific clients to inherit the standard reads.
///
/// Implementors supply the inner client and a mapping from [`StoreError`] to
/// their own error type; `get` and `list` come for free.
#[async_trait]
pub trait RecordClient<T: Record>: Send + Sync {
    /// The entity-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic StoreClient.
    fn inner(&self) -> &StoreClient<T>;

    /// Map store errors to the entity-specific error type.
    fn map_error(e: StoreError) -> Self::Error;

    /// Fetch a record by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every record, in creation order.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }
}
