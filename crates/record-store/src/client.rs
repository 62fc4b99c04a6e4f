//! # Store Client
//!
//! The generic client for communicating with a store task.

use crate::error::StoreError;
use crate::message::StoreRequest;
use crate::record::Record;
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for a `StoreActor<T>`.
///
/// Holds only the channel sender, so clones are cheap and can be shared across tasks.
/// Every method sends one request and awaits the one-shot reply.
pub struct StoreClient<T: Record> {
    sender: mpsc::Sender<StoreRequest<T>>,
}

impl<T: Record> Clone for StoreClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: Record> StoreClient<T> {
    pub fn new(sender: mpsc::Sender<StoreRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn create(&self, params: T::Create) -> Result<T, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.send(StoreRequest::Create { params, respond_to }).await?;
        response.await.map_err(|_| StoreError::ResponseDropped)?
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.send(StoreRequest::Get { id, respond_to }).await?;
        response.await.map_err(|_| StoreError::ResponseDropped)?
    }

    pub async fn get_many(&self, ids: Vec<T::Id>) -> Result<Vec<T>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.send(StoreRequest::GetMany { ids, respond_to }).await?;
        response.await.map_err(|_| StoreError::ResponseDropped)?
    }

    pub async fn list(&self) -> Result<Vec<T>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.send(StoreRequest::List { respond_to }).await?;
        response.await.map_err(|_| StoreError::ResponseDropped)?
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.send(StoreRequest::Update {
            id,
            update,
            respond_to,
        })
        .await?;
        response.await.map_err(|_| StoreError::ResponseDropped)?
    }

    pub async fn perform_action_all(
        &self,
        action: T::Action,
    ) -> Result<Vec<T::ActionResult>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.send(StoreRequest::ActionAll { action, respond_to })
            .await?;
        response.await.map_err(|_| StoreError::ResponseDropped)?
    }

    async fn send(&self, request: StoreRequest<T>) -> Result<(), StoreError> {
        self.sender
            .send(request)
            .await
            .map_err(|_| StoreError::StoreClosed)
    }
}
