//! # Order Client
//!
//! Provides a high-level API for the Order store. Reference resolution happens
//! in the store's `on_create` hook; this client only sends requests and maps errors.
use crate::model::{Order, OrderCreate, OrderId, OrderStatus, OrderUpdate};
use crate::order_actor::OrderError;
use async_trait::async_trait;
use record_store::{RecordClient, StoreClient, StoreError};
use tracing::{debug, info, instrument};

/// Client for interacting with the Order store.
#[derive(Clone)]
pub struct OrderClient {
    inner: StoreClient<Order>,
}

impl OrderClient {
    pub fn new(inner: StoreClient<Order>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<Order, OrderError> {
        debug!("create_order called");
        info!("Sending create_order to store");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner
            .update(id, OrderUpdate { status })
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl RecordClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &StoreClient<Order> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        match e {
            StoreError::NotFound(id) => OrderError::NotFound(id),
            other => other
                .downcast_record::<OrderError>()
                .unwrap_or_else(|e| OrderError::StoreUnavailable(e.to_string())),
        }
    }
}
