use crate::customer_actor::CustomerError;
use crate::model::{Customer, CustomerCreate, CustomerId};
use async_trait::async_trait;
use record_store::{RecordClient, StoreClient, StoreError};
use tracing::{debug, instrument};

/// Client for interacting with the Customer store.
#[derive(Clone)]
pub struct CustomerClient {
    inner: StoreClient<Customer>,
}

impl CustomerClient {
    pub fn new(inner: StoreClient<Customer>) -> Self {
        Self { inner }
    }

    /// Inserts a customer. A taken email fails with `DuplicateEmail`.
    #[instrument(skip(self))]
    pub async fn create_customer(&self, params: CustomerCreate) -> Result<Customer, CustomerError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Fetches the customers that exist among `ids`, in request order.
    #[instrument(skip(self))]
    pub async fn get_many(&self, ids: Vec<CustomerId>) -> Result<Vec<Customer>, CustomerError> {
        debug!("Sending request");
        self.inner.get_many(ids).await.map_err(Self::map_error)
    }
}

#[async_trait]
impl RecordClient<Customer> for CustomerClient {
    type Error = CustomerError;

    fn inner(&self) -> &StoreClient<Customer> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        match e {
            StoreError::UniqueViolation(email) => CustomerError::DuplicateEmail(email),
            StoreError::NotFound(id) => CustomerError::NotFound(id),
            other => other
                .downcast_record::<CustomerError>()
                .unwrap_or_else(|e| CustomerError::StoreUnavailable(e.to_string())),
        }
    }
}
