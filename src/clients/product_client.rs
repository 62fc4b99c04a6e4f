use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};
use async_trait::async_trait;
use record_store::{RecordClient, StoreClient, StoreError};
use tracing::{debug, info, instrument};

/// Client for interacting with the Product store.
#[derive(Clone)]
pub struct ProductClient {
    inner: StoreClient<Product>,
}

impl ProductClient {
    pub fn new(inner: StoreClient<Product>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Fetches the products that exist among `ids`, in request order.
    #[instrument(skip(self))]
    pub async fn get_many(&self, ids: Vec<ProductId>) -> Result<Vec<Product>, ProductError> {
        debug!("Sending request");
        self.inner.get_many(ids).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Tops up every product below the low-stock threshold in one store step.
    ///
    /// Returns the restocked products in ID order.
    #[instrument(skip(self))]
    pub async fn restock_low_stock(&self) -> Result<Vec<Product>, ProductError> {
        let results = self
            .inner
            .perform_action_all(ProductAction::low_stock_restock())
            .await
            .map_err(Self::map_error)?;

        let restocked: Vec<Product> = results
            .into_iter()
            .filter_map(|result| match result {
                ProductActionResult::Restocked(product) => Some(product),
                ProductActionResult::Unchanged => None,
            })
            .collect();
        info!(count = restocked.len(), "Restocked low-stock products");
        Ok(restocked)
    }
}

#[async_trait]
impl RecordClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &StoreClient<Product> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        match e {
            StoreError::NotFound(id) => ProductError::NotFound(id),
            other => other
                .downcast_record::<ProductError>()
                .unwrap_or_else(|e| ProductError::StoreUnavailable(e.to_string())),
        }
    }
}
