use crate::clients::{CustomerClient, OrderClient, ProductClient};
use crate::service::CrmService;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info};

#[derive(Debug, Error)]
#[error("Store task failed: {0}")]
pub struct ShutdownError(String);

/// The running CRM stores.
pub struct CrmSystem {
    customers: CustomerClient,
    products: ProductClient,
    orders: OrderClient,
    handles: Vec<JoinHandle<()>>,
}

impl CrmSystem {
    /// Spawns the customer, product and order stores, each with a channel of `buffer`.
    pub fn new(buffer: usize) -> Self {
        let (customer_store, customers) = crate::customer_actor::new(buffer);
        let (product_store, products) = crate::product_actor::new(buffer);
        let (order_store, orders) = crate::order_actor::new(buffer);

        let customer_handle = tokio::spawn(customer_store.run(()));
        let product_handle = tokio::spawn(product_store.run(()));
        let order_handle = tokio::spawn(order_store.run((customers.clone(), products.clone())));

        info!(buffer, "CRM stores started");
        Self {
            customers,
            products,
            orders,
            handles: vec![customer_handle, product_handle, order_handle],
        }
    }

    pub fn customers(&self) -> &CustomerClient {
        &self.customers
    }

    pub fn products(&self) -> &ProductClient {
        &self.products
    }

    pub fn orders(&self) -> &OrderClient {
        &self.orders
    }

    pub fn service(&self) -> CrmService {
        CrmService::new(self.customers.clone(), self.products.clone(), self.orders.clone())
    }

    /// Closes the store channels and waits for every store task to exit.
    pub async fn shutdown(self) -> Result<(), ShutdownError> {
        info!("Shutting down CRM stores...");
        // Customer and product stores exit only after the order store releases its context.
        drop(self.orders);
        drop(self.customers);
        drop(self.products);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Store task failed: {:?}", e);
                return Err(ShutdownError(format!("{e:?}")));
            }
        }
        info!("CRM shutdown complete.");
        Ok(())
    }
}
