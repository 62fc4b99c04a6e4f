//! Create and update operations.

use super::{
    BulkCreateCustomersPayload, BulkCustomersInput, CreateCustomerPayload, CrmService,
    CustomerInput, OrderInput, OrderPayload, OrderStatusInput, ProductInput, ProductPatch,
    ProductPayload, UpdateLowStockProductsPayload, CUSTOMER_CREATED,
};
use crate::context::RequestContext;
use crate::customer_actor::CustomerError;
use crate::error::CrmError;
use crate::model::{CustomerCreate, OrderCreate, ProductCreate, ProductUpdate};
use crate::validation::ValidationError;
use tracing::{info, instrument, warn};

impl CrmService {
    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id))]
    pub async fn create_customer(
        &self,
        ctx: &RequestContext,
        input: CustomerInput,
    ) -> Result<CreateCustomerPayload, CrmError> {
        let customer = self
            .customers
            .create_customer(customer_params(ctx, input))
            .await?;
        Ok(CreateCustomerPayload {
            customer,
            message: CUSTOMER_CREATED.to_string(),
        })
    }

    /// Creates each customer independently, in input order.
    ///
    /// Successes are kept even when other inputs fail; each failure becomes one
    /// error string. A repeated email within the batch fails like any other
    /// duplicate, because the earlier input has already been inserted.
    #[instrument(skip(self, ctx, input), fields(request_id = %ctx.request_id, size = input.input.len()))]
    pub async fn bulk_create_customers(
        &self,
        ctx: &RequestContext,
        input: BulkCustomersInput,
    ) -> Result<BulkCreateCustomersPayload, CrmError> {
        let mut customers = Vec::new();
        let mut errors = Vec::new();

        for item in input.input {
            let name = item.name.clone();
            match self.customers.create_customer(customer_params(ctx, item)).await {
                Ok(customer) => customers.push(customer),
                Err(e) => {
                    warn!(%name, error = %e, "Bulk item rejected");
                    errors.push(bulk_error_message(&name, &e));
                }
            }
        }

        info!(created = customers.len(), failed = errors.len(), "Bulk create finished");
        Ok(BulkCreateCustomersPayload { customers, errors })
    }

    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id))]
    pub async fn create_product(
        &self,
        ctx: &RequestContext,
        input: ProductInput,
    ) -> Result<ProductPayload, CrmError> {
        let product = self
            .products
            .create_product(ProductCreate {
                name: input.name,
                price: input.price,
                stock: input.stock.unwrap_or(0),
            })
            .await?;
        Ok(ProductPayload { product })
    }

    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id))]
    pub async fn update_product(
        &self,
        ctx: &RequestContext,
        input: ProductPatch,
    ) -> Result<ProductPayload, CrmError> {
        let product = self
            .products
            .update_product(
                input.id,
                ProductUpdate {
                    price: input.price,
                    stock: input.stock,
                },
            )
            .await?;
        Ok(ProductPayload { product })
    }

    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id))]
    pub async fn create_order(
        &self,
        ctx: &RequestContext,
        input: OrderInput,
    ) -> Result<OrderPayload, CrmError> {
        let order = self
            .orders
            .create_order(OrderCreate {
                customer_id: input.customer_id,
                product_ids: input.product_ids,
                order_date: input.order_date.unwrap_or(ctx.now),
            })
            .await?;
        Ok(OrderPayload {
            order: self.order_node(order).await?,
        })
    }

    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id))]
    pub async fn update_order_status(
        &self,
        ctx: &RequestContext,
        input: OrderStatusInput,
    ) -> Result<OrderPayload, CrmError> {
        let order = self.orders.update_status(input.id, input.status).await?;
        Ok(OrderPayload {
            order: self.order_node(order).await?,
        })
    }

    /// Adds 10 to the stock of every product below 10, as one store step.
    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id))]
    pub async fn update_low_stock_products(
        &self,
        ctx: &RequestContext,
    ) -> Result<UpdateLowStockProductsPayload, CrmError> {
        let updated_products = self.products.restock_low_stock().await?;
        let count = updated_products.len();
        Ok(UpdateLowStockProductsPayload {
            success: format!("{count} products updated successfully."),
            count,
            updated_products,
        })
    }
}

fn customer_params(ctx: &RequestContext, input: CustomerInput) -> CustomerCreate {
    CustomerCreate {
        name: input.name,
        email: input.email,
        phone: input.phone,
        created_at: ctx.now,
    }
}

fn bulk_error_message(name: &str, error: &CustomerError) -> String {
    match error {
        CustomerError::DuplicateEmail(email) => format!("Email {email} already exists."),
        CustomerError::Invalid(ValidationError::InvalidPhoneFormat(_)) => {
            format!("Invalid phone format for {name}.")
        }
        other => other.to_string(),
    }
}
