//! [`Record`] implementation for [`Order`].
//!
//! The order store's context is `(CustomerClient, ProductClient)`. `on_create`
//! resolves both references before the order is inserted, so a failed lookup
//! leaves no order behind.

use super::OrderError;
use crate::clients::{CustomerClient, ProductClient};
use crate::model::{Order, OrderCreate, OrderId, OrderStatus, OrderUpdate, ProductId};
use async_trait::async_trait;
use record_store::{Record, RecordClient};
use rust_decimal::Decimal;
use tracing::debug;

/// Sums `amounts`, failing with `TotalOverflow` instead of panicking.
pub fn checked_total(amounts: impl IntoIterator<Item = Decimal>) -> Result<Decimal, OrderError> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |total, amount| total.checked_add(amount))
        .ok_or(OrderError::TotalOverflow)
}

#[async_trait]
impl Record for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = (CustomerClient, ProductClient);
    type Error = OrderError;

    /// Repeated product IDs collapse to their first occurrence.
    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        let mut product_ids: Vec<ProductId> = Vec::with_capacity(params.product_ids.len());
        for product_id in params.product_ids {
            if !product_ids.contains(&product_id) {
                product_ids.push(product_id);
            }
        }

        Ok(Self {
            id,
            customer_id: params.customer_id,
            product_ids,
            total_amount: Decimal::ZERO,
            order_date: params.order_date,
            status: OrderStatus::Pending,
        })
    }

    /// Resolves the customer, then the products in one product-store snapshot.
    ///
    /// Unknown product IDs are dropped; the order keeps only the products that
    /// resolved, and its total is the sum of their current prices.
    async fn on_create(&mut self, ctx: &Self::Context) -> Result<(), Self::Error> {
        let (customers, products) = ctx;

        customers
            .get(self.customer_id)
            .await?
            .ok_or(OrderError::CustomerNotFound(self.customer_id))?;

        let resolved = products.get_many(self.product_ids.clone()).await?;
        if resolved.is_empty() {
            return Err(OrderError::NoValidProducts);
        }
        debug!(
            requested = self.product_ids.len(),
            resolved = resolved.len(),
            "Resolved order products"
        );

        let total_amount = checked_total(resolved.iter().map(|p| p.price))?;
        self.product_ids = resolved.iter().map(|p| p.id).collect();
        self.total_amount = total_amount;
        Ok(())
    }

    async fn on_update(&mut self, update: OrderUpdate, _ctx: &Self::Context) -> Result<(), Self::Error> {
        self.status = update.status;
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }
}
