//! # CRM Service
//!
//! The query and mutation operations of the API, implemented on top of the
//! three store clients. Every operation takes the [`RequestContext`](crate::RequestContext)
//! explicitly; nothing reads the clock or generates IDs on its own.

pub mod mutation;
pub mod query;
pub mod types;

pub use types::*;

use crate::clients::{CustomerClient, OrderClient, ProductClient};
use crate::error::CrmError;
use crate::model::{Customer, CustomerId, Order, Product, ProductId};
use crate::order_actor::OrderError;
use std::collections::HashMap;

pub const CUSTOMER_CREATED: &str = "Customer created successfully.";

#[derive(Clone)]
pub struct CrmService {
    customers: CustomerClient,
    products: ProductClient,
    orders: OrderClient,
}

impl CrmService {
    pub fn new(customers: CustomerClient, products: ProductClient, orders: OrderClient) -> Self {
        Self {
            customers,
            products,
            orders,
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

    /// Resolves the customer and products of each order with one bulk read per store.
    async fn resolve_orders(&self, orders: &[Order]) -> Result<Resolved, CrmError> {
        let mut customer_ids: Vec<CustomerId> = orders.iter().map(|o| o.customer_id).collect();
        customer_ids.sort();
        customer_ids.dedup();

        let mut product_ids: Vec<ProductId> =
            orders.iter().flat_map(|o| o.product_ids.iter().copied()).collect();
        product_ids.sort();
        product_ids.dedup();

        let customers = self.customers.get_many(customer_ids).await?;
        let products = self.products.get_many(product_ids).await?;

        Ok(Resolved {
            customers: customers.into_iter().map(|c| (c.id, c)).collect(),
            products: products.into_iter().map(|p| (p.id, p)).collect(),
        })
    }

    async fn order_node(&self, order: Order) -> Result<OrderNode, CrmError> {
        let resolved = self.resolve_orders(std::slice::from_ref(&order)).await?;
        resolved.node(order)
    }
}

struct Resolved {
    customers: HashMap<CustomerId, Customer>,
    products: HashMap<ProductId, Product>,
}

impl Resolved {
    /// Joins one order. Orders only reference records that existed when they
    /// were created, and records are never deleted.
    fn node(&self, order: Order) -> Result<OrderNode, CrmError> {
        let customer = self
            .customers
            .get(&order.customer_id)
            .cloned()
            .ok_or(OrderError::CustomerNotFound(order.customer_id))?;
        let products = order
            .product_ids
            .iter()
            .filter_map(|id| self.products.get(id).cloned())
            .collect();

        Ok(OrderNode {
            id: order.id,
            customer,
            products,
            total_amount: order.total_amount,
            order_date: order.order_date,
            status: order.status,
        })
    }
}
