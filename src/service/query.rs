//! Read operations: list queries with ordering and pagination, the order filter
//! and the aggregates.

use super::{CrmService, ListArgs, OrderFilter, OrderNode};
use crate::context::RequestContext;
use crate::error::CrmError;
use crate::model::{Customer, Order, Product};
use crate::order_actor::checked_total;
use crate::query::{sort_records, Connection, PageArgs};
use record_store::RecordClient;
use rust_decimal::Decimal;
use tracing::{debug, instrument};

pub const HELLO: &str = "Hello, GraphQL!";

impl CrmService {
    pub fn hello(&self) -> &'static str {
        HELLO
    }

    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id))]
    pub async fn all_customers(
        &self,
        ctx: &RequestContext,
        args: ListArgs,
    ) -> Result<Connection<Customer>, CrmError> {
        let mut customers = self.customers.list().await?;
        sort_records(&mut customers, args.order_by.as_deref())?;
        Ok(Connection::paginate(customers, &args.page)?)
    }

    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id))]
    pub async fn all_products(
        &self,
        ctx: &RequestContext,
        args: ListArgs,
    ) -> Result<Connection<Product>, CrmError> {
        let mut products = self.products.list().await?;
        sort_records(&mut products, args.order_by.as_deref())?;
        Ok(Connection::paginate(products, &args.page)?)
    }

    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id))]
    pub async fn all_orders(
        &self,
        ctx: &RequestContext,
        args: ListArgs,
    ) -> Result<Connection<OrderNode>, CrmError> {
        let orders = self.orders.list().await?;
        self.order_connection(orders, args.order_by.as_deref(), &args.page)
            .await
    }

    /// Orders matching every given filter. `orderDateGte` is inclusive.
    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id))]
    pub async fn filter_orders(
        &self,
        ctx: &RequestContext,
        filter: OrderFilter,
    ) -> Result<Connection<OrderNode>, CrmError> {
        let orders: Vec<Order> = self
            .orders
            .list()
            .await?
            .into_iter()
            .filter(|o| filter.order_date_gte.is_none_or(|gte| o.order_date >= gte))
            .filter(|o| filter.status.is_none_or(|status| o.status == status))
            .collect();
        debug!(matched = orders.len(), "Filtered orders");
        self.order_connection(orders, filter.order_by.as_deref(), &filter.page)
            .await
    }

    pub async fn total_customers(&self, _ctx: &RequestContext) -> Result<usize, CrmError> {
        Ok(self.customers.list().await?.len())
    }

    pub async fn total_orders(&self, _ctx: &RequestContext) -> Result<usize, CrmError> {
        Ok(self.orders.list().await?.len())
    }

    /// Sum of every order's `total_amount`.
    pub async fn total_revenue(&self, _ctx: &RequestContext) -> Result<Decimal, CrmError> {
        let orders = self.orders.list().await?;
        Ok(checked_total(orders.iter().map(|o| o.total_amount))?)
    }

    /// Sorts and pages the orders first, then joins only the page.
    async fn order_connection(
        &self,
        mut orders: Vec<Order>,
        order_by: Option<&str>,
        page: &PageArgs,
    ) -> Result<Connection<OrderNode>, CrmError> {
        sort_records(&mut orders, order_by)?;
        let page = Connection::paginate(orders, page)?;
        let page_orders: Vec<Order> = page.nodes().cloned().collect();
        let resolved = self.resolve_orders(&page_orders).await?;
        page.try_map(|order| resolved.node(order))
    }
}
