//! Routes an [`Operation`] to the service and wraps the outcome in an
//! [`ApiResponse`].

use super::Operation;
use crate::context::RequestContext;
use crate::error::CrmError;
use crate::service::CrmService;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

/// `{"data": <value|null>, "errors": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Vec<ApiErrorBody>,
}

impl ApiResponse {
    pub fn ok(data: Value) -> Self {
        Self {
            data: Some(data),
            errors: Vec::new(),
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            data: None,
            errors: vec![ApiErrorBody {
                code: code.into(),
                message: message.into(),
            }],
        }
    }
}

pub async fn dispatch(service: &CrmService, ctx: &RequestContext, operation: Operation) -> ApiResponse {
    let name = operation.name();
    let mutation = operation.is_mutation();

    match execute(service, ctx, operation).await {
        Ok(data) => {
            if mutation {
                info!(operation = name, request_id = %ctx.request_id, "Mutation applied");
            }
            ApiResponse::ok(data)
        }
        Err(e) => {
            warn!(operation = name, request_id = %ctx.request_id, code = e.code(), error = %e, "Operation failed");
            ApiResponse::error(e.code(), e.to_string())
        }
    }
}

async fn execute(
    service: &CrmService,
    ctx: &RequestContext,
    operation: Operation,
) -> Result<Value, CrmError> {
    match operation {
        Operation::Hello => to_data(service.hello()),
        Operation::AllCustomers(args) => to_data(service.all_customers(ctx, args).await?),
        Operation::AllProducts(args) => to_data(service.all_products(ctx, args).await?),
        Operation::AllOrders(args) => to_data(service.all_orders(ctx, args).await?),
        Operation::Orders(filter) => to_data(service.filter_orders(ctx, filter).await?),
        Operation::TotalCustomers => to_data(service.total_customers(ctx).await?),
        Operation::TotalOrders => to_data(service.total_orders(ctx).await?),
        Operation::TotalRevenue => to_data(service.total_revenue(ctx).await?),
        Operation::CreateCustomer(input) => to_data(service.create_customer(ctx, input).await?),
        Operation::BulkCreateCustomers(input) => {
            to_data(service.bulk_create_customers(ctx, input).await?)
        }
        Operation::CreateProduct(input) => to_data(service.create_product(ctx, input).await?),
        Operation::UpdateProduct(input) => to_data(service.update_product(ctx, input).await?),
        Operation::CreateOrder(input) => to_data(service.create_order(ctx, input).await?),
        Operation::UpdateOrderStatus(input) => {
            to_data(service.update_order_status(ctx, input).await?)
        }
        Operation::UpdateLowStockProducts => to_data(service.update_low_stock_products(ctx).await?),
    }
}

fn to_data<T: Serialize>(value: T) -> Result<Value, CrmError> {
    Ok(serde_json::to_value(value)?)
}
