//! The operation envelope.
//!
//! A request is `{"operation": "<name>", "arguments": {...}}`. Operations without
//! required arguments accept a missing or `null` `arguments`.

use crate::query::PageArgs;
use crate::service::{
    BulkCustomersInput, CustomerInput, ListArgs, OrderFilter, OrderInput, OrderStatusInput,
    ProductInput, ProductPatch,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// The raw envelope, as it travels over HTTP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiRequest {
    pub operation: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub arguments: Value,
}

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("Unknown operation: {0}")]
    Unknown(String),

    #[error("Invalid arguments for {operation}: {source}")]
    InvalidArguments {
        operation: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone)]
pub enum Operation {
    Hello,
    AllCustomers(ListArgs),
    AllProducts(ListArgs),
    AllOrders(ListArgs),
    Orders(OrderFilter),
    TotalCustomers,
    TotalOrders,
    TotalRevenue,
    CreateCustomer(CustomerInput),
    BulkCreateCustomers(BulkCustomersInput),
    CreateProduct(ProductInput),
    UpdateProduct(ProductPatch),
    CreateOrder(OrderInput),
    UpdateOrderStatus(OrderStatusInput),
    UpdateLowStockProducts,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Hello => "hello",
            Operation::AllCustomers(_) => "allCustomers",
            Operation::AllProducts(_) => "allProducts",
            Operation::AllOrders(_) => "allOrders",
            Operation::Orders(_) => "orders",
            Operation::TotalCustomers => "totalCustomers",
            Operation::TotalOrders => "totalOrders",
            Operation::TotalRevenue => "totalRevenue",
            Operation::CreateCustomer(_) => "createCustomer",
            Operation::BulkCreateCustomers(_) => "bulkCreateCustomers",
            Operation::CreateProduct(_) => "createProduct",
            Operation::UpdateProduct(_) => "updateProduct",
            Operation::CreateOrder(_) => "createOrder",
            Operation::UpdateOrderStatus(_) => "updateOrderStatus",
            Operation::UpdateLowStockProducts => "updateLowStockProducts",
        }
    }

    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Operation::CreateCustomer(_)
                | Operation::BulkCreateCustomers(_)
                | Operation::CreateProduct(_)
                | Operation::UpdateProduct(_)
                | Operation::CreateOrder(_)
                | Operation::UpdateOrderStatus(_)
                | Operation::UpdateLowStockProducts
        )
    }

    /// The `orders` query the reminder job pages through.
    pub fn orders(filter: OrderFilter, page: PageArgs) -> Self {
        Operation::Orders(OrderFilter { page, ..filter })
    }

    pub fn from_request(request: ApiRequest) -> Result<Self, OperationError> {
        let ApiRequest {
            operation,
            arguments,
        } = request;
        let invalid = |source: serde_json::Error| OperationError::InvalidArguments {
            operation: operation.clone(),
            source,
        };

        let parsed = match operation.as_str() {
            "hello" => Operation::Hello,
            "allCustomers" => Operation::AllCustomers(optional(arguments).map_err(invalid)?),
            "allProducts" => Operation::AllProducts(optional(arguments).map_err(invalid)?),
            "allOrders" => Operation::AllOrders(optional(arguments).map_err(invalid)?),
            "orders" => Operation::Orders(optional(arguments).map_err(invalid)?),
            "totalCustomers" => Operation::TotalCustomers,
            "totalOrders" => Operation::TotalOrders,
            "totalRevenue" => Operation::TotalRevenue,
            "createCustomer" => Operation::CreateCustomer(required(arguments).map_err(invalid)?),
            "bulkCreateCustomers" => {
                Operation::BulkCreateCustomers(required(arguments).map_err(invalid)?)
            }
            "createProduct" => Operation::CreateProduct(required(arguments).map_err(invalid)?),
            "updateProduct" => Operation::UpdateProduct(required(arguments).map_err(invalid)?),
            "createOrder" => Operation::CreateOrder(required(arguments).map_err(invalid)?),
            "updateOrderStatus" => {
                Operation::UpdateOrderStatus(required(arguments).map_err(invalid)?)
            }
            "updateLowStockProducts" => Operation::UpdateLowStockProducts,
            _ => return Err(OperationError::Unknown(operation)),
        };
        Ok(parsed)
    }

    pub fn into_request(self) -> Result<ApiRequest, serde_json::Error> {
        let operation = self.name().to_string();
        let arguments = match self {
            Operation::Hello
            | Operation::TotalCustomers
            | Operation::TotalOrders
            | Operation::TotalRevenue
            | Operation::UpdateLowStockProducts => Value::Null,
            Operation::AllCustomers(args)
            | Operation::AllProducts(args)
            | Operation::AllOrders(args) => serde_json::to_value(args)?,
            Operation::Orders(filter) => serde_json::to_value(filter)?,
            Operation::CreateCustomer(input) => serde_json::to_value(input)?,
            Operation::BulkCreateCustomers(input) => serde_json::to_value(input)?,
            Operation::CreateProduct(input) => serde_json::to_value(input)?,
            Operation::UpdateProduct(input) => serde_json::to_value(input)?,
            Operation::CreateOrder(input) => serde_json::to_value(input)?,
            Operation::UpdateOrderStatus(input) => serde_json::to_value(input)?,
        };
        Ok(ApiRequest {
            operation,
            arguments,
        })
    }
}

fn optional<T: DeserializeOwned + Default>(arguments: Value) -> Result<T, serde_json::Error> {
    if arguments.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(arguments)
}

fn required<T: DeserializeOwned>(arguments: Value) -> Result<T, serde_json::Error> {
    serde_json::from_value(arguments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> Result<Operation, OperationError> {
        Operation::from_request(serde_json::from_value(value).unwrap())
    }

    #[test]
    fn list_arguments_are_optional() {
        let op = parse(json!({"operation": "allProducts"})).unwrap();
        assert!(matches!(op, Operation::AllProducts(args) if args.order_by.is_none()));

        let op = parse(json!({
            "operation": "allCustomers",
            "arguments": {"orderBy": "-createdAt", "first": 2}
        }))
        .unwrap();
        match op {
            Operation::AllCustomers(args) => {
                assert_eq!(args.order_by.as_deref(), Some("-createdAt"));
                assert_eq!(args.page.first, Some(2));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn mutation_arguments_are_required() {
        let err = parse(json!({"operation": "createCustomer"})).unwrap_err();
        assert!(matches!(err, OperationError::InvalidArguments { operation, .. } if operation == "createCustomer"));

        let err = parse(json!({"operation": "dropTables"})).unwrap_err();
        assert!(matches!(err, OperationError::Unknown(_)));
    }

    #[test]
    fn envelope_survives_a_round_trip() {
        let op = Operation::orders(
            OrderFilter {
                status: Some(crate::model::OrderStatus::Pending),
                ..Default::default()
            },
            PageArgs::first(50),
        );
        let request = op.into_request().unwrap();
        assert_eq!(request.operation, "orders");
        assert_eq!(request.arguments, json!({"status": "PENDING", "first": 50}));

        let parsed = Operation::from_request(request).unwrap();
        assert!(!parsed.is_mutation());
        assert!(matches!(parsed, Operation::Orders(f) if f.page.first == Some(50)));
    }
}
