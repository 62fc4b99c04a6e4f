use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

/// A product in the catalog.
///
/// `stock` is unsigned, so a stored product can never hold negative stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub stock: u32,
}

/// Payload for creating a new product.
///
/// `stock` is signed so that negative input reaches validation and is reported
/// as `InvalidStock` instead of failing to parse.
#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub name: String,
    pub price: Decimal,
    pub stock: i64,
}

/// Manual price/stock edit. Absent fields are left as they are.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub price: Option<Decimal>,
    pub stock: Option<i64>,
}
