//! Bulk actions for the Product store.
//!
//! Actions are applied to every product in one store step through
//! [`StoreClient::perform_action_all`](record_store::StoreClient::perform_action_all).

use crate::model::Product;

/// Stock level below which a product counts as low on stock.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// Amount added to each low-stock product by a restock.
pub const RESTOCK_AMOUNT: u32 = 10;

#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Adds `amount` to every product whose stock is below `below`.
    Restock { below: u32, amount: u32 },
}

impl ProductAction {
    pub fn low_stock_restock() -> Self {
        ProductAction::Restock {
            below: LOW_STOCK_THRESHOLD,
            amount: RESTOCK_AMOUNT,
        }
    }
}

/// Per-product outcome of a [`ProductAction`].
#[derive(Debug, Clone)]
pub enum ProductActionResult {
    /// The product was restocked; carries its new state.
    Restocked(Product),
    /// The product did not qualify.
    Unchanged,
}
