//! # Product Store
//!
//! The Product record store, with manual price/stock edits and the low-stock
//! restock bulk action.
//!
//! ## Structure
//!
//! - [`entity`]: [`Record`](record_store::Record) implementation for [`Product`]
//! - [`error`]: [`ProductError`]
//! - [`actions`]: [`ProductAction`] and [`ProductActionResult`]
//! - [`new()`]: creates the store and its client

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::ProductClient;
use crate::model::Product;
use record_store::StoreActor;

/// Creates a new Product store and its client.
pub fn new(buffer: usize) -> (StoreActor<Product>, ProductClient) {
    let (actor, client) = StoreActor::new(buffer);
    (actor, ProductClient::new(client))
}
