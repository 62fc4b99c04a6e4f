//! # Order Store
//!
//! The Order record store. It depends on the Customer and Product stores, whose
//! clients are injected as its context when it starts running.
//!
//! ## Structure
//!
//! - [`entity`]: [`Record`](record_store::Record) implementation for [`Order`]
//! - [`error`]: [`OrderError`]
//! - [`new()`]: creates the store and its client

pub mod entity;
pub mod error;

pub use entity::checked_total;
pub use error::*;

use crate::clients::OrderClient;
use crate::model::Order;
use record_store::StoreActor;

/// Creates a new Order store and its client.
///
/// Run the returned actor with `(CustomerClient, ProductClient)` as its context.
pub fn new(buffer: usize) -> (StoreActor<Order>, OrderClient) {
    let (actor, client) = StoreActor::new(buffer);
    (actor, OrderClient::new(client))
}
