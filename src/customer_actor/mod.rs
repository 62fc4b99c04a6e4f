//! # Customer Store
//!
//! The Customer record store. It has no dependencies (`Context = ()`) and no
//! updates or actions; its only job is validated, email-unique inserts.
//!
//! ## Structure
//!
//! - [`entity`]: [`Record`](record_store::Record) implementation for [`Customer`]
//! - [`error`]: [`CustomerError`]
//! - [`new()`]: creates the store and its client

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::CustomerClient;
use crate::model::Customer;
use record_store::StoreActor;

/// Creates a new Customer store and its client.
pub fn new(buffer: usize) -> (StoreActor<Customer>, CustomerClient) {
    let (actor, client) = StoreActor::new(buffer);
    (actor, CustomerClient::new(client))
}
