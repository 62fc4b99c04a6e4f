//! # Record Store
//!
//! In-memory record stores built on the actor model. Each record type gets its own
//! Tokio task that owns the records outright and processes requests one at a time,
//! so there is no shared mutable state and no locking.
//!
//! ## Layers
//!
//! 1. **Record** ([`Record`]): the domain type, its payloads and lifecycle hooks.
//! 2. **Store** ([`StoreActor`]): the task that owns the records and the unique index.
//! 3. **Client** ([`StoreClient`]): the cloneable handle used to send requests.
//!
//! ## Context Injection
//!
//! Dependencies are injected when the store starts running, not when it is built.
//! An order store that validates customers and products receives their clients as
//! its context:
//!
//! ```rust,ignore
//! let (customer_store, customers) = StoreActor::<Customer>::new(32);
//! let (product_store, products) = StoreActor::<Product>::new(32);
//! let (order_store, orders) = StoreActor::<Order>::new(32);
//!
//! tokio::spawn(customer_store.run(()));
//! tokio::spawn(product_store.run(()));
//! tokio::spawn(order_store.run((customers.clone(), products.clone())));
//! ```
//!
//! ## Guarantees
//!
//! - IDs come from a counter that starts at 1 and only advances when a create succeeds.
//! - Listings are in ID order.
//! - A failed update or bulk action leaves every stored record unchanged.
//! - A record's [`Record::unique_key`] is unique across the store.
//!
//! ## Testing
//!
//! [`mock::MockStore`] answers a real `StoreClient` from scripted expectations.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod error;
pub mod message;
pub mod mock;
pub mod record;

pub use actor::StoreActor;
pub use client::StoreClient;
pub use client_trait::RecordClient;
pub use error::StoreError;
pub use message::{Response, StoreRequest};
pub use record::Record;
