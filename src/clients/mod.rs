//! Type-safe wrappers around [`StoreClient`](record_store::StoreClient).
//!
//! Each wrapper maps [`StoreError`](record_store::StoreError) into its store's
//! error enum, recovering typed record errors from the boxed form.

pub mod customer_client;
pub mod order_client;
pub mod product_client;

pub use customer_client::*;
pub use order_client::*;
pub use product_client::*;
