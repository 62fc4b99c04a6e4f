//! # CRM
//!
//! A small CRM backend: customers, products and orders held in actor-backed
//! record stores, served through a JSON operation API, with periodic
//! maintenance jobs.
//!
//! ## Layers
//!
//! - [`record_store`]: the generic store actor every record type runs in
//! - [`model`]: `Customer`, `Product`, `Order` and their IDs
//! - [`customer_actor`], [`product_actor`], [`order_actor`]: the `Record`
//!   implementations with validation and per-store errors
//! - [`clients`]: typed store clients
//! - [`service`]: the query and mutation operations over the stores
//! - [`query`]: `orderBy` sorting and Relay-style pagination
//! - [`api`]: the operation envelope, dispatch, the axum router and the
//!   [`ApiBoundary`](api::ApiBoundary) jobs call through
//! - [`jobs`]: heartbeat, low-stock restock, order reminders and the report
//! - [`lifecycle`]: wiring, shutdown and tracing setup
//! - [`config`]: `CRM_*` environment configuration
//!
//! ## Running
//!
//! ```bash
//! RUST_LOG=info crm serve --with-jobs
//! crm run-job report
//! ```

pub mod api;
pub mod clients;
pub mod config;
pub mod context;
pub mod customer_actor;
pub mod error;
pub mod jobs;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod product_actor;
pub mod query;
pub mod service;
pub mod validation;

pub use context::RequestContext;
pub use error::CrmError;
pub use record_store;
