//! # System Lifecycle
//!
//! [`CrmSystem`] creates the three record stores, wires the order store to the
//! customer and product clients through its run context, and shuts everything
//! down by dropping the clients and awaiting the store tasks.
//!
//! ```rust,ignore
//! let system = CrmSystem::new(config.store_buffer);
//! let service = system.service();
//! // ... serve requests ...
//! drop(service);
//! system.shutdown().await?;
//! ```
//!
//! A store task only exits once every client clone is gone, so services and
//! routers built from the system must be dropped before [`CrmSystem::shutdown`].

pub mod crm_system;
pub mod tracing;

pub use crm_system::*;
pub use self::tracing::setup_tracing;
