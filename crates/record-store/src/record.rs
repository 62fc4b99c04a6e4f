//! # Record Trait
//!
//! The `Record` trait is the contract every stored entity (customers, products, orders)
//! implements to be owned by a [`StoreActor`](crate::StoreActor). It names the
//! associated types for IDs, creation and update payloads, bulk actions, the injected
//! context and the error type, and provides the lifecycle hooks the store calls
//! around each write.
//!
//! # Provided Methods (Hooks)
//! - [`Record::unique_key`]: opt into the store's unique index.
//! - [`Record::on_create`]: async validation against other stores before insert.
//!
//! The defaults do nothing.

use async_trait::async_trait;
use std::fmt::{Debug, Display};

/// Trait that any stored entity must implement to be managed by a `StoreActor`.
///
/// # Async & Context
/// Hooks are `#[async_trait]` so they can call other stores. The `Context` type is
/// injected into every hook at `run()` time, which lets a store depend on clients
/// that were created after it.
///
/// # Atomicity
/// The store never hands a hook its live record. Updates and actions run against a
/// staged copy that is committed only when the hook succeeds, so a failed hook
/// leaves the stored record unchanged.
#[async_trait]
pub trait Record: Clone + Send + Sync + 'static {
    /// Sequential identifier. Converted from the store's `u32` counter; `Ord` gives
    /// listings a stable creation order.
    type Id: Ord + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Raw creation payload. Validation happens in `from_create_params`.
    type Create: Send + Sync + Debug;

    /// Raw update payload.
    type Update: Send + Sync + Debug;

    /// Operation applied to every record at once by `perform_action_all`.
    type Action: Clone + Send + Sync + Debug;

    /// Per-record result of an action.
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected into the store. Use `()` if none are needed.
    type Context: Send + Sync;

    /// One error enum for the whole record type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Builds the record from its ID and payload. Called synchronously before any write,
    /// so this is where field validation belongs.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Key that must be unique across all records of this type, if any.
    fn unique_key(&self) -> Option<String> {
        None
    }

    /// Called after construction and the unique-key check, before insert.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies an update to a staged copy of the record.
    async fn on_update(
        &mut self,
        update: Self::Update,
        ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Applies a bulk action to a staged copy of the record.
    ///
    /// Bulk actions must not change `unique_key`; the index is not rebuilt for them.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
