//! # Store Messages
//!
//! The request type sent from a [`StoreClient`](crate::StoreClient) to its
//! [`StoreActor`](crate::StoreActor), one variant per store operation.

use crate::error::StoreError;
use crate::record::Record;
use tokio::sync::oneshot;

/// One-shot response channel used by the store.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Internal message type sent to the store to request operations.
///
/// - **Create**: inserts a new record built from [`Record::Create`].
/// - **Get** / **GetMany**: point reads. `GetMany` keeps request order and skips
///   IDs that do not resolve, all from one snapshot.
/// - **List**: every record, in ID order.
/// - **Update**: applies [`Record::Update`] to one record.
/// - **ActionAll**: applies [`Record::Action`] to every record as one atomic step.
#[derive(Debug)]
pub enum StoreRequest<T: Record> {
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    GetMany {
        ids: Vec<T::Id>,
        respond_to: Response<Vec<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    ActionAll {
        action: T::Action,
        respond_to: Response<Vec<T::ActionResult>>,
    },
}
