//! # Store Actor
//!
//! This module defines the `StoreActor`, the task that owns every record of one type.
//! It processes requests sequentially, so the record map and the unique index need
//! no locking.

use crate::client::StoreClient;
use crate::error::StoreError;
use crate::message::StoreRequest;
use crate::record::Record;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The actor that owns all records of type `T`.
///
/// Records live in a `BTreeMap` keyed by ID, so `List` returns them in creation
/// order. Records that opt into [`Record::unique_key`] are also tracked in a
/// key-to-ID index that is consulted before every insert or update.
///
/// # Usage Pattern
///
/// 1.  **Create**: `StoreActor::new()` returns the actor and its client.
/// 2.  **Wire**: pass dependencies (other clients) into `actor.run(context)`.
/// 3.  **Run**: spawn the run loop in a background task.
///
/// ```rust
/// use record_store::{Record, StoreActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Tag { id: u32, label: String }
/// #[derive(Debug)] struct TagCreate { label: String }
/// #[derive(Debug)] struct TagUpdate;
/// #[derive(Clone, Debug)] enum TagAction {}
/// #[derive(Debug, thiserror::Error)] #[error("tag error")] struct TagError;
///
/// #[async_trait]
/// impl Record for Tag {
///     type Id = u32;
///     type Create = TagCreate;
///     type Update = TagUpdate;
///     type Action = TagAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = TagError;
///
///     fn from_create_params(id: u32, params: TagCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, label: params.label })
///     }
///     fn unique_key(&self) -> Option<String> { Some(self.label.clone()) }
///     async fn on_update(&mut self, _: TagUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, a: TagAction, _: &()) -> Result<(), Self::Error> { match a {} }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = StoreActor::<Tag>::new(10);
///     tokio::spawn(actor.run(()));
///
///     let tag = client.create(TagCreate { label: "vip".into() }).await.unwrap();
///     assert_eq!(tag.id, 1);
///     assert!(client.create(TagCreate { label: "vip".into() }).await.is_err());
/// }
/// ```
///
/// # Operations
///
/// * **Create**: builds the record with the next ID, rejects a taken unique key,
///   runs `on_create`, then inserts. The ID counter only advances on success, so
///   IDs stay dense.
/// * **Get** / **GetMany** / **List**: clones out of the map.
/// * **Update**: runs `on_update` on a clone, re-checks the unique key, then
///   replaces the stored record.
/// * **ActionAll**: runs `handle_action` on a clone of every record. The clones
///   replace the originals only if all of them succeed.
pub struct StoreActor<T: Record> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    records: BTreeMap<T::Id, T>,
    unique: HashMap<String, T::Id>,
    next_id: u32,
}

impl<T: Record> StoreActor<T> {
    /// Creates a new `StoreActor` and its associated `StoreClient`.
    ///
    /// `buffer_size` is the capacity of the request channel. Callers wait for space
    /// when it is full.
    pub fn new(buffer_size: usize) -> (Self, StoreClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            records: BTreeMap::new(),
            unique: HashMap::new(),
            next_id: 1,
        };
        (actor, StoreClient::new(sender))
    }

    /// Runs the event loop until every client has been dropped.
    ///
    /// The `context` is passed to every record hook.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let result = self.create(params, &context).await;
                    match &result {
                        Ok((id, _)) => info!(entity_type, %id, size = self.records.len(), "Created"),
                        Err(e) => warn!(entity_type, error = %e, "Create failed"),
                    }
                    let _ = respond_to.send(result.map(|(_, record)| record));
                }
                StoreRequest::Get { id, respond_to } => {
                    let record = self.records.get(&id).cloned();
                    debug!(entity_type, %id, found = record.is_some(), "Get");
                    let _ = respond_to.send(Ok(record));
                }
                StoreRequest::GetMany { ids, respond_to } => {
                    let found: Vec<T> = ids
                        .iter()
                        .filter_map(|id| self.records.get(id).cloned())
                        .collect();
                    debug!(entity_type, requested = ids.len(), found = found.len(), "GetMany");
                    let _ = respond_to.send(Ok(found));
                }
                StoreRequest::List { respond_to } => {
                    debug!(entity_type, size = self.records.len(), "List");
                    let _ = respond_to.send(Ok(self.records.values().cloned().collect()));
                }
                StoreRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let result = self.update(&id, update, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Updated"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Update failed"),
                    }
                    let _ = respond_to.send(result);
                }
                StoreRequest::ActionAll { action, respond_to } => {
                    debug!(entity_type, ?action, "ActionAll");
                    let result = self.action_all(action, &context).await;
                    match &result {
                        Ok(results) => info!(entity_type, applied = results.len(), "ActionAll ok"),
                        Err(e) => warn!(entity_type, error = %e, "ActionAll failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.records.len(), "Shutdown");
    }

    async fn create(
        &mut self,
        params: T::Create,
        context: &T::Context,
    ) -> Result<(T::Id, T), StoreError> {
        let id = T::Id::from(self.next_id);
        let mut record = T::from_create_params(id.clone(), params).map_err(StoreError::record)?;

        let key = record.unique_key();
        if let Some(key) = &key {
            if self.unique.contains_key(key) {
                return Err(StoreError::UniqueViolation(key.clone()));
            }
        }

        record.on_create(context).await.map_err(StoreError::record)?;

        if let Some(key) = key {
            self.unique.insert(key, id.clone());
        }
        self.records.insert(id.clone(), record.clone());
        self.next_id += 1;
        Ok((id, record))
    }

    async fn update(
        &mut self,
        id: &T::Id,
        update: T::Update,
        context: &T::Context,
    ) -> Result<T, StoreError> {
        let current = self
            .records
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let old_key = current.unique_key();
        let mut staged = current.clone();

        staged
            .on_update(update, context)
            .await
            .map_err(StoreError::record)?;

        let new_key = staged.unique_key();
        if new_key != old_key {
            if let Some(key) = &new_key {
                if self.unique.get(key).is_some_and(|owner| owner != id) {
                    return Err(StoreError::UniqueViolation(key.clone()));
                }
            }
            if let Some(key) = old_key {
                self.unique.remove(&key);
            }
            if let Some(key) = new_key {
                self.unique.insert(key, id.clone());
            }
        }

        self.records.insert(id.clone(), staged.clone());
        Ok(staged)
    }

    async fn action_all(
        &mut self,
        action: T::Action,
        context: &T::Context,
    ) -> Result<Vec<T::ActionResult>, StoreError> {
        let mut staged = Vec::with_capacity(self.records.len());
        let mut results = Vec::with_capacity(self.records.len());

        for (id, record) in &self.records {
            let mut copy = record.clone();
            let result = copy
                .handle_action(action.clone(), context)
                .await
                .map_err(StoreError::record)?;
            staged.push((id.clone(), copy));
            results.push(result);
        }

        for (id, record) in staged {
            self.records.insert(id, record);
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Counter {
        id: u32,
        name: String,
        value: u32,
    }

    #[derive(Debug)]
    struct CounterCreate {
        name: String,
        value: u32,
    }

    #[derive(Debug)]
    struct Rename(String);

    #[derive(Clone, Debug)]
    struct Add(u32);

    #[derive(Debug, thiserror::Error)]
    enum CounterError {
        #[error("name must not be empty")]
        EmptyName,
        #[error("counter {0} would overflow")]
        Overflow(u32),
        #[error("name {0} is reserved")]
        Reserved(String),
    }

    #[async_trait]
    impl Record for Counter {
        type Id = u32;
        type Create = CounterCreate;
        type Update = Rename;
        type Action = Add;
        type ActionResult = u32;
        type Context = ();
        type Error = CounterError;

        fn from_create_params(id: u32, params: CounterCreate) -> Result<Self, Self::Error> {
            if params.name.is_empty() {
                return Err(CounterError::EmptyName);
            }
            Ok(Self {
                id,
                name: params.name,
                value: params.value,
            })
        }

        fn unique_key(&self) -> Option<String> {
            Some(self.name.clone())
        }

        async fn on_create(&mut self, _ctx: &()) -> Result<(), Self::Error> {
            if self.name == "reserved" {
                return Err(CounterError::Reserved(self.name.clone()));
            }
            Ok(())
        }

        async fn on_update(&mut self, update: Rename, _ctx: &()) -> Result<(), Self::Error> {
            self.name = update.0;
            Ok(())
        }

        async fn handle_action(&mut self, action: Add, _ctx: &()) -> Result<u32, Self::Error> {
            self.value = self
                .value
                .checked_add(action.0)
                .ok_or(CounterError::Overflow(self.id))?;
            Ok(self.value)
        }
    }

    fn spawn_store() -> StoreClient<Counter> {
        let (actor, client) = StoreActor::<Counter>::new(8);
        tokio::spawn(actor.run(()));
        client
    }

    fn counter(name: &str, value: u32) -> CounterCreate {
        CounterCreate {
            name: name.to_string(),
            value,
        }
    }

    #[tokio::test]
    async fn ids_only_advance_on_successful_create() {
        let client = spawn_store();

        let first = client.create(counter("a", 0)).await.unwrap();
        assert!(client.create(counter("", 0)).await.is_err());
        assert!(client.create(counter("reserved", 0)).await.is_err());
        assert!(client.create(counter("a", 5)).await.is_err());
        let second = client.create(counter("b", 0)).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn duplicate_unique_key_is_rejected() {
        let client = spawn_store();
        client.create(counter("a", 0)).await.unwrap();

        let err = client.create(counter("a", 1)).await.unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation(key) if key == "a"));
        assert_eq!(client.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn record_errors_can_be_recovered() {
        let client = spawn_store();
        let err = client.create(counter("", 0)).await.unwrap_err();

        let typed = err.downcast_record::<CounterError>().unwrap();
        assert!(matches!(typed, CounterError::EmptyName));
    }

    #[tokio::test]
    async fn get_many_keeps_request_order_and_skips_missing() {
        let client = spawn_store();
        for name in ["a", "b", "c"] {
            client.create(counter(name, 0)).await.unwrap();
        }

        let found = client.get_many(vec![3, 9, 1]).await.unwrap();
        let ids: Vec<u32> = found.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[tokio::test]
    async fn update_moves_unique_key() {
        let client = spawn_store();
        client.create(counter("a", 0)).await.unwrap();
        client.create(counter("b", 0)).await.unwrap();

        let err = client.update(1, Rename("b".into())).await.unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation(_)));
        assert_eq!(client.get(1).await.unwrap().unwrap().name, "a");

        client.update(1, Rename("z".into())).await.unwrap();
        client.create(counter("a", 0)).await.unwrap();
        assert!(client.create(counter("z", 0)).await.is_err());
    }

    #[tokio::test]
    async fn update_missing_record_is_not_found() {
        let client = spawn_store();
        let err = client.update(42, Rename("x".into())).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(id) if id == "42"));
    }

    #[tokio::test]
    async fn action_all_is_all_or_nothing() {
        let client = spawn_store();
        client.create(counter("a", 1)).await.unwrap();
        client.create(counter("b", u32::MAX)).await.unwrap();

        assert!(client.perform_action_all(Add(1)).await.is_err());
        let values: Vec<u32> = client.list().await.unwrap().iter().map(|c| c.value).collect();
        assert_eq!(values, vec![1, u32::MAX]);
    }

    #[tokio::test]
    async fn action_all_returns_results_in_id_order() {
        let client = spawn_store();
        client.create(counter("a", 1)).await.unwrap();
        client.create(counter("b", 10)).await.unwrap();

        let results = client.perform_action_all(Add(2)).await.unwrap();
        assert_eq!(results, vec![3, 12]);
    }
}
