//! # Mock Store
//!
//! `MockStore<T>` hands out a real [`StoreClient<T>`] whose requests are answered from
//! a queue of expectations instead of a running [`StoreActor`](crate::StoreActor).
//! Use it to test code that depends on another store (an order store that reads
//! customers and products, say) without spawning that store.
//!
//! | | MockStore | Real StoreActor |
//! |---|---|---|
//! | **State** | None, answers are scripted | Real records |
//! | **Error injection** | `return_err` | Needs the right state |
//! | **Use case** | Logic around a client | The store itself, full system |
//!
//! Expectations are consumed in order. A request that does not match the next
//! expectation panics the mock task, which closes the channel and surfaces as
//! `StoreError::ResponseDropped` in the caller.
//!
//! ```rust
//! use record_store::mock::MockStore;
//! use record_store::Record;
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug, PartialEq)] struct Tag { id: u32 }
//! #[derive(Debug)] struct TagCreate;
//! #[derive(Debug)] struct TagUpdate;
//! #[derive(Clone, Debug)] enum TagAction {}
//! #[derive(Debug, thiserror::Error)] #[error("tag error")] struct TagError;
//!
//! #[async_trait]
//! impl Record for Tag {
//!     type Id = u32; type Create = TagCreate; type Update = TagUpdate;
//!     type Action = TagAction; type ActionResult = (); type Context = (); type Error = TagError;
//!     fn from_create_params(id: u32, _: TagCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
//!     async fn on_update(&mut self, _: TagUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, a: TagAction, _: &()) -> Result<(), Self::Error> { match a {} }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockStore::<Tag>::new();
//!     mock.expect_get(1).return_ok(Some(Tag { id: 1 }));
//!
//!     let client = mock.client();
//!     assert_eq!(client.get(1).await.unwrap(), Some(Tag { id: 1 }));
//!     mock.verify();
//! }
//! ```

use crate::client::StoreClient;
use crate::error::StoreError;
use crate::message::StoreRequest;
use crate::record::Record;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

enum Expectation<T: Record> {
    Get {
        id: T::Id,
        response: Result<Option<T>, StoreError>,
    },
    GetMany {
        response: Result<Vec<T>, StoreError>,
    },
    List {
        response: Result<Vec<T>, StoreError>,
    },
    Create {
        response: Result<T, StoreError>,
    },
    Update {
        id: T::Id,
        response: Result<T, StoreError>,
    },
    ActionAll {
        response: Result<Vec<T::ActionResult>, StoreError>,
    },
}

/// A scripted stand-in for a running store.
pub struct MockStore<T: Record> {
    client: StoreClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: Record> Default for MockStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> MockStore<T> {
    /// Creates a mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue.lock().unwrap().pop_front();

                match (request, expectation) {
                    (
                        StoreRequest::Get { id, respond_to },
                        Some(Expectation::Get {
                            id: expected,
                            response,
                        }),
                    ) => {
                        assert!(id == expected, "get called with {id}, expected {expected}");
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::GetMany { respond_to, .. },
                        Some(Expectation::GetMany { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::List { respond_to }, Some(Expectation::List { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update {
                            id: expected,
                            response,
                        }),
                    ) => {
                        assert!(id == expected, "update called with {id}, expected {expected}");
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::ActionAll { respond_to, .. },
                        Some(Expectation::ActionAll { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    _ => panic!("Unexpected request or expectation mismatch"),
                }
            }
        });

        Self {
            client: StoreClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> StoreClient<T> {
        self.client.clone()
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        let queue = self.expectations.clone();
        ExpectationBuilder::new(move |response| {
            push(&queue, Expectation::Get { id, response });
        })
    }

    pub fn expect_get_many(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        let queue = self.expectations.clone();
        ExpectationBuilder::new(move |response| {
            push(&queue, Expectation::GetMany { response });
        })
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        let queue = self.expectations.clone();
        ExpectationBuilder::new(move |response| {
            push(&queue, Expectation::List { response });
        })
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T> {
        let queue = self.expectations.clone();
        ExpectationBuilder::new(move |response| {
            push(&queue, Expectation::Create { response });
        })
    }

    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        let queue = self.expectations.clone();
        ExpectationBuilder::new(move |response| {
            push(&queue, Expectation::Update { id, response });
        })
    }

    pub fn expect_action_all(&mut self) -> ExpectationBuilder<T, Vec<T::ActionResult>> {
        let queue = self.expectations.clone();
        ExpectationBuilder::new(move |response| {
            push(&queue, Expectation::ActionAll { response });
        })
    }

    /// Panics if any expectation was not consumed.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

fn push<T: Record>(queue: &Queue<T>, expectation: Expectation<T>) {
    queue.lock().unwrap().push_back(expectation);
}

/// Finishes an expectation with the value the mock should answer.
pub struct ExpectationBuilder<T: Record, R> {
    register: Box<dyn FnOnce(Result<R, StoreError>) + Send>,
    _record: std::marker::PhantomData<fn() -> T>,
}

impl<T: Record, R> ExpectationBuilder<T, R> {
    fn new(register: impl FnOnce(Result<R, StoreError>) + Send + 'static) -> Self {
        Self {
            register: Box::new(register),
            _record: std::marker::PhantomData,
        }
    }

    pub fn return_ok(self, value: R) {
        (self.register)(Ok(value));
    }

    pub fn return_err(self, error: StoreError) {
        (self.register)(Err(error));
    }
}
