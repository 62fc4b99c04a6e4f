//! # API
//!
//! The JSON operation envelope, its dispatcher, the axum router that serves it,
//! and the [`ApiBoundary`] trait jobs use to call it.

pub mod boundary;
pub mod dispatch;
pub mod operation;
pub mod router;

pub use boundary::{ApiBoundary, HttpApi, LocalApi, TransportError};
pub use dispatch::{dispatch, ApiErrorBody, ApiResponse};
pub use operation::{ApiRequest, Operation, OperationError};
pub use router::{create_router, serve};
