//! How jobs reach the API: over HTTP, or in-process against a running service.

use super::{dispatch, ApiResponse, Operation};
use crate::context::RequestContext;
use crate::service::CrmService;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum TransportError {
    /// The server answered with a non-success status.
    #[error("HTTP {0}")]
    Status(u16),

    #[error("{0}")]
    Network(String),

    #[error("Malformed response: {0}")]
    Malformed(String),

    /// The server answered with a success status but the body is not an envelope.
    #[error("Unreadable response body: {0}")]
    UnreadableBody(String),
}

#[async_trait]
pub trait ApiBoundary: Send + Sync {
    async fn execute(&self, operation: Operation) -> Result<ApiResponse, TransportError>;
}

/// Calls `POST /graphql` on a CRM server.
pub struct HttpApi {
    client: reqwest::Client,
    url: String,
}

impl HttpApi {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl ApiBoundary for HttpApi {
    async fn execute(&self, operation: Operation) -> Result<ApiResponse, TransportError> {
        let request = operation
            .into_request()
            .map_err(|e| TransportError::Malformed(e.to_string()))?;
        debug!(url = %self.url, operation = %request.operation, "Sending request");

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }
        response
            .json::<ApiResponse>()
            .await
            .map_err(|e| TransportError::UnreadableBody(e.to_string()))
    }
}

/// Dispatches directly to an in-process service. Never fails at the transport level.
#[derive(Clone)]
pub struct LocalApi {
    service: CrmService,
}

impl LocalApi {
    pub fn new(service: CrmService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ApiBoundary for LocalApi {
    async fn execute(&self, operation: Operation) -> Result<ApiResponse, TransportError> {
        Ok(dispatch(&self.service, &RequestContext::new(), operation).await)
    }
}
