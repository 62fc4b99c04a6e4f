//! HTTP surface: `POST /graphql` takes the operation envelope, `GET /health`
//! answers `ok`.

use super::{dispatch, ApiRequest, ApiResponse, Operation};
use crate::context::RequestContext;
use crate::service::CrmService;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::future::Future;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub fn create_router(service: CrmService) -> Router {
    Router::new()
        .route("/graphql", post(graphql))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Operation failures are reported in the body with HTTP 200; only an
/// envelope that cannot be understood gets a 4xx.
async fn graphql(State(service): State<CrmService>, Json(request): Json<ApiRequest>) -> Response {
    let ctx = RequestContext::new();
    match Operation::from_request(request) {
        Ok(operation) => Json(dispatch(&service, &ctx, operation).await).into_response(),
        Err(e) => {
            warn!(request_id = %ctx.request_id, error = %e, "Rejected request");
            (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error("InvalidRequest", e.to_string())),
            )
                .into_response()
        }
    }
}

async fn health() -> &'static str {
    "ok"
}

/// Serves the router until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    service: CrmService,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    info!(addr = ?listener.local_addr().ok(), "Listening");
    axum::serve(listener, create_router(service))
        .with_graceful_shutdown(shutdown)
        .await
}
