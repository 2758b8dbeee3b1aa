//! CloudEvent HTTP receiver.
//!
//! # Endpoints
//!
//! - `POST /` - Firestore document event (binary content mode)
//! - `GET /healthz` - liveness probe (simple OK)
//!
//! Status codes drive platform redelivery: `200` acknowledges the event
//! (including skips), `400` rejects a malformed one, `500` asks for a retry.

pub mod cloudevent;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::domain::{Outcome, SkipReason};
use crate::error::Result;
use crate::port::ChangeHandler;

use cloudevent::DecodedEvent;

/// Shared state for the receiver.
pub struct ReceiverState {
    handler: Arc<dyn ChangeHandler>,
    source_collection: String,
}

impl ReceiverState {
    /// Create receiver state dispatching `source_collection` events to `handler`.
    pub fn new(handler: Arc<dyn ChangeHandler>, source_collection: impl Into<String>) -> Self {
        Self {
            handler,
            source_collection: source_collection.into(),
        }
    }
}

/// Build the receiver router.
pub fn router(state: Arc<ReceiverState>) -> Router {
    Router::new()
        .route("/", post(receive_event))
        .route("/healthz", get(liveness_handler))
        .with_state(state)
}

/// Serve `router` on `addr` until `shutdown` resolves.
///
/// # Errors
///
/// Returns an error if binding fails or the server stops with an I/O error.
pub async fn serve<F>(addr: SocketAddr, router: Router, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Event receiver listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Event receiver stopped");
    Ok(())
}

async fn receive_event(
    State(state): State<Arc<ReceiverState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let change = match cloudevent::decode(&headers, &body, &state.source_collection) {
        Ok(DecodedEvent::Change(change)) => change,
        Ok(DecodedEvent::Foreign { collection }) => {
            info!(
                collection = %collection,
                expected = %state.source_collection,
                "Skip: event for unwatched collection"
            );
            return (
                StatusCode::OK,
                Json(Outcome::skipped(SkipReason::ForeignCollection)),
            )
                .into_response();
        }
        Err(e) => {
            warn!(error = %e, "Rejected malformed event");
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response();
        }
    };

    let product_id = change.product_id.clone();
    let event_id = change.event_id.clone();
    match state.handler.handle(change).await {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(e) => {
            error!(
                product_id = %product_id,
                event_id = %event_id,
                error = %e,
                "Event handling failed"
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

async fn liveness_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
