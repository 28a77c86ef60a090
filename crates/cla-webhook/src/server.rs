//! HTTP surface of the gateway.

use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use cla_core::{PullRequestHost, SignatorySource};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::event::{DELIVERY_HEADER, EVENT_HEADER};
use crate::gateway::{Delivery, WebhookGateway};
use crate::signature::{SIGNATURE_256_HEADER, SIGNATURE_HEADER, Signatures};

/// Path GitHub posts deliveries to.
pub const WEBHOOK_PATH: &str = "/webhook";

/// Build the router: `POST /webhook` for deliveries, `404` on `GET /`.
pub fn router<R, H>(gateway: Arc<WebhookGateway<R, H>>) -> Router
where
    R: SignatorySource + Send + Sync + 'static,
    H: PullRequestHost + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(|| async { StatusCode::NOT_FOUND }))
        .route(WEBHOOK_PATH, post(receive::<R, H>))
        .layer(TraceLayer::new_for_http())
        .with_state(gateway)
}

async fn receive<R, H>(
    State(gateway): State<Arc<WebhookGateway<R, H>>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response
where
    R: SignatorySource + Send + Sync + 'static,
    H: PullRequestHost + Send + Sync + 'static,
{
    let header = |name: &str| headers.get(name).and_then(|value| value.to_str().ok());
    let delivery = Delivery {
        event: header(EVENT_HEADER),
        signatures: Signatures {
            sha1: header(SIGNATURE_HEADER),
            sha256: header(SIGNATURE_256_HEADER),
        },
        delivery_id: header(DELIVERY_HEADER),
        body: &body,
    };

    match gateway.handle(&delivery).await {
        Ok(outcome) => outcome.into_response(),
        Err(error) => {
            if error.is_authentication_failure() {
                tracing::warn!(delivery = ?delivery.delivery_id, %error, "rejected webhook delivery");
            } else {
                tracing::debug!(delivery = ?delivery.delivery_id, %error, "webhook delivery failed");
            }
            error.into_response()
        }
    }
}

/// Serve `gateway` on `listener` until the process is stopped.
///
/// # Errors
///
/// Returns the I/O error that stopped the server.
pub async fn serve<R, H>(
    listener: TcpListener,
    gateway: Arc<WebhookGateway<R, H>>,
) -> std::io::Result<()>
where
    R: SignatorySource + Send + Sync + 'static,
    H: PullRequestHost + Send + Sync + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, path = WEBHOOK_PATH, "webhook gateway listening");
    }
    axum::serve(listener, router(gateway)).await
}
