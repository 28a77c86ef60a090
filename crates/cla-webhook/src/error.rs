//! Error types for the webhook gateway.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cla_core::CheckError;
use thiserror::Error;

/// Errors that end a webhook delivery.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Neither `X-Hub-Signature-256` nor `X-Hub-Signature` was sent.
    #[error("missing signature header")]
    MissingSignature,

    /// The signature header is not `sha1=<hex>` / `sha256=<hex>`.
    #[error("invalid signature format: {0}")]
    InvalidSignatureFormat(String),

    /// HMAC verification failed.
    #[error("invalid signature")]
    InvalidSignature,

    /// The body of an authenticated delivery could not be parsed.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// The event type is not one the gateway acts on.
    #[error("unhandled event: {0}")]
    UnhandledEvent(String),

    /// The compliance check failed after the delivery was accepted.
    #[error("compliance check failed: {0}")]
    Check(#[from] CheckError),
}

impl WebhookError {
    /// Returns the HTTP status code for this error.
    ///
    /// - Missing/invalid signature: 403 Forbidden
    /// - Invalid payload: 400 Bad Request
    /// - Unhandled event: 404 Not Found
    /// - Check failure: 500, so the delivery shows as failed on GitHub
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingSignature | Self::InvalidSignatureFormat(_) | Self::InvalidSignature => {
                StatusCode::FORBIDDEN
            }
            Self::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            Self::UnhandledEvent(_) => StatusCode::NOT_FOUND,
            Self::Check(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the request was rejected before reaching the pipeline.
    #[must_use]
    pub const fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            Self::MissingSignature | Self::InvalidSignatureFormat(_) | Self::InvalidSignature
        )
    }
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        // Bodies stay generic; upstream error text is only logged.
        let status = self.status_code();
        let body = match &self {
            Self::MissingSignature | Self::InvalidSignatureFormat(_) | Self::InvalidSignature => {
                String::from("Invalid signature")
            }
            Self::InvalidPayload(_) => String::from("Invalid payload"),
            Self::UnhandledEvent(event) => format!("Unhandled event \"{event}\"."),
            Self::Check(_) => String::from("Internal server error"),
        };

        (status, body).into_response()
    }
}
