//! Delivery handling: authenticate, route by event, run the check.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cla_core::{
    ComplianceVerdict, PullRequestHost, SignatorySource, StatusSettings, check_pull_request,
};

use crate::error::WebhookError;
use crate::event::{EventKind, PullRequestEvent};
use crate::signature::{self, Signatures};

/// One inbound delivery, already split out of the HTTP request.
#[derive(Debug, Clone, Copy)]
pub struct Delivery<'a> {
    pub event: Option<&'a str>,
    pub signatures: Signatures<'a>,
    pub delivery_id: Option<&'a str>,
    pub body: &'a [u8],
}

/// What the gateway did with an authenticated delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Pong,
    /// Accepted but not acted on.
    Ignored(&'static str),
    Checked(ComplianceVerdict),
}

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        match self {
            Self::Pong => (StatusCode::OK, "pong").into_response(),
            Self::Ignored(_) | Self::Checked(_) => StatusCode::OK.into_response(),
        }
    }
}

/// Receives GitHub deliveries and runs the compliance check for open pull
/// requests in allow-listed organisations.
pub struct WebhookGateway<R, H> {
    registry: R,
    host: H,
    secret: Vec<u8>,
    allowed_owners: Vec<String>,
    settings: StatusSettings,
}

impl<R, H> WebhookGateway<R, H>
where
    R: SignatorySource,
    H: PullRequestHost,
{
    pub fn new(registry: R, host: H, secret: impl Into<Vec<u8>>, settings: StatusSettings) -> Self {
        Self {
            registry,
            host,
            secret: secret.into(),
            allowed_owners: Vec::new(),
            settings,
        }
    }

    /// Only act on repositories owned by one of `owners` (case-insensitive).
    /// Until this is called no owner is allowed.
    #[must_use]
    pub fn with_allowed_owners<I, S>(mut self, owners: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_owners = owners.into_iter().map(Into::into).collect();
        self
    }

    pub const fn registry(&self) -> &R {
        &self.registry
    }

    pub const fn host(&self) -> &H {
        &self.host
    }

    fn owner_allowed(&self, owner: &str) -> bool {
        self.allowed_owners
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(owner))
    }

    /// Handle one delivery. Nothing is parsed or fetched before the
    /// signature checks out.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError`] for authentication failures, unparsable
    /// payloads, event types other than `ping`/`pull_request`, and failed
    /// compliance checks.
    pub async fn handle(&self, delivery: &Delivery<'_>) -> Result<Outcome, WebhookError> {
        signature::verify(&self.secret, delivery.body, delivery.signatures)?;

        let event = EventKind::from_header(delivery.event.unwrap_or_default());
        tracing::debug!(delivery = ?delivery.delivery_id, ?event, "received webhook");

        match event {
            EventKind::Ping => Ok(Outcome::Pong),
            EventKind::PullRequest => self.handle_pull_request(delivery.body).await,
            EventKind::Other(name) => Err(WebhookError::UnhandledEvent(name)),
        }
    }

    async fn handle_pull_request(&self, body: &[u8]) -> Result<Outcome, WebhookError> {
        let event = PullRequestEvent::parse(body)?;
        let repo = event.repo();
        let number = event.pull_request.number;

        if !event.is_open() {
            tracing::debug!(%repo, pr = number, state = %event.pull_request.state, "skipping pull request that is not open");
            return Ok(Outcome::Ignored("pull request is not open"));
        }
        if !self.owner_allowed(&repo.owner) {
            tracing::info!(%repo, pr = number, "skipping repository outside allowed owners");
            return Ok(Outcome::Ignored("owner not allowed"));
        }

        match check_pull_request(&self.registry, &self.host, &self.settings, &repo, number).await {
            Ok(verdict) => Ok(Outcome::Checked(verdict)),
            Err(error) => {
                tracing::error!(%repo, pr = number, %error, "compliance check failed");
                Err(error.into())
            }
        }
    }
}
