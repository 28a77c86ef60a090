//! The parts of GitHub webhook payloads the gateway reads.

use serde::Deserialize;

use cla_core::RepoRef;

use crate::error::WebhookError;

pub const EVENT_HEADER: &str = "x-github-event";
pub const DELIVERY_HEADER: &str = "x-github-delivery";

/// Value of the `X-GitHub-Event` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Ping,
    PullRequest,
    Other(String),
}

impl EventKind {
    #[must_use]
    pub fn from_header(value: &str) -> Self {
        match value {
            "ping" => Self::Ping,
            "pull_request" => Self::PullRequest,
            other => Self::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestEvent {
    #[serde(default)]
    pub action: Option<String>,
    pub repository: Repository,
    pub pull_request: PullRequest,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub name: String,
    pub owner: Owner,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Owner {
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub state: String,
}

impl PullRequestEvent {
    /// Parse a `pull_request` delivery body.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::InvalidPayload`] if required fields are missing.
    pub fn parse(body: &[u8]) -> Result<Self, WebhookError> {
        serde_json::from_slice(body).map_err(|error| WebhookError::InvalidPayload(error.to_string()))
    }

    #[must_use]
    pub fn repo(&self) -> RepoRef {
        RepoRef::new(&self.repository.owner.login, &self.repository.name)
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.pull_request.state == "open"
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const OPENED: &str = r#"{
        "action": "opened",
        "number": 7,
        "pull_request": {"number": 7, "state": "open", "title": "Fix docs"},
        "repository": {"name": "iris", "full_name": "SciTools/iris", "owner": {"login": "SciTools", "type": "Organization"}},
        "sender": {"login": "alice"}
    }"#;

    #[test]
    fn parses_pull_request_event() {
        let event = PullRequestEvent::parse(OPENED.as_bytes()).unwrap();
        assert_eq!(event.action.as_deref(), Some("opened"));
        assert_eq!(event.pull_request.number, 7);
        assert!(event.is_open());
        assert_eq!(event.repo().to_string(), "SciTools/iris");
    }

    #[test]
    fn closed_state_is_not_open() {
        let body = OPENED.replace(r#""state": "open""#, r#""state": "closed""#);
        let event = PullRequestEvent::parse(body.as_bytes()).unwrap();
        assert!(!event.is_open());
    }

    #[test]
    fn missing_pull_request_is_invalid() {
        let err = PullRequestEvent::parse(br#"{"repository": {"name": "iris", "owner": {"login": "SciTools"}}}"#)
            .unwrap_err();
        assert!(matches!(err, WebhookError::InvalidPayload(_)));
    }

    #[test]
    fn event_kind_from_header() {
        assert_eq!(EventKind::from_header("ping"), EventKind::Ping);
        assert_eq!(EventKind::from_header("pull_request"), EventKind::PullRequest);
        assert_eq!(
            EventKind::from_header("issues"),
            EventKind::Other("issues".into())
        );
    }
}
