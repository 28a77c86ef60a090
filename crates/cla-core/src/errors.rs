//! Cross-cutting error types for the CLA checker.
//!
//! Failures of the two remote data sources are modelled here so the pipeline
//! can propagate them without depending on any HTTP client. Configuration and
//! webhook errors live in `cla-config` and `cla-webhook`; `cla-cli` converges
//! everything into `anyhow`.

use thiserror::Error;

/// Errors raised while fetching the CLA signatory registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The fetch did not complete with a success status.
    #[error("signatory registry unavailable: {message}")]
    Unavailable {
        /// HTTP status, when a response was received at all.
        status: Option<u16>,
        /// Response body or transport error message.
        message: String,
    },

    /// The document did not have the `{"contributors": [{"profile_name": ..}]}` shape.
    #[error("signatory registry document is malformed: {0}")]
    Malformed(String),
}

/// Errors raised by the source-control hosting API.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The API answered with a non-success status.
    #[error("GitHub API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The request never produced a response.
    #[error("GitHub request failed: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The response body did not have the expected shape.
    #[error("unexpected GitHub response: {0}")]
    Parse(String),
}

impl UpstreamError {
    /// HTTP status of an [`UpstreamError::Api`] failure.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(_) | Self::Parse(_) => None,
        }
    }
}

/// Any failure that aborts a compliance evaluation.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// A repository argument that is not of the form `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid repository '{0}': expected 'owner/name'")]
pub struct InvalidRepoRef(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_reports_status() {
        let err = UpstreamError::Api {
            status: 422,
            body: "Validation Failed".into(),
        };
        assert_eq!(err.status(), Some(422));
        assert_eq!(err.to_string(), "GitHub API error (422): Validation Failed");
    }

    #[test]
    fn check_error_is_transparent() {
        let err = CheckError::from(RegistryError::Malformed("missing field `contributors`".into()));
        assert_eq!(
            err.to_string(),
            "signatory registry document is malformed: missing field `contributors`"
        );
    }
}
