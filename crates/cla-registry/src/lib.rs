//! # cla-registry
//!
//! HTTP client for the CLA signatory registry.
//!
//! The registry is a single public JSON document listing everyone who has
//! signed the Contributor License Agreement:
//!
//! ```json
//! {"contributors": [{"profile_name": "alice"}, {"profile_name": "bob"}]}
//! ```
//!
//! It is fetched fresh for every evaluation; nothing is cached.

mod http;

use cla_core::{Identity, IdentitySet, RegistryError, SignatorySource};

use crate::http::{check_response, transport_error};

pub use cla_core::DEFAULT_REGISTRY_URL;

#[derive(serde::Deserialize)]
struct ContributorsDocument {
    contributors: Vec<Member>,
}

#[derive(serde::Deserialize)]
struct Member {
    profile_name: String,
}

/// Client for the signatory registry document.
pub struct SignatoryRegistry {
    http: reqwest::Client,
    url: String,
}

impl SignatoryRegistry {
    /// Create a registry client reading `url` through `http`.
    pub fn new(http: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch and parse the registry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unavailable`] if the request fails or the
    /// registry returns a non-success status, and
    /// [`RegistryError::Malformed`] if the document has the wrong shape.
    pub async fn fetch(&self) -> Result<IdentitySet, RegistryError> {
        let resp = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|error| transport_error(&error))?;
        let body = check_response(resp)
            .await?
            .bytes()
            .await
            .map_err(|error| transport_error(&error))?;

        let signatories = parse_signatories(&body)?;
        tracing::debug!(url = %self.url, count = signatories.len(), "fetched signatory registry");
        Ok(signatories)
    }
}

impl SignatorySource for SignatoryRegistry {
    async fn fetch_signatories(&self) -> Result<IdentitySet, RegistryError> {
        self.fetch().await
    }
}

/// Parse the registry document into the set of `profile_name` values.
///
/// # Errors
///
/// Returns [`RegistryError::Malformed`] when `contributors` is missing or not
/// an array, or a member has no string `profile_name`.
pub fn parse_signatories(body: &[u8]) -> Result<IdentitySet, RegistryError> {
    let document: ContributorsDocument = serde_json::from_slice(body)
        .map_err(|error| RegistryError::Malformed(error.to_string()))?;

    Ok(document
        .contributors
        .into_iter()
        .map(|member| Identity::from(member.profile_name))
        .collect())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const FIXTURE: &str = r#"{
        "contributors": [
            {"profile_name": "pelson", "name": "Phil Elson", "cla": "individual"},
            {"profile_name": "bjlittle"},
            {"profile_name": "Alice"},
            {"profile_name": "alice"},
            {"profile_name": "bjlittle"}
        ]
    }"#;

    #[test]
    fn parse_registry_document() {
        let signatories = parse_signatories(FIXTURE.as_bytes()).unwrap();
        let names = signatories
            .iter()
            .map(Identity::as_str)
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Alice", "alice", "bjlittle", "pelson"]);
    }

    #[test]
    fn empty_contributor_list_is_valid() {
        let signatories = parse_signatories(br#"{"contributors": []}"#).unwrap();
        assert!(signatories.is_empty());
    }

    #[test]
    fn missing_contributors_key_is_malformed() {
        let err = parse_signatories(br#"{"people": []}"#).unwrap_err();
        assert!(matches!(err, RegistryError::Malformed(_)));
    }

    #[test]
    fn non_array_contributors_is_malformed() {
        let err = parse_signatories(br#"{"contributors": {"profile_name": "a"}}"#).unwrap_err();
        assert!(matches!(err, RegistryError::Malformed(_)));
    }

    #[test]
    fn member_without_profile_name_is_malformed() {
        let err =
            parse_signatories(br#"{"contributors": [{"profile_name": "a"}, {"name": "b"}]}"#)
                .unwrap_err();
        assert!(matches!(err, RegistryError::Malformed(_)));
    }

    #[test]
    fn non_json_body_is_malformed() {
        let err = parse_signatories(b"<html>rate limited</html>").unwrap_err();
        assert!(matches!(err, RegistryError::Malformed(_)));
    }

    #[test]
    fn client_reports_its_url() {
        let registry = SignatoryRegistry::new(reqwest::Client::new(), DEFAULT_REGISTRY_URL);
        assert!(registry.url().ends_with("/gh-pages/contributors.json"));
    }

    #[tokio::test]
    async fn unreachable_registry_is_unavailable() {
        let registry = SignatoryRegistry::new(reqwest::Client::new(), "http://127.0.0.1:1/contributors.json");
        let err = registry.fetch().await.unwrap_err();
        assert!(matches!(err, RegistryError::Unavailable { status: None, .. }));
    }

    #[tokio::test]
    #[ignore] // requires network
    async fn live_fetch_registry() {
        let registry = SignatoryRegistry::new(reqwest::Client::new(), DEFAULT_REGISTRY_URL);
        let signatories = registry.fetch().await.unwrap();
        println!("\n── {} signatories", signatories.len());
        assert!(!signatories.is_empty());
    }
}
