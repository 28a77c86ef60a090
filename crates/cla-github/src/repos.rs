//! Repository-wide contributor listing.

use cla_core::{Identity, IdentitySet, RepoRef, UpstreamError};
use serde::Deserialize;

use crate::GithubClient;

#[derive(Debug, Deserialize)]
struct Contributor {
    /// Absent for anonymous (email-only) contributors.
    login: Option<String>,
}

impl GithubClient {
    /// Logins of every contributor to `repo`.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] if any page cannot be fetched or decoded.
    pub async fn list_repository_contributors(
        &self,
        repo: &RepoRef,
    ) -> Result<IdentitySet, UpstreamError> {
        let contributors = self
            .get_all_pages::<Contributor>(&format!("/repos/{repo}/contributors"))
            .await?;
        Ok(logins(contributors))
    }
}

fn logins(contributors: Vec<Contributor>) -> IdentitySet {
    contributors
        .into_iter()
        .filter_map(|contributor| contributor.login)
        .map(Identity::from)
        .collect()
}
