//! Commit status and issue label mutations.

use cla_core::{CommitStatus, LabelRemoval, RepoRef, UpstreamError};
use reqwest::{Method, StatusCode};

use crate::GithubClient;
use crate::http::{check_response, transport};

impl GithubClient {
    /// Append a commit status to `sha`.
    ///
    /// GitHub limits the description length; it is sent as-is.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] if GitHub rejects the status.
    pub async fn post_commit_status(
        &self,
        repo: &RepoRef,
        sha: &str,
        status: &CommitStatus,
    ) -> Result<(), UpstreamError> {
        let url = self.url(&format!("/repos/{repo}/statuses/{sha}"));
        let resp = self
            .request(Method::POST, &url)
            .json(status)
            .send()
            .await
            .map_err(transport)?;
        check_response(resp).await?;
        Ok(())
    }

    /// Add `label` to issue/pull request `number`. Creates the label in the
    /// repository if needed; adding a present label changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] if GitHub rejects the request.
    pub async fn post_label(
        &self,
        repo: &RepoRef,
        number: u64,
        label: &str,
    ) -> Result<(), UpstreamError> {
        let url = self.url(&format!("/repos/{repo}/issues/{number}/labels"));
        let resp = self
            .request(Method::POST, &url)
            .json(&serde_json::json!({ "labels": [label] }))
            .send()
            .await
            .map_err(transport)?;
        check_response(resp).await?;
        Ok(())
    }

    /// Remove `label` from issue/pull request `number`.
    ///
    /// A 404 means the label was not there, which is the expected steady
    /// state for a compliant pull request.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] for any failure other than 404.
    pub async fn delete_label(
        &self,
        repo: &RepoRef,
        number: u64,
        label: &str,
    ) -> Result<LabelRemoval, UpstreamError> {
        let url = self.url(&label_path(repo, number, label));
        let resp = self
            .request(Method::DELETE, &url)
            .send()
            .await
            .map_err(transport)?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(LabelRemoval::NotPresent);
        }
        check_response(resp).await?;
        Ok(LabelRemoval::Removed)
    }
}

fn label_path(repo: &RepoRef, number: u64, label: &str) -> String {
    format!(
        "/repos/{repo}/issues/{number}/labels/{}",
        urlencoding::encode(label)
    )
}
