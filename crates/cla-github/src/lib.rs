//! # cla-github
//!
//! GitHub REST client for the CLA checker.
//!
//! Covers the handful of endpoints the checker needs:
//! - `GET /repos/{repo}/pulls/{n}` (head SHA)
//! - `GET /repos/{repo}/pulls/{n}/commits` (commit authors)
//! - `GET /repos/{repo}/contributors` (repository-wide audit)
//! - `POST /repos/{repo}/statuses/{sha}`
//! - `POST` / `DELETE /repos/{repo}/issues/{n}/labels`
//!
//! Every request carries the token, the v3 media type and a User-Agent;
//! GitHub answers 403 to requests without a User-Agent.

mod http;
mod pulls;
mod repos;
mod status;

use cla_core::{
    CommitStatus, IdentitySet, LabelRemoval, PullRequestAuthors, PullRequestHost, RepoRef,
    UpstreamError,
};
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::http::{check_response, read_json, transport};

pub use cla_core::{DEFAULT_API_URL, DEFAULT_USER_AGENT};

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// Page size for list endpoints (GitHub's maximum).
const PER_PAGE: usize = 100;
/// Upper bound on pages followed for one listing.
const MAX_PAGES: usize = 50;

/// Authenticated GitHub API client.
pub struct GithubClient {
    http: reqwest::Client,
    api_url: String,
    token: String,
    user_agent: String,
}

impl GithubClient {
    /// Create a client for `api.github.com` authenticating with `token`.
    pub fn new(http: reqwest::Client, token: impl Into<String>) -> Self {
        Self {
            http,
            api_url: String::from(DEFAULT_API_URL),
            token: token.into(),
            user_agent: String::from(DEFAULT_USER_AGENT),
        }
    }

    /// Use a different API root, e.g. a GitHub Enterprise `/api/v3` URL.
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_url)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .header(AUTHORIZATION, format!("token {}", self.token))
            .header(ACCEPT, GITHUB_ACCEPT)
            .header(USER_AGENT, &self.user_agent)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, UpstreamError> {
        let resp = self
            .request(Method::GET, &self.url(path))
            .send()
            .await
            .map_err(transport)?;
        read_json(check_response(resp).await?).await
    }

    /// Fetch every page of a list endpoint.
    async fn get_all_pages<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, UpstreamError> {
        let mut items = Vec::new();
        for page in 1..=MAX_PAGES {
            let url = format!("{}?per_page={PER_PAGE}&page={page}", self.url(path));
            let resp = self
                .request(Method::GET, &url)
                .send()
                .await
                .map_err(transport)?;
            // Contributors of an empty repository.
            if resp.status() == StatusCode::NO_CONTENT {
                break;
            }

            let batch: Vec<T> = read_json(check_response(resp).await?).await?;
            let len = batch.len();
            items.extend(batch);
            if len < PER_PAGE {
                return Ok(items);
            }
        }

        if items.len() >= PER_PAGE * MAX_PAGES {
            tracing::warn!(path, count = items.len(), "listing truncated at page limit");
        }
        Ok(items)
    }
}

impl PullRequestHost for GithubClient {
    async fn pull_request_authors(
        &self,
        repo: &RepoRef,
        number: u64,
    ) -> Result<PullRequestAuthors, UpstreamError> {
        self.list_pull_request_authors(repo, number).await
    }

    async fn repository_contributors(&self, repo: &RepoRef) -> Result<IdentitySet, UpstreamError> {
        self.list_repository_contributors(repo).await
    }

    async fn head_commit_sha(&self, repo: &RepoRef, number: u64) -> Result<String, UpstreamError> {
        self.get_head_commit_sha(repo, number).await
    }

    async fn create_commit_status(
        &self,
        repo: &RepoRef,
        sha: &str,
        status: &CommitStatus,
    ) -> Result<(), UpstreamError> {
        self.post_commit_status(repo, sha, status).await
    }

    async fn add_label(
        &self,
        repo: &RepoRef,
        number: u64,
        label: &str,
    ) -> Result<(), UpstreamError> {
        self.post_label(repo, number, label).await
    }

    async fn remove_label(
        &self,
        repo: &RepoRef,
        number: u64,
        label: &str,
    ) -> Result<LabelRemoval, UpstreamError> {
        self.delete_label(repo, number, label).await
    }
}
