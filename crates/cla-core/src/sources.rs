//! Seams between the pipeline and the two remote systems it talks to.
//!
//! `cla-registry` implements [`SignatorySource`] and `cla-github` implements
//! [`PullRequestHost`]. The returned futures are `Send` so the pipeline can
//! run inside axum handlers and spawned tasks.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::errors::{RegistryError, UpstreamError};
use crate::identity::{IdentitySet, PullRequestAuthors, RepoRef};

/// Source of truth for who has signed the CLA.
pub trait SignatorySource: Send + Sync {
    /// Fetch a fresh snapshot of the signatory registry.
    fn fetch_signatories(&self) -> impl Future<Output = Result<IdentitySet, RegistryError>> + Send;
}

/// The source-control host: commit authorship plus the status and label APIs.
pub trait PullRequestHost: Send + Sync {
    /// Commit authors of a pull request.
    fn pull_request_authors(
        &self,
        repo: &RepoRef,
        number: u64,
    ) -> impl Future<Output = Result<PullRequestAuthors, UpstreamError>> + Send;

    /// Every contributor of a repository.
    fn repository_contributors(
        &self,
        repo: &RepoRef,
    ) -> impl Future<Output = Result<IdentitySet, UpstreamError>> + Send;

    /// SHA of the pull request's head commit. Statuses are addressed by SHA.
    fn head_commit_sha(
        &self,
        repo: &RepoRef,
        number: u64,
    ) -> impl Future<Output = Result<String, UpstreamError>> + Send;

    /// Append a commit status.
    fn create_commit_status(
        &self,
        repo: &RepoRef,
        sha: &str,
        status: &CommitStatus,
    ) -> impl Future<Output = Result<(), UpstreamError>> + Send;

    /// Add a label to the pull request. Adding a present label is a no-op.
    fn add_label(
        &self,
        repo: &RepoRef,
        number: u64,
        label: &str,
    ) -> impl Future<Output = Result<(), UpstreamError>> + Send;

    /// Remove a label from the pull request.
    fn remove_label(
        &self,
        repo: &RepoRef,
        number: u64,
        label: &str,
    ) -> impl Future<Output = Result<LabelRemoval, UpstreamError>> + Send;
}

/// State of a commit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitState {
    Success,
    Failure,
}

/// Body of a commit status as posted to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitStatus {
    pub state: CommitState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_url: Option<String>,
    pub description: String,
    pub context: String,
}

/// Result of a label removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelRemoval {
    Removed,
    /// The label was not on the pull request.
    NotPresent,
}
