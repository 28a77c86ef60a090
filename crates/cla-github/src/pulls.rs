//! Pull request endpoints: commit authors and head SHA.

use cla_core::{AuthorResolutionGap, Identity, PullRequestAuthors, RepoRef, UpstreamError};
use serde::Deserialize;

use crate::GithubClient;

#[derive(Debug, Deserialize)]
struct PullRequest {
    head: HeadRef,
}

#[derive(Debug, Deserialize)]
struct HeadRef {
    sha: String,
}

/// One entry of `GET /repos/{repo}/pulls/{n}/commits`.
#[derive(Debug, Deserialize)]
struct PullRequestCommit {
    sha: String,
    commit: CommitDetail,
    /// The linked GitHub account; `null` when the commit email matches none.
    author: Option<Account>,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    author: Option<GitSignature>,
}

#[derive(Debug, Deserialize)]
struct GitSignature {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Account {
    login: String,
}

impl GithubClient {
    /// Logins of every commit author on pull request `number`.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] if any page of the commit list cannot be
    /// fetched or decoded.
    pub async fn list_pull_request_authors(
        &self,
        repo: &RepoRef,
        number: u64,
    ) -> Result<PullRequestAuthors, UpstreamError> {
        let commits = self
            .get_all_pages::<PullRequestCommit>(&format!("/repos/{repo}/pulls/{number}/commits"))
            .await?;
        let authors = collect_authors(commits);
        tracing::debug!(
            %repo,
            pr = number,
            authors = authors.logins.len(),
            unresolved = authors.unresolved.len(),
            "listed pull request authors"
        );
        Ok(authors)
    }

    /// SHA of the head commit of pull request `number`.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] if the pull request cannot be fetched.
    pub async fn get_head_commit_sha(
        &self,
        repo: &RepoRef,
        number: u64,
    ) -> Result<String, UpstreamError> {
        let pull: PullRequest = self
            .get_json(&format!("/repos/{repo}/pulls/{number}"))
            .await?;
        Ok(pull.head.sha)
    }
}

/// Split commits into linked author logins and commits with no account.
fn collect_authors(commits: Vec<PullRequestCommit>) -> PullRequestAuthors {
    let mut authors = PullRequestAuthors::default();
    for commit in commits {
        match commit.author {
            Some(account) => {
                authors.logins.insert(Identity::from(account.login));
            }
            None => authors.unresolved.push(AuthorResolutionGap {
                sha: commit.sha,
                author_name: commit.commit.author.and_then(|signature| signature.name),
            }),
        }
    }
    authors
}
