//! End-to-end compliance checks shared by the webhook gateway and the CLI.

use crate::errors::CheckError;
use crate::identity::RepoRef;
use crate::reconcile::StatusReconciler;
use crate::settings::{StatusSettings, UnlinkedCommitPolicy};
use crate::sources::{PullRequestHost, SignatorySource};
use crate::verdict::{ComplianceVerdict, evaluate};

/// Fetch a pull request's authors and the signatory registry concurrently
/// and compute the verdict. Nothing is written.
///
/// # Errors
///
/// Returns the first fetch failure; no partial verdict is produced.
pub async fn evaluate_pull_request<R, H>(
    registry: &R,
    host: &H,
    policy: UnlinkedCommitPolicy,
    repo: &RepoRef,
    number: u64,
) -> Result<ComplianceVerdict, CheckError>
where
    R: SignatorySource,
    H: PullRequestHost,
{
    let (authors, signatories) = tokio::try_join!(
        async {
            host.pull_request_authors(repo, number)
                .await
                .map_err(CheckError::from)
        },
        async { registry.fetch_signatories().await.map_err(CheckError::from) },
    )?;

    let verdict = evaluate(&authors.logins, &signatories);
    if authors.unresolved.is_empty() {
        return Ok(verdict);
    }

    match policy {
        UnlinkedCommitPolicy::Block => Ok(verdict.with_unlinked(authors.unresolved)),
        UnlinkedCommitPolicy::Ignore => {
            tracing::warn!(
                %repo,
                pr = number,
                commits = authors.unresolved.len(),
                "ignoring commits without a linked GitHub account"
            );
            Ok(verdict)
        }
    }
}

/// Evaluate a pull request and write the verdict onto it.
///
/// # Errors
///
/// Returns [`CheckError`] if any fetch or mutation fails. When a fetch fails,
/// no mutation is attempted.
pub async fn check_pull_request<R, H>(
    registry: &R,
    host: &H,
    settings: &StatusSettings,
    repo: &RepoRef,
    number: u64,
) -> Result<ComplianceVerdict, CheckError>
where
    R: SignatorySource,
    H: PullRequestHost,
{
    let verdict =
        evaluate_pull_request(registry, host, settings.unlinked_commits, repo, number).await?;
    tracing::info!(
        %repo,
        pr = number,
        compliant = verdict.is_compliant(),
        missing = ?verdict.missing(),
        "evaluated pull request"
    );

    StatusReconciler::new(host, settings)
        .reconcile(repo, number, &verdict)
        .await?;
    Ok(verdict)
}

/// Audit every contributor of a repository. Read-only: never touches
/// statuses or labels.
///
/// # Errors
///
/// Returns the first fetch failure.
pub async fn audit_repository<R, H>(
    registry: &R,
    host: &H,
    repo: &RepoRef,
) -> Result<ComplianceVerdict, CheckError>
where
    R: SignatorySource,
    H: PullRequestHost,
{
    let (contributors, signatories) = tokio::try_join!(
        async {
            host.repository_contributors(repo)
                .await
                .map_err(CheckError::from)
        },
        async { registry.fetch_signatories().await.map_err(CheckError::from) },
    )?;

    Ok(evaluate(&contributors, &signatories))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::errors::RegistryError;
    use crate::identity::{AuthorResolutionGap, Identity, PullRequestAuthors};
    use crate::testing::{FakeHost, FakeRegistry, HostCall};

    fn repo() -> RepoRef {
        RepoRef::new("SciTools", "iris")
    }

    fn with_ghost_commit(logins: &[&str]) -> PullRequestAuthors {
        let mut authors = PullRequestAuthors::from_logins(logins.iter().copied());
        authors.unresolved.push(AuthorResolutionGap {
            sha: "feedfacefeedface".into(),
            author_name: Some("Anonymous".into()),
        });
        authors
    }

    #[tokio::test]
    async fn unlinked_commit_blocks_by_default() {
        let registry = FakeRegistry::with(&["alice"]);
        let host = FakeHost::new("abc").with_authors(with_ghost_commit(&["alice"]));

        let verdict =
            evaluate_pull_request(&registry, &host, UnlinkedCommitPolicy::Block, &repo(), 3)
                .await
                .unwrap();
        assert!(!verdict.is_compliant());
        assert_eq!(verdict.summary().as_deref(), Some("unlinked commits: feedfac"));
    }

    #[tokio::test]
    async fn unlinked_commit_can_be_ignored() {
        let registry = FakeRegistry::with(&["alice"]);
        let host = FakeHost::new("abc").with_authors(with_ghost_commit(&["alice"]));

        let verdict =
            evaluate_pull_request(&registry, &host, UnlinkedCommitPolicy::Ignore, &repo(), 3)
                .await
                .unwrap();
        assert_eq!(verdict, ComplianceVerdict::Compliant);
    }

    #[tokio::test]
    async fn registry_failure_prevents_mutation() {
        let registry = FakeRegistry::unavailable(500);
        let host =
            FakeHost::new("abc").with_authors(PullRequestAuthors::from_logins(["alice"]));

        let err = check_pull_request(&registry, &host, &StatusSettings::default(), &repo(), 3)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CheckError::Registry(RegistryError::Unavailable {
                status: Some(500),
                ..
            })
        ));
        assert!(host.mutations().is_empty());
    }

    #[tokio::test]
    async fn author_fetch_failure_prevents_mutation() {
        let registry = FakeRegistry::with(&["alice"]);
        let host = FakeHost::new("abc").failing_on("authors");

        let err = check_pull_request(&registry, &host, &StatusSettings::default(), &repo(), 3)
            .await
            .unwrap_err();
        assert!(matches!(err, CheckError::Upstream(_)));
        assert!(host.mutations().is_empty());
    }

    #[tokio::test]
    async fn audit_reports_missing_contributors_without_mutation() {
        let registry = FakeRegistry::with(&["alice"]);
        let host = FakeHost::new("abc").with_contributors(&["alice", "Zoe", "bob"]);

        let verdict = audit_repository(&registry, &host, &repo()).await.unwrap();
        assert_eq!(
            verdict.missing(),
            [Identity::from("bob"), Identity::from("Zoe")].as_slice()
        );
        assert_eq!(host.calls(), vec![HostCall::Contributors]);
    }
}
