//! Converge a pull request's CLA status and blocking label to a verdict.
//!
//! The reconciler owns exactly one commit status context and one label.
//! Every run re-derives the target state from the verdict alone, so running
//! it again with the same verdict leaves the pull request unchanged. There is
//! no retry and no rollback: the first failing call aborts the run.
//!
//! Order of operations:
//!
//! ```text
//! non-compliant: head sha → failure status → add label
//! compliant:     remove label (absent is fine) → head sha → success status
//! ```

use crate::errors::UpstreamError;
use crate::identity::RepoRef;
use crate::settings::StatusSettings;
use crate::sources::{CommitState, CommitStatus, LabelRemoval, PullRequestHost};
use crate::verdict::ComplianceVerdict;

pub struct StatusReconciler<'a, H> {
    host: &'a H,
    settings: &'a StatusSettings,
}

impl<'a, H: PullRequestHost> StatusReconciler<'a, H> {
    pub const fn new(host: &'a H, settings: &'a StatusSettings) -> Self {
        Self { host, settings }
    }

    /// Write `verdict` onto pull request `number` of `repo`.
    ///
    /// # Errors
    ///
    /// Returns the first [`UpstreamError`]; later steps are not attempted.
    pub async fn reconcile(
        &self,
        repo: &RepoRef,
        number: u64,
        verdict: &ComplianceVerdict,
    ) -> Result<(), UpstreamError> {
        if verdict.is_compliant() {
            self.mark_compliant(repo, number).await
        } else {
            self.mark_blocked(repo, number, verdict).await
        }
    }

    async fn mark_blocked(
        &self,
        repo: &RepoRef,
        number: u64,
        verdict: &ComplianceVerdict,
    ) -> Result<(), UpstreamError> {
        let sha = self.host.head_commit_sha(repo, number).await?;
        let status = self.failure_status(verdict);
        self.host.create_commit_status(repo, &sha, &status).await?;
        self.host
            .add_label(repo, number, &self.settings.label)
            .await?;

        tracing::info!(
            %repo,
            pr = number,
            sha = %sha,
            description = %status.description,
            "marked pull request as missing a CLA"
        );
        Ok(())
    }

    async fn mark_compliant(&self, repo: &RepoRef, number: u64) -> Result<(), UpstreamError> {
        let removal = self
            .host
            .remove_label(repo, number, &self.settings.label)
            .await?;
        if removal == LabelRemoval::NotPresent {
            tracing::debug!(%repo, pr = number, label = %self.settings.label, "blocking label already absent");
        }

        let sha = self.host.head_commit_sha(repo, number).await?;
        self.host
            .create_commit_status(repo, &sha, &self.success_status())
            .await?;

        tracing::info!(%repo, pr = number, sha = %sha, "marked pull request as CLA compliant");
        Ok(())
    }

    fn failure_status(&self, verdict: &ComplianceVerdict) -> CommitStatus {
        let description = match verdict.summary() {
            Some(reason) => format!("{} ({reason})", self.settings.failure_description),
            None => self.settings.failure_description.clone(),
        };
        CommitStatus {
            state: CommitState::Failure,
            target_url: Some(self.settings.target_url.clone()),
            description,
            context: self.settings.context.clone(),
        }
    }

    fn success_status(&self) -> CommitStatus {
        CommitStatus {
            state: CommitState::Success,
            target_url: None,
            description: self.settings.success_description.clone(),
            context: self.settings.context.clone(),
        }
    }
}
