//! In-memory fakes of the remote systems, for tests.
//!
//! [`FakeHost`] models the slice of pull request state the reconciler owns
//! (labels and an append-only status log) and records every call, so tests
//! can assert both on the end state and on which requests were made.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::errors::{RegistryError, UpstreamError};
use crate::identity::{Identity, IdentitySet, PullRequestAuthors, RepoRef};
use crate::sources::{CommitStatus, LabelRemoval, PullRequestHost, SignatorySource};

enum RegistryOutcome {
    Signatories(IdentitySet),
    Unavailable(u16),
    Malformed,
}

/// A signatory registry with a fixed answer.
pub struct FakeRegistry {
    outcome: RegistryOutcome,
    fetches: AtomicUsize,
}

impl FakeRegistry {
    #[must_use]
    pub fn with(names: &[&str]) -> Self {
        Self::from_outcome(RegistryOutcome::Signatories(
            names.iter().copied().map(Identity::from).collect(),
        ))
    }

    /// Every fetch fails as if the registry answered with `status`.
    #[must_use]
    pub fn unavailable(status: u16) -> Self {
        Self::from_outcome(RegistryOutcome::Unavailable(status))
    }

    #[must_use]
    pub fn malformed() -> Self {
        Self::from_outcome(RegistryOutcome::Malformed)
    }

    const fn from_outcome(outcome: RegistryOutcome) -> Self {
        Self {
            outcome,
            fetches: AtomicUsize::new(0),
        }
    }

    /// Number of fetches made so far.
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl SignatorySource for FakeRegistry {
    async fn fetch_signatories(&self) -> Result<IdentitySet, RegistryError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            RegistryOutcome::Signatories(names) => Ok(names.clone()),
            RegistryOutcome::Unavailable(status) => Err(RegistryError::Unavailable {
                status: Some(*status),
                message: String::from("injected failure"),
            }),
            RegistryOutcome::Malformed => Err(RegistryError::Malformed(String::from(
                "missing field `contributors`",
            ))),
        }
    }
}

/// A call made against [`FakeHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    Authors(u64),
    Contributors,
    HeadSha(u64),
    CreateStatus(String),
    AddLabel(u64, String),
    RemoveLabel(u64, String),
}

impl HostCall {
    /// Whether the call changes pull request state.
    #[must_use]
    pub const fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::CreateStatus(_) | Self::AddLabel(..) | Self::RemoveLabel(..)
        )
    }

    const fn kind(&self) -> &'static str {
        match self {
            Self::Authors(_) => "authors",
            Self::Contributors => "contributors",
            Self::HeadSha(_) => "head_sha",
            Self::CreateStatus(_) => "create_status",
            Self::AddLabel(..) => "add_label",
            Self::RemoveLabel(..) => "remove_label",
        }
    }
}

/// The externally visible state: labels, and the latest status per
/// `(sha, context)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExternalState {
    pub labels: BTreeSet<String>,
    pub latest_statuses: BTreeMap<(String, String), CommitStatus>,
}

#[derive(Default)]
struct HostState {
    labels: BTreeSet<String>,
    statuses: Vec<(String, CommitStatus)>,
    calls: Vec<HostCall>,
}

/// A pull request host backed by memory.
pub struct FakeHost {
    head_sha: String,
    authors: PullRequestAuthors,
    contributors: IdentitySet,
    fail_on: Option<&'static str>,
    state: Mutex<HostState>,
}

impl FakeHost {
    #[must_use]
    pub fn new(head_sha: &str) -> Self {
        Self {
            head_sha: head_sha.to_string(),
            authors: PullRequestAuthors::default(),
            contributors: IdentitySet::new(),
            fail_on: None,
            state: Mutex::new(HostState::default()),
        }
    }

    #[must_use]
    pub fn with_authors(mut self, authors: PullRequestAuthors) -> Self {
        self.authors = authors;
        self
    }

    #[must_use]
    pub fn with_contributors(mut self, names: &[&str]) -> Self {
        self.contributors = names.iter().copied().map(Identity::from).collect();
        self
    }

    /// Start with `label` already on the pull request.
    #[must_use]
    pub fn with_label(self, label: &str) -> Self {
        self.lock().labels.insert(label.to_string());
        self
    }

    /// Fail every call of one kind (`authors`, `contributors`, `head_sha`,
    /// `create_status`, `add_label`, `remove_label`) with HTTP 500.
    #[must_use]
    pub const fn failing_on(mut self, kind: &'static str) -> Self {
        self.fail_on = Some(kind);
        self
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.lock().calls.clone()
    }

    pub fn mutations(&self) -> Vec<HostCall> {
        self.lock()
            .calls
            .iter()
            .filter(|call| call.is_mutation())
            .cloned()
            .collect()
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.lock().labels.contains(label)
    }

    /// Most recent status posted on `sha`.
    pub fn latest_status(&self, sha: &str) -> Option<CommitStatus> {
        self.lock()
            .statuses
            .iter()
            .rev()
            .find(|(status_sha, _)| status_sha == sha)
            .map(|(_, status)| status.clone())
    }

    pub fn external_state(&self) -> ExternalState {
        let state = self.lock();
        let mut latest_statuses = BTreeMap::new();
        for (sha, status) in &state.statuses {
            latest_statuses.insert((sha.clone(), status.context.clone()), status.clone());
        }
        ExternalState {
            labels: state.labels.clone(),
            latest_statuses,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HostState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, call: HostCall) -> Result<MutexGuard<'_, HostState>, UpstreamError> {
        let fails = self.fail_on == Some(call.kind());
        let mut state = self.lock();
        state.calls.push(call);
        if fails {
            return Err(UpstreamError::Api {
                status: 500,
                body: String::from("injected failure"),
            });
        }
        Ok(state)
    }
}

impl PullRequestHost for FakeHost {
    async fn pull_request_authors(
        &self,
        _repo: &RepoRef,
        number: u64,
    ) -> Result<PullRequestAuthors, UpstreamError> {
        self.record(HostCall::Authors(number))?;
        Ok(self.authors.clone())
    }

    async fn repository_contributors(&self, _repo: &RepoRef) -> Result<IdentitySet, UpstreamError> {
        self.record(HostCall::Contributors)?;
        Ok(self.contributors.clone())
    }

    async fn head_commit_sha(&self, _repo: &RepoRef, number: u64) -> Result<String, UpstreamError> {
        self.record(HostCall::HeadSha(number))?;
        Ok(self.head_sha.clone())
    }

    async fn create_commit_status(
        &self,
        _repo: &RepoRef,
        sha: &str,
        status: &CommitStatus,
    ) -> Result<(), UpstreamError> {
        let mut state = self.record(HostCall::CreateStatus(sha.to_string()))?;
        state.statuses.push((sha.to_string(), status.clone()));
        Ok(())
    }

    async fn add_label(
        &self,
        _repo: &RepoRef,
        number: u64,
        label: &str,
    ) -> Result<(), UpstreamError> {
        let mut state = self.record(HostCall::AddLabel(number, label.to_string()))?;
        state.labels.insert(label.to_string());
        Ok(())
    }

    async fn remove_label(
        &self,
        _repo: &RepoRef,
        number: u64,
        label: &str,
    ) -> Result<LabelRemoval, UpstreamError> {
        let mut state = self.record(HostCall::RemoveLabel(number, label.to_string()))?;
        if state.labels.remove(label) {
            Ok(LabelRemoval::Removed)
        } else {
            Ok(LabelRemoval::NotPresent)
        }
    }
}
