//! # cla-core
//!
//! Core types and the compliance pipeline for the CLA checker.
//!
//! This crate provides everything that does not talk to the network itself:
//! - Identity, repository and commit-author types
//! - The pure compliance evaluator (`authors − signatories`)
//! - Cross-cutting error types for registry and GitHub failures
//! - The [`SignatorySource`] and [`PullRequestHost`] seams implemented by
//!   `cla-registry` and `cla-github`
//! - The [`StatusReconciler`] that converges a pull request's commit status
//!   and blocking label to a verdict
//! - Pipeline entry points shared by the webhook gateway and the CLI

pub mod errors;
pub mod identity;
pub mod pipeline;
pub mod reconcile;
pub mod settings;
pub mod sources;
pub mod verdict;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use errors::{CheckError, InvalidRepoRef, RegistryError, UpstreamError};
pub use identity::{AuthorResolutionGap, Identity, IdentitySet, PullRequestAuthors, RepoRef};
pub use pipeline::{audit_repository, check_pull_request, evaluate_pull_request};
pub use reconcile::StatusReconciler;
pub use settings::{
    DEFAULT_API_URL, DEFAULT_REGISTRY_URL, DEFAULT_USER_AGENT, StatusSettings,
    UnlinkedCommitPolicy,
};
pub use sources::{CommitState, CommitStatus, LabelRemoval, PullRequestHost, SignatorySource};
pub use verdict::{ComplianceVerdict, evaluate, sort_case_insensitive};
