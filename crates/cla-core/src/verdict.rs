//! Compliance evaluation.

use std::cmp::Ordering;

use serde::Serialize;

use crate::identity::{AuthorResolutionGap, Identity, IdentitySet};

/// Outcome of comparing a set of authors against the signatory registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum ComplianceVerdict {
    Compliant,
    NonCompliant {
        /// Authors without a signed CLA, sorted case-insensitively.
        missing: Vec<Identity>,
        /// Commits whose author could not be resolved to a login.
        #[serde(skip_serializing_if = "Vec::is_empty")]
        unlinked: Vec<AuthorResolutionGap>,
    },
}

impl ComplianceVerdict {
    #[must_use]
    pub const fn is_compliant(&self) -> bool {
        matches!(self, Self::Compliant)
    }

    /// Identities lacking a CLA; empty when compliant.
    #[must_use]
    pub fn missing(&self) -> &[Identity] {
        match self {
            Self::Compliant => &[],
            Self::NonCompliant { missing, .. } => missing,
        }
    }

    /// Fold unresolved commits into the verdict. Any gap blocks the PR.
    #[must_use]
    pub fn with_unlinked(self, mut gaps: Vec<AuthorResolutionGap>) -> Self {
        if gaps.is_empty() {
            return self;
        }
        gaps.sort();
        gaps.dedup();
        match self {
            Self::Compliant => Self::NonCompliant {
                missing: Vec::new(),
                unlinked: gaps,
            },
            Self::NonCompliant {
                missing,
                mut unlinked,
            } => {
                unlinked.extend(gaps);
                unlinked.sort();
                unlinked.dedup();
                Self::NonCompliant { missing, unlinked }
            }
        }
    }

    /// Human-readable reason, e.g. `authors: carol, Dave`.
    #[must_use]
    pub fn summary(&self) -> Option<String> {
        let Self::NonCompliant { missing, unlinked } = self else {
            return None;
        };

        let mut parts = Vec::with_capacity(2);
        if !missing.is_empty() {
            let names = missing.iter().map(Identity::as_str).collect::<Vec<_>>();
            parts.push(format!("authors: {}", names.join(", ")));
        }
        if !unlinked.is_empty() {
            let shas = unlinked
                .iter()
                .map(AuthorResolutionGap::short_sha)
                .collect::<Vec<_>>();
            parts.push(format!("unlinked commits: {}", shas.join(", ")));
        }
        (!parts.is_empty()).then(|| parts.join("; "))
    }
}

/// Compute `authors − signatories`.
///
/// A single missing author makes the whole set non-compliant.
#[must_use]
pub fn evaluate(authors: &IdentitySet, signatories: &IdentitySet) -> ComplianceVerdict {
    let mut missing = authors
        .difference(signatories)
        .cloned()
        .collect::<Vec<_>>();

    if missing.is_empty() {
        return ComplianceVerdict::Compliant;
    }

    sort_case_insensitive(&mut missing);
    ComplianceVerdict::NonCompliant {
        missing,
        unlinked: Vec::new(),
    }
}

/// Sort identities for display, ignoring case. Ties fall back to the
/// case-sensitive order so the result is deterministic.
pub fn sort_case_insensitive(identities: &mut [Identity]) {
    identities.sort_by(|a, b| compare_case_insensitive(a.as_str(), b.as_str()));
}

fn compare_case_insensitive(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn set(names: &[&str]) -> IdentitySet {
        names.iter().copied().map(Identity::from).collect()
    }

    fn ids(names: &[&str]) -> Vec<Identity> {
        names.iter().copied().map(Identity::from).collect()
    }

    #[test]
    fn subset_is_compliant() {
        let verdict = evaluate(&set(&["alice"]), &set(&["alice", "bob"]));
        assert_eq!(verdict, ComplianceVerdict::Compliant);
    }

    #[test]
    fn empty_author_set_is_compliant() {
        assert!(evaluate(&set(&[]), &set(&["alice"])).is_compliant());
    }

    #[test]
    fn missing_is_exact_difference() {
        let verdict = evaluate(&set(&["alice", "carol", "dave"]), &set(&["alice", "bob"]));
        assert_eq!(verdict.missing(), ids(&["carol", "dave"]).as_slice());
    }

    #[test]
    fn missing_is_sorted_case_insensitively() {
        let verdict = evaluate(&set(&["zed", "Bob", "alice", "Carol"]), &set(&[]));
        assert_eq!(verdict.missing(), ids(&["alice", "Bob", "Carol", "zed"]).as_slice());
    }

    #[test]
    fn comparison_is_case_sensitive() {
        let verdict = evaluate(&set(&["Alice"]), &set(&["alice"]));
        assert_eq!(verdict.missing(), ids(&["Alice"]).as_slice());
    }

    #[test]
    fn case_ties_are_deterministic() {
        let mut names = ids(&["bob", "Bob", "BOB"]);
        sort_case_insensitive(&mut names);
        assert_eq!(names, ids(&["BOB", "Bob", "bob"]));
    }

    #[test]
    fn summary_lists_missing_authors() {
        let verdict = evaluate(&set(&["carol", "Dave"]), &set(&[]));
        assert_eq!(verdict.summary().as_deref(), Some("authors: carol, Dave"));
        assert_eq!(ComplianceVerdict::Compliant.summary(), None);
    }

    #[test]
    fn unlinked_commits_block_an_otherwise_compliant_set() {
        let gap = AuthorResolutionGap {
            sha: "deadbeefcafe".into(),
            author_name: Some("Ghost".into()),
        };
        let verdict = evaluate(&set(&["alice"]), &set(&["alice"])).with_unlinked(vec![gap]);
        assert!(!verdict.is_compliant());
        assert!(verdict.missing().is_empty());
        assert_eq!(verdict.summary().as_deref(), Some("unlinked commits: deadbee"));
    }

    #[test]
    fn verdict_serializes_with_tag() {
        let verdict = evaluate(&set(&["carol"]), &set(&[]));
        let json = serde_json::to_value(&verdict).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"verdict": "non_compliant", "missing": ["carol"]})
        );
    }
}
