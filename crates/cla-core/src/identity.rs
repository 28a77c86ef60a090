//! Identities, repositories and commit authorship.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::InvalidRepoRef;

/// A person's handle: a GitHub login or a registry `profile_name`.
///
/// The two namespaces are assumed to coincide. Comparison is case-sensitive;
/// only human-readable output is sorted case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identity {
    fn from(handle: &str) -> Self {
        Self::new(handle)
    }
}

impl From<String> for Identity {
    fn from(handle: String) -> Self {
        Self(handle)
    }
}

/// A set of identities; ordered so listings are deterministic.
pub type IdentitySet = BTreeSet<Identity>;

/// A GitHub repository in `owner/name` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepoRef {
    type Err = InvalidRepoRef;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidRepoRef(raw.to_string());
        let (owner, name) = raw.trim().split_once('/').ok_or_else(invalid)?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(invalid());
        }
        Ok(Self::new(owner, name))
    }
}

/// A commit whose author could not be resolved to a GitHub account.
///
/// GitHub reports `"author": null` when the commit email is not linked to any
/// account, so there is no login to check against the registry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AuthorResolutionGap {
    /// Full commit SHA.
    pub sha: String,
    /// Git author name recorded in the commit, if any.
    pub author_name: Option<String>,
}

impl AuthorResolutionGap {
    /// Seven-character SHA prefix used in status descriptions.
    #[must_use]
    pub fn short_sha(&self) -> &str {
        self.sha.get(..7).unwrap_or(&self.sha)
    }
}

/// Commit authors of one pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequestAuthors {
    /// Logins of every commit author linked to an account.
    pub logins: IdentitySet,
    /// Commits with no linked author.
    pub unresolved: Vec<AuthorResolutionGap>,
}

impl PullRequestAuthors {
    pub fn from_logins<I, T>(logins: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Identity>,
    {
        Self {
            logins: logins.into_iter().map(Into::into).collect(),
            unresolved: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_ref_parses_owner_and_name() {
        let repo: RepoRef = "SciTools/iris".parse().unwrap();
        assert_eq!(repo.owner, "SciTools");
        assert_eq!(repo.name, "iris");
        assert_eq!(repo.to_string(), "SciTools/iris");
    }

    #[test]
    fn repo_ref_rejects_malformed_input() {
        for raw in ["iris", "/iris", "SciTools/", "a/b/c", ""] {
            assert!(raw.parse::<RepoRef>().is_err(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn identities_compare_case_sensitively() {
        assert_ne!(Identity::from("Alice"), Identity::from("alice"));
    }

    #[test]
    fn short_sha_handles_short_input() {
        let gap = AuthorResolutionGap {
            sha: "abc".into(),
            author_name: None,
        };
        assert_eq!(gap.short_sha(), "abc");

        let gap = AuthorResolutionGap {
            sha: "0123456789abcdef".into(),
            author_name: Some("Someone".into()),
        };
        assert_eq!(gap.short_sha(), "0123456");
    }
}
