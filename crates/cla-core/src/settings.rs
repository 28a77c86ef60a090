//! What the reconciler writes onto a pull request.

use serde::{Deserialize, Serialize};

pub const DEFAULT_STATUS_CONTEXT: &str = "SciTools-CLA-checker";
pub const DEFAULT_TARGET_URL: &str = "http://scitools.org.uk/governance.html#contributors";
pub const DEFAULT_BLOCKING_LABEL: &str = "Blocked: CLA needed";
pub const DEFAULT_SUCCESS_DESCRIPTION: &str = "SciTools CLA exists";
pub const DEFAULT_FAILURE_DESCRIPTION: &str = "CLA doesn't exist for all commits";

/// Where the signatory registry document lives.
pub const DEFAULT_REGISTRY_URL: &str =
    "https://raw.githubusercontent.com/SciTools/scitools.org.uk/gh-pages/contributors.json";
pub const DEFAULT_API_URL: &str = "https://api.github.com";
/// GitHub answers 403 to requests without a User-Agent.
pub const DEFAULT_USER_AGENT: &str = "scitools-cla-checker";

fn default_context() -> String {
    String::from(DEFAULT_STATUS_CONTEXT)
}

fn default_target_url() -> String {
    String::from(DEFAULT_TARGET_URL)
}

fn default_label() -> String {
    String::from(DEFAULT_BLOCKING_LABEL)
}

fn default_success_description() -> String {
    String::from(DEFAULT_SUCCESS_DESCRIPTION)
}

fn default_failure_description() -> String {
    String::from(DEFAULT_FAILURE_DESCRIPTION)
}

/// How commits without a linked GitHub account are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnlinkedCommitPolicy {
    /// The commit makes the pull request non-compliant.
    #[default]
    Block,
    /// The commit is left out of the author set.
    Ignore,
}

/// Fixed values of the commit status and blocking label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSettings {
    /// Commit status context key; identifies the slice of PR state we own.
    #[serde(default = "default_context")]
    pub context: String,

    /// Governance documentation linked from failure statuses.
    #[serde(default = "default_target_url")]
    pub target_url: String,

    /// Label added while the PR is blocked.
    #[serde(default = "default_label")]
    pub label: String,

    #[serde(default = "default_success_description")]
    pub success_description: String,

    /// Prefix of the failure description; the missing authors are appended.
    #[serde(default = "default_failure_description")]
    pub failure_description: String,

    #[serde(default)]
    pub unlinked_commits: UnlinkedCommitPolicy,
}

impl Default for StatusSettings {
    fn default() -> Self {
        Self {
            context: default_context(),
            target_url: default_target_url(),
            label: default_label(),
            success_description: default_success_description(),
            failure_description: default_failure_description(),
            unlinked_commits: UnlinkedCommitPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let settings = StatusSettings::default();
        assert_eq!(settings.context, "SciTools-CLA-checker");
        assert_eq!(settings.label, "Blocked: CLA needed");
        assert_eq!(settings.unlinked_commits, UnlinkedCommitPolicy::Block);
    }

    #[test]
    fn partial_section_fills_defaults() {
        let settings: StatusSettings =
            serde_json::from_str(r#"{"label": "cla-missing", "unlinked_commits": "ignore"}"#)
                .unwrap();
        assert_eq!(settings.label, "cla-missing");
        assert_eq!(settings.unlinked_commits, UnlinkedCommitPolicy::Ignore);
        assert_eq!(settings.context, DEFAULT_STATUS_CONTEXT);
    }
}
