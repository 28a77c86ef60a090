use cla_core::{ComplianceVerdict, Identity, IdentitySet, RepoRef};
use serde::Serialize;

use crate::cli::OutputFormat;

/// `signatories` listing.
#[derive(Debug, Serialize)]
pub struct SignatoryList<'a> {
    pub signatories: Vec<&'a str>,
}

impl<'a> SignatoryList<'a> {
    pub fn new(signatories: &'a IdentitySet) -> Self {
        Self {
            signatories: signatories.iter().map(Identity::as_str).collect(),
        }
    }
}

/// `signatories NAME` result.
#[derive(Debug, Serialize)]
pub struct SignatoryCheck<'a> {
    pub name: &'a str,
    pub signed: bool,
    #[serde(skip)]
    pub signatories: SignatoryList<'a>,
}

/// Verdict for a repository or a single pull request.
#[derive(Debug, Serialize)]
pub struct VerdictReport<'a> {
    pub repo: &'a RepoRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<u64>,
    #[serde(flatten)]
    pub verdict: &'a ComplianceVerdict,
}

/// Something a command prints.
pub trait Render: Serialize {
    /// Plain-text form. `None` prints nothing.
    fn text(&self, quiet: bool) -> Option<String>;
}

impl Render for SignatoryList<'_> {
    fn text(&self, _quiet: bool) -> Option<String> {
        Some(self.signatories.join("\n"))
    }
}

impl Render for SignatoryCheck<'_> {
    fn text(&self, _quiet: bool) -> Option<String> {
        if self.signed {
            Some(format!("{} is in the list of contributors", self.name))
        } else {
            Some(format!(
                "{} is not in the list of contributors ({})",
                self.name,
                self.signatories.signatories.join(", ")
            ))
        }
    }
}

impl Render for VerdictReport<'_> {
    fn text(&self, quiet: bool) -> Option<String> {
        let subject = self.pull_request.map_or_else(
            || self.repo.to_string(),
            |number| format!("{}#{number}", self.repo),
        );

        match self.verdict {
            ComplianceVerdict::Compliant if quiet => None,
            ComplianceVerdict::Compliant => Some(format!("{subject}: all authors have signed the CLA")),
            ComplianceVerdict::NonCompliant { missing, unlinked } => {
                let mut lines = Vec::new();
                if !missing.is_empty() {
                    lines.push(String::from("Missing signatories:"));
                    lines.extend(missing.iter().map(|name| format!("  {name}")));
                }
                if !unlinked.is_empty() {
                    lines.push(String::from("Commits without a linked GitHub account:"));
                    lines.extend(unlinked.iter().map(|gap| match &gap.author_name {
                        Some(author) => format!("  {} ({author})", gap.short_sha()),
                        None => format!("  {}", gap.short_sha()),
                    }));
                }
                Some(lines.join("\n"))
            }
        }
    }
}

/// Render a response to a string in the requested format.
pub fn render<T: Render>(value: &T, format: OutputFormat, quiet: bool) -> anyhow::Result<Option<String>> {
    match format {
        OutputFormat::Json => Ok(Some(serde_json::to_string_pretty(value)?)),
        OutputFormat::Text => Ok(value.text(quiet)),
    }
}

/// Print a response in the requested format.
pub fn output<T: Render>(value: &T, format: OutputFormat, quiet: bool) -> anyhow::Result<()> {
    if let Some(rendered) = render(value, format, quiet)? {
        println!("{rendered}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use cla_core::{AuthorResolutionGap, evaluate};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn set(names: &[&str]) -> IdentitySet {
        names.iter().copied().map(Identity::from).collect()
    }

    #[test]
    fn signatory_list_text_is_one_per_line() {
        let names = set(&["pelson", "bjlittle", "Alice"]);
        let rendered = render(&SignatoryList::new(&names), OutputFormat::Text, false).unwrap();
        assert_eq!(rendered.as_deref(), Some("Alice\nbjlittle\npelson"));
    }

    #[test]
    fn absent_signatory_lists_everyone() {
        let names = set(&["bjlittle", "pelson"]);
        let check = SignatoryCheck {
            name: "carol",
            signed: false,
            signatories: SignatoryList::new(&names),
        };
        assert_eq!(
            check.text(false).as_deref(),
            Some("carol is not in the list of contributors (bjlittle, pelson)")
        );
        let value: serde_json::Value =
            serde_json::from_str(&render(&check, OutputFormat::Json, false).unwrap().unwrap()).unwrap();
        assert_eq!(value, json!({"name": "carol", "signed": false}));
    }

    #[test]
    fn audit_text_lists_missing_signatories() {
        let repo = RepoRef::new("SciTools", "iris");
        let verdict = evaluate(&set(&["zoe", "alice", "Bob"]), &set(&["alice"]));
        let report = VerdictReport {
            repo: &repo,
            pull_request: None,
            verdict: &verdict,
        };
        assert_eq!(
            report.text(false).as_deref(),
            Some("Missing signatories:\n  Bob\n  zoe")
        );
    }

    #[test]
    fn compliant_report_is_silent_when_quiet() {
        let repo = RepoRef::new("SciTools", "iris");
        let report = VerdictReport {
            repo: &repo,
            pull_request: Some(7),
            verdict: &ComplianceVerdict::Compliant,
        };
        assert_eq!(report.text(true), None);
        assert_eq!(
            report.text(false).as_deref(),
            Some("SciTools/iris#7: all authors have signed the CLA")
        );
    }

    #[test]
    fn unlinked_commits_are_listed() {
        let repo = RepoRef::new("SciTools", "iris");
        let verdict = ComplianceVerdict::Compliant.with_unlinked(vec![AuthorResolutionGap {
            sha: String::from("0badc0ffee0ddf00d"),
            author_name: Some(String::from("Jane Doe")),
        }]);
        let report = VerdictReport {
            repo: &repo,
            pull_request: Some(7),
            verdict: &verdict,
        };
        assert_eq!(
            report.text(false).as_deref(),
            Some("Commits without a linked GitHub account:\n  0badc0f (Jane Doe)")
        );
    }

    #[test]
    fn verdict_report_json_flattens_verdict() {
        let repo = RepoRef::new("SciTools", "iris");
        let verdict = evaluate(&set(&["carol"]), &set(&[]));
        let report = VerdictReport {
            repo: &repo,
            pull_request: Some(3),
            verdict: &verdict,
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(
            value,
            json!({
                "repo": {"owner": "SciTools", "name": "iris"},
                "pull_request": 3,
                "verdict": "non_compliant",
                "missing": ["carol"],
            })
        );
    }
}
