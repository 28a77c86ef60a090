use std::process::ExitCode;

use cla_config::ClaConfig;
use cla_core::audit_repository;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::AuditArgs;
use crate::output::{self, VerdictReport};

/// Handle `cla-checker audit REPO`.
///
/// Lists contributors without a CLA. Nothing on GitHub is modified.
pub async fn handle(
    args: &AuditArgs,
    config: &ClaConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<ExitCode> {
    let http = bootstrap::http_client(config)?;
    let registry = bootstrap::registry(config, http.clone());
    let github = bootstrap::github(config, http)?;

    let verdict = audit_repository(&registry, &github, &args.repo).await?;
    tracing::debug!(repo = %args.repo, missing = verdict.missing().len(), "audit complete");

    let report = VerdictReport {
        repo: &args.repo,
        pull_request: None,
        verdict: &verdict,
    };
    output::output(&report, flags.format, flags.quiet)?;
    Ok(ExitCode::SUCCESS)
}
