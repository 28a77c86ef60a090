use std::process::ExitCode;

use cla_config::ClaConfig;
use cla_core::check_pull_request;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::CheckPrArgs;
use crate::output::{self, VerdictReport};

/// Handle `cla-checker check-pr REPO NUMBER`: evaluate the pull request and
/// write the commit status and label.
pub async fn handle(
    args: &CheckPrArgs,
    config: &ClaConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<ExitCode> {
    let http = bootstrap::http_client(config)?;
    let registry = bootstrap::registry(config, http.clone());
    let github = bootstrap::github(config, http)?;

    let verdict =
        check_pull_request(&registry, &github, &config.status, &args.repo, args.number).await?;

    let report = VerdictReport {
        repo: &args.repo,
        pull_request: Some(args.number),
        verdict: &verdict,
    };
    output::output(&report, flags.format, flags.quiet)?;
    Ok(ExitCode::SUCCESS)
}
