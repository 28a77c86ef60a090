use std::process::ExitCode;

use cla_config::ClaConfig;
use cla_core::Identity;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::SignatoriesArgs;
use crate::commands::EXIT_NOT_SIGNED;
use crate::output::{self, SignatoryCheck, SignatoryList};

/// Handle `cla-checker signatories [NAME]`.
pub async fn handle(
    args: &SignatoriesArgs,
    config: &ClaConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<ExitCode> {
    let http = bootstrap::http_client(config)?;
    let signatories = bootstrap::registry(config, http).fetch().await?;

    let Some(name) = args.name.as_deref() else {
        output::output(&SignatoryList::new(&signatories), flags.format, flags.quiet)?;
        return Ok(ExitCode::SUCCESS);
    };

    // Exact, case-sensitive membership.
    let signed = signatories.contains(&Identity::from(name));
    let check = SignatoryCheck {
        name,
        signed,
        signatories: SignatoryList::new(&signatories),
    };
    output::output(&check, flags.format, flags.quiet)?;

    Ok(if signed {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_NOT_SIGNED)
    })
}
