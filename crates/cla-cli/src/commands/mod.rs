use std::process::ExitCode;

use cla_config::ClaConfig;

use crate::cli::{Commands, GlobalFlags};

pub mod audit;
pub mod check_pr;
pub mod serve;
pub mod signatories;

/// Exit code for `signatories NAME` when NAME has not signed.
pub const EXIT_NOT_SIGNED: u8 = 2;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    config: &ClaConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<ExitCode> {
    match command {
        Commands::Signatories(args) => signatories::handle(&args, config, flags).await,
        Commands::Audit(args) => audit::handle(&args, config, flags).await,
        Commands::CheckPr(args) => check_pr::handle(&args, config, flags).await,
        Commands::Serve(args) => serve::handle(&args, config).await,
    }
}
