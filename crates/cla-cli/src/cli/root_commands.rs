use clap::{Args, Subcommand};

use cla_core::RepoRef;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Print the CLA signatories, or check a single name.
    Signatories(SignatoriesArgs),
    /// Check every contributor of a repository. Read-only.
    Audit(AuditArgs),
    /// Check one pull request and update its status and label.
    CheckPr(CheckPrArgs),
    /// Run the webhook server.
    Serve(ServeArgs),
}

#[derive(Clone, Debug, Args)]
pub struct SignatoriesArgs {
    /// Check that NAME has signed instead of listing everyone.
    pub name: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct AuditArgs {
    /// Repository as owner/name, e.g. SciTools/iris.
    pub repo: RepoRef,
}

#[derive(Clone, Debug, Args)]
pub struct CheckPrArgs {
    /// Repository as owner/name.
    pub repo: RepoRef,
    /// Pull request number.
    pub number: u64,
}

#[derive(Clone, Debug, Args)]
pub struct ServeArgs {
    /// Listen port (overrides webhook.port).
    #[arg(long)]
    pub port: Option<u16>,
}
