use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `cla-checker` binary.
#[derive(Debug, Parser)]
#[command(
    name = "cla-checker",
    version,
    about = "Check that pull request authors have signed the Contributor License Agreement"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: text, json
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use cla_core::RepoRef;

    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["cla-checker", "--format", "json", "--verbose", "signatories"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Signatories(ref args) if args.name.is_none()));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["cla-checker", "signatories", "pelson", "-q"])
            .expect("cli should parse");

        assert!(cli.quiet);
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(matches!(cli.command, Commands::Signatories(ref args) if args.name.as_deref() == Some("pelson")));
    }

    #[test]
    fn audit_parses_repository() {
        let cli = Cli::try_parse_from(["cla-checker", "audit", "SciTools/iris"])
            .expect("cli should parse");
        let Commands::Audit(args) = cli.command else {
            panic!("expected audit");
        };
        assert_eq!(args.repo, RepoRef::new("SciTools", "iris"));
    }

    #[test]
    fn audit_rejects_malformed_repository() {
        assert!(Cli::try_parse_from(["cla-checker", "audit", "iris"]).is_err());
    }

    #[test]
    fn check_pr_parses_number() {
        let cli = Cli::try_parse_from(["cla-checker", "check-pr", "SciTools/cartopy", "2041"])
            .expect("cli should parse");
        let Commands::CheckPr(args) = cli.command else {
            panic!("expected check-pr");
        };
        assert_eq!(args.repo.to_string(), "SciTools/cartopy");
        assert_eq!(args.number, 2041);
    }

    #[test]
    fn serve_port_override() {
        let cli = Cli::try_parse_from(["cla-checker", "serve", "--port", "9000"])
            .expect("cli should parse");
        assert!(matches!(cli.command, Commands::Serve(ref args) if args.port == Some(9000)));
    }
}
