//! Command line arguments for ga4-contract.
//!
//! Every option can also be supplied through a `GA4_CONTRACT_*` environment
//! variable; flags win over the environment.

use clap::builder::FalseyValueParser;
use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Machine-readable JSON report (contract form)
    #[default]
    Json,
    /// Human-readable terminal output
    Text,
    /// JUnit XML for CI/CD integration
    Junit,
}

/// Options of the `check` command
#[derive(Debug, Clone, Default, PartialEq, Eq, ClapArgs)]
pub struct CheckArgs {
    /// Path to analytics.config.json
    #[arg(long, env = "GA4_CONTRACT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Optional built site directory to scan for duplicate tags
    #[arg(long, env = "GA4_CONTRACT_SITE_DIR")]
    pub site_dir: Option<PathBuf>,

    /// Optional path to write the JSON report
    #[arg(long, env = "GA4_CONTRACT_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Output format printed to stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Json, env = "GA4_CONTRACT_FORMAT")]
    pub format: OutputFormat,

    /// Only output failing buckets (text format)
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output. Any `NO_COLOR` value except an explicit
    /// false (`0`, `false`, `no`, `off`, empty) disables color.
    #[arg(
        long,
        env = "NO_COLOR",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    pub no_color: bool,
}

/// Command to execute
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Validate the analytics configuration (default)
    Check(CheckArgs),
    /// List all validation rules
    List,
    /// Print version information
    Version,
}

/// Parsed command line arguments
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    name = "ga4-contract",
    about = "Validate an analytics configuration and scan a built site for duplicate tags",
    args_conflicts_with_subcommands = true
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// `check` options accepted without the subcommand
    #[command(flatten)]
    pub check: CheckArgs,

    /// Log engine decisions to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Args {
    /// The command to run; bare flags mean `check`
    pub fn command(&self) -> Command {
        match &self.command {
            Some(command) => command.clone(),
            None => Command::Check(self.check.clone()),
        }
    }

    /// Parse from an explicit argument list (for testing)
    pub fn parse_from_slice(args: &[&str]) -> Result<Self, clap::Error> {
        Self::try_parse_from(std::iter::once("ga4-contract").chain(args.iter().copied()))
    }
}
