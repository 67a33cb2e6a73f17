//! ga4-contract CLI entry point
//!
//! Validates an analytics configuration and optionally audits a built site.

use clap::Parser;
use ga4_contract::checks::get_all_rules;
use ga4_contract::cli::args::{Args, CheckArgs, Command};
use ga4_contract::cli::output::{get_formatter, write_json_report};
use ga4_contract::version::get_build_info;
use ga4_contract::{run_contract, ContractConfig, RuleCategory};

use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match args.command() {
        Command::Version => {
            println!("{}", get_build_info());
            ExitCode::SUCCESS
        }
        Command::List => {
            print_rule_list();
            ExitCode::SUCCESS
        }
        Command::Check(check) => run_check(&check),
    }
}

/// Logs go to stderr so stdout stays a clean report. `RUST_LOG` wins.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_rule_list() {
    let rules = get_all_rules();
    println!("Available rules:");

    for category in [
        RuleCategory::Identity,
        RuleCategory::Consent,
        RuleCategory::Events,
        RuleCategory::Privacy,
    ] {
        println!();
        println!("{} RULES:", category.to_string().to_uppercase());
        for rule in rules.iter().filter(|r| r.category == category) {
            println!("  {:<8} {:<24} {}", rule.id, rule.name, rule.description);
        }
    }
}

fn run_check(check: &CheckArgs) -> ExitCode {
    let Some(config_path) = check.config.as_ref() else {
        eprintln!("Error: --config is required");
        eprintln!("Run 'ga4-contract --help' for usage information.");
        return ExitCode::from(2);
    };

    let mut config = ContractConfig::new(config_path);
    if let Some(site_dir) = check.site_dir.as_ref() {
        config = config.with_site_dir(site_dir);
    }

    let report = match run_contract(&config) {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, "configuration could not be loaded");
            eprintln!("{}", e.to_failure_report().to_json_pretty());
            return ExitCode::from(1);
        }
    };

    if let Some(output) = check.output.as_ref() {
        if let Err(e) = write_json_report(&report, output) {
            eprintln!("Error: {}", e);
            return ExitCode::from(3);
        }
    }

    let formatter = get_formatter(check.format, check.no_color, check.quiet);
    println!("{}", formatter.format(&report));

    ExitCode::from(report.status.exit_code())
}
