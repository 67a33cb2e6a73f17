//! CLI integration tests.
//!
//! Tests for argument parsing and command handling.

use ga4_contract::checks::{get_all_rules, get_rules_by_category};
use ga4_contract::cli::args::{Args, CheckArgs, Command, OutputFormat};
use ga4_contract::RuleCategory;
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::Mutex;

/// Environment fallbacks read by the argument parser.
const FALLBACK_VARS: [&str; 5] = [
    "GA4_CONTRACT_CONFIG",
    "GA4_CONTRACT_SITE_DIR",
    "GA4_CONTRACT_OUTPUT",
    "GA4_CONTRACT_FORMAT",
    "NO_COLOR",
];

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Run `f` with exactly `vars` set among the fallback variables, then
/// restore the previous environment. Assertions belong outside `f`.
fn with_env<T>(vars: &[(&str, &str)], f: impl FnOnce() -> T) -> T {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let saved: Vec<(&str, Option<OsString>)> =
        FALLBACK_VARS.iter().map(|key| (*key, env::var_os(key))).collect();

    for key in FALLBACK_VARS {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    let result = f();

    for (key, value) in saved {
        match value {
            Some(value) => env::set_var(key, value),
            None => env::remove_var(key),
        }
    }
    result
}

fn parse(args: &[&str]) -> Result<Args, clap::Error> {
    with_env(&[], || Args::parse_from_slice(args))
}

fn into_check(args: Args) -> CheckArgs {
    match args.command() {
        Command::Check(check) => check,
        other => panic!("expected check, got {:?}", other),
    }
}

fn check_of(args: &[&str]) -> CheckArgs {
    into_check(parse(args).unwrap())
}

#[test]
fn test_default_args() {
    let args = parse(&[]).unwrap();
    assert!(args.command.is_none());
    assert!(!args.verbose);

    let check = check_of(&[]);
    assert_eq!(check.config, None);
    assert_eq!(check.site_dir, None);
    assert_eq!(check.output, None);
    assert_eq!(check.format, OutputFormat::Json);
    assert!(!check.quiet);
    assert!(!check.no_color);
}

#[test]
fn test_env_fallbacks() {
    let parsed = with_env(
        &[
            ("GA4_CONTRACT_CONFIG", "analytics/analytics.config.json"),
            ("GA4_CONTRACT_FORMAT", "text"),
        ],
        || Args::parse_from_slice(&["check"]),
    );
    let check = into_check(parsed.unwrap());

    assert_eq!(
        check.config,
        Some(PathBuf::from("analytics/analytics.config.json"))
    );
    assert_eq!(check.format, OutputFormat::Text);
}

#[test]
fn test_flags_override_env() {
    let parsed = with_env(&[("GA4_CONTRACT_FORMAT", "text")], || {
        Args::parse_from_slice(&["--format", "junit"])
    });
    assert_eq!(into_check(parsed.unwrap()).format, OutputFormat::Junit);
}

#[test]
fn test_no_color_env_values() {
    for (value, expected) in [("1", true), ("yes", true), ("true", true), ("0", false), ("false", false)] {
        let parsed = with_env(&[("NO_COLOR", value)], || {
            Args::parse_from_slice(&["--config", "a.json"])
        });
        let check = into_check(parsed.unwrap_or_else(|e| panic!("NO_COLOR={}: {}", value, e)));
        assert_eq!(check.no_color, expected, "NO_COLOR={}", value);
    }
}

#[test]
fn test_version_command() {
    let args = parse(&["version"]).unwrap();
    assert_eq!(args.command(), Command::Version);
}

#[test]
fn test_list_command() {
    let args = parse(&["list"]).unwrap();
    assert_eq!(args.command(), Command::List);
}

#[test]
fn test_top_level_flags_match_check_subcommand() {
    let flags = [
        "--config",
        "analytics/analytics.config.json",
        "--site-dir",
        "build",
        "--output",
        "artifacts/analytics-contract-report.json",
    ];
    let top_level = check_of(&flags);

    let mut with_subcommand = vec!["check"];
    with_subcommand.extend_from_slice(&flags);
    assert_eq!(check_of(&with_subcommand), top_level);

    assert_eq!(
        top_level.config,
        Some(PathBuf::from("analytics/analytics.config.json"))
    );
    assert_eq!(top_level.site_dir, Some(PathBuf::from("build")));
    assert_eq!(
        top_level.output,
        Some(PathBuf::from("artifacts/analytics-contract-report.json"))
    );
}

#[test]
fn test_format_values() {
    assert_eq!(check_of(&["--format", "json"]).format, OutputFormat::Json);
    assert_eq!(check_of(&["--format", "text"]).format, OutputFormat::Text);
    assert_eq!(check_of(&["--format", "junit"]).format, OutputFormat::Junit);
}

#[test]
fn test_quiet_and_no_color() {
    let check = check_of(&["check", "-q", "--no-color"]);
    assert!(check.quiet);
    assert!(check.no_color);
}

#[test]
fn test_verbose_flag() {
    assert!(parse(&["-v"]).unwrap().verbose);
    assert!(parse(&["list", "--verbose"]).unwrap().verbose);
}

#[test]
fn test_invalid_arguments() {
    assert!(parse(&["--invalid-flag"]).is_err());
    assert!(parse(&["--format", "xml"]).is_err());
    assert!(parse(&["--config"]).is_err());
}

#[test]
fn test_rule_listing_covers_every_category() {
    let rules = get_all_rules();
    assert_eq!(rules.len(), 12);

    let total: usize = [
        RuleCategory::Identity,
        RuleCategory::Consent,
        RuleCategory::Events,
        RuleCategory::Privacy,
    ]
    .into_iter()
    .map(|category| get_rules_by_category(category).len())
    .sum();
    assert_eq!(total, rules.len());
}

#[test]
fn test_rule_ids_are_unique() {
    let mut ids: Vec<String> = get_all_rules().into_iter().map(|r| r.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 12);
}
