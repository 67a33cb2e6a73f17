//! Output formatting tests.
//!
//! Tests for JSON, terminal, and JUnit XML output formatters and the
//! report file writer.

use crate::fixtures::Workspace;
use ga4_contract::cli::args::OutputFormat;
use ga4_contract::cli::output::{
    get_formatter, write_json_report, JsonFormatter, JunitFormatter, OutputFormatter,
    TerminalFormatter,
};
use ga4_contract::engine::result::{ContractReport, Findings};
use ga4_contract::Status;
use serde_json::Value;
use std::fs;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn create_sample_report() -> ContractReport {
    ContractReport {
        status: Status::Fail,
        findings: Findings {
            missing_required_events: strings(&["code_copy"]),
            duplicate_event_risks: strings(&[
                "Enhanced Measurement 'scroll' may conflict with custom events: scroll_50",
            ]),
            tag_load_issues: strings(&["build/index.html: GTM script appears 2 times"]),
            recommendations: strings(&[
                "Ensure consent default is set before any analytics events are emitted.",
            ]),
            errors: strings(&["events.custom_events missing required events: code_copy"]),
            ..Findings::default()
        },
    }
}

fn create_passing_report() -> ContractReport {
    ContractReport {
        status: Status::Pass,
        findings: Findings::default(),
    }
}

#[test]
fn test_json_key_order() {
    let output = JsonFormatter::new(true).format(&create_sample_report());

    let keys = [
        "\"status\"",
        "\"missing_required_events\"",
        "\"duplicate_event_risks\"",
        "\"privacy_violations\"",
        "\"tag_load_issues\"",
        "\"recommendations\"",
        "\"errors\"",
        "\"warnings\"",
    ];
    let positions: Vec<usize> = keys.iter().map(|k| output.find(k).unwrap()).collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{}", output);
}

#[test]
fn test_json_is_valid_and_compact_variant_matches() {
    let report = create_sample_report();
    let pretty: Value = serde_json::from_str(&JsonFormatter::new(true).format(&report)).unwrap();
    let compact: Value = serde_json::from_str(&JsonFormatter::new(false).format(&report)).unwrap();

    assert_eq!(pretty, compact);
    assert_eq!(pretty["status"], "fail");
    assert_eq!(pretty["missing_required_events"][0], "code_copy");
    assert!(pretty["privacy_violations"].as_array().unwrap().is_empty());
}

#[test]
fn test_terminal_formatter_no_color() {
    let output = TerminalFormatter::new(false, false).format(&create_sample_report());

    assert!(!output.contains("\x1b["));
    assert!(output.contains("MISSING REQUIRED EVENTS"));
    assert!(output.contains("[FAIL] code_copy"));
    assert!(output.contains("[WARN] Enhanced Measurement 'scroll'"));
    assert!(output.contains("[INFO] Ensure consent default"));
    assert!(output.contains("STATUS: FAIL (3 failing, 2 advisory)"));
    assert!(output.contains("Exit code: 1"));
}

#[test]
fn test_terminal_formatter_with_color() {
    let output = TerminalFormatter::new(true, false).format(&create_sample_report());
    assert!(output.contains("\x1b[31m[FAIL]\x1b[0m"));
    assert!(output.contains("\x1b[33m[WARN]\x1b[0m"));
}

#[test]
fn test_terminal_formatter_quiet_hides_advisories() {
    let output = TerminalFormatter::new(false, true).format(&create_sample_report());

    assert!(output.contains("TAG LOAD ISSUES"));
    assert!(!output.contains("RECOMMENDATIONS"));
    assert!(!output.contains("DUPLICATE EVENT RISKS"));
    assert!(output.contains("2 advisory"));
}

#[test]
fn test_terminal_formatter_passing_report() {
    let output = TerminalFormatter::new(false, false).format(&create_passing_report());
    assert!(output.contains("STATUS: PASS (0 failing, 0 advisory)"));
    assert!(output.contains("Exit code: 0"));
    assert!(!output.contains("ERRORS"));
}

#[test]
fn test_junit_formatter() {
    let output = JunitFormatter::new().format(&create_sample_report());

    assert!(output.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(output.contains("<testsuites name=\"ga4-contract\" tests=\"5\" failures=\"3\""));
    assert!(output.contains("<testsuite name=\"tag_load_issues\" tests=\"1\" failures=\"1\""));
    assert!(output.contains("<failure message=\"code_copy\" />"));
    assert!(output.contains("<system-out>Ensure consent default"));
    assert!(output.ends_with("</testsuites>"));
}

#[test]
fn test_junit_escapes_xml() {
    let mut report = create_passing_report();
    report.status = Status::Fail;
    report.findings.errors = strings(&["site_url must be <absolute> & \"quoted\""]);

    let output = JunitFormatter::new().format(&report);
    assert!(output.contains("site_url must be &lt;absolute&gt; &amp; &quot;quoted&quot;"));
}

#[test]
fn test_junit_empty_report() {
    let output = JunitFormatter::new().format(&create_passing_report());
    assert!(output.contains("tests=\"0\" failures=\"0\""));
    assert!(!output.contains("<testsuite "));
}

#[test]
fn test_get_formatter() {
    let report = create_sample_report();

    let json = get_formatter(OutputFormat::Json, true, false).format(&report);
    assert!(json.starts_with('{'));

    let text = get_formatter(OutputFormat::Text, true, false).format(&report);
    assert!(text.contains("STATUS: FAIL"));
    assert!(!text.contains("\x1b["));

    let junit = get_formatter(OutputFormat::Junit, true, false).format(&report);
    assert!(junit.starts_with("<?xml"));
}

#[test]
fn test_write_json_report_creates_parent_dirs() {
    let ws = Workspace::new();
    let path = ws.path().join("artifacts/nested/report.json");
    let report = create_sample_report();

    write_json_report(&report, &path).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.ends_with("}\n"));
    assert_eq!(written.trim_end(), report.to_json_pretty());
}

#[test]
fn test_write_json_report_failure() {
    let ws = Workspace::new();
    let blocker = ws.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();

    let err = write_json_report(&create_sample_report(), &blocker.join("report.json")).unwrap_err();
    assert!(err.to_string().starts_with("Unable to write "));
}
