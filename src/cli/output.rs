//! Output formatting for ga4-contract.
//!
//! Provides JSON, terminal, and JUnit XML output formatters.
//!
//! # Graceful Degradation
//!
//! - Non-TTY output: Color disabled via NO_COLOR or --no-color
//! - Empty reports: Produces valid output with zero findings
//! - Special characters: Escaped for XML; JSON escaping is left to serde_json
//!
//! All formatters produce valid output for any ContractReport input.
//! No function in this module will panic.

use crate::cli::args::OutputFormat;
use crate::engine::result::{Bucket, ContractReport, Status};
use crate::ContractError;
use std::fs;
use std::path::Path;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format a contract report into a string
    fn format(&self, report: &ContractReport) -> String;
}

/// JSON formatter. Produces the contract form with fixed key order.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        JsonFormatter { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &ContractReport) -> String {
        if self.pretty {
            report.to_json_pretty()
        } else {
            serde_json::to_string(report).unwrap_or_default()
        }
    }
}

/// Terminal (human-readable) formatter
pub struct TerminalFormatter {
    color: bool,
    quiet: bool,
}

impl TerminalFormatter {
    pub fn new(color: bool, quiet: bool) -> Self {
        TerminalFormatter { color, quiet }
    }

    fn colorize(&self, text: &str, color_code: &str) -> String {
        if self.color {
            format!("\x1b[{}m{}\x1b[0m", color_code, text)
        } else {
            text.to_string()
        }
    }

    fn label(&self, bucket: Bucket) -> String {
        match bucket {
            Bucket::Warnings | Bucket::DuplicateEventRisks => self.colorize("[WARN]", "33"),
            Bucket::Recommendations => self.colorize("[INFO]", "90"),
            _ => self.colorize("[FAIL]", "31"),
        }
    }

    fn header(bucket: Bucket) -> &'static str {
        match bucket {
            Bucket::MissingRequiredEvents => "MISSING REQUIRED EVENTS",
            Bucket::DuplicateEventRisks => "DUPLICATE EVENT RISKS",
            Bucket::PrivacyViolations => "PRIVACY VIOLATIONS",
            Bucket::TagLoadIssues => "TAG LOAD ISSUES",
            Bucket::Recommendations => "RECOMMENDATIONS",
            Bucket::Errors => "ERRORS",
            Bucket::Warnings => "WARNINGS",
        }
    }
}

impl OutputFormatter for TerminalFormatter {
    fn format(&self, report: &ContractReport) -> String {
        let mut output = String::new();
        let rule = "--------------------------------------------------------------------------------\n";

        output.push_str(rule);
        output.push_str("ga4-contract report\n");
        output.push_str(rule);
        output.push('\n');

        for bucket in Bucket::ALL {
            let findings = report.bucket(bucket);
            if findings.is_empty() || (self.quiet && !bucket.is_failing()) {
                continue;
            }

            output.push_str(&format!("{}\n", Self::header(bucket)));
            let label = self.label(bucket);
            for finding in findings {
                output.push_str(&format!("  {} {}\n", label, finding));
            }
            output.push('\n');
        }

        let failing: usize = Bucket::ALL
            .iter()
            .filter(|b| b.is_failing())
            .map(|b| report.bucket(*b).len())
            .sum();
        let advisory: usize = Bucket::ALL
            .iter()
            .filter(|b| !b.is_failing())
            .map(|b| report.bucket(*b).len())
            .sum();

        let status = match report.status {
            Status::Pass => self.colorize("PASS", "32"),
            Status::Fail => self.colorize("FAIL", "31"),
        };

        output.push_str(rule);
        output.push_str(&format!(
            "STATUS: {} ({} failing, {} advisory)\n",
            status, failing, advisory
        ));
        output.push_str(&format!(
            "Exit code: {}\n",
            report.status.exit_code()
        ));
        output.push_str(rule.trim_end());

        output
    }
}

/// JUnit XML formatter. One testsuite per bucket, one testcase per finding.
pub struct JunitFormatter;

impl JunitFormatter {
    pub fn new() -> Self {
        JunitFormatter
    }

    fn escape_xml(s: &str) -> String {
        let mut result = String::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '&' => result.push_str("&amp;"),
                '<' => result.push_str("&lt;"),
                '>' => result.push_str("&gt;"),
                '"' => result.push_str("&quot;"),
                '\'' => result.push_str("&apos;"),
                c => result.push(c),
            }
        }
        result
    }
}

impl Default for JunitFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for JunitFormatter {
    fn format(&self, report: &ContractReport) -> String {
        let mut output = String::new();
        output.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");

        let total: usize = Bucket::ALL.iter().map(|b| report.bucket(*b).len()).sum();
        let failures: usize = Bucket::ALL
            .iter()
            .filter(|b| b.is_failing())
            .map(|b| report.bucket(*b).len())
            .sum();

        output.push_str(&format!(
            "<testsuites name=\"ga4-contract\" tests=\"{}\" failures=\"{}\" errors=\"0\">\n",
            total, failures
        ));

        for bucket in Bucket::ALL {
            let findings = report.bucket(bucket);
            if findings.is_empty() {
                continue;
            }

            let suite_failures = if bucket.is_failing() { findings.len() } else { 0 };
            output.push_str(&format!(
                "  <testsuite name=\"{}\" tests=\"{}\" failures=\"{}\" errors=\"0\">\n",
                bucket.key(),
                findings.len(),
                suite_failures
            ));

            for (i, finding) in findings.iter().enumerate() {
                output.push_str(&format!(
                    "    <testcase name=\"{}-{}\" classname=\"ga4-contract.{}\">\n",
                    bucket.key(),
                    i + 1,
                    bucket.key()
                ));
                if bucket.is_failing() {
                    output.push_str(&format!(
                        "      <failure message=\"{}\" />\n",
                        Self::escape_xml(finding)
                    ));
                } else {
                    output.push_str(&format!(
                        "      <system-out>{}</system-out>\n",
                        Self::escape_xml(finding)
                    ));
                }
                output.push_str("    </testcase>\n");
            }

            output.push_str("  </testsuite>\n");
        }

        output.push_str("</testsuites>");
        output
    }
}

/// Get a formatter based on the output format
pub fn get_formatter(format: OutputFormat, no_color: bool, quiet: bool) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
        OutputFormat::Text => Box::new(TerminalFormatter::new(!no_color, quiet)),
        OutputFormat::Junit => Box::new(JunitFormatter::new()),
    }
}

/// Write the JSON report to `path`, creating parent directories.
pub fn write_json_report(report: &ContractReport, path: &Path) -> Result<(), ContractError> {
    let to_write_error = |source: std::io::Error| ContractError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(to_write_error)?;
    }
    fs::write(path, format!("{}\n", report.to_json_pretty())).map_err(to_write_error)
}
