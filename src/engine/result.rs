//! Finding buckets and report assembly.
//!
//! Rules and the site scan fill [`Findings`]; the [`ReportAssembler`] merges
//! them in order and computes the verdict. Assembly never validates anything
//! itself.

use serde::Serialize;
use std::fmt;

/// Named category a finding belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    MissingRequiredEvents,
    DuplicateEventRisks,
    PrivacyViolations,
    TagLoadIssues,
    Recommendations,
    Errors,
    Warnings,
}

impl Bucket {
    /// All buckets, in report key order.
    pub const ALL: [Bucket; 7] = [
        Bucket::MissingRequiredEvents,
        Bucket::DuplicateEventRisks,
        Bucket::PrivacyViolations,
        Bucket::TagLoadIssues,
        Bucket::Recommendations,
        Bucket::Errors,
        Bucket::Warnings,
    ];

    /// Report key of this bucket.
    pub fn key(self) -> &'static str {
        match self {
            Bucket::MissingRequiredEvents => "missing_required_events",
            Bucket::DuplicateEventRisks => "duplicate_event_risks",
            Bucket::PrivacyViolations => "privacy_violations",
            Bucket::TagLoadIssues => "tag_load_issues",
            Bucket::Recommendations => "recommendations",
            Bucket::Errors => "errors",
            Bucket::Warnings => "warnings",
        }
    }

    /// Whether a non-empty bucket fails the run.
    pub fn is_failing(self) -> bool {
        matches!(
            self,
            Bucket::Errors
                | Bucket::MissingRequiredEvents
                | Bucket::PrivacyViolations
                | Bucket::TagLoadIssues
        )
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Ordered findings per bucket, produced by one rule or by the site scan.
///
/// Field order is the serialized key order of the report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Findings {
    pub missing_required_events: Vec<String>,
    pub duplicate_event_risks: Vec<String>,
    pub privacy_violations: Vec<String>,
    pub tag_load_issues: Vec<String>,
    pub recommendations: Vec<String>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl Findings {
    /// Create an empty set of findings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bucket(&self, bucket: Bucket) -> &Vec<String> {
        match bucket {
            Bucket::MissingRequiredEvents => &self.missing_required_events,
            Bucket::DuplicateEventRisks => &self.duplicate_event_risks,
            Bucket::PrivacyViolations => &self.privacy_violations,
            Bucket::TagLoadIssues => &self.tag_load_issues,
            Bucket::Recommendations => &self.recommendations,
            Bucket::Errors => &self.errors,
            Bucket::Warnings => &self.warnings,
        }
    }

    fn bucket_mut(&mut self, bucket: Bucket) -> &mut Vec<String> {
        match bucket {
            Bucket::MissingRequiredEvents => &mut self.missing_required_events,
            Bucket::DuplicateEventRisks => &mut self.duplicate_event_risks,
            Bucket::PrivacyViolations => &mut self.privacy_violations,
            Bucket::TagLoadIssues => &mut self.tag_load_issues,
            Bucket::Recommendations => &mut self.recommendations,
            Bucket::Errors => &mut self.errors,
            Bucket::Warnings => &mut self.warnings,
        }
    }

    /// Append one finding to a bucket
    pub fn push(&mut self, bucket: Bucket, finding: impl Into<String>) {
        self.bucket_mut(bucket).push(finding.into());
    }

    /// Shorthand for `push(Bucket::Errors, ..)`
    pub fn error(&mut self, finding: impl Into<String>) {
        self.push(Bucket::Errors, finding);
    }

    /// Shorthand for `push(Bucket::Warnings, ..)`
    pub fn warning(&mut self, finding: impl Into<String>) {
        self.push(Bucket::Warnings, finding);
    }

    /// Shorthand for `push(Bucket::Recommendations, ..)`
    pub fn recommend(&mut self, finding: impl Into<String>) {
        self.push(Bucket::Recommendations, finding);
    }

    /// Append every bucket of `other` after the current contents.
    pub fn merge(&mut self, other: Findings) {
        let Findings {
            missing_required_events,
            duplicate_event_risks,
            privacy_violations,
            tag_load_issues,
            recommendations,
            errors,
            warnings,
        } = other;

        self.missing_required_events.extend(missing_required_events);
        self.duplicate_event_risks.extend(duplicate_event_risks);
        self.privacy_violations.extend(privacy_violations);
        self.tag_load_issues.extend(tag_load_issues);
        self.recommendations.extend(recommendations);
        self.errors.extend(errors);
        self.warnings.extend(warnings);
    }

    /// Total number of findings across all buckets
    pub fn len(&self) -> usize {
        Bucket::ALL.iter().map(|b| self.bucket(*b).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether any failing bucket is non-empty
    pub fn has_failures(&self) -> bool {
        Bucket::ALL
            .iter()
            .any(|b| b.is_failing() && !self.bucket(*b).is_empty())
    }
}

/// Overall verdict of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pass,
    Fail,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pass => "pass",
            Status::Fail => "fail",
        }
    }

    /// Process exit code for this verdict
    pub fn exit_code(self) -> u8 {
        match self {
            Status::Pass => 0,
            Status::Fail => 1,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The compliance report. `status` comes first, then the buckets in
/// [`Findings`] field order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractReport {
    pub status: Status,
    #[serde(flatten)]
    pub findings: Findings,
}

impl ContractReport {
    pub fn bucket(&self, bucket: Bucket) -> &Vec<String> {
        self.findings.bucket(bucket)
    }

    /// Pretty JSON in the fixed contract key order
    pub fn to_json_pretty(&self) -> String {
        // Only strings and a unit enum: serialization cannot fail.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Minimal report emitted when the configuration cannot be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureReport {
    pub status: Status,
    pub errors: Vec<String>,
}

impl FailureReport {
    pub fn new(error: impl fmt::Display) -> Self {
        FailureReport {
            status: Status::Fail,
            errors: vec![error.to_string()],
        }
    }

    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Collects findings in evaluation order and assembles the final report.
#[derive(Debug, Default)]
pub struct ReportAssembler {
    findings: Findings,
}

impl ReportAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule's or the scan's findings
    pub fn add(&mut self, findings: Findings) {
        self.findings.merge(findings);
    }

    /// Findings collected so far
    pub fn findings(&self) -> &Findings {
        &self.findings
    }

    pub fn into_findings(self) -> Findings {
        self.findings
    }

    /// Compute the verdict and freeze the report.
    pub fn assemble(self) -> ContractReport {
        let status = if self.findings.has_failures() {
            Status::Fail
        } else {
            Status::Pass
        };

        ContractReport {
            status,
            findings: self.findings,
        }
    }
}
