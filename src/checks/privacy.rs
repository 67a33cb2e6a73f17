//! Debug and privacy flag checks (DBG-001, PRV-001).

use crate::document::ConfigDocument;
use crate::engine::result::{Bucket, Findings};

/// Run DBG-001: Debug Flag
pub fn check_debug_flag(doc: &ConfigDocument) -> Findings {
    let mut findings = Findings::new();
    if doc.get_bool("debug.enabled").is_none() {
        findings.error("debug.enabled must be boolean");
    }
    findings
}

/// Run PRV-001: PII Collection
///
/// Only a literal `true` is a violation; absence or any other value is not.
pub fn check_pii_allowed(doc: &ConfigDocument) -> Findings {
    let mut findings = Findings::new();
    if doc.get_bool("privacy.allow_pii") == Some(true) {
        findings.push(Bucket::PrivacyViolations, "privacy.allow_pii=true is not allowed");
    }
    findings
}
