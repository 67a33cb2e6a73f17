//! Consent and region policy checks (CNS-001, CNS-002, RGN-001).

use crate::data::policy::{ALLOWED_CONSENT_MODES, CONSENT_ALWAYS_ON};
use crate::document::ConfigDocument;
use crate::engine::result::Findings;

fn consent_mode(doc: &ConfigDocument) -> Option<&str> {
    doc.get_str("consent.mode")
        .filter(|mode| ALLOWED_CONSENT_MODES.contains(mode))
}

/// Run CNS-001: Consent Mode
pub fn check_consent_mode(doc: &ConfigDocument) -> Findings {
    let mut findings = Findings::new();
    if consent_mode(doc).is_none() {
        findings.error(format!(
            "consent.mode must be one of: {}",
            ALLOWED_CONSENT_MODES.join(", ")
        ));
    }
    findings
}

/// Run CNS-002: Consent Advisories
///
/// `always_on` is a privacy warning, never a failure. The region-aware modes
/// only get the ordering recommendation.
pub fn check_consent_advisories(doc: &ConfigDocument) -> Findings {
    let mut findings = Findings::new();
    match consent_mode(doc) {
        Some(CONSENT_ALWAYS_ON) => {
            findings.warning("consent.mode=always_on may violate regional privacy obligations");
        }
        Some(_) => {
            findings.recommend("Ensure consent default is set before any analytics events are emitted.");
        }
        None => {}
    }
    findings
}

/// Run RGN-001: Region Policy
///
/// Codes are checked for ISO-3166 alpha-2 shape only.
pub fn check_region_policy(doc: &ConfigDocument) -> Findings {
    let mut findings = Findings::new();

    match doc.get_array("region_policy.restricted_regions") {
        Some(regions) if !regions.is_empty() => {
            let all_alpha2 = regions
                .iter()
                .all(|code| code.as_str().map(|c| c.chars().count() == 2).unwrap_or(false));
            if !all_alpha2 {
                findings.error("region_policy.restricted_regions must contain ISO-3166 alpha-2 codes");
            }
        }
        _ => findings.error("region_policy.restricted_regions must be a non-empty list"),
    }

    if doc
        .get_str("region_policy.default_region")
        .map(str::is_empty)
        .unwrap_or(true)
    {
        findings.error("region_policy.default_region must be a non-empty string");
    }

    findings
}
