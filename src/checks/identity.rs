//! Identity checks (CFG-001 through CFG-005).
//!
//! Required-field presence and the format of the book, site and tag
//! identifiers.

use crate::data::policy::{BOOK_ID_RE, GTM_ID_RE, MEASUREMENT_ID_RE, REQUIRED_PATHS};
use crate::document::ConfigDocument;
use crate::engine::result::Findings;
use regex::Regex;
use url::Url;

/// Run CFG-001: Required Field Presence
pub fn check_required_fields(doc: &ConfigDocument) -> Findings {
    let mut findings = Findings::new();
    for path in REQUIRED_PATHS {
        if doc.get(path).is_none() {
            findings.error(format!("Missing required field: {}", path));
        }
    }
    findings
}

/// Run CFG-002: Book Identifier Format
pub fn check_book_id(doc: &ConfigDocument) -> Findings {
    check_pattern(
        doc,
        "book_id",
        &BOOK_ID_RE,
        "book_id must be kebab-case with lowercase letters, numbers, and hyphens",
    )
}

/// Run CFG-003: Site URL
pub fn check_site_url(doc: &ConfigDocument) -> Findings {
    let mut findings = Findings::new();

    match doc.get_str("site_url") {
        Some(raw) => {
            if !is_absolute_web_url(raw) {
                findings.error("site_url must be an absolute URL");
            }
        }
        None => findings.error("site_url must be a string"),
    }

    findings
}

/// Run CFG-004: GA4 Measurement ID Format
pub fn check_measurement_id(doc: &ConfigDocument) -> Findings {
    check_pattern(
        doc,
        "ga4.measurement_id",
        &MEASUREMENT_ID_RE,
        "ga4.measurement_id must match G-XXXXXXXXXX format",
    )
}

/// Run CFG-005: GTM Container ID Format
pub fn check_container_id(doc: &ConfigDocument) -> Findings {
    check_pattern(
        doc,
        "gtm.container_id",
        &GTM_ID_RE,
        "gtm.container_id must match GTM-XXXXXXX format",
    )
}

/// String-typed field that must match `pattern`. Type and pattern mismatches
/// are distinct errors.
fn check_pattern(doc: &ConfigDocument, path: &str, pattern: &Regex, mismatch: &str) -> Findings {
    let mut findings = Findings::new();

    match doc.get_str(path) {
        Some(value) if !pattern.is_match(value) => findings.error(mismatch),
        Some(_) => {}
        None => findings.error(format!("{} must be a string", path)),
    }

    findings
}

// The parser accepts `http:host` and `http:/host` for special schemes, so the
// `//` authority marker is checked on the raw text as well.
fn is_absolute_web_url(raw: &str) -> bool {
    let Ok(url) = Url::parse(raw) else {
        return false;
    };

    let has_authority = raw
        .split_once(':')
        .and_then(|(_, rest)| rest.strip_prefix("//"))
        .map(|authority| !authority.is_empty() && !authority.starts_with(['/', '\\']))
        .unwrap_or(false);

    matches!(url.scheme(), "http" | "https")
        && has_authority
        && url.host_str().map(|h| !h.is_empty()).unwrap_or(false)
}
