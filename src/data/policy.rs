//! Analytics policy tables
//!
//! Process-wide, immutable. Patterns are compiled once on first use.

use once_cell::sync::Lazy;
use regex::Regex;

/// Dotted paths that must be present in every configuration.
pub const REQUIRED_PATHS: &[&str] = &[
    "book_id",
    "book_name",
    "site_url",
    "ga4.measurement_id",
    "gtm.container_id",
    "consent.mode",
    "region_policy.restricted_regions",
    "region_policy.default_region",
    "events.custom_enabled",
    "debug.enabled",
];

/// Kebab-case book identifier, 3 to 64 characters.
pub static BOOK_ID_RE: Lazy<Regex> = Lazy::new(|| compile(r"^[a-z0-9][a-z0-9-]{1,62}[a-z0-9]$"));

/// GA4 measurement id, e.g. `G-AB12CD34`.
pub static MEASUREMENT_ID_RE: Lazy<Regex> = Lazy::new(|| compile(r"^G-[A-Z0-9]{8,12}$"));

/// GTM container id, e.g. `GTM-ABC1234`.
pub static GTM_ID_RE: Lazy<Regex> = Lazy::new(|| compile(r"^GTM-[A-Z0-9]{6,12}$"));

/// Consent mode that grants analytics storage unconditionally.
pub const CONSENT_ALWAYS_ON: &str = "always_on";

/// Accepted `consent.mode` values.
pub const ALLOWED_CONSENT_MODES: &[&str] = &["balanced_by_region", "strict_by_default", CONSENT_ALWAYS_ON];

/// Custom events every book must declare when custom tracking is enabled.
pub const REQUIRED_CUSTOM_EVENTS: &[&str] = &["chapter_view", "chapter_complete", "code_copy", "toc_interaction"];

/// Enhanced Measurement built-in events and the custom events they would
/// double-count. Evaluated in this order.
pub const BUILT_IN_CONFLICTS: &[(&str, &[&str])] = &[
    ("scroll", &["scroll_50", "scroll_90"]),
    ("file_download", &["pdf_download"]),
    ("outbound_click", &["outbound_click"]),
];

/// Substring identifying the GTM container loader.
pub const GTM_LOADER_MARKER: &str = "googletagmanager.com/gtm.js?id=";

/// Substring identifying the direct gtag.js loader.
pub const GTAG_LOADER_MARKER: &str = "googletagmanager.com/gtag/js?id=";

/// File extension of scanned site documents.
pub const SITE_DOCUMENT_EXTENSION: &str = "html";

// Patterns above are literals; failure is a programming error.
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("policy pattern must compile")
}
