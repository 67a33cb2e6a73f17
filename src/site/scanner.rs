//! Duplicate tag-loader scan.
//!
//! Counts the GTM and direct gtag.js loader URLs in every page. A loader
//! included twice fires every event twice; GTM and gtag together on one page
//! risk dual counting unless the gtag snippet is a guarded fallback.

use crate::data::policy::{GTAG_LOADER_MARKER, GTM_LOADER_MARKER};
use crate::engine::result::{Bucket, Findings};
use crate::site::provider::{DocumentProvider, SiteDocument};
use tracing::debug;

/// Loader marker counts for one page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoaderCounts {
    pub gtm: usize,
    pub gtag: usize,
}

impl LoaderCounts {
    /// Count non-overlapping marker occurrences in `text`
    pub fn of(text: &str) -> Self {
        LoaderCounts {
            gtm: text.matches(GTM_LOADER_MARKER).count(),
            gtag: text.matches(GTAG_LOADER_MARKER).count(),
        }
    }
}

/// Scan one page.
pub fn scan_document(document: &SiteDocument) -> Findings {
    let mut findings = Findings::new();
    let counts = LoaderCounts::of(&document.text);
    let path = document.path.display().to_string();

    debug!(path = %path, gtm = counts.gtm, gtag = counts.gtag, "scanned site document");

    if counts.gtm > 1 {
        findings.push(
            Bucket::TagLoadIssues,
            format!("{}: GTM script appears {} times", path, counts.gtm),
        );
    }
    if counts.gtag > 1 {
        findings.push(
            Bucket::TagLoadIssues,
            format!("{}: gtag script appears {} times", path, counts.gtag),
        );
    }
    if counts.gtm > 0 && counts.gtag > 0 {
        findings.recommend(format!(
            "{}: both GTM and direct gtag found; ensure fallback mode to avoid dual counting",
            path
        ));
    }

    findings
}

/// Scan every page the provider yields, in path order.
///
/// A site with no pages is itself a tag-load issue.
pub fn scan_site(provider: &dyn DocumentProvider) -> Findings {
    let documents = provider.documents();
    let mut findings = Findings::new();

    if documents.is_empty() {
        findings.push(
            Bucket::TagLoadIssues,
            format!("No HTML files found in {}", provider.root().display()),
        );
        return findings;
    }

    debug!(root = %provider.root().display(), documents = documents.len(), "scanning site");
    for document in &documents {
        findings.merge(scan_document(document));
    }
    findings
}
