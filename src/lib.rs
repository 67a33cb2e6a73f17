//! ga4-contract library
//!
//! Analytics configuration contract validation and built-site tag audit.
//!
//! This library provides:
//! - Dotted-path access into an analytics configuration document
//! - A fixed rule set covering identifiers, consent, regions, the event
//!   taxonomy, debug and privacy flags
//! - A duplicate tag-loader scan over a built site
//! - Assembly of all findings into one ordered, machine-readable report
//!
//! # Example
//!
//! ```no_run
//! use ga4_contract::{run_contract, ContractConfig};
//!
//! let config = ContractConfig::new("analytics/analytics.config.json");
//! let report = run_contract(&config).expect("config must load");
//! println!("status: {}", report.status);
//! ```

pub mod checks;
pub mod cli;
pub mod data;
pub mod document;
pub mod engine;
pub mod site;
pub mod version;

use document::ConfigDocument;
use engine::orchestrator::RuleOrchestrator;
use engine::result::{ContractReport, FailureReport, ReportAssembler};
use site::provider::{DocumentProvider, FsDocumentProvider};
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

// Re-exports for public API
pub use engine::result::{Bucket, Findings, Status};

/// Rule category for grouping related rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleCategory {
    /// Required fields and book/site/tag identifiers
    Identity,
    /// Consent mode and region policy
    Consent,
    /// Custom events and Enhanced Measurement
    Events,
    /// Debug and PII flags
    Privacy,
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleCategory::Identity => write!(f, "Identity"),
            RuleCategory::Consent => write!(f, "Consent"),
            RuleCategory::Events => write!(f, "Events"),
            RuleCategory::Privacy => write!(f, "Privacy"),
        }
    }
}

/// Metadata describing one validation rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Unique identifier (e.g., "CFG-001")
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Rule category
    pub category: RuleCategory,
    /// Description of what this rule validates
    pub description: String,
}

/// Structural failures: the configuration could not be loaded at all.
///
/// Rule violations are never errors; they are findings in the report.
#[derive(Debug, Error)]
pub enum ContractError {
    /// The configuration is not valid JSON
    #[error("Invalid JSON in {}: {detail}", path.display())]
    InvalidJson { path: PathBuf, detail: String },
    /// The configuration file could not be read
    #[error("Unable to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The report could not be written
    #[error("Unable to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ContractError {
    /// The minimal failing report for this error
    pub fn to_failure_report(&self) -> FailureReport {
        FailureReport::new(self)
    }
}

/// Inputs of one validation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractConfig {
    /// Path to the analytics configuration JSON
    pub config_path: PathBuf,
    /// Built site to scan for duplicate tag loaders (None = skip the scan)
    pub site_dir: Option<PathBuf>,
}

impl ContractConfig {
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        ContractConfig {
            config_path: config_path.into(),
            site_dir: None,
        }
    }

    pub fn with_site_dir(mut self, site_dir: impl Into<PathBuf>) -> Self {
        self.site_dir = Some(site_dir.into());
        self
    }
}

/// Validate an already loaded document.
///
/// When `site` is given its pages are scanned after the rules have run, and
/// the scan findings are appended after the rule findings.
pub fn validate(doc: &ConfigDocument, site: Option<&dyn DocumentProvider>) -> ContractReport {
    let mut assembler = ReportAssembler::new();
    RuleOrchestrator::with_default_rules().run_into(doc, &mut assembler);

    if let Some(provider) = site {
        assembler.add(site::scanner::scan_site(provider));
    }

    let report = assembler.assemble();
    info!(
        status = %report.status,
        errors = report.findings.errors.len(),
        warnings = report.findings.warnings.len(),
        "contract validated"
    );
    report
}

/// Run a full validation.
///
/// This is the main entry point: load the configuration, evaluate every
/// rule, optionally scan the built site, and assemble the report.
///
/// # Returns
///
/// The assembled report, or a `ContractError` if the configuration could not
/// be read or parsed. In that case no rule has run; use
/// [`ContractError::to_failure_report`] for the minimal report.
pub fn run_contract(config: &ContractConfig) -> Result<ContractReport, ContractError> {
    let doc = ConfigDocument::load(&config.config_path)?;
    let provider = config.site_dir.as_ref().map(FsDocumentProvider::new);

    Ok(validate(
        &doc,
        provider.as_ref().map(|p| p as &dyn DocumentProvider),
    ))
}
