//! Rule execution orchestrator.
//!
//! Manages rule registration and runs every registered rule against one
//! configuration document, in registration order.
//!
//! # Graceful Degradation
//!
//! - Rule violations: Collected as findings, never abort the run
//! - Malformed fields: Reported by the owning rule, other rules unaffected
//! - Empty rule list: Returns empty findings (not an error)
//!
//! The orchestrator always evaluates every registered rule, so a single run
//! reports all unrelated problems at once. No function in this module will
//! panic.

use crate::checks::{consent, events, identity, privacy};
use crate::document::ConfigDocument;
use crate::engine::result::{Findings, ReportAssembler};
use crate::{Rule, RuleCategory};
use tracing::debug;

/// A registered rule with its evaluation function
pub struct RegisteredRule {
    pub id: String,
    pub name: String,
    pub category: RuleCategory,
    pub description: String,
    pub rule_fn: Box<dyn Fn(&ConfigDocument) -> Findings + Send + Sync>,
}

impl RegisteredRule {
    fn new(
        id: &str,
        name: &str,
        category: RuleCategory,
        description: &str,
        rule_fn: fn(&ConfigDocument) -> Findings,
    ) -> Self {
        RegisteredRule {
            id: id.to_string(),
            name: name.to_string(),
            category,
            description: description.to_string(),
            rule_fn: Box::new(rule_fn),
        }
    }

    /// Rule metadata without the evaluation function
    pub fn describe(&self) -> Rule {
        Rule {
            id: self.id.clone(),
            name: self.name.clone(),
            category: self.category,
            description: self.description.clone(),
        }
    }
}

/// Rule orchestrator
#[derive(Default)]
pub struct RuleOrchestrator {
    rules: Vec<RegisteredRule>,
}

impl RuleOrchestrator {
    /// Create an orchestrator with no rules
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an orchestrator with the full rule set registered
    pub fn with_default_rules() -> Self {
        let mut orchestrator = Self::new();
        orchestrator.register_rules(create_all_rules());
        orchestrator
    }

    /// Register rules for evaluation
    pub fn register_rules(&mut self, rules: Vec<RegisteredRule>) {
        self.rules.extend(rules);
    }

    /// Register a single rule
    pub fn register_rule(&mut self, rule: RegisteredRule) {
        self.rules.push(rule);
    }

    /// Registered rules, in evaluation order
    pub fn rules(&self) -> &[RegisteredRule] {
        &self.rules
    }

    /// Evaluate every rule and return the merged findings
    pub fn run_all(&self, doc: &ConfigDocument) -> Findings {
        let mut assembler = ReportAssembler::new();
        self.run_into(doc, &mut assembler);
        assembler.into_findings()
    }

    /// Evaluate every rule, appending each rule's findings to `assembler`
    pub fn run_into(&self, doc: &ConfigDocument, assembler: &mut ReportAssembler) {
        for rule in &self.rules {
            let findings = (rule.rule_fn)(doc);
            debug!(
                rule = %rule.id,
                findings = findings.len(),
                failing = findings.has_failures(),
                "rule evaluated"
            );
            assembler.add(findings);
        }
    }
}

/// Create all rules, in evaluation order.
///
/// CNS-002 runs after the event rules so that its warning follows the
/// Enhanced Measurement warning in the report.
pub fn create_all_rules() -> Vec<RegisteredRule> {
    vec![
        RegisteredRule::new(
            "CFG-001",
            "Required Fields",
            RuleCategory::Identity,
            "Every required configuration path is present",
            identity::check_required_fields,
        ),
        RegisteredRule::new(
            "CFG-002",
            "Book ID Format",
            RuleCategory::Identity,
            "book_id is a kebab-case string",
            identity::check_book_id,
        ),
        RegisteredRule::new(
            "CFG-003",
            "Site URL",
            RuleCategory::Identity,
            "site_url is an absolute http(s) URL",
            identity::check_site_url,
        ),
        RegisteredRule::new(
            "CFG-004",
            "GA4 Measurement ID",
            RuleCategory::Identity,
            "ga4.measurement_id matches G-XXXXXXXXXX",
            identity::check_measurement_id,
        ),
        RegisteredRule::new(
            "CFG-005",
            "GTM Container ID",
            RuleCategory::Identity,
            "gtm.container_id matches GTM-XXXXXXX",
            identity::check_container_id,
        ),
        RegisteredRule::new(
            "CNS-001",
            "Consent Mode",
            RuleCategory::Consent,
            "consent.mode is a supported consent mode",
            consent::check_consent_mode,
        ),
        RegisteredRule::new(
            "RGN-001",
            "Region Policy",
            RuleCategory::Consent,
            "Restricted regions are alpha-2 codes and a default region is set",
            consent::check_region_policy,
        ),
        RegisteredRule::new(
            "EVT-001",
            "Custom Event Coverage",
            RuleCategory::Events,
            "Custom tracking declares every required book event",
            events::check_custom_events,
        ),
        RegisteredRule::new(
            "EVT-002",
            "Duplicate Event Risk",
            RuleCategory::Events,
            "Enhanced Measurement does not double-count custom events",
            events::check_duplicate_risk,
        ),
        RegisteredRule::new(
            "CNS-002",
            "Consent Advisories",
            RuleCategory::Consent,
            "Privacy guidance for the selected consent mode",
            consent::check_consent_advisories,
        ),
        RegisteredRule::new(
            "DBG-001",
            "Debug Flag",
            RuleCategory::Privacy,
            "debug.enabled is a boolean",
            privacy::check_debug_flag,
        ),
        RegisteredRule::new(
            "PRV-001",
            "PII Collection",
            RuleCategory::Privacy,
            "privacy.allow_pii is not enabled",
            privacy::check_pii_allowed,
        ),
    ]
}
