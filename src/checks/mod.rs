//! Validation rule modules.
//!
//! Rules are organized by the part of the configuration they inspect:
//! - Identity: required fields, book/site/tag identifiers
//! - Consent: consent mode and region policy
//! - Events: custom event coverage and Enhanced Measurement overlap
//! - Privacy: debug and PII flags
//!
//! # Rule Contract
//!
//! Every rule is a pure function of the configuration document that returns
//! its own [`Findings`](crate::engine::result::Findings). Rules never panic,
//! never fail, and never depend on another rule having run. A violation is a
//! finding, not an error.

pub mod consent;
pub mod events;
pub mod identity;
pub mod privacy;

use crate::{Rule, RuleCategory};

/// Get all rules, in evaluation order
pub fn get_all_rules() -> Vec<Rule> {
    crate::engine::orchestrator::create_all_rules()
        .iter()
        .map(|r| r.describe())
        .collect()
}

/// Get rules for a specific category
pub fn get_rules_by_category(category: RuleCategory) -> Vec<Rule> {
    get_all_rules()
        .into_iter()
        .filter(|r| r.category == category)
        .collect()
}
