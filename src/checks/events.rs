//! Event taxonomy checks (EVT-001, EVT-002).

use crate::data::policy::{BUILT_IN_CONFLICTS, REQUIRED_CUSTOM_EVENTS};
use crate::document::{is_truthy, ConfigDocument};
use crate::engine::result::{Bucket, Findings};
use serde_json::Value;
use std::collections::BTreeSet;

/// Declared custom event names.
///
/// Empty unless `events.custom_events` is a list; non-string entries are
/// ignored.
pub fn effective_custom_events(doc: &ConfigDocument) -> BTreeSet<&str> {
    doc.get_array("events.custom_events")
        .map(|events| events.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

/// Run EVT-001: Custom Event Coverage
pub fn check_custom_events(doc: &ConfigDocument) -> Findings {
    let mut findings = Findings::new();

    if doc.get_bool("events.custom_enabled").is_none() {
        findings.error("events.custom_enabled must be boolean");
    }

    // A truthy non-boolean is reported above and still gates coverage.
    if !doc.is_truthy("events.custom_enabled") {
        return findings;
    }

    if doc.get_array("events.custom_events").is_none() {
        findings.error("events.custom_events must be a list when custom_enabled=true");
        return findings;
    }

    let declared = effective_custom_events(doc);
    let mut missing: Vec<&str> = REQUIRED_CUSTOM_EVENTS
        .iter()
        .copied()
        .filter(|event| !declared.contains(event))
        .collect();
    missing.sort_unstable();

    if !missing.is_empty() {
        findings.error(format!(
            "events.custom_events missing required events: {}",
            missing.join(", ")
        ));
        for event in missing {
            findings.push(Bucket::MissingRequiredEvents, event);
        }
    }

    findings
}

/// Run EVT-002: Enhanced Measurement Duplicate Risk
///
/// A built-in event switched on alongside a custom event that tracks the same
/// interaction counts it twice.
pub fn check_duplicate_risk(doc: &ConfigDocument) -> Findings {
    let mut findings = Findings::new();

    let enhanced = match doc.get_object("events.enhanced_measurement") {
        Some(map) => Some(map),
        None => {
            findings.warning("events.enhanced_measurement not present; duplicate-risk checks are limited");
            None
        }
    };

    let declared = effective_custom_events(doc);

    for (built_in, conflicting) in BUILT_IN_CONFLICTS {
        let enabled = enhanced
            .and_then(|map| map.get(*built_in))
            .map(is_truthy)
            .unwrap_or(false);
        if !enabled {
            continue;
        }

        let overlap: Vec<&str> = conflicting
            .iter()
            .copied()
            .filter(|event| declared.contains(event))
            .collect();
        if !overlap.is_empty() {
            findings.push(
                Bucket::DuplicateEventRisks,
                format!(
                    "Enhanced Measurement '{}' may conflict with custom events: {}",
                    built_in,
                    overlap.join(", ")
                ),
            );
        }
    }

    findings
}
