//! Structural validation of a verifier definition.
//!
//! Every rule is evaluated; violations aggregate into a single report so one
//! run surfaces all defects at once instead of only the first.

use std::collections::HashSet;
use std::fmt;

use derive_more::IntoIterator;

use crate::definition::{ParamShape, VerifierDef};

/// Separator used when joining violation messages into one failure message.
pub const VIOLATION_SEPARATOR: &str = " * ";

/// Ordered collection of structural violation messages; empty means pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, IntoIterator)]
pub struct ValidationReport(Vec<String>);

impl ValidationReport {
    /// Whether the definition passed every rule.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of violations recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The violation messages, in rule-evaluation order.
    #[must_use]
    pub fn violations(&self) -> &[String] {
        &self.0
    }

    fn push(&mut self, message: String) {
        self.0.push(message);
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(VIOLATION_SEPARATOR))
    }
}

/// Check `def` against the structural rules, evaluating every rule.
///
/// The caller must not execute a definition whose report is non-empty; the
/// execution driver enforces this before any side effect occurs.
#[must_use]
pub fn validate(def: &VerifierDef) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_state_handlers(def, &mut report);
    validate_request_filters(def, &mut report);
    validate_target_slot(def, &mut report);
    validate_context_slots(def, &mut report);
    report
}

fn validate_state_handlers(def: &VerifierDef, report: &mut ValidationReport) {
    for handler in def.state_handlers() {
        if handler.patterns().is_empty() {
            report.push(format!(
                "State handler '{}' must declare at least one state pattern.",
                handler.name()
            ));
        }
        if matches!(handler.shape(), ParamShape::Positional(types) if types.is_empty()) {
            report.push(format!(
                "State handler '{}' declares positional binding but lists no parameters.",
                handler.name()
            ));
        }
    }
}

fn validate_request_filters(def: &VerifierDef, report: &mut ValidationReport) {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for (index, filter) in def.request_filters().iter().enumerate() {
        if filter.name().is_empty() {
            report.push(format!(
                "Request filter at position {index} must have a non-empty name."
            ));
            continue;
        }
        if !seen.insert(filter.name()) && reported.insert(filter.name()) {
            report.push(format!(
                "Request filter name '{}' is declared more than once.",
                filter.name()
            ));
        }
    }
}

fn validate_target_slot(def: &VerifierDef, report: &mut ValidationReport) {
    match def.target_slots() {
        1 => {}
        0 => report.push(
            "Definition must declare exactly one target slot and none was found.".to_string(),
        ),
        n => report.push(format!(
            "Definition must declare exactly one target slot but {n} were found."
        )),
    }
}

fn validate_context_slots(def: &VerifierDef, report: &mut ValidationReport) {
    if def.consumer_slots() > 1 {
        report.push(format!(
            "Only one current-consumer slot may be declared; found {}.",
            def.consumer_slots()
        ));
    }
    if def.interaction_slots() > 1 {
        report.push(format!(
            "Only one current-interaction slot may be declared; found {}.",
            def.interaction_slots()
        ));
    }
}
