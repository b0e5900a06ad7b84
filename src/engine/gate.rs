//! engine::gate
//!
//! Validation gating for generation.
//!
//! # Architecture
//!
//! Gating decides whether resolution may proceed after validation. A report
//! with no error-severity messages produces [`GateResult::Ready`]. Otherwise
//! it produces a [`BlockedBundle`] carrying every error, never just the first.
//!
//! # Invariants
//!
//! - Gating never produces `Ready` when an error-severity message exists
//! - Warnings never block
//! - Gating is deterministic given the same report
//!
//! # Example
//!
//! ```
//! use metadv::engine::gate::{gate, GateResult};
//! use metadv::engine::health::{ValidationMessage, ValidationReport};
//!
//! let mut report = ValidationReport::new();
//! report.add(ValidationMessage::error("duplicate_target", "customer", "duplicate"));
//!
//! match gate(report) {
//!     GateResult::Ready(_) => unreachable!(),
//!     GateResult::Blocked(bundle) => assert_eq!(bundle.errors.len(), 1),
//! }
//! ```

use super::health::{ValidationMessage, ValidationReport};

/// Result of the gating check.
#[derive(Debug)]
pub enum GateResult {
    /// No errors; generation may proceed. Warnings are kept in the report.
    Ready(ValidationReport),
    /// At least one error blocks generation.
    Blocked(BlockedBundle),
}

impl GateResult {
    /// Check if gating passed.
    pub fn is_ready(&self) -> bool {
        matches!(self, GateResult::Ready(_))
    }

    /// The report, whichever way gating went.
    pub fn report(&self) -> &ValidationReport {
        match self {
            GateResult::Ready(report) => report,
            GateResult::Blocked(bundle) => &bundle.report,
        }
    }
}

/// Errors that blocked generation.
#[derive(Debug)]
pub struct BlockedBundle {
    /// Every error-severity message, in rule order.
    pub errors: Vec<ValidationMessage>,
    /// The full report, warnings included.
    pub report: ValidationReport,
}

impl BlockedBundle {
    /// Get a summary message.
    pub fn summary(&self) -> String {
        let n = self.errors.len();
        if n == 1 {
            "1 validation error blocks generation".to_string()
        } else {
            format!("{} validation errors block generation", n)
        }
    }
}

impl std::fmt::Display for BlockedBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.summary())
    }
}

/// Gate generation on a validation report.
pub fn gate(report: ValidationReport) -> GateResult {
    if report.has_errors() {
        let errors: Vec<ValidationMessage> = report.errors().cloned().collect();
        GateResult::Blocked(BlockedBundle { errors, report })
    } else {
        GateResult::Ready(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_report_is_ready() {
        assert!(gate(ValidationReport::new()).is_ready());
    }

    #[test]
    fn warnings_are_ready() {
        let mut report = ValidationReport::new();
        report.add(ValidationMessage::warning("w", "a", "warn"));
        let result = gate(report);
        assert!(result.is_ready());
        assert_eq!(result.report().warnings().count(), 1);
    }

    #[test]
    fn errors_block_with_all_messages() {
        let mut report = ValidationReport::new();
        report.add(ValidationMessage::error("e", "a", "one"));
        report.add(ValidationMessage::warning("w", "b", "warn"));
        report.add(ValidationMessage::error("e", "c", "two"));

        match gate(report) {
            GateResult::Ready(_) => panic!("expected Blocked"),
            GateResult::Blocked(bundle) => {
                let messages: Vec<_> = bundle.errors.iter().map(|m| m.message.as_str()).collect();
                assert_eq!(messages, vec!["one", "two"]);
                assert_eq!(bundle.summary(), "2 validation errors block generation");
                assert_eq!(bundle.report.warnings().count(), 1);
            }
        }
    }
}
