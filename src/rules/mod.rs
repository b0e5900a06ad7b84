//! rules
//!
//! Validation rules and the registry that runs them.
//!
//! # Architecture
//!
//! A rule is a pure function of the read-only [`GraphContext`] producing zero
//! or more [`ValidationMessage`]s. Rules are registered explicitly; there is no
//! discovery. [`RuleRegistry::builtin`] returns the default set, and callers
//! add their own rules with [`RuleRegistry::register`] without touching the
//! engine.
//!
//! The registry runs every rule in registration order and never stops early:
//! all messages from all rules end up in the report.
//!
//! # Built-in rules
//!
//! | Code                       | Severity | Checks                                      |
//! |----------------------------|----------|---------------------------------------------|
//! | `column_no_connection`     | warning  | column has an empty connection list         |
//! | `entity_no_source`         | warning  | entity target no key column resolves to     |
//! | `duplicate_target`         | error    | two targets share a name                    |
//! | `key_name_collision`       | error    | two keys derive the same key column         |
//! | `unknown_target`           | warning  | connection names an undeclared target       |
//! | `relation_role_unresolved` | warning  | relation key resolves to no role slot       |
//!
//! # Example
//!
//! ```
//! use metadv::core::graph::GraphContext;
//! use metadv::core::types::Model;
//! use metadv::engine::health::ValidationMessage;
//! use metadv::rules::{Rule, RuleRegistry};
//!
//! struct NoSources;
//!
//! impl Rule for NoSources {
//!     fn code(&self) -> &'static str {
//!         "no_sources"
//!     }
//!
//!     fn check(&self, ctx: &GraphContext<'_>) -> Vec<ValidationMessage> {
//!         if ctx.model().sources.is_empty() {
//!             vec![ValidationMessage::warning(self.code(), "", "no sources declared")]
//!         } else {
//!             Vec::new()
//!         }
//!     }
//! }
//!
//! let mut registry = RuleRegistry::builtin();
//! registry.register(NoSources);
//!
//! let model = Model::default();
//! let report = registry.run(&GraphContext::build(&model));
//! assert_eq!(report.by_code("no_sources").count(), 1);
//! ```

mod column_no_connection;
mod duplicate_target;
mod entity_no_source;
mod key_name_collision;
mod relation_roles;
mod unknown_target;

pub use column_no_connection::ColumnNoConnection;
pub use duplicate_target::DuplicateTarget;
pub use entity_no_source::EntityNoSource;
pub use key_name_collision::KeyNameCollision;
pub use relation_roles::RelationRoleUnresolved;
pub use unknown_target::UnknownTarget;

use crate::core::graph::GraphContext;
use crate::engine::health::{ValidationMessage, ValidationReport};

/// A validation rule.
pub trait Rule: Send + Sync {
    /// Stable code stamped on every message this rule produces.
    fn code(&self) -> &'static str;

    /// Check the context. Must not depend on anything but `ctx`.
    fn check(&self, ctx: &GraphContext<'_>) -> Vec<ValidationMessage>;
}

/// Ordered set of rules to run.
#[derive(Default)]
pub struct RuleRegistry {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in rules.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(DuplicateTarget);
        registry.register(KeyNameCollision);
        registry.register(ColumnNoConnection);
        registry.register(EntityNoSource);
        registry.register(UnknownTarget);
        registry.register(RelationRoleUnresolved);
        registry
    }

    /// Add a rule. Rules run in registration order.
    pub fn register<R: Rule + 'static>(&mut self, rule: R) -> &mut Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Codes of the registered rules, in order.
    pub fn codes(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.code()).collect()
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if no rules are registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule and aggregate the messages.
    pub fn run(&self, ctx: &GraphContext<'_>) -> ValidationReport {
        let mut report = ValidationReport::new();
        report.set_totals(
            ctx.target_count(),
            ctx.total_columns(),
            ctx.columns_with_connections(),
        );

        for rule in &self.rules {
            let messages = rule.check(ctx);
            log::debug!("rule {} produced {} messages", rule.code(), messages.len());
            report.extend(messages);
        }
        report
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.codes())
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Connection, Model, Target};

    struct AlwaysError;

    impl Rule for AlwaysError {
        fn code(&self) -> &'static str {
            "always_error"
        }

        fn check(&self, _ctx: &GraphContext<'_>) -> Vec<ValidationMessage> {
            vec![ValidationMessage::error(self.code(), "x", "always fails")]
        }
    }

    #[test]
    fn builtin_codes() {
        let registry = RuleRegistry::builtin();
        assert_eq!(
            registry.codes(),
            vec![
                "duplicate_target",
                "key_name_collision",
                "column_no_connection",
                "entity_no_source",
                "unknown_target",
                "relation_role_unresolved",
            ]
        );
    }

    #[test]
    fn runs_every_rule_without_short_circuit() {
        let model = test_support::model(
            vec![Target::entity("customer"), Target::entity("order")],
            vec![("notes", vec![])],
        );
        let mut registry = RuleRegistry::builtin();
        registry.register(AlwaysError);

        let report = registry.run(&GraphContext::build(&model));
        assert!(report.has_errors());
        assert_eq!(report.by_code("column_no_connection").count(), 1);
        assert_eq!(report.by_code("entity_no_source").count(), 2);
        assert_eq!(report.by_code("always_error").count(), 1);
    }

    #[test]
    fn summary_comes_from_context() {
        let model = test_support::model(
            vec![Target::entity("customer")],
            vec![
                ("customer_id", vec![Connection::entity_key("customer")]),
                ("notes", vec![]),
            ],
        );
        let summary = RuleRegistry::builtin()
            .run(&GraphContext::build(&model))
            .summary();
        assert_eq!(summary.total_targets, 1);
        assert_eq!(summary.total_columns, 2);
        assert_eq!(summary.columns_with_connections, 1);
        assert_eq!(summary.warning_count, 1);
        assert_eq!(summary.error_count, 0);
    }

    #[test]
    fn empty_registry_reports_nothing() {
        let model = Model::default();
        let registry = RuleRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.run(&GraphContext::build(&model)).is_clean());
    }
}
