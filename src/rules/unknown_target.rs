//! rules::unknown_target

use super::Rule;
use crate::core::graph::{GraphContext, ResolveError};
use crate::core::types::Connection;
use crate::engine::health::ValidationMessage;

/// Warns when a connection names a target that is not declared. The
/// connection is skipped during resolution.
pub struct UnknownTarget;

impl Rule for UnknownTarget {
    fn code(&self) -> &'static str {
        "unknown_target"
    }

    fn check(&self, ctx: &GraphContext<'_>) -> Vec<ValidationMessage> {
        let mut messages = Vec::new();

        for column in ctx.model().columns() {
            for connection in &column.connections {
                let unknown = match connection {
                    Connection::EntityKey(key) => ctx.resolve_key(key).err(),
                    Connection::Attribute(attr) => ctx.resolve_attribute(attr).err(),
                };
                if let Some(ResolveError::UnknownTarget(target)) = unknown {
                    messages.push(ValidationMessage::warning(
                        self.code(),
                        &format!("{}.{}:{}", column.source, column.name, target),
                        format!(
                            "Column '{}' in source '{}' references unknown target '{}'",
                            column.name, column.source, target
                        ),
                    ));
                }
            }
        }
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Target;
    use crate::rules::test_support::model;

    #[test]
    fn flags_keys_and_attributes() {
        let model = model(
            vec![Target::entity("customer")],
            vec![
                ("customer_id", vec![Connection::entity_key("customer")]),
                ("ghost_id", vec![Connection::entity_key("ghost")]),
                ("ghost_name", vec![Connection::attribute("ghost")]),
            ],
        );
        let messages = UnknownTarget.check(&GraphContext::build(&model));
        assert_eq!(messages.len(), 2);
        assert!(messages.iter().all(|m| m.message.contains("'ghost'")));
        assert_ne!(messages[0].id, messages[1].id);
    }

    #[test]
    fn role_problems_are_not_unknown_targets() {
        let model = model(
            vec![Target::relation("r", ["a", "b"])],
            vec![("x", vec![Connection::relation_key("r", "c", None)])],
        );
        assert!(UnknownTarget.check(&GraphContext::build(&model)).is_empty());
    }
}
