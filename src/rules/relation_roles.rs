//! rules::relation_roles

use super::Rule;
use crate::core::graph::{GraphContext, ResolveError};
use crate::engine::health::ValidationMessage;

/// Warns when a relation key cannot be resolved to a role slot.
///
/// Covers a missing `entity_name`, an entity absent from the relation, a
/// self-linked entity referenced without `entity_index`, and an index past
/// the entity's repeat count. The connection is skipped during resolution.
pub struct RelationRoleUnresolved;

impl Rule for RelationRoleUnresolved {
    fn code(&self) -> &'static str {
        "relation_role_unresolved"
    }

    fn check(&self, ctx: &GraphContext<'_>) -> Vec<ValidationMessage> {
        let mut messages = Vec::new();

        for column in ctx.model().columns() {
            for (i, key) in column.entity_keys().enumerate() {
                let reason = match ctx.resolve_key(key) {
                    Err(err @ (ResolveError::MissingRole { .. } | ResolveError::Slot(_))) => err,
                    _ => continue,
                };
                messages.push(ValidationMessage::warning(
                    self.code(),
                    &format!("{}.{}#{}", column.source, column.name, i),
                    format!(
                        "Column '{}' in source '{}': {}",
                        column.name, column.source, reason
                    ),
                ));
            }
        }
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Connection, EntityKey, Target};
    use crate::rules::test_support::model;

    fn self_link() -> Vec<Target> {
        vec![
            Target::entity("A"),
            Target::entity("B"),
            Target::relation("rel", ["A", "A", "B"]),
        ]
    }

    #[test]
    fn resolvable_roles_pass() {
        let model = model(
            self_link(),
            vec![
                ("a1", vec![Connection::relation_key("rel", "A", Some(0))]),
                ("a2", vec![Connection::relation_key("rel", "A", Some(1))]),
                ("b", vec![Connection::relation_key("rel", "B", None)]),
            ],
        );
        assert!(RelationRoleUnresolved
            .check(&GraphContext::build(&model))
            .is_empty());
    }

    #[test]
    fn flags_each_unresolvable_role() {
        let model = model(
            self_link(),
            vec![
                (
                    "no_role",
                    vec![Connection::EntityKey(EntityKey {
                        target_name: "rel".to_string(),
                        entity_name: None,
                        entity_index: None,
                    })],
                ),
                ("stranger", vec![Connection::relation_key("rel", "C", None)]),
                ("no_index", vec![Connection::relation_key("rel", "A", None)]),
                ("too_far", vec![Connection::relation_key("rel", "A", Some(2))]),
            ],
        );
        let messages = RelationRoleUnresolved.check(&GraphContext::build(&model));
        assert_eq!(messages.len(), 4);
        assert!(messages[0].message.contains("entity_name"));
        assert!(messages[1].message.contains("not part of relation"));
        assert!(messages[2].message.contains("no entity_index"));
        assert!(messages[3].message.contains("out of range"));
        assert!(messages.iter().all(|m| !m.is_blocking()));
    }
}
