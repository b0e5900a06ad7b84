//! rules::key_name_collision

use super::Rule;
use crate::core::graph::GraphContext;
use crate::core::naming;
use crate::core::types::TargetKind;
use crate::engine::health::ValidationMessage;

/// Errors when two different keys derive the same key name.
///
/// Entity keys, relation role slots, and combined relation keys share one
/// namespace of `<key>_id` / `<key>_hk` columns. An entity `rel_A` and the
/// `A` role of relation `rel` would both write `rel_A_hk`.
pub struct KeyNameCollision;

impl Rule for KeyNameCollision {
    fn code(&self) -> &'static str {
        "key_name_collision"
    }

    fn check(&self, ctx: &GraphContext<'_>) -> Vec<ValidationMessage> {
        let mut claims: Vec<(String, String)> = Vec::new();
        for target in ctx.targets() {
            match (&target.kind, &target.slots) {
                (TargetKind::Relation, Some(slots)) => {
                    claims.push((target.name.clone(), format!("relation '{}'", target.name)));
                    claims.extend(slots.iter().map(|slot| {
                        let owner = format!(
                            "role '{}' #{} of relation '{}'",
                            slot.entity, slot.occurrence, target.name
                        );
                        (slot.key_name.clone(), owner)
                    }));
                }
                _ => claims.push((target.name.clone(), format!("entity '{}'", target.name))),
            }
        }

        let mut owners: Vec<(String, Vec<String>)> = Vec::new();
        for (key, owner) in claims {
            match owners.iter_mut().find(|(k, _)| *k == key) {
                Some((_, list)) => list.push(owner),
                None => owners.push((key, vec![owner])),
            }
        }

        owners
            .into_iter()
            .filter(|(_, list)| list.len() > 1)
            .map(|(key, list)| {
                ValidationMessage::error(
                    self.code(),
                    &key,
                    format!(
                        "Key column '{}' is derived by more than one key: {}",
                        naming::hash_key(&key),
                        list.join(", ")
                    ),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Target;
    use crate::rules::test_support::model;

    #[test]
    fn entity_clashing_with_role_slot() {
        let model = model(
            vec![
                Target::entity("rel_A"),
                Target::entity("A"),
                Target::entity("B"),
                Target::relation("rel", ["A", "B"]),
            ],
            vec![],
        );
        let messages = KeyNameCollision.check(&GraphContext::build(&model));

        assert_eq!(messages.len(), 1);
        assert!(messages[0].is_blocking());
        assert!(messages[0].message.contains("'rel_A_hk'"));
        assert!(messages[0].message.contains("entity 'rel_A'"));
        assert!(messages[0].message.contains("of relation 'rel'"));
    }

    #[test]
    fn self_link_sequence_clashing_with_entity() {
        let model = model(
            vec![
                Target::entity("A"),
                Target::entity("rel_A_2"),
                Target::relation("rel", ["A", "A"]),
            ],
            vec![],
        );
        let messages = KeyNameCollision.check(&GraphContext::build(&model));
        assert_eq!(messages.len(), 1);
        assert!(messages[0].message.contains("'rel_A_2_hk'"));
    }

    #[test]
    fn combined_relation_key_clashing_with_slot() {
        let model = model(
            vec![
                Target::entity("q"),
                Target::entity("r"),
                Target::relation("p_q", ["r"]),
                Target::relation("p", ["q"]),
            ],
            vec![],
        );
        let messages = KeyNameCollision.check(&GraphContext::build(&model));
        assert_eq!(messages.len(), 1);
        assert!(messages[0].message.contains("relation 'p_q'"));
        assert!(messages[0].message.contains("role 'q' #0 of relation 'p'"));
    }

    #[test]
    fn distinct_keys_pass() {
        let model = model(
            vec![
                Target::entity("A"),
                Target::entity("B"),
                Target::relation("rel", ["A", "A", "B"]),
            ],
            vec![],
        );
        assert!(KeyNameCollision.check(&GraphContext::build(&model)).is_empty());
    }
}
