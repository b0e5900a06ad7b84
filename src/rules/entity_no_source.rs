//! rules::entity_no_source

use super::Rule;
use crate::core::graph::GraphContext;
use crate::core::types::TargetKind;
use crate::engine::health::ValidationMessage;

/// Warns for every entity target no source column resolves a key to.
///
/// A relation key naming the entity as a role counts as a source.
pub struct EntityNoSource;

impl Rule for EntityNoSource {
    fn code(&self) -> &'static str {
        "entity_no_source"
    }

    fn check(&self, ctx: &GraphContext<'_>) -> Vec<ValidationMessage> {
        ctx.targets_of_kind(TargetKind::Entity)
            .filter(|target| !ctx.entity_has_source(&target.name))
            .map(|target| {
                ValidationMessage::warning(
                    self.code(),
                    &target.name,
                    format!("Entity '{}' has no source column providing its key", target.name),
                )
            })
            .collect()
    }
}
