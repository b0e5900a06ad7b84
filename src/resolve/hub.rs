//! resolve::hub
//!
//! Entity grouping: one hub per entity target with at least one source.

use serde::Serialize;

use crate::core::graph::{GraphContext, ResolvedKey};
use crate::core::naming;
use crate::core::types::TargetKind;

/// Hub artifact for one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HubArtifact {
    /// Artifact name (`hub_<entity>`).
    pub name: String,
    /// The entity.
    pub entity_name: String,
    /// Hash-key column shared by every contributing stage.
    pub hash_key: String,
    /// Sources providing the key, unique, in source order.
    pub contributing_sources: Vec<String>,
    /// Stage artifacts of those sources, same order.
    pub contributing_stage_refs: Vec<String>,
}

/// Group sources by the entity they key.
///
/// Only direct entity keys count; a relation role naming the entity does not
/// make the source a hub contributor. Entities without sources are omitted.
pub fn group_hubs(ctx: &GraphContext<'_>) -> Vec<HubArtifact> {
    ctx.targets_of_kind(TargetKind::Entity)
        .filter_map(|target| {
            let contributing_sources: Vec<String> = ctx
                .model()
                .sources
                .iter()
                .filter(|source| {
                    source.columns.iter().flat_map(|c| c.entity_keys()).any(|key| {
                        matches!(
                            ctx.resolve_key(key),
                            Ok(ResolvedKey::Entity { entity }) if entity == target.name
                        )
                    })
                })
                .map(|source| source.name.clone())
                .fold(Vec::new(), |mut unique, name| {
                    if !unique.contains(&name) {
                        unique.push(name);
                    }
                    unique
                });

            if contributing_sources.is_empty() {
                log::debug!("no hub for entity '{}': no sources", target.name);
                return None;
            }

            Some(HubArtifact {
                name: naming::hub_name(&target.name),
                entity_name: target.name.clone(),
                hash_key: naming::hash_key(&target.name),
                contributing_stage_refs: contributing_sources
                    .iter()
                    .map(|s| naming::stage_name(s))
                    .collect(),
                contributing_sources,
            })
        })
        .collect()
}
