//! resolve::link
//!
//! Relation grouping: one link per relation target with at least one source.
//!
//! Only keys whose `target_name` is exactly the relation count. A column
//! keyed to a different relation over the same entity never contributes.
//! Foreign-key names come from the relation's [`RoleSlots`], the same slots
//! stage derivation resolves through.
//!
//! [`RoleSlots`]: crate::core::naming::RoleSlots

use serde::Serialize;

use super::columns::ColumnGroups;
use crate::core::graph::{GraphContext, ResolvedKey};
use crate::core::naming;
use crate::core::types::{Source, TargetKind};

/// One source's contribution to a link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkSource {
    /// Source name.
    pub source_name: String,
    /// Stage artifact of the source.
    pub stage_ref: String,
    /// Role entity -> columns, first-encounter order.
    pub entity_columns: ColumnGroups,
}

/// Link artifact for one relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkArtifact {
    /// Artifact name (`link_<relation>`).
    pub name: String,
    /// The relation.
    pub relation_name: String,
    /// Role entities in slot order.
    pub entities: Vec<String>,
    /// Combined hash-key column of the relation.
    pub hash_key: String,
    /// Contributing sources, in source order.
    pub sources: Vec<LinkSource>,
    /// Stage artifacts of those sources, same order.
    pub contributing_stage_refs: Vec<String>,
    /// One hash-key column per role slot, in slot order.
    pub foreign_key_names: Vec<String>,
}

/// Group sources by the relation they key.
pub fn group_links(ctx: &GraphContext<'_>) -> Vec<LinkArtifact> {
    ctx.targets_of_kind(TargetKind::Relation)
        .filter_map(|target| {
            let slots = target.slots.as_ref()?;
            let sources: Vec<LinkSource> = ctx
                .model()
                .sources
                .iter()
                .filter_map(|source| link_source(ctx, &target.name, source))
                .collect();

            if sources.is_empty() {
                log::debug!("no link for relation '{}': no sources", target.name);
                return None;
            }

            Some(LinkArtifact {
                name: naming::link_name(&target.name),
                relation_name: target.name.clone(),
                entities: target.entities.clone(),
                hash_key: naming::hash_key(&target.name),
                contributing_stage_refs: sources.iter().map(|s| s.stage_ref.clone()).collect(),
                sources,
                foreign_key_names: slots.foreign_key_names(),
            })
        })
        .collect()
}

fn link_source(ctx: &GraphContext<'_>, relation: &str, source: &Source) -> Option<LinkSource> {
    let mut entity_columns = ColumnGroups::new();

    for column in &source.columns {
        for key in column.entity_keys().filter(|k| k.target_name == relation) {
            if let Ok(ResolvedKey::Role { slot, .. }) = ctx.resolve_key(key) {
                entity_columns.append(&slot.entity, &column.name);
            }
        }
    }

    if entity_columns.is_empty() {
        return None;
    }
    Some(LinkSource {
        source_name: source.name.clone(),
        stage_ref: naming::stage_name(&source.name),
        entity_columns,
    })
}
