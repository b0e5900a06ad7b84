//! resolve::stage
//!
//! Key/hash derivation for one source.
//!
//! # Algorithm
//!
//! Columns are walked in declaration order, connections in list order:
//!
//! - Key to entity `T`: alias `T_id <- column`, append to `T_hk`
//! - Key to a role slot of relation `R`: alias `<slot>_id <- column`, append
//!   to `<slot>_hk`, and append to the combined `R_hk`
//! - Attribute of `T`: append to hashdiff group `T`
//!
//! Hash-key groups never repeat a column. The combined relation groups are
//! placed after the per-key groups, in order of first encounter.
//!
//! # Invariants
//!
//! - Output order depends only on declaration order
//! - Unresolvable connections contribute nothing
//! - A column with no connections never appears in any mapping

use serde::Serialize;

use super::columns::{ColumnAliases, ColumnGroups};
use crate::core::graph::{GraphContext, ResolvedKey};
use crate::core::naming;
use crate::core::types::{Connection, Source};

/// Per-source artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageArtifact {
    /// Artifact name (`stg_<source>`).
    pub name: String,
    /// Source the stage reads.
    pub source_name: String,
    /// Derived alias -> source column.
    pub derived_columns: ColumnAliases,
    /// Hash-key name -> source columns.
    pub hashed_columns: ColumnGroups,
    /// Target -> change-detection columns.
    pub hashdiff_columns: ColumnGroups,
}

/// Derive the stage artifact for a source.
///
/// Returns `None` when no connection of the source resolves.
pub fn derive_stage(ctx: &GraphContext<'_>, source: &Source) -> Option<StageArtifact> {
    let mut derived_columns = ColumnAliases::new();
    let mut hashed_columns = ColumnGroups::new();
    let mut relation_keys = ColumnGroups::new();
    let mut hashdiff_columns = ColumnGroups::new();
    let mut resolved = 0usize;

    for column in &source.columns {
        for connection in &column.connections {
            match connection {
                Connection::EntityKey(key) => match ctx.resolve_key(key) {
                    Ok(ResolvedKey::Entity { entity }) => {
                        derived_columns.set(naming::id_alias(entity), &column.name);
                        hashed_columns.append_unique(&naming::hash_key(entity), &column.name);
                        resolved += 1;
                    }
                    Ok(ResolvedKey::Role { relation, slot }) => {
                        derived_columns.set(naming::id_alias(&slot.key_name), &column.name);
                        hashed_columns.append_unique(&slot.hash_key(), &column.name);
                        relation_keys.append_unique(&naming::hash_key(relation), &column.name);
                        resolved += 1;
                    }
                    Err(e) => {
                        log::warn!(
                            "skipping key on {}.{}: {}",
                            source.name,
                            column.name,
                            e
                        );
                    }
                },
                Connection::Attribute(attr) => match ctx.resolve_attribute(attr) {
                    Ok(target) => {
                        hashdiff_columns.append(&target.name, &column.name);
                        resolved += 1;
                    }
                    Err(e) => {
                        log::warn!(
                            "skipping attribute on {}.{}: {}",
                            source.name,
                            column.name,
                            e
                        );
                    }
                },
            }
        }
    }

    if resolved == 0 {
        log::debug!("no stage for source '{}': nothing resolved", source.name);
        return None;
    }

    for (group, members) in relation_keys.iter() {
        for member in members {
            hashed_columns.append_unique(group, member);
        }
    }

    Some(StageArtifact {
        name: naming::stage_name(&source.name),
        source_name: source.name.clone(),
        derived_columns,
        hashed_columns,
        hashdiff_columns,
    })
}
