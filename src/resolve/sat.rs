//! resolve::sat
//!
//! Attribute grouping: one satellite per (source, target) pair with at least
//! one attribute.
//!
//! # Invariants
//!
//! - A pair with any `multiactive_key` attribute yields only a multiactive
//!   satellite (`ma_sat_...`), never an ordinary one
//! - A multiactive satellite's payload excludes its multiactive-key columns
//! - The driving key is the first column whose resolved key identifies the
//!   target, or none

use serde::Serialize;

use crate::core::graph::GraphContext;
use crate::core::naming;
use crate::core::types::{Connection, Source};

/// One attribute column of a satellite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SatAttribute {
    /// Source column.
    pub column: String,
    /// Attribute name in the target, if renamed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_attribute: Option<String>,
    /// Column is a multiactive sub-key.
    pub multiactive_key: bool,
}

/// Satellite artifact for a (source, target) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SatArtifact {
    /// Artifact name (`sat_<target>__<source>` or `ma_sat_<target>__<source>`).
    pub name: String,
    /// Target described.
    pub target_name: String,
    /// Source providing the attributes.
    pub source_name: String,
    /// Stage artifact of the source.
    pub stage_ref: String,
    /// Multiactive satellite.
    pub multiactive: bool,
    /// Attribute columns, first-encounter order.
    pub attributes: Vec<SatAttribute>,
    /// Descriptive payload.
    pub payload_columns: Vec<String>,
    /// Column keying the parent, if the source has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driving_key_column: Option<String>,
    /// Multiactive sub-key columns.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub multiactive_key_columns: Vec<String>,
}

/// Group attribute columns of every source by target.
pub fn group_sats(ctx: &GraphContext<'_>) -> Vec<SatArtifact> {
    ctx.model()
        .sources
        .iter()
        .flat_map(|source| source_sats(ctx, source))
        .collect()
}

fn source_sats(ctx: &GraphContext<'_>, source: &Source) -> Vec<SatArtifact> {
    let mut by_target: Vec<(String, Vec<SatAttribute>)> = Vec::new();

    for column in &source.columns {
        for attr in column.attributes() {
            let target = match ctx.resolve_attribute(attr) {
                Ok(target) => target,
                Err(_) => continue,
            };
            let attribute = SatAttribute {
                column: column.name.clone(),
                target_attribute: attr.target_attribute.clone(),
                multiactive_key: attr.multiactive_key,
            };
            match by_target.iter_mut().find(|(t, _)| *t == target.name) {
                Some((_, attrs)) => attrs.push(attribute),
                None => by_target.push((target.name.clone(), vec![attribute])),
            }
        }
    }

    by_target
        .into_iter()
        .map(|(target, attributes)| build_sat(ctx, source, target, attributes))
        .collect()
}

fn build_sat(
    ctx: &GraphContext<'_>,
    source: &Source,
    target: String,
    attributes: Vec<SatAttribute>,
) -> SatArtifact {
    let multiactive_key_columns: Vec<String> = attributes
        .iter()
        .filter(|a| a.multiactive_key)
        .map(|a| a.column.clone())
        .collect();
    let multiactive = !multiactive_key_columns.is_empty();

    let payload_columns = attributes
        .iter()
        .filter(|a| !multiactive_key_columns.contains(&a.column))
        .map(|a| a.column.clone())
        .collect();

    SatArtifact {
        name: naming::sat_name(&target, &source.name, multiactive),
        driving_key_column: driving_key(ctx, source, &target),
        target_name: target,
        source_name: source.name.clone(),
        stage_ref: naming::stage_name(&source.name),
        multiactive,
        attributes,
        payload_columns,
        multiactive_key_columns,
    }
}

fn driving_key(ctx: &GraphContext<'_>, source: &Source, target: &str) -> Option<String> {
    source
        .columns
        .iter()
        .find(|column| {
            column.connections.iter().any(|c| match c {
                Connection::EntityKey(key) => ctx
                    .resolve_key(key)
                    .map(|k| k.entity() == target)
                    .unwrap_or(false),
                Connection::Attribute(_) => false,
            })
        })
        .map(|column| column.name.clone())
}
