//! core::normalize
//!
//! Connection normalization: raw column annotations to canonical connections.
//!
//! # Architecture
//!
//! Three generations of annotation shape are accepted. Each is read by one
//! [`AnnotationAdapter`]; the adapters form an ordered chain and the first
//! one that matches a column produces that column's full connection list.
//! Results from different generations are never merged.
//!
//! | Order | Adapter          | Matches when                                  |
//! |-------|------------------|-----------------------------------------------|
//! | 1     | [`UnifiedTarget`] | `target` is present on the column            |
//! | 2     | [`MetaTarget`]    | `meta.target` is present                     |
//! | 3     | [`LegacyFields`]  | `meta.entity_name` or `meta.attribute_of` set |
//!
//! A column no adapter matches has no connections. That is not an error; the
//! `column_no_connection` rule reports it.
//!
//! # Invariants
//!
//! - The same intent in any generation yields the same canonical list
//! - Declaration order is preserved

use crate::core::config::schema::{MetadvDocument, RawColumn, RawConnection, RawMeta};
use crate::core::types::{AttributeOf, Column, Connection, EntityKey, Model, Source, Target};

/// One annotation generation.
///
/// Adapters are total over the columns they match: a returned list is the
/// complete connection list for the column.
pub trait AnnotationAdapter {
    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// Produce the connection list, or `None` if this generation is absent.
    fn adapt(&self, column: &RawColumn) -> Option<Vec<Connection>>;
}

/// `target: [...]` directly on the column.
pub struct UnifiedTarget;

/// `meta.target: [...]`.
pub struct MetaTarget;

/// Separate `meta.entity_name` / `meta.attribute_of` fields.
pub struct LegacyFields;

/// The adapter chain, newest generation first.
pub const ADAPTERS: &[&dyn AnnotationAdapter] = &[&UnifiedTarget, &MetaTarget, &LegacyFields];

impl AnnotationAdapter for UnifiedTarget {
    fn name(&self) -> &'static str {
        "target"
    }

    fn adapt(&self, column: &RawColumn) -> Option<Vec<Connection>> {
        column.target.as_deref().map(connection_list)
    }
}

impl AnnotationAdapter for MetaTarget {
    fn name(&self) -> &'static str {
        "meta.target"
    }

    fn adapt(&self, column: &RawColumn) -> Option<Vec<Connection>> {
        column
            .meta
            .as_ref()
            .and_then(|meta| meta.target.as_deref())
            .map(connection_list)
    }
}

impl AnnotationAdapter for LegacyFields {
    fn name(&self) -> &'static str {
        "meta.entity_name/attribute_of"
    }

    fn adapt(&self, column: &RawColumn) -> Option<Vec<Connection>> {
        let meta = column.meta.as_ref()?;
        if meta.entity_name.is_none() && meta.attribute_of.is_none() {
            return None;
        }
        Some(legacy_connections(meta))
    }
}

fn legacy_connections(meta: &RawMeta) -> Vec<Connection> {
    let mut connections = Vec::new();

    if let Some(names) = &meta.entity_name {
        let relation = non_empty(&meta.entity_relation);
        for name in non_empty_values(names.values(), "entity_name") {
            let key = match relation {
                Some(relation) => EntityKey {
                    target_name: relation.to_string(),
                    entity_name: Some(name.to_string()),
                    entity_index: meta.entity_name_index,
                },
                None => EntityKey {
                    target_name: name.to_string(),
                    entity_name: None,
                    entity_index: meta.entity_name_index,
                },
            };
            connections.push(Connection::EntityKey(key));
        }
    }

    if let Some(targets) = &meta.attribute_of {
        for target in non_empty_values(targets.values(), "attribute_of") {
            connections.push(Connection::Attribute(AttributeOf {
                attribute_of: target.to_string(),
                target_attribute: non_empty(&meta.target_attribute).map(str::to_string),
                multiactive_key: meta.multiactive_key.unwrap_or(false),
            }));
        }
    }

    connections
}

fn connection_list(entries: &[RawConnection]) -> Vec<Connection> {
    entries.iter().filter_map(to_connection).collect()
}

/// Convert one list entry. `attribute_of` takes precedence over `target_name`;
/// an entry with neither is dropped.
fn to_connection(entry: &RawConnection) -> Option<Connection> {
    if let Some(target) = non_empty(&entry.attribute_of) {
        return Some(Connection::Attribute(AttributeOf {
            attribute_of: target.to_string(),
            target_attribute: non_empty(&entry.target_attribute).map(str::to_string),
            multiactive_key: entry.multiactive_key.unwrap_or(false),
        }));
    }
    if let Some(target) = non_empty(&entry.target_name) {
        return Some(Connection::EntityKey(EntityKey {
            target_name: target.to_string(),
            entity_name: non_empty(&entry.entity_name).map(str::to_string),
            entity_index: entry.entity_index,
        }));
    }
    log::warn!("dropping connection entry with neither target_name nor attribute_of");
    None
}

/// Drop empty names from a legacy scalar or list, as list entries without a
/// target are dropped.
fn non_empty_values<'a>(values: Vec<&'a str>, field: &str) -> impl Iterator<Item = &'a str> {
    let total = values.len();
    let kept: Vec<&str> = values.into_iter().filter(|v| !v.is_empty()).collect();
    if kept.len() < total {
        log::warn!("dropping {} empty meta.{} value(s)", total - kept.len(), field);
    }
    kept.into_iter()
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Normalize one raw column into its canonical connection list.
pub fn normalize_column(column: &RawColumn) -> Vec<Connection> {
    for adapter in ADAPTERS {
        if let Some(connections) = adapter.adapt(column) {
            log::debug!(
                "column '{}' read from {} ({} connections)",
                column.name,
                adapter.name(),
                connections.len()
            );
            return connections;
        }
    }
    Vec::new()
}

/// Normalize a whole document into the immutable [`Model`] snapshot.
pub fn normalize_document(document: &MetadvDocument) -> Model {
    let targets = document
        .targets()
        .iter()
        .map(|raw| Target {
            name: raw.name.clone(),
            kind: raw.kind.unwrap_or_default(),
            entities: raw.entities.clone().unwrap_or_default(),
            description: raw.description.clone(),
        })
        .collect();

    let sources = document
        .sources()
        .iter()
        .map(|raw| Source {
            name: raw.name.clone(),
            columns: raw
                .columns
                .as_deref()
                .unwrap_or(&[])
                .iter()
                .map(|column| Column {
                    name: column.name.clone(),
                    source: raw.name.clone(),
                    connections: normalize_column(column),
                })
                .collect(),
        })
        .collect();

    Model { targets, sources }
}
