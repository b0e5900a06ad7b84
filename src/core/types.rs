//! core::types
//!
//! Canonical domain types for the conceptual model.
//!
//! # Types
//!
//! - [`Target`] - An entity or relation declared in the configuration
//! - [`Source`] / [`Column`] - Flat source columns annotated with connections
//! - [`Connection`] - Canonical, generation-independent column annotation
//! - [`Model`] - The normalized, immutable snapshot every later stage reads
//!
//! # Invariants
//!
//! These types are produced once by [`crate::core::normalize`] and never
//! mutated afterwards. Every column's connection list is in declaration order.
//!
//! # Example
//!
//! ```
//! use metadv::core::types::{Connection, TargetKind};
//!
//! let key = Connection::entity_key("customer");
//! assert_eq!(key.target_name(), "customer");
//! assert!(key.is_entity_key());
//! assert_eq!(TargetKind::default(), TargetKind::Entity);
//! ```

use serde::{Deserialize, Serialize};

/// Kind of a conceptual target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    /// A business entity (becomes a hub).
    #[default]
    Entity,
    /// An association between entities (becomes a link).
    Relation,
}

impl std::fmt::Display for TargetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetKind::Entity => write!(f, "entity"),
            TargetKind::Relation => write!(f, "relation"),
        }
    }
}

/// A declared target: entity or relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Target {
    /// Unique target name.
    pub name: String,
    /// Entity or relation.
    #[serde(rename = "type")]
    pub kind: TargetKind,
    /// Role entities, in slot order. Only meaningful for relations and may
    /// contain repeats (self-links).
    pub entities: Vec<String>,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Target {
    /// Create an entity target.
    pub fn entity(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TargetKind::Entity,
            entities: Vec::new(),
            description: None,
        }
    }

    /// Create a relation target over the given role entities.
    pub fn relation<I, S>(name: impl Into<String>, entities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            kind: TargetKind::Relation,
            entities: entities.into_iter().map(Into::into).collect(),
            description: None,
        }
    }

    /// Check if this target is an entity.
    pub fn is_entity(&self) -> bool {
        self.kind == TargetKind::Entity
    }

    /// Check if this target is a relation.
    pub fn is_relation(&self) -> bool {
        self.kind == TargetKind::Relation
    }
}

/// A column's value identifies the named target (business key).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EntityKey {
    /// Entity or relation this key feeds.
    pub target_name: String,
    /// Role entity within a relation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,
    /// 0-based occurrence of `entity_name` for self-links.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_index: Option<usize>,
}

/// A column describes the named target (descriptive payload).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AttributeOf {
    /// Target described by this column.
    pub attribute_of: String,
    /// Optional rename of the attribute in the target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_attribute: Option<String>,
    /// Column is a multiactive sub-key of the satellite.
    pub multiactive_key: bool,
}

/// Canonical connection between a column and a target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Connection {
    /// Business key connection.
    EntityKey(EntityKey),
    /// Descriptive attribute connection.
    Attribute(AttributeOf),
}

impl Connection {
    /// Key connection to an entity target.
    pub fn entity_key(target_name: impl Into<String>) -> Self {
        Connection::EntityKey(EntityKey {
            target_name: target_name.into(),
            entity_name: None,
            entity_index: None,
        })
    }

    /// Key connection filling a role slot of a relation.
    pub fn relation_key(
        relation: impl Into<String>,
        entity_name: impl Into<String>,
        entity_index: Option<usize>,
    ) -> Self {
        Connection::EntityKey(EntityKey {
            target_name: relation.into(),
            entity_name: Some(entity_name.into()),
            entity_index,
        })
    }

    /// Plain attribute connection.
    pub fn attribute(attribute_of: impl Into<String>) -> Self {
        Connection::Attribute(AttributeOf {
            attribute_of: attribute_of.into(),
            target_attribute: None,
            multiactive_key: false,
        })
    }

    /// Attribute connection flagged as a multiactive key.
    pub fn multiactive_key(attribute_of: impl Into<String>) -> Self {
        Connection::Attribute(AttributeOf {
            attribute_of: attribute_of.into(),
            target_attribute: None,
            multiactive_key: true,
        })
    }

    /// Name of the target this connection points at.
    pub fn target_name(&self) -> &str {
        match self {
            Connection::EntityKey(key) => &key.target_name,
            Connection::Attribute(attr) => &attr.attribute_of,
        }
    }

    /// Check if this is a key connection.
    pub fn is_entity_key(&self) -> bool {
        matches!(self, Connection::EntityKey(_))
    }

    /// Check if this is an attribute connection.
    pub fn is_attribute(&self) -> bool {
        matches!(self, Connection::Attribute(_))
    }
}

/// A source column with its canonical connections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Owning source name.
    pub source: String,
    /// Canonical connections, declaration order. May be empty.
    pub connections: Vec<Connection>,
}

impl Column {
    /// Check if the column connects to anything.
    pub fn is_connected(&self) -> bool {
        !self.connections.is_empty()
    }

    /// Key connections of this column.
    pub fn entity_keys(&self) -> impl Iterator<Item = &EntityKey> {
        self.connections.iter().filter_map(|c| match c {
            Connection::EntityKey(key) => Some(key),
            Connection::Attribute(_) => None,
        })
    }

    /// Attribute connections of this column.
    pub fn attributes(&self) -> impl Iterator<Item = &AttributeOf> {
        self.connections.iter().filter_map(|c| match c {
            Connection::Attribute(attr) => Some(attr),
            Connection::EntityKey(_) => None,
        })
    }
}

/// A flat source model (usually a dbt staging model).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Source {
    /// Source model name.
    pub name: String,
    /// Columns, in declaration order.
    pub columns: Vec<Column>,
}

/// The normalized configuration snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Model {
    /// Targets, in declaration order.
    pub targets: Vec<Target>,
    /// Sources, in declaration order.
    pub sources: Vec<Source>,
}

impl Model {
    /// Find a target by name (first declaration wins).
    pub fn target(&self, name: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.name == name)
    }

    /// Iterate all columns across all sources.
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.sources.iter().flat_map(|s| s.columns.iter())
    }
}
