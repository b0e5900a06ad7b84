//! core::config::schema
//!
//! Raw configuration document types.
//!
//! # Document
//!
//! Located at `models/metadv/metadv.yml` (canonical). Only the `metadv`
//! section is read; the rest of the document belongs to other tooling.
//!
//! ```yaml
//! metadv:
//!   targets:
//!     - name: customer
//!       type: entity
//!     - name: customer_order
//!       type: relation
//!       entities: [customer, order]
//!   sources:
//!     - name: stg_orders
//!       columns:
//!         - name: customer_id
//!           target:
//!             - target_name: customer_order
//!               entity_name: customer
//! ```
//!
//! # Annotation generations
//!
//! Columns may carry their connections in three shapes, newest first:
//! 1. `target: [...]` directly on the column
//! 2. `meta.target: [...]`
//! 3. `meta.entity_name` / `meta.entity_relation` / `meta.entity_name_index`
//!    and `meta.attribute_of` / `meta.target_attribute` / `meta.multiactive_key`
//!
//! Unlike the tool's own settings, these structs do not deny unknown fields:
//! column entries are shared with dbt documentation properties.

use serde::Deserialize;

use crate::core::types::TargetKind;

/// Top-level configuration document.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct MetadvDocument {
    /// The `metadv` section (absent or null means empty).
    pub metadv: Option<MetadvSection>,
}

impl MetadvDocument {
    /// Declared targets, empty if none.
    pub fn targets(&self) -> &[RawTarget] {
        self.metadv
            .as_ref()
            .and_then(|m| m.targets.as_deref())
            .unwrap_or(&[])
    }

    /// Declared sources, empty if none.
    pub fn sources(&self) -> &[RawSource] {
        self.metadv
            .as_ref()
            .and_then(|m| m.sources.as_deref())
            .unwrap_or(&[])
    }
}

/// The `metadv` section.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct MetadvSection {
    /// Target declarations.
    pub targets: Option<Vec<RawTarget>>,
    /// Source declarations.
    pub sources: Option<Vec<RawSource>>,
}

/// A target as written in the document.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct RawTarget {
    /// Target name.
    pub name: String,
    /// `entity` (default) or `relation`.
    #[serde(rename = "type")]
    pub kind: Option<TargetKind>,
    /// Role entities of a relation.
    pub entities: Option<Vec<String>>,
    /// Description.
    pub description: Option<String>,
}

/// A source as written in the document.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct RawSource {
    /// Source model name.
    pub name: String,
    /// Columns.
    pub columns: Option<Vec<RawColumn>>,
}

/// A column as written in the document.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct RawColumn {
    /// Column name.
    pub name: String,
    /// Unified connection list (newest shape).
    pub target: Option<Vec<RawConnection>>,
    /// Legacy `meta` wrapper.
    pub meta: Option<RawMeta>,
}

/// One entry of a connection list: either a key or an attribute entry.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct RawConnection {
    /// Key entry: target identified by this column.
    pub target_name: Option<String>,
    /// Key entry: role entity within a relation.
    pub entity_name: Option<String>,
    /// Key entry: self-link occurrence.
    pub entity_index: Option<usize>,
    /// Attribute entry: target described by this column.
    pub attribute_of: Option<String>,
    /// Attribute entry: attribute rename.
    pub target_attribute: Option<String>,
    /// Attribute entry: multiactive sub-key flag.
    pub multiactive_key: Option<bool>,
}

/// The legacy `meta` wrapper.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct RawMeta {
    /// Wrapped connection list.
    pub target: Option<Vec<RawConnection>>,
    /// Oldest shape: entity name(s) keyed by this column.
    pub entity_name: Option<OneOrMany>,
    /// Oldest shape: relation the entity names belong to.
    pub entity_relation: Option<String>,
    /// Oldest shape: self-link occurrence shared by all entity names.
    pub entity_name_index: Option<usize>,
    /// Oldest shape: target name(s) described by this column.
    pub attribute_of: Option<OneOrMany>,
    /// Oldest shape: attribute rename shared by all attribute targets.
    pub target_attribute: Option<String>,
    /// Oldest shape: multiactive flag shared by all attribute targets.
    pub multiactive_key: Option<bool>,
}

/// A scalar-or-list string field.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum OneOrMany {
    /// A single value.
    One(String),
    /// A list of values.
    Many(Vec<String>),
}

impl OneOrMany {
    /// Values in declaration order.
    pub fn values(&self) -> Vec<&str> {
        match self {
            OneOrMany::One(value) => vec![value.as_str()],
            OneOrMany::Many(values) => values.iter().map(String::as_str).collect(),
        }
    }
}
