//! core::graph
//!
//! Graph/validation context built from the normalized model.
//!
//! # Architecture
//!
//! The context is the read-only view every validation rule and every
//! resolver consumes:
//! - Target lookup (first declaration of a name wins; later ones are
//!   recorded as duplicates)
//! - Role slots for every relation, computed once
//! - Per-source sets of connected entities, relations, and observed
//!   `(entity_name, entity_index)` role pairs
//! - Column counters
//!
//! # Invariants
//!
//! - Built from scratch for every run; never mutated after [`GraphContext::build`]
//! - A relation key without `entity_name` counts as a connection but takes no
//!   part in role tracking
//! - Key references to unknown targets count as connections but are not
//!   tracked as entity connections

use std::collections::{BTreeMap, BTreeSet, HashMap};

use thiserror::Error;

use super::naming::{RoleSlot, RoleSlots, SlotError};
use super::types::{AttributeOf, EntityKey, Model, Target, TargetKind};

/// Why a connection could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("target '{0}' is not declared")]
    UnknownTarget(String),

    #[error("connection to relation '{relation}' does not name an entity_name")]
    MissingRole { relation: String },

    #[error(transparent)]
    Slot(#[from] SlotError),
}

/// A key connection resolved against the target set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedKey<'c> {
    /// Business key of an entity target.
    Entity {
        /// The entity name.
        entity: &'c str,
    },
    /// Role-slot key of a relation target.
    Role {
        /// The relation name.
        relation: &'c str,
        /// The slot filled by the column.
        slot: &'c RoleSlot,
    },
}

impl<'c> ResolvedKey<'c> {
    /// Key name (`entity` or the slot key name).
    pub fn key_name(&self) -> &'c str {
        match self {
            ResolvedKey::Entity { entity } => entity,
            ResolvedKey::Role { slot, .. } => &slot.key_name,
        }
    }

    /// The entity this key identifies.
    pub fn entity(&self) -> &'c str {
        match self {
            ResolvedKey::Entity { entity } => entity,
            ResolvedKey::Role { slot, .. } => &slot.entity,
        }
    }
}

/// Lookup entry for one target.
#[derive(Debug, Clone)]
pub struct TargetInfo {
    /// Target name.
    pub name: String,
    /// Entity or relation.
    pub kind: TargetKind,
    /// Role entities (relations only).
    pub entities: Vec<String>,
    /// Description.
    pub description: Option<String>,
    /// Role slots (relations only).
    pub slots: Option<RoleSlots>,
}

impl TargetInfo {
    fn from_target(target: &Target) -> Self {
        let slots = target
            .is_relation()
            .then(|| RoleSlots::new(&target.name, &target.entities));
        Self {
            name: target.name.clone(),
            kind: target.kind,
            entities: target.entities.clone(),
            description: target.description.clone(),
            slots,
        }
    }
}

/// Connections observed for one source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceConnections {
    /// Entities connected by key (directly or through a relation role).
    pub entities: BTreeSet<String>,
    /// Relations connected by key.
    pub relations: BTreeSet<String>,
    /// Per relation, the `(entity_name, entity_index)` pairs observed.
    pub relation_roles: BTreeMap<String, BTreeSet<(String, Option<usize>)>>,
}

/// Read-only context over a normalized model.
#[derive(Debug)]
pub struct GraphContext<'m> {
    model: &'m Model,
    targets: HashMap<String, TargetInfo>,
    target_order: Vec<String>,
    duplicate_targets: Vec<String>,
    entity_sources: BTreeSet<String>,
    source_connections: BTreeMap<String, SourceConnections>,
    total_columns: usize,
    columns_with_connections: usize,
}

impl<'m> GraphContext<'m> {
    /// Build the context from a normalized model.
    pub fn build(model: &'m Model) -> Self {
        let mut targets = HashMap::new();
        let mut target_order = Vec::new();
        let mut duplicate_targets = Vec::new();

        for target in &model.targets {
            if targets.contains_key(&target.name) {
                duplicate_targets.push(target.name.clone());
                continue;
            }
            target_order.push(target.name.clone());
            targets.insert(target.name.clone(), TargetInfo::from_target(target));
        }

        let mut ctx = Self {
            model,
            targets,
            target_order,
            duplicate_targets,
            entity_sources: BTreeSet::new(),
            source_connections: BTreeMap::new(),
            total_columns: 0,
            columns_with_connections: 0,
        };
        ctx.track_connections();

        log::debug!(
            "context built: {} targets, {} columns ({} connected)",
            ctx.target_order.len(),
            ctx.total_columns,
            ctx.columns_with_connections
        );
        ctx
    }

    fn track_connections(&mut self) {
        let model = self.model;
        for source in &model.sources {
            let mut tracked = self
                .source_connections
                .remove(&source.name)
                .unwrap_or_default();

            for column in &source.columns {
                self.total_columns += 1;
                if column.is_connected() {
                    self.columns_with_connections += 1;
                }

                for key in column.entity_keys() {
                    match self.targets.get(&key.target_name).map(|t| t.kind) {
                        Some(TargetKind::Relation) => {
                            tracked.relations.insert(key.target_name.clone());
                            if let Some(entity) = &key.entity_name {
                                self.entity_sources.insert(entity.clone());
                                tracked.entities.insert(entity.clone());
                                tracked
                                    .relation_roles
                                    .entry(key.target_name.clone())
                                    .or_default()
                                    .insert((entity.clone(), key.entity_index));
                            }
                        }
                        Some(TargetKind::Entity) => {
                            self.entity_sources.insert(key.target_name.clone());
                            tracked.entities.insert(key.target_name.clone());
                        }
                        None => {}
                    }
                }
            }

            self.source_connections.insert(source.name.clone(), tracked);
        }
    }

    /// The model this context was built from.
    pub fn model(&self) -> &'m Model {
        self.model
    }

    /// Look up a target by name.
    pub fn target(&self, name: &str) -> Option<&TargetInfo> {
        self.targets.get(name)
    }

    /// Unique targets in declaration order.
    pub fn targets(&self) -> impl Iterator<Item = &TargetInfo> {
        self.target_order
            .iter()
            .filter_map(move |name| self.targets.get(name))
    }

    /// Unique targets of one kind in declaration order.
    pub fn targets_of_kind(&self, kind: TargetKind) -> impl Iterator<Item = &TargetInfo> {
        self.targets().filter(move |t| t.kind == kind)
    }

    /// Target names declared more than once (each repeat listed once per repeat).
    pub fn duplicate_targets(&self) -> &[String] {
        &self.duplicate_targets
    }

    /// Check if any source connects to the entity by key.
    pub fn entity_has_source(&self, entity: &str) -> bool {
        self.entity_sources.contains(entity)
    }

    /// Connections observed for a source.
    pub fn source_connections(&self, source: &str) -> Option<&SourceConnections> {
        self.source_connections.get(source)
    }

    /// Total number of columns across all sources.
    pub fn total_columns(&self) -> usize {
        self.total_columns
    }

    /// Number of columns with at least one connection.
    pub fn columns_with_connections(&self) -> usize {
        self.columns_with_connections
    }

    /// Number of unique targets.
    pub fn target_count(&self) -> usize {
        self.target_order.len()
    }

    /// Resolve a key connection to an entity key or a relation role slot.
    ///
    /// # Errors
    ///
    /// Returns a [`ResolveError`] for unknown targets, relation keys without
    /// an entity name, and role references no slot matches.
    pub fn resolve_key(&self, key: &EntityKey) -> Result<ResolvedKey<'_>, ResolveError> {
        let target = self
            .targets
            .get(&key.target_name)
            .ok_or_else(|| ResolveError::UnknownTarget(key.target_name.clone()))?;

        match &target.slots {
            None => Ok(ResolvedKey::Entity {
                entity: &target.name,
            }),
            Some(slots) => {
                let entity = key
                    .entity_name
                    .as_deref()
                    .ok_or_else(|| ResolveError::MissingRole {
                        relation: target.name.clone(),
                    })?;
                let slot = slots.resolve(entity, key.entity_index)?;
                Ok(ResolvedKey::Role {
                    relation: &target.name,
                    slot,
                })
            }
        }
    }

    /// Resolve an attribute connection to its target.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::UnknownTarget`] if the target is not declared.
    pub fn resolve_attribute(&self, attr: &AttributeOf) -> Result<&TargetInfo, ResolveError> {
        self.targets
            .get(&attr.attribute_of)
            .ok_or_else(|| ResolveError::UnknownTarget(attr.attribute_of.clone()))
    }
}
