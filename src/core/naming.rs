//! core::naming
//!
//! Deterministic naming for derived columns, hash keys, and artifacts.
//!
//! # Role slots
//!
//! A relation's `entities` list defines its role slots. An entity listed more
//! than once makes the relation a self-link for that entity; each occurrence
//! gets its own slot, suffixed with a 1-based sequence number:
//!
//! | Relation `rel` entities | Slot key names                    |
//! |-------------------------|-----------------------------------|
//! | `[customer, order]`     | `rel_customer`, `rel_order`       |
//! | `[A, A, B]`             | `rel_A_1`, `rel_A_2`, `rel_B`     |
//!
//! [`RoleSlots`] is computed once per relation and is the only place slot key
//! names are produced. Stage derivation and link grouping both resolve through
//! it, so their hash-key names always agree.

use serde::Serialize;
use thiserror::Error;

/// Suffix of derived business-key aliases.
pub const ID_SUFFIX: &str = "_id";

/// Suffix of hash-key columns.
pub const HASH_KEY_SUFFIX: &str = "_hk";

/// Derived alias column for a key name (`customer` -> `customer_id`).
pub fn id_alias(key_name: &str) -> String {
    format!("{}{}", key_name, ID_SUFFIX)
}

/// Hash-key column for a key name (`customer` -> `customer_hk`).
pub fn hash_key(key_name: &str) -> String {
    format!("{}{}", key_name, HASH_KEY_SUFFIX)
}

/// Key name of one role slot.
///
/// `seq` is the 1-based occurrence and is only given for self-linked
/// entities.
pub fn slot_key_name(relation: &str, entity: &str, seq: Option<usize>) -> String {
    match seq {
        Some(seq) => format!("{}_{}_{}", relation, entity, seq),
        None => format!("{}_{}", relation, entity),
    }
}

/// Stage model for a source.
pub fn stage_name(source: &str) -> String {
    format!("stg_{}", source)
}

/// Hub artifact for an entity.
pub fn hub_name(entity: &str) -> String {
    format!("hub_{}", entity)
}

/// Link artifact for a relation.
pub fn link_name(relation: &str) -> String {
    format!("link_{}", relation)
}

/// Satellite artifact for a (target, source) pair.
pub fn sat_name(target: &str, source: &str, multiactive: bool) -> String {
    let prefix = if multiactive { "ma_sat" } else { "sat" };
    format!("{}_{}__{}", prefix, target, source)
}

/// Why a role reference could not be resolved to a slot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotError {
    #[error("entity '{entity}' is not part of relation '{relation}'")]
    EntityNotInRelation { relation: String, entity: String },

    #[error(
        "entity '{entity}' appears {occurrences} times in relation '{relation}' but no entity_index was given"
    )]
    MissingIndex {
        relation: String,
        entity: String,
        occurrences: usize,
    },

    #[error(
        "entity_index {index} is out of range for entity '{entity}' in relation '{relation}' ({occurrences} occurrences)"
    )]
    IndexOutOfRange {
        relation: String,
        entity: String,
        index: usize,
        occurrences: usize,
    },
}

/// One named position of an entity within a relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleSlot {
    /// Entity filling this slot.
    pub entity: String,
    /// 0-based occurrence of the entity within the relation.
    pub occurrence: usize,
    /// Key name (`rel_entity` or `rel_entity_seq`).
    pub key_name: String,
}

impl RoleSlot {
    /// Hash-key column of this slot.
    pub fn hash_key(&self) -> String {
        hash_key(&self.key_name)
    }
}

/// Ordered role slots of one relation.
///
/// # Example
///
/// ```
/// use metadv::core::naming::RoleSlots;
///
/// let entities = vec!["A".to_string(), "A".to_string(), "B".to_string()];
/// let slots = RoleSlots::new("rel", &entities);
/// assert_eq!(slots.resolve("A", Some(1)).unwrap().key_name, "rel_A_2");
/// assert_eq!(slots.resolve("B", None).unwrap().key_name, "rel_B");
/// assert_eq!(slots.foreign_key_names(), vec!["rel_A_1_hk", "rel_A_2_hk", "rel_B_hk"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleSlots {
    relation: String,
    slots: Vec<RoleSlot>,
}

impl RoleSlots {
    /// Compute the slots of a relation from its entity list.
    pub fn new(relation: &str, entities: &[String]) -> Self {
        let slots = entities
            .iter()
            .enumerate()
            .map(|(i, entity)| {
                let occurrence = entities[..i].iter().filter(|e| *e == entity).count();
                let self_linked = entities.iter().filter(|e| *e == entity).count() > 1;
                let seq = self_linked.then_some(occurrence + 1);
                RoleSlot {
                    entity: entity.clone(),
                    occurrence,
                    key_name: slot_key_name(relation, entity, seq),
                }
            })
            .collect();

        Self {
            relation: relation.to_string(),
            slots,
        }
    }

    /// Number of slots `entity` occupies.
    pub fn occurrences(&self, entity: &str) -> usize {
        self.slots.iter().filter(|s| s.entity == entity).count()
    }

    /// Check if `entity` occupies more than one slot.
    pub fn is_self_linked(&self, entity: &str) -> bool {
        self.occurrences(entity) > 1
    }

    /// Resolve a role reference to its slot.
    ///
    /// `index` is only consulted for self-linked entities.
    ///
    /// # Errors
    ///
    /// Returns a [`SlotError`] if the entity is not part of the relation, or
    /// if a self-linked entity is referenced without a valid index.
    pub fn resolve(&self, entity: &str, index: Option<usize>) -> Result<&RoleSlot, SlotError> {
        let occurrences = self.occurrences(entity);
        if occurrences == 0 {
            return Err(SlotError::EntityNotInRelation {
                relation: self.relation.clone(),
                entity: entity.to_string(),
            });
        }

        let index = if occurrences == 1 {
            0
        } else {
            index.ok_or_else(|| SlotError::MissingIndex {
                relation: self.relation.clone(),
                entity: entity.to_string(),
                occurrences,
            })?
        };

        self.slots
            .iter()
            .filter(|s| s.entity == entity)
            .nth(index)
            .ok_or_else(|| SlotError::IndexOutOfRange {
                relation: self.relation.clone(),
                entity: entity.to_string(),
                index,
                occurrences,
            })
    }

    /// Iterate slots in relation order.
    pub fn iter(&self) -> impl Iterator<Item = &RoleSlot> {
        self.slots.iter()
    }

    /// Hash-key column per slot, in relation order.
    pub fn foreign_key_names(&self) -> Vec<String> {
        self.slots.iter().map(RoleSlot::hash_key).collect()
    }
}
