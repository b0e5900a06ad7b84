//! resolve
//!
//! Key derivation and per-target grouping over a validated context.
//!
//! # Architecture
//!
//! - [`stage`] - Per-source derived, hashed, and hashdiff columns
//! - [`hub`] - Entity grouping
//! - [`link`] - Relation grouping
//! - [`sat`] - Attribute grouping (ordinary and multiactive)
//! - [`columns`] - Insertion-ordered mappings shared by the above
//!
//! Stage derivation and the three groupings are independent of each other;
//! all of them read the same [`GraphContext`] and resolve role slots through
//! the same [`RoleSlots`], so hash-key names agree across artifacts.
//!
//! The result is a [`ResolvedModel`], a read-only value handed to a renderer.
//!
//! [`RoleSlots`]: crate::core::naming::RoleSlots

pub mod columns;
pub mod hub;
pub mod link;
pub mod sat;
pub mod stage;

pub use hub::HubArtifact;
pub use link::LinkArtifact;
pub use sat::SatArtifact;
pub use stage::StageArtifact;

use serde::Serialize;

use crate::core::config::Package;
use crate::core::graph::GraphContext;

/// Everything a renderer needs, fully resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedModel {
    /// Package the artifacts are meant for.
    pub package: Package,
    /// Macro prefix of that package.
    pub prefix: String,
    /// Per-source stage artifacts.
    pub stages: Vec<StageArtifact>,
    /// Hub artifacts, target declaration order.
    pub hubs: Vec<HubArtifact>,
    /// Link artifacts, target declaration order.
    pub links: Vec<LinkArtifact>,
    /// Satellite artifacts, source then first-encounter order.
    pub sats: Vec<SatArtifact>,
}

impl ResolvedModel {
    /// Total number of artifacts.
    pub fn artifact_count(&self) -> usize {
        self.stages.len() + self.hubs.len() + self.links.len() + self.sats.len()
    }

    /// Find a stage by source name.
    pub fn stage(&self, source: &str) -> Option<&StageArtifact> {
        self.stages.iter().find(|s| s.source_name == source)
    }

    /// Find a hub by entity name.
    pub fn hub(&self, entity: &str) -> Option<&HubArtifact> {
        self.hubs.iter().find(|h| h.entity_name == entity)
    }

    /// Find a link by relation name.
    pub fn link(&self, relation: &str) -> Option<&LinkArtifact> {
        self.links.iter().find(|l| l.relation_name == relation)
    }

    /// Find a satellite by artifact name.
    pub fn sat(&self, name: &str) -> Option<&SatArtifact> {
        self.sats.iter().find(|s| s.name == name)
    }
}

/// Resolve every artifact from the context.
///
/// Callers gate on validation first; this function never fails and skips
/// connections it cannot resolve.
pub fn resolve(ctx: &GraphContext<'_>, package: Package) -> ResolvedModel {
    let stages: Vec<StageArtifact> = ctx
        .model()
        .sources
        .iter()
        .filter_map(|source| stage::derive_stage(ctx, source))
        .collect();
    let hubs = hub::group_hubs(ctx);
    let links = link::group_links(ctx);
    let sats = sat::group_sats(ctx);

    log::debug!(
        "resolved {} stages, {} hubs, {} links, {} sats",
        stages.len(),
        hubs.len(),
        links.len(),
        sats.len()
    );

    ResolvedModel {
        package,
        prefix: package.prefix().to_string(),
        stages,
        hubs,
        links,
        sats,
    }
}
