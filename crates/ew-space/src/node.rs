//! Node — one vertex of the spatial graph.

use std::collections::BTreeSet;

use ew_core::{ArtifactId, EntityId, NodeId, ResourceKind, ResourceTable, Terrain};

/// Static attributes sampled at world generation.
#[derive(Clone, Debug, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct NodeAttrs {
    /// Ambient temperature, clamped to [-50, 50] at generation.
    pub temperature: f64,
    pub terrain: Terrain,
    /// Base probability weight of a disaster striking this node.
    pub disaster_rate: f64,
    /// Per-kind resource capacity.
    pub capacity: ResourceTable,
    /// Per-kind starting amounts.
    pub initial_resources: ResourceTable,
}

/// A vertex of the world graph: static attributes plus mutable state.
///
/// Invariant: every id in `entity_ids` names a live entity whose `node_id`
/// is this node; same for `artifact_ids`.  Nodes are created by world
/// generation and never destroyed during a run.
#[derive(Clone, Debug, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub temperature: f64,
    pub terrain: Terrain,
    pub disaster_rate: f64,
    pub capacity: ResourceTable,

    // ── Mutable state ─────────────────────────────────────────────────────
    /// Current per-kind resource amounts.  Each amount stays in
    /// `[0, capacity]` under harvest/regeneration; death releases may push
    /// the energy amount above capacity until regeneration clamps it.
    pub resources: ResourceTable,

    /// Entities currently at this node, in id order.
    pub entity_ids: BTreeSet<EntityId>,

    /// Artifacts currently at this node, in id order.
    pub artifact_ids: BTreeSet<ArtifactId>,

    /// Energy lost to upkeep (and, in strict-conservation mode, dissipation)
    /// accumulated at this node.  Bookkeeping only.
    pub waste_heat: f64,
}

impl Node {
    pub(crate) fn new(id: NodeId, attrs: NodeAttrs) -> Self {
        Node {
            id,
            temperature: attrs.temperature,
            terrain: attrs.terrain,
            disaster_rate: attrs.disaster_rate,
            capacity: attrs.capacity,
            resources: attrs.initial_resources,
            entity_ids: BTreeSet::new(),
            artifact_ids: BTreeSet::new(),
            waste_heat: 0.0,
        }
    }

    #[inline]
    pub fn resource(&self, kind: ResourceKind) -> f64 {
        self.resources.get(kind)
    }

    #[inline]
    pub fn entity_count(&self) -> usize {
        self.entity_ids.len()
    }

    #[inline]
    pub fn artifact_count(&self) -> usize {
        self.artifact_ids.len()
    }
}
