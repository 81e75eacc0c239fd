//! The stationary artifact record.

use ew_core::{ArtifactId, EntityId, NodeId, Tick};

/// A stationary, degradable data object at a node — the only extrasomatic
/// memory in the world.
///
/// Invariants: `durability ∈ (0, 1]` while tracked (decay to 0 removes the
/// artifact within the same tick); `prestige` only ever increases;
/// `data.len()` never exceeds the configured cap.
#[derive(Clone, Debug, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Artifact {
    pub id: ArtifactId,
    pub node_id: NodeId,
    pub data: Vec<u8>,
    pub durability: f64,
    /// Cumulative maintenance energy invested.  Accounting only.
    pub prestige: f64,
    pub created_at: Tick,
    pub creator: EntityId,
}

impl Artifact {
    #[inline]
    pub fn is_damaged(&self) -> bool {
        self.durability < 1.0
    }
}
