//! The mobile agent record.

use ew_behavior::BehaviorRule;
use ew_core::{EntityId, NodeId, StateBuffer, Tick};

/// A mobile agent.
///
/// Invariants: `0 <= energy <= maxEnergy`; `state.len() <= state.capacity()`;
/// `age` never decreases; `node_id` always names an existing node whose
/// membership set contains this id (also while in transit — the entity
/// logically stays at its origin until arrival).
#[derive(Clone, Debug, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub node_id: NodeId,
    pub energy: f64,
    /// Ticks lived; incremented during the maintenance pass.
    pub age: u64,
    /// Base perception radius in hops.
    pub perception_range: u32,
    /// Type index in `[0, maxTypes)`; selects the per-type stability factor.
    pub entity_type: u8,
    /// Body mass; scales move cost and the energy released at death.
    pub mass: f64,
    /// `true` while an edge transit item for this entity is in flight.
    pub in_transit: bool,
    /// While `Some(t)` with `t > now`, the entity is a maintainer: +1
    /// effective perception and the maintainer perception flag.
    pub maintainer_until: Option<Tick>,
    pub state: StateBuffer,
    pub rule: BehaviorRule,
}

impl Entity {
    /// `true` while the maintainer window is open.
    #[inline]
    pub fn is_maintainer(&self, now: Tick) -> bool {
        self.maintainer_until.is_some_and(|until| until > now)
    }

    /// Perception radius including the maintainer bonus.
    #[inline]
    pub fn effective_perception(&self, now: Tick) -> u32 {
        self.perception_range + u32::from(self.is_maintainer(now))
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.energy > 0.0
    }
}
