//! The tagged event record and its append-only log.

use ew_core::{ArtifactId, EntityId, NodeId, Tick};

/// Interaction classification, carried on [`Event::Interaction`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    Cooperative,
    Competitive,
    Neutral,
}

/// One tagged record in the event log.
///
/// A closed sum: each variant carries exactly the fields its consumers
/// need, so analytic scripts match on tags instead of downcasting.
#[derive(Clone, Debug, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    EntityCreated {
        tick: Tick,
        entity: EntityId,
        node: NodeId,
    },
    EntityDied {
        tick: Tick,
        entity: EntityId,
        node: NodeId,
        /// Energy returned to the node's energy resource.
        released: f64,
    },
    EntityMoved {
        tick: Tick,
        entity: EntityId,
        from: NodeId,
        to: NodeId,
    },
    Interaction {
        tick: Tick,
        initiator: EntityId,
        partner: EntityId,
        outcome: InteractionKind,
        /// `true` when interaction noise perturbed (or flipped) the outcome.
        noise: bool,
    },
    PartnerSelected {
        tick: Tick,
        entity: EntityId,
        partner: EntityId,
    },
    Replication {
        tick: Tick,
        parent: EntityId,
        partner: Option<EntityId>,
        child: EntityId,
    },
    ArtifactCreated {
        tick: Tick,
        artifact: ArtifactId,
        creator: EntityId,
        node: NodeId,
    },
    ArtifactDecayed {
        tick: Tick,
        artifact: ArtifactId,
        node: NodeId,
    },
    Harvest {
        tick: Tick,
        entity: EntityId,
        node: NodeId,
        amount: f64,
    },
    InformationExchange {
        tick: Tick,
        a: EntityId,
        b: EntityId,
        a_to_b: usize,
        b_to_a: usize,
    },
    InformationInheritance {
        tick: Tick,
        child: EntityId,
        parent: EntityId,
        partner: Option<EntityId>,
    },
    InformationAcquisition {
        tick: Tick,
        entity: EntityId,
        artifact: ArtifactId,
        bytes: usize,
    },
    Disaster {
        tick: Tick,
        node: NodeId,
    },
    GuardrailIntervention {
        tick: Tick,
        entity: EntityId,
        reason: String,
    },
}

impl Event {
    /// The tick the event was recorded at.
    pub fn tick(&self) -> Tick {
        match *self {
            Event::EntityCreated { tick, .. }
            | Event::EntityDied { tick, .. }
            | Event::EntityMoved { tick, .. }
            | Event::Interaction { tick, .. }
            | Event::PartnerSelected { tick, .. }
            | Event::Replication { tick, .. }
            | Event::ArtifactCreated { tick, .. }
            | Event::ArtifactDecayed { tick, .. }
            | Event::Harvest { tick, .. }
            | Event::InformationExchange { tick, .. }
            | Event::InformationInheritance { tick, .. }
            | Event::InformationAcquisition { tick, .. }
            | Event::Disaster { tick, .. }
            | Event::GuardrailIntervention { tick, .. } => tick,
        }
    }
}

/// Append-only event buffer, cleared on demand by the outer driver.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Borrow the whole buffer.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Truncate the buffer.  Drivers call this to window counts per tick.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Count events matching `pred` in the tail starting at `from` (used by
    /// the engine to derive per-tick counters without consuming the log).
    pub fn count_since<F: Fn(&Event) -> bool>(&self, from: usize, pred: F) -> u64 {
        self.events[from.min(self.events.len())..]
            .iter()
            .filter(|e| pred(e))
            .count() as u64
    }
}
