//! Edge — an undirected link between two nodes, with its transit queue.

use ew_core::{EdgeId, EntityId, NodeId, ResourceKind, Tick};

/// Static edge attributes supplied at creation.
#[derive(Clone, Debug, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct EdgeAttrs {
    /// Abstract length; feeds the distance component of move cost.
    pub distance: f64,
    /// Base travel time in ticks (≥ 1 once enqueued).
    pub travel_time: u64,
    /// Maximum simultaneous in-transit items.
    pub capacity: usize,
    /// Probability of a traveler taking damage on arrival, in [0, 1].
    pub danger: f64,
}

/// What an in-flight [`TransitItem`] carries.
///
/// The tick pipeline itself only ships entities; resource and data shipments
/// are driver/test primitives (`Universe::ship_resource` / `ship_data`).
#[derive(Clone, Debug, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum TransitPayload {
    Entity(EntityId),
    Resource { kind: ResourceKind, amount: f64 },
    Data(Vec<u8>),
}

/// An item in flight along an edge.
///
/// Invariant: `arrives_at >= departed_at + travel_time_at_departure`.  The
/// arrival tick is fixed at enqueue time; later edge wear does not retroact.
#[derive(Clone, Debug, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct TransitItem {
    pub payload: TransitPayload,
    pub from: NodeId,
    pub to: NodeId,
    pub departed_at: Tick,
    pub arrives_at: Tick,
}

/// An undirected link between `a` and `b`.
///
/// Invariant: `in_transit.len() <= capacity`.  Durability may reach 0 — the
/// edge is then degraded (strict transit policy refuses new departures) but
/// it is never removed from the graph.
#[derive(Clone, Debug, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub a: NodeId,
    pub b: NodeId,
    pub distance: f64,
    pub travel_time: u64,
    pub capacity: usize,
    pub danger: f64,
    /// Wear state in [0, 1]; starts at 1.
    pub durability: f64,
    pub in_transit: Vec<TransitItem>,
}

impl Edge {
    pub(crate) fn new(id: EdgeId, a: NodeId, b: NodeId, attrs: EdgeAttrs) -> Self {
        Edge {
            id,
            a,
            b,
            distance: attrs.distance,
            travel_time: attrs.travel_time,
            capacity: attrs.capacity,
            danger: attrs.danger,
            durability: 1.0,
            in_transit: Vec::new(),
        }
    }

    /// The opposite endpoint, or `None` if `n` is not an endpoint.
    #[inline]
    pub fn other_end(&self, n: NodeId) -> Option<NodeId> {
        if n == self.a {
            Some(self.b)
        } else if n == self.b {
            Some(self.a)
        } else {
            None
        }
    }

    /// `true` once wear has consumed the edge entirely.
    #[inline]
    pub fn is_degraded(&self) -> bool {
        self.durability <= 0.0
    }

    /// Travel time after wear inflation: below 0.5 durability the base time
    /// grows proportionally, reaching 2× at durability 0.
    pub fn effective_travel_time(&self) -> u64 {
        let wear = (0.5 - self.durability).max(0.0) * 2.0;
        (self.travel_time as f64 * (1.0 + wear)).ceil() as u64
    }

    #[inline]
    pub fn has_transit_capacity(&self) -> bool {
        self.in_transit.len() < self.capacity
    }
}
