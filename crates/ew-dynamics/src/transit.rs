//! Edge transit: departures onto edge queues and per-tick arrivals.
//!
//! Movement is teleport-at-arrival: a departing entity stays in its origin
//! node's membership set (and keeps its `node_id`) until the arrival tick,
//! then both node sets update at once.  Pre-enqueued items keep their
//! original arrival tick even if edge wear later inflates travel time.

use ew_core::{EdgeId, EntityId, NodeId, ResourceKind, SimulationConfig, Tick, WorldRng};
use ew_entity::{ArtifactStore, EntityStore};
use ew_observe::{Event, EventLog};
use ew_space::{Space, TransitItem, TransitPayload};

use crate::error::ActionError;

/// Enqueue `entity` onto `edge` toward `to`.
///
/// The caller has verified adjacency and paid the move cost; this enforces
/// the strict transit policy (degraded edges refuse departures) and the
/// queue capacity invariant.  Returns the fixed arrival tick.
pub fn enqueue_entity(
    space: &mut Space,
    entities: &mut EntityStore,
    entity_id: EntityId,
    edge_id: EdgeId,
    to: NodeId,
    now: Tick,
) -> Result<Tick, ActionError> {
    let edge = space
        .edge_mut(edge_id)
        .ok_or(ActionError::InvalidTarget("edge missing"))?;
    if edge.is_degraded() {
        return Err(ActionError::PathBlocked("edge durability exhausted"));
    }
    if !edge.has_transit_capacity() {
        return Err(ActionError::CapacityExceeded { limit: edge.capacity });
    }

    let entity = entities
        .get_mut(entity_id)
        .ok_or(ActionError::InvalidTarget("entity missing"))?;
    let from = entity.node_id;
    let arrives_at = now + edge.effective_travel_time().max(1);
    edge.in_transit.push(TransitItem {
        payload: TransitPayload::Entity(entity_id),
        from,
        to,
        departed_at: now,
        arrives_at,
    });
    entity.in_transit = true;
    Ok(arrives_at)
}

/// Enqueue a resource shipment.  Used by drivers and tests, not the tick
/// pipeline itself.
pub fn enqueue_resource(
    space: &mut Space,
    edge_id: EdgeId,
    from: NodeId,
    to: NodeId,
    kind: ResourceKind,
    amount: f64,
    now: Tick,
) -> Result<Tick, ActionError> {
    let edge = space
        .edge_mut(edge_id)
        .ok_or(ActionError::InvalidTarget("edge missing"))?;
    if !edge.has_transit_capacity() {
        return Err(ActionError::CapacityExceeded { limit: edge.capacity });
    }
    let arrives_at = now + edge.effective_travel_time().max(1);
    edge.in_transit.push(TransitItem {
        payload: TransitPayload::Resource { kind, amount },
        from,
        to,
        departed_at: now,
        arrives_at,
    });
    Ok(arrives_at)
}

/// Enqueue a data shipment.  Delivered into the lowest-id artifact at the
/// destination; dropped if the destination has none on arrival.
pub fn enqueue_data(
    space: &mut Space,
    edge_id: EdgeId,
    from: NodeId,
    to: NodeId,
    data: Vec<u8>,
    now: Tick,
) -> Result<Tick, ActionError> {
    let edge = space
        .edge_mut(edge_id)
        .ok_or(ActionError::InvalidTarget("edge missing"))?;
    if !edge.has_transit_capacity() {
        return Err(ActionError::CapacityExceeded { limit: edge.capacity });
    }
    let arrives_at = now + edge.effective_travel_time().max(1);
    edge.in_transit.push(TransitItem {
        payload: TransitPayload::Data(data),
        from,
        to,
        departed_at: now,
        arrives_at,
    });
    Ok(arrives_at)
}

/// Drain every edge queue of items due at `now` and apply their arrivals,
/// in edge-id order then queue order.
pub fn process_arrivals(
    space: &mut Space,
    entities: &mut EntityStore,
    artifacts: &mut ArtifactStore,
    config: &SimulationConfig,
    rng: &mut WorldRng,
    log: &mut EventLog,
    now: Tick,
) {
    let edge_ids: Vec<EdgeId> = space.edge_ids().collect();
    for edge_id in edge_ids {
        let (danger, items) = {
            let edge = space.edge_mut(edge_id).expect("edge exists");
            (edge.danger, std::mem::take(&mut edge.in_transit))
        };

        let mut staying = Vec::new();
        for item in items {
            if item.arrives_at > now {
                staying.push(item);
                continue;
            }
            apply_arrival(item, danger, space, entities, artifacts, config, rng, log, now);
        }
        space.edge_mut(edge_id).expect("edge exists").in_transit = staying;
    }
}

#[allow(clippy::too_many_arguments)]
fn apply_arrival(
    item: TransitItem,
    danger: f64,
    space: &mut Space,
    entities: &mut EntityStore,
    artifacts: &mut ArtifactStore,
    config: &SimulationConfig,
    rng: &mut WorldRng,
    log: &mut EventLog,
    now: Tick,
) {
    match item.payload {
        TransitPayload::Entity(id) => {
            // The traveler may have died in transit; its item is then stale.
            if !entities.contains(id) {
                return;
            }
            if let Some(node) = space.node_mut(item.from) {
                node.entity_ids.remove(&id);
            }
            if let Some(node) = space.node_mut(item.to) {
                node.entity_ids.insert(id);
            }
            let entity = entities.get_mut(id).expect("checked above");
            entity.node_id = item.to;
            entity.in_transit = false;
            if rng.random_with_probability(danger) {
                entity.energy = (entity.energy - config.entropy.danger_damage).max(0.0);
            }
            log.push(Event::EntityMoved { tick: now, entity: id, from: item.from, to: item.to });
        }

        TransitPayload::Resource { kind, amount } => {
            if let Some(node) = space.node_mut(item.to) {
                node.resources.add(kind, amount);
            }
        }

        TransitPayload::Data(bytes) => {
            let target = space
                .node(item.to)
                .and_then(|n| n.artifact_ids.iter().next().copied());
            if let Some(artifact_id) = target {
                if let Some(artifact) = artifacts.get_mut(artifact_id) {
                    artifact.data.extend_from_slice(&bytes);
                    artifact.data.truncate(config.limits.max_artifact_data);
                }
            }
        }
    }
}
