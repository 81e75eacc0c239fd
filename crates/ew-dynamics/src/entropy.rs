//! The entropy pass: state noise, maintenance, decay, wear, dissipation,
//! and disasters.
//!
//! Runs once per tick after action resolution, in the fixed order below.
//! Every probabilistic step iterates in id order so the RNG draw sequence
//! is a pure function of world state.

use log::debug;

use ew_core::{ResourceKind, SimulationConfig, Tick, WorldRng};
use ew_entity::{ArtifactStore, EntityStore};
use ew_observe::{Event, EventLog};
use ew_space::Space;

use crate::artifact_ops;

/// Maximum magnitude of a state-byte nudge.
const STATE_NUDGE_RANGE: i64 = 16;

/// Apply the full entropy pass for one tick.
pub fn apply(
    space: &mut Space,
    entities: &mut EntityStore,
    artifacts: &mut ArtifactStore,
    config: &SimulationConfig,
    rng: &mut WorldRng,
    log: &mut EventLog,
    now: Tick,
) {
    let ids = entities.ids_sorted();

    // 1. State-bit noise: a random byte takes a small signed nudge.
    for &id in &ids {
        if !rng.random_with_probability(config.entropy.entity_degradation_rate) {
            continue;
        }
        let Some(entity) = entities.get_mut(id) else { continue };
        if entity.state.is_empty() {
            continue;
        }
        let index = rng.index(entity.state.len());
        let delta = rng.random_int(-STATE_NUDGE_RANGE, STATE_NUDGE_RANGE);
        let bytes = entity.state.as_mut_slice();
        bytes[index] = (bytes[index] as i64 + delta).clamp(0, 255) as u8;
    }

    // 2. Maintenance: upkeep drains to the node as waste heat; age advances.
    for &id in &ids {
        let Some(entity) = entities.get_mut(id) else { continue };
        let stability = config
            .entropy
            .type_stability
            .get(entity.entity_type as usize)
            .copied()
            .unwrap_or(1.0);
        let upkeep = config.costs.maintenance * stability;
        entity.energy -= upkeep;
        entity.age += 1;
        let node_id = entity.node_id;
        if let Some(node) = space.node_mut(node_id) {
            node.waste_heat += upkeep;
        }
    }

    // 3. Artifact decay.
    artifact_ops::apply_degradation(artifacts, space, config.artifacts.degradation_rate, log, now);

    // 4. Edge wear.
    for edge_id in 0..space.edge_count() {
        let edge = space.edge_mut(ew_core::EdgeId(edge_id as u32)).expect("edge exists");
        edge.durability = (edge.durability - config.entropy.edge_degradation_rate).max(0.0);
    }

    // 5. Resource dissipation — the open-system leak.  In strict-
    //    conservation mode the leaked amount lands in node waste heat.
    let rate = config.entropy.resource_dissipation_rate;
    for node_id in space.node_ids().collect::<Vec<_>>() {
        for kind in ResourceKind::ALL {
            if !rng.random_with_probability(rate) {
                continue;
            }
            let node = space.node_mut(node_id).expect("node exists");
            let lost = node.resource(kind) * rate;
            node.resources.add(kind, -lost);
            if config.entropy.strict_conservation {
                node.waste_heat += lost;
            }
        }
    }

    // 6. Disasters: rare node-scale destruction scaled by the node's own
    //    disaster rate.
    for node_id in space.node_ids().collect::<Vec<_>>() {
        let p = space.node(node_id).expect("node exists").disaster_rate
            * config.entropy.disaster_scale;
        if !rng.random_with_probability(p) {
            continue;
        }
        let victims: Vec<ew_core::EntityId> = {
            let node = space.node_mut(node_id).expect("node exists");
            for kind in ResourceKind::ALL {
                let lost = node.resource(kind) * 0.5;
                node.resources.add(kind, -lost);
                if config.entropy.strict_conservation {
                    node.waste_heat += lost;
                }
            }
            node.entity_ids.iter().copied().collect()
        };
        for victim in victims {
            if let Some(entity) = entities.get_mut(victim) {
                entity.energy -= config.entropy.disaster_damage;
            }
        }
        debug!("disaster at {node_id} on tick {now}");
        log.push(Event::Disaster { tick: now, node: node_id });
    }
}
