//! Deterministic world generation.
//!
//! Given the seeded RNG and the configuration, produces the same world
//! every time: node attributes, a random spanning construction for
//! connectivity, extra edges up to the density target, and the founding
//! entity population.  Draw order is fixed by the loops below — changing it
//! is a reproducibility break.

use ew_behavior::BehaviorRule;
use ew_core::{
    EntityId, NodeId, ResourceKind, ResourceTable, SimulationConfig, StateBuffer, Terrain, Tick,
    WorldRng,
};
use ew_entity::{ArtifactStore, Entity, EntityStore};
use ew_observe::{Event, EventLog};
use ew_space::{EdgeAttrs, NodeAttrs, Space};

/// Mean resource capacity per kind, in [`ResourceKind::ALL`] order.
const CAPACITY_MEANS: [f64; ResourceKind::COUNT] = [120.0, 60.0, 80.0];
const CAPACITY_STD: f64 = 30.0;

/// Bytes of congenital state seeded into every founding entity — the skill
/// vector is live from tick 0.
const SEED_STATE_BYTES: usize = 8;

/// Build the world: nodes, edges, founding entities.
pub fn generate(
    config: &SimulationConfig,
    rng: &mut WorldRng,
    log: &mut EventLog,
) -> (Space, EntityStore, ArtifactStore) {
    let mut space = Space::new();
    let n = config.world.node_count;

    // ── Nodes ─────────────────────────────────────────────────────────────
    for _ in 0..n {
        space.add_node(sample_node(rng));
    }

    // ── Spanning connectivity ─────────────────────────────────────────────
    //
    // Random reached ↔ random unreached until every node is linked in.
    let mut reached = vec![NodeId(0)];
    let mut unreached: Vec<NodeId> = (1..n as u32).map(NodeId).collect();
    while !unreached.is_empty() {
        let a = reached[rng.index(reached.len())];
        let b = unreached.swap_remove(rng.index(unreached.len()));
        space
            .add_edge(a, b, sample_edge(rng))
            .expect("spanning edge joins a fresh node");
        reached.push(b);
    }

    // ── Density fill ──────────────────────────────────────────────────────
    let target = (config.world.edge_density * (n * n.saturating_sub(1)) as f64 / 2.0) as usize;
    let mut attempts = 0usize;
    let max_attempts = target * 20 + 100;
    while space.edge_count() < target && attempts < max_attempts {
        attempts += 1;
        let a = NodeId(rng.index(n) as u32);
        let b = NodeId(rng.index(n) as u32);
        if a == b || space.edge_between(a, b).is_some() {
            continue;
        }
        space.add_edge(a, b, sample_edge(rng)).expect("endpoints validated");
    }

    // ── Founding entities ─────────────────────────────────────────────────
    let mut entities = EntityStore::new();
    for _ in 0..config.world.initial_entity_count {
        let node_id = NodeId(rng.index(n) as u32);
        let energy = rng
            .random_normal(config.limits.initial_energy_mean, config.limits.initial_energy_std)
            .clamp(1.0, config.limits.max_energy);

        let mut state = StateBuffer::new(config.limits.state_capacity);
        let seed_bytes: Vec<u8> =
            (0..SEED_STATE_BYTES).map(|_| rng.random_int(0, 255) as u8).collect();
        state.append(&seed_bytes);

        let entity_type = if config.world.max_types > 1 {
            rng.index(config.world.max_types as usize) as u8
        } else {
            0
        };

        let id: EntityId = entities.allocate_id();
        entities.insert(Entity {
            id,
            node_id,
            energy,
            age: 0,
            perception_range: config.limits.perception_range,
            entity_type,
            mass: 1.0,
            in_transit: false,
            maintainer_until: None,
            state,
            rule: BehaviorRule::baseline(rng, config.behavior.weight_noise_std),
        });
        space
            .node_mut(node_id)
            .expect("sampled node exists")
            .entity_ids
            .insert(id);
        log.push(Event::EntityCreated { tick: Tick::ZERO, entity: id, node: node_id });
    }

    (space, entities, ArtifactStore::new())
}

fn sample_node(rng: &mut WorldRng) -> NodeAttrs {
    let terrain = Terrain::ALL[rng.index(Terrain::ALL.len())];
    let temperature = rng.random_normal(15.0, 20.0).clamp(-50.0, 50.0);
    let disaster_rate = rng.random_normal(0.05, 0.05).clamp(0.0, 1.0);

    let mut capacity = ResourceTable::new();
    let mut initial_resources = ResourceTable::new();
    for (kind, mean) in ResourceKind::ALL.into_iter().zip(CAPACITY_MEANS) {
        let cap = rng.random_normal(mean, CAPACITY_STD).max(0.0);
        capacity.set(kind, cap);
        initial_resources.set(kind, cap * (0.5 + 0.5 * rng.random()));
    }

    NodeAttrs { temperature, terrain, disaster_rate, capacity, initial_resources }
}

fn sample_edge(rng: &mut WorldRng) -> EdgeAttrs {
    EdgeAttrs {
        distance: 1.0 + 9.0 * rng.random(),
        travel_time: rng.random_int(1, 3) as u64,
        capacity: rng.random_int(2, 6) as usize,
        danger: rng.random() * 0.2,
    }
}
