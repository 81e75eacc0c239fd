//! Perception: the noisy, local snapshot an entity decides from.
//!
//! # Noise model
//!
//! With probability `noise_rate` per scalar, the value is multiplied by
//! `1 + Normal(0, 0.1)`.  Booleans and ids are never perturbed.  Every draw
//! comes from the single world RNG, in the fixed order this module reads
//! things: current node (temperature, resources in kind order, prestige,
//! beacon), then neighbors in adjacency order, then co-located entities in
//! id order, then co-located artifacts in id order.  Beacon scans past the
//! immediate neighborhood are read raw — the field is already coarse.

use ew_core::{
    ArtifactId, EntityId, NodeId, ResourceKind, ResourceTable, SimulationConfig, Terrain, Tick,
    WorldRng,
};
use ew_entity::{ArtifactStore, Entity, EntityStore};
use ew_space::Space;

use ew_behavior::{Feature, FeatureVector, FEATURE_COUNT};

use crate::artifact_ops;

/// What an entity sees of one node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeView {
    pub id: NodeId,
    pub temperature: f64,
    pub terrain: Terrain,
    /// Noisy per-kind amounts.
    pub resources: ResourceTable,
    pub entity_count: usize,
    pub artifact_count: usize,
    /// Noisy prestige sum of the node's artifacts.
    pub prestige: f64,
    /// Noisy beacon strength.
    pub beacon: f64,
}

/// What an entity sees of a co-located entity.
#[derive(Clone, Debug, PartialEq)]
pub struct EntityView {
    pub id: EntityId,
    /// Noisy energy.
    pub energy: f64,
    pub age: u64,
    pub maintainer: bool,
}

/// What an entity sees of a co-located artifact.
#[derive(Clone, Debug, PartialEq)]
pub struct ArtifactView {
    pub id: ArtifactId,
    /// Noisy durability.
    pub durability: f64,
}

/// A beacon source within perception range.
#[derive(Clone, Debug, PartialEq)]
pub struct BeaconView {
    pub node: NodeId,
    pub strength: f64,
    pub hops: u32,
}

/// The full local snapshot handed to action selection.
#[derive(Clone, Debug, PartialEq)]
pub struct Perception {
    pub here: NodeView,
    /// Immediate neighbors, in adjacency order.
    pub neighbors: Vec<NodeView>,
    /// Co-located entities (viewer excluded), in id order.
    pub entities: Vec<EntityView>,
    /// Co-located artifacts, in id order.
    pub artifacts: Vec<ArtifactView>,
    /// Beacon sources within the effective perception radius.
    pub beacons: Vec<BeaconView>,
}

/// Multiply by `1 + Normal(0, 0.1)` with probability `noise_rate`.
fn noisy(value: f64, noise_rate: f64, rng: &mut WorldRng) -> f64 {
    if rng.random_with_probability(noise_rate) {
        value * (1.0 + rng.random_normal(0.0, 0.1))
    } else {
        value
    }
}

fn node_view(
    id: NodeId,
    space: &Space,
    artifacts: &ArtifactStore,
    noise_rate: f64,
    rng: &mut WorldRng,
) -> NodeView {
    let node = space.node(id).expect("perceived node exists");
    let mut resources = ResourceTable::new();
    for kind in ResourceKind::ALL {
        resources.set(kind, noisy(node.resource(kind), noise_rate, rng).max(0.0));
    }
    let prestige_raw: f64 = node
        .artifact_ids
        .iter()
        .filter_map(|&a| artifacts.get(a))
        .map(|a| a.prestige)
        .sum();
    NodeView {
        id,
        temperature: node.temperature,
        terrain: node.terrain,
        resources,
        entity_count: node.entity_count(),
        artifact_count: node.artifact_count(),
        prestige: noisy(prestige_raw, noise_rate, rng).max(0.0),
        beacon: noisy(artifact_ops::beacon_strength(node, artifacts), noise_rate, rng).max(0.0),
    }
}

/// Build `viewer`'s perception of the world.
pub fn perceive(
    space: &Space,
    entities: &EntityStore,
    artifacts: &ArtifactStore,
    viewer: &Entity,
    now: Tick,
    config: &SimulationConfig,
    rng: &mut WorldRng,
) -> Perception {
    let noise_rate = config.interaction.noise_rate;
    let here_id = viewer.node_id;
    let here = node_view(here_id, space, artifacts, noise_rate, rng);

    let neighbors: Vec<NodeView> = space
        .neighbors(here_id)
        .iter()
        .map(|&(n, _)| node_view(n, space, artifacts, noise_rate, rng))
        .collect();

    let here_node = space.node(here_id).expect("viewer's node exists");
    let entity_views: Vec<EntityView> = here_node
        .entity_ids
        .iter()
        .filter(|&&id| id != viewer.id)
        .filter_map(|&id| entities.get(id))
        .map(|e| EntityView {
            id: e.id,
            energy: noisy(e.energy, noise_rate, rng).max(0.0),
            age: e.age,
            maintainer: e.is_maintainer(now),
        })
        .collect();

    let artifact_views: Vec<ArtifactView> = here_node
        .artifact_ids
        .iter()
        .filter_map(|&id| artifacts.get(id))
        .map(|a| ArtifactView {
            id: a.id,
            durability: noisy(a.durability, noise_rate, rng).clamp(0.0, 1.0),
        })
        .collect();

    // Beacon scan out to the effective radius; sources are read raw.
    let radius = viewer.effective_perception(now);
    let beacons: Vec<BeaconView> = space
        .bfs_with_depth(here_id, Some(radius))
        .into_iter()
        .filter_map(|(n, hops)| {
            let strength = artifact_ops::beacon_strength(space.node(n)?, artifacts);
            (strength > 0.0).then_some(BeaconView { node: n, strength, hops })
        })
        .collect();

    Perception {
        here,
        neighbors,
        entities: entity_views,
        artifacts: artifact_views,
        beacons,
    }
}

/// Squash an unbounded non-negative value into [0, 1).
#[inline]
fn squash(v: f64) -> f64 {
    v / (1.0 + v)
}

/// Resource level of a node view: energy amount relative to capacity.
fn energy_level(view: &NodeView, space: &Space) -> f64 {
    let cap = space
        .node(view.id)
        .map(|n| n.capacity.get(ResourceKind::Energy))
        .unwrap_or(0.0);
    if cap > 0.0 {
        (view.resources.get(ResourceKind::Energy) / cap).min(1.0)
    } else {
        0.0
    }
}

/// Condense a perception into the 13-slot feature vector.
pub fn features(
    p: &Perception,
    viewer: &Entity,
    space: &Space,
    now: Tick,
    config: &SimulationConfig,
) -> FeatureVector {
    let mut f = [0.0; FEATURE_COUNT];
    f[Feature::SelfEnergy.index()] = (viewer.energy / config.limits.max_energy).clamp(0.0, 1.0);
    f[Feature::NodeResource.index()] = energy_level(&p.here, space);
    f[Feature::MaxNeighborResource.index()] = p
        .neighbors
        .iter()
        .map(|n| energy_level(n, space))
        .fold(0.0, f64::max);
    f[Feature::NearbyEntities.index()] = (p.entities.len() as f64 / 10.0).min(1.0);
    f[Feature::BeaconHere.index()] = squash(p.here.beacon);
    f[Feature::MaxNeighborBeacon.index()] =
        squash(p.neighbors.iter().map(|n| n.beacon).fold(0.0, f64::max));
    f[Feature::DamagedArtifact.index()] =
        if p.artifacts.iter().any(|a| a.durability < 1.0) { 1.0 } else { 0.0 };
    f[Feature::Maintainer.index()] = if viewer.is_maintainer(now) { 1.0 } else { 0.0 };
    f[Feature::StateFill.index()] = viewer.state.fill_rate();
    f[Feature::StateMean.index()] = viewer.state.mean_byte();
    f[Feature::StateFirst.index()] = viewer.state.byte(0).map_or(0.0, |b| b as f64 / 255.0);
    f[Feature::StateLast.index()] = match viewer.state.len() {
        0 => 0.0,
        n => viewer.state.byte(n - 1).map_or(0.0, |b| b as f64 / 255.0),
    };
    f[Feature::Bias.index()] = 1.0;
    f
}
