//! Artifact lifecycle helpers: decay, the tool factor, and the beacon field.

use ew_core::Tick;
use ew_entity::ArtifactStore;
use ew_observe::{Event, EventLog};
use ew_space::{Node, Space};

use ew_core::ArtifactId;

/// Age every artifact by `rate` durability; remove the ones that reach 0
/// from both the arena and their node's set.  Emits `artifactDecayed` and
/// returns the removed ids in ascending order.
pub fn apply_degradation(
    artifacts: &mut ArtifactStore,
    space: &mut Space,
    rate: f64,
    log: &mut EventLog,
    now: Tick,
) -> Vec<ArtifactId> {
    let mut removed = Vec::new();
    for id in artifacts.ids_sorted() {
        let Some(artifact) = artifacts.get_mut(id) else { continue };
        artifact.durability -= rate;
        if artifact.durability <= 0.0 {
            let node_id = artifact.node_id;
            artifacts.remove(id);
            if let Some(node) = space.node_mut(node_id) {
                node.artifact_ids.remove(&id);
            }
            log.push(Event::ArtifactDecayed { tick: now, artifact: id, node: node_id });
            removed.push(id);
        }
    }
    removed
}

/// Harvest multiplier from co-located artifacts acting as tools.
///
/// Exactly 1.0 when the tool-effect flag is off or the node has no
/// artifacts; otherwise `1 + 0.25 · best durability`.
pub fn tool_factor(node: &Node, artifacts: &ArtifactStore, enabled: bool) -> f64 {
    if !enabled {
        return 1.0;
    }
    let best = node
        .artifact_ids
        .iter()
        .filter_map(|&id| artifacts.get(id))
        .map(|a| a.durability)
        .fold(f64::NAN, f64::max);
    if best.is_nan() {
        1.0
    } else {
        1.0 + 0.25 * best
    }
}

/// Beacon strength of a node, derived from its artifacts:
/// Σ durability · (1 + ln(1 + prestige)).  Zero for artifact-free nodes.
pub fn beacon_strength(node: &Node, artifacts: &ArtifactStore) -> f64 {
    node.artifact_ids
        .iter()
        .filter_map(|&id| artifacts.get(id))
        .map(|a| a.durability * (1.0 + (1.0 + a.prestige).ln()))
        .sum()
}
