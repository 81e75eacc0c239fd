//! Structural world snapshots with validated restore.
//!
//! A snapshot is everything `(seed, config, tick)` has produced: graph
//! state (including in-flight transit queues), both arenas, the id
//! allocators, and the RNG state words.  Restoring and stepping `k` times
//! yields the same trajectory as the original run reaching the same tick.
//!
//! The event log and stats history are deliberately not captured — they are
//! observations, not state, and drivers window them independently.

use thiserror::Error;

use ew_core::{ArtifactId, EntityId, NodeId, SimulationConfig, Tick, WorldRng};
use ew_entity::{Artifact, Entity};
use ew_space::Space;

use crate::universe::Universe;

/// One structural issue found while validating a snapshot.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationIssue {
    #[error("entity {entity} references unknown node {node}")]
    DanglingEntityNode { entity: EntityId, node: NodeId },

    #[error("entity {entity} missing from membership set of node {node}")]
    EntityNotInNodeSet { entity: EntityId, node: NodeId },

    #[error("node {node} membership lists unknown entity {entity}")]
    UnknownEntityInNodeSet { entity: EntityId, node: NodeId },

    #[error("entity {entity} has negative energy {energy}")]
    NegativeEnergy { entity: EntityId, energy: f64 },

    #[error("entity {entity} state length {len} exceeds capacity {capacity}")]
    StateOverCapacity { entity: EntityId, len: usize, capacity: usize },

    #[error("artifact {artifact} references unknown node {node}")]
    DanglingArtifactNode { artifact: ArtifactId, node: NodeId },

    #[error("artifact {artifact} missing from membership set of node {node}")]
    ArtifactNotInNodeSet { artifact: ArtifactId, node: NodeId },

    #[error("node {node} membership lists unknown artifact {artifact}")]
    UnknownArtifactInNodeSet { artifact: ArtifactId, node: NodeId },

    #[error("artifact {artifact} durability {durability} outside (0, 1]")]
    DurabilityOutOfRange { artifact: ArtifactId, durability: f64 },

    #[error("id allocator behind live ids (next {next}, saw {seen})")]
    AllocatorBehind { next: u32, seen: u32 },
}

/// Why a snapshot could not be loaded.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot failed validation with {} issue(s)", .0.len())]
    Invalid(Vec<ValidationIssue>),

    #[error("snapshot configuration invalid: {0}")]
    Config(#[from] ew_core::ConfigError),

    #[error("snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The serialized world.
#[derive(Clone, Debug, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Snapshot {
    pub tick: Tick,
    pub seed: u32,
    pub rng: WorldRng,
    pub config: SimulationConfig,
    pub space: Space,
    /// Entities in ascending id order.
    pub entities: Vec<Entity>,
    pub next_entity_id: u32,
    /// Artifacts in ascending id order.
    pub artifacts: Vec<Artifact>,
    pub next_artifact_id: u32,
}

impl Snapshot {
    /// Capture the full state of `universe`.
    pub fn capture(universe: &Universe) -> Snapshot {
        let entities: Vec<Entity> = universe
            .entities
            .ids_sorted()
            .into_iter()
            .map(|id| universe.entities.get(id).expect("sorted id is live").clone())
            .collect();
        let artifacts: Vec<Artifact> = universe
            .artifacts
            .ids_sorted()
            .into_iter()
            .map(|id| universe.artifacts.get(id).expect("sorted id is live").clone())
            .collect();

        Snapshot {
            tick: universe.tick,
            seed: universe.config.seed,
            rng: universe.rng.clone(),
            config: universe.config.clone(),
            space: universe.space.clone(),
            entities,
            next_entity_id: universe.entities.next_id(),
            artifacts,
            next_artifact_id: universe.artifacts.next_id(),
        }
    }

    /// Validate and rebuild a universe from this snapshot.
    pub fn restore(self) -> Result<Universe, SnapshotError> {
        self.config.validate()?;
        let issues = self.validate();
        if !issues.is_empty() {
            return Err(SnapshotError::Invalid(issues));
        }
        Ok(Universe::from_parts(
            self.config,
            self.space,
            self.entities,
            self.next_entity_id,
            self.artifacts,
            self.next_artifact_id,
            self.rng,
            self.tick,
        ))
    }

    /// Structural consistency report; empty means loadable.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        let node_count = self.space.node_count();

        for entity in &self.entities {
            if entity.node_id.index() >= node_count {
                issues.push(ValidationIssue::DanglingEntityNode {
                    entity: entity.id,
                    node: entity.node_id,
                });
            } else {
                let node = self.space.node(entity.node_id).expect("bounds checked");
                if !node.entity_ids.contains(&entity.id) {
                    issues.push(ValidationIssue::EntityNotInNodeSet {
                        entity: entity.id,
                        node: entity.node_id,
                    });
                }
            }
            if entity.energy < 0.0 {
                issues.push(ValidationIssue::NegativeEnergy {
                    entity: entity.id,
                    energy: entity.energy,
                });
            }
            if entity.state.len() > entity.state.capacity() {
                issues.push(ValidationIssue::StateOverCapacity {
                    entity: entity.id,
                    len: entity.state.len(),
                    capacity: entity.state.capacity(),
                });
            }
            if entity.id.0 >= self.next_entity_id {
                issues.push(ValidationIssue::AllocatorBehind {
                    next: self.next_entity_id,
                    seen: entity.id.0,
                });
            }
        }

        for artifact in &self.artifacts {
            if artifact.node_id.index() >= node_count {
                issues.push(ValidationIssue::DanglingArtifactNode {
                    artifact: artifact.id,
                    node: artifact.node_id,
                });
            } else {
                let node = self.space.node(artifact.node_id).expect("bounds checked");
                if !node.artifact_ids.contains(&artifact.id) {
                    issues.push(ValidationIssue::ArtifactNotInNodeSet {
                        artifact: artifact.id,
                        node: artifact.node_id,
                    });
                }
            }
            if artifact.durability <= 0.0 || artifact.durability > 1.0 {
                issues.push(ValidationIssue::DurabilityOutOfRange {
                    artifact: artifact.id,
                    durability: artifact.durability,
                });
            }
            if artifact.id.0 >= self.next_artifact_id {
                issues.push(ValidationIssue::AllocatorBehind {
                    next: self.next_artifact_id,
                    seen: artifact.id.0,
                });
            }
        }

        // Membership sets must not name ids absent from the arenas.
        let entity_ids: std::collections::BTreeSet<EntityId> =
            self.entities.iter().map(|e| e.id).collect();
        let artifact_ids: std::collections::BTreeSet<ArtifactId> =
            self.artifacts.iter().map(|a| a.id).collect();
        for node in self.space.nodes() {
            for &id in &node.entity_ids {
                if !entity_ids.contains(&id) {
                    issues.push(ValidationIssue::UnknownEntityInNodeSet {
                        entity: id,
                        node: node.id,
                    });
                }
            }
            for &id in &node.artifact_ids {
                if !artifact_ids.contains(&id) {
                    issues.push(ValidationIssue::UnknownArtifactInNodeSet {
                        artifact: id,
                        node: node.id,
                    });
                }
            }
        }

        issues
    }

    // ── JSON ──────────────────────────────────────────────────────────────

    /// Serialize to JSON; `pretty` for human inspection, compact otherwise.
    pub fn to_json(&self, pretty: bool) -> Result<String, SnapshotError> {
        Ok(if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        })
    }

    /// Parse a snapshot from JSON (validation happens at [`restore`]).
    pub fn from_json(json: &str) -> Result<Snapshot, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }
}
