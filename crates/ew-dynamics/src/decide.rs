//! Action selection: score, sample, then concretize onto a target.
//!
//! Concretization is where abstract intent meets the local situation.  Any
//! abstract action without a valid target falls back to Idle; a repair aimed
//! at an undamaged artifact downgrades to the cheap read.

use ew_core::{ResourceKind, SimulationConfig, Tick, WorldRng};
use ew_entity::Entity;
use ew_space::Space;

use ew_behavior::{ActionKind, Gene, ResolvedAction};

use crate::perception::{self, Perception};

/// Pick and concretize one action for `viewer`.
///
/// Returns the abstract kind alongside the concretized action so callers
/// can attribute fallbacks (an `Explore` that became `Idle` still counts as
/// an explore attempt for diagnostics).
pub fn decide(
    viewer: &Entity,
    p: &Perception,
    space: &Space,
    now: Tick,
    config: &SimulationConfig,
    rng: &mut WorldRng,
) -> (ActionKind, ResolvedAction) {
    let features = perception::features(p, viewer, space, now, config);
    let scores = viewer.rule.scores(&features);

    // Exploration gene widens or narrows this entity's softmax.
    let temperature =
        config.behavior.temperature * (0.75 + 0.5 * viewer.rule.gene(Gene::Exploration));
    let kind = viewer.rule.sample_action(&scores, temperature, rng);

    (kind, concretize(kind, viewer, p, config, rng))
}

fn concretize(
    kind: ActionKind,
    viewer: &Entity,
    p: &Perception,
    config: &SimulationConfig,
    rng: &mut WorldRng,
) -> ResolvedAction {
    match kind {
        ActionKind::Idle => ResolvedAction::Idle,

        ActionKind::Harvest => {
            // The hunger gene scales appetite.
            let amount =
                config.costs.harvest_request * (0.5 + viewer.rule.gene(Gene::Hunger));
            ResolvedAction::Harvest { amount }
        }

        ActionKind::MoveToResource => {
            // Highest observed energy amount; ties break to the lowest node id.
            let best = p.neighbors.iter().max_by(|a, b| {
                let ra = a.resources.get(ResourceKind::Energy);
                let rb = b.resources.get(ResourceKind::Energy);
                ra.partial_cmp(&rb)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(b.id.cmp(&a.id))
            });
            match best {
                Some(view) => ResolvedAction::Move { to: view.id },
                None => ResolvedAction::Idle,
            }
        }

        ActionKind::MoveToBeacon => {
            let best = p
                .neighbors
                .iter()
                .filter(|n| n.beacon > 0.0)
                .max_by(|a, b| {
                    a.beacon
                        .partial_cmp(&b.beacon)
                        .unwrap_or(std::cmp::Ordering::Equal)
                        .then(b.id.cmp(&a.id))
                });
            match best {
                Some(view) => ResolvedAction::Move { to: view.id },
                None => ResolvedAction::Idle,
            }
        }

        ActionKind::Explore => {
            if p.neighbors.is_empty() {
                ResolvedAction::Idle
            } else {
                let i = rng.index(p.neighbors.len());
                ResolvedAction::Move { to: p.neighbors[i].id }
            }
        }

        ActionKind::Interact => {
            if p.entities.is_empty() {
                ResolvedAction::Idle
            } else {
                let i = rng.index(p.entities.len());
                ResolvedAction::Interact { with: p.entities[i].id }
            }
        }

        ActionKind::Replicate => {
            // Partner: richest co-located entity able to pay its half, but
            // only for sociable entities — loners reproduce solo.
            let half_cost = config.replication.energy_cost / 2.0;
            let partner = if viewer.rule.gene(Gene::Sociality) > 0.4 {
                p.entities
                    .iter()
                    .filter(|e| e.energy >= half_cost)
                    .max_by(|a, b| {
                        a.energy
                            .partial_cmp(&b.energy)
                            .unwrap_or(std::cmp::Ordering::Equal)
                            .then(b.id.cmp(&a.id))
                    })
                    .map(|e| e.id)
            } else {
                None
            };
            ResolvedAction::Replicate { partner }
        }

        ActionKind::CreateArtifact => {
            let mut data = viewer.state.as_slice().to_vec();
            data.truncate(config.limits.max_artifact_data);
            ResolvedAction::CreateArtifact { data }
        }

        ActionKind::RepairArtifact => {
            // Lowest durability first; ties break to the lowest artifact id.
            let worst = p.artifacts.iter().min_by(|a, b| {
                a.durability
                    .partial_cmp(&b.durability)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.id.cmp(&b.id))
            });
            match worst {
                None => ResolvedAction::Idle,
                Some(view) if view.durability >= 1.0 => {
                    ResolvedAction::ReadArtifact { id: view.id }
                }
                Some(view) => ResolvedAction::RepairArtifact { id: view.id },
            }
        }
    }
}
