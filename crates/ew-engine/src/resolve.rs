//! Action resolution: apply one concretized action to the world.
//!
//! Error policy (the tick never aborts):
//! - `InsufficientEnergy` / `CapacityExceeded` — the action is skipped; no
//!   cost, no event; the entity simply loses its turn.
//! - `InvalidTarget` — downgraded to Idle (idle cost charged) with a
//!   `guardrailIntervention` record for offline diagnosability.
//! - `PathBlocked` — downgraded to Idle silently.
//!
//! After its own action, an actor whose energy reached 0 dies immediately:
//! later entities in the same tick no longer see it.

use ew_behavior::{Gene, ResolvedAction};
use ew_core::{EntityId, ResourceKind, SimulationConfig, Skill, Tick, WorldRng};
use ew_entity::{skill_bonus, Artifact, ArtifactStore, EntityStore};
use ew_observe::{Event, EventLog};
use ew_space::Space;

use ew_dynamics::{artifact_ops, info, interaction, replicate, transit, ActionError};

/// Knowledge bookkeeping from one repair, for the stats aggregator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RepairNote {
    pub similarity: f64,
    pub bonus_applied: bool,
}

/// What resolution reports back to the engine loop.
#[derive(Debug, Default)]
pub struct ResolveOutcome {
    pub repair: Option<RepairNote>,
}

/// Apply `action` for `actor`, including the downgrade policy and the
/// immediate actor-death check.
#[allow(clippy::too_many_arguments)]
pub fn resolve(
    actor: EntityId,
    action: ResolvedAction,
    space: &mut Space,
    entities: &mut EntityStore,
    artifacts: &mut ArtifactStore,
    config: &SimulationConfig,
    rng: &mut WorldRng,
    log: &mut EventLog,
    now: Tick,
) -> ResolveOutcome {
    let mut outcome = ResolveOutcome::default();

    let result = match action {
        ResolvedAction::Idle => charge_idle(actor, entities, config),
        ResolvedAction::Harvest { amount } => {
            harvest(actor, amount, space, entities, artifacts, config, log, now)
        }
        ResolvedAction::Move { to } => do_move(actor, to, space, entities, config, now),
        ResolvedAction::Interact { with } => {
            do_interact(actor, with, entities, config, rng, log, now)
        }
        ResolvedAction::Replicate { partner } => {
            do_replicate(actor, partner, space, entities, config, rng, log, now)
        }
        ResolvedAction::CreateArtifact { data } => {
            create_artifact(actor, data, space, entities, artifacts, config, log, now)
        }
        ResolvedAction::RepairArtifact { id } => {
            match repair_artifact(actor, id, entities, artifacts, config, log, now) {
                Ok(note) => {
                    outcome.repair = Some(note);
                    Ok(())
                }
                Err(e) => Err(e),
            }
        }
        ResolvedAction::ReadArtifact { id } => {
            read_artifact(actor, id, entities, artifacts, config, log, now)
        }
    };

    match result {
        Ok(()) => {}
        Err(ActionError::InvalidTarget(reason)) => {
            let _ = charge_idle(actor, entities, config);
            log.push(Event::GuardrailIntervention {
                tick: now,
                entity: actor,
                reason: reason.to_string(),
            });
        }
        Err(ActionError::PathBlocked(_)) => {
            let _ = charge_idle(actor, entities, config);
        }
        // Skipped outright: the entity keeps its energy and loses the turn.
        Err(ActionError::InsufficientEnergy { .. }) | Err(ActionError::CapacityExceeded { .. }) => {}
    }

    if entities.get(actor).is_some_and(|e| e.energy <= 0.0) {
        kill_entity(actor, space, entities, config, log, now);
    }

    outcome
}

/// Remove a dead entity: out of the arena and its node's set, with its
/// residual energy (plus converted mass) released to the node's energy pool.
pub fn kill_entity(
    id: EntityId,
    space: &mut Space,
    entities: &mut EntityStore,
    config: &SimulationConfig,
    log: &mut EventLog,
    now: Tick,
) {
    let Some(entity) = entities.take(id) else { return };
    let released = entity.energy.max(0.0) + entity.mass * config.limits.mass_conversion_rate;
    if let Some(node) = space.node_mut(entity.node_id) {
        node.entity_ids.remove(&id);
        node.resources.add(ResourceKind::Energy, released);
    }
    log.push(Event::EntityDied { tick: now, entity: id, node: entity.node_id, released });
}

// ── Individual resolvers ──────────────────────────────────────────────────────

fn charge_idle(
    actor: EntityId,
    entities: &mut EntityStore,
    config: &SimulationConfig,
) -> Result<(), ActionError> {
    if let Some(e) = entities.get_mut(actor) {
        e.energy -= config.costs.idle;
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn harvest(
    actor: EntityId,
    amount: f64,
    space: &mut Space,
    entities: &mut EntityStore,
    artifacts: &ArtifactStore,
    config: &SimulationConfig,
    log: &mut EventLog,
    now: Tick,
) -> Result<(), ActionError> {
    let cost = config.costs.harvest;
    let (node_id, energy) = {
        let e = entities.get(actor).ok_or(ActionError::InvalidTarget("actor missing"))?;
        (e.node_id, e.energy)
    };
    if energy < cost {
        return Err(ActionError::InsufficientEnergy { required: cost, available: energy });
    }

    let node = space.node(node_id).ok_or(ActionError::InvalidTarget("node missing"))?;
    let available = node.resource(ResourceKind::Energy);
    let room = config.limits.max_energy - energy;
    let base = amount.min(available).min(room).max(0.0);

    let tool = artifact_ops::tool_factor(node, artifacts, config.tool_effect_enabled);
    let entity = entities.get_mut(actor).expect("checked above");
    let skill = skill_bonus(
        &entity.state,
        Skill::Harvest,
        config.skill_bonus_enabled,
        config.skill_bonus_coefficient,
    );

    // The node loses the base amount; bonuses amplify what the entity
    // banks, still clamped to its headroom (invariant: never above max,
    // never draining the node below zero).
    let gain = (base * tool * skill).min(room);
    entity.energy += gain - cost;
    space
        .node_mut(node_id)
        .expect("checked above")
        .resources
        .add(ResourceKind::Energy, -base);

    if gain > 0.0 {
        log.push(Event::Harvest { tick: now, entity: actor, node: node_id, amount: gain });
    }
    Ok(())
}

fn do_move(
    actor: EntityId,
    to: ew_core::NodeId,
    space: &mut Space,
    entities: &mut EntityStore,
    config: &SimulationConfig,
    now: Tick,
) -> Result<(), ActionError> {
    let (from, energy, mass, move_gene, state_snapshot) = {
        let e = entities.get(actor).ok_or(ActionError::InvalidTarget("actor missing"))?;
        (e.node_id, e.energy, e.mass, e.rule.gene(Gene::MoveSpeed), e.state.clone())
    };

    let edge_id = space
        .edge_between(from, to)
        .ok_or(ActionError::InvalidTarget("not an immediate neighbor"))?;
    let edge = space.edge(edge_id).expect("edge id from lookup");
    if edge.is_degraded() {
        return Err(ActionError::PathBlocked("edge durability exhausted"));
    }
    if !edge.has_transit_capacity() {
        return Err(ActionError::CapacityExceeded { limit: edge.capacity });
    }

    let skill = skill_bonus(
        &state_snapshot,
        Skill::Move,
        config.skill_bonus_enabled,
        config.skill_bonus_coefficient,
    );
    // Quick movers (high gene) travel cheaper; mass scales the whole price.
    let gait = 1.5 - 0.5 * move_gene;
    let cost =
        (config.costs.move_base + config.costs.distance_factor * edge.distance) * mass * gait
            / skill;
    if energy < cost {
        return Err(ActionError::InsufficientEnergy { required: cost, available: energy });
    }

    entities.get_mut(actor).expect("checked above").energy -= cost;
    transit::enqueue_entity(space, entities, actor, edge_id, to, now)?;
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn do_interact(
    actor: EntityId,
    with: EntityId,
    entities: &mut EntityStore,
    config: &SimulationConfig,
    rng: &mut WorldRng,
    log: &mut EventLog,
    now: Tick,
) -> Result<(), ActionError> {
    if with == actor {
        return Err(ActionError::InvalidTarget("cannot interact with self"));
    }
    let (actor_node, energy) = {
        let e = entities.get(actor).ok_or(ActionError::InvalidTarget("actor missing"))?;
        (e.node_id, e.energy)
    };
    let target_node = entities
        .get(with)
        .map(|e| e.node_id)
        .ok_or(ActionError::InvalidTarget("target missing"))?;
    if target_node != actor_node {
        return Err(ActionError::InvalidTarget("target not co-located"));
    }

    let cost = config.costs.interact;
    if energy < cost {
        return Err(ActionError::InsufficientEnergy { required: cost, available: energy });
    }
    entities.get_mut(actor).expect("checked above").energy -= cost;

    interaction::interact(actor, with, entities, config, rng, log, now)?;
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn do_replicate(
    actor: EntityId,
    partner: Option<EntityId>,
    space: &mut Space,
    entities: &mut EntityStore,
    config: &SimulationConfig,
    rng: &mut WorldRng,
    log: &mut EventLog,
    now: Tick,
) -> Result<(), ActionError> {
    if let Some(cap) = config.limits.max_population {
        if entities.len() >= cap {
            log.push(Event::GuardrailIntervention {
                tick: now,
                entity: actor,
                reason: "population guardrail".to_string(),
            });
            return Ok(());
        }
    }

    match partner {
        Some(partner_id) => {
            // A partner chosen from a noisy view may turn out unable to pay;
            // the parent then falls back to budding alone.
            match replicate::partnered(actor, partner_id, space, entities, config, rng, log, now)
            {
                Ok(_) => Ok(()),
                Err(_) => replicate::solo(actor, space, entities, config, rng, log, now).map(|_| ()),
            }
        }
        None => replicate::solo(actor, space, entities, config, rng, log, now).map(|_| ()),
    }
}

#[allow(clippy::too_many_arguments)]
fn create_artifact(
    actor: EntityId,
    data: Vec<u8>,
    space: &mut Space,
    entities: &mut EntityStore,
    artifacts: &mut ArtifactStore,
    config: &SimulationConfig,
    log: &mut EventLog,
    now: Tick,
) -> Result<(), ActionError> {
    if data.len() > config.limits.max_artifact_data {
        return Err(ActionError::CapacityExceeded { limit: config.limits.max_artifact_data });
    }

    let (node_id, energy, create_gene, state_snapshot) = {
        let e = entities.get(actor).ok_or(ActionError::InvalidTarget("actor missing"))?;
        (e.node_id, e.energy, e.rule.gene(Gene::ArtifactCreation), e.state.clone())
    };

    // Reluctant creators (low gene) demand a larger surplus before building.
    let required = config.artifacts.creation_cost * (2.0 - create_gene);
    if energy < required {
        return Err(ActionError::InsufficientEnergy { required, available: energy });
    }

    let skill = skill_bonus(
        &state_snapshot,
        Skill::Create,
        config.skill_bonus_enabled,
        config.skill_bonus_coefficient,
    );
    let cost = config.artifacts.creation_cost / skill;

    entities.get_mut(actor).expect("checked above").energy -= cost;

    let id = artifacts.allocate_id();
    artifacts.insert(Artifact {
        id,
        node_id,
        data,
        durability: 1.0,
        prestige: cost,
        created_at: now,
        creator: actor,
    });
    space
        .node_mut(node_id)
        .expect("actor's node exists")
        .artifact_ids
        .insert(id);
    log.push(Event::ArtifactCreated { tick: now, artifact: id, creator: actor, node: node_id });
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn repair_artifact(
    actor: EntityId,
    artifact_id: ew_core::ArtifactId,
    entities: &mut EntityStore,
    artifacts: &mut ArtifactStore,
    config: &SimulationConfig,
    log: &mut EventLog,
    now: Tick,
) -> Result<RepairNote, ActionError> {
    let (actor_node, energy) = {
        let e = entities.get(actor).ok_or(ActionError::InvalidTarget("actor missing"))?;
        (e.node_id, e.energy)
    };
    let artifact = artifacts
        .get(artifact_id)
        .ok_or(ActionError::InvalidTarget("artifact missing"))?;
    if artifact.node_id != actor_node {
        return Err(ActionError::InvalidTarget("artifact not co-located"));
    }

    let cost = config.costs.repair_artifact;
    if energy < cost {
        return Err(ActionError::InsufficientEnergy { required: cost, available: energy });
    }

    let entity = entities.get_mut(actor).expect("checked above");
    let similarity = info::similarity(entity.state.as_slice(), &artifact.data);
    let knowledge = if config.knowledge_bonus_enabled {
        info::knowledge_bonus(similarity)
    } else {
        1.0
    };
    let skill = skill_bonus(
        &entity.state,
        Skill::Repair,
        config.skill_bonus_enabled,
        config.skill_bonus_coefficient,
    );

    entity.energy -= cost;
    entity.maintainer_until = Some(now + config.limits.maintainer_duration);

    // Repairing is also studying: a fraction of the artifact's data flows
    // into the repairer's state.
    let artifact_data = artifact.data.clone();
    let bytes = info::acquire(&mut entity.state, &artifact_data, config.artifacts.repair_amount);

    let artifact = artifacts.get_mut(artifact_id).expect("checked above");
    artifact.durability =
        (artifact.durability + config.artifacts.repair_amount * knowledge * skill).min(1.0);
    artifact.prestige += cost;

    if bytes > 0 {
        log.push(Event::InformationAcquisition {
            tick: now,
            entity: actor,
            artifact: artifact_id,
            bytes,
        });
    }
    Ok(RepairNote { similarity, bonus_applied: knowledge > 1.0 })
}

#[allow(clippy::too_many_arguments)]
fn read_artifact(
    actor: EntityId,
    artifact_id: ew_core::ArtifactId,
    entities: &mut EntityStore,
    artifacts: &ArtifactStore,
    config: &SimulationConfig,
    log: &mut EventLog,
    now: Tick,
) -> Result<(), ActionError> {
    let (actor_node, energy) = {
        let e = entities.get(actor).ok_or(ActionError::InvalidTarget("actor missing"))?;
        (e.node_id, e.energy)
    };
    let artifact = artifacts
        .get(artifact_id)
        .ok_or(ActionError::InvalidTarget("artifact missing"))?;
    if artifact.node_id != actor_node {
        return Err(ActionError::InvalidTarget("artifact not co-located"));
    }

    let cost = config.costs.read_artifact;
    if energy < cost {
        return Err(ActionError::InsufficientEnergy { required: cost, available: energy });
    }

    let entity = entities.get_mut(actor).expect("checked above");
    entity.energy -= cost;
    let prefix = &artifact.data[..artifact.data.len().min(config.artifacts.read_prefix)];
    entity.state.append(prefix);

    if !prefix.is_empty() {
        log.push(Event::InformationAcquisition {
            tick: now,
            entity: actor,
            artifact: artifact_id,
            bytes: prefix.len(),
        });
    }
    Ok(())
}
