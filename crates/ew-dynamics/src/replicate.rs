//! Replication: solo budding and partnered reproduction.

use ew_core::{EntityId, SimulationConfig, StateBuffer, Tick, WorldRng};
use ew_entity::{Entity, EntityStore};
use ew_observe::{Event, EventLog};
use ew_space::Space;

use ew_behavior::{BehaviorRule, Gene};

use crate::error::ActionError;
use crate::info;

/// Solo replication: the parent pays the full cost and donates
/// `remaining · transfer_rate` to the child.  Behavior and state are
/// inherited from the parent alone.
pub fn solo(
    parent_id: EntityId,
    space: &mut Space,
    entities: &mut EntityStore,
    config: &SimulationConfig,
    rng: &mut WorldRng,
    log: &mut EventLog,
    now: Tick,
) -> Result<EntityId, ActionError> {
    let cost = config.replication.energy_cost;
    let parent = entities
        .get(parent_id)
        .ok_or(ActionError::InvalidTarget("parent missing"))?;
    check_readiness(parent, cost, config)?;

    let (node_id, rule, state, perception_range, entity_type, mass) = (
        parent.node_id,
        parent.rule.clone(),
        parent.state.as_slice().to_vec(),
        parent.perception_range,
        parent.entity_type,
        parent.mass,
    );

    // Pay, then split the remainder.
    let child_energy;
    {
        let parent = entities.get_mut(parent_id).expect("parent present");
        parent.energy -= cost;
        child_energy = (parent.energy * config.replication.energy_transfer_rate)
            .min(config.limits.max_energy);
        parent.energy -= child_energy;
    }

    let child_rule = rule.inherit(rng, config.behavior.mutation_rate);
    let child_state = info::inherit(&state, None, config.behavior.mutation_rate, rng);

    let child_id = spawn_child(
        space,
        entities,
        node_id,
        child_energy,
        child_rule,
        child_state,
        perception_range,
        entity_type,
        mass,
        config,
    );

    log.push(Event::Replication { tick: now, parent: parent_id, partner: None, child: child_id });
    log.push(Event::InformationInheritance {
        tick: now,
        child: child_id,
        parent: parent_id,
        partner: None,
    });
    log.push(Event::EntityCreated { tick: now, entity: child_id, node: node_id });
    Ok(child_id)
}

/// Partnered replication: both parents pay half the cost; donations are
/// boosted by the cooperative bonus; behavior crosses over; state mixes
/// byte-wise; the child's perception range is the larger of the parents'.
pub fn partnered(
    parent_id: EntityId,
    partner_id: EntityId,
    space: &mut Space,
    entities: &mut EntityStore,
    config: &SimulationConfig,
    rng: &mut WorldRng,
    log: &mut EventLog,
    now: Tick,
) -> Result<EntityId, ActionError> {
    let half_cost = config.replication.energy_cost / 2.0;

    let parent = entities
        .get(parent_id)
        .ok_or(ActionError::InvalidTarget("parent missing"))?;
    check_readiness(parent, half_cost, config)?;
    let partner = entities
        .get(partner_id)
        .ok_or(ActionError::InvalidTarget("partner missing"))?;
    if partner.node_id != parent.node_id {
        return Err(ActionError::InvalidTarget("partner not co-located"));
    }
    if partner.energy < half_cost {
        return Err(ActionError::InsufficientEnergy {
            required: half_cost,
            available: partner.energy,
        });
    }

    let node_id = parent.node_id;
    let entity_type = parent.entity_type;
    let mass = parent.mass;
    let perception_range = parent.perception_range.max(partner.perception_range);
    let (rule_a, state_a) = (parent.rule.clone(), parent.state.as_slice().to_vec());
    let (rule_b, state_b) = (partner.rule.clone(), partner.state.as_slice().to_vec());

    // Each parent pays half, then donates from the remainder.
    let donation_rate =
        config.replication.energy_transfer_rate * config.replication.cooperative_bonus / 2.0;
    let mut child_energy = 0.0;
    for &id in &[parent_id, partner_id] {
        let e = entities.get_mut(id).expect("parent present");
        e.energy -= half_cost;
        let donation = e.energy * donation_rate;
        e.energy -= donation;
        child_energy += donation;
    }
    child_energy = child_energy.min(config.limits.max_energy);

    let child_rule = BehaviorRule::crossover(&rule_a, &rule_b, rng, config.behavior.mutation_rate);
    let child_state =
        info::inherit(&state_a, Some(&state_b), config.behavior.mutation_rate, rng);

    let child_id = spawn_child(
        space,
        entities,
        node_id,
        child_energy,
        child_rule,
        child_state,
        perception_range,
        entity_type,
        mass,
        config,
    );

    log.push(Event::PartnerSelected { tick: now, entity: parent_id, partner: partner_id });
    log.push(Event::Replication {
        tick: now,
        parent: parent_id,
        partner: Some(partner_id),
        child: child_id,
    });
    log.push(Event::InformationInheritance {
        tick: now,
        child: child_id,
        parent: parent_id,
        partner: Some(partner_id),
    });
    log.push(Event::EntityCreated { tick: now, entity: child_id, node: node_id });
    Ok(child_id)
}

/// Shared gate: the parent must afford `cost` and sit above its own
/// replication-threshold gene's energy bar.
fn check_readiness(parent: &Entity, cost: f64, config: &SimulationConfig) -> Result<(), ActionError> {
    if parent.energy < cost {
        return Err(ActionError::InsufficientEnergy { required: cost, available: parent.energy });
    }
    let bar = parent.rule.gene(Gene::ReplicationThreshold) * config.limits.max_energy * 0.5;
    if parent.energy < bar {
        return Err(ActionError::InsufficientEnergy { required: bar, available: parent.energy });
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn spawn_child(
    space: &mut Space,
    entities: &mut EntityStore,
    node_id: ew_core::NodeId,
    energy: f64,
    rule: BehaviorRule,
    state_bytes: Vec<u8>,
    perception_range: u32,
    entity_type: u8,
    mass: f64,
    config: &SimulationConfig,
) -> EntityId {
    let id = entities.allocate_id();
    entities.insert(Entity {
        id,
        node_id,
        energy,
        age: 0,
        perception_range,
        entity_type,
        mass,
        in_transit: false,
        maintainer_until: None,
        state: StateBuffer::from_bytes(state_bytes, config.limits.state_capacity),
        rule,
    });
    if let Some(node) = space.node_mut(node_id) {
        node.entity_ids.insert(id);
    }
    id
}
