//! Pairwise interaction: classification, energy outcome, data exchange.

use ew_core::{SimulationConfig, Tick, WorldRng};
use ew_entity::EntityStore;
use ew_observe::{Event, EventLog, InteractionKind};

use ew_behavior::Gene;

use crate::error::ActionError;
use crate::info;

/// Byte mutation rate applied to exchanged payloads under noise.
const NOISE_MUTATION_RATE: f64 = 0.05;

/// Probability that noise flips a competitive outcome.
const NOISE_FLIP_PROBABILITY: f64 = 0.3;

/// Resolve one interaction between co-located entities.
///
/// The caller has already charged the initiator's interact cost and checked
/// co-location; this function classifies the pair, applies the energy
/// outcome, runs the data exchange, and emits `interaction` (and, when
/// bytes moved, `informationExchange`).
pub fn interact(
    initiator: ew_core::EntityId,
    partner: ew_core::EntityId,
    entities: &mut EntityStore,
    config: &SimulationConfig,
    rng: &mut WorldRng,
    log: &mut EventLog,
    now: Tick,
) -> Result<InteractionKind, ActionError> {
    let (coop_a, aggr_a, energy_a) = match entities.get(initiator) {
        Some(e) => (e.rule.gene(Gene::Cooperation), e.rule.gene(Gene::Aggression), e.energy),
        None => return Err(ActionError::InvalidTarget("initiator missing")),
    };
    let (coop_b, aggr_b, energy_b) = match entities.get(partner) {
        Some(e) => (e.rule.gene(Gene::Cooperation), e.rule.gene(Gene::Aggression), e.energy),
        None => return Err(ActionError::InvalidTarget("partner missing")),
    };

    let noise = rng.random_with_probability(config.interaction.noise_rate);

    let cooperation = (coop_a + coop_b) / 2.0;
    let aggression = (aggr_a + aggr_b) / 2.0;
    let outcome = if cooperation > aggression && cooperation > 0.5 {
        InteractionKind::Cooperative
    } else if aggression > cooperation && aggression > 0.5 {
        InteractionKind::Competitive
    } else {
        InteractionKind::Neutral
    };

    let max_energy = config.limits.max_energy;
    let (delta_a, delta_b) = match outcome {
        InteractionKind::Cooperative => {
            let mut bonus =
                config.interaction.cooperation_bonus * config.interaction.cooperation_efficiency;
            if noise {
                bonus *= rng.random();
            }
            (bonus, bonus)
        }
        InteractionKind::Competitive => {
            let transfer =
                energy_a.min(energy_b) * config.interaction.competition_transfer_rate;
            // Larger energy·aggression wins; ties favor the initiator.
            let mut initiator_wins = energy_a * aggr_a >= energy_b * aggr_b;
            if noise && rng.random_with_probability(NOISE_FLIP_PROBABILITY) {
                initiator_wins = !initiator_wins;
            }
            if initiator_wins {
                (transfer, -transfer)
            } else {
                (-transfer, transfer)
            }
        }
        InteractionKind::Neutral => {
            let delta = rng.random() * 2.0 - 1.0;
            (delta, -delta)
        }
    };

    if let Some(e) = entities.get_mut(initiator) {
        e.energy = (e.energy + delta_a).clamp(0.0, max_energy);
    }
    if let Some(e) = entities.get_mut(partner) {
        e.energy = (e.energy + delta_b).clamp(0.0, max_energy);
    }

    // Data exchange: take/put so both state buffers are mutable at once.
    let mut a = entities.take(initiator).expect("initiator present");
    let b = entities.get_mut(partner).expect("partner present");

    let (mut deep_ab, mut deep_ba) = (0, 0);
    if outcome == InteractionKind::Cooperative {
        // Cooperators additionally share random windows of state.
        (deep_ab, deep_ba) =
            info::exchange(&mut a.state, &mut b.state, config.interaction.exchange_rate, rng);
    }

    // Prefix swap: equal-length prefixes, bit-mutated under noise.
    let cap = config.interaction.max_data_exchange;
    let mut payload_a = a.state.as_slice()[..a.state.len().min(cap)].to_vec();
    let n = payload_a.len().min(b.state.len());
    let mut payload_b = b.state.as_slice()[..n].to_vec();
    if noise {
        rng.mutate_bytes(&mut payload_a, NOISE_MUTATION_RATE);
        rng.mutate_bytes(&mut payload_b, NOISE_MUTATION_RATE);
    }
    b.state.append(&payload_a);
    a.state.append(&payload_b);
    let (a_to_b, b_to_a) = (deep_ab + payload_a.len(), deep_ba + payload_b.len());
    entities.put(a);

    log.push(Event::Interaction { tick: now, initiator, partner, outcome, noise });
    if a_to_b + b_to_a > 0 {
        log.push(Event::InformationExchange { tick: now, a: initiator, b: partner, a_to_b, b_to_a });
    }

    Ok(outcome)
}
