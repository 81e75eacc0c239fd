//! Top-level simulation configuration.
//!
//! Every field has a documented default; applications typically override a
//! handful of fields (seed, world size, regeneration rate, bonus flags) and
//! take the rest as-is.  All sub-structs are `#[serde(default)]` so partial
//! JSON configs deserialize against the defaults.
//!
//! The three bonus flags multiply by exactly 1.0 when off — never by zero —
//! so baseline runs stay comparable when a flag is toggled.

use crate::error::ConfigError;

// ── WorldGenConfig ────────────────────────────────────────────────────────────

/// Parameters of the generated world.
#[derive(Clone, Debug, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct WorldGenConfig {
    /// Number of spatial nodes.  Must be ≥ 1 when entities are seeded.
    pub node_count: usize,

    /// Entities created at tick 0.
    pub initial_entity_count: usize,

    /// Target edge fill as a fraction of the complete graph `N(N−1)/2`.
    /// The spanning construction may already exceed this for tiny worlds.
    pub edge_density: f64,

    /// Number of entity types; per-type stability factors index into
    /// [`EntropyConfig::type_stability`].
    pub max_types: u8,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            node_count: 30,
            initial_entity_count: 50,
            edge_density: 0.3,
            max_types: 1,
        }
    }
}

// ── LimitsConfig ──────────────────────────────────────────────────────────────

/// Hard caps and structural sizes.
#[derive(Clone, Debug, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Upper bound on any entity's energy.
    pub max_energy: f64,

    /// Mean / std-dev of the Normal draw for starting energy (clamped ≥ 1).
    pub initial_energy_mean: f64,
    pub initial_energy_std: f64,

    /// Capacity of every entity's internal state buffer, in bytes.
    pub state_capacity: usize,

    /// Maximum artifact data size, in bytes.
    pub max_artifact_data: usize,

    /// Base perception range, in hops.
    pub perception_range: u32,

    /// Ticks an entity keeps the maintainer flag after repairing an artifact.
    pub maintainer_duration: u64,

    /// Optional population guardrail: replication is blocked (and logged)
    /// while the population is at or above this count.
    pub max_population: Option<usize>,

    /// Energy released per unit of mass when an entity dies.
    pub mass_conversion_rate: f64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_energy: 200.0,
            initial_energy_mean: 100.0,
            initial_energy_std: 20.0,
            state_capacity: 256,
            max_artifact_data: 1024,
            perception_range: 1,
            maintainer_duration: 50,
            max_population: None,
            mass_conversion_rate: 0.5,
        }
    }
}

// ── CostsConfig ───────────────────────────────────────────────────────────────

/// Energy prices of actions, plus the per-tick maintenance drain.
#[derive(Clone, Debug, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CostsConfig {
    pub idle: f64,
    pub move_base: f64,
    /// Per-unit-distance surcharge on movement.
    pub distance_factor: f64,
    pub harvest: f64,
    /// Amount an entity asks for when harvesting, before clamping.
    pub harvest_request: f64,
    pub interact: f64,
    pub create_artifact: f64,
    pub repair_artifact: f64,
    pub read_artifact: f64,
    /// Per-tick upkeep, deducted during the entropy pass and credited to the
    /// node as waste heat.
    pub maintenance: f64,
}

impl Default for CostsConfig {
    fn default() -> Self {
        Self {
            idle: 0.1,
            move_base: 1.0,
            distance_factor: 0.1,
            harvest: 0.5,
            harvest_request: 10.0,
            interact: 0.2,
            create_artifact: 15.0,
            repair_artifact: 3.0,
            read_artifact: 0.1,
            maintenance: 0.3,
        }
    }
}

// ── BehaviorConfig ────────────────────────────────────────────────────────────

/// Action-selection and inheritance parameters.
#[derive(Clone, Debug, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Softmax temperature.  Each entity scales this by its exploration gene.
    pub temperature: f64,

    /// Per-gene mutation probability during inheritance, and the bit-flip
    /// fraction for inherited state.
    pub mutation_rate: f64,

    /// Std-dev of the Gaussian noise added to baseline action weights at
    /// world generation.
    pub weight_noise_std: f64,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            mutation_rate: 0.05,
            weight_noise_std: 0.1,
        }
    }
}

// ── InteractionConfig ─────────────────────────────────────────────────────────

/// Pairwise interaction parameters.
#[derive(Clone, Debug, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Probability that an interaction (and each perceived scalar) is noisy.
    pub noise_rate: f64,

    /// Flat gain to both parties of a cooperative interaction, before the
    /// efficiency multiplier.
    pub cooperation_bonus: f64,
    pub cooperation_efficiency: f64,

    /// Fraction of `min(E_a, E_b)` moved by a competitive interaction.
    pub competition_transfer_rate: f64,

    /// Cap on the prefix swapped during the data-exchange step, in bytes.
    pub max_data_exchange: usize,

    /// Window fraction used by the deep Exchange primitive between
    /// cooperators.
    pub exchange_rate: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            noise_rate: 0.1,
            cooperation_bonus: 2.0,
            cooperation_efficiency: 0.5,
            competition_transfer_rate: 0.1,
            max_data_exchange: 32,
            exchange_rate: 0.25,
        }
    }
}

// ── ReplicationConfig ─────────────────────────────────────────────────────────

/// Reproduction parameters.
#[derive(Clone, Debug, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ReplicationConfig {
    /// Up-front energy price of replicating (half each for partners).
    pub energy_cost: f64,

    /// Fraction of the parent's remaining energy donated to the child.
    pub energy_transfer_rate: f64,

    /// Donation multiplier for partnered replication.
    pub cooperative_bonus: f64,
}

impl Default for ReplicationConfig {
    fn default() -> Self {
        Self {
            energy_cost: 30.0,
            energy_transfer_rate: 0.5,
            cooperative_bonus: 1.2,
        }
    }
}

// ── ArtifactConfig ────────────────────────────────────────────────────────────

/// Artifact lifecycle parameters.
#[derive(Clone, Debug, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ArtifactConfig {
    /// Base energy consumed by creation (becomes the initial prestige).
    pub creation_cost: f64,

    /// Base durability restored per repair, before bonuses.
    pub repair_amount: f64,

    /// Durability lost per tick.
    pub degradation_rate: f64,

    /// Bytes appended to the reader's state by a cheap read.
    pub read_prefix: usize,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            creation_cost: 15.0,
            repair_amount: 0.15,
            degradation_rate: 0.005,
            read_prefix: 32,
        }
    }
}

// ── EntropyConfig ─────────────────────────────────────────────────────────────

/// Decay, wear, dissipation, and disaster parameters.
#[derive(Clone, Debug, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EntropyConfig {
    /// Per-entity probability of a random state-byte nudge each tick.
    pub entity_degradation_rate: f64,

    /// Durability lost by every edge each tick.
    pub edge_degradation_rate: f64,

    /// Per-node, per-kind probability of resource dissipation each tick;
    /// doubles as the dissipated fraction.
    pub resource_dissipation_rate: f64,

    /// Global multiplier on each node's disaster rate.
    pub disaster_scale: f64,

    /// Energy damage to every entity present when a disaster strikes.
    pub disaster_damage: f64,

    /// Energy damage on arrival when an edge's danger roll comes up.
    pub danger_damage: f64,

    /// Diagnostic mode: dissipated resources accrue to node waste heat
    /// instead of leaving the ledger, so conservation tests can close the
    /// books.  The default is the open-system relaxation — resources leak.
    pub strict_conservation: bool,

    /// Per-entity-type maintenance multipliers; types beyond the end of the
    /// list use 1.0.
    pub type_stability: Vec<f64>,
}

impl Default for EntropyConfig {
    fn default() -> Self {
        Self {
            entity_degradation_rate: 0.01,
            edge_degradation_rate: 0.0005,
            resource_dissipation_rate: 0.001,
            disaster_scale: 0.01,
            disaster_damage: 5.0,
            danger_damage: 1.0,
            strict_conservation: false,
            type_stability: Vec::new(),
        }
    }
}

// ── SimulationConfig ──────────────────────────────────────────────────────────

/// Everything a run needs besides the tick budget (which the caller bounds
/// by deciding how many times to call `step`).
#[derive(Clone, Debug, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Master seed.  The same seed and config always produce identical runs.
    pub seed: u32,

    /// Per-tick regeneration rate of the energy resource toward capacity.
    pub resource_regeneration_rate: f64,

    /// Optional regeneration rate for the non-energy kinds.
    pub secondary_regeneration_rate: Option<f64>,

    /// Artifacts at a node amplify harvesting there.
    pub tool_effect_enabled: bool,

    /// State↔artifact similarity amplifies repair.
    pub knowledge_bonus_enabled: bool,

    /// State-derived skills amplify action efficiency.
    pub skill_bonus_enabled: bool,
    pub skill_bonus_coefficient: f64,

    pub world: WorldGenConfig,
    pub limits: LimitsConfig,
    pub costs: CostsConfig,
    pub behavior: BehaviorConfig,
    pub interaction: InteractionConfig,
    pub replication: ReplicationConfig,
    pub artifacts: ArtifactConfig,
    pub entropy: EntropyConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            resource_regeneration_rate: 0.018,
            secondary_regeneration_rate: None,
            tool_effect_enabled: false,
            knowledge_bonus_enabled: false,
            skill_bonus_enabled: false,
            skill_bonus_coefficient: 1.0,
            world: WorldGenConfig::default(),
            limits: LimitsConfig::default(),
            costs: CostsConfig::default(),
            behavior: BehaviorConfig::default(),
            interaction: InteractionConfig::default(),
            replication: ReplicationConfig::default(),
            artifacts: ArtifactConfig::default(),
            entropy: EntropyConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Reject configurations that make progress impossible.
    ///
    /// Called by the universe constructor; callers building configs by hand
    /// may also call it directly for early feedback.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world.node_count == 0 {
            return Err(ConfigError::NoNodes {
                entities: self.world.initial_entity_count,
            });
        }
        check_unit("edge_density", self.world.edge_density)?;
        check_unit("resource_regeneration_rate", self.resource_regeneration_rate)?;
        if let Some(r) = self.secondary_regeneration_rate {
            check_unit("secondary_regeneration_rate", r)?;
        }
        check_unit("mutation_rate", self.behavior.mutation_rate)?;
        check_unit("noise_rate", self.interaction.noise_rate)?;
        check_unit("energy_transfer_rate", self.replication.energy_transfer_rate)?;
        check_unit("competition_transfer_rate", self.interaction.competition_transfer_rate)?;
        check_unit("resource_dissipation_rate", self.entropy.resource_dissipation_rate)?;
        check_positive("max_energy", self.limits.max_energy)?;
        check_positive("temperature", self.behavior.temperature)?;
        if self.limits.state_capacity == 0 {
            return Err(ConfigError::NotPositive { field: "state_capacity" });
        }
        if self.limits.max_artifact_data == 0 {
            return Err(ConfigError::NotPositive { field: "max_artifact_data" });
        }
        Ok(())
    }
}

fn check_unit(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, min: 0.0, max: 1.0, value })
    }
}

fn check_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field })
    }
}
