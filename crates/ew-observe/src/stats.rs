//! Per-tick statistics and their recorded history.

use rustc_hash::FxHashMap;

use ew_core::NodeId;

/// Optional information-transfer aggregates.
#[derive(Clone, Debug, PartialEq, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct InformationStats {
    pub exchange_count: u64,
    pub inheritance_count: u64,
    pub acquisition_count: u64,
    /// Distinct 4-byte state prefixes / population — a cheap spread proxy.
    pub diversity: f64,
    pub avg_state_fill: f64,
}

/// Optional knowledge-bonus aggregates.
#[derive(Clone, Debug, PartialEq, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct KnowledgeStats {
    /// Repairs where the similarity bonus exceeded 1.0 this tick.
    pub bonus_applied_count: u64,
    pub repair_count: u64,
    /// Mean state↔artifact similarity across this tick's repairs.
    pub avg_similarity: f64,
}

/// The per-tick statistics snapshot.
#[derive(Clone, Debug, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct SimulationStats {
    pub tick: u64,
    pub entity_count: usize,
    pub total_energy: f64,
    pub artifact_count: usize,
    pub average_age: f64,
    /// Entity count per node, for spatial-concentration analyses.
    pub spatial_distribution: FxHashMap<NodeId, u32>,
    pub interaction_count: u64,
    pub replication_count: u64,
    pub death_count: u64,
    pub information: Option<InformationStats>,
    pub knowledge: Option<KnowledgeStats>,
}

/// Append-only per-tick history.
#[derive(Debug, Default)]
pub struct StatsRecorder {
    history: Vec<SimulationStats>,
}

impl StatsRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, stats: SimulationStats) {
        self.history.push(stats);
    }

    /// The most recent snapshot, if any tick has completed.
    pub fn latest(&self) -> Option<&SimulationStats> {
        self.history.last()
    }

    pub fn history(&self) -> &[SimulationStats] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// The entity-count time series, for the pattern detectors.
    pub fn entity_counts(&self) -> Vec<usize> {
        self.history.iter().map(|s| s.entity_count).collect()
    }
}
