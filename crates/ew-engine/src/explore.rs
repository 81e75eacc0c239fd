//! Regime exploration: sweep seeds, classify terminal behaviour.
//!
//! Each sweep point is a fully independent world — own RNG, arenas, and
//! config — so the optional `parallel` feature can fan them out over Rayon
//! without sharing anything.  Output order always matches input order.

use ew_core::SimulationConfig;

use crate::universe::Universe;

/// Coarse classification of a run's terminal behaviour.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    /// Population reached zero.
    Extinction,
    /// Final population at least 1.5× the founding count.
    Growth,
    /// Entity count unchanged across the trailing window.
    Static,
    /// Small surviving population with low variance.
    SmallStable,
    /// Everything else: ongoing churn.
    Active,
}

impl Regime {
    pub fn as_str(self) -> &'static str {
        match self {
            Regime::Extinction => "extinction",
            Regime::Growth => "growth",
            Regime::Static => "static",
            Regime::SmallStable => "small-stable",
            Regime::Active => "active",
        }
    }
}

impl std::fmt::Display for Regime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one sweep point.
#[derive(Clone, Debug, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct RegimeOutcome {
    pub seed: u32,
    pub regime: Regime,
    /// Ticks actually run (early-stops at extinction).
    pub ticks: u64,
    pub final_entities: usize,
    pub final_artifacts: usize,
    pub peak_entities: usize,
}

/// Trailing window inspected by the static / small-stable tests.
const CLASSIFY_WINDOW: usize = 50;

/// Population bound for the small-stable regime.
const SMALL_POPULATION: usize = 10;

/// Classify a completed entity-count history.
pub fn classify(history: &[usize], initial: usize) -> Regime {
    let Some(&final_count) = history.last() else {
        return Regime::Static;
    };
    if final_count == 0 {
        return Regime::Extinction;
    }
    if final_count as f64 >= initial as f64 * 1.5 {
        return Regime::Growth;
    }

    let window = &history[history.len().saturating_sub(CLASSIFY_WINDOW)..];
    if window.len() >= 2 && window.iter().all(|&c| c == window[0]) {
        return Regime::Static;
    }

    if final_count <= SMALL_POPULATION {
        let min = window.iter().min().copied().unwrap_or(0);
        let max = window.iter().max().copied().unwrap_or(0);
        if max - min <= 2 {
            return Regime::SmallStable;
        }
    }
    Regime::Active
}

/// Run one world for up to `max_ticks` (early-stopping at extinction) and
/// classify it.
pub fn run_one(config: SimulationConfig, max_ticks: u64) -> RegimeOutcome {
    let seed = config.seed;
    let initial = config.world.initial_entity_count;
    let mut universe = match Universe::new(config) {
        Ok(u) => u,
        Err(_) => {
            // An unrunnable sweep point classifies as extinct at tick 0.
            return RegimeOutcome {
                seed,
                regime: Regime::Extinction,
                ticks: 0,
                final_entities: 0,
                final_artifacts: 0,
                peak_entities: 0,
            };
        }
    };

    let mut ticks = 0;
    while ticks < max_ticks && !universe.is_extinct() {
        universe.step();
        ticks += 1;
    }

    let history: Vec<usize> =
        universe.stats_history().iter().map(|s| s.entity_count).collect();
    RegimeOutcome {
        seed,
        regime: classify(&history, initial),
        ticks,
        final_entities: universe.entities().len(),
        final_artifacts: universe.artifacts().len(),
        peak_entities: history.iter().max().copied().unwrap_or(0),
    }
}

/// Sweep `base` across `seeds`, classifying each outcome.  Worlds are
/// independent; with the `parallel` feature they run on Rayon's pool, and
/// either way results come back in seed order.
pub fn explore(base: &SimulationConfig, seeds: &[u32], max_ticks: u64) -> Vec<RegimeOutcome> {
    let configs: Vec<SimulationConfig> = seeds
        .iter()
        .map(|&seed| {
            let mut config = base.clone();
            config.seed = seed;
            config
        })
        .collect();

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        configs.into_par_iter().map(|c| run_one(c, max_ticks)).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        configs.into_iter().map(|c| run_one(c, max_ticks)).collect()
    }
}
