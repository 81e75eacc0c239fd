//! sweep — regime exploration demo across a seed range.
//!
//! Runs the same configuration over 16 seeds (in parallel — each world is
//! fully independent) and prints one classified row per outcome.

use anyhow::Result;

use ew_core::SimulationConfig;
use ew_engine::explore;

const SEEDS: std::ops::RangeInclusive<u32> = 1..=16;
const MAX_TICKS: u64 = 1_000;

fn main() -> Result<()> {
    env_logger::init();

    let mut base = SimulationConfig::default();
    base.world.node_count = 20;
    base.world.initial_entity_count = 30;
    base.resource_regeneration_rate = 0.02;
    base.knowledge_bonus_enabled = true;

    let seeds: Vec<u32> = SEEDS.collect();
    println!("=== sweep — {} seeds × {MAX_TICKS} ticks ===", seeds.len());
    println!();

    let outcomes = explore(&base, &seeds, MAX_TICKS);

    println!(
        "{:<8} {:<14} {:>8} {:>10} {:>10} {:>8}",
        "Seed", "Regime", "Ticks", "Entities", "Peak", "Artifacts"
    );
    println!("{}", "-".repeat(62));
    for o in &outcomes {
        println!(
            "{:<8} {:<14} {:>8} {:>10} {:>10} {:>8}",
            o.seed, o.regime.to_string(), o.ticks, o.final_entities, o.peak_entities,
            o.final_artifacts
        );
    }

    println!();
    for regime in ["extinction", "growth", "static", "small-stable", "active"] {
        let n = outcomes.iter().filter(|o| o.regime.as_str() == regime).count();
        if n > 0 {
            println!("{n:>3} × {regime}");
        }
    }

    Ok(())
}
