//! baseline — single-seed demo run of the rust_ew world simulator.
//!
//! Runs the baseline scenario (30 nodes, 50 founders, artifact culture
//! enabled) for 1,500 ticks, writing the stats CSV and run-artifact JSON
//! that batch tooling consumes, then prints a summary table.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use ew_core::SimulationConfig;
use ew_engine::Universe;
use ew_observe::{clusters, trend, Event};
use ew_output::{
    CsvStatsWriter, OutputWriter, ProgressFile, RunLog, RunManifest, RunResultFile, RunStatus,
    StatsRow,
};

// ── Constants ─────────────────────────────────────────────────────────────────

const RUN_ID: &str = "baseline";
const SEED: u32 = 42;
const MAX_TICKS: u64 = 1_500;
const LOG_EVERY: u64 = 100;
const OUTPUT_DIR: &str = "output/baseline";

fn build_config() -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.seed = SEED;
    config.world.node_count = 30;
    config.world.initial_entity_count = 50;
    config.world.edge_density = 0.3;
    config.resource_regeneration_rate = 0.018;
    config.tool_effect_enabled = true;
    config.knowledge_bonus_enabled = true;
    config.skill_bonus_enabled = true;
    config
}

fn main() -> Result<()> {
    env_logger::init();

    println!("=== baseline — rust_ew world simulator ===");
    println!("Seed: {SEED}  |  Ticks: {MAX_TICKS}");
    println!();

    // 1. Build the universe.
    let config = build_config();
    let mut universe = Universe::new(config.clone())?;
    println!(
        "World: {} nodes, {} edges, {} founding entities",
        universe.space().node_count(),
        universe.space().edge_count(),
        universe.entities().len()
    );
    println!();

    // 2. Set up output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let out_dir = Path::new(OUTPUT_DIR);
    let mut csv = CsvStatsWriter::new(&out_dir.join("stats.csv"))?;
    let mut run_log = RunLog::open(out_dir, RUN_ID)?;
    let start_unix = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0);

    // 3. Run.
    let t0 = Instant::now();
    let mut event_count = 0usize;
    let mut partnered_total = 0usize;
    for _ in 0..MAX_TICKS {
        universe.step();
        csv.write_stats(&StatsRow::from(universe.stats()))?;

        let tick = universe.current_tick().0;
        if tick % LOG_EVERY == 0 {
            let stats = universe.stats();
            run_log.append(&format!(
                "tick {tick}: {} entities, {:.1} energy, {} artifacts",
                stats.entity_count, stats.total_energy, stats.artifact_count
            ))?;
            ProgressFile::from_stats(
                RUN_ID,
                RunStatus::Running,
                stats,
                MAX_TICKS,
                start_unix,
                t0.elapsed().as_secs_f64(),
            )
            .write_to(out_dir)?;
        }

        // Window the event log per tick the way verification scripts do.
        event_count += universe.event_log().len();
        partnered_total += universe
            .event_log()
            .iter()
            .filter(|e| matches!(e, Event::PartnerSelected { .. }))
            .count();
        universe.clear_event_log();

        if universe.is_extinct() {
            log::info!("extinction at tick {tick}");
            break;
        }
    }
    csv.finish()?;
    let elapsed = t0.elapsed();

    // 4. Final artifacts.
    ProgressFile::from_stats(
        RUN_ID,
        RunStatus::Completed,
        universe.stats(),
        MAX_TICKS,
        start_unix,
        elapsed.as_secs_f64(),
    )
    .write_to(out_dir)?;
    RunResultFile {
        manifest: RunManifest {
            run_id: RUN_ID.to_string(),
            seed: SEED,
            max_ticks: MAX_TICKS,
            config,
        },
        stats: universe.stats_history().to_vec(),
        event_count,
        snapshot_count: 0,
    }
    .write_to(out_dir)?;

    // 5. Summary.
    let stats = universe.stats();
    let replications: u64 =
        universe.stats_history().iter().map(|s| s.replication_count).sum();
    let counts: Vec<usize> =
        universe.stats_history().iter().map(|s| s.entity_count).collect();

    println!("Run complete in {:.3} s", elapsed.as_secs_f64());
    println!();
    println!("{:<24} {:>12}", "Final tick", universe.current_tick().0);
    println!("{:<24} {:>12}", "Entities", stats.entity_count);
    println!("{:<24} {:>12.1}", "Total energy", stats.total_energy);
    println!("{:<24} {:>12}", "Artifacts", stats.artifact_count);
    println!("{:<24} {:>12.1}", "Average age", stats.average_age);
    println!("{:<24} {:>12}", "Replications", replications);
    println!("{:<24} {:>12}", "Partnered", partnered_total);
    println!("{:<24} {:>12?}", "Population trend", trend(&counts, 50));
    println!(
        "{:<24} {:>12}",
        "Crowded nodes (≥5)",
        clusters(stats, 5).len()
    );
    println!();
    println!("Artifacts written to {OUTPUT_DIR}/");

    Ok(())
}
