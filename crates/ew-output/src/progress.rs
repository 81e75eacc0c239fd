//! Background-run artifacts: progress, log, and result files.
//!
//! A backgrounded run id `X` leaves three files in its output directory:
//! `X-progress.json` (overwritten each report), `X-log.txt` (append-only),
//! and `X-result.json` (written once at the end).  Monitoring tools poll
//! the progress file; verification scripts parse the result file.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use ew_core::SimulationConfig;
use ew_observe::SimulationStats;

use crate::OutputResult;

/// Run lifecycle state reported in the progress file.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Running,
    Completed,
    Error,
}

/// Snapshot of a run's progress, overwritten in place as the run advances.
#[derive(Clone, Debug, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct ProgressFile {
    pub run_id: String,
    pub status: RunStatus,
    pub tick: u64,
    pub max_ticks: u64,
    pub entity_count: usize,
    pub total_energy: f64,
    pub artifact_count: usize,
    pub average_age: f64,
    /// Unix seconds when the run started.
    pub start_time: i64,
    pub elapsed_seconds: f64,
    /// Linear extrapolation from ticks done so far; `None` before tick 1.
    pub estimated_remaining_seconds: Option<f64>,
}

impl ProgressFile {
    /// Build a progress report from the latest stats.
    pub fn from_stats(
        run_id: &str,
        status: RunStatus,
        stats: &SimulationStats,
        max_ticks: u64,
        start_time: i64,
        elapsed_seconds: f64,
    ) -> Self {
        let estimated_remaining_seconds = if stats.tick > 0 && status == RunStatus::Running {
            let per_tick = elapsed_seconds / stats.tick as f64;
            Some(per_tick * max_ticks.saturating_sub(stats.tick) as f64)
        } else {
            None
        };
        ProgressFile {
            run_id: run_id.to_string(),
            status,
            tick: stats.tick,
            max_ticks,
            entity_count: stats.entity_count,
            total_energy: stats.total_energy,
            artifact_count: stats.artifact_count,
            average_age: stats.average_age,
            start_time,
            elapsed_seconds,
            estimated_remaining_seconds,
        }
    }

    /// Overwrite `dir/<run_id>-progress.json`.
    pub fn write_to(&self, dir: &Path) -> OutputResult<PathBuf> {
        let path = dir.join(format!("{}-progress.json", self.run_id));
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, json)?;
        Ok(path)
    }
}

/// Immutable description of what was run.
#[derive(Clone, Debug, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct RunManifest {
    pub run_id: String,
    pub seed: u32,
    pub max_ticks: u64,
    pub config: SimulationConfig,
}

/// Final summary: the manifest, the recorded per-tick stats, and how much
/// observational data the run produced.
#[derive(Clone, Debug, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct RunResultFile {
    pub manifest: RunManifest,
    pub stats: Vec<SimulationStats>,
    pub event_count: usize,
    pub snapshot_count: usize,
}

impl RunResultFile {
    /// Write `dir/<run_id>-result.json`.
    pub fn write_to(&self, dir: &Path) -> OutputResult<PathBuf> {
        let path = dir.join(format!("{}-result.json", self.manifest.run_id));
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, json)?;
        Ok(path)
    }
}

/// Append-only text log for a backgrounded run.
pub struct RunLog {
    file: File,
}

impl RunLog {
    /// Open (creating if needed) `dir/<run_id>-log.txt` for appending.
    pub fn open(dir: &Path, run_id: &str) -> OutputResult<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join(format!("{run_id}-log.txt")))?;
        Ok(RunLog { file })
    }

    /// Append one line.
    pub fn append(&mut self, line: &str) -> OutputResult<()> {
        writeln!(self.file, "{line}")?;
        Ok(())
    }
}
