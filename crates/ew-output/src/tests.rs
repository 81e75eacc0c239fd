//! Unit tests for ew-output (file-backed, via tempfile).

use ew_core::SimulationConfig;
use ew_observe::SimulationStats;
use rustc_hash::FxHashMap;

use crate::progress::{ProgressFile, RunLog, RunManifest, RunResultFile, RunStatus};
use crate::writer::OutputWriter;
use crate::{CsvStatsWriter, StatsRow};

fn sample_stats(tick: u64, entity_count: usize) -> SimulationStats {
    SimulationStats {
        tick,
        entity_count,
        total_energy: 123.5,
        artifact_count: 2,
        average_age: 4.25,
        spatial_distribution: FxHashMap::default(),
        interaction_count: 1,
        replication_count: 0,
        death_count: 0,
        information: None,
        knowledge: None,
    }
}

#[cfg(test)]
mod csv_backend {
    use super::*;

    #[test]
    fn writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.csv");
        let mut writer = CsvStatsWriter::new(&path).unwrap();
        writer.write_stats(&StatsRow::from(&sample_stats(1, 10))).unwrap();
        writer.write_stats(&StatsRow::from(&sample_stats(2, 9))).unwrap();
        writer.finish().unwrap();
        writer.finish().unwrap(); // idempotent

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("tick,entity_count,total_energy"));
        assert!(lines[1].starts_with("1,10,123.5"));
        assert!(lines[2].starts_with("2,9,"));
    }
}

#[cfg(test)]
mod artifacts {
    use super::*;

    #[test]
    fn progress_file_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let progress = ProgressFile::from_stats(
            "run-7",
            RunStatus::Running,
            &sample_stats(50, 10),
            200,
            1_700_000_000,
            5.0,
        );
        // 50 ticks in 5 s → 0.1 s/tick → ~15 s remaining.
        let estimate = progress.estimated_remaining_seconds.unwrap();
        assert!((estimate - 15.0).abs() < 1e-9, "got {estimate}");

        let path = progress.write_to(dir.path()).unwrap();
        assert!(path.ends_with("run-7-progress.json"));
        let back: ProgressFile =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, progress);
    }

    #[test]
    fn completed_run_has_no_estimate() {
        let progress = ProgressFile::from_stats(
            "run-8",
            RunStatus::Completed,
            &sample_stats(200, 3),
            200,
            0,
            10.0,
        );
        assert_eq!(progress.estimated_remaining_seconds, None);
    }

    #[test]
    fn result_file_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let result = RunResultFile {
            manifest: RunManifest {
                run_id: "run-9".into(),
                seed: 42,
                max_ticks: 100,
                config: SimulationConfig::default(),
            },
            stats: vec![sample_stats(1, 10), sample_stats(2, 11)],
            event_count: 37,
            snapshot_count: 2,
        };
        let path = result.write_to(dir.path()).unwrap();
        let back: RunResultFile =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn run_log_appends() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut log = RunLog::open(dir.path(), "run-1").unwrap();
            log.append("tick 1 ok").unwrap();
        }
        {
            let mut log = RunLog::open(dir.path(), "run-1").unwrap();
            log.append("tick 2 ok").unwrap();
        }
        let contents =
            std::fs::read_to_string(dir.path().join("run-1-log.txt")).unwrap();
        assert_eq!(contents, "tick 1 ok\ntick 2 ok\n");
    }
}
