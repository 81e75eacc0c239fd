//! CSV output backend: one `stats.csv` with a row per tick.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, StatsRow};

/// Writes per-tick stats rows to a single CSV file.
///
/// The writer hands its file back on [`finish`](OutputWriter::finish);
/// rows arriving after that point are dropped rather than erroring, so a
/// driver that closes early in one branch cannot crash another.
pub struct CsvStatsWriter {
    /// `None` once the file has been flushed and released.
    inner: Option<Writer<File>>,
}

impl CsvStatsWriter {
    /// Create (or truncate) `path` and write the header row.
    pub fn new(path: &Path) -> OutputResult<Self> {
        let mut stats = Writer::from_path(path)?;
        stats.write_record([
            "tick",
            "entity_count",
            "total_energy",
            "artifact_count",
            "average_age",
            "interaction_count",
            "replication_count",
            "death_count",
        ])?;
        Ok(Self { inner: Some(stats) })
    }
}

impl OutputWriter for CsvStatsWriter {
    fn write_stats(&mut self, row: &StatsRow) -> OutputResult<()> {
        let Some(stats) = self.inner.as_mut() else {
            return Ok(());
        };
        stats.write_record(&[
            row.tick.to_string(),
            row.entity_count.to_string(),
            row.total_energy.to_string(),
            row.artifact_count.to_string(),
            row.average_age.to_string(),
            row.interaction_count.to_string(),
            row.replication_count.to_string(),
            row.death_count.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if let Some(mut stats) = self.inner.take() {
            stats.flush()?;
        }
        Ok(())
    }
}
