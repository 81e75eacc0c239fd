//! `ew-output` — run output writers for the rust_ew world simulator.
//!
//! Two concerns live here:
//!
//! | Module       | Output                                                      |
//! |--------------|-------------------------------------------------------------|
//! | [`csv`]      | `stats.csv` — one row per tick via the [`OutputWriter`] trait |
//! | [`progress`] | Background-run artifacts: `*-progress.json`, `*-log.txt`, `*-result.json` |
//!
//! There is no database backend: runs leave behind flat files that batch
//! tooling and verification scripts parse directly.
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut writer = CsvStatsWriter::new(Path::new("output/stats.csv"))?;
//! loop {
//!     universe.step();
//!     writer.write_stats(&StatsRow::from(universe.stats()))?;
//! }
//! writer.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod progress;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvStatsWriter;
pub use error::{OutputError, OutputResult};
pub use progress::{ProgressFile, RunLog, RunManifest, RunResultFile, RunStatus};
pub use row::StatsRow;
pub use writer::OutputWriter;
