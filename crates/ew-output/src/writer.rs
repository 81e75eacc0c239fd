//! The `OutputWriter` trait implemented by backend writers.

use crate::{OutputResult, StatsRow};

/// Trait implemented by stats writers (CSV today; the seam exists so batch
/// tooling can add others without touching drivers).
pub trait OutputWriter {
    /// Write one tick's stats row.
    fn write_stats(&mut self, row: &StatsRow) -> OutputResult<()>;

    /// Flush buffers and release the underlying file.
    ///
    /// Drivers may call this on every exit path; once a writer is closed,
    /// further `finish` calls do nothing.
    fn finish(&mut self) -> OutputResult<()>;
}
