//! Engine-level errors.
//!
//! Only two conditions are fatal: a configuration that cannot progress
//! (rejected at construction) and a snapshot that fails validation on load.
//! Everything else inside a tick downgrades or skips (see
//! `ew_dynamics::ActionError`).

use thiserror::Error;

use crate::snapshot::SnapshotError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("configuration rejected: {0}")]
    Config(#[from] ew_core::ConfigError),

    #[error("snapshot rejected: {0}")]
    Snapshot(#[from] SnapshotError),
}
