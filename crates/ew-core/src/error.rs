//! Configuration error type.
//!
//! Sub-crates define their own error enums (`SpaceError`, `ActionError`,
//! `EngineError`, …) and wrap this one where construction-time validation is
//! involved.

use thiserror::Error;

/// A configuration that cannot produce a runnable world.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("world must have at least one node (got 0, with {entities} entities to seed)")]
    NoNodes { entities: usize },

    #[error("{field} must be within {min}..={max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("{field} must be positive")]
    NotPositive { field: &'static str },
}
