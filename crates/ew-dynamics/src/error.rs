//! Structured per-action failures.
//!
//! None of these abort a tick.  The resolver downgrades `InvalidTarget` and
//! `PathBlocked` to Idle (the former with a `guardrailIntervention` record),
//! and skips the action outright on `InsufficientEnergy` and
//! `CapacityExceeded` — the entity simply loses its turn.

use thiserror::Error;

/// Why a resolved action could not be applied.
#[derive(Debug, Error, PartialEq)]
pub enum ActionError {
    #[error("insufficient energy: need {required:.2}, have {available:.2}")]
    InsufficientEnergy { required: f64, available: f64 },

    #[error("invalid target: {0}")]
    InvalidTarget(&'static str),

    #[error("capacity exceeded (limit {limit})")]
    CapacityExceeded { limit: usize },

    #[error("path blocked: {0}")]
    PathBlocked(&'static str),
}
