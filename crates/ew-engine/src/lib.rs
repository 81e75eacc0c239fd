//! `ew-engine` — the universe and its tick pipeline.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`universe`] | `Universe` — owns all state, runs the seven-phase pipeline |
//! | [`genesis`]  | Deterministic world generation from seed + config          |
//! | [`resolve`]  | Per-action resolvers and the error-downgrade policy        |
//! | [`snapshot`] | Structural serialization + validated restore               |
//! | [`explore`]  | Seed sweeps classified into coarse regimes                 |
//! | [`error`]    | `EngineError`                                              |
//!
//! # The tick contract
//!
//! One [`Universe::step`] executes, exactly in order: transit arrivals →
//! per-entity perceive/score/sample/resolve in ascending id order → death
//! sweep → entropy (with a second sweep) → regeneration → tick advance →
//! stats recording.  All randomness flows through the one world RNG in that
//! order, so `(seed, config, tick count) → state` is a pure function.

pub mod error;
pub mod explore;
pub mod genesis;
pub mod resolve;
pub mod snapshot;
pub mod universe;

#[cfg(test)]
mod tests;

pub use error::EngineError;
pub use explore::{classify, explore, Regime, RegimeOutcome};
pub use snapshot::{Snapshot, SnapshotError, ValidationIssue};
pub use universe::Universe;
