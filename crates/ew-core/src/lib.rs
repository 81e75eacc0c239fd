//! `ew-core` — foundational types for the `rust_ew` world simulator.
//!
//! This crate is a dependency of every other `ew-*` crate.  It intentionally
//! has no `ew-*` dependencies and minimal external ones (only `serde` and
//! `thiserror`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`ids`]     | `EntityId`, `NodeId`, `EdgeId`, `ArtifactId`              |
//! | [`time`]    | `Tick` — the monotonic simulation clock                   |
//! | [`rng`]     | `WorldRng` — the single deterministic generator           |
//! | [`kinds`]   | `Terrain`, `ResourceKind`, `Skill`, `ResourceTable`       |
//! | [`buffer`]  | `StateBuffer` — bounded sliding-window byte buffer        |
//! | [`config`]  | `SimulationConfig` and its sub-structs                    |
//! | [`error`]   | `ConfigError`                                             |

pub mod buffer;
pub mod config;
pub mod error;
pub mod ids;
pub mod kinds;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use buffer::StateBuffer;
pub use config::{
    ArtifactConfig, BehaviorConfig, CostsConfig, EntropyConfig, InteractionConfig, LimitsConfig,
    ReplicationConfig, SimulationConfig, WorldGenConfig,
};
pub use error::ConfigError;
pub use ids::{ArtifactId, EdgeId, EntityId, NodeId};
pub use kinds::{ResourceKind, ResourceTable, Skill, Terrain};
pub use rng::WorldRng;
pub use time::Tick;
