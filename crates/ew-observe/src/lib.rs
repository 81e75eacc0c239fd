//! `ew-observe` — the observation boundary of the engine.
//!
//! # Crate layout
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`event`]    | The closed `Event` sum and the append-only `EventLog` |
//! | [`stats`]    | `SimulationStats` + `StatsRecorder` history           |
//! | [`patterns`] | Cluster / periodicity / trend detectors               |
//!
//! The event log is the stable boundary between the engine and every
//! analytic consumer: resolvers append tagged records, drivers read and
//! clear the buffer between ticks.  No in-process observer registration
//! exists — scripts match on tags after the fact.

pub mod event;
pub mod patterns;
pub mod stats;


pub use event::{Event, EventLog, InteractionKind};
pub use patterns::{clusters, dominant_period, trend, Trend};
pub use stats::{InformationStats, KnowledgeStats, SimulationStats, StatsRecorder};
