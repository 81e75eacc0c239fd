//! `ew-dynamics` — the per-tick world dynamics.
//!
//! One module per subsystem of the pipeline; the engine crate sequences
//! them.  Every function takes the stores it mutates, the single world RNG,
//! the configuration, and the event log, so all side effects are explicit
//! parameters and the call order fully determines the draw order.
//!
//! | Module           | Subsystem                                           |
//! |------------------|-----------------------------------------------------|
//! | [`perception`]   | Noisy local views + the 13-slot feature vector      |
//! | [`decide`]       | Softmax sampling + target concretization            |
//! | [`interaction`]  | Cooperative / competitive / neutral encounters      |
//! | [`replicate`]    | Solo and partnered reproduction                     |
//! | [`info`]         | Exchange / inherit / acquire + similarity algebra   |
//! | [`artifact_ops`] | Decay, tool factor, beacon field                    |
//! | [`entropy`]      | State noise, maintenance, wear, dissipation         |
//! | [`regen`]        | Resource regeneration toward capacity               |
//! | [`transit`]      | Edge queues: departures and arrivals                |
//! | [`error`]        | `ActionError` — structured per-action failures      |

pub mod artifact_ops;
pub mod decide;
pub mod entropy;
pub mod error;
pub mod info;
pub mod interaction;
pub mod perception;
pub mod regen;
pub mod replicate;
pub mod transit;


pub use decide::decide;
pub use error::ActionError;
pub use perception::{ArtifactView, BeaconView, EntityView, NodeView, Perception};
