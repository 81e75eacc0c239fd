//! `ew-behavior` — the per-entity decision model.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`features`] | The 13-slot feature vector layout                           |
//! | [`action`]   | `ActionKind` (scored set) and `ResolvedAction` (closed sum) |
//! | [`rule`]     | `BehaviorRule` — genes + weights, softmax, inheritance      |
//!
//! # Design notes
//!
//! A `BehaviorRule` is per-entity *state*, not a pluggable strategy: it is
//! inherited, crossed over, and mutated by replication, so it is a value
//! type carried by every entity rather than a trait object.  Scoring is one
//! matrix–vector product; sampling is a temperature softmax inverted through
//! the world RNG, so two runs with the same seed pick identical actions.

pub mod action;
pub mod features;
pub mod rule;

#[cfg(test)]
mod tests;

pub use action::{ActionKind, ResolvedAction};
pub use features::{Feature, FeatureVector, ACTION_COUNT, FEATURE_COUNT};
pub use rule::{BehaviorRule, Gene, GENE_COUNT};
