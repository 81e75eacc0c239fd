//! `ew-space` — the spatial graph of the world.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                      |
//! |-----------|---------------------------------------------------------------|
//! | [`node`]  | `Node`, `NodeAttrs` — static attributes + mutable occupancy   |
//! | [`edge`]  | `Edge`, `EdgeAttrs`, `TransitItem`, `TransitPayload`          |
//! | [`graph`] | `Space` — adjacency, edge lookup, BFS                         |
//! | [`error`] | `SpaceError`, `SpaceResult<T>`                                |
//!
//! # Design notes
//!
//! Nodes and edges live in `Vec`s indexed by their ids; adjacency is a
//! per-node list of `(neighbor, edge)` pairs in insertion order, which keeps
//! neighbor iteration deterministic.  Edges are undirected: one `Edge` record
//! serves both directions and appears in both endpoints' adjacency lists.
//!
//! Nodes never own entities or artifacts — they hold ordered id sets whose
//! contents are maintained by the engine, so occupancy queries are
//! deterministic and O(log n).

pub mod edge;
pub mod error;
pub mod graph;
pub mod node;

#[cfg(test)]
mod tests;

pub use edge::{Edge, EdgeAttrs, TransitItem, TransitPayload};
pub use error::{SpaceError, SpaceResult};
pub use graph::Space;
pub use node::{Node, NodeAttrs};
