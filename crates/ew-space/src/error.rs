//! Error types for ew-space.

use ew_core::NodeId;
use thiserror::Error;

/// Structural graph construction errors.
#[derive(Debug, Error, PartialEq)]
pub enum SpaceError {
    #[error("node {0} does not exist")]
    UnknownNode(NodeId),

    #[error("self-loop on node {0} rejected")]
    SelfLoop(NodeId),

    #[error("edge between {0} and {1} already exists")]
    DuplicateEdge(NodeId, NodeId),
}

/// Alias for `Result<T, SpaceError>`.
pub type SpaceResult<T> = Result<T, SpaceError>;
