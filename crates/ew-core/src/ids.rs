//! Typed identifiers for world objects.
//!
//! Every id is a `u32` wrapper: cheap to copy, orderable (the per-tick
//! processing order is ascending numeric id, standing in for the source's
//! lexicographic ordering), and usable as a map key.  Entity and artifact
//! ids come from monotonic arena allocators and are never reused within a
//! run; node and edge ids are positions in the spatial graph's storage.

use std::fmt;

/// Define one `u32`-backed id type together with the handful of
/// conversions the arenas, graph, and snapshots need.
macro_rules! world_id {
    ($(#[$doc:meta])* $name:ident, $tag:literal) => {
        $(#[$doc])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[derive(serde::Serialize, serde::Deserialize)]
        pub struct $name(pub u32);

        impl $name {
            /// Placeholder id that no live object ever carries.
            pub const INVALID: $name = $name(u32::MAX);

            /// Position of this id in a dense `Vec`.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// A zeroed default would silently alias object 0, so defaults
            /// point nowhere instead.
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($tag, "{}"), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                u32::try_from(n).map($name)
            }
        }
    };
}

world_id! {
    /// Id of a mobile agent in the entity arena.
    EntityId, "entity#"
}

world_id! {
    /// Index of a node in the spatial graph.
    NodeId, "node#"
}

world_id! {
    /// Index of an undirected edge in the spatial graph.
    EdgeId, "edge#"
}

world_id! {
    /// Id of a stationary artifact in the artifact arena.
    ArtifactId, "artifact#"
}
