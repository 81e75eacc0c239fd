//! Actions: the scored abstract set and the concretized closed sum.

use ew_core::{ArtifactId, EntityId, NodeId};

/// The abstract actions scored by the weight matrix, in scoring order.
///
/// `ReadArtifact` is deliberately absent: it is only reached by
/// concretization, when a repair lands on an undamaged artifact.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum ActionKind {
    Idle,
    Harvest,
    MoveToResource,
    MoveToBeacon,
    Explore,
    Interact,
    Replicate,
    CreateArtifact,
    RepairArtifact,
}

impl ActionKind {
    /// All scoreable actions, in weight-matrix column order.
    pub const ALL: [ActionKind; crate::ACTION_COUNT] = [
        ActionKind::Idle,
        ActionKind::Harvest,
        ActionKind::MoveToResource,
        ActionKind::MoveToBeacon,
        ActionKind::Explore,
        ActionKind::Interact,
        ActionKind::Replicate,
        ActionKind::CreateArtifact,
        ActionKind::RepairArtifact,
    ];

    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Idle => "idle",
            ActionKind::Harvest => "harvest",
            ActionKind::MoveToResource => "move_to_resource",
            ActionKind::MoveToBeacon => "move_to_beacon",
            ActionKind::Explore => "explore",
            ActionKind::Interact => "interact",
            ActionKind::Replicate => "replicate",
            ActionKind::CreateArtifact => "create_artifact",
            ActionKind::RepairArtifact => "repair_artifact",
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A concretized action with its target, dispatched by the resolver.
///
/// A closed sum — there is no open action hierarchy.  Concretization maps
/// each [`ActionKind`] to one of these, falling back to `Idle` when no valid
/// target exists.
#[derive(Clone, Debug, PartialEq)]
pub enum ResolvedAction {
    Idle,
    Harvest { amount: f64 },
    Move { to: NodeId },
    Interact { with: EntityId },
    Replicate { partner: Option<EntityId> },
    CreateArtifact { data: Vec<u8> },
    RepairArtifact { id: ArtifactId },
    ReadArtifact { id: ArtifactId },
}
