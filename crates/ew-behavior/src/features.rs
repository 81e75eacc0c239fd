//! The feature vector consumed by action scoring.
//!
//! Perception condenses its noisy local view into exactly [`FEATURE_COUNT`]
//! numbers, each normalized to roughly [0, 1] (flags are exactly {0, 1}, the
//! bias is exactly 1).  The slot order here is the single source of truth —
//! `BehaviorRule` weights are laid out feature-major against it.

/// Number of input features.
pub const FEATURE_COUNT: usize = 13;

/// Number of scoreable actions (see [`crate::ActionKind`]).
pub const ACTION_COUNT: usize = 9;

/// One perception condensed for scoring.
pub type FeatureVector = [f64; FEATURE_COUNT];

/// Named indices into a [`FeatureVector`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Feature {
    /// Own energy / maxEnergy.
    SelfEnergy,
    /// Energy amount at the current node / its capacity.
    NodeResource,
    /// Best neighbor energy level.
    MaxNeighborResource,
    /// min(co-located entities / 10, 1).
    NearbyEntities,
    /// Beacon strength here, squashed to [0, 1).
    BeaconHere,
    /// Best neighbor beacon strength, squashed.
    MaxNeighborBeacon,
    /// 1 if any co-located artifact is damaged.
    DamagedArtifact,
    /// 1 while the maintainer flag is active.
    Maintainer,
    /// State buffer fill rate.
    StateFill,
    /// Mean state byte / 255.
    StateMean,
    /// First state byte / 255.
    StateFirst,
    /// Last state byte / 255.
    StateLast,
    /// Constant 1.
    Bias,
}

impl Feature {
    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }
}
