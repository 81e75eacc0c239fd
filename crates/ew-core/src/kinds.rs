//! Closed world enums and the fixed-width resource table.
//!
//! All variants are always compiled in — there are no per-variant feature
//! flags.  The enums are deliberately small and `Copy`; subsystems match on
//! them exhaustively so adding a variant is a compile-time sweep.

use std::fmt;

// ── Terrain ───────────────────────────────────────────────────────────────────

/// Static terrain tag of a node.  Sampled uniformly at world generation.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Terrain {
    #[default]
    Plains,
    Forest,
    Mountain,
    Desert,
    Tundra,
}

impl Terrain {
    /// All variants, in sampling order.
    pub const ALL: [Terrain; 5] = [
        Terrain::Plains,
        Terrain::Forest,
        Terrain::Mountain,
        Terrain::Desert,
        Terrain::Tundra,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Terrain::Plains => "plains",
            Terrain::Forest => "forest",
            Terrain::Mountain => "mountain",
            Terrain::Desert => "desert",
            Terrain::Tundra => "tundra",
        }
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ResourceKind ──────────────────────────────────────────────────────────────

/// The kinds of node-local resources.
///
/// `Energy` is the kind entities harvest, the kind death releases back to,
/// and the only kind that regenerates by default.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Energy,
    Minerals,
    Biomass,
}

impl ResourceKind {
    pub const COUNT: usize = 3;

    /// All variants, in table order.
    pub const ALL: [ResourceKind; Self::COUNT] =
        [ResourceKind::Energy, ResourceKind::Minerals, ResourceKind::Biomass];

    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Energy => "energy",
            ResourceKind::Minerals => "minerals",
            ResourceKind::Biomass => "biomass",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ResourceTable ─────────────────────────────────────────────────────────────

/// Per-kind resource amounts, indexed by [`ResourceKind`].
///
/// A fixed-width array rather than a map: iteration order is the enum order,
/// which keeps RNG draw sequences and floating-point accumulation identical
/// run for run.  Serializes as an entry array `[["energy", x], ...]`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(into = "Vec<(ResourceKind, f64)>", from = "Vec<(ResourceKind, f64)>")]
pub struct ResourceTable([f64; ResourceKind::COUNT]);

impl ResourceTable {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, kind: ResourceKind) -> f64 {
        self.0[kind.index()]
    }

    #[inline]
    pub fn set(&mut self, kind: ResourceKind, amount: f64) {
        self.0[kind.index()] = amount;
    }

    /// Add `delta` (may be negative); the stored amount never drops below 0.
    #[inline]
    pub fn add(&mut self, kind: ResourceKind, delta: f64) {
        let v = &mut self.0[kind.index()];
        *v = (*v + delta).max(0.0);
    }

    /// Sum across all kinds.
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// `(kind, amount)` pairs in enum order.
    pub fn entries(&self) -> impl Iterator<Item = (ResourceKind, f64)> + '_ {
        ResourceKind::ALL.iter().map(|&k| (k, self.get(k)))
    }
}

impl From<ResourceTable> for Vec<(ResourceKind, f64)> {
    fn from(t: ResourceTable) -> Self {
        t.entries().collect()
    }
}

impl From<Vec<(ResourceKind, f64)>> for ResourceTable {
    fn from(entries: Vec<(ResourceKind, f64)>) -> Self {
        let mut t = ResourceTable::new();
        for (kind, amount) in entries {
            t.set(kind, amount);
        }
        t
    }
}

// ── Skill ─────────────────────────────────────────────────────────────────────

/// Skills derived from the leading bytes of an entity's internal state:
/// byte `i` / 255 is the level of skill `i`.
///
/// The `Reserved` slot exists so the skill vector spans exactly 8 bytes.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    Harvest,
    Repair,
    Create,
    Move,
    Interact,
    Replicate,
    Perception,
    Reserved,
}

impl Skill {
    pub const COUNT: usize = 8;

    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }
}
