//! `BehaviorRule` — threshold genes + the feature×action weight matrix.

use ew_core::WorldRng;

use crate::action::ActionKind;
use crate::features::{FeatureVector, ACTION_COUNT, FEATURE_COUNT};

/// Number of threshold genes.
pub const GENE_COUNT: usize = 8;

/// Std-dev of the Gaussian applied to a threshold gene when it mutates.
const GENE_MUTATION_STD: f64 = 0.1;

/// Std-dev of the Gaussian applied to a weight when it mutates.
const WEIGHT_MUTATION_STD: f64 = 0.2;

/// Named indices into the threshold gene array.
///
/// Aggression and cooperation drive interaction classification; the others
/// modulate resolvers (harvest appetite, replication gating, partner
/// preference, per-entity softmax temperature, creation gating, move cost).
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Gene {
    Hunger,
    Sociality,
    Exploration,
    ReplicationThreshold,
    Aggression,
    Cooperation,
    ArtifactCreation,
    MoveSpeed,
}

impl Gene {
    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// The per-entity decision rule: 8 threshold genes in [0, 1] plus a
/// feature-major weight matrix of `FEATURE_COUNT × ACTION_COUNT` reals.
///
/// Inherited (with mutation) or crossed over at replication; never shared
/// between entities.
#[derive(Clone, Debug, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct BehaviorRule {
    thresholds: [f64; GENE_COUNT],
    /// `weights[f * ACTION_COUNT + a]` scores action `a` from feature `f`.
    weights: Vec<f64>,
}

impl BehaviorRule {
    /// A rule with random threshold genes and the baseline weight matrix
    /// plus per-entry Gaussian noise — the newborn default at world
    /// generation.
    ///
    /// The baseline makes fresh entities viable: harvest when hungry on a
    /// rich node, chase richer neighbors when the local node is drained,
    /// replicate when energy is high, and keep Idle and CreateArtifact
    /// strongly disfavored so they only fire in extremes.
    pub fn baseline(rng: &mut WorldRng, noise_std: f64) -> Self {
        let mut thresholds = [0.0; GENE_COUNT];
        for t in thresholds.iter_mut() {
            *t = rng.random();
        }

        let mut weights = baseline_weights();
        for w in weights.iter_mut() {
            *w += rng.random_normal(0.0, noise_std);
        }

        BehaviorRule { thresholds, weights }
    }

    /// Construct from explicit parts (snapshot restore, tests).
    pub fn from_parts(thresholds: [f64; GENE_COUNT], weights: Vec<f64>) -> Self {
        debug_assert_eq!(weights.len(), FEATURE_COUNT * ACTION_COUNT);
        BehaviorRule { thresholds, weights }
    }

    #[inline]
    pub fn gene(&self, g: Gene) -> f64 {
        self.thresholds[g.index()]
    }

    #[inline]
    pub fn weight(&self, feature: usize, action: usize) -> f64 {
        self.weights[feature * ACTION_COUNT + action]
    }

    pub fn thresholds(&self) -> &[f64; GENE_COUNT] {
        &self.thresholds
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    // ── Scoring ───────────────────────────────────────────────────────────

    /// Raw scores = Wᵀ · features, one per action.
    pub fn scores(&self, features: &FeatureVector) -> [f64; ACTION_COUNT] {
        let mut scores = [0.0; ACTION_COUNT];
        for (f, &x) in features.iter().enumerate() {
            if x == 0.0 {
                continue;
            }
            let row = &self.weights[f * ACTION_COUNT..(f + 1) * ACTION_COUNT];
            for (a, &w) in row.iter().enumerate() {
                scores[a] += w * x;
            }
        }
        scores
    }

    /// Temperature softmax over `scores`, sampled by CDF inversion through
    /// the world RNG.
    pub fn sample_action(
        &self,
        scores: &[f64; ACTION_COUNT],
        temperature: f64,
        rng: &mut WorldRng,
    ) -> ActionKind {
        let t = temperature.max(1e-6);
        // Max-subtraction keeps the exponentials finite for any weights.
        let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let mut probs = [0.0; ACTION_COUNT];
        let mut sum = 0.0;
        for (p, &s) in probs.iter_mut().zip(scores.iter()) {
            *p = ((s - max) / t).exp();
            sum += *p;
        }

        let mut r = rng.random() * sum;
        for (i, &p) in probs.iter().enumerate() {
            r -= p;
            if r < 0.0 {
                return ActionKind::ALL[i];
            }
        }
        // Floating-point slack lands on the last action.
        ActionKind::ALL[ACTION_COUNT - 1]
    }

    // ── Inheritance ───────────────────────────────────────────────────────

    /// Single-parent inheritance: copy, then mutate each gene independently
    /// with probability `mutation_rate`.
    pub fn inherit(&self, rng: &mut WorldRng, mutation_rate: f64) -> Self {
        let mut child = self.clone();
        child.mutate(rng, mutation_rate);
        child
    }

    /// Two-parent crossover: each gene drawn uniformly from either parent,
    /// then mutated as in [`inherit`](Self::inherit).
    pub fn crossover(a: &Self, b: &Self, rng: &mut WorldRng, mutation_rate: f64) -> Self {
        let mut thresholds = [0.0; GENE_COUNT];
        for (i, t) in thresholds.iter_mut().enumerate() {
            *t = if rng.random() < 0.5 { a.thresholds[i] } else { b.thresholds[i] };
        }
        let mut weights = vec![0.0; FEATURE_COUNT * ACTION_COUNT];
        for (i, w) in weights.iter_mut().enumerate() {
            *w = if rng.random() < 0.5 { a.weights[i] } else { b.weights[i] };
        }
        let mut child = BehaviorRule { thresholds, weights };
        child.mutate(rng, mutation_rate);
        child
    }

    fn mutate(&mut self, rng: &mut WorldRng, mutation_rate: f64) {
        for t in self.thresholds.iter_mut() {
            if rng.random_with_probability(mutation_rate) {
                *t = (*t + rng.random_normal(0.0, GENE_MUTATION_STD)).clamp(0.0, 1.0);
            }
        }
        for w in self.weights.iter_mut() {
            if rng.random_with_probability(mutation_rate) {
                *w += rng.random_normal(0.0, WEIGHT_MUTATION_STD);
            }
        }
    }
}

/// The hand-tuned newborn weight matrix, feature-major.
///
/// Rows are features (see [`crate::features::Feature`]), columns are actions
/// in [`ActionKind::ALL`] order.
fn baseline_weights() -> Vec<f64> {
    use crate::features::Feature as F;
    use ActionKind as A;

    let mut w = vec![0.0; FEATURE_COUNT * ACTION_COUNT];
    let mut set = |f: F, a: A, v: f64| {
        w[f.index() * ACTION_COUNT + a.index()] = v;
    };

    // Harvest: fires when own energy is low and the local node is rich.
    set(F::SelfEnergy, A::Harvest, -3.0);
    set(F::NodeResource, A::Harvest, 2.5);
    set(F::Bias, A::Harvest, 0.5);

    // MoveToResource: local node drained, neighbor rich.
    set(F::NodeResource, A::MoveToResource, -2.0);
    set(F::MaxNeighborResource, A::MoveToResource, 2.0);
    set(F::Bias, A::MoveToResource, 0.2);

    // MoveToBeacon: follow the artifact field.
    set(F::MaxNeighborBeacon, A::MoveToBeacon, 1.5);
    set(F::Bias, A::MoveToBeacon, -0.5);

    // Explore: mild wanderlust, suppressed on rich nodes.
    set(F::NodeResource, A::Explore, -0.5);
    set(F::Bias, A::Explore, 0.3);

    // Interact: only worthwhile in company.
    set(F::NearbyEntities, A::Interact, 1.0);
    set(F::Bias, A::Interact, -0.3);

    // Replicate: energy surplus is the trigger.
    set(F::SelfEnergy, A::Replicate, 3.0);
    set(F::Bias, A::Replicate, -1.5);

    // CreateArtifact: strongly disfavored, rises with surplus + knowledge.
    set(F::SelfEnergy, A::CreateArtifact, 1.0);
    set(F::StateFill, A::CreateArtifact, 0.5);
    set(F::Bias, A::CreateArtifact, -3.0);

    // RepairArtifact: gated on a damaged artifact being present.
    set(F::DamagedArtifact, A::RepairArtifact, 2.0);
    set(F::Maintainer, A::RepairArtifact, 1.0);
    set(F::Bias, A::RepairArtifact, -1.0);

    // Idle: last resort.
    set(F::Bias, A::Idle, -2.0);

    w
}
