//! Unit tests for ew-behavior.

use ew_core::WorldRng;

use crate::{ActionKind, BehaviorRule, FeatureVector, ACTION_COUNT, FEATURE_COUNT};

fn zero_features() -> FeatureVector {
    [0.0; FEATURE_COUNT]
}

#[cfg(test)]
mod scoring {
    use super::*;

    #[test]
    fn baseline_has_full_matrix() {
        let mut rng = WorldRng::new(1);
        let rule = BehaviorRule::baseline(&mut rng, 0.1);
        assert_eq!(rule.weights().len(), FEATURE_COUNT * ACTION_COUNT);
        for g in rule.thresholds() {
            assert!((0.0..=1.0).contains(g));
        }
    }

    #[test]
    fn scores_are_linear_in_features() {
        let rule = BehaviorRule::from_parts(
            [0.5; crate::GENE_COUNT],
            (0..FEATURE_COUNT * ACTION_COUNT).map(|i| i as f64).collect(),
        );
        let mut f = zero_features();
        f[0] = 1.0;
        let s1 = rule.scores(&f);
        f[0] = 2.0;
        let s2 = rule.scores(&f);
        for a in 0..ACTION_COUNT {
            assert!((s2[a] - 2.0 * s1[a]).abs() < 1e-12);
        }
    }

    #[test]
    fn sampling_is_deterministic_per_seed() {
        let mut r1 = WorldRng::new(9);
        let mut r2 = WorldRng::new(9);
        let rule = BehaviorRule::baseline(&mut WorldRng::new(3), 0.1);
        let f = [0.5; FEATURE_COUNT];
        let s = rule.scores(&f);
        for _ in 0..50 {
            assert_eq!(
                rule.sample_action(&s, 1.0, &mut r1),
                rule.sample_action(&s, 1.0, &mut r2)
            );
        }
    }

    #[test]
    fn dominant_score_wins_at_low_temperature() {
        let rule = BehaviorRule::from_parts([0.5; crate::GENE_COUNT], vec![0.0; FEATURE_COUNT * ACTION_COUNT]);
        let mut scores = [0.0; ACTION_COUNT];
        scores[ActionKind::Harvest.index()] = 50.0;
        let mut rng = WorldRng::new(4);
        for _ in 0..100 {
            assert_eq!(rule.sample_action(&scores, 0.01, &mut rng), ActionKind::Harvest);
        }
    }

    #[test]
    fn extreme_scores_stay_finite() {
        let rule = BehaviorRule::from_parts([0.5; crate::GENE_COUNT], vec![0.0; FEATURE_COUNT * ACTION_COUNT]);
        let scores = [1e6; ACTION_COUNT];
        let mut rng = WorldRng::new(4);
        // Softmax with max-subtraction must not produce NaN weights.
        let _ = rule.sample_action(&scores, 1.0, &mut rng);
    }
}

#[cfg(test)]
mod inheritance {
    use super::*;

    #[test]
    fn zero_mutation_copies_parent() {
        let mut rng = WorldRng::new(7);
        let parent = BehaviorRule::baseline(&mut rng, 0.1);
        let child = parent.inherit(&mut rng, 0.0);
        assert_eq!(child, parent);
    }

    #[test]
    fn crossover_genes_come_from_a_parent() {
        let a = BehaviorRule::from_parts([0.0; crate::GENE_COUNT], vec![0.0; FEATURE_COUNT * ACTION_COUNT]);
        let b = BehaviorRule::from_parts([1.0; crate::GENE_COUNT], vec![1.0; FEATURE_COUNT * ACTION_COUNT]);
        let mut rng = WorldRng::new(12);
        let child = BehaviorRule::crossover(&a, &b, &mut rng, 0.0);
        for &t in child.thresholds() {
            assert!(t == 0.0 || t == 1.0);
        }
        for &w in child.weights() {
            assert!(w == 0.0 || w == 1.0);
        }
    }

    #[test]
    fn mutated_thresholds_stay_clamped() {
        let mut rng = WorldRng::new(3);
        let parent = BehaviorRule::from_parts([1.0; crate::GENE_COUNT], vec![0.0; FEATURE_COUNT * ACTION_COUNT]);
        // Mutate every gene, many times; clamp must hold throughout.
        let mut rule = parent;
        for _ in 0..20 {
            rule = rule.inherit(&mut rng, 1.0);
            for &t in rule.thresholds() {
                assert!((0.0..=1.0).contains(&t));
            }
        }
    }
}
