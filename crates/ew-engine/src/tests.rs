//! Integration tests for ew-engine: pipeline invariants, reproducibility,
//! extinction, snapshot equivalence, and regime classification.

use ew_core::{NodeId, ResourceKind, SimulationConfig};

use crate::universe::Universe;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn small_config(seed: u32) -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.seed = seed;
    config.world.node_count = 10;
    config.world.initial_entity_count = 12;
    config.world.edge_density = 0.3;
    config
}

/// The universal per-tick-boundary invariants from the engine contract.
fn check_invariants(universe: &Universe) {
    let space = universe.space();
    let entities = universe.entities();
    let artifacts = universe.artifacts();

    // 1. Arena membership == alive (energy > 0).
    for id in entities.ids_sorted() {
        let e = entities.get(id).unwrap();
        assert!(e.energy > 0.0, "{id} in arena with energy {}", e.energy);
        assert!(e.energy <= universe.config().limits.max_energy + 1e-9);

        // 2. Node reference and membership, both directions.
        let node = space.node(e.node_id).expect("entity node exists");
        assert!(node.entity_ids.contains(&id), "{id} missing from node set");

        // 4. State respects capacity.
        assert!(e.state.len() <= e.state.capacity());
    }
    for node in space.nodes() {
        for &id in &node.entity_ids {
            assert!(entities.contains(id), "node lists dead entity {id}");
        }
        for &id in &node.artifact_ids {
            assert!(artifacts.contains(id), "node lists dead artifact {id}");
        }
    }

    // 5. Artifact durability in (0, 1].
    for id in artifacts.ids_sorted() {
        let a = artifacts.get(id).unwrap();
        assert!(a.durability > 0.0 && a.durability <= 1.0);
        assert!(space.node(a.node_id).unwrap().artifact_ids.contains(&id));
    }

    // 3. Transit arrivals never precede departures.
    for edge in space.edges() {
        assert!(edge.in_transit.len() <= edge.capacity);
        for item in &edge.in_transit {
            assert!(item.arrives_at >= item.departed_at);
        }
    }

    // Stats agree with the arena.
    assert_eq!(universe.stats().entity_count, entities.len());
    assert_eq!(universe.stats().artifact_count, artifacts.len());
}

// ── Construction & connectivity ───────────────────────────────────────────────

#[cfg(test)]
mod construction {
    use super::*;

    #[test]
    fn zero_node_config_rejected() {
        let mut config = small_config(1);
        config.world.node_count = 0;
        assert!(Universe::new(config).is_err());
    }

    #[test]
    fn generated_graph_is_connected() {
        for seed in [1, 42, 123, 9999] {
            let universe = Universe::new(small_config(seed)).unwrap();
            let n = universe.space().node_count();
            let visited = universe.space().bfs(NodeId(0), None);
            assert_eq!(visited.len(), n, "seed {seed}: disconnected world");
        }
    }

    #[test]
    fn founding_population_is_placed() {
        let universe = Universe::new(small_config(42)).unwrap();
        assert_eq!(universe.entities().len(), 12);
        check_invariants(&universe);
        // Creation events logged for every founder.
        let created = universe
            .event_log()
            .iter()
            .filter(|e| matches!(e, ew_observe::Event::EntityCreated { .. }))
            .count();
        assert_eq!(created, 12);
    }

    #[test]
    fn tick_zero_stats_exist() {
        let universe = Universe::new(small_config(42)).unwrap();
        assert_eq!(universe.stats().tick, 0);
        assert_eq!(universe.stats().entity_count, 12);
        assert!(universe.stats().total_energy > 0.0);
    }
}

// ── Pipeline invariants ───────────────────────────────────────────────────────

#[cfg(test)]
mod pipeline {
    use super::*;
    use ew_core::Tick;

    #[test]
    fn tick_advances_by_one() {
        let mut universe = Universe::new(small_config(7)).unwrap();
        for expected in 1..=20u64 {
            universe.step();
            assert_eq!(universe.current_tick(), Tick(expected));
            assert_eq!(universe.stats().tick, expected);
        }
    }

    #[test]
    fn invariants_hold_across_a_run() {
        let mut universe = Universe::new(small_config(7)).unwrap();
        for _ in 0..60 {
            universe.step();
            check_invariants(&universe);
        }
    }

    #[test]
    fn ages_never_decrease() {
        let mut universe = Universe::new(small_config(11)).unwrap();
        let mut last_avg = 0.0;
        let mut deaths_or_births = false;
        for _ in 0..30 {
            let before: Vec<_> = universe.entities().ids_sorted();
            universe.step();
            let after: Vec<_> = universe.entities().ids_sorted();
            if before != after {
                deaths_or_births = true;
            }
            // Average age only guaranteed monotone while the census is stable.
            if !deaths_or_births {
                assert!(universe.stats().average_age >= last_avg);
                last_avg = universe.stats().average_age;
            }
        }
    }

    #[test]
    fn clear_event_log_truncates() {
        let mut universe = Universe::new(small_config(7)).unwrap();
        universe.step();
        assert!(!universe.event_log().is_empty());
        universe.clear_event_log();
        assert!(universe.event_log().is_empty());
        // The engine keeps working against a cleared log.
        universe.step();
        check_invariants(&universe);
    }
}

// ── Reproducibility (S1) ──────────────────────────────────────────────────────

#[cfg(test)]
mod reproducibility {
    use super::*;

    #[test]
    fn same_seed_same_trajectory() {
        let mut a = Universe::new(small_config(42)).unwrap();
        let mut b = Universe::new(small_config(42)).unwrap();
        for _ in 0..120 {
            a.step();
            b.step();
        }
        assert_eq!(a.stats_history(), b.stats_history());
        assert_eq!(a.event_log(), b.event_log());
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = Universe::new(small_config(1)).unwrap();
        let mut b = Universe::new(small_config(2)).unwrap();
        for _ in 0..30 {
            a.step();
            b.step();
        }
        assert_ne!(
            a.stats_history().iter().map(|s| s.total_energy).collect::<Vec<_>>(),
            b.stats_history().iter().map(|s| s.total_energy).collect::<Vec<_>>()
        );
    }
}

// ── Starvation extinction (S2) ────────────────────────────────────────────────

#[cfg(test)]
mod extinction {
    use super::*;

    #[test]
    fn zero_regeneration_starves_the_world() {
        let mut config = small_config(42);
        config.world.node_count = 5;
        config.world.initial_entity_count = 20;
        config.resource_regeneration_rate = 0.0;
        // Close every energy faucet so total energy strictly decreases:
        // upkeep burns 5/tick/entity and nothing is created.
        config.costs.maintenance = 5.0;
        config.interaction.cooperation_efficiency = 0.0;
        config.tool_effect_enabled = false;
        config.skill_bonus_enabled = false;

        let mut universe = Universe::new(config).unwrap();
        let mut ticks = 0u64;
        while !universe.is_extinct() && ticks < 10_000 {
            universe.step();
            ticks += 1;
        }

        assert!(universe.is_extinct(), "world should starve within {ticks} ticks");
        assert_eq!(universe.stats().entity_count, 0);
        // Every founder (plus any children born along the way) died exactly once.
        let total_deaths: u64 = universe.stats_history().iter().map(|s| s.death_count).sum();
        let total_births: u64 =
            universe.stats_history().iter().map(|s| s.replication_count).sum();
        assert_eq!(total_deaths, 20 + total_births);
    }
}

// ── Skill-bonus distinguishability (S4) ───────────────────────────────────────

#[cfg(test)]
mod skill_flag {
    use super::*;

    #[test]
    fn enabling_skill_bonus_changes_the_run() {
        let mut with = small_config(42);
        with.skill_bonus_enabled = true;
        with.skill_bonus_coefficient = 1.0;
        let mut without = small_config(42);
        without.skill_bonus_enabled = false;

        let mut a = Universe::new(with).unwrap();
        let mut b = Universe::new(without).unwrap();
        for _ in 0..150 {
            a.step();
            b.step();
        }

        let energy_a: Vec<f64> = a.stats_history().iter().map(|s| s.total_energy).collect();
        let energy_b: Vec<f64> = b.stats_history().iter().map(|s| s.total_energy).collect();
        assert_ne!(energy_a, energy_b, "the flag must be observable in the stats");
    }
}

// ── Snapshots (S5, invariant 8) ───────────────────────────────────────────────

#[cfg(test)]
mod snapshots {
    use super::*;
    use crate::snapshot::{Snapshot, SnapshotError, ValidationIssue};

    #[test]
    fn capture_restore_capture_is_identity() {
        let mut universe = Universe::new(small_config(42)).unwrap();
        for _ in 0..40 {
            universe.step();
        }
        let snapshot = universe.snapshot();
        let restored = Universe::from_snapshot(snapshot.clone()).unwrap();
        assert_eq!(Snapshot::capture(&restored), snapshot);
    }

    #[test]
    fn json_roundtrip_is_exact() {
        let mut universe = Universe::new(small_config(9)).unwrap();
        for _ in 0..15 {
            universe.step();
        }
        let snapshot = universe.snapshot();
        for pretty in [false, true] {
            let json = snapshot.to_json(pretty).unwrap();
            let back = Snapshot::from_json(&json).unwrap();
            assert_eq!(back, snapshot);
        }
    }

    #[test]
    fn resumed_run_matches_the_original() {
        // Sequence A: 60 ticks, snapshot, 60 more.
        let mut a = Universe::new(small_config(42)).unwrap();
        for _ in 0..60 {
            a.step();
        }
        let snapshot = a.snapshot();
        for _ in 0..60 {
            a.step();
        }

        // Sequence B: restore at tick 60, run the same 60.
        let mut b = Universe::from_snapshot(snapshot).unwrap();
        for _ in 0..60 {
            b.step();
        }

        let tail_a: Vec<_> = a
            .stats_history()
            .iter()
            .filter(|s| s.tick > 60)
            .map(|s| (s.tick, s.entity_count, s.total_energy.to_bits(), s.artifact_count))
            .collect();
        let tail_b: Vec<_> = b
            .stats_history()
            .iter()
            .filter(|s| s.tick > 60)
            .map(|s| (s.tick, s.entity_count, s.total_energy.to_bits(), s.artifact_count))
            .collect();
        assert_eq!(tail_a, tail_b);

        // Full structural equality at the end, not just statistics.
        assert_eq!(Snapshot::capture(&a), Snapshot::capture(&b));
    }

    #[test]
    fn corrupt_snapshot_is_rejected_with_issues() {
        let universe = Universe::new(small_config(3)).unwrap();
        let mut snapshot = universe.snapshot();
        snapshot.entities[0].node_id = NodeId(999);
        snapshot.entities[1].energy = -5.0;

        let err = snapshot.restore().unwrap_err();
        match err {
            SnapshotError::Invalid(issues) => {
                assert!(issues
                    .iter()
                    .any(|i| matches!(i, ValidationIssue::DanglingEntityNode { .. })));
                assert!(issues
                    .iter()
                    .any(|i| matches!(i, ValidationIssue::NegativeEnergy { .. })));
            }
            other => panic!("expected validation failure, got {other}"),
        }
    }
}

// ── Direct resolver behaviour ─────────────────────────────────────────────────

#[cfg(test)]
mod resolvers {
    use super::*;
    use crate::resolve;
    use ew_behavior::ResolvedAction;
    use ew_observe::Event;

    /// Run one action through the resolver against a live universe.
    fn resolve_on(universe: &mut Universe, actor: ew_core::EntityId, action: ResolvedAction) {
        let now = universe.tick;
        resolve::resolve(
            actor,
            action,
            &mut universe.space,
            &mut universe.entities,
            &mut universe.artifacts,
            &universe.config,
            &mut universe.rng,
            &mut universe.log,
            now,
        );
    }

    #[test]
    fn harvest_respects_node_and_cap_bounds() {
        let mut universe = Universe::new(small_config(5)).unwrap();
        let actor = universe.entities.ids_sorted()[0];
        let node_id = universe.entities.get(actor).unwrap().node_id;

        // Ask for far more than exists.
        resolve_on(&mut universe, actor, ResolvedAction::Harvest { amount: 1e9 });

        let node_energy = universe.space.node(node_id).unwrap().resource(ResourceKind::Energy);
        let entity_energy = universe.entities.get(actor).unwrap().energy;
        assert!(node_energy >= 0.0, "harvest drained the node below zero");
        assert!(entity_energy <= universe.config.limits.max_energy);
    }

    #[test]
    fn solo_replication_costs_the_parent() {
        let mut universe = Universe::new(small_config(5)).unwrap();
        let parent = universe.entities.ids_sorted()[0];
        universe.entities.get_mut(parent).unwrap().energy = 150.0;
        let count_before = universe.entities.len();

        resolve_on(&mut universe, parent, ResolvedAction::Replicate { partner: None });

        assert_eq!(universe.entities.len(), count_before + 1);
        let parent_energy = universe.entities.get(parent).unwrap().energy;
        assert!(parent_energy >= 0.0 && parent_energy < 150.0);
        assert!(universe
            .event_log()
            .iter()
            .any(|e| matches!(e, Event::Replication { partner: None, .. })));
    }

    #[test]
    fn create_then_repair_builds_prestige() {
        let mut universe = Universe::new(small_config(5)).unwrap();
        universe.config.knowledge_bonus_enabled = true;
        let actor = universe.entities.ids_sorted()[0];
        {
            let e = universe.entities.get_mut(actor).unwrap();
            e.energy = 150.0;
            e.state.set_data(&[42; 16]);
        }

        resolve_on(&mut universe, actor, ResolvedAction::CreateArtifact { data: vec![42; 16] });
        let artifact_id = universe.artifacts.ids_sorted()[0];
        let created_prestige = universe.artifacts.get(artifact_id).unwrap().prestige;

        // Wound it, then repair: durability climbs, prestige accrues, and
        // matching state earns the knowledge bonus.
        universe.artifacts.get_mut(artifact_id).unwrap().durability = 0.4;
        resolve_on(&mut universe, actor, ResolvedAction::RepairArtifact { id: artifact_id });

        let artifact = universe.artifacts.get(artifact_id).unwrap();
        assert!(artifact.prestige > created_prestige);
        // Identical state and data → similarity 1 → doubled repair amount.
        let expected = 0.4 + universe.config.artifacts.repair_amount * 2.0;
        assert!((artifact.durability - expected).abs() < 1e-9);

        // Repairing granted the maintainer window.
        assert!(universe
            .entities
            .get(actor)
            .unwrap()
            .is_maintainer(universe.current_tick()));
    }

    #[test]
    fn invalid_move_downgrades_to_idle_with_guardrail() {
        let mut universe = Universe::new(small_config(5)).unwrap();
        let actor = universe.entities.ids_sorted()[0];
        let energy_before = universe.entities.get(actor).unwrap().energy;

        // NodeId(999) is nobody's neighbor.
        resolve_on(&mut universe, actor, ResolvedAction::Move { to: NodeId(999) });

        let energy_after = universe.entities.get(actor).unwrap().energy;
        assert!((energy_before - energy_after - universe.config.costs.idle).abs() < 1e-9);
        assert!(universe
            .event_log()
            .iter()
            .any(|e| matches!(e, Event::GuardrailIntervention { .. })));
        assert!(!universe.entities.get(actor).unwrap().in_transit);
    }

    #[test]
    fn population_guardrail_blocks_replication() {
        let mut universe = Universe::new(small_config(5)).unwrap();
        universe.config.limits.max_population = Some(universe.entities.len());
        let parent = universe.entities.ids_sorted()[0];
        universe.entities.get_mut(parent).unwrap().energy = 150.0;
        let count_before = universe.entities.len();

        resolve_on(&mut universe, parent, ResolvedAction::Replicate { partner: None });

        assert_eq!(universe.entities.len(), count_before);
        assert!(universe
            .event_log()
            .iter()
            .any(|e| matches!(e, Event::GuardrailIntervention { .. })));
    }
}

// ── Transit primitives ────────────────────────────────────────────────────────

#[cfg(test)]
mod shipping {
    use super::*;

    #[test]
    fn resource_shipment_arrives() {
        let mut config = small_config(5);
        config.entropy.resource_dissipation_rate = 0.0;
        config.entropy.disaster_scale = 0.0;
        let mut universe = Universe::new(config).unwrap();

        let edge = universe.space().edges()[0].clone();
        let (from, to) = (edge.a, edge.b);
        universe
            .space
            .node_mut(from)
            .unwrap()
            .resources
            .set(ResourceKind::Minerals, 50.0);
        let before = universe.space().node(to).unwrap().resource(ResourceKind::Minerals);

        universe.ship_resource(from, to, ResourceKind::Minerals, 5.0).unwrap();
        for _ in 0..8 {
            universe.step();
        }

        let after = universe.space().node(to).unwrap().resource(ResourceKind::Minerals);
        assert!((after - before - 5.0).abs() < 1e-9);
    }

    #[test]
    fn shipping_without_an_edge_fails() {
        let mut universe = Universe::new(small_config(5)).unwrap();
        let err = universe.ship_data(NodeId(0), NodeId(999), vec![1, 2, 3]);
        assert!(err.is_err());
    }
}

// ── Regime exploration ────────────────────────────────────────────────────────

#[cfg(test)]
mod regimes {
    use super::*;
    use crate::explore::{classify, explore, Regime};

    #[test]
    fn classification_cases() {
        assert_eq!(classify(&[10, 5, 0], 10), Regime::Extinction);
        assert_eq!(classify(&[10, 20, 30], 10), Regime::Growth);
        assert_eq!(classify(&vec![7; 100], 10), Regime::Static);
        let mut wobble = vec![8usize; 100];
        wobble[99] = 7;
        assert_eq!(classify(&wobble, 50), Regime::SmallStable);
        let churn: Vec<usize> = (0..100).map(|i| 20 + (i % 17)).collect();
        assert_eq!(classify(&churn, 30), Regime::Active);
    }

    #[test]
    fn sweep_returns_one_outcome_per_seed_in_order() {
        let mut base = small_config(0);
        base.world.node_count = 6;
        base.world.initial_entity_count = 6;
        let outcomes = explore(&base, &[3, 1, 2], 20);
        assert_eq!(outcomes.len(), 3);
        assert_eq!(
            outcomes.iter().map(|o| o.seed).collect::<Vec<_>>(),
            vec![3, 1, 2]
        );
        for o in &outcomes {
            assert!(o.ticks <= 20);
            assert!(o.peak_entities >= o.final_entities);
        }
    }

    #[test]
    fn sweeps_are_reproducible() {
        let base = small_config(0);
        let a = explore(&base, &[1, 2], 15);
        let b = explore(&base, &[1, 2], 15);
        assert_eq!(a, b);
    }
}
