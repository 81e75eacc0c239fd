//! Unit tests for ew-core primitives.

#[cfg(test)]
mod ids {
    use crate::{ArtifactId, EntityId, NodeId};

    #[test]
    fn index_roundtrip() {
        let id = EntityId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(EntityId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(EntityId(0) < EntityId(1));
        assert!(NodeId(100) > NodeId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(EntityId::INVALID.0, u32::MAX);
        assert_eq!(ArtifactId::INVALID.0, u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(NodeId(7).to_string(), "node#7");
        assert_eq!(EntityId(0).to_string(), "entity#0");
    }
}

#[cfg(test)]
mod rng {
    use crate::WorldRng;

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = WorldRng::new(12345);
        let mut r2 = WorldRng::new(12345);
        for _ in 0..100 {
            assert_eq!(r1.next_u64(), r2.next_u64());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut r1 = WorldRng::new(1);
        let mut r2 = WorldRng::new(2);
        assert_ne!(r1.next_u64(), r2.next_u64());
    }

    #[test]
    fn random_in_unit_interval() {
        let mut rng = WorldRng::new(0);
        for _ in 0..1000 {
            let v = rng.random();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn random_int_inclusive_bounds() {
        let mut rng = WorldRng::new(7);
        let mut saw_min = false;
        let mut saw_max = false;
        for _ in 0..2000 {
            let v = rng.random_int(0, 3);
            assert!((0..=3).contains(&v));
            saw_min |= v == 0;
            saw_max |= v == 3;
        }
        assert!(saw_min && saw_max, "both endpoints should be reachable");
    }

    #[test]
    fn probability_extremes() {
        let mut rng = WorldRng::new(0);
        assert!(!rng.random_with_probability(0.0));
        assert!(rng.random_with_probability(1.0));
    }

    #[test]
    fn normal_is_roughly_centered() {
        let mut rng = WorldRng::new(99);
        let n = 5000;
        let mean = (0..n).map(|_| rng.random_normal(10.0, 2.0)).sum::<f64>() / n as f64;
        assert!((mean - 10.0).abs() < 0.2, "sample mean {mean}");
    }

    #[test]
    fn shuffle_preserves_elements() {
        let mut rng = WorldRng::new(3);
        let mut v: Vec<u32> = (0..50).collect();
        rng.shuffle(&mut v);
        let mut sorted = v.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn mutate_bytes_rate_zero_is_identity() {
        let mut rng = WorldRng::new(5);
        let mut data = vec![1, 2, 3, 4];
        rng.mutate_bytes(&mut data, 0.0);
        assert_eq!(data, vec![1, 2, 3, 4]);
    }

    #[test]
    fn flip_random_bit_changes_exactly_one_bit() {
        let mut rng = WorldRng::new(11);
        let mut data = vec![0u8; 8];
        rng.flip_random_bit(&mut data);
        let ones: u32 = data.iter().map(|b| b.count_ones()).sum();
        assert_eq!(ones, 1);
    }

    #[test]
    fn state_serializes_and_resumes() {
        let mut rng = WorldRng::new(42);
        for _ in 0..17 {
            rng.next_u64();
        }
        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: WorldRng = serde_json::from_str(&json).unwrap();
        for _ in 0..100 {
            assert_eq!(rng.next_u64(), restored.next_u64());
        }
    }
}

#[cfg(test)]
mod buffer {
    use crate::StateBuffer;

    #[test]
    fn append_within_capacity() {
        let mut buf = StateBuffer::new(8);
        buf.append(&[1, 2, 3]);
        assert_eq!(buf.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn append_slides_window() {
        let mut buf = StateBuffer::new(4);
        buf.append(&[1, 2, 3]);
        buf.append(&[4, 5, 6]);
        // Oldest bytes dropped; last 4 survive.
        assert_eq!(buf.as_slice(), &[3, 4, 5, 6]);
        assert_eq!(buf.len(), 4);
    }

    #[test]
    fn oversize_append_keeps_tail() {
        let mut buf = StateBuffer::new(3);
        buf.append(&[1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(buf.as_slice(), &[5, 6, 7]);
    }

    #[test]
    fn set_data_truncates() {
        let mut buf = StateBuffer::new(2);
        buf.set_data(&[9, 8, 7]);
        assert_eq!(buf.as_slice(), &[9, 8]);
    }

    #[test]
    fn fill_and_mean() {
        let mut buf = StateBuffer::new(4);
        assert_eq!(buf.fill_rate(), 0.0);
        assert_eq!(buf.mean_byte(), 0.0);
        buf.append(&[255, 255]);
        assert_eq!(buf.fill_rate(), 0.5);
        assert!((buf.mean_byte() - 1.0).abs() < 1e-12);
    }
}

#[cfg(test)]
mod kinds {
    use crate::{ResourceKind, ResourceTable};

    #[test]
    fn table_add_floors_at_zero() {
        let mut t = ResourceTable::new();
        t.set(ResourceKind::Energy, 5.0);
        t.add(ResourceKind::Energy, -10.0);
        assert_eq!(t.get(ResourceKind::Energy), 0.0);
    }

    #[test]
    fn table_entry_array_roundtrip() {
        let mut t = ResourceTable::new();
        t.set(ResourceKind::Energy, 1.5);
        t.set(ResourceKind::Biomass, 2.5);
        let json = serde_json::to_string(&t).unwrap();
        assert!(json.contains("energy"), "serializes as entry array: {json}");
        let back: ResourceTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}

#[cfg(test)]
mod config {
    use crate::SimulationConfig;

    #[test]
    fn default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_nodes_rejected() {
        let mut cfg = SimulationConfig::default();
        cfg.world.node_count = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn out_of_range_rate_rejected() {
        let mut cfg = SimulationConfig::default();
        cfg.interaction.noise_rate = 1.5;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn partial_json_takes_defaults() {
        let cfg: SimulationConfig =
            serde_json::from_str(r#"{"seed": 42, "world": {"node_count": 5}}"#).unwrap();
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.world.node_count, 5);
        assert_eq!(cfg.world.initial_entity_count, 50);
        assert_eq!(cfg.limits.state_capacity, 256);
    }
}
