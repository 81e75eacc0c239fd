//! Unit tests for ew-entity.

use ew_behavior::BehaviorRule;
use ew_core::{EntityId, NodeId, Skill, StateBuffer, Tick, WorldRng};

use crate::{Entity, EntityStore};

fn test_entity(store: &mut EntityStore, energy: f64) -> EntityId {
    let id = store.allocate_id();
    store.insert(Entity {
        id,
        node_id: NodeId(0),
        energy,
        age: 0,
        perception_range: 1,
        entity_type: 0,
        mass: 1.0,
        in_transit: false,
        maintainer_until: None,
        state: StateBuffer::new(16),
        rule: BehaviorRule::baseline(&mut WorldRng::new(1), 0.0),
    });
    id
}

#[cfg(test)]
mod store {
    use super::*;

    #[test]
    fn ids_allocate_monotonically() {
        let mut store = EntityStore::new();
        let a = test_entity(&mut store, 10.0);
        let b = test_entity(&mut store, 10.0);
        assert_eq!(a, EntityId(0));
        assert_eq!(b, EntityId(1));
        assert_eq!(store.next_id(), 2);
    }

    #[test]
    fn removed_ids_are_never_reused() {
        let mut store = EntityStore::new();
        let a = test_entity(&mut store, 10.0);
        store.take(a);
        let b = test_entity(&mut store, 10.0);
        assert_ne!(a, b);
    }

    #[test]
    fn ids_sorted_is_ascending() {
        let mut store = EntityStore::new();
        for _ in 0..20 {
            test_entity(&mut store, 1.0);
        }
        let ids = store.ids_sorted();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn take_and_put_roundtrip() {
        let mut store = EntityStore::new();
        let a = test_entity(&mut store, 42.0);
        let e = store.take(a).unwrap();
        assert!(store.get(a).is_none());
        store.put(e);
        assert_eq!(store.get(a).unwrap().energy, 42.0);
    }

    #[test]
    fn restore_preserves_allocator() {
        let mut store = EntityStore::new();
        test_entity(&mut store, 1.0);
        let b = test_entity(&mut store, 2.0);
        let entities: Vec<Entity> = store.ids_sorted().iter().map(|&i| store.get(i).unwrap().clone()).collect();
        let restored = EntityStore::restore(entities, store.next_id());
        assert_eq!(restored.len(), 2);
        assert_eq!(restored.get(b).unwrap().energy, 2.0);
        assert_eq!(restored.next_id(), 2);
    }
}

#[cfg(test)]
mod maintainer {
    use super::*;

    #[test]
    fn maintainer_window_expires() {
        let mut store = EntityStore::new();
        let a = test_entity(&mut store, 10.0);
        let e = store.get_mut(a).unwrap();
        e.maintainer_until = Some(Tick(10));
        assert!(e.is_maintainer(Tick(5)));
        assert_eq!(e.effective_perception(Tick(5)), 2);
        assert!(!e.is_maintainer(Tick(10)));
        assert_eq!(e.effective_perception(Tick(10)), 1);
    }
}

#[cfg(test)]
mod skills {
    use super::*;
    use crate::{skill_bonus, skill_level};

    #[test]
    fn levels_read_from_leading_bytes() {
        let mut state = StateBuffer::new(16);
        state.append(&[255, 0, 128]);
        assert_eq!(skill_level(&state, Skill::Harvest), 1.0);
        assert_eq!(skill_level(&state, Skill::Repair), 0.0);
        assert!((skill_level(&state, Skill::Create) - 128.0 / 255.0).abs() < 1e-12);
        // Byte 3 is absent: level 0.
        assert_eq!(skill_level(&state, Skill::Move), 0.0);
    }

    #[test]
    fn disabled_bonus_is_exactly_one() {
        let mut state = StateBuffer::new(16);
        state.append(&[255]);
        assert_eq!(skill_bonus(&state, Skill::Harvest, false, 1.0), 1.0);
        assert_eq!(skill_bonus(&state, Skill::Harvest, true, 1.0), 2.0);
    }
}
