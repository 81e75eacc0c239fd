//! Id-keyed arenas for entities and artifacts.
//!
//! Both stores allocate ids monotonically and never reuse them within a run,
//! so ascending numeric id doubles as creation order.  Map iteration order
//! is unspecified — every ordered walk goes through `ids_sorted()`.

use rustc_hash::FxHashMap;

use ew_core::{ArtifactId, EntityId};

use crate::{Artifact, Entity};

// ── EntityStore ───────────────────────────────────────────────────────────────

/// Arena of live entities keyed by id.
#[derive(Debug, Default)]
pub struct EntityStore {
    entities: FxHashMap<EntityId, Entity>,
    next_id: u32,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next id.  The caller builds the `Entity` with it and
    /// hands it back via [`insert`](Self::insert).
    pub fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Insert a fully built entity under its own id.
    pub fn insert(&mut self, entity: Entity) {
        debug_assert!(entity.id.0 < self.next_id, "id must come from allocate_id");
        self.entities.insert(entity.id, entity);
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// Remove and return an entity (death, or the take/put mutation pattern
    /// for operations needing two entities mutable at once).
    pub fn take(&mut self, id: EntityId) -> Option<Entity> {
        self.entities.remove(&id)
    }

    /// Re-insert an entity previously removed with [`take`](Self::take).
    pub fn put(&mut self, entity: Entity) {
        self.entities.insert(entity.id, entity);
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// All ids in ascending order — the canonical per-tick processing order.
    pub fn ids_sorted(&self) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self.entities.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Unordered iterator; use [`ids_sorted`](Self::ids_sorted) wherever
    /// order can reach the RNG or a float accumulator.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// The next id the allocator would hand out (snapshot bookkeeping).
    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    /// Rebuild from snapshot parts.
    pub fn restore(entities: Vec<Entity>, next_id: u32) -> Self {
        let entities: FxHashMap<EntityId, Entity> =
            entities.into_iter().map(|e| (e.id, e)).collect();
        EntityStore { entities, next_id }
    }
}

// ── ArtifactStore ─────────────────────────────────────────────────────────────

/// Arena of live artifacts keyed by id.
#[derive(Debug, Default)]
pub struct ArtifactStore {
    artifacts: FxHashMap<ArtifactId, Artifact>,
    next_id: u32,
}

impl ArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate_id(&mut self) -> ArtifactId {
        let id = ArtifactId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn insert(&mut self, artifact: Artifact) {
        debug_assert!(artifact.id.0 < self.next_id, "id must come from allocate_id");
        self.artifacts.insert(artifact.id, artifact);
    }

    pub fn get(&self, id: ArtifactId) -> Option<&Artifact> {
        self.artifacts.get(&id)
    }

    pub fn get_mut(&mut self, id: ArtifactId) -> Option<&mut Artifact> {
        self.artifacts.get_mut(&id)
    }

    pub fn contains(&self, id: ArtifactId) -> bool {
        self.artifacts.contains_key(&id)
    }

    pub fn remove(&mut self, id: ArtifactId) -> Option<Artifact> {
        self.artifacts.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    pub fn ids_sorted(&self) -> Vec<ArtifactId> {
        let mut ids: Vec<ArtifactId> = self.artifacts.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.values()
    }

    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    pub fn restore(artifacts: Vec<Artifact>, next_id: u32) -> Self {
        let artifacts: FxHashMap<ArtifactId, Artifact> =
            artifacts.into_iter().map(|a| (a.id, a)).collect();
        ArtifactStore { artifacts, next_id }
    }
}
