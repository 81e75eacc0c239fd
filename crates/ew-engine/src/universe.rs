//! The `Universe`: owner of all world state and the tick pipeline.

use std::collections::BTreeSet;

use log::{debug, info};
use rustc_hash::FxHashMap;

use ew_core::{NodeId, ResourceKind, SimulationConfig, Tick, WorldRng};
use ew_entity::{Artifact, ArtifactStore, Entity, EntityStore};
use ew_observe::{
    Event, EventLog, InformationStats, KnowledgeStats, SimulationStats, StatsRecorder,
};
use ew_space::Space;

use ew_dynamics::{decide, entropy, perception, regen, transit, ActionError};

use crate::error::EngineError;
use crate::resolve::{self, RepairNote};
use crate::{genesis, snapshot::Snapshot};

/// One self-contained world: spatial graph, arenas, RNG, clock, and the
/// observation layer.  Single-threaded by construction — there are no
/// suspension points inside [`step`](Self::step).
#[derive(Debug)]
pub struct Universe {
    pub(crate) config: SimulationConfig,
    pub(crate) space: Space,
    pub(crate) entities: EntityStore,
    pub(crate) artifacts: ArtifactStore,
    pub(crate) rng: WorldRng,
    pub(crate) tick: Tick,
    pub(crate) log: EventLog,
    pub(crate) stats: StatsRecorder,
}

impl Universe {
    /// Validate `config`, generate the world, and record the tick-0 stats.
    pub fn new(config: SimulationConfig) -> Result<Self, EngineError> {
        config.validate()?;

        let mut rng = WorldRng::new(config.seed);
        let mut log = EventLog::new();
        let (space, entities, artifacts) = genesis::generate(&config, &mut rng, &mut log);
        info!(
            "world generated: seed={} nodes={} edges={} entities={}",
            config.seed,
            space.node_count(),
            space.edge_count(),
            entities.len()
        );

        let mut universe = Universe {
            config,
            space,
            entities,
            artifacts,
            rng,
            tick: Tick::ZERO,
            log,
            stats: StatsRecorder::new(),
        };
        universe.record_stats(universe.log.len(), &[]);
        Ok(universe)
    }

    // ── The tick pipeline ─────────────────────────────────────────────────

    /// Advance the world by exactly one tick.
    pub fn step(&mut self) {
        let now = self.tick;
        let log_mark = self.log.len();

        // 1. Transit arrivals.
        transit::process_arrivals(
            &mut self.space,
            &mut self.entities,
            &mut self.artifacts,
            &self.config,
            &mut self.rng,
            &mut self.log,
            now,
        );

        // 2. Perceive → score → sample → resolve, in ascending id order
        //    fixed at tick start.  Entities born this tick wait for the
        //    next; entities in transit or already drained skip their turn.
        let ids = self.entities.ids_sorted();
        let mut repair_notes: Vec<RepairNote> = Vec::new();
        for id in ids {
            let Some(entity) = self.entities.get(id) else { continue };
            if entity.in_transit || entity.energy <= 0.0 {
                continue;
            }
            let view = perception::perceive(
                &self.space,
                &self.entities,
                &self.artifacts,
                entity,
                now,
                &self.config,
                &mut self.rng,
            );
            let (_kind, action) =
                decide::decide(entity, &view, &self.space, now, &self.config, &mut self.rng);
            let outcome = resolve::resolve(
                id,
                action,
                &mut self.space,
                &mut self.entities,
                &mut self.artifacts,
                &self.config,
                &mut self.rng,
                &mut self.log,
                now,
            );
            if let Some(note) = outcome.repair {
                repair_notes.push(note);
            }
        }

        // 3. Death sweep for casualties of other entities' actions.
        self.sweep_deaths(now);

        // 4. Entropy, then a second sweep so maintenance casualties are out
        //    before the tick boundary.
        entropy::apply(
            &mut self.space,
            &mut self.entities,
            &mut self.artifacts,
            &self.config,
            &mut self.rng,
            &mut self.log,
            now,
        );
        self.sweep_deaths(now);

        // 5. Resource regeneration.
        regen::apply(
            &mut self.space,
            self.config.resource_regeneration_rate,
            self.config.secondary_regeneration_rate,
        );

        // 6. Advance the clock.
        self.tick = now + 1;

        // 7. Record stats for the completed tick.
        self.record_stats(log_mark, &repair_notes);
        debug!("tick {} complete: {} entities", self.tick, self.entities.len());
    }

    fn sweep_deaths(&mut self, now: Tick) {
        for id in self.entities.ids_sorted() {
            if self.entities.get(id).is_some_and(|e| e.energy <= 0.0) {
                resolve::kill_entity(
                    id,
                    &mut self.space,
                    &mut self.entities,
                    &self.config,
                    &mut self.log,
                    now,
                );
            }
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn space(&self) -> &Space {
        &self.space
    }

    /// Live entity arena, read-only.
    pub fn entities(&self) -> &EntityStore {
        &self.entities
    }

    /// Live artifact arena, read-only.
    pub fn artifacts(&self) -> &ArtifactStore {
        &self.artifacts
    }

    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    /// Extinction is a normal terminal state, not an error.
    pub fn is_extinct(&self) -> bool {
        self.entities.is_empty()
    }

    /// The most recent per-tick stats (tick 0 stats exist from construction).
    pub fn stats(&self) -> &SimulationStats {
        self.stats.latest().expect("stats recorded at construction")
    }

    pub fn stats_history(&self) -> &[SimulationStats] {
        self.stats.history()
    }

    /// Borrow the append-only event buffer.
    pub fn event_log(&self) -> &[Event] {
        self.log.events()
    }

    /// Truncate the event buffer (drivers window their counts with this).
    pub fn clear_event_log(&mut self) {
        self.log.clear();
    }

    // ── Transit primitives for drivers and tests ──────────────────────────

    /// Ship up to `amount` of `kind` from `from` to `to` along their direct
    /// edge.  The source node is debited immediately; the destination is
    /// credited on arrival.
    pub fn ship_resource(
        &mut self,
        from: NodeId,
        to: NodeId,
        kind: ResourceKind,
        amount: f64,
    ) -> Result<Tick, ActionError> {
        let edge_id = self
            .space
            .edge_between(from, to)
            .ok_or(ActionError::InvalidTarget("no direct edge"))?;
        let node = self
            .space
            .node_mut(from)
            .ok_or(ActionError::InvalidTarget("source node missing"))?;
        let shipped = node.resource(kind).min(amount);
        node.resources.add(kind, -shipped);
        transit::enqueue_resource(&mut self.space, edge_id, from, to, kind, shipped, self.tick)
    }

    /// Ship a byte payload from `from` to `to`; it lands in the lowest-id
    /// artifact present at the destination on arrival.
    pub fn ship_data(
        &mut self,
        from: NodeId,
        to: NodeId,
        data: Vec<u8>,
    ) -> Result<Tick, ActionError> {
        let edge_id = self
            .space
            .edge_between(from, to)
            .ok_or(ActionError::InvalidTarget("no direct edge"))?;
        transit::enqueue_data(&mut self.space, edge_id, from, to, data, self.tick)
    }

    // ── Snapshots ─────────────────────────────────────────────────────────

    /// Capture the full world for later restoration.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }

    /// Restore a world from a snapshot.  See [`Snapshot::restore`].
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self, crate::snapshot::SnapshotError> {
        snapshot.restore()
    }

    /// Rebuild from validated snapshot parts (used by `Snapshot::restore`).
    pub(crate) fn from_parts(
        config: SimulationConfig,
        space: Space,
        entities: Vec<Entity>,
        next_entity_id: u32,
        artifacts: Vec<Artifact>,
        next_artifact_id: u32,
        rng: WorldRng,
        tick: Tick,
    ) -> Self {
        let mut universe = Universe {
            config,
            space,
            entities: EntityStore::restore(entities, next_entity_id),
            artifacts: ArtifactStore::restore(artifacts, next_artifact_id),
            rng,
            tick,
            log: EventLog::new(),
            stats: StatsRecorder::new(),
        };
        universe.record_stats(0, &[]);
        universe
    }

    // ── Stats ─────────────────────────────────────────────────────────────

    fn record_stats(&mut self, log_mark: usize, repair_notes: &[RepairNote]) {
        let ids = self.entities.ids_sorted();
        let entity_count = ids.len();

        let mut total_energy = 0.0;
        let mut total_age = 0u64;
        let mut fill_sum = 0.0;
        let mut prefixes: BTreeSet<[u8; 4]> = BTreeSet::new();
        for &id in &ids {
            let e = self.entities.get(id).expect("id from sorted list");
            total_energy += e.energy;
            total_age += e.age;
            fill_sum += e.state.fill_rate();
            let mut prefix = [0u8; 4];
            for (i, slot) in prefix.iter_mut().enumerate() {
                *slot = e.state.byte(i).unwrap_or(0);
            }
            prefixes.insert(prefix);
        }
        let average_age = if entity_count > 0 {
            total_age as f64 / entity_count as f64
        } else {
            0.0
        };

        let mut spatial_distribution: FxHashMap<NodeId, u32> = FxHashMap::default();
        for node in self.space.nodes() {
            if node.entity_count() > 0 {
                spatial_distribution.insert(node.id, node.entity_count() as u32);
            }
        }

        let count = |pred: fn(&Event) -> bool| self.log.count_since(log_mark, pred);
        let interaction_count = count(|e| matches!(e, Event::Interaction { .. }));
        let replication_count = count(|e| matches!(e, Event::Replication { .. }));
        let death_count = count(|e| matches!(e, Event::EntityDied { .. }));

        let information = Some(InformationStats {
            exchange_count: count(|e| matches!(e, Event::InformationExchange { .. })),
            inheritance_count: count(|e| matches!(e, Event::InformationInheritance { .. })),
            acquisition_count: count(|e| matches!(e, Event::InformationAcquisition { .. })),
            diversity: if entity_count > 0 {
                prefixes.len() as f64 / entity_count as f64
            } else {
                0.0
            },
            avg_state_fill: if entity_count > 0 { fill_sum / entity_count as f64 } else { 0.0 },
        });

        let knowledge = Some(KnowledgeStats {
            bonus_applied_count: repair_notes.iter().filter(|n| n.bonus_applied).count() as u64,
            repair_count: repair_notes.len() as u64,
            avg_similarity: if repair_notes.is_empty() {
                0.0
            } else {
                repair_notes.iter().map(|n| n.similarity).sum::<f64>() / repair_notes.len() as f64
            },
        });

        self.stats.record(SimulationStats {
            tick: self.tick.0,
            entity_count,
            total_energy,
            artifact_count: self.artifacts.len(),
            average_age,
            spatial_distribution,
            interaction_count,
            replication_count,
            death_count,
            information,
            knowledge,
        });
    }
}
