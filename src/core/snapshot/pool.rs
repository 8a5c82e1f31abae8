use super::aero_graph::AeroGraph;
use super::aggregate::{attach_graph, Snapshot};
use super::errors::SnapshotError;
use super::lineage::Lineage;
use crate::core::execution::config::EvaluationConfig;
use crate::core::hook::{AeroBindings, ExternalHook};
use crate::core::runtime::ObjectRef;
use crate::core::vehicle::Vehicle;
use log::{debug, trace};
use nalgebra::Vector3;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Counters describing pool traffic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolStats {
    /// Snapshots allocated over the pool's lifetime
    pub created: usize,
    pub borrowed: usize,
    pub released: usize,
    /// Snapshots waiting on the free list
    pub idle: usize,
}

/// Pool of reusable snapshots.
///
/// The free list is the only shared structure. Borrowed snapshots are owned
/// by the borrower until handed back through `release`.
pub struct SnapshotPool {
    bindings: Arc<AeroBindings>,
    config: EvaluationConfig,
    free: Mutex<Vec<Snapshot>>,
    created: AtomicUsize,
    borrowed: AtomicUsize,
    released: AtomicUsize,
}

impl SnapshotPool {
    /// Create a pool pre-filled with `config.initial_pool_capacity` snapshots
    pub fn new(bindings: Arc<AeroBindings>, config: EvaluationConfig) -> Self {
        let capacity = config.initial_pool_capacity;
        let pool = Self {
            bindings,
            config,
            free: Mutex::new(Vec::with_capacity(capacity)),
            created: AtomicUsize::new(0),
            borrowed: AtomicUsize::new(0),
            released: AtomicUsize::new(0),
        };
        {
            let mut free = pool.free_list();
            for _ in 0..capacity {
                free.push(Snapshot::empty());
            }
        }
        pool.created.store(capacity, Ordering::Relaxed);
        pool
    }

    /// Create a pool with default settings and `capacity` pre-allocated snapshots
    pub fn with_capacity(bindings: Arc<AeroBindings>, capacity: usize) -> Self {
        Self::new(bindings, EvaluationConfig::new().with_initial_pool_capacity(capacity))
    }

    /// Create a pool from an initialized hook
    pub fn from_hook(hook: &ExternalHook, config: EvaluationConfig) -> Result<Self, SnapshotError> {
        let bindings = hook.bindings().ok_or(SnapshotError::Unavailable)?;
        Ok(Self::new(bindings, config))
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    pub fn bindings(&self) -> &Arc<AeroBindings> {
        &self.bindings
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            created: self.created.load(Ordering::Relaxed),
            borrowed: self.borrowed.load(Ordering::Relaxed),
            released: self.released.load(Ordering::Relaxed),
            idle: self.free_list().len(),
        }
    }

    /// Build a snapshot of `vehicle` backed by copies of its live external
    /// simulation's wings and sections
    pub fn borrow_fresh(&self, vehicle: &dyn Vehicle) -> Result<Snapshot, SnapshotError> {
        let mut snapshot = self.take();
        match self.fill_fresh(&mut snapshot, vehicle) {
            Ok(()) => {
                self.borrowed.fetch_add(1, Ordering::Relaxed);
                debug!(
                    "Borrowed fresh snapshot {} ({} wings, {} engines)",
                    snapshot.id(),
                    snapshot.graph().map_or(0, |g| g.surfaces.len()),
                    snapshot.engines.len()
                );
                Ok(snapshot)
            }
            Err(err) => {
                self.recycle(snapshot);
                Err(err)
            }
        }
    }

    /// Build a snapshot equal to `source` that shares nothing mutable with it
    pub fn borrow_clone(&self, source: &Snapshot) -> Result<Snapshot, SnapshotError> {
        let mut snapshot = self.take();
        match self.fill_clone(&mut snapshot, source) {
            Ok(()) => {
                self.borrowed.fetch_add(1, Ordering::Relaxed);
                debug!(
                    "Borrowed snapshot {} as clone of {} (graph {})",
                    snapshot.id(),
                    source.id(),
                    if snapshot.shares_graph_with(source) { "shared" } else { "copied" }
                );
                Ok(snapshot)
            }
            Err(err) => {
                self.recycle(snapshot);
                Err(err)
            }
        }
    }

    /// Clear `snapshot` and put it back on the free list
    pub fn release(&self, snapshot: Snapshot) {
        trace!("Released snapshot {}", snapshot.id());
        self.recycle(snapshot);
        self.released.fetch_add(1, Ordering::Relaxed);
    }

    fn take(&self) -> Snapshot {
        match self.free_list().pop() {
            Some(snapshot) => snapshot,
            None => {
                self.created.fetch_add(1, Ordering::Relaxed);
                Snapshot::empty()
            }
        }
    }

    fn recycle(&self, mut snapshot: Snapshot) {
        snapshot.reset();
        self.free_list().push(snapshot);
    }

    fn free_list(&self) -> std::sync::MutexGuard<'_, Vec<Snapshot>> {
        self.free.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn fill_fresh(&self, snapshot: &mut Snapshot, vehicle: &dyn Vehicle) -> Result<(), SnapshotError> {
        let bindings = &self.bindings;
        let surface = &bindings.surface;
        let active_stage = vehicle.active_stage();

        let mut moment = Vector3::zeros();
        let mut mac_area = 0.0;
        let mut b_2_area = 0.0;
        for part in vehicle.parts() {
            let dry = part.mass();
            let wet = dry + part.resource_mass();
            snapshot.dry_mass += dry;
            snapshot.total_mass += wet;
            moment += part.center_of_mass() * wet;

            if let Some(wing) = part.wing().filter(|_| !part.is_shielded()) {
                let area = surface.area.get(wing)?;
                snapshot.area += area;
                mac_area += surface.mac.get(wing)? * area;
                b_2_area += surface.b_2.get(wing)? * area;
            }
            if part.stage_index() == active_stage {
                if let Some(engine) = part.engine() {
                    snapshot.engines.push(engine.into());
                }
            }
            if part.gear_deployed() == Some(true) {
                snapshot.deployed_gear += 1;
            }
        }
        if snapshot.total_mass > 0.0 {
            snapshot.center_of_mass = moment / snapshot.total_mass;
        }
        if snapshot.area > 0.0 {
            snapshot.mac = mac_area / snapshot.area;
            snapshot.b_2 = b_2_area / snapshot.area;
        }

        let live = vehicle.simulation().ok_or(SnapshotError::MissingSimulation)?;
        let sim = &bindings.simulation;
        let wings = sim.wing_models.get(Some(live))?;
        let sections = sim.aero_sections.get(Some(live))?;
        let graph = AeroGraph::from_live(&wings, &sections, bindings, self.config.clone_influence_lists)?;

        let lineage = Lineage::root();
        snapshot.graph_origin = Some(lineage.root_id());
        snapshot.lineage = Some(lineage);
        snapshot.graph = Some(Arc::new(graph));
        snapshot.bindings = Some(Arc::clone(bindings));
        snapshot.clone_influence_lists = self.config.clone_influence_lists;

        let geometry = (sim.max_cross_section_area.get(live)?, sim.body_length.get(live)?);
        self.attach_simulation(snapshot, geometry)
    }

    fn fill_clone(&self, snapshot: &mut Snapshot, source: &Snapshot) -> Result<(), SnapshotError> {
        let bindings = source.bindings.clone().ok_or(SnapshotError::Released)?;
        let source_graph = source.graph.as_ref().ok_or(SnapshotError::Released)?;
        let source_lineage = source.lineage.as_ref().ok_or(SnapshotError::Released)?;

        snapshot.total_mass = source.total_mass;
        snapshot.dry_mass = source.dry_mass;
        snapshot.center_of_mass = source.center_of_mass;
        snapshot.area = source.area;
        snapshot.mac = source.mac;
        snapshot.b_2 = source.b_2;
        snapshot.deployed_gear = source.deployed_gear;
        snapshot.engines.extend_from_slice(&source.engines);
        snapshot.clone_influence_lists = source.clone_influence_lists;

        let lineage = Lineage::child(source_lineage);
        // only the family root's graph is shared; it is copied on first write
        let (graph, origin) = if source.graph_origin == Some(lineage.root_id()) {
            (Arc::clone(source_graph), source.graph_origin)
        } else {
            let copy = source_graph.deep_clone(&bindings, source.clone_influence_lists)?;
            (Arc::new(copy), Some(lineage.id()))
        };
        snapshot.graph = Some(graph);
        snapshot.graph_origin = origin;
        snapshot.lineage = Some(lineage);
        snapshot.bindings = Some(bindings);

        self.attach_simulation(snapshot, (source.max_cross_section_area, source.body_length))
    }

    /// Construct the snapshot's own external simulation and point it at the
    /// snapshot's graph
    fn attach_simulation(&self, snapshot: &mut Snapshot, (max_area, length): (f64, f64)) -> Result<(), SnapshotError> {
        let bindings = snapshot.bindings.clone().ok_or(SnapshotError::Released)?;
        let sim = &bindings.simulation;
        let simulation: ObjectRef = sim.new.construct(())?;
        sim.max_cross_section_area.set(&simulation, max_area)?;
        sim.body_length.set(&simulation, length)?;
        if let Some(graph) = &snapshot.graph {
            attach_graph(&bindings, &simulation, graph)?;
        }
        if !sim.ready.get(Some(&simulation))? {
            return Err(SnapshotError::NotReady);
        }

        snapshot.max_cross_section_area = sim.max_cross_section_area.get(&simulation)?;
        snapshot.body_length = sim.body_length.get(&simulation)?;
        snapshot.simulation = Some(simulation);
        Ok(())
    }
}
