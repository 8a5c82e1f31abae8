use super::aero_graph::AeroGraph;
use super::data::{AeroForces, EngineModel};
use super::errors::SnapshotError;
use super::lineage::Lineage;
use crate::core::hook::{AeroBindings, BodyContext};
use crate::core::runtime::ObjectRef;
use crate::core::values::TypedValue;
use crate::core::vehicle::FlightConditions;
use log::debug;
use nalgebra::Vector3;
use std::sync::Arc;
use uuid::Uuid;

/// Self-contained aerodynamic state of one vehicle for one evaluation.
///
/// Snapshots come from a `SnapshotPool` and go back to it on release. The
/// graph may be shared with other snapshots of the same clone family; it is
/// copied before the first mutation.
pub struct Snapshot {
    id: Uuid,
    pub total_mass: f64,
    pub dry_mass: f64,
    pub center_of_mass: Vector3<f64>,
    pub area: f64,
    pub mac: f64,
    pub b_2: f64,
    pub max_cross_section_area: f64,
    pub body_length: f64,
    pub deployed_gear: usize,
    pub engines: Vec<EngineModel>,
    pub(crate) graph: Option<Arc<AeroGraph>>,
    /// Lineage link that produced the graph
    pub(crate) graph_origin: Option<Uuid>,
    pub(crate) lineage: Option<Arc<Lineage>>,
    pub(crate) simulation: Option<ObjectRef>,
    pub(crate) bindings: Option<Arc<AeroBindings>>,
    pub(crate) clone_influence_lists: bool,
}

impl Snapshot {
    pub(crate) fn empty() -> Self {
        Self {
            id: Uuid::new_v4(),
            total_mass: 0.0,
            dry_mass: 0.0,
            center_of_mass: Vector3::zeros(),
            area: 0.0,
            mac: 0.0,
            b_2: 0.0,
            max_cross_section_area: 0.0,
            body_length: 0.0,
            deployed_gear: 0,
            engines: Vec::new(),
            graph: None,
            graph_origin: None,
            lineage: None,
            simulation: None,
            bindings: None,
            clone_influence_lists: true,
        }
    }

    /// Clear all transient state and drop every external handle
    pub(crate) fn reset(&mut self) {
        self.total_mass = 0.0;
        self.dry_mass = 0.0;
        self.center_of_mass = Vector3::zeros();
        self.area = 0.0;
        self.mac = 0.0;
        self.b_2 = 0.0;
        self.max_cross_section_area = 0.0;
        self.body_length = 0.0;
        self.deployed_gear = 0;
        self.engines.clear();
        self.graph = None;
        self.graph_origin = None;
        self.lineage = None;
        self.simulation = None;
        self.bindings = None;
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn lineage(&self) -> Option<&Arc<Lineage>> {
        self.lineage.as_ref()
    }

    /// Per-snapshot external simulation
    pub fn simulation(&self) -> Option<&ObjectRef> {
        self.simulation.as_ref()
    }

    pub fn graph(&self) -> Option<&AeroGraph> {
        self.graph.as_deref()
    }

    /// Whether both snapshots currently hold the same graph
    pub fn shares_graph_with(&self, other: &Snapshot) -> bool {
        match (&self.graph, &other.graph) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Exclusive access to the graph, copying it first if it is shared
    pub fn graph_mut(&mut self) -> Result<&mut AeroGraph, SnapshotError> {
        let bindings = self.bindings.clone().ok_or(SnapshotError::Released)?;
        let graph = self.graph.as_mut().ok_or(SnapshotError::Released)?;
        if Arc::get_mut(graph).is_none() {
            let copy = graph.deep_clone(&bindings, self.clone_influence_lists)?;
            *graph = Arc::new(copy);
            if let Some(simulation) = &self.simulation {
                attach_graph(&bindings, simulation, graph)?;
            }
            self.graph_origin = self.lineage.as_ref().map(|l| l.id());
            debug!("Snapshot {} detached its shared graph", self.id);
        }
        Arc::get_mut(graph).ok_or(SnapshotError::Released)
    }

    fn live_parts(&self) -> Result<(Arc<AeroBindings>, ObjectRef), SnapshotError> {
        let bindings = self.bindings.clone().ok_or(SnapshotError::Released)?;
        let simulation = self.simulation.clone().ok_or(SnapshotError::Released)?;
        Ok((bindings, simulation))
    }

    /// Forces on the vehicle under `conditions`
    pub fn evaluate(&mut self, conditions: &FlightConditions) -> Result<AeroForces, SnapshotError> {
        let (bindings, simulation) = self.live_parts()?;
        let velocity = conditions.velocity();

        let graph = self.graph_mut()?;
        let mut wing_force = Vector3::zeros();
        for surface in graph.surfaces.iter_mut() {
            wing_force += surface.compute_force(velocity, conditions.mach, conditions.density)?;
        }
        for section in &graph.sections {
            section.sync_to_external(&bindings.section)?;
        }

        let args = [
            conditions.mach,
            conditions.alpha,
            conditions.altitude,
            conditions.density,
            self.max_cross_section_area,
            self.body_length,
        ]
        .map(TypedValue::new);
        let body_force = bindings
            .simulation
            .calculate_forces
            .invoke(Some(&simulation), &args)?
            .into_inner::<Vector3<f64>>()?;

        let thrust = self
            .engines
            .iter()
            .fold(Vector3::zeros(), |acc, engine| acc + engine.thrust());

        let mass = self.total_mass;
        let weight = BodyContext::new(&bindings.simulation).with_body(&conditions.body, || {
            let gravity = bindings.simulation.compute_gravity.call_static((conditions.altitude,))?;
            Ok(gravity * mass)
        })?;

        Ok(AeroForces {
            wing_force,
            body_force,
            thrust,
            weight,
        })
    }

    /// Run the external angle-of-attack solver for `target_lift` and return
    /// its iteration output
    pub fn solve_alpha(&mut self, conditions: &FlightConditions, target_lift: f64) -> Result<f64, SnapshotError> {
        let (bindings, simulation) = self.live_parts()?;
        for surface in self.graph_mut()?.surfaces.iter() {
            surface.sync_to_external()?;
        }

        let sim = &bindings.simulation;
        let output = BodyContext::new(sim).with_body(&conditions.body, || {
            sim.solve_alpha.call(
                &simulation,
                (conditions.mach, conditions.altitude, conditions.density, target_lift),
            )?;
            sim.iteration_output.get(Some(&simulation))
        })?;

        for surface in self.graph_mut()?.surfaces.iter_mut() {
            surface.sync_from_external()?;
        }
        Ok(output)
    }
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("id", &self.id)
            .field("total_mass", &self.total_mass)
            .field("area", &self.area)
            .field("mac", &self.mac)
            .field("b_2", &self.b_2)
            .field("engines", &self.engines.len())
            .field("wings", &self.graph.as_ref().map_or(0, |g| g.surfaces.len()))
            .field("simulation", &self.simulation)
            .finish()
    }
}

/// Point the external simulation at the graph's wings and sections
pub(crate) fn attach_graph(bindings: &AeroBindings, simulation: &ObjectRef, graph: &AeroGraph) -> Result<(), SnapshotError> {
    bindings
        .simulation
        .wing_models
        .set(Some(simulation), graph.wing_handles())?;
    bindings
        .simulation
        .aero_sections
        .set(Some(simulation), graph.section_handles())?;
    Ok(())
}
