use super::errors::HookError;
use crate::core::binding::{
    BindError, BindingDescriptor, BindingFactory, BoxedInvoker, ConstructorInvoker, FieldAccessor, MethodInvoker,
    PropertyAccessor, StaticFieldAccessor,
};
use crate::core::runtime::{ObjectRef, RuntimeType};
use crate::core::types::{Direction, MemberKind, ValueType};
use nalgebra::Vector3;
use std::sync::Arc;

/// Neighbor list and weight list of one direction on the interaction type
#[derive(Clone)]
pub struct DirectionalBinding {
    pub wings: FieldAccessor<Vec<ObjectRef>>,
    pub weights: FieldAccessor<Vec<f64>>,
}

/// Members of the external wing model and its interaction object
#[derive(Clone)]
pub struct SurfaceBindings {
    pub surface_type: Arc<RuntimeType>,
    pub interaction_type: Arc<RuntimeType>,

    pub area: FieldAccessor<f64>,
    pub mac: FieldAccessor<f64>,
    pub b_2: FieldAccessor<f64>,
    pub cos_sweep_angle: FieldAccessor<f64>,
    pub effective_oswald: FieldAccessor<f64>,

    pub cl: FieldAccessor<f64>,
    pub cd: FieldAccessor<f64>,
    pub cm: FieldAccessor<f64>,
    pub stall: FieldAccessor<f64>,
    pub raw_lift_slope: FieldAccessor<f64>,
    pub lift_slope: FieldAccessor<f64>,
    pub aoa_max: FieldAccessor<f64>,

    pub parallel_in_plane: FieldAccessor<Vector3<f64>>,
    pub perp: FieldAccessor<Vector3<f64>>,
    pub lift_direction: FieldAccessor<Vector3<f64>>,
    pub aerodynamic_center: FieldAccessor<Vector3<f64>>,

    pub interaction: FieldAccessor<Option<ObjectRef>>,

    pub compute_aerodynamic_center: MethodInvoker<(), ()>,
    pub determine_stall: MethodInvoker<(f64,), ()>,
    pub subsonic_lift_slope: MethodInvoker<(f64,), f64>,
    pub calculate_aoa: MethodInvoker<(Vector3<f64>,), f64>,
    pub calculate_forces: MethodInvoker<(Vector3<f64>, f64, f64, f64), Vector3<f64>>,

    /// Indexed by `Direction::index`
    pub directions: [DirectionalBinding; 4],
    pub upstream_area: FieldAccessor<f64>,
    pub upstream_lift_slope: FieldAccessor<f64>,
    pub upstream_stall: FieldAccessor<f64>,
    pub upstream_influence: FieldAccessor<f64>,
}

impl SurfaceBindings {
    pub fn bind(
        factory: &BindingFactory,
        surface: &Arc<RuntimeType>,
        interaction: &Arc<RuntimeType>,
    ) -> Result<Self, HookError> {
        let f64_field = |name: &str| factory.bind_field::<f64>(surface, name);
        let vector_field = |name: &str| factory.bind_field::<Vector3<f64>>(surface, name);
        let summary_field = |name: &str| factory.bind_field::<f64>(interaction, name);
        let direction = |d: Direction| -> Result<DirectionalBinding, HookError> {
            Ok(DirectionalBinding {
                wings: factory.bind_field(interaction, &format!("{}Wings", d.field_prefix()))?,
                weights: factory.bind_field(interaction, &format!("{}Weights", d.field_prefix()))?,
            })
        };

        Ok(Self {
            surface_type: Arc::clone(surface),
            interaction_type: Arc::clone(interaction),
            area: f64_field("S")?,
            mac: f64_field("MAC")?,
            b_2: f64_field("b_2")?,
            cos_sweep_angle: f64_field("cosSweepAngle")?,
            effective_oswald: f64_field("effectiveOswald")?,
            cl: f64_field("Cl")?,
            cd: f64_field("Cd")?,
            cm: f64_field("Cm")?,
            stall: f64_field("stall")?,
            raw_lift_slope: f64_field("rawLiftSlope")?,
            lift_slope: f64_field("liftslope")?,
            aoa_max: f64_field("AoAmax")?,
            parallel_in_plane: vector_field("ParallelInPlane")?,
            perp: vector_field("perp")?,
            lift_direction: vector_field("liftDirection")?,
            aerodynamic_center: vector_field("AerodynamicCenter")?,
            interaction: factory.bind_field(surface, "Interaction")?,
            compute_aerodynamic_center: factory.bind_method(surface, "ComputeAerodynamicCenter")?,
            determine_stall: factory.bind_method(surface, "DetermineStall")?,
            subsonic_lift_slope: factory.bind_method(surface, "CalculateSubsonicLiftSlope")?,
            calculate_aoa: factory.bind_method(surface, "CalculateAoA")?,
            calculate_forces: factory.bind_method(surface, "CalculateForces")?,
            directions: [
                direction(Direction::Forward)?,
                direction(Direction::Backward)?,
                direction(Direction::Left)?,
                direction(Direction::Right)?,
            ],
            upstream_area: summary_field("EffectiveUpstreamArea")?,
            upstream_lift_slope: summary_field("EffectiveUpstreamLiftSlope")?,
            upstream_stall: summary_field("EffectiveUpstreamStall")?,
            upstream_influence: summary_field("EffectiveUpstreamInfluence")?,
        })
    }

    pub fn direction(&self, direction: Direction) -> &DirectionalBinding {
        &self.directions[direction.index()]
    }
}

/// Members of the external whole-vehicle simulation
#[derive(Clone)]
pub struct SimulationBindings {
    pub simulation_type: Arc<RuntimeType>,
    pub new: ConstructorInvoker<()>,
    pub ready: PropertyAccessor<bool>,
    pub iteration_output: PropertyAccessor<f64>,
    pub wing_models: PropertyAccessor<Vec<ObjectRef>>,
    pub aero_sections: PropertyAccessor<Vec<ObjectRef>>,
    pub max_cross_section_area: FieldAccessor<f64>,
    pub body_length: FieldAccessor<f64>,
    pub current_body: StaticFieldAccessor<String>,
    pub set_current_body: MethodInvoker<(String,), ()>,
    pub compute_gravity: MethodInvoker<(f64,), f64>,
    /// Six-parameter body force method; too wide for the generic path
    pub calculate_forces: BoxedInvoker,
    pub solve_alpha: MethodInvoker<(f64, f64, f64, f64), f64>,
}

impl SimulationBindings {
    pub fn bind(factory: &BindingFactory, simulation: &Arc<RuntimeType>) -> Result<Self, HookError> {
        let force_params = vec![ValueType::of::<f64>(); 6];
        let calculate_forces = factory.bind(
            &BindingDescriptor::method(simulation, "CalculateForces")
                .with_params(force_params)
                .returning(ValueType::of::<Vector3<f64>>()),
        )?;
        let calculate_forces = calculate_forces.into_invoker().ok_or_else(|| BindError::SignatureMismatch {
            owner: simulation.full_name(),
            kind: MemberKind::Method,
            member: "CalculateForces".to_string(),
            requested: "method".to_string(),
            found: "accessor".to_string(),
        })?;

        Ok(Self {
            simulation_type: Arc::clone(simulation),
            new: factory.bind_constructor(simulation)?,
            ready: factory.bind_property(simulation, "Ready")?,
            iteration_output: factory.bind_property(simulation, "IterationOutput")?,
            wing_models: factory.bind_property(simulation, "WingModels")?,
            aero_sections: factory.bind_property(simulation, "AeroSections")?,
            max_cross_section_area: factory.bind_field(simulation, "MaxCrossSectionArea")?,
            body_length: factory.bind_field(simulation, "BodyLength")?,
            current_body: factory.bind_static_field(simulation, "CurrentBody")?,
            set_current_body: factory.bind_static_method(simulation, "SetCurrentBody")?,
            compute_gravity: factory.bind_static_method(simulation, "ComputeGravity")?,
            calculate_forces,
            solve_alpha: factory.bind_method(simulation, "SolveAlpha")?,
        })
    }
}

/// Members of the external aerodynamic body section
#[derive(Clone)]
pub struct SectionBindings {
    pub section_type: Arc<RuntimeType>,
    pub position: FieldAccessor<Vector3<f64>>,
    pub cross_section_area: FieldAccessor<f64>,
    pub drag_coefficient: FieldAccessor<f64>,
    pub flatness_ratio: FieldAccessor<f64>,
}

impl SectionBindings {
    pub fn bind(factory: &BindingFactory, section: &Arc<RuntimeType>) -> Result<Self, HookError> {
        Ok(Self {
            section_type: Arc::clone(section),
            position: factory.bind_field(section, "Position")?,
            cross_section_area: factory.bind_field(section, "CrossSectionArea")?,
            drag_coefficient: factory.bind_field(section, "DragCoefficient")?,
            flatness_ratio: factory.bind_field(section, "FlatnessRatio")?,
        })
    }
}

/// Every callable this crate uses against the external module, bound once
#[derive(Clone)]
pub struct AeroBindings {
    pub surface: SurfaceBindings,
    pub simulation: SimulationBindings,
    pub section: SectionBindings,
}
