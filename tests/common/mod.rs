//! Reference `AeroCore` external module, host vehicle fakes and logging setup
//! shared by the integration tests and the force sweep demo.
#![allow(dead_code)]

use aerobind::core::hook::{AeroBindings, ExternalHook};
use aerobind::core::runtime::{InvokeError, LoadedModule, ModuleCatalog, ObjectRef, RuntimeType, RuntimeTypeBuilder};
use aerobind::core::types::{Direction, ValueType};
use aerobind::core::values::TypedValue;
use aerobind::core::vehicle::{EngineInfo, Part, Vehicle};
use nalgebra::Vector3;
use std::f64::consts::PI;
use std::sync::{Arc, OnceLock, Weak};

pub const PACKAGE: &str = "AeroCore";
pub const SPEED_OF_SOUND: f64 = 340.0;

/// Route `log` output through the test harness
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Load `types` into a private catalog and return the hook's bindings
pub fn hooked(types: &AeroTypes) -> Arc<AeroBindings> {
    init_logging();
    let catalog = ModuleCatalog::new();
    catalog.load(types.module());
    let hook = ExternalHook::default();
    assert!(hook.initialize(&catalog).is_available(), "{:?}", hook.failure());
    hook.bindings().expect("available hook has bindings")
}

fn this<'a>(target: Option<&'a ObjectRef>, member: &str) -> Result<&'a ObjectRef, InvokeError> {
    target.ok_or_else(|| InvokeError::MissingReceiver {
        member: member.to_string(),
    })
}

fn arg<T: Clone + 'static>(args: &[TypedValue], index: usize) -> Result<T, InvokeError> {
    let value = args
        .get(index)
        .ok_or_else(|| InvokeError::failed("arg", format!("missing argument {}", index)))?;
    Ok(value.get::<T>()?.clone())
}

fn keep(omit: &[&str], name: &str) -> bool {
    !omit.contains(&name)
}

fn f64_fields(mut builder: RuntimeTypeBuilder, fields: &[(&str, f64)], omit: &[&str]) -> RuntimeTypeBuilder {
    for (name, default) in fields {
        if keep(omit, name) {
            builder = builder.field(name, *default);
        }
    }
    builder
}

fn vector_fields(
    mut builder: RuntimeTypeBuilder,
    fields: &[(&str, Vector3<f64>)],
    omit: &[&str],
) -> RuntimeTypeBuilder {
    for (name, default) in fields {
        if keep(omit, name) {
            builder = builder.field(name, *default);
        }
    }
    builder
}

/// Upstream influence and stall recorded on the wing's interaction object
fn upstream_of(wing: &ObjectRef) -> Result<(f64, f64), InvokeError> {
    let interaction: ObjectRef = wing.read("Interaction")?;
    Ok((
        interaction.read("EffectiveUpstreamInfluence")?,
        interaction.read("EffectiveUpstreamStall")?,
    ))
}

fn aspect_ratio(wing: &ObjectRef) -> Result<f64, InvokeError> {
    let area: f64 = wing.read("S")?;
    let half_span: f64 = wing.read("b_2")?;
    if area <= 0.0 {
        return Err(InvokeError::failed("AspectRatio", "wing has no area"));
    }
    Ok(4.0 * half_span * half_span / area)
}

/// Writes `rawLiftSlope` and `liftslope`, returns the raw slope
fn lift_slope(wing: &ObjectRef, mach: f64) -> Result<f64, InvokeError> {
    let aspect = aspect_ratio(wing)?;
    let cos_sweep: f64 = wing.read("cosSweepAngle")?;
    let beta_sq = (1.0 - mach * mach).max(0.05);
    let raw = 2.0 * PI * aspect / (2.0 + (4.0 + aspect * aspect * beta_sq / (cos_sweep * cos_sweep)).sqrt());

    let (influence, _) = upstream_of(wing)?;
    let slope = raw * (1.0 - 0.5 * influence.clamp(0.0, 1.0));
    wing.write("rawLiftSlope", raw)?;
    wing.write("liftslope", slope)?;
    Ok(raw)
}

/// Writes `stall`, the stalled fraction of the wing at `aoa`
fn stall_fraction(wing: &ObjectRef, aoa: f64) -> Result<f64, InvokeError> {
    let aoa_max: f64 = wing.read("AoAmax")?;
    let own = if aoa_max > 0.0 {
        ((aoa.abs() - aoa_max) / aoa_max).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (_, upstream_stall) = upstream_of(wing)?;
    let stall = own.max(0.5 * upstream_stall);
    wing.write("stall", stall)?;
    Ok(stall)
}

fn wing_type(omit: &[&str]) -> Arc<RuntimeType> {
    let mut builder = RuntimeType::builder("AeroCore.Wings", "WingAerodynamicModel");
    builder = f64_fields(
        builder,
        &[
            ("S", 1.0),
            ("MAC", 1.0),
            ("b_2", 1.0),
            ("cosSweepAngle", 1.0),
            ("effectiveOswald", 0.9),
            ("Cl", 0.0),
            ("Cd", 0.0),
            ("Cm", 0.0),
            ("stall", 0.0),
            ("rawLiftSlope", 0.0),
            ("liftslope", 0.0),
            ("AoAmax", 0.26),
        ],
        omit,
    );
    builder = vector_fields(
        builder,
        &[
            ("ParallelInPlane", Vector3::x()),
            ("perp", Vector3::z()),
            ("liftDirection", Vector3::z()),
            ("AerodynamicCenter", Vector3::zeros()),
        ],
        omit,
    );
    if keep(omit, "Interaction") {
        builder = builder.object_field("Interaction", "WingInteraction");
    }

    let f64_type = ValueType::of::<f64>();
    let vector_type = ValueType::of::<Vector3<f64>>();
    if keep(omit, "ComputeAerodynamicCenter") {
        builder = builder.method("ComputeAerodynamicCenter", vec![], ValueType::Void, |target, _| {
            let wing = this(target, "ComputeAerodynamicCenter")?;
            let mac: f64 = wing.read("MAC")?;
            let parallel: Vector3<f64> = wing.read("ParallelInPlane")?;
            wing.write("AerodynamicCenter", parallel * (0.25 * mac))?;
            Ok(TypedValue::unit())
        });
    }
    if keep(omit, "DetermineStall") {
        builder = builder.method("DetermineStall", vec![f64_type.clone()], ValueType::Void, |target, args| {
            stall_fraction(this(target, "DetermineStall")?, arg(args, 0)?)?;
            Ok(TypedValue::unit())
        });
    }
    if keep(omit, "CalculateSubsonicLiftSlope") {
        builder = builder.method(
            "CalculateSubsonicLiftSlope",
            vec![f64_type.clone()],
            f64_type.clone(),
            |target, args| {
                let raw = lift_slope(this(target, "CalculateSubsonicLiftSlope")?, arg(args, 0)?)?;
                Ok(TypedValue::new(raw))
            },
        );
    }
    if keep(omit, "CalculateAoA") {
        builder = builder.method("CalculateAoA", vec![vector_type.clone()], f64_type.clone(), |target, args| {
            let wing = this(target, "CalculateAoA")?;
            let velocity: Vector3<f64> = arg(args, 0)?;
            let perp: Vector3<f64> = wing.read("perp")?;
            let parallel: Vector3<f64> = wing.read("ParallelInPlane")?;
            let aoa = if velocity.norm() == 0.0 {
                0.0
            } else {
                (-velocity.dot(&perp)).atan2(velocity.dot(&parallel))
            };
            Ok(TypedValue::new(aoa))
        });
    }
    if keep(omit, "CalculateForces") {
        builder = builder.method(
            "CalculateForces",
            vec![vector_type.clone(), f64_type.clone(), f64_type.clone(), f64_type],
            vector_type,
            |target, args| {
                let wing = this(target, "CalculateForces")?;
                let velocity: Vector3<f64> = arg(args, 0)?;
                let aoa: f64 = arg(args, 1)?;
                let mach: f64 = arg(args, 2)?;
                let density: f64 = arg(args, 3)?;

                lift_slope(wing, mach)?;
                let slope: f64 = wing.read("liftslope")?;
                let stall = stall_fraction(wing, aoa)?;
                let oswald: f64 = wing.read("effectiveOswald")?;
                let cl = slope * aoa * (1.0 - stall);
                let cd = 0.01 + cl * cl / (PI * aspect_ratio(wing)? * oswald);
                wing.write("Cl", cl)?;
                wing.write("Cd", cd)?;
                wing.write("Cm", -0.05 * cl)?;

                let speed = velocity.norm();
                if speed == 0.0 {
                    return Ok(TypedValue::new(Vector3::<f64>::zeros()));
                }
                let area: f64 = wing.read("S")?;
                let lift_direction: Vector3<f64> = wing.read("liftDirection")?;
                let q = 0.5 * density * speed * speed;
                let force = lift_direction * (q * area * cl) - velocity / speed * (q * area * cd);
                Ok(TypedValue::new(force))
            },
        );
    }
    builder.default_constructor().build()
}

fn interaction_type(omit: &[&str]) -> Arc<RuntimeType> {
    let mut builder = RuntimeType::builder("AeroCore.Wings", "WingInteraction");
    for direction in Direction::ALL {
        let wings = format!("{}Wings", direction.field_prefix());
        let weights = format!("{}Weights", direction.field_prefix());
        if keep(omit, &wings) {
            builder = builder.field(&wings, Vec::<ObjectRef>::new());
        }
        if keep(omit, &weights) {
            builder = builder.field(&weights, Vec::<f64>::new());
        }
    }
    f64_fields(
        builder,
        &[
            ("EffectiveUpstreamArea", 0.0),
            ("EffectiveUpstreamLiftSlope", 0.0),
            ("EffectiveUpstreamStall", 0.0),
            ("EffectiveUpstreamInfluence", 0.0),
        ],
        omit,
    )
    .default_constructor()
    .build()
}

fn section_type(omit: &[&str]) -> Arc<RuntimeType> {
    let builder = vector_fields(
        RuntimeType::builder("AeroCore.Body", "AeroSection"),
        &[("Position", Vector3::zeros())],
        omit,
    );
    f64_fields(
        builder,
        &[("CrossSectionArea", 1.0), ("DragCoefficient", 0.3), ("FlatnessRatio", 1.0)],
        omit,
    )
    .default_constructor()
    .build()
}

/// Surface gravity and radius of the bodies the module knows about
fn body_constants(body: &str) -> Result<(f64, f64), InvokeError> {
    match body {
        "Kerbin" => Ok((9.81, 600_000.0)),
        "Mun" => Ok((1.63, 200_000.0)),
        "Duna" => Ok((2.94, 320_000.0)),
        "Eve" => Ok((16.7, 700_000.0)),
        other => Err(InvokeError::failed("ComputeGravity", format!("unknown body {}", other))),
    }
}

fn owner_of(cell: &OnceLock<Weak<RuntimeType>>) -> Result<Arc<RuntimeType>, InvokeError> {
    cell.get()
        .and_then(Weak::upgrade)
        .ok_or_else(|| InvokeError::failed("InstantConditionSim", "type no longer loaded"))
}

fn simulation_type(omit: &[&str]) -> Arc<RuntimeType> {
    let self_type: Arc<OnceLock<Weak<RuntimeType>>> = Arc::new(OnceLock::new());
    let f64_type = ValueType::of::<f64>();
    let handles_type = ValueType::of::<Vec<ObjectRef>>();

    let mut builder = RuntimeType::builder("AeroCore.Simulation", "InstantConditionSim")
        .field("ready", false)
        .field("wingModels", Vec::<ObjectRef>::new())
        .field("aeroSections", Vec::<ObjectRef>::new())
        .field("iterationOutput", 0.0f64);
    builder = f64_fields(builder, &[("MaxCrossSectionArea", 0.0), ("BodyLength", 0.0)], omit);
    if keep(omit, "CurrentBody") {
        builder = builder.static_field("CurrentBody", "Kerbin".to_string());
    }

    builder = builder
        .constructor(vec![], |sim, _| sim.write("ready", true))
        .constructor(vec![f64_type.clone(), f64_type.clone()], |sim, args| {
            sim.write("MaxCrossSectionArea", arg::<f64>(args, 0)?)?;
            sim.write("BodyLength", arg::<f64>(args, 1)?)?;
            sim.write("ready", true)
        });

    if keep(omit, "Ready") {
        builder = builder.property("Ready", ValueType::of::<bool>(), |target, _| {
            Ok(TypedValue::new(this(target, "Ready")?.read::<bool>("ready")?))
        });
    }
    if keep(omit, "IterationOutput") {
        builder = builder.property("IterationOutput", f64_type.clone(), |target, _| {
            Ok(TypedValue::new(this(target, "IterationOutput")?.read::<f64>("iterationOutput")?))
        });
    }
    for (property, field) in [("WingModels", "wingModels"), ("AeroSections", "aeroSections")] {
        if !keep(omit, property) {
            continue;
        }
        builder = builder.property_with_setter(
            property,
            handles_type.clone(),
            move |target, _| Ok(TypedValue::new(this(target, property)?.read::<Vec<ObjectRef>>(field)?)),
            move |target, args| {
                this(target, property)?.write(field, arg::<Vec<ObjectRef>>(args, 0)?)?;
                Ok(TypedValue::unit())
            },
        );
    }

    if keep(omit, "SetCurrentBody") {
        let cell = Arc::clone(&self_type);
        builder = builder.static_method(
            "SetCurrentBody",
            vec![ValueType::of::<String>()],
            ValueType::Void,
            move |_, args| {
                owner_of(&cell)?.write_static_field("CurrentBody", arg::<String>(args, 0)?)?;
                Ok(TypedValue::unit())
            },
        );
    }
    if keep(omit, "ComputeGravity") {
        let cell = Arc::clone(&self_type);
        builder = builder.static_method(
            "ComputeGravity",
            vec![f64_type.clone()],
            f64_type.clone(),
            move |_, args| {
                let body = owner_of(&cell)?.read_static_field::<String>("CurrentBody")?;
                let (g0, radius) = body_constants(&body)?;
                let altitude: f64 = arg(args, 0)?;
                Ok(TypedValue::new(g0 * (radius / (radius + altitude)).powi(2)))
            },
        );
    }
    if keep(omit, "CalculateForces") {
        builder = builder.method(
            "CalculateForces",
            vec![f64_type.clone(); 6],
            ValueType::of::<Vector3<f64>>(),
            |target, args| {
                let sim = this(target, "CalculateForces")?;
                let mach: f64 = arg(args, 0)?;
                let alpha: f64 = arg(args, 1)?;
                let density: f64 = arg(args, 3)?;
                let area: f64 = arg(args, 4)?;
                let length: f64 = arg(args, 5)?;

                let mut drag_area = 0.02 * area;
                let mut flat_area = 0.0;
                for section in sim.read::<Vec<ObjectRef>>("aeroSections")? {
                    let cross: f64 = section.read("CrossSectionArea")?;
                    drag_area += cross * section.read::<f64>("DragCoefficient")?;
                    flat_area += cross * (section.read::<f64>("FlatnessRatio")? - 1.0);
                }
                let speed = mach * SPEED_OF_SOUND;
                let q = 0.5 * density * speed * speed;
                let lift = q * alpha.to_radians() * (0.1 * area * length / (length + 1.0) + flat_area);
                Ok(TypedValue::new(Vector3::new(-q * drag_area, 0.0, lift)))
            },
        );
    }
    if keep(omit, "SolveAlpha") {
        builder = builder.method("SolveAlpha", vec![f64_type.clone(); 4], f64_type, |target, args| {
            let sim = this(target, "SolveAlpha")?;
            let mach: f64 = arg(args, 0)?;
            let density: f64 = arg(args, 2)?;
            let target_lift: f64 = arg(args, 3)?;

            let wings = sim.read::<Vec<ObjectRef>>("wingModels")?;
            let speed = mach * SPEED_OF_SOUND;
            let q = 0.5 * density * speed * speed;
            let mut slope_area = 0.0;
            for wing in &wings {
                lift_slope(wing, mach)?;
                slope_area += wing.read::<f64>("liftslope")? * wing.read::<f64>("S")?;
            }
            if q * slope_area <= 0.0 {
                return Err(InvokeError::failed("SolveAlpha", "no lifting area"));
            }
            let alpha = target_lift / (q * slope_area);
            for wing in &wings {
                let slope: f64 = wing.read("liftslope")?;
                wing.write("Cl", slope * alpha)?;
            }
            sim.write("iterationOutput", alpha)?;
            Ok(TypedValue::new(alpha))
        });
    }

    let built = builder.build();
    let _ = self_type.set(Arc::downgrade(&built));
    built
}

/// The four published types of the reference module
pub struct AeroTypes {
    pub wing: Arc<RuntimeType>,
    pub interaction: Arc<RuntimeType>,
    pub section: Arc<RuntimeType>,
    pub simulation: Arc<RuntimeType>,
}

impl AeroTypes {
    pub fn new() -> Self {
        Self::omitting(&[])
    }

    /// Types with the named members left out, as an incompatible module
    /// version would publish them
    pub fn omitting(omit: &[&str]) -> Self {
        Self {
            wing: wing_type(omit),
            interaction: interaction_type(omit),
            section: section_type(omit),
            simulation: simulation_type(omit),
        }
    }

    pub fn module(&self) -> LoadedModule {
        LoadedModule::new(PACKAGE, "1.4.2")
            .with_type(Arc::clone(&self.wing))
            .with_type(Arc::clone(&self.interaction))
            .with_type(Arc::clone(&self.section))
            .with_type(Arc::clone(&self.simulation))
    }

    /// A live wing with its own interaction object
    pub fn wing(&self, area: f64, mac: f64, half_span: f64) -> Result<ObjectRef, InvokeError> {
        let wing = self.wing.instantiate();
        wing.write("S", area)?;
        wing.write("MAC", mac)?;
        wing.write("b_2", half_span)?;
        wing.write("Interaction", self.interaction.instantiate())?;
        Ok(wing)
    }

    pub fn section(&self, position: Vector3<f64>, cross_section: f64, drag: f64) -> Result<ObjectRef, InvokeError> {
        let section = self.section.instantiate();
        section.write("Position", position)?;
        section.write("CrossSectionArea", cross_section)?;
        section.write("DragCoefficient", drag)?;
        Ok(section)
    }

    /// The vehicle's live simulation over `wings` and `sections`
    pub fn live_simulation(
        &self,
        wings: &[ObjectRef],
        sections: &[ObjectRef],
        max_cross_section: f64,
        body_length: f64,
    ) -> Result<ObjectRef, InvokeError> {
        let sim = self.simulation.instantiate();
        sim.write("ready", true)?;
        sim.write("wingModels", wings.to_vec())?;
        sim.write("aeroSections", sections.to_vec())?;
        sim.write("MaxCrossSectionArea", max_cross_section)?;
        sim.write("BodyLength", body_length)?;
        Ok(sim)
    }

    pub fn current_body(&self) -> Result<String, InvokeError> {
        self.simulation.read_static_field("CurrentBody")
    }
}

impl Default for AeroTypes {
    fn default() -> Self {
        Self::new()
    }
}

/// Replace one directional neighbor list on a live wing's interaction object
pub fn link(wing: &ObjectRef, direction: Direction, neighbors: &[(&ObjectRef, f64)]) -> Result<(), InvokeError> {
    let interaction: ObjectRef = wing.read("Interaction")?;
    let prefix = direction.field_prefix();
    let wings: Vec<ObjectRef> = neighbors.iter().map(|(w, _)| (*w).clone()).collect();
    let weights: Vec<f64> = neighbors.iter().map(|(_, weight)| *weight).collect();
    interaction.write(&format!("{}Wings", prefix), wings)?;
    interaction.write(&format!("{}Weights", prefix), weights)
}

/// One directional neighbor list of a wing, read straight off the external
/// interaction object
pub fn neighbors(wing: &ObjectRef, direction: Direction) -> Result<(Vec<ObjectRef>, Vec<f64>), InvokeError> {
    let interaction: ObjectRef = wing.read("Interaction")?;
    let prefix = direction.field_prefix();
    Ok((
        interaction.read(&format!("{}Wings", prefix))?,
        interaction.read(&format!("{}Weights", prefix))?,
    ))
}

pub fn engine(max_thrust: f64, throttle: f64) -> EngineInfo {
    EngineInfo {
        position: Vector3::new(-2.0, 0.0, 0.0),
        thrust_direction: Vector3::x(),
        max_thrust,
        throttle,
        specific_impulse: 300.0,
    }
}

/// Host part with fixed data
#[derive(Debug, Clone)]
pub struct FakePart {
    pub mass: f64,
    pub resource_mass: f64,
    pub center_of_mass: Vector3<f64>,
    pub stage: i32,
    pub shielded: bool,
    pub gear: Option<bool>,
    pub engine: Option<EngineInfo>,
    pub wing: Option<ObjectRef>,
}

impl FakePart {
    pub fn new(mass: f64) -> Self {
        Self {
            mass,
            resource_mass: 0.0,
            center_of_mass: Vector3::zeros(),
            stage: 0,
            shielded: false,
            gear: None,
            engine: None,
            wing: None,
        }
    }

    pub fn with_resources(mut self, mass: f64) -> Self {
        self.resource_mass = mass;
        self
    }

    pub fn at(mut self, center_of_mass: Vector3<f64>) -> Self {
        self.center_of_mass = center_of_mass;
        self
    }

    pub fn on_stage(mut self, stage: i32) -> Self {
        self.stage = stage;
        self
    }

    pub fn shielded(mut self) -> Self {
        self.shielded = true;
        self
    }

    pub fn with_gear(mut self, deployed: bool) -> Self {
        self.gear = Some(deployed);
        self
    }

    pub fn with_engine(mut self, engine: EngineInfo) -> Self {
        self.engine = Some(engine);
        self
    }

    pub fn with_wing(mut self, wing: ObjectRef) -> Self {
        self.wing = Some(wing);
        self
    }
}

impl Part for FakePart {
    fn mass(&self) -> f64 {
        self.mass
    }

    fn resource_mass(&self) -> f64 {
        self.resource_mass
    }

    fn center_of_mass(&self) -> Vector3<f64> {
        self.center_of_mass
    }

    fn stage_index(&self) -> i32 {
        self.stage
    }

    fn is_shielded(&self) -> bool {
        self.shielded
    }

    fn gear_deployed(&self) -> Option<bool> {
        self.gear
    }

    fn engine(&self) -> Option<EngineInfo> {
        self.engine
    }

    fn wing(&self) -> Option<&ObjectRef> {
        self.wing.as_ref()
    }
}

#[derive(Debug, Clone)]
pub struct FakeVehicle {
    pub parts: Vec<FakePart>,
    pub active_stage: i32,
    pub simulation: Option<ObjectRef>,
}

impl Vehicle for FakeVehicle {
    fn parts(&self) -> Vec<&dyn Part> {
        self.parts.iter().map(|p| p as &dyn Part).collect()
    }

    fn active_stage(&self) -> i32 {
        self.active_stage
    }

    fn simulation(&self) -> Option<&ObjectRef> {
        self.simulation.as_ref()
    }
}

/// Fuselage, one wing (S 2.0, MAC 1.5, b_2 3.0) and an engine that only
/// fires on a later stage
pub fn three_part_vehicle(types: &AeroTypes) -> Result<FakeVehicle, InvokeError> {
    let wing = types.wing(2.0, 1.5, 3.0)?;
    let section = types.section(Vector3::zeros(), 1.2, 0.3)?;
    let simulation = types.live_simulation(&[wing.clone()], &[section], 1.2, 6.0)?;
    Ok(FakeVehicle {
        parts: vec![
            FakePart::new(2.0).with_resources(3.0).at(Vector3::new(1.0, 0.0, 0.0)),
            FakePart::new(0.5).with_wing(wing),
            FakePart::new(1.0).on_stage(1).with_engine(engine(200.0, 1.0)),
        ],
        active_stage: 0,
        simulation: Some(simulation),
    })
}

/// Canard, main wing and tail plane with cyclic interaction lists, two body
/// sections, one running engine and deployed gear
pub fn glider(types: &AeroTypes) -> Result<FakeVehicle, InvokeError> {
    let canard = types.wing(0.5, 0.4, 0.6)?;
    let main = types.wing(4.0, 1.0, 2.5)?;
    let tail = types.wing(1.0, 0.5, 1.0)?;

    link(&main, Direction::Forward, &[(&canard, 0.4)])?;
    link(&tail, Direction::Forward, &[(&main, 0.6), (&canard, 0.1)])?;
    link(&canard, Direction::Backward, &[(&main, 0.4)])?;
    link(&main, Direction::Backward, &[(&tail, 0.6)])?;
    link(&main, Direction::Left, &[(&canard, 0.2)])?;
    link(&canard, Direction::Right, &[(&main, 0.2)])?;

    let sections = vec![
        types.section(Vector3::new(1.0, 0.0, 0.0), 0.8, 0.25)?,
        types.section(Vector3::new(-1.5, 0.0, 0.0), 1.1, 0.35)?,
    ];
    let simulation = types.live_simulation(&[canard.clone(), main.clone(), tail.clone()], &sections, 1.1, 7.5)?;

    Ok(FakeVehicle {
        parts: vec![
            FakePart::new(3.0).with_resources(2.0).at(Vector3::new(0.5, 0.0, 0.0)),
            FakePart::new(0.2).at(Vector3::new(2.0, 0.0, 0.0)).with_wing(canard),
            FakePart::new(0.8).with_wing(main),
            FakePart::new(0.3).at(Vector3::new(-3.0, 0.0, 0.0)).with_wing(tail),
            FakePart::new(1.0)
                .at(Vector3::new(-3.5, 0.0, 0.0))
                .with_engine(engine(60.0, 0.5)),
            FakePart::new(0.1).with_gear(true),
        ],
        active_stage: 0,
        simulation: Some(simulation),
    })
}
