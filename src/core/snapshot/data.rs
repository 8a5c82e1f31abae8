use crate::core::hook::SectionBindings;
use crate::core::runtime::ObjectRef;
use crate::core::surface::AdapterError;
use crate::core::vehicle::EngineInfo;
use nalgebra::Vector3;

/// Mirror of one external aerodynamic body section
#[derive(Debug, Clone)]
pub struct SectionData {
    handle: ObjectRef,
    pub position: Vector3<f64>,
    pub cross_section_area: f64,
    pub drag_coefficient: f64,
    pub flatness_ratio: f64,
}

impl SectionData {
    /// Mirror a live section
    pub fn read(handle: ObjectRef, bindings: &SectionBindings) -> Result<Self, AdapterError> {
        if !handle.runtime_type().is_assignable_to(&bindings.section_type) {
            return Err(AdapterError::IncompatibleInstance {
                expected: bindings.section_type.full_name(),
                found: handle.runtime_type().full_name(),
            });
        }
        Ok(Self {
            position: bindings.position.get(&handle)?,
            cross_section_area: bindings.cross_section_area.get(&handle)?,
            drag_coefficient: bindings.drag_coefficient.get(&handle)?,
            flatness_ratio: bindings.flatness_ratio.get(&handle)?,
            handle,
        })
    }

    /// Mirror an independent copy of a live section
    pub fn read_clone(handle: &ObjectRef, bindings: &SectionBindings) -> Result<Self, AdapterError> {
        Self::read(handle.shallow_clone()?, bindings)
    }

    /// Push the mirrored fields onto the external section
    pub fn sync_to_external(&self, bindings: &SectionBindings) -> Result<(), AdapterError> {
        let h = &self.handle;
        bindings.position.set(h, self.position)?;
        bindings.cross_section_area.set(h, self.cross_section_area)?;
        bindings.drag_coefficient.set(h, self.drag_coefficient)?;
        bindings.flatness_ratio.set(h, self.flatness_ratio)?;
        Ok(())
    }

    pub fn handle(&self) -> &ObjectRef {
        &self.handle
    }
}

/// Mirror of one engine on the active stage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineModel {
    pub position: Vector3<f64>,
    pub thrust_direction: Vector3<f64>,
    pub max_thrust: f64,
    pub throttle: f64,
    pub specific_impulse: f64,
}

impl EngineModel {
    /// Thrust at the current throttle setting
    pub fn thrust(&self) -> Vector3<f64> {
        self.thrust_direction * (self.max_thrust * self.throttle)
    }
}

impl From<EngineInfo> for EngineModel {
    fn from(info: EngineInfo) -> Self {
        Self {
            position: info.position,
            thrust_direction: info.thrust_direction,
            max_thrust: info.max_thrust,
            throttle: info.throttle,
            specific_impulse: info.specific_impulse,
        }
    }
}

/// Forces from one evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AeroForces {
    /// Sum of the wing forces
    pub wing_force: Vector3<f64>,
    pub body_force: Vector3<f64>,
    pub thrust: Vector3<f64>,
    /// Gravitational force magnitude on the whole vehicle
    pub weight: f64,
}

impl AeroForces {
    /// Aerodynamic plus propulsive force
    pub fn total(&self) -> Vector3<f64> {
        self.wing_force + self.body_force + self.thrust
    }
}

impl Default for AeroForces {
    fn default() -> Self {
        Self {
            wing_force: Vector3::zeros(),
            body_force: Vector3::zeros(),
            thrust: Vector3::zeros(),
            weight: 0.0,
        }
    }
}
