//! Read-only view of the host's vehicle model.
//!
//! The host owns vehicles and parts; snapshots only read them.

use crate::core::runtime::ObjectRef;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Engine data a part exposes to snapshots
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineInfo {
    pub position: Vector3<f64>,
    /// Unit vector along which thrust acts
    pub thrust_direction: Vector3<f64>,
    pub max_thrust: f64,
    /// Throttle setting in `[0, 1]`
    pub throttle: f64,
    pub specific_impulse: f64,
}

/// One part of a host vehicle
pub trait Part: Send + Sync {
    /// Dry mass
    fn mass(&self) -> f64;

    /// Mass of the resources the part carries
    fn resource_mass(&self) -> f64;

    /// Center of mass in vehicle coordinates
    fn center_of_mass(&self) -> Vector3<f64>;

    /// Stage on which the part is activated
    fn stage_index(&self) -> i32;

    /// Shielded parts do not contribute to the reference area
    fn is_shielded(&self) -> bool;

    /// `Some(deployed)` for landing gear, `None` otherwise
    fn gear_deployed(&self) -> Option<bool> {
        None
    }

    fn engine(&self) -> Option<EngineInfo> {
        None
    }

    /// External wing model attached to this part
    fn wing(&self) -> Option<&ObjectRef> {
        None
    }
}

/// A host vehicle
pub trait Vehicle: Send + Sync {
    fn parts(&self) -> Vec<&dyn Part>;

    fn active_stage(&self) -> i32;

    /// The vehicle's live external simulation, if it has one
    fn simulation(&self) -> Option<&ObjectRef>;
}

/// Inputs of one force evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightConditions {
    /// Celestial body the vehicle flies around
    pub body: String,
    pub mach: f64,
    /// Angle of attack in degrees
    pub alpha: f64,
    pub altitude: f64,
    pub density: f64,
    /// Free-stream velocity in vehicle coordinates
    pub velocity: [f64; 3],
}

impl FlightConditions {
    pub fn new(body: &str) -> Self {
        Self {
            body: body.to_string(),
            mach: 0.0,
            alpha: 0.0,
            altitude: 0.0,
            density: 0.0,
            velocity: [0.0; 3],
        }
    }

    pub fn with_mach(mut self, mach: f64) -> Self {
        self.mach = mach;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_altitude(mut self, altitude: f64) -> Self {
        self.altitude = altitude;
        self
    }

    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    pub fn with_velocity(mut self, velocity: Vector3<f64>) -> Self {
        self.velocity = [velocity.x, velocity.y, velocity.z];
        self
    }

    pub fn velocity(&self) -> Vector3<f64> {
        Vector3::from(self.velocity)
    }
}
