use nalgebra::Vector3;

/// Mirror of the external wing-model fields this crate reads or writes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceState {
    // geometry
    pub area: f64,
    pub mac: f64,
    pub b_2: f64,
    pub cos_sweep_angle: f64,
    pub effective_oswald: f64,

    pub cl: f64,
    pub cd: f64,
    pub cm: f64,
    pub stall: f64,
    pub raw_lift_slope: f64,
    pub lift_slope: f64,
    pub aoa_max: f64,

    pub parallel_in_plane: Vector3<f64>,
    pub perp: Vector3<f64>,
    pub lift_direction: Vector3<f64>,
    pub aerodynamic_center: Vector3<f64>,
}

impl Default for SurfaceState {
    fn default() -> Self {
        Self {
            area: 0.0,
            mac: 0.0,
            b_2: 0.0,
            cos_sweep_angle: 1.0,
            effective_oswald: 1.0,
            cl: 0.0,
            cd: 0.0,
            cm: 0.0,
            stall: 0.0,
            raw_lift_slope: 0.0,
            lift_slope: 0.0,
            aoa_max: 0.0,
            parallel_in_plane: Vector3::zeros(),
            perp: Vector3::zeros(),
            lift_direction: Vector3::zeros(),
            aerodynamic_center: Vector3::zeros(),
        }
    }
}
