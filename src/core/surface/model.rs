use super::errors::AdapterError;
use super::profile::InteractionProfile;
use super::state::SurfaceState;
use crate::core::hook::{AeroBindings, SurfaceBindings};
use crate::core::runtime::{ObjectRef, RuntimeType};
use crate::core::types::InstanceId;
use log::trace;
use nalgebra::Vector3;
use std::sync::Arc;

/// Mirror-and-proxy for one external wing model.
///
/// The mirror holds everything evaluation needs. Calls into the external model
/// are bracketed by `sync_to_external` and `sync_from_external` so the external
/// instance and the mirror agree before and after every delegated computation.
pub struct SurfaceModel {
    handle: ObjectRef,
    interaction: ObjectRef,
    bindings: Arc<AeroBindings>,
    state: SurfaceState,
    profile: InteractionProfile,
}

impl SurfaceModel {
    /// Wrap an existing external wing without copying it
    pub fn wrap(handle: ObjectRef, bindings: &Arc<AeroBindings>) -> Result<Self, AdapterError> {
        let surface = &bindings.surface;
        check_instance(&handle, &surface.surface_type)?;
        let interaction = surface
            .interaction
            .get(&handle)?
            .ok_or_else(|| AdapterError::MissingInteraction(handle.id()))?;
        check_instance(&interaction, &surface.interaction_type)?;

        let mut model = Self {
            handle,
            interaction,
            bindings: Arc::clone(bindings),
            state: SurfaceState::default(),
            profile: InteractionProfile::new(),
        };
        model.sync_from_external()?;
        Ok(model)
    }

    /// Duplicate the external wing and its interaction object, link the copies
    /// and wrap the new wing.
    ///
    /// The copied interaction object still lists the original neighbors; the
    /// graph cloner rewires them.
    pub fn wrap_and_clone(handle: &ObjectRef, bindings: &Arc<AeroBindings>) -> Result<Self, AdapterError> {
        let surface = &bindings.surface;
        check_instance(handle, &surface.surface_type)?;
        let interaction = surface
            .interaction
            .get(handle)?
            .ok_or_else(|| AdapterError::MissingInteraction(handle.id()))?;

        let wing = handle.shallow_clone()?;
        let interaction = interaction.shallow_clone()?;
        surface.interaction.set(&wing, Some(interaction))?;
        trace!("Cloned wing {} -> {}", handle.id(), wing.id());
        Self::wrap(wing, bindings)
    }

    pub fn id(&self) -> InstanceId {
        self.handle.id()
    }

    pub fn handle(&self) -> &ObjectRef {
        &self.handle
    }

    pub fn interaction(&self) -> &ObjectRef {
        &self.interaction
    }

    pub fn bindings(&self) -> &Arc<AeroBindings> {
        &self.bindings
    }

    pub fn state(&self) -> &SurfaceState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SurfaceState {
        &mut self.state
    }

    pub fn profile(&self) -> &InteractionProfile {
        &self.profile
    }

    pub(crate) fn profile_mut(&mut self) -> &mut InteractionProfile {
        &mut self.profile
    }

    pub(crate) fn set_profile(&mut self, profile: InteractionProfile) {
        self.profile = profile;
    }

    /// Push every mirrored field onto the external instances
    pub fn sync_to_external(&self) -> Result<(), AdapterError> {
        let b = &self.bindings.surface;
        let s = &self.state;
        let h = &self.handle;
        b.area.set(h, s.area)?;
        b.mac.set(h, s.mac)?;
        b.b_2.set(h, s.b_2)?;
        b.cos_sweep_angle.set(h, s.cos_sweep_angle)?;
        b.effective_oswald.set(h, s.effective_oswald)?;
        b.cl.set(h, s.cl)?;
        b.cd.set(h, s.cd)?;
        b.cm.set(h, s.cm)?;
        b.stall.set(h, s.stall)?;
        b.raw_lift_slope.set(h, s.raw_lift_slope)?;
        b.lift_slope.set(h, s.lift_slope)?;
        b.aoa_max.set(h, s.aoa_max)?;
        b.parallel_in_plane.set(h, s.parallel_in_plane)?;
        b.perp.set(h, s.perp)?;
        b.lift_direction.set(h, s.lift_direction)?;
        b.aerodynamic_center.set(h, s.aerodynamic_center)?;
        self.push_upstream(b)
    }

    /// Pull the external fields back into the mirror
    pub fn sync_from_external(&mut self) -> Result<(), AdapterError> {
        let b = &self.bindings.surface;
        let h = &self.handle;
        self.state = SurfaceState {
            area: b.area.get(h)?,
            mac: b.mac.get(h)?,
            b_2: b.b_2.get(h)?,
            cos_sweep_angle: b.cos_sweep_angle.get(h)?,
            effective_oswald: b.effective_oswald.get(h)?,
            cl: b.cl.get(h)?,
            cd: b.cd.get(h)?,
            cm: b.cm.get(h)?,
            stall: b.stall.get(h)?,
            raw_lift_slope: b.raw_lift_slope.get(h)?,
            lift_slope: b.lift_slope.get(h)?,
            aoa_max: b.aoa_max.get(h)?,
            parallel_in_plane: b.parallel_in_plane.get(h)?,
            perp: b.perp.get(h)?,
            lift_direction: b.lift_direction.get(h)?,
            aerodynamic_center: b.aerodynamic_center.get(h)?,
        };
        let i = &self.interaction;
        self.profile.upstream.area = b.upstream_area.get(i)?;
        self.profile.upstream.lift_slope = b.upstream_lift_slope.get(i)?;
        self.profile.upstream.stall = b.upstream_stall.get(i)?;
        self.profile.upstream.influence = b.upstream_influence.get(i)?;
        Ok(())
    }

    /// Write only the upstream summary onto the interaction object
    pub(crate) fn push_upstream(&self, b: &SurfaceBindings) -> Result<(), AdapterError> {
        let i = &self.interaction;
        let upstream = &self.profile.upstream;
        b.upstream_area.set(i, upstream.area)?;
        b.upstream_lift_slope.set(i, upstream.lift_slope)?;
        b.upstream_stall.set(i, upstream.stall)?;
        b.upstream_influence.set(i, upstream.influence)?;
        Ok(())
    }

    pub fn compute_aerodynamic_center(&mut self) -> Result<Vector3<f64>, AdapterError> {
        self.sync_to_external()?;
        self.bindings.surface.compute_aerodynamic_center.call(&self.handle, ())?;
        self.sync_from_external()?;
        Ok(self.state.aerodynamic_center)
    }

    pub fn determine_stall(&mut self, aoa: f64) -> Result<(), AdapterError> {
        self.sync_to_external()?;
        self.bindings.surface.determine_stall.call(&self.handle, (aoa,))?;
        self.sync_from_external()
    }

    pub fn subsonic_lift_slope(&mut self, mach: f64) -> Result<f64, AdapterError> {
        self.sync_to_external()?;
        let slope = self.bindings.surface.subsonic_lift_slope.call(&self.handle, (mach,))?;
        self.sync_from_external()?;
        Ok(slope)
    }

    /// Aerodynamic force on this wing for the given free-stream velocity
    pub fn compute_force(&mut self, velocity: Vector3<f64>, mach: f64, density: f64) -> Result<Vector3<f64>, AdapterError> {
        self.sync_to_external()?;
        let surface = &self.bindings.surface;
        let aoa = surface.calculate_aoa.call(&self.handle, (velocity,))?;
        let force = surface
            .calculate_forces
            .call(&self.handle, (velocity, aoa, mach, density))?;
        self.sync_from_external()?;
        Ok(force)
    }
}

impl std::fmt::Debug for SurfaceModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurfaceModel")
            .field("handle", &self.handle)
            .field("state", &self.state)
            .field("profile", &self.profile)
            .finish()
    }
}

fn check_instance(handle: &ObjectRef, expected: &RuntimeType) -> Result<(), AdapterError> {
    if handle.runtime_type().is_assignable_to(expected) {
        Ok(())
    } else {
        Err(AdapterError::IncompatibleInstance {
            expected: expected.full_name(),
            found: handle.runtime_type().full_name(),
        })
    }
}
