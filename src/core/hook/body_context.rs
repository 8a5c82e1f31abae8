use super::bindings::SimulationBindings;
use crate::core::runtime::InvokeError;
use log::debug;
use std::sync::{Mutex, PoisonError};

static BODY_GATE: Mutex<()> = Mutex::new(());

/// Serializes access to the external module's process-wide "current
/// celestial body".
///
/// The external gravity and interpolation caches key off that global, so the
/// update and every read depending on it happen under one gate.
pub struct BodyContext<'a> {
    simulation: &'a SimulationBindings,
}

impl<'a> BodyContext<'a> {
    pub fn new(simulation: &'a SimulationBindings) -> Self {
        Self { simulation }
    }

    /// Run `f` with `body` as the external current body
    pub fn with_body<R>(&self, body: &str, f: impl FnOnce() -> Result<R, InvokeError>) -> Result<R, InvokeError> {
        let _gate = BODY_GATE.lock().unwrap_or_else(PoisonError::into_inner);
        let current = self.simulation.current_body.get()?;
        if current != body {
            debug!("Switching current body {} -> {}", current, body);
            self.simulation.set_current_body.call_static((body.to_string(),))?;
        }
        f()
    }
}
