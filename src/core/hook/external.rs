use super::bindings::{AeroBindings, SectionBindings, SimulationBindings, SurfaceBindings};
use super::config::HookConfig;
use super::errors::HookError;
use crate::core::binding::BindingFactory;
use crate::core::runtime::{loaded_modules, LoadedModule, ModuleCatalog, RuntimeType};
use log::{debug, info, warn};
use std::sync::{Arc, OnceLock};

/// Whether the external aerodynamics module can be driven
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Available,
    Unavailable,
}

impl Availability {
    pub fn is_available(self) -> bool {
        self == Availability::Available
    }
}

/// Locates the external module and binds everything this crate calls on it.
///
/// Initialization happens once; the outcome (bindings or the reason they could
/// not be produced) is kept for the lifetime of the hook.
pub struct ExternalHook {
    config: HookConfig,
    factory: BindingFactory,
    outcome: OnceLock<Result<Arc<AeroBindings>, HookError>>,
}

impl ExternalHook {
    pub fn new(config: HookConfig) -> Self {
        Self {
            config,
            factory: BindingFactory::new(),
            outcome: OnceLock::new(),
        }
    }

    pub fn config(&self) -> &HookConfig {
        &self.config
    }

    /// Search `catalog` and bind all members. Later calls return the first
    /// result without looking at the catalog again.
    pub fn initialize(&self, catalog: &ModuleCatalog) -> Availability {
        let outcome = self.outcome.get_or_init(|| {
            let outcome = self.load(catalog).map(Arc::new);
            match &outcome {
                Ok(_) => info!("External module '{}' hooked", self.config.package_name),
                Err(HookError::ModuleMissing(name)) => info!("External module '{}' not loaded", name),
                Err(err) => warn!("External module '{}' unavailable: {}", self.config.package_name, err),
            }
            outcome
        });
        if outcome.is_ok() {
            Availability::Available
        } else {
            Availability::Unavailable
        }
    }

    /// `Unavailable` until `initialize` has succeeded
    pub fn availability(&self) -> Availability {
        match self.outcome.get() {
            Some(Ok(_)) => Availability::Available,
            _ => Availability::Unavailable,
        }
    }

    pub fn is_available(&self) -> bool {
        self.availability().is_available()
    }

    pub fn bindings(&self) -> Option<Arc<AeroBindings>> {
        match self.outcome.get() {
            Some(Ok(bindings)) => Some(Arc::clone(bindings)),
            _ => None,
        }
    }

    /// Why initialization failed, if it did
    pub fn failure(&self) -> Option<&HookError> {
        match self.outcome.get() {
            Some(Err(err)) => Some(err),
            _ => None,
        }
    }

    fn load(&self, catalog: &ModuleCatalog) -> Result<AeroBindings, HookError> {
        let module = catalog
            .find(&self.config.package_name)
            .ok_or_else(|| HookError::ModuleMissing(self.config.package_name.clone()))?;
        debug!("Found module {} {}", module.name(), module.version());

        let surface = find_type(&module, &self.config.surface_type)?;
        let interaction = find_type(&module, &self.config.interaction_type)?;
        let section = find_type(&module, &self.config.section_type)?;
        let simulation = find_type(&module, &self.config.simulation_type)?;

        Ok(AeroBindings {
            surface: SurfaceBindings::bind(&self.factory, &surface, &interaction)?,
            simulation: SimulationBindings::bind(&self.factory, &simulation)?,
            section: SectionBindings::bind(&self.factory, &section)?,
        })
    }
}

impl Default for ExternalHook {
    fn default() -> Self {
        Self::new(HookConfig::default())
    }
}

fn find_type(module: &LoadedModule, name: &str) -> Result<Arc<RuntimeType>, HookError> {
    module.find_type(name).ok_or_else(|| HookError::TypeMissing {
        module: module.name().to_string(),
        type_name: name.to_string(),
    })
}

static GLOBAL_HOOK: OnceLock<ExternalHook> = OnceLock::new();

/// The process-wide hook, configured with `HookConfig::default()`
pub fn global_hook() -> &'static ExternalHook {
    GLOBAL_HOOK.get_or_init(ExternalHook::default)
}

/// Initialize the process-wide hook against the process-wide module catalog
pub fn initialize_global() -> Availability {
    global_hook().initialize(loaded_modules())
}
