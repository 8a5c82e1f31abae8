pub mod bindings;
pub mod body_context;
pub mod config;
pub mod errors;
pub mod external;

pub use bindings::{AeroBindings, DirectionalBinding, SectionBindings, SimulationBindings, SurfaceBindings};
pub use body_context::BodyContext;
pub use config::HookConfig;
pub use errors::HookError;
pub use external::{global_hook, initialize_global, Availability, ExternalHook};
