pub mod core;

// Re-export commonly used types
pub use crate::core::binding::{BindError, BindingFactory, BoundCallable};
pub use crate::core::execution::{evaluate_batch, ConcurrencyMode, EvaluationConfig};
pub use crate::core::hook::{global_hook, initialize_global, AeroBindings, Availability, ExternalHook, HookConfig};
pub use crate::core::runtime::{loaded_modules, LoadedModule, ModuleCatalog, ObjectRef, RuntimeType};
pub use crate::core::snapshot::{Snapshot, SnapshotPool};
pub use crate::core::surface::SurfaceModel;
pub use crate::core::types::{InstanceId, MemberKind, ValueType};
