use crate::core::binding::BindError;
use thiserror::Error;

/// Why the external module could not be hooked
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HookError {
    #[error("module '{0}' is not loaded")]
    ModuleMissing(String),

    #[error("module '{module}' has no type named '{type_name}'")]
    TypeMissing { module: String, type_name: String },

    #[error("binding failed: {0}")]
    Binding(#[from] BindError),
}
