use crate::core::runtime::InvokeError;
use crate::core::types::InstanceId;
use thiserror::Error;

/// Errors raised while wrapping or driving an external wing model
#[derive(Debug, Clone, Error)]
pub enum AdapterError {
    #[error("instance of {found} is not a {expected}")]
    IncompatibleInstance { expected: String, found: String },

    #[error("wing {0} has no interaction object")]
    MissingInteraction(InstanceId),

    #[error(transparent)]
    Invoke(#[from] InvokeError),
}
