use crate::core::graph::GraphError;
use crate::core::runtime::InvokeError;
use crate::core::surface::AdapterError;
use crate::core::values::ValueError;
use thiserror::Error;

/// Errors raised while building or evaluating a snapshot
#[derive(Debug, Clone, Error)]
pub enum SnapshotError {
    #[error("external aerodynamics module is unavailable")]
    Unavailable,

    #[error("vehicle has no live external simulation")]
    MissingSimulation,

    #[error("external simulation is not ready")]
    NotReady,

    #[error("snapshot has been released")]
    Released,

    #[error("thread pool: {0}")]
    ThreadPool(String),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Adapter(#[from] AdapterError),

    #[error(transparent)]
    Invoke(#[from] InvokeError),
}

impl From<ValueError> for SnapshotError {
    fn from(err: ValueError) -> Self {
        SnapshotError::Invoke(InvokeError::Value(err))
    }
}
