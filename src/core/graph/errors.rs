use crate::core::runtime::InvokeError;
use crate::core::surface::AdapterError;
use crate::core::types::{Direction, InstanceId};
use thiserror::Error;

/// Errors raised while building, cloning or editing a surface graph
#[derive(Debug, Clone, Error)]
pub enum GraphError {
    #[error("surface {surface}: {direction:?} list has {members} neighbors but {weights} weights")]
    WeightLengthMismatch {
        surface: usize,
        direction: Direction,
        members: usize,
        weights: usize,
    },

    #[error("surface {surface} references {neighbor}, which is outside the graph")]
    DanglingNeighbor { surface: InstanceId, neighbor: InstanceId },

    #[error("surface {surface}: neighbor position {neighbor} out of range for {len} surfaces")]
    NeighborOutOfRange { surface: usize, neighbor: usize, len: usize },

    #[error("surface {surface} appears at positions {first} and {second}")]
    DuplicateSurface { surface: InstanceId, first: usize, second: usize },

    #[error(transparent)]
    Adapter(#[from] AdapterError),
}

impl From<InvokeError> for GraphError {
    fn from(err: InvokeError) -> Self {
        GraphError::Adapter(AdapterError::Invoke(err))
    }
}
