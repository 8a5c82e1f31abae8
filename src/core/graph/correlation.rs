use super::errors::GraphError;
use crate::core::runtime::ObjectRef;
use crate::core::types::InstanceId;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Maps original external instances to positions in a graph under
/// construction. Lives for one build or clone only.
#[derive(Debug, Default)]
pub struct CorrelationMap {
    positions: HashMap<InstanceId, usize>,
}

impl CorrelationMap {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: HashMap::with_capacity(capacity),
        }
    }

    /// Record `original` at `position`, or `DuplicateSurface` if it is
    /// already mapped
    pub fn insert(&mut self, original: InstanceId, position: usize) -> Result<(), GraphError> {
        match self.positions.entry(original) {
            Entry::Occupied(first) => Err(GraphError::DuplicateSurface {
                surface: original,
                first: *first.get(),
                second: position,
            }),
            Entry::Vacant(slot) => {
                slot.insert(position);
                Ok(())
            }
        }
    }

    pub fn get(&self, original: InstanceId) -> Option<usize> {
        self.positions.get(&original).copied()
    }

    /// Position of `neighbor`, or `DanglingNeighbor` if it is not in the map
    pub fn resolve(&self, owner: InstanceId, neighbor: &ObjectRef) -> Result<usize, GraphError> {
        self.get(neighbor.id()).ok_or(GraphError::DanglingNeighbor {
            surface: owner,
            neighbor: neighbor.id(),
        })
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
