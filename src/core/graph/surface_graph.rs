use super::cloner::GraphCloner;
use super::correlation::CorrelationMap;
use super::errors::GraphError;
use crate::core::hook::AeroBindings;
use crate::core::runtime::ObjectRef;
use crate::core::surface::{InteractionProfile, NeighborList, SurfaceModel, UpstreamSummary};
use crate::core::types::{Direction, InstanceId};
use std::collections::HashSet;
use std::sync::Arc;

/// Arena of the surface models of one snapshot.
///
/// Neighbor references are positions in this arena, so the whole graph can be
/// cloned without remapping the mirrored lists.
#[derive(Debug, Default)]
pub struct SurfaceGraph {
    surfaces: Vec<SurfaceModel>,
}

impl SurfaceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap live external wings (no copy) and derive each mirrored profile
    /// from the external neighbor lists
    pub fn wrap_all(handles: &[ObjectRef], bindings: &Arc<AeroBindings>) -> Result<Self, GraphError> {
        let mut correlation = CorrelationMap::with_capacity(handles.len());
        let mut surfaces = Vec::with_capacity(handles.len());
        for (position, handle) in handles.iter().enumerate() {
            correlation.insert(handle.id(), position)?;
            surfaces.push(SurfaceModel::wrap(handle.clone(), bindings)?);
        }

        let surface_bindings = &bindings.surface;
        for (position, surface) in surfaces.iter_mut().enumerate() {
            let mut profile = InteractionProfile::new();
            profile.upstream = surface.profile().upstream;
            for direction in Direction::ALL {
                let binding = surface_bindings.direction(direction);
                let wings = binding.wings.get(surface.interaction())?;
                let weights = binding.weights.get(surface.interaction())?;
                let members = wings
                    .iter()
                    .map(|wing| correlation.resolve(surface.id(), wing))
                    .collect::<Result<Vec<_>, _>>()?;
                let (member_count, weight_count) = (members.len(), weights.len());
                let list = NeighborList::new(members, weights).ok_or(GraphError::WeightLengthMismatch {
                    surface: position,
                    direction,
                    members: member_count,
                    weights: weight_count,
                })?;
                profile.set_neighbors(direction, list);
            }
            surface.set_profile(profile);
        }
        Ok(Self { surfaces })
    }

    pub(crate) fn from_surfaces(surfaces: Vec<SurfaceModel>) -> Self {
        Self { surfaces }
    }

    /// Independent copy of this graph backed by new external instances
    pub fn deep_clone(&self, clone_influence_lists: bool) -> Result<Self, GraphError> {
        GraphCloner::clone_graph(&self.surfaces, clone_influence_lists).map(Self::from_surfaces)
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&SurfaceModel> {
        self.surfaces.get(position)
    }

    pub fn get_mut(&mut self, position: usize) -> Option<&mut SurfaceModel> {
        self.surfaces.get_mut(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SurfaceModel> {
        self.surfaces.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut SurfaceModel> {
        self.surfaces.iter_mut()
    }

    /// External handles, in arena order
    pub fn handles(&self) -> Vec<ObjectRef> {
        self.surfaces.iter().map(|s| s.handle().clone()).collect()
    }

    pub fn position_of(&self, id: InstanceId) -> Option<usize> {
        self.surfaces.iter().position(|s| s.id() == id)
    }

    /// Replace one directional list, write it through to the external
    /// interaction object and recompute the upstream summary
    pub fn set_neighbors(
        &mut self,
        position: usize,
        direction: Direction,
        members: Vec<usize>,
        weights: Vec<f64>,
    ) -> Result<(), GraphError> {
        let len = self.surfaces.len();
        self.check_position(position)?;
        if let Some(&neighbor) = members.iter().find(|&&n| n >= len) {
            return Err(GraphError::NeighborOutOfRange {
                surface: position,
                neighbor,
                len,
            });
        }
        let (member_count, weight_count) = (members.len(), weights.len());
        let list = NeighborList::new(members, weights).ok_or(GraphError::WeightLengthMismatch {
            surface: position,
            direction,
            members: member_count,
            weights: weight_count,
        })?;

        let handles: Vec<ObjectRef> = list
            .members()
            .iter()
            .map(|&n| self.surfaces[n].handle().clone())
            .collect();
        let surface = &mut self.surfaces[position];
        let binding = surface.bindings().surface.direction(direction).clone();
        binding.wings.set(surface.interaction(), handles)?;
        binding.weights.set(surface.interaction(), list.weights().to_vec())?;
        surface.profile_mut().set_neighbors(direction, list);

        self.recompute_upstream(position)?;
        Ok(())
    }

    /// Recompute the upstream summary of one surface from its forward
    /// neighbors and push it to the external interaction object
    pub fn recompute_upstream(&mut self, position: usize) -> Result<UpstreamSummary, GraphError> {
        self.check_position(position)?;
        let len = self.surfaces.len();
        let forward = self.surfaces[position].profile().neighbors(Direction::Forward);
        let mut contributions = Vec::with_capacity(forward.len());
        for (neighbor, weight) in forward.iter() {
            let state = self
                .surfaces
                .get(neighbor)
                .map(|s| s.state())
                .ok_or(GraphError::NeighborOutOfRange {
                    surface: position,
                    neighbor,
                    len,
                })?;
            contributions.push((weight, state.area, state.lift_slope, state.stall));
        }
        let summary = UpstreamSummary::accumulate(contributions);

        let surface = &mut self.surfaces[position];
        surface.profile_mut().upstream = summary;
        let bindings = Arc::clone(surface.bindings());
        surface.push_upstream(&bindings.surface)?;
        Ok(summary)
    }

    pub fn recompute_all_upstream(&mut self) -> Result<(), GraphError> {
        for position in 0..self.surfaces.len() {
            self.recompute_upstream(position)?;
        }
        Ok(())
    }

    /// Check that every mirrored and external neighbor reference stays inside
    /// this graph
    pub fn validate_closed(&self) -> Result<(), GraphError> {
        let len = self.surfaces.len();
        let members: HashSet<InstanceId> = self.surfaces.iter().map(|s| s.id()).collect();
        for (position, surface) in self.surfaces.iter().enumerate() {
            let bindings = &surface.bindings().surface;
            for (direction, list) in surface.profile().iter() {
                if let Some(&neighbor) = list.members().iter().find(|&&n| n >= len) {
                    return Err(GraphError::NeighborOutOfRange {
                        surface: position,
                        neighbor,
                        len,
                    });
                }
                let binding = bindings.direction(direction);
                let wings = binding.wings.get(surface.interaction())?;
                let weights = binding.weights.get(surface.interaction())?;
                if wings.len() != weights.len() {
                    return Err(GraphError::WeightLengthMismatch {
                        surface: position,
                        direction,
                        members: wings.len(),
                        weights: weights.len(),
                    });
                }
                if let Some(outside) = wings.iter().find(|w| !members.contains(&w.id())) {
                    return Err(GraphError::DanglingNeighbor {
                        surface: surface.id(),
                        neighbor: outside.id(),
                    });
                }
            }
        }
        Ok(())
    }

    fn check_position(&self, position: usize) -> Result<(), GraphError> {
        if position < self.surfaces.len() {
            Ok(())
        } else {
            Err(GraphError::NeighborOutOfRange {
                surface: position,
                neighbor: position,
                len: self.surfaces.len(),
            })
        }
    }
}
