use super::correlation::CorrelationMap;
use super::errors::GraphError;
use crate::core::surface::SurfaceModel;
use crate::core::types::Direction;
use log::debug;

/// Deep-clones a set of mutually referencing surface models
pub struct GraphCloner;

impl GraphCloner {
    /// Clone `sources` into new, independent surface models.
    ///
    /// Mirrored neighbor positions carry over unchanged. The external neighbor
    /// lists of every clone are rewritten to point at the clones. Any failure
    /// aborts the whole clone.
    pub fn clone_graph(sources: &[SurfaceModel], clone_influence_lists: bool) -> Result<Vec<SurfaceModel>, GraphError> {
        let mut correlation = CorrelationMap::with_capacity(sources.len());
        let mut clones = Vec::with_capacity(sources.len());

        // node phase
        for (position, source) in sources.iter().enumerate() {
            correlation.insert(source.id(), position)?;
            let mut clone = SurfaceModel::wrap_and_clone(source.handle(), source.bindings())?;
            *clone.state_mut() = *source.state();
            clones.push(clone);
        }

        // edge phase
        for (position, source) in sources.iter().enumerate() {
            let profile = source.profile().duplicate(clone_influence_lists);
            for (_, list) in profile.iter() {
                if let Some(&neighbor) = list.members().iter().find(|&&n| n >= sources.len()) {
                    return Err(GraphError::NeighborOutOfRange {
                        surface: position,
                        neighbor,
                        len: sources.len(),
                    });
                }
            }
            rewire_external(&clones, position, &correlation)?;
            clones[position].set_profile(profile);
        }

        debug!(
            "Cloned surface graph of {} wings (influence lists {})",
            clones.len(),
            if clone_influence_lists { "copied" } else { "shared" }
        );
        Ok(clones)
    }
}

/// Point the external neighbor lists of `clones[position]` at clones
fn rewire_external(clones: &[SurfaceModel], position: usize, correlation: &CorrelationMap) -> Result<(), GraphError> {
    let clone = &clones[position];
    let bindings = &clone.bindings().surface;
    for direction in Direction::ALL {
        let binding = bindings.direction(direction);
        let originals = binding.wings.get(clone.interaction())?;
        let rewired = originals
            .iter()
            .map(|original| {
                correlation
                    .resolve(clone.id(), original)
                    .map(|index| clones[index].handle().clone())
            })
            .collect::<Result<Vec<_>, _>>()?;
        binding.wings.set(clone.interaction(), rewired)?;
    }
    Ok(())
}
