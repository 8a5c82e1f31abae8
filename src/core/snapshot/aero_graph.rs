use super::data::SectionData;
use super::errors::SnapshotError;
use crate::core::graph::SurfaceGraph;
use crate::core::hook::AeroBindings;
use crate::core::runtime::ObjectRef;
use std::sync::Arc;

/// Cloned wing graph and body sections of one snapshot
#[derive(Debug, Default)]
pub struct AeroGraph {
    pub surfaces: SurfaceGraph,
    pub sections: Vec<SectionData>,
}

impl AeroGraph {
    /// Independent copy of a live simulation's wings and sections
    pub fn from_live(
        wings: &[ObjectRef],
        sections: &[ObjectRef],
        bindings: &Arc<AeroBindings>,
        clone_influence_lists: bool,
    ) -> Result<Self, SnapshotError> {
        let live = SurfaceGraph::wrap_all(wings, bindings)?;
        let surfaces = live.deep_clone(clone_influence_lists)?;
        let sections = sections
            .iter()
            .map(|section| SectionData::read_clone(section, &bindings.section))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { surfaces, sections })
    }

    pub fn deep_clone(&self, bindings: &AeroBindings, clone_influence_lists: bool) -> Result<Self, SnapshotError> {
        let surfaces = self.surfaces.deep_clone(clone_influence_lists)?;
        let sections = self
            .sections
            .iter()
            .map(|section| -> Result<SectionData, SnapshotError> {
                let mut copy = SectionData::read_clone(section.handle(), &bindings.section)?;
                copy.position = section.position;
                copy.cross_section_area = section.cross_section_area;
                copy.drag_coefficient = section.drag_coefficient;
                copy.flatness_ratio = section.flatness_ratio;
                copy.sync_to_external(&bindings.section)?;
                Ok(copy)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { surfaces, sections })
    }

    pub fn wing_handles(&self) -> Vec<ObjectRef> {
        self.surfaces.handles()
    }

    pub fn section_handles(&self) -> Vec<ObjectRef> {
        self.sections.iter().map(|s| s.handle().clone()).collect()
    }
}
