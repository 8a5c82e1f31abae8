use crate::core::types::Direction;
use std::sync::Arc;

/// Neighbors of one surface in one direction.
///
/// `members` are positions in the owning `SurfaceGraph`; `weights` pairs one
/// influence weight with each member. The weight list may be shared between
/// graphs and is copied on first write.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NeighborList {
    members: Vec<usize>,
    weights: Arc<Vec<f64>>,
}

impl NeighborList {
    /// Returns `None` if the lists differ in length
    pub fn new(members: Vec<usize>, weights: Vec<f64>) -> Option<Self> {
        if members.len() != weights.len() {
            return None;
        }
        Some(Self {
            members,
            weights: Arc::new(weights),
        })
    }

    pub fn members(&self) -> &[usize] {
        &self.members
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.members.iter().copied().zip(self.weights.iter().copied())
    }

    /// Copy with the weight list shared with `self`
    pub fn share(&self) -> Self {
        self.clone()
    }

    /// Copy with an independent weight list
    pub fn deep_copy(&self) -> Self {
        Self {
            members: self.members.clone(),
            weights: Arc::new(self.weights.as_ref().clone()),
        }
    }

    pub fn shares_weights_with(&self, other: &NeighborList) -> bool {
        Arc::ptr_eq(&self.weights, &other.weights)
    }

    /// Mutable weights; detaches a shared list first
    pub fn weights_mut(&mut self) -> &mut [f64] {
        Arc::make_mut(&mut self.weights).as_mut_slice()
    }
}

/// Summary of the upstream (forward) neighbors of a surface
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UpstreamSummary {
    pub area: f64,
    pub lift_slope: f64,
    pub stall: f64,
    pub influence: f64,
}

impl UpstreamSummary {
    /// Accumulate `(weight, area, lift_slope, stall)` per upstream neighbor.
    ///
    /// Area is weighted by influence, lift slope by weighted area and stall by
    /// influence; a zero denominator yields zero.
    pub fn accumulate(neighbors: impl IntoIterator<Item = (f64, f64, f64, f64)>) -> Self {
        let mut influence = 0.0;
        let mut area = 0.0;
        let mut slope_area = 0.0;
        let mut weighted_stall = 0.0;
        for (weight, s, lift_slope, stall) in neighbors {
            influence += weight;
            area += weight * s;
            slope_area += weight * s * lift_slope;
            weighted_stall += weight * stall;
        }
        Self {
            area,
            lift_slope: if area != 0.0 { slope_area / area } else { 0.0 },
            stall: if influence != 0.0 { weighted_stall / influence } else { 0.0 },
            influence,
        }
    }
}

/// The four directional neighbor lists of a surface plus its upstream summary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionProfile {
    lists: [NeighborList; 4],
    pub upstream: UpstreamSummary,
}

impl InteractionProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn neighbors(&self, direction: Direction) -> &NeighborList {
        &self.lists[direction.index()]
    }

    pub fn neighbors_mut(&mut self, direction: Direction) -> &mut NeighborList {
        &mut self.lists[direction.index()]
    }

    pub fn set_neighbors(&mut self, direction: Direction, list: NeighborList) {
        self.lists[direction.index()] = list;
    }

    /// Copy of this profile; weights are shared unless `deep_weights`
    pub fn duplicate(&self, deep_weights: bool) -> Self {
        let copy = |list: &NeighborList| if deep_weights { list.deep_copy() } else { list.share() };
        Self {
            lists: [
                copy(&self.lists[0]),
                copy(&self.lists[1]),
                copy(&self.lists[2]),
                copy(&self.lists[3]),
            ],
            upstream: self.upstream,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Direction, &NeighborList)> {
        Direction::ALL.into_iter().zip(self.lists.iter())
    }
}
