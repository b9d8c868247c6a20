//! Broad-phase shortlist of elements that may touch a space.

use ifczone_geometry::OrientedBoundingBox;
use ifczone_math::Aabb3;

use crate::element::BuildingElement;

/// Spatial prefilter run before the exact face-pair comparison.
pub trait ClashIndex: Sync {
    /// Indices into the element slice the index was built from.
    fn candidates(&self, space_box: &OrientedBoundingBox) -> Vec<usize>;
}

/// Linear scan over world-aligned envelopes inflated by a clearance.
#[derive(Debug, Clone)]
pub struct AabbClashIndex {
    envelopes: Vec<Aabb3>,
}

impl AabbClashIndex {
    pub fn new(elements: &[BuildingElement], clearance: f64) -> Self {
        let envelopes = elements
            .iter()
            .map(|e| e.bounding_box.aabb().expand(clearance))
            .collect();
        Self { envelopes }
    }

    pub fn len(&self) -> usize {
        self.envelopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.envelopes.is_empty()
    }
}

impl ClashIndex for AabbClashIndex {
    fn candidates(&self, space_box: &OrientedBoundingBox) -> Vec<usize> {
        let target = space_box.aabb();
        self.envelopes
            .iter()
            .enumerate()
            .filter(|(_, envelope)| envelope.intersects(&target))
            .map(|(i, _)| i)
            .collect()
    }
}
