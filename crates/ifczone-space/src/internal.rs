//! Elements shared by two neighbouring spaces.
//!
//! Two spaces are neighbours when their boxes face each other across at
//! most one wall thickness. An element bounding both is internal when each
//! space sees it on the side facing the other space.

use ifczone_core::Settings;
use ifczone_math::Vector;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::boundary::SpaceBoundaries;
use crate::element::ElementKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InternalElement {
    /// Global ids of the two spaces.
    pub spaces: (String, String),
    pub element: String,
    pub kind: ElementKind,
    /// Smaller of the two shared areas.
    pub area: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InternalElements {
    pub elements: Vec<InternalElement>,
}

impl InternalElements {
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Element global ids, deduplicated, in discovery order.
    pub fn global_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = Vec::new();
        for element in &self.elements {
            if !ids.contains(&element.element) {
                ids.push(element.element.clone());
            }
        }
        ids
    }
}

/// Locate (space index, boundary index) pairs and mark their surfaces internal.
pub fn get_internal_elements(
    space_boundaries: &mut [SpaceBoundaries],
    settings: &Settings,
) -> InternalElements {
    let adjacency_settings = settings.with_contact_tolerance(settings.wall_thickness);
    let mut found = Vec::new();
    let mut marks = Vec::new();

    for (i, first) in space_boundaries.iter().enumerate() {
        for (j, second) in space_boundaries.iter().enumerate().skip(i + 1) {
            let Some(adjacency) = first
                .space
                .bounding_box
                .intersect_faces_with(&second.space.bounding_box, &adjacency_settings)
            else {
                continue;
            };
            for (bi, boundary_1) in first.boundaries.iter().enumerate() {
                for (bj, boundary_2) in second.boundaries.iter().enumerate() {
                    if boundary_1.entity.global_id != boundary_2.entity.global_id {
                        continue;
                    }
                    let o1 = &boundary_1.common_surface.orientation;
                    let o2 = &boundary_2.common_surface.orientation;
                    if !faces_each_other(o1, o2, &adjacency.orientation, settings.zero_tolerance) {
                        continue;
                    }
                    found.push(InternalElement {
                        spaces: (
                            first.space.global_id().to_string(),
                            second.space.global_id().to_string(),
                        ),
                        element: boundary_1.entity.global_id.clone(),
                        kind: boundary_1.kind,
                        area: boundary_1
                            .common_surface
                            .area
                            .min(boundary_2.common_surface.area),
                    });
                    marks.push((i, bi));
                    marks.push((j, bj));
                }
            }
        }
    }

    for (space, boundary) in marks {
        space_boundaries[space].boundaries[boundary]
            .common_surface
            .exterior = false;
    }
    debug!(count = found.len(), "internal elements found");
    InternalElements { elements: found }
}

/// Opposite orientations, both along the direction from one space to the other.
fn faces_each_other(o1: &Vector, o2: &Vector, adjacency: &Vector, tolerance: f64) -> bool {
    o1.dot(o2) < 0.0
        && (*o1 * *adjacency).is_a_zero(tolerance)
        && (*o2 * *adjacency).is_a_zero(tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_faces_each_other() {
        assert!(faces_each_other(&Vector::X, &-Vector::X, &Vector::X, 1e-6));
        assert!(faces_each_other(&-Vector::X, &Vector::X, &Vector::X, 1e-6));
        assert!(!faces_each_other(&Vector::Y, &Vector::Y, &Vector::X, 1e-6));
        assert!(!faces_each_other(&Vector::Y, &-Vector::Y, &Vector::X, 1e-6));
    }

    #[test]
    fn test_global_ids_deduplicated() {
        let element = |id: &str| InternalElement {
            spaces: ("a".into(), "b".into()),
            element: id.into(),
            kind: ElementKind::Wall,
            area: 1.0,
        };
        let internal = InternalElements {
            elements: vec![element("w1"), element("w2"), element("w1")],
        };
        assert_eq!(internal.len(), 3);
        assert_eq!(internal.global_ids(), vec!["w1".to_string(), "w2".to_string()]);
    }
}
