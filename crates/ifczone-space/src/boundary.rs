//! Space boundaries: the elements a space touches and the surfaces they share.

use ifczone_core::entity::remove_non_alphanumeric;
use ifczone_core::{EntityRef, Settings};
use ifczone_geometry::{CommonSurface, OrientedBoundingBox};
use ifczone_math::{Point, Vector};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clash::ClashIndex;
use crate::element::{BoundaryKind, BuildingElement, ElementKind, Tilt};
use crate::space::Space;

/// `(area, orientation, global id, IFC type)`.
pub type BoundaryDescription = (f64, [f64; 3], String, String);

/// One external boundary of a zone model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryModel {
    pub name: String,
    pub surface: f64,
    pub azimuth: f64,
    pub tilt: Tilt,
    pub kind: BoundaryKind,
}

/// Thermal zone handed to the simulation model generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneModel {
    pub name: String,
    pub floor_area: f64,
    pub average_room_height: f64,
    pub external_boundaries: Vec<BoundaryModel>,
}

#[derive(Debug, Clone)]
pub struct SpaceBoundary {
    pub bounding_box: OrientedBoundingBox,
    pub entity: EntityRef,
    pub kind: ElementKind,
    pub common_surface: CommonSurface,
}

impl SpaceBoundary {
    /// `None` when the element does not touch the space.
    pub fn from_space_and_element(
        space_box: &OrientedBoundingBox,
        element: &BuildingElement,
    ) -> Option<Self> {
        Self::from_space_and_element_with(space_box, element, space_box.settings())
    }

    pub fn from_space_and_element_with(
        space_box: &OrientedBoundingBox,
        element: &BuildingElement,
        settings: &Settings,
    ) -> Option<Self> {
        let common_surface = space_box.intersect_faces_with(&element.bounding_box, settings)?;
        Some(Self {
            bounding_box: element.bounding_box.clone(),
            entity: element.entity.clone(),
            kind: element.kind,
            common_surface,
        })
    }

    pub fn global_id(&self) -> &str {
        &self.entity.global_id
    }

    pub fn boundary_name(&self) -> String {
        format!("{}_{}", self.entity.ifc_type, remove_non_alphanumeric(&self.entity.global_id))
    }

    pub fn description(&self) -> BoundaryDescription {
        let (area, orientation) = self.common_surface.description();
        (
            area,
            orientation,
            self.entity.global_id.clone(),
            self.entity.ifc_type.clone(),
        )
    }

    pub fn model_element(&self, exclude: &[String], north_axis: &Vector) -> Option<BoundaryModel> {
        if exclude.iter().any(|id| *id == self.entity.global_id) {
            return None;
        }
        let orientation = &self.common_surface.orientation;
        Some(BoundaryModel {
            name: self.boundary_name(),
            surface: self.common_surface.area,
            azimuth: self.common_surface.azimuth(north_axis),
            tilt: self.kind.tilt(orientation),
            kind: self.kind.boundary_kind(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct SpaceBoundaries {
    pub space: Space,
    pub boundaries: Vec<SpaceBoundary>,
}

impl SpaceBoundaries {
    /// Compare the space against every element the clash index shortlists.
    pub fn from_space(
        space: Space,
        elements: &[BuildingElement],
        clash_index: &impl ClashIndex,
        settings: &Settings,
    ) -> Self {
        let candidates = clash_index.candidates(&space.bounding_box);
        let boundaries: Vec<SpaceBoundary> = candidates
            .iter()
            .filter_map(|&i| elements.get(i))
            .filter_map(|element| {
                SpaceBoundary::from_space_and_element_with(&space.bounding_box, element, settings)
            })
            .collect();
        debug!(
            space = %space.entity,
            candidates = candidates.len(),
            boundaries = boundaries.len(),
            "space boundaries computed"
        );
        Self { space, boundaries }
    }

    /// Descriptions sorted by global id, then area.
    pub fn description(&self) -> Vec<BoundaryDescription> {
        let mut descriptions: Vec<BoundaryDescription> =
            self.boundaries.iter().map(SpaceBoundary::description).collect();
        descriptions.sort_by(|a, b| a.2.cmp(&b.2).then(a.0.total_cmp(&b.0)));
        descriptions
    }

    pub fn lines(&self) -> Vec<(Point, Point)> {
        self.boundaries
            .iter()
            .flat_map(|b| b.common_surface.lines())
            .collect()
    }

    /// Drop the boundaries of the given elements.
    pub fn remove(&mut self, global_ids: &[String]) {
        self.boundaries
            .retain(|b| !global_ids.iter().any(|id| *id == b.entity.global_id));
    }

    /// `None` when no external boundary is left after exclusion.
    pub fn model(&self, exclude: &[String], north_axis: &Vector) -> Option<ZoneModel> {
        let external_boundaries: Vec<BoundaryModel> = self
            .boundaries
            .iter()
            .filter_map(|b| b.model_element(exclude, north_axis))
            .collect();
        if external_boundaries.is_empty() {
            return None;
        }
        Some(ZoneModel {
            name: self.space.space_name(),
            floor_area: self.space.floor_area,
            average_room_height: self.space.average_room_height,
            external_boundaries,
        })
    }
}
