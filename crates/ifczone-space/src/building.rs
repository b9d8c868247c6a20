//! A building: its spaces, their boundaries and the internal elements between them.

use ifczone_core::Settings;
use ifczone_math::Vector;
use rayon::prelude::*;
use tracing::{info, warn};

use crate::boundary::{SpaceBoundaries, ZoneModel};
use crate::clash::AabbClashIndex;
use crate::element::{BuildingElement, ElementShape};
use crate::internal::{get_internal_elements, InternalElements};
use crate::space::Space;

#[derive(Debug, Clone)]
pub struct Building {
    pub name: String,
    pub space_boundaries: Vec<SpaceBoundaries>,
    pub internal_elements: InternalElements,
    pub settings: Settings,
}

impl Building {
    /// Boundaries are computed per space in parallel.
    pub fn new(
        name: impl Into<String>,
        spaces: Vec<Space>,
        elements: Vec<ElementShape>,
        settings: Settings,
    ) -> Self {
        let name = name.into();
        let elements: Vec<BuildingElement> = elements
            .into_iter()
            .filter_map(|shape| {
                let entity = shape.entity.clone();
                match BuildingElement::from_shape(shape, settings) {
                    Ok(element) => Some(element),
                    Err(e) => {
                        warn!(entity = %entity, error = %e, "element dropped");
                        None
                    }
                }
            })
            .collect();
        let clash_index = AabbClashIndex::new(&elements, settings.clash_clearance);

        let mut space_boundaries: Vec<SpaceBoundaries> = spaces
            .into_par_iter()
            .map(|space| SpaceBoundaries::from_space(space, &elements, &clash_index, &settings))
            .collect();
        let internal_elements = get_internal_elements(&mut space_boundaries, &settings);

        info!(
            building = %name,
            spaces = space_boundaries.len(),
            elements = elements.len(),
            internal_elements = internal_elements.len(),
            "building processed"
        );
        Self {
            name,
            space_boundaries,
            internal_elements,
            settings,
        }
    }

    /// Zone models of all spaces with at least one external boundary.
    pub fn zones(&self, north_axis: &Vector) -> Vec<ZoneModel> {
        let exclude = self.internal_elements.global_ids();
        self.space_boundaries
            .iter()
            .filter_map(|b| b.model(&exclude, north_axis))
            .collect()
    }

    pub fn space(&self, global_id: &str) -> Option<&SpaceBoundaries> {
        self.space_boundaries
            .iter()
            .find(|b| b.space.global_id() == global_id)
    }
}
