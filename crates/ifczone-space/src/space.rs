//! Rooms and their thermal-zone quantities.

use ifczone_core::entity::remove_non_alphanumeric;
use ifczone_core::{EntityRef, Result, Settings, ZoneError};
use ifczone_geometry::OrientedBoundingBox;
use ifczone_math::round;

#[derive(Debug, Clone)]
pub struct Space {
    pub entity: EntityRef,
    pub bounding_box: OrientedBoundingBox,
    pub average_room_height: f64,
    pub floor_area: f64,
    pub bounding_box_height: f64,
    pub bounding_box_volume: f64,
}

impl Space {
    /// Build a space from its vertex cloud.
    ///
    /// `footprint_area` and `volume` come from the exact shape when the loader
    /// can compute them. Without a footprint the floor area is derived from
    /// the box.
    pub fn new(
        entity: EntityRef,
        vertices: &[[f64; 3]],
        footprint_area: Option<f64>,
        volume: Option<f64>,
        settings: Settings,
    ) -> Result<Self> {
        let bounding_box = OrientedBoundingBox::from_entity(entity.clone(), vertices, settings)?;
        let (floor_area, average_room_height) = match footprint_area {
            Some(area) if area > 0.0 && !settings.is_zero(area) => (area, volume.unwrap_or(bounding_box.volume) / area),
            _ => {
                if bounding_box.height <= 0.0 {
                    return Err(ZoneError::Geometry(format!(
                        "space {} has a flat bounding box and no footprint area",
                        entity
                    )));
                }
                (bounding_box.volume / bounding_box.height, bounding_box.height)
            }
        };
        Ok(Self {
            entity,
            average_room_height: round(average_room_height),
            floor_area: round(floor_area),
            bounding_box_height: round(bounding_box.height),
            bounding_box_volume: round(bounding_box.volume),
            bounding_box,
        })
    }

    pub fn global_id(&self) -> &str {
        &self.entity.global_id
    }

    /// The box volume agrees with floor area times average height, to the unit.
    pub fn check_volume(&self) -> bool {
        self.bounding_box_volume.round() == (self.floor_area * self.average_room_height).round()
    }

    pub fn space_name(&self) -> String {
        let main_name = match &self.entity.name {
            Some(name) => format!("{}_", remove_non_alphanumeric(name)),
            None => String::new(),
        };
        format!("space_{}{}", main_name, self.entity.clean_global_id())
    }
}
