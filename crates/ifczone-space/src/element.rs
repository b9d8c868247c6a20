//! Building elements that can bound a space.

use ifczone_core::{EntityRef, Result, Settings, ZoneError};
use ifczone_geometry::OrientedBoundingBox;
use ifczone_math::Vector;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Wall,
    Door,
    Window,
    Roof,
    Slab,
}

/// Exact IFC type tags.
const IFC_TYPES: &[(&str, ElementKind)] = &[
    ("IfcWall", ElementKind::Wall),
    ("IfcWallStandardCase", ElementKind::Wall),
    ("IfcWallElementedCase", ElementKind::Wall),
    ("IfcDoor", ElementKind::Door),
    ("IfcWindow", ElementKind::Window),
    ("IfcRoof", ElementKind::Roof),
    ("IfcSlab", ElementKind::Slab),
];

/// Lowercase fragments tried in order when no exact tag matches.
const IFC_TYPE_FRAGMENTS: &[(&str, ElementKind)] = &[
    ("wall", ElementKind::Wall),
    ("door", ElementKind::Door),
    ("window", ElementKind::Window),
    ("roof", ElementKind::Roof),
    ("slab", ElementKind::Slab),
];

impl ElementKind {
    pub fn from_ifc_type(ifc_type: &str) -> Option<Self> {
        if let Some((_, kind)) = IFC_TYPES.iter().find(|(tag, _)| *tag == ifc_type) {
            return Some(*kind);
        }
        let lower = ifc_type.to_ascii_lowercase();
        IFC_TYPE_FRAGMENTS
            .iter()
            .find(|(fragment, _)| lower.contains(fragment))
            .map(|(_, kind)| *kind)
    }

    pub fn boundary_kind(self) -> BoundaryKind {
        match self {
            ElementKind::Wall | ElementKind::Roof | ElementKind::Slab => BoundaryKind::ExternalWall,
            ElementKind::Door => BoundaryKind::ExternalDoor,
            ElementKind::Window => BoundaryKind::Window,
        }
    }

    /// Tilt of a boundary whose surface points along `orientation`, seen from the space.
    pub fn tilt(self, orientation: &Vector) -> Tilt {
        match self {
            ElementKind::Wall | ElementKind::Door | ElementKind::Window => Tilt::Wall,
            ElementKind::Roof => Tilt::Ceiling,
            ElementKind::Slab if orientation.dot(&Vector::Z) > 0.0 => Tilt::Ceiling,
            ElementKind::Slab => Tilt::Floor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tilt {
    Wall,
    Ceiling,
    Floor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryKind {
    ExternalWall,
    ExternalDoor,
    Window,
}

/// Raw element geometry as handed over by the IFC loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementShape {
    pub entity: EntityRef,
    pub vertices: Vec<[f64; 3]>,
}

impl ElementShape {
    pub fn new(entity: EntityRef, vertices: Vec<[f64; 3]>) -> Self {
        Self { entity, vertices }
    }
}

/// An element with a recognised kind and a built box.
#[derive(Debug, Clone)]
pub struct BuildingElement {
    pub entity: EntityRef,
    pub kind: ElementKind,
    pub bounding_box: OrientedBoundingBox,
}

impl BuildingElement {
    pub fn new(entity: EntityRef, vertices: &[[f64; 3]], settings: Settings) -> Result<Self> {
        let kind = ElementKind::from_ifc_type(&entity.ifc_type).ok_or_else(|| {
            ZoneError::NotFound(format!("no element kind for IFC type {}", entity.ifc_type))
        })?;
        let bounding_box = OrientedBoundingBox::from_entity(entity.clone(), vertices, settings)?;
        Ok(Self {
            entity,
            kind,
            bounding_box,
        })
    }

    pub fn from_shape(shape: ElementShape, settings: Settings) -> Result<Self> {
        Self::new(shape.entity, &shape.vertices, settings)
    }

    pub fn global_id(&self) -> &str {
        &self.entity.global_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_tags() {
        assert_eq!(ElementKind::from_ifc_type("IfcWallStandardCase"), Some(ElementKind::Wall));
        assert_eq!(ElementKind::from_ifc_type("IfcWindow"), Some(ElementKind::Window));
        assert_eq!(ElementKind::from_ifc_type("IfcSlab"), Some(ElementKind::Slab));
    }

    #[test]
    fn test_fragment_fallback() {
        assert_eq!(ElementKind::from_ifc_type("IFCCURTAINWALL"), Some(ElementKind::Wall));
        assert_eq!(ElementKind::from_ifc_type("IfcRoofing"), Some(ElementKind::Roof));
        assert_eq!(ElementKind::from_ifc_type("IfcSpace"), None);
        assert_eq!(ElementKind::from_ifc_type("IfcColumn"), None);
    }

    #[test]
    fn test_tilt() {
        assert_eq!(ElementKind::Slab.tilt(&Vector::Z), Tilt::Ceiling);
        assert_eq!(ElementKind::Slab.tilt(&-Vector::Z), Tilt::Floor);
        assert_eq!(ElementKind::Roof.tilt(&-Vector::Z), Tilt::Ceiling);
        assert_eq!(ElementKind::Window.tilt(&Vector::X), Tilt::Wall);
    }

    #[test]
    fn test_boundary_kind() {
        assert_eq!(ElementKind::Roof.boundary_kind(), BoundaryKind::ExternalWall);
        assert_eq!(ElementKind::Door.boundary_kind(), BoundaryKind::ExternalDoor);
        assert_eq!(ElementKind::Window.boundary_kind(), BoundaryKind::Window);
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let cube = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [1.0, 0.0, 1.0],
            [0.0, 1.0, 1.0],
            [1.0, 1.0, 1.0],
        ];
        let err = BuildingElement::new(EntityRef::new("a", "IfcColumn"), &cube, Settings::default())
            .unwrap_err();
        assert!(matches!(err, ZoneError::NotFound(_)));
        let wall = BuildingElement::new(EntityRef::new("b", "IfcWall"), &cube, Settings::default()).unwrap();
        assert_eq!(wall.kind, ElementKind::Wall);
        assert_eq!(wall.global_id(), "b");
    }
}
