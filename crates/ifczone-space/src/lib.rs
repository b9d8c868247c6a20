//! Spaces, the building elements that bound them, and thermal-zone models.

pub mod boundary;
pub mod building;
pub mod clash;
pub mod element;
pub mod internal;
pub mod space;

pub use boundary::{BoundaryModel, SpaceBoundaries, SpaceBoundary, ZoneModel};
pub use building::Building;
pub use clash::{AabbClashIndex, ClashIndex};
pub use element::{BoundaryKind, BuildingElement, ElementKind, ElementShape, Tilt};
pub use internal::{get_internal_elements, InternalElement, InternalElements};
pub use space::Space;
