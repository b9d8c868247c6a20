//! Oriented bounding boxes and the face-pair adjacency engine.
//!
//! A solid's vertex cloud becomes an [`OrientedBoundingBox`] whose six faces
//! are compared pairwise against another box to find the [`CommonSurface`]
//! they share, if any.

pub mod face;
pub mod intersect;
pub mod obb;
pub mod projection;
pub mod surface;
pub mod vertices;

pub use face::{BoundingBoxFace, BoundingBoxFaces, FaceDescription, FACE_CATALOG};
pub use obb::OrientedBoundingBox;
pub use projection::ProjectedFace;
pub use surface::CommonSurface;
pub use vertices::{FaceVertices, Vertices};
