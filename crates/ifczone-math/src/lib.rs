//! Math primitives for the adjacency kernel.
//!
//! Every `Point` and `Vector` is rounded to [`ROUNDING_DECIMALS`] on
//! construction so that logically identical coordinates compare and hash
//! equal after projection round trips.

pub mod aabb;
pub mod coordinate_system;
pub mod eigen;
pub mod plane;
pub mod point;
pub mod sign;

pub use glam::{DMat3, DVec2, DVec3};
pub use aabb::Aabb3;
pub use coordinate_system::CoordinateSystem;
pub use eigen::{covariance, symmetric_eigen, EigenDecomposition};
pub use plane::Plane;
pub use point::{round, Point, Vector, ROUNDING_DECIMALS};
pub use sign::Sign;
