use serde::{Deserialize, Serialize};

use crate::point::{Point, Vector};

/// Infinite plane through `origin` with unit `normal`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub origin: Point,
    pub normal: Vector,
}

impl Plane {
    /// `normal` must be unit length.
    pub fn new(origin: Point, normal: Vector) -> Self {
        Self { origin, normal }
    }

    /// Signed distance from a point to this plane.
    pub fn signed_distance(&self, point: &Point) -> f64 {
        (*point - self.origin).dot(&self.normal)
    }

    /// Foot of the perpendicular from `point`.
    pub fn project_point(&self, point: &Point) -> Point {
        *point + self.normal * -self.signed_distance(point)
    }

    /// Signed extent of a point set along the normal, as `(min, max)`.
    pub fn interval<'a>(&self, points: impl IntoIterator<Item = &'a Point>) -> (f64, f64) {
        points
            .into_iter()
            .map(|p| self.signed_distance(p))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), d| (lo.min(d), hi.max(d)))
    }
}
