//! Vertex clouds and planar vertex rings.

use ifczone_core::{Result, ZoneError};
use ifczone_math::{CoordinateSystem, DVec3, Point, Vector};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::projection::ProjectedFace;

/// Edges shorter than this do not define an in-plane direction.
const MIN_EDGE_LENGTH: f64 = 1e-9;

/// An unordered cloud of points, typically the tessellated shell of one solid.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Vertices {
    pub points: Vec<Point>,
}

impl Vertices {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn from_arrays(arrays: &[[f64; 3]]) -> Self {
        Self::new(arrays.iter().map(|a| Point::from_array(*a)).collect())
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Distinct points, in first-seen order.
    pub fn unique(&self) -> Vec<Point> {
        let mut seen = HashSet::with_capacity(self.points.len());
        self.points.iter().copied().filter(|p| seen.insert(*p)).collect()
    }

    pub fn is_finite(&self) -> bool {
        self.points.iter().all(Point::is_finite)
    }

    /// Eight distinct corners of a world-aligned box: every axis takes exactly two values.
    pub fn is_box_shaped(&self) -> bool {
        let unique = self.unique();
        if unique.len() != 8 {
            return false;
        }
        (0..3).all(|axis| {
            let values: HashSet<u64> = unique.iter().map(|p| p.get(axis).to_bits()).collect();
            values.len() == 2
        })
    }
}

/// An ordered, planar ring of points. The closing edge is implicit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceVertices {
    points: Vec<Point>,
}

impl FaceVertices {
    pub fn new(points: Vec<Point>) -> Result<Self> {
        if points.len() < 3 {
            return Err(ZoneError::Geometry(format!(
                "a face ring needs at least 3 points, got {}",
                points.len()
            )));
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Edges of the ring including the closing one.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points
            .iter()
            .zip(self.points.iter().cycle().skip(1))
            .map(|(a, b)| (*a, *b))
    }

    /// Ring coordinates, closed by repeating the first point.
    pub fn to_list(&self) -> Vec<[f64; 3]> {
        self.points
            .iter()
            .chain(self.points.first())
            .map(Point::to_array)
            .collect()
    }

    /// Newell normal of the ring, `None` for a degenerate ring.
    pub fn get_normal(&self) -> Option<Vector> {
        Vector::from_dvec3(self.vector_area()).norm().ok()
    }

    /// Area enclosed by the ring.
    pub fn area(&self) -> f64 {
        self.vector_area().length()
    }

    fn vector_area(&self) -> DVec3 {
        self.edges()
            .map(|(a, b)| a.as_dvec3().cross(b.as_dvec3()))
            .sum::<DVec3>()
            * 0.5
    }

    /// Frame intrinsic to the face: `z` along `normal`, `x` along the first
    /// non-degenerate edge.
    pub fn coordinate_system(&self, normal: &Vector) -> Result<CoordinateSystem> {
        let in_plane = self
            .edges()
            .map(|(a, b)| b - a)
            .find(|e| e.length() > MIN_EDGE_LENGTH)
            .unwrap_or_else(|| Vector::from_dvec3(normal.as_dvec3().any_orthonormal_vector()));
        CoordinateSystem::from_normal(normal, &in_plane)
    }

    /// Embed the ring in 2D by projecting into `frame` and dropping the
    /// `normal_index` coordinate.
    pub fn embed(&self, frame: &CoordinateSystem, normal_index: usize) -> ProjectedFace {
        ProjectedFace::new(*frame, normal_index, &self.points)
    }
}
