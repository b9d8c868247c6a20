//! 2D embedding of planar faces.
//!
//! A face is projected into a frame and the coordinate along its normal is
//! dropped. Any other ring projected through the same [`ProjectedFace`]
//! lands in the same 2D embedding, so the two can be intersected directly,
//! and a 2D result can be lifted back to model space.

use geo::{Area, BooleanOps, Contains, LineString, MultiPolygon, Polygon};
use ifczone_math::{round, CoordinateSystem, DVec2, DVec3, Point};

use crate::vertices::FaceVertices;

/// Polygons below this area are lines or points and never contain anything.
const DEGENERATE_AREA: f64 = 1e-12;

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedFace {
    frame: CoordinateSystem,
    normal_index: usize,
    offset: f64,
    ring: Vec<DVec2>,
}

impl ProjectedFace {
    pub(crate) fn new(frame: CoordinateSystem, normal_index: usize, points: &[Point]) -> Self {
        let local: Vec<Point> = points.iter().map(|p| frame.project(p)).collect();
        let offset = if local.is_empty() {
            0.0
        } else {
            round(local.iter().map(|p| p.get(normal_index)).sum::<f64>() / local.len() as f64)
        };
        let ring = local.iter().map(|p| drop_axis(p.as_dvec3(), normal_index)).collect();
        Self {
            frame,
            normal_index,
            offset,
            ring,
        }
    }

    /// Project another ring into this embedding.
    pub fn project(&self, other: &FaceVertices) -> ProjectedFace {
        ProjectedFace::new(self.frame, self.normal_index, other.points())
    }

    pub fn frame(&self) -> &CoordinateSystem {
        &self.frame
    }

    /// Index of the local coordinate dropped by the embedding.
    pub fn normal_index(&self) -> usize {
        self.normal_index
    }

    /// Mean value of the dropped coordinate, constant for a face parallel to the plane.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn ring(&self) -> &[DVec2] {
        &self.ring
    }

    pub fn to_polygon(&self) -> Polygon<f64> {
        let exterior: Vec<(f64, f64)> = self.ring.iter().map(|p| (p.x, p.y)).collect();
        Polygon::new(LineString::from(exterior), vec![])
    }

    pub fn area(&self) -> f64 {
        self.to_polygon().unsigned_area()
    }

    /// Distance between the planes of two faces embedded the same way.
    pub fn get_distance(&self, other: &ProjectedFace) -> f64 {
        round((self.offset - other.offset).abs())
    }

    pub fn intersection(&self, other: &ProjectedFace) -> MultiPolygon<f64> {
        other.to_polygon().intersection(&self.to_polygon())
    }

    /// One of the two polygons lies entirely within the other.
    pub fn contained(&self, other: &ProjectedFace) -> bool {
        let polygon_1 = self.to_polygon();
        let polygon_2 = other.to_polygon();
        if polygon_1.unsigned_area() < DEGENERATE_AREA || polygon_2.unsigned_area() < DEGENERATE_AREA {
            return false;
        }
        polygon_1.contains(&polygon_2) || polygon_2.contains(&polygon_1)
    }

    /// Model-space point of a 2D coordinate lying on this face's plane.
    pub fn lift(&self, xy: DVec2) -> Point {
        let local = insert_axis(xy, self.normal_index, self.offset);
        self.frame.inverse(&Point::from_dvec3(local))
    }

    /// Model-space vertices of the largest polygon of a 2D intersection result.
    ///
    /// The returned ring is open: the closing vertex is not repeated.
    pub fn common_vertices(&self, intersection: &MultiPolygon<f64>) -> Vec<Point> {
        let Some(largest) = intersection
            .0
            .iter()
            .max_by(|a, b| a.unsigned_area().total_cmp(&b.unsigned_area()))
        else {
            return Vec::new();
        };
        let coords = &largest.exterior().0;
        let open = if coords.len() > 1 && coords.first() == coords.last() {
            &coords[..coords.len() - 1]
        } else {
            &coords[..]
        };
        open.iter().map(|c| self.lift(DVec2::new(c.x, c.y))).collect()
    }
}

fn drop_axis(p: DVec3, index: usize) -> DVec2 {
    match index {
        0 => DVec2::new(p.y, p.z),
        1 => DVec2::new(p.x, p.z),
        _ => DVec2::new(p.x, p.y),
    }
}

fn insert_axis(xy: DVec2, index: usize, value: f64) -> DVec3 {
    match index {
        0 => DVec3::new(value, xy.x, xy.y),
        1 => DVec3::new(xy.x, value, xy.y),
        _ => DVec3::new(xy.x, xy.y, value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ifczone_math::Vector;

    fn face(points: &[[f64; 3]]) -> FaceVertices {
        FaceVertices::new(points.iter().map(|p| Point::from_array(*p)).collect()).unwrap()
    }

    fn wall_face() -> FaceVertices {
        face(&[[0.0, 0.0, 0.0], [10.0, 0.0, 0.0], [10.0, 0.0, 2.0], [0.0, 0.0, 2.0]])
    }

    #[test]
    fn test_world_projection_drops_dominant_axis() {
        let wall = wall_face();
        let normal = Vector::new(0.0, -1.0, 0.0);
        let frame = CoordinateSystem::world();
        let projected = wall.embed(&frame, frame.normal_index(&normal));
        assert_eq!(projected.normal_index(), 1);
        assert_eq!(projected.offset(), 0.0);
        assert_eq!(projected.ring()[2], DVec2::new(10.0, 2.0));
        assert!((projected.area() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_lift_round_trip_intrinsic_frame() {
        let tilted = face(&[
            [1.46446609, 0.46446609, 1.0],
            [8.53553391, 7.53553391, 1.0],
            [8.53553391, 7.53553391, 3.0],
            [1.46446609, 0.46446609, 3.0],
        ]);
        let normal = tilted.get_normal().unwrap();
        let frame = tilted.coordinate_system(&normal).unwrap();
        let projected = tilted.embed(&frame, 2);
        for (xy, original) in projected.ring().iter().zip(tilted.points()) {
            let back = projected.lift(*xy);
            assert!((back - *original).is_a_zero(1e-8), "{:?} != {:?}", back, original);
        }
    }

    #[test]
    fn test_distance_between_parallel_faces() {
        let near = wall_face();
        let far = face(&[[2.0, 0.5, 0.0], [4.0, 0.5, 0.0], [4.0, 0.5, 2.0], [2.0, 0.5, 2.0]]);
        let frame = CoordinateSystem::world();
        let projected = near.embed(&frame, 1);
        let other = projected.project(&far);
        assert!((projected.get_distance(&other) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_common_vertices_on_face_plane() {
        let near = wall_face();
        let other = face(&[[8.0, 0.5, 1.0], [12.0, 0.5, 1.0], [12.0, 0.5, 3.0], [8.0, 0.5, 3.0]]);
        let frame = CoordinateSystem::world();
        let projected = near.embed(&frame, 1);
        let intersection = projected.intersection(&projected.project(&other));
        assert!((intersection.unsigned_area() - 2.0).abs() < 1e-9);

        let common = projected.common_vertices(&intersection);
        assert_eq!(common.len(), 4);
        assert!(common.iter().all(|p| p.y() == 0.0));
        assert!(common.contains(&Point::new(8.0, 0.0, 1.0)));
        assert!(common.contains(&Point::new(10.0, 0.0, 2.0)));
    }

    #[test]
    fn test_contained_both_directions() {
        let frame = CoordinateSystem::world();
        let wall = wall_face().embed(&frame, 1);
        let window = wall.project(&face(&[
            [4.0, 0.0, 1.0],
            [4.05, 0.0, 1.0],
            [4.05, 0.0, 1.05],
            [4.0, 0.0, 1.05],
        ]));
        assert!(wall.contained(&window));
        assert!(window.contained(&wall));
    }

    #[test]
    fn test_degenerate_polygon_never_contained() {
        let frame = CoordinateSystem::world();
        let wall = wall_face().embed(&frame, 1);
        let line = wall.project(&face(&[
            [4.0, 0.0, 1.0],
            [5.0, 0.0, 1.0],
            [5.0, 0.0, 1.0],
            [4.0, 0.0, 1.0],
        ]));
        assert!(!wall.contained(&line));
    }

    #[test]
    fn test_common_vertices_empty_intersection() {
        let frame = CoordinateSystem::world();
        let wall = wall_face().embed(&frame, 1);
        assert!(wall.common_vertices(&MultiPolygon::new(vec![])).is_empty());
    }
}
