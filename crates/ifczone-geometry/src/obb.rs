//! Oriented bounding boxes built from vertex clouds.

use geo::{Area, MinimumRotatedRect, MultiPoint};
use ifczone_core::traits::{Validate, WorldBounds};
use ifczone_core::{EntityRef, Result, Settings, ZoneError};
use ifczone_math::{covariance, symmetric_eigen, Aabb3, CoordinateSystem, DVec3, Point, Sign, Vector};
use serde::{Deserialize, Serialize};

use crate::face::BoundingBoxFaces;
use crate::vertices::Vertices;

/// Relative eigenvalue gap under which two principal axes are interchangeable.
const DEGENERATE_EIGENVALUES: f64 = 1e-6;

/// Relative area gain required before a refined in-plane rotation replaces
/// the principal axes.
const REFINEMENT_GAIN: f64 = 1e-9;

/// Largest isotropic cloud searched pairwise for its up axis.
const EDGE_SEARCH_LIMIT: usize = 64;

/// A box aligned with the principal axes of a point cloud.
///
/// Immutable after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrientedBoundingBox {
    pub faces: BoundingBoxFaces,
    pub centroid: Point,
    pub volume: f64,
    pub height: f64,
    pub entity: Option<EntityRef>,
    coordinate_system: CoordinateSystem,
    half_extent: Vector,
    corners: [Point; 8],
    settings: Settings,
}

impl OrientedBoundingBox {
    /// Build the box of a raw `N x 3` vertex array.
    pub fn from_vertices(vertices: &[[f64; 3]]) -> Result<Self> {
        Self::from_points(&Vertices::from_arrays(vertices).points)
    }

    /// Build the box of a point cloud through its principal axes.
    pub fn from_points(points: &[Point]) -> Result<Self> {
        let unique = checked_unique(points)?;
        let axes = principal_axes(&unique)?;
        Self::from_frame(&unique, axes)
    }

    /// Build the box of a tessellated IFC solid and attach its entity handle.
    ///
    /// The box keeps world up as an axis and takes the minimum-area
    /// rectangle of the plan footprint for the horizontal ones, so openings
    /// and uneven tessellation do not tilt it. An axis-aligned box-shaped
    /// cloud uses the world axes directly.
    pub fn from_entity(entity: EntityRef, vertices: &[[f64; 3]], settings: Settings) -> Result<Self> {
        let cloud = Vertices::from_arrays(vertices);
        let unique = checked_unique(&cloud.points).map_err(|e| match e {
            ZoneError::Geometry(msg) => ZoneError::Geometry(format!("{}: {}", entity, msg)),
            other => other,
        })?;
        let axes = if cloud.is_box_shaped() {
            CoordinateSystem::world()
        } else {
            upright_axes(&unique)?
        };
        let mut obb = Self::from_frame(&unique, axes)?;
        obb.entity = Some(entity);
        obb.settings = settings;
        Ok(obb)
    }

    fn from_frame(points: &[Point], axes: CoordinateSystem) -> Result<Self> {
        let local: Vec<DVec3> = points.iter().map(|p| axes.project(p).as_dvec3()).collect();
        let (min, max) = local.iter().fold(
            (DVec3::splat(f64::INFINITY), DVec3::splat(f64::NEG_INFINITY)),
            |(min, max), p| (min.min(*p), max.max(*p)),
        );
        let center = (min + max) * 0.5;
        let half = (max - min) * 0.5;

        let corner = |sign: Sign| axes.inverse(&Point::from_dvec3(center + half * sign.to_dvec3()));
        let corners = Sign::ALL.map(&corner);
        let faces = BoundingBoxFaces::build(&corner, &axes)?;

        let up = (0..3)
            .max_by(|&a, &b| axes.axis(a).z().abs().total_cmp(&axes.axis(b).z().abs()))
            .unwrap_or(2);
        let extents = half * 2.0;

        Ok(Self {
            faces,
            centroid: axes.inverse(&Point::from_dvec3(center)),
            volume: ifczone_math::round(extents.x * extents.y * extents.z),
            height: ifczone_math::round(extents[up]),
            entity: None,
            coordinate_system: axes,
            half_extent: Vector::from_dvec3(half),
            corners,
            settings: Settings::default(),
        })
    }

    /// Replace the tolerances used by [`OrientedBoundingBox::intersect_faces`].
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_entity(mut self, entity: EntityRef) -> Self {
        self.entity = Some(entity);
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn coordinate_system(&self) -> &CoordinateSystem {
        &self.coordinate_system
    }

    /// Half extents along the box axes, in the box frame.
    pub fn half_extent(&self) -> Vector {
        self.half_extent
    }

    /// Corners in [`Sign::ALL`] order.
    pub fn corners(&self) -> &[Point; 8] {
        &self.corners
    }

    pub fn corner(&self, sign: Sign) -> Point {
        let index = Sign::ALL.iter().position(|s| *s == sign).unwrap_or(0);
        self.corners[index]
    }

    pub fn aabb(&self) -> Aabb3 {
        let (min, max) = self.world_bounds();
        Aabb3::new(min, max)
    }
}

impl WorldBounds for OrientedBoundingBox {
    type Point = DVec3;

    fn world_bounds(&self) -> (DVec3, DVec3) {
        self.corners.iter().fold(
            (DVec3::splat(f64::INFINITY), DVec3::splat(f64::NEG_INFINITY)),
            |(min, max), p| (min.min(p.as_dvec3()), max.max(p.as_dvec3())),
        )
    }
}

impl Validate for OrientedBoundingBox {
    fn validate(&self) -> Result<()> {
        self.faces.validate()?;
        if !(self.volume >= 0.0 && self.height >= 0.0) {
            return Err(ZoneError::Geometry(format!(
                "negative box measure: volume {}, height {}",
                self.volume, self.height
            )));
        }
        let extents = self.half_extent.as_dvec3() * 2.0;
        let expected = extents.x * extents.y * extents.z;
        if (expected - self.volume).abs() > 1e-6 * expected.max(1.0) {
            return Err(ZoneError::Geometry(format!(
                "volume {} does not match half extents {:?}",
                self.volume, self.half_extent
            )));
        }
        Ok(())
    }
}

/// Reject non-finite input and clouds of fewer than four distinct points.
fn checked_unique(points: &[Point]) -> Result<Vec<Point>> {
    let cloud = Vertices::new(points.to_vec());
    if !cloud.is_finite() {
        return Err(ZoneError::Geometry("vertex cloud has non-finite coordinates".into()));
    }
    let unique = cloud.unique();
    if unique.len() < 4 {
        return Err(ZoneError::Geometry(format!(
            "a bounding box needs at least 4 distinct points, got {}",
            unique.len()
        )));
    }
    Ok(unique)
}

/// Principal axes of a cloud, with interchangeable axes resolved by the
/// minimum-area rectangle of the cloud in their plane.
fn principal_axes(points: &[Point]) -> Result<CoordinateSystem> {
    let cloud: Vec<DVec3> = points.iter().map(Point::as_dvec3).collect();
    let eigen = symmetric_eigen(&covariance(&cloud));
    let mut axes = eigen.vectors;

    let degenerate = |i, j| eigen.is_degenerate_pair(i, j, DEGENERATE_EIGENVALUES);
    if degenerate(0, 1) && degenerate(1, 2) {
        axes = isotropic_axes(&cloud);
    } else if let Some((i, j)) = [(0, 1), (1, 2), (0, 2)]
        .into_iter()
        .find(|&(i, j)| degenerate(i, j))
    {
        axes = refine_plane(&cloud, axes, i, j);
    }
    CoordinateSystem::from_axes(axes[0], axes[1])
}

/// World up with the horizontal axes fitted to the plan footprint.
fn upright_axes(points: &[Point]) -> Result<CoordinateSystem> {
    let cloud: Vec<DVec3> = points.iter().map(Point::as_dvec3).collect();
    let axes = refine_plane(&cloud, [DVec3::X, DVec3::Y, DVec3::Z], 0, 1);
    CoordinateSystem::from_axes(axes[0], axes[1])
}

/// Axes of a cloud with no preferred direction, such as the corners of a cube.
///
/// Starts from world up. Small clouds also try every point-to-point
/// direction as the up axis and keep the smallest box.
fn isotropic_axes(cloud: &[DVec3]) -> [DVec3; 3] {
    let mut best = refine_plane(cloud, [DVec3::X, DVec3::Y, DVec3::Z], 0, 1);
    if cloud.len() > EDGE_SEARCH_LIMIT {
        return best;
    }
    let mut best_volume = box_volume(cloud, &best);
    for (k, a) in cloud.iter().enumerate() {
        for b in &cloud[k + 1..] {
            let Some(up) = (*b - *a).try_normalize() else {
                continue;
            };
            let u = up.any_orthonormal_vector();
            let axes = refine_plane(cloud, [u, up.cross(u), up], 0, 1);
            let volume = box_volume(cloud, &axes);
            if volume < best_volume * (1.0 - REFINEMENT_GAIN) {
                best = axes;
                best_volume = volume;
            }
        }
    }
    best
}

fn box_volume(cloud: &[DVec3], axes: &[DVec3; 3]) -> f64 {
    axes.iter()
        .map(|axis| {
            let (lo, hi) = cloud.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                let t = p.dot(*axis);
                (lo.min(t), hi.max(t))
            });
            hi - lo
        })
        .product()
}

/// Rotate axes `i` and `j` about the third one to the minimum-area
/// rectangle enclosing the cloud's projection.
fn refine_plane(cloud: &[DVec3], axes: [DVec3; 3], i: usize, j: usize) -> [DVec3; 3] {
    let (u, v) = (axes[i], axes[j]);
    let planar: MultiPoint<f64> = cloud.iter().map(|p| (p.dot(u), p.dot(v))).collect::<Vec<_>>().into();

    let (lo, hi) = cloud.iter().fold(
        ((f64::INFINITY, f64::INFINITY), (f64::NEG_INFINITY, f64::NEG_INFINITY)),
        |(lo, hi), p| {
            let (a, b) = (p.dot(u), p.dot(v));
            ((lo.0.min(a), lo.1.min(b)), (hi.0.max(a), hi.1.max(b)))
        },
    );
    let current = (hi.0 - lo.0) * (hi.1 - lo.1);
    if current <= f64::EPSILON {
        return axes;
    }

    let Some(rect) = planar.minimum_rotated_rect() else {
        return axes;
    };
    if rect.unsigned_area() >= current * (1.0 - REFINEMENT_GAIN) {
        return axes;
    }
    let ring = &rect.exterior().0;
    if ring.len() < 2 {
        return axes;
    }
    let edge = ring[1] - ring[0];
    let Some(direction) = (u * edge.x + v * edge.y).try_normalize() else {
        return axes;
    };

    let mut refined = axes;
    refined[i] = direction;
    refined[j] = axes[3 - i - j].cross(direction);
    refined
}
