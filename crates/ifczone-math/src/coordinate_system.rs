use glam::{DMat3, DVec3};
use ifczone_core::{Result, ZoneError};
use serde::{Deserialize, Serialize};

use crate::point::{Point, Vector};

/// Right-handed orthonormal frame.
///
/// `project` maps world coordinates into the frame and `inverse` maps them
/// back; `inverse(project(p)) == p` up to the rounding precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateSystem {
    pub x: Vector,
    pub y: Vector,
    pub z: Vector,
    to_local: DMat3,
    to_world: DMat3,
}

impl CoordinateSystem {
    fn from_orthonormal(x: DVec3, y: DVec3, z: DVec3) -> Result<Self> {
        let to_local = DMat3::from_cols(x, y, z).transpose();
        if to_local.determinant().abs() < 1e-12 {
            return Err(ZoneError::Geometry(format!(
                "singular coordinate system {:?} {:?} {:?}",
                x, y, z
            )));
        }
        Ok(Self {
            x: Vector::from_dvec3(x),
            y: Vector::from_dvec3(y),
            z: Vector::from_dvec3(z),
            to_local,
            to_world: to_local.inverse(),
        })
    }

    /// The world frame.
    pub fn world() -> Self {
        Self {
            x: Vector::X,
            y: Vector::Y,
            z: Vector::Z,
            to_local: DMat3::IDENTITY,
            to_world: DMat3::IDENTITY,
        }
    }

    /// Frame spanned by `x` and the part of `y` orthogonal to it; `z = x × y`.
    pub fn from_axes(x: DVec3, y: DVec3) -> Result<Self> {
        let x = x.try_normalize().ok_or_else(|| {
            ZoneError::Geometry(format!("cannot build a frame from first axis {:?}", x))
        })?;
        let y = (y - x * x.dot(y)).try_normalize().ok_or_else(|| {
            ZoneError::Geometry(format!("second axis {:?} is parallel to {:?}", y, x))
        })?;
        Self::from_orthonormal(x, y, x.cross(y))
    }

    /// Frame whose `z` axis is `normal` and whose `x` axis follows `in_plane`.
    ///
    /// This is the intrinsic frame of a planar face: dropping `z` after
    /// projection embeds the face in 2D.
    pub fn from_normal(normal: &Vector, in_plane: &Vector) -> Result<Self> {
        let z = normal.as_dvec3().try_normalize().ok_or_else(|| {
            ZoneError::Geometry(format!("cannot build a frame from normal {:?}", normal))
        })?;
        let x = in_plane.as_dvec3();
        let x = (x - z * z.dot(x)).try_normalize().ok_or_else(|| {
            ZoneError::Geometry(format!(
                "in-plane direction {:?} is parallel to normal {:?}",
                in_plane, normal
            ))
        })?;
        Self::from_orthonormal(x, z.cross(x), z)
    }

    pub fn axis(&self, index: usize) -> Vector {
        match index {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    pub fn axes(&self) -> [Vector; 3] {
        [self.x, self.y, self.z]
    }

    /// World to local.
    pub fn project(&self, point: &Point) -> Point {
        Point::from_dvec3(self.to_local * point.as_dvec3())
    }

    /// Local to world.
    pub fn inverse(&self, point: &Point) -> Point {
        Point::from_dvec3(self.to_world * point.as_dvec3())
    }

    pub fn project_vector(&self, vector: &Vector) -> Vector {
        Vector::from_dvec3(self.to_local * vector.as_dvec3())
    }

    pub fn inverse_vector(&self, vector: &Vector) -> Vector {
        Vector::from_dvec3(self.to_world * vector.as_dvec3())
    }

    /// Index of the local axis `normal` is most aligned with.
    pub fn normal_index(&self, normal: &Vector) -> usize {
        self.project_vector(normal).normal_index()
    }
}

impl Default for CoordinateSystem {
    fn default() -> Self {
        Self::world()
    }
}
