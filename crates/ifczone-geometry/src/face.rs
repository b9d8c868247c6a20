//! The six planar faces of an oriented bounding box.

use ifczone_core::traits::Validate;
use ifczone_core::{Result, ZoneError};
use ifczone_math::{CoordinateSystem, Point, Sign, Vector};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

use crate::projection::ProjectedFace;
use crate::vertices::FaceVertices;

/// Tolerance of the unit-length and perpendicularity checks on face normals.
const NORMAL_TOLERANCE: f64 = 1e-6;

const fn s(x: bool, y: bool, z: bool) -> Sign {
    Sign::new(x, y, z)
}

/// Corner sign patterns of each face, in ring order.
///
/// Face `2 * axis` lies on the negative side of `axis`, face `2 * axis + 1`
/// on the positive side. Consecutive corners differ in exactly one sign.
pub const FACE_CATALOG: [[Sign; 4]; 6] = [
    [s(false, false, false), s(false, true, false), s(false, true, true), s(false, false, true)],
    [s(true, false, false), s(true, true, false), s(true, true, true), s(true, false, true)],
    [s(false, false, false), s(true, false, false), s(true, false, true), s(false, false, true)],
    [s(false, true, false), s(true, true, false), s(true, true, true), s(false, true, true)],
    [s(false, false, false), s(true, false, false), s(true, true, false), s(false, true, false)],
    [s(false, false, true), s(true, false, true), s(true, true, true), s(false, true, true)],
];

/// Axis shared by all four corners of a catalog entry and its side.
fn catalog_side(signs: &[Sign; 4]) -> Result<(usize, bool)> {
    let unique: HashSet<Sign> = signs.iter().copied().collect();
    if unique.len() != signs.len() {
        return Err(ZoneError::FaceCatalog(format!(
            "duplicate corner signs in face {:?}",
            signs
        )));
    }
    let shared: Vec<usize> = (0..3)
        .filter(|&axis| signs.iter().all(|s| s.get(axis) == signs[0].get(axis)))
        .collect();
    match shared.as_slice() {
        [axis] => Ok((*axis, signs[0].get(*axis))),
        _ => Err(ZoneError::FaceCatalog(format!(
            "face {:?} does not lie on a single box side",
            signs
        ))),
    }
}

/// A planar quad with its outward unit normal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBoxFace {
    pub vertices: FaceVertices,
    pub normal: Vector,
}

impl BoundingBoxFace {
    /// Build a face from its ring, orienting the normal along `outward`.
    ///
    /// The normal is the cross product of the two edges leaving the first
    /// corner. A ring too thin to define one (the flat side of a zero
    /// thickness element) falls back to `outward` itself.
    pub fn build(vertices: FaceVertices, outward: Vector) -> Result<Self> {
        let p = vertices.points();
        let cross = (p[1] - p[0]).cross(&(p[p.len() - 1] - p[0]));
        let normal = match cross.norm() {
            Ok(n) if n.dot(&outward) < 0.0 => -n,
            Ok(n) => n,
            Err(_) => outward.norm()?,
        };
        Ok(Self { vertices, normal })
    }

    pub fn area(&self) -> f64 {
        self.vertices.area()
    }

    /// Embedding in the face's own frame, dropping the normal coordinate.
    pub fn self_projection(&self) -> Result<ProjectedFace> {
        let frame = self.vertices.coordinate_system(&self.normal)?;
        Ok(self.vertices.embed(&frame, 2))
    }

    /// Embedding in an external frame, dropping the axis the normal is most
    /// aligned with.
    pub fn projection_in(&self, frame: &CoordinateSystem) -> ProjectedFace {
        self.vertices.embed(frame, frame.normal_index(&self.normal))
    }
}

impl Validate for BoundingBoxFace {
    fn validate(&self) -> Result<()> {
        if (self.normal.length() - 1.0).abs() > NORMAL_TOLERANCE {
            return Err(ZoneError::Geometry(format!(
                "face normal {:?} is not unit length",
                self.normal
            )));
        }
        for (a, b) in self.vertices.edges() {
            let edge = b - a;
            if edge.dot(&self.normal).abs() > NORMAL_TOLERANCE * edge.length().max(1.0) {
                return Err(ZoneError::Geometry(format!(
                    "face normal {:?} is not perpendicular to edge {:?} -> {:?}",
                    self.normal, a, b
                )));
            }
        }
        Ok(())
    }
}

/// Sortable summary of a face: closed ring coordinates and normal.
pub type FaceDescription = (Vec<[f64; 3]>, (f64, f64, f64));

/// Exactly six faces, one per box side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBoxFaces {
    faces: Vec<BoundingBoxFace>,
}

impl BoundingBoxFaces {
    /// Assemble the faces of a box from its corners.
    ///
    /// `corner` maps a sign pattern to the world position of that corner and
    /// `axes` are the box axes the patterns refer to.
    pub fn build(corner: impl Fn(Sign) -> Point, axes: &CoordinateSystem) -> Result<Self> {
        let faces = FACE_CATALOG
            .iter()
            .map(|signs| {
                let (axis, positive) = catalog_side(signs)?;
                let outward = if positive {
                    axes.axis(axis)
                } else {
                    -axes.axis(axis)
                };
                let ring = FaceVertices::new(signs.iter().map(|s| corner(*s)).collect())?;
                BoundingBoxFace::build(ring, outward)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { faces })
    }

    pub fn faces(&self) -> &[BoundingBoxFace] {
        &self.faces
    }

    pub fn iter(&self) -> impl Iterator<Item = &BoundingBoxFace> {
        self.faces.iter()
    }

    /// Face summaries sorted lexicographically, for order-independent comparison.
    pub fn description(&self) -> Vec<FaceDescription> {
        let mut description: Vec<FaceDescription> = self
            .faces
            .iter()
            .map(|f| (f.vertices.to_list(), f.normal.to_tuple()))
            .collect();
        description.sort_by(compare_descriptions);
        description
    }
}

impl Validate for BoundingBoxFaces {
    fn validate(&self) -> Result<()> {
        if self.faces.len() != 6 {
            return Err(ZoneError::Geometry(format!(
                "a box has 6 faces, got {}",
                self.faces.len()
            )));
        }
        self.faces.iter().try_for_each(Validate::validate)
    }
}

fn compare_descriptions(a: &FaceDescription, b: &FaceDescription) -> Ordering {
    let flat = |d: &FaceDescription| -> Vec<f64> {
        d.0.iter()
            .flatten()
            .copied()
            .chain([d.1 .0, d.1 .1, d.1 .2])
            .collect()
    };
    let (a, b) = (flat(a), flat(b));
    a.iter()
        .zip(&b)
        .map(|(x, y)| x.total_cmp(y))
        .find(|o| o.is_ne())
        .unwrap_or_else(|| a.len().cmp(&b.len()))
}
