//! Adjacency between two oriented bounding boxes.
//!
//! Every pair of parallel faces is embedded in the plane of the first face
//! and intersected in 2D. Accepted pairs are scored by shared area and by
//! the distance between their planes; the closest pair wins.

use geo::Area;
use ifczone_core::entity::MaybeEntity;
use ifczone_core::{Result, Settings, ZoneError};
use ifczone_math::{round, Plane, Vector};
use tracing::{error, warn};

use crate::face::BoundingBoxFace;
use crate::obb::OrientedBoundingBox;
use crate::surface::{CommonSurface, ExtendCommonSurface};

impl OrientedBoundingBox {
    /// Shared boundary with `other`, using this box's settings.
    ///
    /// `None` means the boxes do not touch.
    pub fn intersect_faces(&self, other: &OrientedBoundingBox) -> Option<CommonSurface> {
        self.intersect_faces_with(other, self.settings())
    }

    pub fn intersect_faces_with(
        &self,
        other: &OrientedBoundingBox,
        settings: &Settings,
    ) -> Option<CommonSurface> {
        let mut extend_surfaces = Vec::new();

        for face in self.faces.iter() {
            if self.gap_along(other, face) > settings.contact_tolerance {
                continue;
            }
            let projected_face_1 = match face.self_projection() {
                Ok(projected) => projected,
                Err(e) => {
                    warn!(error = %e, normal = ?face.normal, "face could not be projected onto its plane");
                    continue;
                }
            };

            for other_face in other.faces.iter() {
                let normal_cross = face.normal * other_face.normal;
                if !normal_cross.is_a_zero(settings.zero_tolerance) {
                    continue;
                }
                let projected_face_2 = projected_face_1.project(&other_face.vertices);
                let intersection = projected_face_1.intersection(&projected_face_2);
                let area = round(intersection.unsigned_area());
                if !(area > settings.area_tolerance || projected_face_1.contained(&projected_face_2)) {
                    continue;
                }

                let orientation = match self.orientation_toward(other, face, settings) {
                    Ok(orientation) => orientation,
                    Err(e) => {
                        error!(
                            self_entity = %MaybeEntity(self.entity.as_ref()),
                            other_entity = %MaybeEntity(other.entity.as_ref()),
                            error = %e,
                            "orientation vector was not properly computed when intersecting two elements"
                        );
                        continue;
                    }
                };
                extend_surfaces.push(ExtendCommonSurface {
                    distance: projected_face_1.get_distance(&projected_face_2),
                    surface: CommonSurface::new(
                        area,
                        orientation,
                        projected_face_1.common_vertices(&intersection),
                    ),
                });
            }
        }

        if extend_surfaces.is_empty() {
            warn!(
                self_entity = %MaybeEntity(self.entity.as_ref()),
                other_entity = %MaybeEntity(other.entity.as_ref()),
                "no common surface found between two elements"
            );
            return None;
        }
        select_surface(extend_surfaces)
    }

    /// Gap between the two boxes along `face.normal`; negative when their
    /// extents overlap.
    fn gap_along(&self, other: &OrientedBoundingBox, face: &BoundingBoxFace) -> f64 {
        let plane = Plane::new(face.vertices.points()[0], face.normal);
        let (self_lo, self_hi) = plane.interval(self.corners());
        let (other_lo, other_hi) = plane.interval(other.corners());
        (other_lo - self_hi).max(self_lo - other_hi)
    }

    /// Direction from this box's centroid to `other`'s, projected on `face.normal`.
    fn orientation_toward(
        &self,
        other: &OrientedBoundingBox,
        face: &BoundingBoxFace,
        settings: &Settings,
    ) -> Result<Vector> {
        let direction = (other.centroid - self.centroid).norm()?;
        let projected = direction.project(&face.normal);
        if projected.is_a_zero(settings.zero_tolerance) {
            return Err(ZoneError::NonFinite(format!(
                "direction {:?} is perpendicular to face normal {:?}",
                direction, face.normal
            )));
        }
        projected.norm()
    }
}

/// Resolve the accepted candidates to a single surface.
///
/// Disagreeing orientations keep only the candidates of maximal area. The
/// candidate with the smallest plane distance wins; among equal distances
/// the last one scanned wins.
fn select_surface(mut extend_surfaces: Vec<ExtendCommonSurface>) -> Option<CommonSurface> {
    let first = extend_surfaces.first()?.surface.orientation;
    if !extend_surfaces.iter().all(|e| e.surface.orientation == first) {
        warn!(
            candidates = extend_surfaces.len(),
            "different orientations found, taking the max area"
        );
        let max_area = extend_surfaces
            .iter()
            .map(|e| e.surface.area)
            .fold(f64::NEG_INFINITY, f64::max);
        extend_surfaces.retain(|e| e.surface.area == max_area);
    }
    extend_surfaces.sort_by(|a, b| b.distance.total_cmp(&a.distance));
    extend_surfaces.pop().map(ExtendCommonSurface::to_common_surface)
}
