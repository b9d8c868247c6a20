//! The shared boundary between two touching boxes.

use ifczone_math::{round, Point, Vector};
use serde::{Deserialize, Serialize};

/// Planar overlap of two boxes' touching faces.
///
/// `orientation` points from the box the comparison was run on toward the
/// other box, along the matched face normal. `vertices` is the overlap
/// polygon in model space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommonSurface {
    pub area: f64,
    pub orientation: Vector,
    pub vertices: Vec<Point>,
    /// Cleared once the surface is found to separate two spaces.
    pub exterior: bool,
}

impl CommonSurface {
    pub fn new(area: f64, orientation: Vector, vertices: Vec<Point>) -> Self {
        Self {
            area,
            orientation,
            vertices,
            exterior: true,
        }
    }

    /// `(area, orientation)`, rounded.
    pub fn description(&self) -> (f64, [f64; 3]) {
        (round(self.area), self.orientation.to_array())
    }

    /// Angle between the orientation and a north axis, in radians.
    pub fn azimuth(&self, north_axis: &Vector) -> f64 {
        self.orientation.angle(north_axis)
    }

    /// Edges of the overlap polygon, for drawing.
    pub fn lines(&self) -> Vec<(Point, Point)> {
        self.vertices
            .iter()
            .zip(self.vertices.iter().cycle().skip(1))
            .map(|(a, b)| (*a, *b))
            .collect()
    }
}

/// A [`CommonSurface`] together with the plane distance it was scored by.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ExtendCommonSurface {
    pub surface: CommonSurface,
    pub distance: f64,
}

impl ExtendCommonSurface {
    pub fn to_common_surface(self) -> CommonSurface {
        self.surface
    }
}
