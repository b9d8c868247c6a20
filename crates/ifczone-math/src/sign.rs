use glam::DVec3;
use serde::{Deserialize, Serialize};

/// A per-axis ±1 pattern, `true` meaning +1.
///
/// Relative to a box centroid and half extent, a sign picks one of the
/// eight corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Sign {
    pub x: bool,
    pub y: bool,
    pub z: bool,
}

impl Sign {
    /// The eight corner patterns, in binary order from `(-,-,-)` to `(+,+,+)`.
    pub const ALL: [Sign; 8] = [
        Sign::new(false, false, false),
        Sign::new(false, false, true),
        Sign::new(false, true, false),
        Sign::new(false, true, true),
        Sign::new(true, false, false),
        Sign::new(true, false, true),
        Sign::new(true, true, false),
        Sign::new(true, true, true),
    ];

    pub const fn new(x: bool, y: bool, z: bool) -> Self {
        Self { x, y, z }
    }

    pub fn get(&self, axis: usize) -> bool {
        match axis {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    pub fn factor(&self, axis: usize) -> f64 {
        if self.get(axis) {
            1.0
        } else {
            -1.0
        }
    }

    pub fn to_dvec3(&self) -> DVec3 {
        DVec3::new(self.factor(0), self.factor(1), self.factor(2))
    }
}
