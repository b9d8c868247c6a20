use glam::DVec3;
use serde::{Deserialize, Serialize};

/// World-aligned envelope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb3 {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb3 {
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Touching boxes intersect.
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
    }

    /// Grow by `amount` on every side.
    pub fn expand(&self, amount: f64) -> Self {
        let offset = DVec3::splat(amount);
        Self {
            min: self.min - offset,
            max: self.max + offset,
        }
    }
}
