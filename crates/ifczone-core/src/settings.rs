//! Tolerances for the adjacency computation.
//!
//! `Settings` is a plain value passed into box construction and comparison;
//! nothing in the workspace keeps process-wide geometry state.

use crate::error::{Result, ZoneError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Minimal shared area (m²) for two faces to count as touching.
    pub area_tolerance: f64,
    /// Maximal gap (m) between two boxes along a face normal.
    pub contact_tolerance: f64,
    /// Component threshold below which a vector is treated as zero.
    pub zero_tolerance: f64,
    /// Inflation (m) of element envelopes in the clash prefilter.
    pub clash_clearance: f64,
    /// Maximal gap (m) between two spaces sharing one building element.
    pub wall_thickness: f64,
}

impl Settings {
    pub const DEFAULT_AREA_TOLERANCE: f64 = 0.01;
    pub const DEFAULT_CONTACT_TOLERANCE: f64 = 0.05;
    pub const DEFAULT_ZERO_TOLERANCE: f64 = 1e-6;
    pub const DEFAULT_CLASH_CLEARANCE: f64 = 0.1;
    pub const DEFAULT_WALL_THICKNESS: f64 = 0.6;

    /// Tighter tolerances for synthetic, exactly aligned models.
    pub fn strict() -> Self {
        Self {
            area_tolerance: 1e-4,
            contact_tolerance: 1e-3,
            zero_tolerance: 1e-9,
            ..Self::default()
        }
    }

    /// Looser tolerances for models exported with visible gaps between rooms and walls.
    pub fn loose() -> Self {
        Self {
            area_tolerance: 0.05,
            contact_tolerance: 0.2,
            clash_clearance: 0.3,
            ..Self::default()
        }
    }

    pub fn with_contact_tolerance(mut self, contact_tolerance: f64) -> Self {
        self.contact_tolerance = contact_tolerance;
        self
    }

    pub fn with_area_tolerance(mut self, area_tolerance: f64) -> Self {
        self.area_tolerance = area_tolerance;
        self
    }

    /// Parse settings from JSON; missing fields take their default value.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.check()?;
        Ok(settings)
    }

    pub fn check(&self) -> Result<()> {
        let finite = [
            self.area_tolerance,
            self.contact_tolerance,
            self.zero_tolerance,
            self.clash_clearance,
            self.wall_thickness,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite {
            return Err(ZoneError::Config("tolerances must be finite".into()));
        }
        if self.area_tolerance < 0.0 || self.contact_tolerance < 0.0 || self.clash_clearance < 0.0 {
            return Err(ZoneError::Config(format!(
                "tolerances must not be negative: {:?}",
                self
            )));
        }
        if self.zero_tolerance <= 0.0 {
            return Err(ZoneError::Config(format!(
                "zero_tolerance must be positive, got {}",
                self.zero_tolerance
            )));
        }
        if self.wall_thickness < self.contact_tolerance {
            return Err(ZoneError::Config(format!(
                "wall_thickness ({}) is smaller than contact_tolerance ({})",
                self.wall_thickness, self.contact_tolerance
            )));
        }
        Ok(())
    }

    /// Check if a value is zero within `zero_tolerance`
    pub fn is_zero(&self, v: f64) -> bool {
        v.abs() < self.zero_tolerance
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            area_tolerance: Self::DEFAULT_AREA_TOLERANCE,
            contact_tolerance: Self::DEFAULT_CONTACT_TOLERANCE,
            zero_tolerance: Self::DEFAULT_ZERO_TOLERANCE,
            clash_clearance: Self::DEFAULT_CLASH_CLEARANCE,
            wall_thickness: Self::DEFAULT_WALL_THICKNESS,
        }
    }
}
