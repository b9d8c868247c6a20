use crate::error::Result;

/// Check the geometric invariants an entity promises after construction.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// World-space extent of an entity, as `(min, max)` corners.
///
/// Used by the clash prefilter, which only needs a coarse axis-aligned
/// envelope of each box.
pub trait WorldBounds {
    type Point;
    fn world_bounds(&self) -> (Self::Point, Self::Point);
}
