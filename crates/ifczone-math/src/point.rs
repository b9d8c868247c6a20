use glam::DVec3;
use ifczone_core::{Result, ZoneError};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Neg, Sub};

use crate::sign::Sign;

/// Decimal places kept at every construction, projection and reconstruction.
pub const ROUNDING_DECIMALS: i32 = 10;

/// Round to [`ROUNDING_DECIMALS`], folding `-0.0` into `0.0`.
pub fn round(value: f64) -> f64 {
    let factor = 10f64.powi(ROUNDING_DECIMALS);
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

fn round_dvec3(v: DVec3) -> DVec3 {
    DVec3::new(round(v.x), round(v.y), round(v.z))
}

fn hash_dvec3<H: Hasher>(v: DVec3, state: &mut H) {
    v.x.to_bits().hash(state);
    v.y.to_bits().hash(state);
    v.z.to_bits().hash(state);
}

/// A location in model space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point(DVec3);

/// A direction or normal in model space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vector(DVec3);

// Coordinates are rounded and `-0.0` is folded, so bitwise hashing agrees
// with `PartialEq` for every finite value.
impl Eq for Point {}
impl Eq for Vector {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_dvec3(self.0, state);
    }
}

impl Hash for Vector {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_dvec3(self.0, state);
    }
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self::from_dvec3(DVec3::new(x, y, z))
    }

    pub fn from_dvec3(v: DVec3) -> Self {
        Self(round_dvec3(v))
    }

    pub fn from_array(a: [f64; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }

    pub fn origin() -> Self {
        Self(DVec3::ZERO)
    }

    pub fn x(&self) -> f64 {
        self.0.x
    }

    pub fn y(&self) -> f64 {
        self.0.y
    }

    pub fn z(&self) -> f64 {
        self.0.z
    }

    pub fn get(&self, index: usize) -> f64 {
        self.0[index]
    }

    pub fn as_dvec3(&self) -> DVec3 {
        self.0
    }

    pub fn to_array(&self) -> [f64; 3] {
        self.0.to_array()
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }

    /// Reinterpret the position as a vector from the origin.
    pub fn to_vector(&self) -> Vector {
        Vector(self.0)
    }
}

impl Sub for Point {
    type Output = Vector;

    fn sub(self, other: Point) -> Vector {
        Vector::from_dvec3(self.0 - other.0)
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    fn add(self, v: Vector) -> Point {
        Point::from_dvec3(self.0 + v.0)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::from_dvec3(self.0 + other.0)
    }
}

/// Flip coordinates per axis. `centroid + half_extent * sign` is a box corner.
impl Mul<Sign> for Point {
    type Output = Point;

    fn mul(self, sign: Sign) -> Point {
        Point::from_dvec3(self.0 * sign.to_dvec3())
    }
}

impl Vector {
    pub const X: Vector = Vector(DVec3::X);
    pub const Y: Vector = Vector(DVec3::Y);
    pub const Z: Vector = Vector(DVec3::Z);

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self::from_dvec3(DVec3::new(x, y, z))
    }

    pub fn from_dvec3(v: DVec3) -> Self {
        Self(round_dvec3(v))
    }

    pub fn zero() -> Self {
        Self(DVec3::ZERO)
    }

    pub fn x(&self) -> f64 {
        self.0.x
    }

    pub fn y(&self) -> f64 {
        self.0.y
    }

    pub fn z(&self) -> f64 {
        self.0.z
    }

    pub fn get(&self, index: usize) -> f64 {
        self.0[index]
    }

    pub fn as_dvec3(&self) -> DVec3 {
        self.0
    }

    pub fn to_array(&self) -> [f64; 3] {
        self.0.to_array()
    }

    pub fn to_tuple(&self) -> (f64, f64, f64) {
        (self.0.x, self.0.y, self.0.z)
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }

    pub fn length(&self) -> f64 {
        self.0.length()
    }

    pub fn cross(&self, other: &Vector) -> Vector {
        Vector::from_dvec3(self.0.cross(other.0))
    }

    pub fn dot(&self, other: &Vector) -> f64 {
        self.0.dot(other.0)
    }

    /// Projection of `self` onto the direction of `other`.
    ///
    /// Projecting onto a zero vector yields non-finite components, which
    /// [`Vector::norm`] reports.
    pub fn project(&self, other: &Vector) -> Vector {
        let a = self.dot(other) / other.dot(other);
        Vector::from_dvec3(other.0 * a)
    }

    /// Unit vector in the same direction.
    pub fn norm(&self) -> Result<Vector> {
        let normalized = self.0 / self.0.length();
        if !normalized.is_finite() {
            return Err(ZoneError::NonFinite(format!(
                "normalizing {:?} gives {:?}",
                self.0, normalized
            )));
        }
        Ok(Vector::from_dvec3(normalized))
    }

    /// All components below `tolerance` in absolute value.
    pub fn is_a_zero(&self, tolerance: f64) -> bool {
        self.0.abs().max_element() < tolerance
    }

    /// Index of the component with the largest magnitude.
    ///
    /// Ties resolve to the lowest index.
    pub fn normal_index(&self) -> usize {
        let a = self.0.abs();
        if a.x >= a.y && a.x >= a.z {
            0
        } else if a.y >= a.z {
            1
        } else {
            2
        }
    }

    /// Unsigned angle to `other` in radians, within `[0, pi]`.
    pub fn angle(&self, other: &Vector) -> f64 {
        let cos = self.dot(other) / (self.length() * other.length());
        cos.clamp(-1.0, 1.0).acos()
    }
}

/// `a * b` is the cross product.
impl Mul for Vector {
    type Output = Vector;

    fn mul(self, other: Vector) -> Vector {
        self.cross(&other)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, s: f64) -> Vector {
        Vector::from_dvec3(self.0 * s)
    }
}

impl Mul<Sign> for Vector {
    type Output = Vector;

    fn mul(self, sign: Sign) -> Vector {
        Vector::from_dvec3(self.0 * sign.to_dvec3())
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, other: Vector) -> Vector {
        Vector::from_dvec3(self.0 + other.0)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, other: Vector) -> Vector {
        Vector::from_dvec3(self.0 - other.0)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector::from_dvec3(-self.0)
    }
}
