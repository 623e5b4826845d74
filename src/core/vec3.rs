//! Fixed-Point 3D Vector
//!
//! Same component-wise rules as [`super::vec2::FixedVec2`], with a third axis.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::fixed::Fixed64;
use super::lanes::fixed_vector;
use super::vec2::FixedVec2;

/// 3D vector with fixed-point components.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FixedVec3 {
    /// X component
    pub x: Fixed64,
    /// Y component
    pub y: Fixed64,
    /// Z component
    pub z: Fixed64,
}

fixed_vector!(FixedVec3, 3, [x, y, z]);

impl FixedVec3 {
    /// Zero vector
    pub const ZERO: Self = Self::new(Fixed64::ZERO, Fixed64::ZERO, Fixed64::ZERO);

    /// (1, 1, 1)
    pub const ONE: Self = Self::new(Fixed64::ONE, Fixed64::ONE, Fixed64::ONE);

    /// +X
    pub const UNIT_X: Self = Self::new(Fixed64::ONE, Fixed64::ZERO, Fixed64::ZERO);

    /// +Y
    pub const UNIT_Y: Self = Self::new(Fixed64::ZERO, Fixed64::ONE, Fixed64::ZERO);

    /// +Z
    pub const UNIT_Z: Self = Self::new(Fixed64::ZERO, Fixed64::ZERO, Fixed64::ONE);

    /// Create a new vector from fixed-point components.
    #[inline]
    pub const fn new(x: Fixed64, y: Fixed64, z: Fixed64) -> Self {
        Self { x, y, z }
    }

    /// Create a vector from integer components.
    #[inline]
    pub const fn from_ints(x: i32, y: i32, z: i32) -> Self {
        Self::new(Fixed64::from_i32(x), Fixed64::from_i32(y), Fixed64::from_i32(z))
    }

    /// Create a vector from raw Q48.16 components.
    #[inline]
    pub const fn from_raw(x: i64, y: i64, z: i64) -> Self {
        Self::new(Fixed64::from_raw(x), Fixed64::from_raw(y), Fixed64::from_raw(z))
    }

    /// Extend a 2D vector with a z component.
    #[inline]
    pub const fn extend(v: FixedVec2, z: Fixed64) -> Self {
        Self::new(v.x, v.y, z)
    }

    /// Drop the z component.
    #[inline]
    pub const fn truncate(self) -> FixedVec2 {
        FixedVec2::new(self.x, self.y)
    }

    /// Dot product.
    #[inline]
    pub fn dot(self, other: Self) -> Fixed64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product (right-handed).
    #[inline]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Squared length.
    #[inline]
    pub fn length_squared(self) -> Fixed64 {
        self.dot(self)
    }

    /// Squared distance to another point.
    #[inline]
    pub fn distance_squared(self, other: Self) -> Fixed64 {
        (self - other).length_squared()
    }

    /// Linear interpolation between two vectors.
    #[inline]
    pub fn lerp(self, other: Self, t: Fixed64) -> Self {
        self + (other - self) * t
    }

    /// Convert to float tuple for rendering.
    #[inline]
    pub fn to_floats(self) -> (f32, f32, f32) {
        (self.x.to_f32(), self.y.to_f32(), self.z.to_f32())
    }
}

impl fmt::Debug for FixedVec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (fx, fy, fz) = self.to_floats();
        write!(f, "Vec3({:.3}, {:.3}, {:.3})", fx, fy, fz)
    }
}

impl fmt::Display for FixedVec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (fx, fy, fz) = self.to_floats();
        write!(f, "({:.3}, {:.3}, {:.3})", fx, fy, fz)
    }
}
