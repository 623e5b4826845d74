//! Fixed-Point 2D Vector
//!
//! Deterministic 2D vector operations for lockstep simulation.
//! All operations use fixed-point arithmetic; scalar operators are applied to
//! each component independently.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::FixedResult;
use super::fixed::Fixed64;
use super::lanes::fixed_vector;
use super::tables::TableSet;

/// 2D vector with fixed-point components.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FixedVec2 {
    /// X component
    pub x: Fixed64,
    /// Y component
    pub y: Fixed64,
}

fixed_vector!(FixedVec2, 2, [x, y]);

impl FixedVec2 {
    /// Zero vector
    pub const ZERO: Self = Self::new(Fixed64::ZERO, Fixed64::ZERO);

    /// (1, 1)
    pub const ONE: Self = Self::new(Fixed64::ONE, Fixed64::ONE);

    /// Unit vector pointing right (+X)
    pub const RIGHT: Self = Self::new(Fixed64::ONE, Fixed64::ZERO);

    /// Unit vector pointing up (+Y)
    pub const UP: Self = Self::new(Fixed64::ZERO, Fixed64::ONE);

    /// Unit vector pointing left (-X)
    pub const LEFT: Self = Self::new(Fixed64::from_i32(-1), Fixed64::ZERO);

    /// Unit vector pointing down (-Y)
    pub const DOWN: Self = Self::new(Fixed64::ZERO, Fixed64::from_i32(-1));

    /// Create a new vector from fixed-point components.
    #[inline]
    pub const fn new(x: Fixed64, y: Fixed64) -> Self {
        Self { x, y }
    }

    /// Create a vector from integer components.
    #[inline]
    pub const fn from_ints(x: i32, y: i32) -> Self {
        Self::new(Fixed64::from_i32(x), Fixed64::from_i32(y))
    }

    /// Create a vector from raw Q48.16 components.
    #[inline]
    pub const fn from_raw(x: i64, y: i64) -> Self {
        Self::new(Fixed64::from_raw(x), Fixed64::from_raw(y))
    }

    /// Squared length. Exact; the table sqrt is only accurate on [1, 4).
    #[inline]
    pub fn length_squared(self) -> Fixed64 {
        self.dot(self)
    }

    /// Squared distance to another point.
    #[inline]
    pub fn distance_squared(self, other: Self) -> Fixed64 {
        (self - other).length_squared()
    }

    /// Dot product with another vector.
    #[inline]
    pub fn dot(self, other: Self) -> Fixed64 {
        self.x * other.x + self.y * other.y
    }

    /// 2D cross product (returns scalar z-component).
    /// Positive if other is counter-clockwise from self.
    #[inline]
    pub fn cross(self, other: Self) -> Fixed64 {
        self.x * other.y - self.y * other.x
    }

    /// Clamp both components to a range.
    #[inline]
    pub fn clamp(self, min: Fixed64, max: Fixed64) -> Self {
        Self::new(self.x.clamp(min, max), self.y.clamp(min, max))
    }

    /// Linear interpolation between two vectors.
    /// t = 0 returns self, t = ONE returns other.
    #[inline]
    pub fn lerp(self, other: Self, t: Fixed64) -> Self {
        self + (other - self) * t
    }

    /// Rotate 90 degrees counter-clockwise.
    #[inline]
    pub fn perpendicular(self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Rotate counter-clockwise by `angle` radians using the sin table.
    pub fn rotate(self, angle: Fixed64, tables: &TableSet) -> FixedResult<Self> {
        let (sin, cos) = angle.sin_cos(tables)?;
        Ok(Self::new(
            self.x * cos - self.y * sin,
            self.x * sin + self.y * cos,
        ))
    }

    /// Convert to float tuple for rendering.
    #[inline]
    pub fn to_floats(self) -> (f32, f32) {
        (self.x.to_f32(), self.y.to_f32())
    }
}

impl fmt::Debug for FixedVec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (fx, fy) = self.to_floats();
        write!(f, "Vec2({:.3}, {:.3})", fx, fy)
    }
}

impl fmt::Display for FixedVec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (fx, fy) = self.to_floats();
        write!(f, "({:.3}, {:.3})", fx, fy)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::FixedError;
    use crate::core::ops::BinOp;
    use proptest::prelude::*;

    fn f(v: f64) -> Fixed64 {
        Fixed64::from_f64(v)
    }

    #[test]
    fn test_vec2_constants() {
        assert_eq!(FixedVec2::ZERO.x, Fixed64::ZERO);
        assert_eq!(FixedVec2::ZERO.y, Fixed64::ZERO);
        assert_eq!(FixedVec2::RIGHT.x, Fixed64::ONE);
        assert_eq!(FixedVec2::UP.y, Fixed64::ONE);
        assert_eq!(FixedVec2::LEFT, -FixedVec2::RIGHT);
        assert_eq!(FixedVec2::DOWN, -FixedVec2::UP);
    }

    #[test]
    fn test_vec2_add_sub() {
        let a = FixedVec2::new(f(3.0), f(4.0));
        let b = FixedVec2::new(f(1.0), f(2.0));
        assert_eq!(a + b, FixedVec2::from_ints(4, 6));
        assert_eq!(a - b, FixedVec2::from_ints(2, 2));
    }

    #[test]
    fn test_vec2_componentwise_mul_div() {
        let a = FixedVec2::from_raw(688128, 344064);
        let b = FixedVec2::from_raw(344064, 688128);
        assert_eq!(a * b, FixedVec2::from_raw(3612672, 3612672));
        assert_eq!(a / b, FixedVec2::from_raw(131072, 32768));
    }

    #[test]
    fn test_vec2_scalar_operands() {
        let v = FixedVec2::new(f(2.0), f(3.0));
        assert_eq!(v * f(2.0), FixedVec2::from_ints(4, 6));
        assert_eq!(v * 2i64, FixedVec2::from_ints(4, 6));
        assert_eq!(3i32 * v, FixedVec2::from_ints(6, 9));
        assert_eq!(v / 2i64, FixedVec2::new(f(1.0), f(1.5)));
        assert_eq!(v / f(0.5), FixedVec2::from_ints(4, 6));
    }

    #[test]
    fn test_vec2_checked() {
        let v = FixedVec2::new(Fixed64::MAX, Fixed64::ZERO);
        assert_eq!(
            v.checked_add(FixedVec2::new(Fixed64::EPSILON, Fixed64::ZERO)),
            Err(FixedError::Overflow { op: "add" })
        );
        assert_eq!(
            FixedVec2::ONE.checked_div(FixedVec2::RIGHT),
            Err(FixedError::DivisionByZero)
        );
        assert_eq!(
            FixedVec2::ONE.checked_div_scalar(Fixed64::ZERO),
            Err(FixedError::DivisionByZero)
        );
        assert_eq!(
            FixedVec2::from_ints(2, 3).checked_scale(2i64),
            Ok(FixedVec2::from_ints(4, 6))
        );
        // Wrapping counterpart of the overflow above.
        assert_eq!(
            v + FixedVec2::new(Fixed64::EPSILON, Fixed64::ZERO),
            FixedVec2::new(Fixed64::MIN, Fixed64::ZERO)
        );
    }

    #[test]
    fn test_vec2_min_max() {
        let a = FixedVec2::from_ints(1, 5);
        let b = FixedVec2::from_ints(3, -2);
        assert_eq!(a.min(b), FixedVec2::from_ints(1, -2));
        assert_eq!(a.max(b), FixedVec2::from_ints(3, 5));
        assert_eq!(b.abs(), FixedVec2::from_ints(3, 2));
    }

    #[test]
    fn test_vec2_bit_view() {
        let v = FixedVec2::from_raw(0b1100, -1);
        let mask = FixedVec2::from_raw(0b1010, 0xFFFF).bits();
        assert_eq!(FixedVec2::from_bits(v.bits() & mask), FixedVec2::from_raw(0b1000, 0xFFFF));
        assert_eq!(FixedVec2::from_bits(v.bits() << 16), FixedVec2::from_raw(0b1100 << 16, -65536));
        assert_eq!(FixedVec2::from_bits(v.bits().ushr(48)), FixedVec2::from_raw(0, 0xFFFF));
        assert_eq!(FixedVec2::from_bits(v.bits()), v);
    }

    #[test]
    fn test_vec2_length_squared_and_dot() {
        let v = FixedVec2::new(f(3.0), f(4.0));
        assert_eq!(v.length_squared(), f(25.0));
        assert_eq!(FixedVec2::ZERO.distance_squared(v), f(25.0));

        let a = FixedVec2::new(f(2.0), f(3.0));
        let b = FixedVec2::new(f(4.0), f(5.0));
        // 2*4 + 3*5 = 23
        assert_eq!(a.dot(b), f(23.0));
        assert_eq!(FixedVec2::RIGHT.cross(FixedVec2::UP), Fixed64::ONE);
    }

    #[test]
    fn test_vec2_wrapping_op() {
        let v = FixedVec2::new(Fixed64::MAX, Fixed64::ONE);
        let step = FixedVec2::new(Fixed64::EPSILON, Fixed64::ONE);
        assert_eq!(
            v.wrapping_op(BinOp::Add, step),
            Ok(FixedVec2::new(Fixed64::MIN, Fixed64::from_int(2)))
        );
        // A zero lane still fails in wrapping mode.
        assert_eq!(
            FixedVec2::ONE.wrapping_op(BinOp::Div, FixedVec2::RIGHT),
            Err(FixedError::DivisionByZero)
        );
        assert_eq!(
            FixedVec2::from_ints(6, 9).wrapping_op(BinOp::Rem, FixedVec2::from_ints(4, 4)),
            Ok(FixedVec2::from_ints(2, 1))
        );
    }

    #[test]
    fn test_vec2_rotate_quarter_turn() {
        let tables = TableSet::author();
        let r = FixedVec2::RIGHT.rotate(Fixed64::HALF_PI, &tables).unwrap();
        assert!(r.x.raw().abs() <= 2, "{r:?}");
        assert!((r.y.raw() - 65536).abs() <= 2, "{r:?}");
    }

    #[test]
    fn test_vec2_clamp_lerp_perpendicular() {
        let outside = FixedVec2::new(f(100.0), f(-100.0));
        let clamped = outside.clamp(f(-50.0), f(50.0));
        assert_eq!(clamped, FixedVec2::new(f(50.0), f(-50.0)));

        let a = FixedVec2::ZERO;
        let b = FixedVec2::from_ints(10, 20);
        assert_eq!(a.lerp(b, Fixed64::HALF), FixedVec2::from_ints(5, 10));
        assert_eq!(FixedVec2::RIGHT.perpendicular(), FixedVec2::UP);
    }

    proptest! {
        #[test]
        fn prop_vec2_equality_is_exact(a in any::<i64>(), b in any::<i64>(), c in any::<i64>()) {
            prop_assert_eq!(FixedVec2::from_raw(a, b), FixedVec2::from_raw(a, b));
            if b != c {
                prop_assert_ne!(FixedVec2::from_raw(a, b), FixedVec2::from_raw(a, c));
            }
        }

        #[test]
        fn prop_vec2_ops_are_componentwise(
            ax in any::<i64>(), ay in any::<i64>(),
            bx in any::<i64>(), by in any::<i64>(),
        ) {
            let a = FixedVec2::from_raw(ax, ay);
            let b = FixedVec2::from_raw(bx, by);
            let sum = a + b;
            prop_assert_eq!(sum.x, a.x + b.x);
            prop_assert_eq!(sum.y, a.y + b.y);
            let prod = a * b;
            prop_assert_eq!(prod.x, a.x * b.x);
            prop_assert_eq!(prod.y, a.y * b.y);
        }
    }
}
