//! Q48.16 Fixed-Point Scalar
//!
//! This module provides the deterministic scalar every other kernel type is
//! built from. All operations use integer arithmetic only - floats appear at
//! the conversion boundary and nowhere else.
//!
//! ## Format: Q48.16
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Bit Layout: Q48.16 (64-bit signed integer)                 │
//! ├─────────────────────────────────────────────────────────────┤
//! │  [S][IIII ... 47 bits ... IIII][FFFFFFFFFFFFFFFF]           │
//! │   │  └────── integer part ─────┘└──── 16 bits ────┘         │
//! │   └─ Sign bit                                               │
//! │                                                             │
//! │  Range: ±1.4e14 (approx)                                    │
//! │  Precision: 1/65536 ≈ 0.000015 units                        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Arithmetic operators live in [`super::ops`], table-driven functions in
//! [`super::trig`].

use std::any::Any;
use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{FixedError, FixedResult};

/// Number of fractional bits (16)
pub const FIXED_SCALE: u32 = 16;

/// 1.0 as a raw value (65536)
pub const FIXED_ONE: i64 = 1 << FIXED_SCALE;

/// 0.5 as a raw value (32768)
pub const FIXED_HALF: i64 = FIXED_ONE >> 1;

/// Mask selecting the fractional bits.
pub const FRACTION_MASK: i64 = FIXED_ONE - 1;

/// 64-bit signed fixed-point number with 16 fractional bits.
///
/// The raw integer is the only state. Two values are equal exactly when their
/// raw integers are equal; ordering is the raw integer order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fixed64(i64);

impl Fixed64 {
    /// 0.0
    pub const ZERO: Self = Self(0);

    /// 1.0
    pub const ONE: Self = Self(FIXED_ONE);

    /// 0.5
    pub const HALF: Self = Self(FIXED_HALF);

    /// Smallest positive value (1 raw unit).
    pub const EPSILON: Self = Self(1);

    /// π, raw 205887.
    pub const PI: Self = Self(205_887);

    /// 2π, raw 411774.
    pub const TAU: Self = Self(411_774);

    /// π/2 as the raw truncating half of [`Self::PI`] (102943).
    ///
    /// This is the segment size for trigonometric domain reduction.
    pub const HALF_PI: Self = Self(205_887 / 2);

    /// Smallest representable value.
    pub const MIN: Self = Self(i64::MIN);

    /// Largest representable value.
    pub const MAX: Self = Self(i64::MAX);

    /// Create from a raw Q48.16 integer.
    #[inline]
    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw Q48.16 integer.
    #[inline]
    pub const fn raw(self) -> i64 {
        self.0
    }

    /// Create from an integer. High bits shifted past bit 63 are dropped.
    #[inline]
    pub const fn from_int(value: i64) -> Self {
        Self(value << FIXED_SCALE)
    }

    /// Create from an integer, reporting values outside the 48-bit integer range.
    #[inline]
    pub fn checked_from_int(value: i64) -> FixedResult<Self> {
        value
            .checked_mul(FIXED_ONE)
            .map(Self)
            .ok_or(FixedError::Overflow { op: "from_int" })
    }

    /// Create from an `i32`. Always representable.
    #[inline]
    pub const fn from_i32(value: i32) -> Self {
        Self((value as i64) << FIXED_SCALE)
    }

    /// Convert from a float, truncating toward zero.
    ///
    /// # Warning
    /// Only use at initialization or for authoring. NEVER in a simulation step.
    #[inline]
    pub fn from_f64(value: f64) -> Self {
        Self((value * FIXED_ONE as f64) as i64)
    }

    /// Convert from an `f32`, truncating toward zero.
    #[inline]
    pub fn from_f32(value: f32) -> Self {
        Self::from_f64(f64::from(value))
    }

    /// Integer part by arithmetic shift (rounds toward negative infinity).
    #[inline]
    pub const fn to_int(self) -> i64 {
        self.0 >> FIXED_SCALE
    }

    /// Integer part narrowed to `i32`; upper bits are truncated.
    #[inline]
    pub const fn to_i32(self) -> i32 {
        (self.0 >> FIXED_SCALE) as i32
    }

    /// Convert to float for display/rendering.
    ///
    /// # Warning
    /// Only use for visual output. NEVER feed the result back into simulation.
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / FIXED_ONE as f64
    }

    /// Convert to `f32` for display/rendering.
    #[inline]
    pub fn to_f32(self) -> f32 {
        self.to_f64() as f32
    }

    /// Absolute value using a branchless sign mask.
    ///
    /// `Fixed64::MIN.abs()` has no positive counterpart and returns `MIN`.
    #[inline]
    pub const fn abs(self) -> Self {
        let mask = self.0 >> 63;
        Self(self.0.wrapping_add(mask) ^ mask)
    }

    /// -1, 0 or 1 as a fixed value.
    #[inline]
    pub const fn signum(self) -> Self {
        Self(self.0.signum() << FIXED_SCALE)
    }

    /// True when the raw value is negative.
    #[inline]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Largest whole value not greater than `self`.
    #[inline]
    pub const fn floor(self) -> Self {
        Self(self.0 & !FRACTION_MASK)
    }

    /// Smallest whole value not less than `self`. Wraps at the top of the range.
    #[inline]
    pub const fn ceil(self) -> Self {
        if self.0 & FRACTION_MASK == 0 {
            self
        } else {
            Self((self.0 & !FRACTION_MASK).wrapping_add(FIXED_ONE))
        }
    }

    /// Fractional bits as a value in `[0, 1)`.
    #[inline]
    pub const fn fract(self) -> Self {
        Self(self.0 & FRACTION_MASK)
    }

    /// Smaller of two values. Returns one of the operands unchanged.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        if other.0 < self.0 { other } else { self }
    }

    /// Larger of two values. Returns one of the operands unchanged.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        if other.0 > self.0 { other } else { self }
    }

    /// Clamp into `[min, max]`, returning `self`, `min` or `max` unchanged.
    #[inline]
    pub fn clamp(self, min: Self, max: Self) -> Self {
        if self.0 < min.0 {
            min
        } else if self.0 > max.0 {
            max
        } else {
            self
        }
    }

    /// Linear interpolation: a + (b - a) * t, wrapping.
    #[inline]
    pub fn lerp(self, other: Self, t: Self) -> Self {
        self + (other - self) * t
    }

    /// Compare against a type-erased operand.
    ///
    /// Mirrors dynamically typed comparison: anything that is not a `Fixed64`
    /// is rejected with [`FixedError::TypeMismatch`].
    pub fn compare_any(&self, other: &dyn Any) -> FixedResult<Ordering> {
        match other.downcast_ref::<Fixed64>() {
            Some(rhs) => Ok(self.cmp(rhs)),
            None => Err(FixedError::TypeMismatch {
                found: describe_any(other),
            }),
        }
    }
}

fn describe_any(value: &dyn Any) -> &'static str {
    if value.is::<i64>() || value.is::<i32>() {
        "integer"
    } else if value.is::<f64>() || value.is::<f32>() {
        "float"
    } else if value.is::<String>() || value.is::<&str>() {
        "string"
    } else {
        "unknown type"
    }
}

impl fmt::Debug for Fixed64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fixed64({:.4}, raw={})", self.to_f64(), self.0)
    }
}

impl fmt::Display for Fixed64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.to_f64())
    }
}

// =============================================================================
// TESTS
// =============================================================================
