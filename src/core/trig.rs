//! Table-Driven Transcendentals
//!
//! `sin`, `cos`, `tan`, `asin`, `acos` and `sqrt` for [`Fixed64`], computed
//! purely from integer arithmetic and the samples in a [`TableSet`]. Results
//! are bit-identical on every platform given identical table files.
//!
//! ## Domain reduction
//!
//! ```text
//!   segment = (x / HALF_PI) & 3        index = x % HALF_PI
//!
//!   segment 0 ──►  T[index]            segment 2 ──► -T[index]
//!   segment 1 ──►  T[HALF_PI - index]  segment 3 ──► -T[HALF_PI - index]
//! ```
//!
//! Division and remainder truncate toward zero. For negative angles this is
//! not a floored modulo: the index goes negative and the lookup reports
//! [`FixedError::OutsideTable`] rather than picking a corrected quadrant.
//! Existing deterministic traces depend on this reduction, so it stays.

use super::error::{FixedError, FixedResult};
use super::fixed::{Fixed64, FIXED_ONE, FIXED_SCALE};
use super::tables::{TableKind, TableSet};

/// Segment size for sin/cos/tan reduction (π/2 raw).
const SEGMENT: i64 = Fixed64::HALF_PI.raw();

/// Largest asin table index.
const ASIN_LAST: i64 = FIXED_ONE - 1;

/// Inputs below this are pre-shifted into the sqrt table's domain.
const SQRT_SUB_UNITY: i64 = 65_535;

/// Reduction stops once the working value is at or below this (4.0 raw).
const SQRT_MIDPOINT: i64 = 262_144;

/// Largest sqrt table index.
const SQRT_LAST: i64 = FIXED_ONE - 1;

#[inline]
fn sample<T: Copy>(samples: &[T], table: TableKind, index: i64) -> FixedResult<T> {
    usize::try_from(index)
        .ok()
        .and_then(|i| samples.get(i).copied())
        .ok_or(FixedError::OutsideTable { table, index })
}

impl Fixed64 {
    /// Sine of an angle in radians.
    pub fn sin(self, tables: &TableSet) -> FixedResult<Self> {
        let raw = self.raw();
        let segment = (raw / SEGMENT) & 0b11;
        let index = raw % SEGMENT;
        let samples = tables.sin_samples();

        let value = match segment {
            0 => i64::from(sample(samples, TableKind::Sin, index)?),
            1 => i64::from(sample(samples, TableKind::Sin, SEGMENT - index)?),
            2 => -i64::from(sample(samples, TableKind::Sin, index)?),
            _ => -i64::from(sample(samples, TableKind::Sin, SEGMENT - index)?),
        };
        Ok(Self::from_raw(value))
    }

    /// Cosine, as the sine shifted by π/2.
    #[inline]
    pub fn cos(self, tables: &TableSet) -> FixedResult<Self> {
        (self + Self::HALF_PI).sin(tables)
    }

    /// Sine and cosine together.
    #[inline]
    pub fn sin_cos(self, tables: &TableSet) -> FixedResult<(Self, Self)> {
        Ok((self.sin(tables)?, self.cos(tables)?))
    }

    /// Tangent, reduced over a half period with odd symmetry.
    pub fn tan(self, tables: &TableSet) -> FixedResult<Self> {
        let raw = self.raw();
        let segment = (raw / SEGMENT) & 0b1;
        let index = raw % SEGMENT;
        let samples = tables.tan_samples();

        if segment == 0 {
            sample(samples, TableKind::Tan, index)
        } else {
            Ok(-sample(samples, TableKind::Tan, SEGMENT - index)?)
        }
    }

    /// Arcsine.
    ///
    /// Bit 16 picks the sign half and the low 16 bits index the table, so
    /// negative inputs mirror through their two's-complement fraction. At
    /// exactly `ONE` bit 16 is set and the result takes the negative branch.
    pub fn asin(self, tables: &TableSet) -> FixedResult<Self> {
        let raw = self.raw();
        let segment = (raw >> FIXED_SCALE) & 0b1;
        let index = raw & ASIN_LAST;
        let samples = tables.asin_samples();

        let value = if segment == 0 {
            i64::from(sample(samples, TableKind::Asin, index)?)
        } else {
            -i64::from(sample(samples, TableKind::Asin, ASIN_LAST - index)?)
        };
        Ok(Self::from_raw(value))
    }

    /// Arccosine: `asin(-x) + π/2`.
    #[inline]
    pub fn acos(self, tables: &TableSet) -> FixedResult<Self> {
        Ok((-self).asin(tables)? + Self::HALF_PI)
    }

    /// Table-driven square root of `|self|`.
    ///
    /// Approximate by construction; the exact bit pattern depends only on
    /// the input and the sqrt table. With canonical tables the result is
    /// within a couple of raw units for inputs in [1, 4). Each reduction step
    /// shifts the mantissa but adds a fixed `65535`, so larger inputs come out
    /// low by roughly `2^steps - 1` whole units, and sub-unity inputs are low
    /// as well. It is not a magnitude function.
    pub fn sqrt(self, tables: &TableSet) -> FixedResult<Self> {
        if self.raw() == 0 {
            return Ok(Self::ZERO);
        }

        let mut value = self.abs().raw();
        let pre_shifted = value < SQRT_SUB_UNITY;
        if pre_shifted {
            value = value.wrapping_shl(FIXED_SCALE);
        }

        let mut shifts = 0u32;
        while value > SQRT_MIDPOINT {
            value >>= 2;
            shifts += 1;
        }

        let index = (value.wrapping_sub(FIXED_ONE) >> 1).clamp(0, SQRT_LAST);
        let mantissa = i64::from(sample(tables.sqrt_samples(), TableKind::Sqrt, index)?);
        let mut result = (mantissa << shifts).wrapping_add(SQRT_SUB_UNITY);
        if pre_shifted {
            result >>= 8;
        }
        Ok(Self::from_raw(result))
    }
}

// =============================================================================
// TESTS
// =============================================================================
