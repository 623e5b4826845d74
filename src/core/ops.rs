//! Fixed-Point Arithmetic Engine
//!
//! Every binary operator on [`Fixed64`] goes through [`eval`], which is
//! parameterized by the kind of each operand and by the overflow mode:
//!
//! ```text
//! ┌──────────────┬───────────────────────┬────────────────────────────┐
//! │  Operator    │  Fixed ∘ Fixed (raw)  │  with an integer operand n │
//! ├──────────────┼───────────────────────┼────────────────────────────┤
//! │  add / sub   │  a ± b                │  n lifted to n << 16       │
//! │  mul         │  (a * b) >> 16        │  a * n                     │
//! │  div         │  (a << 16) / b        │  a / n  (n as divisor)     │
//! │  rem         │  a % b                │  n lifted to n << 16       │
//! └──────────────┴───────────────────────┴────────────────────────────┘
//! ```
//!
//! - [`Overflow::Wrap`] wraps with two's-complement semantics. This is what
//!   the `std::ops` operators use.
//! - [`Overflow::Check`] reports [`FixedError::Overflow`] instead. This is
//!   what `Fixed64::checked_*` use.
//!
//! A zero divisor is [`FixedError::DivisionByZero`] in both modes. The `/` and
//! `%` operators panic with that message, like integer division does.

use std::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign,
};

use super::error::{FixedError, FixedResult};
use super::fixed::{Fixed64, FIXED_ONE, FIXED_SCALE};

/// An operand after classification, carrying its raw integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifted {
    /// Raw Q48.16 value.
    Fixed(i64),
    /// Plain integer, not yet scaled.
    Int(i64),
}

/// Anything that may appear on either side of a fixed-point operator.
///
/// Integers are accepted as their own operand kind rather than converted
/// implicitly, so `x * 3` scales the raw value instead of multiplying by a
/// lifted `3.0`.
pub trait Operand: Copy {
    /// Classify this operand.
    fn lift(self) -> Lifted;
}

impl Operand for Fixed64 {
    #[inline]
    fn lift(self) -> Lifted {
        Lifted::Fixed(self.raw())
    }
}

impl Operand for i64 {
    #[inline]
    fn lift(self) -> Lifted {
        Lifted::Int(self)
    }
}

impl Operand for i32 {
    #[inline]
    fn lift(self) -> Lifted {
        Lifted::Int(i64::from(self))
    }
}

/// Binary operators supported by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    /// Addition
    Add,
    /// Subtraction
    Sub,
    /// Multiplication
    Mul,
    /// Division
    Div,
    /// Truncating remainder (sign of the dividend)
    Rem,
}

impl BinOp {
    /// Operator name used in overflow errors.
    pub const fn name(self) -> &'static str {
        match self {
            BinOp::Add => "add",
            BinOp::Sub => "sub",
            BinOp::Mul => "mul",
            BinOp::Div => "div",
            BinOp::Rem => "rem",
        }
    }
}

/// How an operator treats results outside the 64-bit raw range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Overflow {
    /// Two's-complement wraparound, never an error.
    Wrap,
    /// Report [`FixedError::Overflow`].
    Check,
}

impl Overflow {
    #[inline]
    fn add(self, a: i64, b: i64, op: BinOp) -> FixedResult<i64> {
        match self {
            Overflow::Wrap => Ok(a.wrapping_add(b)),
            Overflow::Check => a.checked_add(b).ok_or(overflow(op)),
        }
    }

    #[inline]
    fn sub(self, a: i64, b: i64, op: BinOp) -> FixedResult<i64> {
        match self {
            Overflow::Wrap => Ok(a.wrapping_sub(b)),
            Overflow::Check => a.checked_sub(b).ok_or(overflow(op)),
        }
    }

    #[inline]
    fn mul(self, a: i64, b: i64, op: BinOp) -> FixedResult<i64> {
        match self {
            Overflow::Wrap => Ok(a.wrapping_mul(b)),
            Overflow::Check => a.checked_mul(b).ok_or(overflow(op)),
        }
    }

    /// Scale a raw integer up by 2^16.
    #[inline]
    fn shl(self, a: i64, op: BinOp) -> FixedResult<i64> {
        match self {
            Overflow::Wrap => Ok(a.wrapping_shl(FIXED_SCALE)),
            Overflow::Check => a.checked_mul(FIXED_ONE).ok_or(overflow(op)),
        }
    }

    #[inline]
    fn div(self, a: i64, b: i64, op: BinOp) -> FixedResult<i64> {
        if b == 0 {
            return Err(FixedError::DivisionByZero);
        }
        match self {
            Overflow::Wrap => Ok(a.wrapping_div(b)),
            Overflow::Check => a.checked_div(b).ok_or(overflow(op)),
        }
    }

    #[inline]
    fn rem(self, a: i64, b: i64, op: BinOp) -> FixedResult<i64> {
        if b == 0 {
            return Err(FixedError::DivisionByZero);
        }
        match self {
            Overflow::Wrap => Ok(a.wrapping_rem(b)),
            Overflow::Check => a.checked_rem(b).ok_or(overflow(op)),
        }
    }

    /// Raw fixed value of an operand, scaling integers.
    #[inline]
    fn raw(self, value: Lifted, op: BinOp) -> FixedResult<i64> {
        match value {
            Lifted::Fixed(raw) => Ok(raw),
            Lifted::Int(n) => self.shl(n, op),
        }
    }
}

#[inline]
fn overflow(op: BinOp) -> FixedError {
    FixedError::Overflow { op: op.name() }
}

/// Evaluate `lhs op rhs` under the given overflow mode.
pub fn eval<L: Operand, R: Operand>(
    op: BinOp,
    lhs: L,
    rhs: R,
    mode: Overflow,
) -> FixedResult<Fixed64> {
    let lhs = lhs.lift();
    let rhs = rhs.lift();

    let raw = match op {
        BinOp::Add => mode.add(mode.raw(lhs, op)?, mode.raw(rhs, op)?, op)?,
        BinOp::Sub => mode.sub(mode.raw(lhs, op)?, mode.raw(rhs, op)?, op)?,
        BinOp::Rem => mode.rem(mode.raw(lhs, op)?, mode.raw(rhs, op)?, op)?,
        BinOp::Mul => match (lhs, rhs) {
            // Full 64-bit product first, then drop the extra fraction bits.
            (Lifted::Fixed(a), Lifted::Fixed(b)) => mode.mul(a, b, op)? >> FIXED_SCALE,
            (Lifted::Fixed(a), Lifted::Int(n)) | (Lifted::Int(n), Lifted::Fixed(a)) => {
                mode.mul(a, n, op)?
            }
            (Lifted::Int(a), Lifted::Int(b)) => mode.mul(mode.shl(a, op)?, b, op)?,
        },
        BinOp::Div => {
            let a = mode.raw(lhs, op)?;
            match rhs {
                Lifted::Fixed(b) => {
                    if b == 0 {
                        return Err(FixedError::DivisionByZero);
                    }
                    mode.div(mode.shl(a, op)?, b, op)?
                }
                Lifted::Int(n) => mode.div(a, n, op)?,
            }
        }
    };

    Ok(Fixed64::from_raw(raw))
}

/// Unchecked evaluation: wraps on overflow, errors only on a zero divisor.
#[inline]
pub fn wrapping<L: Operand, R: Operand>(op: BinOp, lhs: L, rhs: R) -> FixedResult<Fixed64> {
    eval(op, lhs, rhs, Overflow::Wrap)
}

/// Checked evaluation: reports overflow and zero divisors.
#[inline]
pub fn checked<L: Operand, R: Operand>(op: BinOp, lhs: L, rhs: R) -> FixedResult<Fixed64> {
    eval(op, lhs, rhs, Overflow::Check)
}

/// Operator entry point. Only a zero divisor can fail in wrap mode.
#[inline]
fn apply<L: Operand, R: Operand>(op: BinOp, lhs: L, rhs: R) -> Fixed64 {
    match wrapping(op, lhs, rhs) {
        Ok(value) => value,
        Err(err) => panic!("{err}"),
    }
}

// =============================================================================
// CHECKED SURFACE
// =============================================================================

impl Fixed64 {
    /// Checked addition.
    #[inline]
    pub fn checked_add<R: Operand>(self, rhs: R) -> FixedResult<Self> {
        checked(BinOp::Add, self, rhs)
    }

    /// Checked subtraction.
    #[inline]
    pub fn checked_sub<R: Operand>(self, rhs: R) -> FixedResult<Self> {
        checked(BinOp::Sub, self, rhs)
    }

    /// Checked multiplication. The full raw product must fit in 64 bits.
    #[inline]
    pub fn checked_mul<R: Operand>(self, rhs: R) -> FixedResult<Self> {
        checked(BinOp::Mul, self, rhs)
    }

    /// Checked division. The pre-shifted dividend must fit in 64 bits.
    #[inline]
    pub fn checked_div<R: Operand>(self, rhs: R) -> FixedResult<Self> {
        checked(BinOp::Div, self, rhs)
    }

    /// Checked remainder.
    #[inline]
    pub fn checked_rem<R: Operand>(self, rhs: R) -> FixedResult<Self> {
        checked(BinOp::Rem, self, rhs)
    }

    /// Checked negation; `MIN` has no positive counterpart.
    #[inline]
    pub fn checked_neg(self) -> FixedResult<Self> {
        self.raw()
            .checked_neg()
            .map(Fixed64::from_raw)
            .ok_or(FixedError::Overflow { op: "neg" })
    }

    /// Checked absolute value; fails for `MIN` where [`Fixed64::abs`] wraps.
    #[inline]
    pub fn checked_abs(self) -> FixedResult<Self> {
        self.raw()
            .checked_abs()
            .map(Fixed64::from_raw)
            .ok_or(FixedError::Overflow { op: "abs" })
    }
}

// =============================================================================
// UNCHECKED OPERATORS
// =============================================================================

macro_rules! fixed_operator {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:expr) => {
        impl<R: Operand> $trait<R> for Fixed64 {
            type Output = Fixed64;
            #[inline]
            fn $method(self, rhs: R) -> Fixed64 {
                apply($op, self, rhs)
            }
        }

        impl<R: Operand> $assign_trait<R> for Fixed64 {
            #[inline]
            fn $assign_method(&mut self, rhs: R) {
                *self = apply($op, *self, rhs);
            }
        }

        impl $trait<Fixed64> for i64 {
            type Output = Fixed64;
            #[inline]
            fn $method(self, rhs: Fixed64) -> Fixed64 {
                apply($op, self, rhs)
            }
        }

        impl $trait<Fixed64> for i32 {
            type Output = Fixed64;
            #[inline]
            fn $method(self, rhs: Fixed64) -> Fixed64 {
                apply($op, self, rhs)
            }
        }
    };
}

fixed_operator!(Add, add, AddAssign, add_assign, BinOp::Add);
fixed_operator!(Sub, sub, SubAssign, sub_assign, BinOp::Sub);
fixed_operator!(Mul, mul, MulAssign, mul_assign, BinOp::Mul);
fixed_operator!(Div, div, DivAssign, div_assign, BinOp::Div);
fixed_operator!(Rem, rem, RemAssign, rem_assign, BinOp::Rem);

impl Neg for Fixed64 {
    type Output = Fixed64;
    #[inline]
    fn neg(self) -> Fixed64 {
        Fixed64::from_raw(self.raw().wrapping_neg())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const A: Fixed64 = Fixed64::from_raw(688128); // 10.5
    const B: Fixed64 = Fixed64::from_raw(344064); // 5.25

    #[test]
    fn test_reference_scenario() {
        assert_eq!((A + B).raw(), 1032192);
        assert_eq!((A - B).raw(), 344064);
        assert_eq!((A * B).raw(), 3612672);
        assert_eq!((A / B).raw(), 131072);

        assert_eq!(A.checked_add(B).unwrap().raw(), 1032192);
        assert_eq!(A.checked_sub(B).unwrap().raw(), 344064);
        assert_eq!(A.checked_mul(B).unwrap().raw(), 3612672);
        assert_eq!(A.checked_div(B).unwrap().raw(), 131072);
    }

    #[test]
    fn test_remainder_follows_dividend() {
        let seven = Fixed64::from_int(7);
        let three = Fixed64::from_int(3);
        assert_eq!(seven % three, Fixed64::from_int(1));
        assert_eq!(-seven % three, Fixed64::from_int(-1));
        assert_eq!(seven % -three, Fixed64::from_int(1));
    }

    #[test]
    fn test_checked_add_overflow() {
        assert_eq!(
            Fixed64::MAX.checked_add(Fixed64::EPSILON),
            Err(FixedError::Overflow { op: "add" })
        );
        assert_eq!(Fixed64::MAX + Fixed64::EPSILON, Fixed64::MIN);
        assert_eq!(Fixed64::MIN - Fixed64::EPSILON, Fixed64::MAX);
    }

    #[test]
    fn test_checked_mul_reports_wide_product() {
        // Raw 2^36 squared overflows the 64-bit product even though the
        // shifted result (2^56) would fit.
        let big = Fixed64::from_int(1 << 20);
        assert_eq!(
            big.checked_mul(big),
            Err(FixedError::Overflow { op: "mul" })
        );
        // Wrapping truncates the product, then shifts.
        let wrapped = (big.raw().wrapping_mul(big.raw())) >> FIXED_SCALE;
        assert_eq!((big * big).raw(), wrapped);
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(A.checked_div(Fixed64::ZERO), Err(FixedError::DivisionByZero));
        assert_eq!(A.checked_rem(Fixed64::ZERO), Err(FixedError::DivisionByZero));
        assert_eq!(
            wrapping(BinOp::Div, A, Fixed64::ZERO),
            Err(FixedError::DivisionByZero)
        );
        assert_eq!(wrapping(BinOp::Div, A, 0i64), Err(FixedError::DivisionByZero));
    }

    #[test]
    #[should_panic(expected = "division by zero")]
    fn test_div_operator_panics_on_zero() {
        let _ = A / Fixed64::ZERO;
    }

    #[test]
    fn test_checked_div_overflow() {
        assert_eq!(
            Fixed64::MIN.checked_div(Fixed64::from_raw(-1)),
            Err(FixedError::Overflow { op: "div" })
        );
        assert_eq!(
            Fixed64::MIN.checked_rem(Fixed64::from_raw(-1)),
            Err(FixedError::Overflow { op: "rem" })
        );
        assert_eq!(Fixed64::MIN % Fixed64::from_raw(-1), Fixed64::ZERO);
    }

    #[test]
    fn test_integer_operands() {
        let x = Fixed64::from_f64(1.5);
        assert_eq!(x * 4i64, Fixed64::from_int(6));
        assert_eq!(4i32 * x, Fixed64::from_int(6));
        assert_eq!(x / 3i64, Fixed64::HALF);
        assert_eq!(x + 2i64, Fixed64::from_f64(3.5));
        assert_eq!(10i64 - x, Fixed64::from_f64(8.5));
        assert_eq!(3i64 / Fixed64::from_int(2), Fixed64::from_f64(1.5));
        assert_eq!(x % 1i32, Fixed64::HALF);
    }

    #[test]
    fn test_integer_operands_checked() {
        assert_eq!(
            Fixed64::MAX.checked_mul(2i64),
            Err(FixedError::Overflow { op: "mul" })
        );
        assert_eq!(
            Fixed64::ONE.checked_add(i64::MAX),
            Err(FixedError::Overflow { op: "add" })
        );
        assert_eq!(checked(BinOp::Mul, 3i64, Fixed64::HALF), Ok(Fixed64::from_f64(1.5)));
        assert_eq!(checked(BinOp::Div, 1i64, 4i64), Ok(Fixed64::from_f64(0.25)));
    }

    #[test]
    fn test_negation() {
        assert_eq!(-Fixed64::ONE, Fixed64::from_int(-1));
        assert_eq!(-Fixed64::MIN, Fixed64::MIN);
        assert_eq!(Fixed64::MIN.checked_neg(), Err(FixedError::Overflow { op: "neg" }));
        assert_eq!(Fixed64::MIN.checked_abs(), Err(FixedError::Overflow { op: "abs" }));
        assert_eq!(Fixed64::from_int(-3).checked_abs(), Ok(Fixed64::from_int(3)));
    }

    #[test]
    fn test_assign_operators() {
        let mut x = Fixed64::from_int(2);
        x += Fixed64::ONE;
        x *= 2i64;
        x -= Fixed64::HALF;
        x /= Fixed64::from_f64(0.5);
        assert_eq!(x, Fixed64::from_int(11));
        x %= Fixed64::from_int(4);
        assert_eq!(x, Fixed64::from_int(3));
    }

    proptest! {
        #[test]
        fn prop_wrapping_matches_checked_when_in_range(
            a in -(1i64 << 40)..(1i64 << 40),
            b in -(1i64 << 20)..(1i64 << 20),
        ) {
            let fa = Fixed64::from_raw(a);
            let fb = Fixed64::from_raw(b);
            prop_assert_eq!(fa.checked_add(fb).unwrap(), fa + fb);
            prop_assert_eq!(fa.checked_sub(fb).unwrap(), fa - fb);
            prop_assert_eq!(fa.checked_mul(fb).unwrap(), fa * fb);
            if b != 0 {
                prop_assert_eq!(fa.checked_div(fb).unwrap(), fa / fb);
                prop_assert_eq!(fa.checked_rem(fb).unwrap(), fa % fb);
            }
        }

        #[test]
        fn prop_div_then_mul_within_one_unit(
            a in -(1i64 << 40)..(1i64 << 40),
            b in -FIXED_ONE..=FIXED_ONE,
        ) {
            prop_assume!(b != 0);
            let fa = Fixed64::from_raw(a);
            let fb = Fixed64::from_raw(b);
            let back = (fa / fb) * fb;
            prop_assert!((back.raw() - a).abs() <= 1, "a={} b={} back={}", a, b, back.raw());
        }

        #[test]
        fn prop_add_wraps_like_i64(a in any::<i64>(), b in any::<i64>()) {
            let sum = Fixed64::from_raw(a) + Fixed64::from_raw(b);
            prop_assert_eq!(sum.raw(), a.wrapping_add(b));
            let checked = Fixed64::from_raw(a).checked_add(Fixed64::from_raw(b));
            prop_assert_eq!(checked.is_err(), a.checked_add(b).is_none());
        }
    }
}
