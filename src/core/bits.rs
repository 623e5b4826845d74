//! Raw Bit View
//!
//! Bitwise operators act on the raw two's-complement integers behind each
//! component and ignore fixed-point meaning entirely. They live on [`Bits`]
//! rather than on the vector types so arithmetic code cannot reach them by
//! accident: convert with `bits()`, operate, convert back with `from_bits()`.

use std::ops::{BitAnd, BitOr, BitXor, Not, Shl, Shr};

/// Raw integers of an `N`-component fixed vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Bits<const N: usize>([i64; N]);

/// Bit view of a [`super::vec2::FixedVec2`].
pub type Vec2Bits = Bits<2>;

/// Bit view of a [`super::vec3::FixedVec3`].
pub type Vec3Bits = Bits<3>;

impl<const N: usize> Bits<N> {
    /// Wrap raw component integers.
    #[inline]
    pub const fn new(lanes: [i64; N]) -> Self {
        Self(lanes)
    }

    /// Raw component integers.
    #[inline]
    pub const fn lanes(self) -> [i64; N] {
        self.0
    }

    /// Logical (unsigned) right shift of every lane; zeros enter from the top.
    ///
    /// Shift counts are masked to 6 bits, like the arithmetic shifts.
    #[inline]
    pub fn ushr(self, shift: u32) -> Self {
        self.map(|lane| (lane as u64).wrapping_shr(shift) as i64)
    }

    #[inline]
    fn map(self, f: impl Fn(i64) -> i64) -> Self {
        Self(self.0.map(f))
    }

    #[inline]
    fn zip(self, rhs: Self, f: impl Fn(i64, i64) -> i64) -> Self {
        let mut out = self.0;
        for (lane, other) in out.iter_mut().zip(rhs.0) {
            *lane = f(*lane, other);
        }
        Self(out)
    }
}

impl<const N: usize> BitAnd for Bits<N> {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a & b)
    }
}

impl<const N: usize> BitOr for Bits<N> {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a | b)
    }
}

impl<const N: usize> BitXor for Bits<N> {
    type Output = Self;
    #[inline]
    fn bitxor(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a ^ b)
    }
}

impl<const N: usize> Not for Bits<N> {
    type Output = Self;
    #[inline]
    fn not(self) -> Self {
        self.map(|a| !a)
    }
}

/// Left shift of every lane, count masked to 6 bits.
impl<const N: usize> Shl<u32> for Bits<N> {
    type Output = Self;
    #[inline]
    fn shl(self, shift: u32) -> Self {
        self.map(|a| a.wrapping_shl(shift))
    }
}

/// Arithmetic right shift of every lane, count masked to 6 bits.
impl<const N: usize> Shr<u32> for Bits<N> {
    type Output = Self;
    #[inline]
    fn shr(self, shift: u32) -> Self {
        self.map(|a| a.wrapping_shr(shift))
    }
}
