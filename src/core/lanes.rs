//! Component-wise lifting shared by the vector types.
//!
//! `fixed_vector!` generates, for a struct of named `Fixed64` components:
//! vector-vector and vector-scalar operators (wrapping), their `checked_*`
//! counterparts, component-wise `min`/`max`/`abs`, and the conversions to and
//! from the raw [`Bits`](super::bits::Bits) view. No operator couples
//! components.

macro_rules! fixed_vector {
    ($name:ident, $n:literal, [$($c:ident),+]) => {
        impl $name {
            /// Apply a wrapping scalar operator to each component pair.
            ///
            /// Fails only when a divisor component is zero.
            #[inline]
            pub fn wrapping_op(self, op: $crate::core::ops::BinOp, rhs: Self) -> $crate::core::error::FixedResult<Self> {
                Ok(Self { $($c: $crate::core::ops::wrapping(op, self.$c, rhs.$c)?),+ })
            }

            /// Apply a checked scalar operator to each component pair.
            #[inline]
            pub fn checked_op(self, op: $crate::core::ops::BinOp, rhs: Self) -> $crate::core::error::FixedResult<Self> {
                Ok(Self { $($c: $crate::core::ops::checked(op, self.$c, rhs.$c)?),+ })
            }

            /// Apply a checked scalar operator between each component and `rhs`.
            #[inline]
            pub fn checked_op_scalar<R: $crate::core::ops::Operand>(
                self,
                op: $crate::core::ops::BinOp,
                rhs: R,
            ) -> $crate::core::error::FixedResult<Self> {
                Ok(Self { $($c: $crate::core::ops::checked(op, self.$c, rhs)?),+ })
            }

            /// Checked component-wise addition.
            #[inline]
            pub fn checked_add(self, rhs: Self) -> $crate::core::error::FixedResult<Self> {
                self.checked_op($crate::core::ops::BinOp::Add, rhs)
            }

            /// Checked component-wise subtraction.
            #[inline]
            pub fn checked_sub(self, rhs: Self) -> $crate::core::error::FixedResult<Self> {
                self.checked_op($crate::core::ops::BinOp::Sub, rhs)
            }

            /// Checked component-wise multiplication.
            #[inline]
            pub fn checked_mul(self, rhs: Self) -> $crate::core::error::FixedResult<Self> {
                self.checked_op($crate::core::ops::BinOp::Mul, rhs)
            }

            /// Checked component-wise division.
            #[inline]
            pub fn checked_div(self, rhs: Self) -> $crate::core::error::FixedResult<Self> {
                self.checked_op($crate::core::ops::BinOp::Div, rhs)
            }

            /// Checked scaling of every component.
            #[inline]
            pub fn checked_scale<R: $crate::core::ops::Operand>(self, rhs: R) -> $crate::core::error::FixedResult<Self> {
                self.checked_op_scalar($crate::core::ops::BinOp::Mul, rhs)
            }

            /// Checked division of every component by a scalar.
            #[inline]
            pub fn checked_div_scalar<R: $crate::core::ops::Operand>(self, rhs: R) -> $crate::core::error::FixedResult<Self> {
                self.checked_op_scalar($crate::core::ops::BinOp::Div, rhs)
            }

            /// Component-wise minimum.
            #[inline]
            pub fn min(self, other: Self) -> Self {
                Self { $($c: self.$c.min(other.$c)),+ }
            }

            /// Component-wise maximum.
            #[inline]
            pub fn max(self, other: Self) -> Self {
                Self { $($c: self.$c.max(other.$c)),+ }
            }

            /// Component-wise absolute value.
            #[inline]
            pub fn abs(self) -> Self {
                Self { $($c: self.$c.abs()),+ }
            }

            /// Raw bit view of the components.
            #[inline]
            pub const fn bits(self) -> $crate::core::bits::Bits<$n> {
                $crate::core::bits::Bits::new([$(self.$c.raw()),+])
            }

            /// Rebuild from a raw bit view.
            #[inline]
            pub const fn from_bits(bits: $crate::core::bits::Bits<$n>) -> Self {
                let [$($c),+] = bits.lanes();
                Self { $($c: $crate::core::fixed::Fixed64::from_raw($c)),+ }
            }
        }

        impl ::std::ops::Add for $name {
            type Output = Self;
            #[inline]
            fn add(self, rhs: Self) -> Self {
                Self { $($c: self.$c + rhs.$c),+ }
            }
        }

        impl ::std::ops::Sub for $name {
            type Output = Self;
            #[inline]
            fn sub(self, rhs: Self) -> Self {
                Self { $($c: self.$c - rhs.$c),+ }
            }
        }

        impl ::std::ops::Mul for $name {
            type Output = Self;
            #[inline]
            fn mul(self, rhs: Self) -> Self {
                Self { $($c: self.$c * rhs.$c),+ }
            }
        }

        /// # Panics
        /// When any component of `rhs` is zero.
        impl ::std::ops::Div for $name {
            type Output = Self;
            #[inline]
            fn div(self, rhs: Self) -> Self {
                Self { $($c: self.$c / rhs.$c),+ }
            }
        }

        impl ::std::ops::Neg for $name {
            type Output = Self;
            #[inline]
            fn neg(self) -> Self {
                Self { $($c: -self.$c),+ }
            }
        }

        impl ::std::ops::AddAssign for $name {
            #[inline]
            fn add_assign(&mut self, rhs: Self) {
                *self = *self + rhs;
            }
        }

        impl ::std::ops::SubAssign for $name {
            #[inline]
            fn sub_assign(&mut self, rhs: Self) {
                *self = *self - rhs;
            }
        }

        fixed_vector!(@scalar $name, [$($c),+], $crate::core::fixed::Fixed64);
        fixed_vector!(@scalar $name, [$($c),+], i64);
        fixed_vector!(@scalar $name, [$($c),+], i32);
        fixed_vector!(@scalar_left $name, i64);
        fixed_vector!(@scalar_left $name, i32);
    };

    (@scalar $name:ident, [$($c:ident),+], $scalar:ty) => {
        impl ::std::ops::Mul<$scalar> for $name {
            type Output = Self;
            #[inline]
            fn mul(self, rhs: $scalar) -> Self {
                Self { $($c: self.$c * rhs),+ }
            }
        }

        impl ::std::ops::Div<$scalar> for $name {
            type Output = Self;
            #[inline]
            fn div(self, rhs: $scalar) -> Self {
                Self { $($c: self.$c / rhs),+ }
            }
        }
    };

    (@scalar_left $name:ident, $scalar:ty) => {
        impl ::std::ops::Mul<$name> for $scalar {
            type Output = $name;
            #[inline]
            fn mul(self, rhs: $name) -> $name {
                rhs * self
            }
        }
    };
}

pub(crate) use fixed_vector;
