// Copyright (c) 2025, Arcane Labs
// SPDX-License-Identifier: Apache-2.0

use crate::{
    error::FixedPointError,
    integers::{I256, U256},
};
use std::cmp::Ordering;

/// Explicit mantissa bits of an IEEE-754 single
const MANTISSA_BITS: u32 = 23;
/// Exponent bias of an IEEE-754 single
const EXPONENT_BIAS: i32 = 127;
/// Smallest normal exponent; below this the encoding is subnormal
const MIN_NORMAL_EXP: i32 = -126;
/// Largest finite exponent
const MAX_FINITE_EXP: i32 = 127;

/// Signed Q128.128 fixed-point number
///
/// ## Fields
///
/// * `0` - The Q128.128 value represented as an I256; the mathematical value
///   is `raw / 2^128`
///
/// ## Notes
///
/// * sign bit, 127 integer bits, 128 fractional bits
/// * Range: [-2^127, 2^127), fractional resolution = 2^-128
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct SQ128(pub I256);

impl SQ128 {
    pub const FRAC_BITS: u32 = 128;
    pub const ZERO: Self = Self(I256::zero());
    pub const ONE: Self = Self(I256::from_unsigned(U256([0, 0, 1, 0])));
    /// Largest representable value, (2^256 - 1) >> 1 in raw form
    pub const MAX: Self = Self(I256::MAX);
    /// Smallest representable value, -MAX - 1 in raw form
    pub const MIN: Self = Self(I256::MIN);

    /// ## Create a new Q128.128 from its raw two's-complement integer
    pub const fn new(value: I256) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn into_raw(self) -> I256 {
        self.0
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0.is_positive()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// The absolute magnitude as an unsigned raw integer; total even for MIN
    #[inline]
    pub fn unsigned_abs(&self) -> U256 {
        self.0.abs()
    }

    #[inline]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    #[inline]
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    #[inline]
    pub fn checked_neg(self) -> Option<Self> {
        self.0.checked_neg().map(Self)
    }

    /// ## Convert to the nearest IEEE-754 single precision value
    ///
    /// Rounds to nearest, ties to even. Values smaller in magnitude than the
    /// smallest normal float come out as exact subnormals: the fixed-point
    /// quantum 2^-128 sits well above the subnormal floor of 2^-149.
    ///
    /// ### Errors
    ///
    /// * `Overflow` - the rounded magnitude exceeds the largest finite float
    pub fn try_to_f32(self) -> Result<f32, FixedPointError> {
        if self.0.is_zero() {
            return Ok(0.0);
        }

        let negative = self.0.is_negative();
        let magnitude = self.0.abs();

        // position of the highest set bit; the value is magnitude / 2^128
        let top = magnitude.bits() - 1;
        let exponent = top as i32 - Self::FRAC_BITS as i32;

        let unsigned_bits = if exponent < MIN_NORMAL_EXP {
            // subnormal: exponent < -126 means top <= 1, so the whole
            // magnitude fits in the fraction after scaling to 2^-149 units
            magnitude.low_u32() << (149 - Self::FRAC_BITS)
        } else {
            let (significand, exponent) = if top > MANTISSA_BITS as usize {
                let shift = top - MANTISSA_BITS as usize;
                let mut significand = (magnitude >> shift).low_u32();

                // round to nearest, ties to even, over the discarded bits
                let discarded = magnitude & ((U256::one() << shift) - U256::one());
                let half = U256::one() << (shift - 1);
                let round_up = match discarded.cmp(&half) {
                    Ordering::Greater => true,
                    Ordering::Equal => significand & 1 == 1,
                    Ordering::Less => false,
                };

                significand += round_up as u32;
                if significand == 1 << (MANTISSA_BITS + 1) {
                    // carried out of the 24th bit: renormalize
                    (significand >> 1, exponent + 1)
                } else {
                    (significand, exponent)
                }
            } else {
                (magnitude.low_u32() << (MANTISSA_BITS as usize - top), exponent)
            };

            if exponent > MAX_FINITE_EXP {
                return Err(FixedPointError::Overflow);
            }

            let biased = (exponent + EXPONENT_BIAS) as u32;
            (biased << MANTISSA_BITS) | (significand & ((1 << MANTISSA_BITS) - 1))
        };

        let sign = (negative as u32) << 31;
        Ok(f32::from_bits(sign | unsigned_bits))
    }

    /// ## Convert an IEEE-754 single precision value to Q128.128, exactly
    ///
    /// The reconstruction is bit-exact: a float whose value is not a multiple
    /// of the 2^-128 quantum is out of range, never truncated.
    ///
    /// ### Errors
    ///
    /// * `InvalidFloat` - `value` is NaN or infinite
    /// * `OutOfRange` - the magnitude exceeds the Q128.128 range, or lies
    ///   below the quantum
    pub fn try_from_f32(value: f32) -> Result<Self, FixedPointError> {
        if !value.is_finite() {
            return Err(FixedPointError::InvalidFloat);
        }

        let bits = value.to_bits();
        let negative = bits >> 31 == 1;
        let biased = (bits >> MANTISSA_BITS) & 0xff;
        let fraction = bits & ((1 << MANTISSA_BITS) - 1);

        let (significand, exponent) = if biased == 0 {
            if fraction == 0 {
                // both signed zeros collapse to raw zero
                return Ok(Self::ZERO);
            }
            // subnormal: no implicit bit, fixed exponent
            (fraction, MIN_NORMAL_EXP)
        } else {
            (fraction | 1 << MANTISSA_BITS, biased as i32 - EXPONENT_BIAS)
        };

        // place the significand so the binary point lands at bit 128
        let shift = exponent + Self::FRAC_BITS as i32 - MANTISSA_BITS as i32;

        let magnitude = if shift >= 0 {
            // top bit lands at 23 + shift <= 255, so nothing is shifted out
            U256::from(significand) << shift as usize
        } else {
            let shift = shift.unsigned_abs();
            if significand.trailing_zeros() < shift {
                return Err(FixedPointError::OutOfRange);
            }
            U256::from(significand >> shift)
        };

        if negative {
            // the magnitude 2^255 is admissible: it is exactly MIN
            if magnitude > U256::one() << 255 {
                return Err(FixedPointError::OutOfRange);
            }
            Ok(Self(I256::from_unsigned(magnitude).wrapping_neg()))
        } else {
            if magnitude > I256::MAX.to_unsigned() {
                return Err(FixedPointError::OutOfRange);
            }
            Ok(Self(I256::from_unsigned(magnitude)))
        }
    }
}

impl From<i32> for SQ128 {
    #[inline]
    fn from(value: i32) -> Self {
        Self(I256::from(value).logical_shl(Self::FRAC_BITS as usize))
    }
}

impl From<i64> for SQ128 {
    #[inline]
    fn from(value: i64) -> Self {
        Self(I256::from(value).logical_shl(Self::FRAC_BITS as usize))
    }
}

impl From<i128> for SQ128 {
    #[inline]
    fn from(value: i128) -> Self {
        Self(I256::from(value).logical_shl(Self::FRAC_BITS as usize))
    }
}
