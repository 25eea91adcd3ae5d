
use crate::{construct_sint, error::FixedPointError};
use ::uint::{construct_uint, uint_full_mul_reg};
use std::fmt;

// these have scuffed doc comments because the macro codegens the beginning of them
construct_uint! {
    /// with 256-bits of precision, consisting of four 64-bit words.
    pub struct U256(4);
}

construct_uint! {
    /// with 512-bits of precision, consisting of eight 64-bit words.
    pub struct U512(8);
}

/// All 256 bits set, i.e. 2^256 - 1
pub const MASK_256: U256 = U256([u64::MAX; 4]);

impl U256 {
    #[inline]
    pub fn wrapping_add(&self, other: U256) -> U256 {
        let (result, _) = self.overflowing_add(other);

        result
    }

    #[inline]
    pub fn wrapping_sub(&self, other: U256) -> U256 {
        let (result, _) = self.overflowing_sub(other);

        result
    }

    #[inline]
    pub fn wrapping_mul(&self, other: U256) -> U256 {
        let (result, _) = self.overflowing_mul(other);

        result
    }

    /// Exact 256x256 -> 512 bit product; never overflows by construction
    #[inline]
    pub fn full_mul(self, other: U256) -> U512 {
        U512(uint_full_mul_reg!(U256, 4, self, other))
    }
}

impl U512 {
    #[inline]
    pub fn wrapping_add(&self, other: U512) -> U512 {
        let (result, _) = self.overflowing_add(other);

        result
    }

    #[inline]
    pub fn wrapping_sub(&self, other: U512) -> U512 {
        let (result, _) = self.overflowing_sub(other);

        result
    }

    /// The high 256 bits, i.e. the value divided by 2^256
    #[inline]
    pub fn high_u256(&self) -> U256 {
        let U512(ref arr) = *self;

        U256([arr[4], arr[5], arr[6], arr[7]])
    }

    /// The low 256 bits, i.e. the value modulo 2^256
    #[inline]
    pub fn low_u256(&self) -> U256 {
        let U512(ref arr) = *self;

        U256([arr[0], arr[1], arr[2], arr[3]])
    }
}

impl From<U256> for U512 {
    fn from(value: U256) -> U512 {
        let U256(ref arr) = value;

        U512([arr[0], arr[1], arr[2], arr[3], 0, 0, 0, 0])
    }
}

impl TryFrom<U512> for U256 {
    type Error = FixedPointError;

    fn try_from(value: U512) -> Result<U256, Self::Error> {
        let U512(ref arr) = value;
        if arr[4] != 0 || arr[5] != 0 || arr[6] != 0 || arr[7] != 0 {
            return Err(FixedPointError::IntegerConversionError);
        }

        Ok(U256([arr[0], arr[1], arr[2], arr[3]]))
    }
}

/* Signed Integers */

construct_sint! {
    pub struct I256(U256);
}

impl TryFrom<I256> for i128 {
    type Error = FixedPointError;

    fn try_from(v: I256) -> Result<Self, Self::Error> {
        let neg = v.is_negative();
        let U256(ref a) = v.to_unsigned(); // LE limbs: [lo, mid1, mid2, hi]

        if !neg {
            // non-negative must have all bits >=128 clear AND bit127 clear
            if a[3] != 0 || a[2] != 0 || (a[1] >> 63) != 0 {
                return Err(FixedPointError::IntegerConversionError);
            }
        } else {
            // negative must be proper sign-extension: bits 128..255 all ones
            // and bit127 set (>= i128::MIN)
            if a[3] != u64::MAX || a[2] != u64::MAX || (a[1] >> 63) == 0 {
                return Err(FixedPointError::IntegerConversionError);
            }
        }

        let lo128 = ((a[1] as u128) << 64) | (a[0] as u128);
        Ok(lo128 as i128) // safe: we just proved it fits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_mul_small_operands() {
        let p = U256::from(3u64).full_mul(U256::from(7u64));
        assert!(p.high_u256().is_zero());
        assert_eq!(p.low_u256(), U256::from(21u64));
    }

    #[test]
    fn full_mul_crosses_256_bits() {
        // 2^128 * 2^128 = 2^256
        let q128 = U256::one() << 128;
        let p = q128.full_mul(q128);
        assert_eq!(p.high_u256(), U256::one());
        assert!(p.low_u256().is_zero());
    }

    #[test]
    fn full_mul_max_operands() {
        // (2^256 - 1)^2 = 2^512 - 2^257 + 1
        let p = U256::MAX.full_mul(U256::MAX);
        assert_eq!(p.high_u256(), U256::MAX - U256::one());
        assert_eq!(p.low_u256(), U256::one());
    }

    #[test]
    fn full_mul_commutes() {
        let a = U256::from_str_radix("123456789abcdef0123456789abcdef0", 16).unwrap();
        let b = U256::from_str_radix("fedcba9876543210fedcba9876543210", 16).unwrap();
        assert_eq!(a.full_mul(b), b.full_mul(a));
    }

    #[test]
    fn u512_narrowing() {
        let fits = U512::from(U256::MAX);
        assert_eq!(U256::try_from(fits).unwrap(), U256::MAX);

        let too_wide = fits + U512::one();
        assert_eq!(
            U256::try_from(too_wide),
            Err(FixedPointError::IntegerConversionError)
        );
    }

    #[test]
    fn mask_covers_all_bits() {
        assert_eq!(MASK_256, U256::MAX);
        assert_eq!(I256::MAX.to_unsigned(), MASK_256 >> 1);
        assert_eq!(I256::MIN.to_unsigned(), U256::one() << 255);
    }

    #[test]
    fn i256_sign_and_abs() {
        assert!(I256::minus_one().is_negative());
        assert_eq!(I256::minus_one().abs(), U256::one());

        // |MIN| = 2^255 is only representable on the unsigned side
        assert_eq!(I256::MIN.abs(), U256::one() << 255);

        assert!(I256::MIN < I256::minus_one());
        assert!(I256::minus_one() < I256::zero());
        assert!(I256::zero() < I256::one());
        assert!(I256::one() < I256::MAX);
    }

    #[test]
    fn i256_from_str_radix() {
        let neg = I256::from_str_radix("-1", 10).unwrap();
        assert_eq!(neg, I256::minus_one());

        let pos = I256::from_str_radix("ff", 16).unwrap();
        assert_eq!(pos, I256::from(255i64));
    }

    #[test]
    fn i256_narrowing_to_i128() {
        assert_eq!(i128::try_from(I256::from(i128::MIN)).unwrap(), i128::MIN);
        assert_eq!(i128::try_from(I256::from(i128::MAX)).unwrap(), i128::MAX);
        assert!(i128::try_from(I256::MAX).is_err());
        assert!(i128::try_from(I256::MIN).is_err());
    }
}
