// Copyright (c) 2025, Arcane Labs
// SPDX-License-Identifier: Apache-2.0

use crate::{
    error::FixedPointError,
    integers::{U256, U512},
};

/// ## Compute floor(a * b / denominator) with full precision
///
/// The intermediate product is carried in 512 bits, so the result is exact
/// even when `a * b` does not fit in 256 bits ("phantom overflow").
///
/// ### Errors
///
/// * `DivisionByZero` - `denominator` is zero
/// * `Overflow` - the true quotient needs more than 256 bits
pub fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256, FixedPointError> {
    mul_div_rem(a, b, denominator).map(|(quotient, _)| quotient)
}

/// ## Compute ceil(a * b / denominator) with full precision
///
/// Same computation as [`mul_div`], plus one when the division leaves a
/// remainder.
///
/// ### Errors
///
/// * `DivisionByZero` - `denominator` is zero
/// * `Overflow` - the rounded quotient needs more than 256 bits
pub fn mul_div_rounding_up(a: U256, b: U256, denominator: U256) -> Result<U256, FixedPointError> {
    let (quotient, remainder) = mul_div_rem(a, b, denominator)?;

    if remainder.is_zero() {
        return Ok(quotient);
    }

    quotient
        .checked_add(U256::one())
        .ok_or(FixedPointError::Overflow)
}

/// ## Compute ceil(a / b)
///
/// ### Errors
///
/// * `DivisionByZero` - `b` is zero
pub fn div_rounding_up(a: U256, b: U256) -> Result<U256, FixedPointError> {
    if b.is_zero() {
        return Err(FixedPointError::DivisionByZero);
    }

    let quotient = a / b;
    if (a % b).is_zero() {
        return Ok(quotient);
    }

    quotient
        .checked_add(U256::one())
        .ok_or(FixedPointError::Overflow)
}

/// Shared floor quotient + remainder. The remainder is always < denominator
/// and therefore fits in 256 bits.
fn mul_div_rem(a: U256, b: U256, denominator: U256) -> Result<(U256, U256), FixedPointError> {
    if denominator.is_zero() {
        return Err(FixedPointError::DivisionByZero);
    }

    let product = a.full_mul(b);

    // product fits in 256 bits, single-width division is enough
    if product.high_u256().is_zero() {
        let low = product.low_u256();
        return Ok((low / denominator, low % denominator));
    }

    // 512 by 256 long division on the widened denominator; this is exact
    // multi-word integer arithmetic, no floating point anywhere
    let wide_denominator = U512::from(denominator);
    let quotient = product / wide_denominator;
    let remainder = product % wide_denominator;

    let quotient = U256::try_from(quotient).map_err(|_| FixedPointError::Overflow)?;

    Ok((quotient, remainder.low_u256()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q128() -> U256 {
        U256::one() << 128
    }

    #[test]
    fn mul_div_rejects_zero_denominator() {
        assert_eq!(
            mul_div(q128(), U256::from(5u64), U256::zero()),
            Err(FixedPointError::DivisionByZero)
        );
        assert_eq!(
            mul_div(U256::zero(), U256::zero(), U256::zero()),
            Err(FixedPointError::DivisionByZero)
        );
    }

    #[test]
    fn mul_div_basic_cases() {
        // 100 * 200 / 50 = 400
        assert_eq!(
            mul_div(U256::from(100u64), U256::from(200u64), U256::from(50u64)).unwrap(),
            U256::from(400u64)
        );

        // floor(1 * 1 / 3) = 0
        assert_eq!(
            mul_div(U256::one(), U256::one(), U256::from(3u64)).unwrap(),
            U256::zero()
        );
    }

    #[test]
    fn mul_div_exact_across_phantom_overflow() {
        // q128 * (35 * q128) / (8 * q128) = 35/8 * q128
        let b = U256::from(35u64) * q128();
        let denominator = U256::from(8u64) * q128();
        let expected = U256::from(4375u64) * q128() / U256::from(1000u64);
        assert_eq!(mul_div(q128(), b, denominator).unwrap(), expected);

        // q128 * (1000 * q128) / (3000 * q128) = q128 / 3, floor
        let b = U256::from(1000u64) * q128();
        let denominator = U256::from(3000u64) * q128();
        assert_eq!(
            mul_div(q128(), b, denominator).unwrap(),
            q128() / U256::from(3u64)
        );
    }

    #[test]
    fn mul_div_all_max_inputs() {
        assert_eq!(mul_div(U256::MAX, U256::MAX, U256::MAX).unwrap(), U256::MAX);
    }

    #[test]
    fn mul_div_overflow_iff_result_needs_257_bits() {
        assert_eq!(
            mul_div(q128(), q128(), U256::one()),
            Err(FixedPointError::Overflow)
        );
        assert_eq!(
            mul_div(U256::MAX, U256::MAX, U256::from(2u64)),
            Err(FixedPointError::Overflow)
        );

        // floor((2^256-1)^2 / (2^256-2)) = 2^256, one past MAX
        assert_eq!(
            mul_div(U256::MAX, U256::MAX, U256::MAX - U256::one()),
            Err(FixedPointError::Overflow)
        );

        // largest representable quotient still succeeds
        assert_eq!(
            mul_div(U256::MAX, U256::from(2u64), U256::from(2u64)).unwrap(),
            U256::MAX
        );
    }

    #[test]
    fn mul_div_reference_vector() {
        // quantities near 2^157 * 2^101 / 2^116; a floating-point intermediate
        // would silently lose the low digits
        let a = U256::from_dec_str("316922101631557355182318461781248010879680643072").unwrap();
        let b = U256::from_dec_str("2694519998095207227803175883740").unwrap();
        let d = U256::from_dec_str("79232019085396855395509160680691688").unwrap();
        let expected =
            U256::from_dec_str("10777876804631170754249523106393912452806121").unwrap();

        assert_eq!(mul_div(a, b, d).unwrap(), expected);
    }

    #[test]
    fn rounding_up_adds_one_only_on_remainder() {
        // exact: no increment
        assert_eq!(
            mul_div_rounding_up(U256::from(100u64), U256::from(200u64), U256::from(50u64))
                .unwrap(),
            U256::from(400u64)
        );

        // 1 * 1 / 3 -> 0 rounds up to 1
        assert_eq!(
            mul_div_rounding_up(U256::one(), U256::one(), U256::from(3u64)).unwrap(),
            U256::one()
        );

        // 7 * 3 / 4 = 5.25 -> 6
        assert_eq!(
            mul_div_rounding_up(U256::from(7u64), U256::from(3u64), U256::from(4u64)).unwrap(),
            U256::from(6u64)
        );

        // phantom-overflow path with a remainder
        let b = U256::from(1000u64) * q128();
        let denominator = U256::from(3000u64) * q128();
        assert_eq!(
            mul_div_rounding_up(q128(), b, denominator).unwrap(),
            q128() / U256::from(3u64) + U256::one()
        );
    }

    #[test]
    fn rounding_up_overflow_on_increment() {
        // floor((2^256-2)^2 / (2^256-3)) = 2^256-1 with remainder 1, so the
        // floor fits but the increment does not
        let a = U256::MAX - U256::one();
        let d = U256::MAX - U256::from(2u64);

        assert_eq!(mul_div(a, a, d).unwrap(), U256::MAX);
        assert_eq!(
            mul_div_rounding_up(a, a, d),
            Err(FixedPointError::Overflow)
        );
    }

    #[test]
    fn rounding_up_matches_floor_plus_remainder_rule() {
        let cases = [
            (U256::from(123_456u64), U256::from(789_012u64), U256::from(1_000u64)),
            (U256::MAX, U256::from(3u64), U256::from(7u64)),
            (q128(), q128() - U256::one(), q128() + U256::one()),
        ];

        for (a, b, d) in cases {
            let floor = mul_div(a, b, d).unwrap();
            let ceil = mul_div_rounding_up(a, b, d).unwrap();
            assert!(ceil == floor || ceil == floor + U256::one());
        }
    }

    #[test]
    fn div_rounding_up_cases() {
        assert_eq!(
            div_rounding_up(U256::from(6u64), U256::from(2u64)).unwrap(),
            U256::from(3u64)
        );
        assert_eq!(
            div_rounding_up(U256::from(7u64), U256::from(2u64)).unwrap(),
            U256::from(4u64)
        );
        assert_eq!(
            div_rounding_up(U256::one(), U256::zero()),
            Err(FixedPointError::DivisionByZero)
        );
    }
}
