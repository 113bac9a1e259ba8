//! Big-integer helpers for gameplay quantities.
//!
//! HP, ATK, EXP, Gold and prices are all `BigInt`. Fractional factors are
//! quantised to millionths before they touch a quantity, so nothing passes
//! through a float once it exists.

use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

/// Fixed-point resolution for fractional multipliers.
const FACTOR_SCALE: u64 = 1_000_000;

/// Multiplies `base` by a non-negative fractional factor and floors the result.
pub fn scale(base: &BigInt, factor: f64) -> BigInt {
    let factor = if factor.is_finite() { factor.max(0.0) } else { 0.0 };
    let micros = (factor * FACTOR_SCALE as f64).round() as u128;
    base * BigInt::from(micros) / BigInt::from(FACTOR_SCALE)
}

/// Like `scale`, but never drops below 1.
pub fn scale_min1(base: &BigInt, factor: f64) -> BigInt {
    at_least_one(scale(base, factor))
}

/// `percent`% of `base`, floored, minimum 1.
pub fn percent_of_min1(base: &BigInt, percent: u32) -> BigInt {
    at_least_one(base * BigInt::from(percent) / BigInt::from(100u32))
}

pub fn at_least_one(value: BigInt) -> BigInt {
    if value < BigInt::one() {
        BigInt::one()
    } else {
        value
    }
}

/// Clamps negative values to zero.
pub fn non_negative(value: BigInt) -> BigInt {
    if value.is_negative() {
        BigInt::zero()
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_floors() {
        assert_eq!(scale(&BigInt::from(30), 1.15), BigInt::from(34));
        assert_eq!(scale(&BigInt::from(30), 0.5), BigInt::from(15));
    }

    #[test]
    fn test_scale_min1_never_zero() {
        assert_eq!(scale_min1(&BigInt::from(3), 0.01), BigInt::one());
        assert_eq!(scale_min1(&BigInt::from(0), 5.0), BigInt::one());
    }

    #[test]
    fn test_scale_handles_huge_bases_exactly() {
        let base: BigInt = "123456789012345678901234567890".parse().unwrap();
        assert_eq!(scale(&base, 2.0), &base * 2);
        assert_eq!(scale(&base, 150.0), &base * 150);
    }

    #[test]
    fn test_scale_rejects_nan_and_negative() {
        assert_eq!(scale(&BigInt::from(10), f64::NAN), BigInt::zero());
        assert_eq!(scale(&BigInt::from(10), -3.0), BigInt::zero());
    }

    #[test]
    fn test_percent_of_min1() {
        assert_eq!(percent_of_min1(&BigInt::from(100), 70), BigInt::from(70));
        assert_eq!(percent_of_min1(&BigInt::from(50), 40), BigInt::from(20));
        assert_eq!(percent_of_min1(&BigInt::from(1), 40), BigInt::one());
    }

    #[test]
    fn test_non_negative() {
        assert_eq!(non_negative(BigInt::from(-5)), BigInt::zero());
        assert_eq!(non_negative(BigInt::from(5)), BigInt::from(5));
    }
}
