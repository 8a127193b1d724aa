use std::fmt;

use num::{BigInt, BigUint, Signed, ToPrimitive, Zero};

use crate::util::{BigRatio, Occurrence};
use crate::Distribution;

const STDDEV_EXTRA_DIGITS: usize = 5;

/// Result of an exact division, as a float when it fits and as a truncated integer
/// when the float would be infinite.
#[derive(Debug, Clone, PartialEq)]
pub enum Quotient {
    Float(f64),
    Integer(BigInt),
}

impl Quotient {
    #[must_use]
    pub fn from_ratio(value: &BigRatio) -> Self {
        match value.to_f64() {
            Some(x) if x.is_finite() => Quotient::Float(x),
            _ => Quotient::Integer(value.to_integer()),
        }
    }

    /// Lossy; saturates to an infinity for integers beyond the float range.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        match self {
            Quotient::Float(x) => *x,
            Quotient::Integer(x) => x.to_f64().unwrap_or(if x.is_negative() {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            }),
        }
    }
}

impl fmt::Display for Quotient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quotient::Float(x) => write!(f, "{x}"),
            Quotient::Integer(x) => write!(f, "{x}"),
        }
    }
}

impl Distribution {
    /// Exact occurrence-weighted average of the events.
    #[must_use]
    pub fn mean(&self) -> Quotient {
        Quotient::from_ratio(&self.exact_mean())
    }

    fn exact_mean(&self) -> BigRatio {
        let numer: BigInt = self
            .iter()
            .map(|(e, o)| e * BigInt::from(o.clone()))
            .sum();
        BigRatio::new(numer, BigInt::from(self.total_occurrences()))
    }

    /// Standard deviation rounded to `decimal_places`.
    ///
    /// This is not exact. Occurrence counts with hundreds of digits would make the
    /// floating point accumulation overflow or crawl, so every count is first
    /// integer-divided by a power of ten that leaves about
    /// `2 * (5 + decimal_places)` significant digits in the largest one. The digits
    /// dropped that way are far below the requested precision. Deviations from the
    /// mean are taken exactly, so events beyond the float range still work.
    #[must_use]
    pub fn stddev(&self, decimal_places: u32) -> f64 {
        let avg = self.exact_mean();
        let factor = truncation_factor(&self.biggest_event().1, decimal_places);

        let deviations: f64 = self
            .iter()
            .map(|(e, o)| {
                let count = big_to_f64(&(o / &factor));
                let deviation = (&avg - BigRatio::from_integer(e.clone()))
                    .to_f64()
                    .unwrap_or(f64::INFINITY);
                count * deviation.powi(2)
            })
            .sum();
        let total = big_to_f64(&(self.total_occurrences() / &factor));

        round_to((deviations / total).sqrt(), decimal_places)
    }
}

/// Power of ten to divide occurrences by before they are summed as floats.
pub(crate) fn truncation_factor(largest: &Occurrence, decimal_places: u32) -> BigUint {
    let exponent = decimal_exponent(largest);
    let required = 2 * (STDDEV_EXTRA_DIGITS + decimal_places as usize);
    if exponent < required {
        BigUint::from(1u8)
    } else {
        num::pow(BigUint::from(10u8), exponent - required)
    }
}

/// `floor(log10(value))` for positive values; zero for zero.
pub(crate) fn decimal_exponent(value: &BigUint) -> usize {
    if value.is_zero() {
        return 0;
    }
    value.to_str_radix(10).len() - 1
}

fn big_to_f64(value: &BigUint) -> f64 {
    value.to_f64().unwrap_or(f64::INFINITY)
}

/// Unrounded when the scaled value doesn't fit a float.
fn round_to(value: f64, decimal_places: u32) -> f64 {
    let scale = 10f64.powi(i32::try_from(decimal_places).unwrap_or(i32::MAX));
    let scaled = value * scale;
    if scaled.is_finite() {
        scaled.round() / scale
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use num::One;

    use super::*;

    fn dist(pairs: &[(i64, i64)]) -> Distribution {
        Distribution::new(pairs.iter().copied()).unwrap()
    }

    #[test]
    fn single_event() {
        let d = dist(&[(5, 1)]);
        assert_eq!(d.mean(), Quotient::Float(5.0));
        assert_eq!(d.stddev(4), 0.0);
    }

    #[test]
    fn mean_is_weighted() {
        let d = dist(&[(1, 1), (2, 2), (3, 1)]);
        assert_eq!(d.mean(), Quotient::Float(2.0));
        let d = dist(&[(1, 3), (4, 1)]);
        assert_eq!(d.mean(), Quotient::Float(1.75));
    }

    #[test]
    fn mean_of_negative_events() {
        let d = dist(&[(-4, 1), (-2, 1)]);
        assert_eq!(d.mean(), Quotient::Float(-3.0));
    }

    #[test]
    fn mean_beyond_float_range_is_an_integer() {
        let huge = BigInt::from(10u8).pow(400);
        let d = Distribution::new([(huge.clone(), BigInt::one())]).unwrap();
        assert_eq!(d.mean(), Quotient::Integer(huge.clone()));
        let d = Distribution::new([(-huge.clone(), BigInt::one())]).unwrap();
        assert_eq!(d.mean(), Quotient::Integer(-huge));
    }

    #[test]
    fn stddev_of_a_die() {
        let d = Distribution::uniform(1..=6).unwrap();
        assert_eq!(d.stddev(4), 1.7078);
        assert_eq!(d.stddev(2), 1.71);
    }

    #[test]
    fn stddev_with_huge_occurrences() {
        let big = BigInt::from(10u8).pow(300);
        let d = Distribution::new([(1, big.clone()), (3, big)]).unwrap();
        assert_eq!(d.stddev(4), 1.0);
    }

    #[test]
    fn stddev_of_events_beyond_float_range() {
        let huge = BigInt::from(10u8).pow(400);
        let d = Distribution::new([(huge.clone(), BigInt::one())]).unwrap();
        assert_eq!(d.stddev(4), 0.0);
        let d = Distribution::new([(huge.clone(), BigInt::one()), (huge + 2, BigInt::one())]).unwrap();
        assert_eq!(d.stddev(4), 1.0);
    }

    #[test]
    fn stddev_with_extreme_precision() {
        assert_eq!(dist(&[(5, 1)]).stddev(400), 0.0);
        assert_eq!(dist(&[(1, 1), (3, 1)]).stddev(400), 1.0);
        assert_eq!(dist(&[(1, 1), (3, 1)]).stddev(u32::MAX), 1.0);
    }

    #[test]
    fn huge_integer_quotients_saturate() {
        let huge = BigInt::from(10u8).pow(400);
        assert_eq!(Quotient::Integer(huge.clone()).to_f64(), f64::INFINITY);
        assert_eq!(Quotient::Integer(-huge).to_f64(), f64::NEG_INFINITY);
        assert_eq!(Quotient::Integer(BigInt::from(-7)).to_f64(), -7.0);
    }

    #[test]
    fn truncation_keeps_required_digits() {
        assert_eq!(truncation_factor(&BigUint::from(999u32), 4), BigUint::one());
        let largest = num::pow(BigUint::from(10u8), 30);
        // 30 digits down to 2 * (5 + 4) = 18
        assert_eq!(
            truncation_factor(&largest, 4),
            num::pow(BigUint::from(10u8), 12)
        );
    }

    #[test]
    fn decimal_exponents() {
        assert_eq!(decimal_exponent(&BigUint::from(1u8)), 0);
        assert_eq!(decimal_exponent(&BigUint::from(9u8)), 0);
        assert_eq!(decimal_exponent(&BigUint::from(10u8)), 1);
        assert_eq!(decimal_exponent(&BigUint::from(12345u32)), 4);
    }

    #[test]
    fn quotient_display() {
        assert_eq!(Quotient::Float(2.5).to_string(), "2.5");
        assert_eq!(Quotient::Integer(BigInt::from(7)).to_string(), "7");
    }
}
