use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};

use crate::error::{Result, ValueError};
use crate::hash;
use crate::numeric::NumberArg;

/// Arbitrary precision decimal: `unscaled * 10^-scale`.
///
/// Two decimals are equal only when both the unscaled value and the scale
/// match, so `1.0` and `1.00` are distinct values that sort next to each
/// other.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Decimal {
    unscaled: BigInt,
    scale: i32,
}

fn pow10(exp: u32) -> BigInt {
    num_traits::pow(BigInt::from(10), exp as usize)
}

impl Decimal {
    pub fn new(value: impl Into<NumberArg>) -> Result<Self> {
        match value.into() {
            NumberArg::Int(n) => Ok(Self { unscaled: BigInt::from(n), scale: 0 }),
            NumberArg::Float(f) if f.is_finite() => format!("{f}").parse(),
            NumberArg::Float(f) => Err(ValueError::invalid_argument(format!(
                "Invalid decimal value: '{f}'"
            ))),
            NumberArg::Str(s) => s.parse(),
        }
    }

    pub fn from_parts(unscaled: BigInt, scale: i32) -> Self {
        Self { unscaled, scale }
    }

    /// Unscaled integer as a decimal string.
    pub fn value(&self) -> String {
        self.unscaled.to_string()
    }

    pub fn unscaled(&self) -> &BigInt {
        &self.unscaled
    }

    pub fn scale(&self) -> i32 {
        self.scale
    }

    /// Both unscaled values brought to the larger of the two scales.
    fn aligned(&self, other: &Self) -> (BigInt, BigInt, i32) {
        let scale = self.scale.max(other.scale);
        let lift = |d: &Decimal| &d.unscaled * pow10(scale.abs_diff(d.scale));
        (lift(self), lift(other), scale)
    }

    pub fn add(&self, other: &Self) -> Self {
        let (a, b, scale) = self.aligned(other);
        Self { unscaled: a + b, scale }
    }

    pub fn sub(&self, other: &Self) -> Self {
        let (a, b, scale) = self.aligned(other);
        Self { unscaled: a - b, scale }
    }

    pub fn mul(&self, other: &Self) -> Result<Self> {
        let scale = self
            .scale
            .checked_add(other.scale)
            .ok_or_else(|| ValueError::range("Product is out of range"))?;
        Ok(Self { unscaled: &self.unscaled * &other.unscaled, scale })
    }

    pub fn abs(&self) -> Self {
        Self { unscaled: self.unscaled.abs(), scale: self.scale }
    }

    pub fn neg(&self) -> Self {
        Self { unscaled: -&self.unscaled, scale: self.scale }
    }

    pub fn to_double(&self) -> f64 {
        self.to_string().parse().unwrap_or(f64::NAN)
    }

    /// Integer part, truncated toward zero.
    pub fn to_int(&self) -> Result<i64> {
        let truncated = if self.scale >= 0 {
            &self.unscaled / pow10(self.scale.unsigned_abs())
        } else {
            &self.unscaled * pow10(self.scale.unsigned_abs())
        };
        truncated
            .to_i64()
            .ok_or_else(|| ValueError::range(format!("Value is too big, {self} given")))
    }

    pub fn hash_code(&self) -> u64 {
        hash::combine_hash(
            hash::bytes_hash(&self.unscaled.to_signed_bytes_le()),
            hash::bigint_hash(i64::from(self.scale)),
        )
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b, _) = self.aligned(other);
        a.cmp(&b).then(self.scale.cmp(&other.scale))
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for Decimal {
    type Err = ValueError;

    /// Accepts `[-+]digits[.digits][(e|E)[-+]digits]`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || ValueError::invalid_argument(format!("Invalid decimal value: '{s}'"));
        let (mantissa, exponent) = match s.find(['e', 'E']) {
            Some(pos) => {
                let exp: i32 = s[pos + 1..].parse().map_err(|_| invalid())?;
                (&s[..pos], exp)
            }
            None => (s, 0),
        };
        let (negative, mantissa) = match mantissa.as_bytes().first() {
            Some(b'-') => (true, &mantissa[1..]),
            Some(b'+') => (false, &mantissa[1..]),
            _ => (false, mantissa),
        };
        let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        let digits = format!("{int_part}{frac_part}");
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let magnitude = BigInt::parse_bytes(digits.as_bytes(), 10).ok_or_else(invalid)?;
        let scale = i32::try_from(frac_part.len())
            .ok()
            .and_then(|frac| frac.checked_sub(exponent))
            .ok_or_else(invalid)?;
        Ok(Self { unscaled: if negative { -magnitude } else { magnitude }, scale })
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.unscaled.abs().to_string();
        let sign = if self.unscaled.is_negative() { "-" } else { "" };
        if self.scale <= 0 {
            let zeros = if self.unscaled.is_zero() { 0 } else { self.scale.unsigned_abs() as usize };
            return write!(f, "{sign}{digits}{}", "0".repeat(zeros));
        }
        let scale = self.scale as usize;
        if digits.len() > scale {
            let (int_part, frac_part) = digits.split_at(digits.len() - scale);
            write!(f, "{sign}{int_part}.{frac_part}")
        } else {
            write!(f, "{sign}0.{}{digits}", "0".repeat(scale - digits.len()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn parses_plain_and_exponent_forms() {
        let d: Decimal = "-12.345".parse().unwrap();
        assert_eq!(d.value(), "-12345");
        assert_eq!(d.scale(), 3);
        assert_eq!(d.to_string(), "-12.345");

        let e: Decimal = "1.5e3".parse().unwrap();
        assert_eq!(e.scale(), -2);
        assert_eq!(e.to_string(), "1500");
        assert_eq!(e.to_int().unwrap(), 1500);

        assert_eq!("0.005".parse::<Decimal>().unwrap().to_string(), "0.005");
    }

    #[test]
    fn from_float_uses_shortest_form() {
        let d = Decimal::new(0.1).unwrap();
        assert_eq!(d.value(), "1");
        assert_eq!(d.scale(), 1);
        assert!((d.to_double() - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn arithmetic_aligns_scales() {
        let a: Decimal = "1.25".parse().unwrap();
        let b: Decimal = "0.5".parse().unwrap();
        assert_eq!(a.add(&b).to_string(), "1.75");
        assert_eq!(a.sub(&b).to_string(), "0.75");
        assert_eq!(a.mul(&b).unwrap().to_string(), "0.625");
        assert_eq!(a.neg().abs(), a);
        assert_eq!(Decimal::new(-7.9).unwrap().to_int().unwrap(), -7);
    }

    #[test]
    fn scale_participates_in_equality() {
        let one: Decimal = "1.0".parse().unwrap();
        let one_hundredths: Decimal = "1.00".parse().unwrap();
        assert_ne!(one, one_hundredths);
        assert!(one < one_hundredths);
        assert!(one < "1.5".parse::<Decimal>().unwrap());
    }

    #[test]
    fn rejects_garbage() {
        for s in ["", "abc", "1.2.3", "1e", "--1"] {
            assert_eq!(s.parse::<Decimal>().unwrap_err().kind(), ErrorKind::InvalidArgument, "{s}");
        }
        assert!(Decimal::new(f64::NAN).is_err());
    }
}
