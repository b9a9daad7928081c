use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::{Result, ValueError};
use crate::hash;
use crate::numeric::NumberArg;

/// Single precision float. Equality and ordering follow the IEEE total
/// order, so `NaN == NaN` and `-0.0 < 0.0`.
#[derive(Debug, Clone, Copy)]
pub struct Float(f32);

impl Float {
    pub fn new(value: impl Into<NumberArg>) -> Result<Self> {
        match value.into() {
            NumberArg::Int(n) => Ok(Self(n as f32)),
            NumberArg::Float(f) => Ok(Self(f as f32)),
            NumberArg::Str(s) => s.parse(),
        }
    }

    pub fn min() -> Self {
        Self(f32::MIN)
    }

    pub fn max() -> Self {
        Self(f32::MAX)
    }

    pub fn value(&self) -> f32 {
        self.0
    }

    pub fn is_infinite(&self) -> bool {
        self.0.is_infinite()
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }

    pub fn is_nan(&self) -> bool {
        self.0.is_nan()
    }

    pub fn add(&self, other: &Self) -> Self {
        Self(self.0 + other.0)
    }

    pub fn sub(&self, other: &Self) -> Self {
        Self(self.0 - other.0)
    }

    pub fn mul(&self, other: &Self) -> Self {
        Self(self.0 * other.0)
    }

    pub fn div(&self, other: &Self) -> Result<Self> {
        if other.0 == 0.0 {
            return Err(ValueError::divide_by_zero("Cannot divide by zero"));
        }
        Ok(Self(self.0 / other.0))
    }

    pub fn rem(&self, other: &Self) -> Result<Self> {
        if other.0 == 0.0 {
            return Err(ValueError::divide_by_zero("Cannot modulo by zero"));
        }
        Ok(Self(self.0 % other.0))
    }

    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    pub fn neg(&self) -> Self {
        Self(-self.0)
    }

    pub fn sqrt(&self) -> Result<Self> {
        if self.0 < 0.0 {
            return Err(ValueError::range("Cannot take a square root of a negative number"));
        }
        Ok(Self(self.0.sqrt()))
    }

    /// Truncated toward zero, saturating at the `i64` bounds.
    pub fn to_int(&self) -> i64 {
        self.0 as i64
    }

    pub fn to_double(&self) -> f64 {
        f64::from(self.0)
    }

    pub fn hash_code(&self) -> u64 {
        hash::float_hash(self.0)
    }
}

impl FromStr for Float {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<f32>()
            .map(Self)
            .map_err(|_| ValueError::invalid_argument(format!("Invalid float value: '{s}'")))
    }
}

impl Ord for Float {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for Float {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Float {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Float {}

impl Hash for Float {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.0.to_bits());
    }
}

impl fmt::Display for Float {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn constructs_from_host_numbers() {
        assert_eq!(Float::new(3).unwrap().value(), 3.0);
        assert_eq!(Float::new(1.5).unwrap().value(), 1.5);
        assert_eq!(Float::new(" -2.25 ").unwrap().value(), -2.25);
        assert_eq!(Float::new("x").unwrap_err().kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn classification() {
        assert!(Float::new(f64::INFINITY).unwrap().is_infinite());
        assert!(Float::new(f64::NAN).unwrap().is_nan());
        assert!(Float::max().is_finite());
        assert!(Float::min() < Float::max());
    }

    #[test]
    fn arithmetic() {
        let a = Float::new(7.5).unwrap();
        let b = Float::new(2).unwrap();
        assert_eq!(a.add(&b).value(), 9.5);
        assert_eq!(a.sub(&b).value(), 5.5);
        assert_eq!(a.mul(&b).value(), 15.0);
        assert_eq!(a.div(&b).unwrap().value(), 3.75);
        assert_eq!(a.rem(&b).unwrap().value(), 1.5);
        assert_eq!(a.neg().abs(), a);
        assert_eq!(Float::new(16).unwrap().sqrt().unwrap().value(), 4.0);
        assert_eq!(a.to_int(), 7);
    }

    #[test]
    fn arithmetic_errors() {
        let zero = Float::new(0).unwrap();
        let one = Float::new(1).unwrap();
        assert_eq!(one.div(&zero).unwrap_err().kind(), ErrorKind::DivideByZero);
        assert_eq!(one.rem(&zero).unwrap_err().kind(), ErrorKind::DivideByZero);
        assert_eq!(one.neg().sqrt().unwrap_err().kind(), ErrorKind::Range);
    }
}
