use std::fmt;
use std::str::FromStr;

use num_bigint::BigInt;
use num_traits::{FromPrimitive, Signed, ToPrimitive, Zero};

use crate::error::{Result, ValueError};
use crate::hash;
use crate::numeric::{NumberArg, split_int_literal};

/// Arbitrary precision integer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Varint(BigInt);

impl Varint {
    pub fn new(value: impl Into<NumberArg>) -> Result<Self> {
        match value.into() {
            NumberArg::Int(n) => Ok(Self(BigInt::from(n))),
            NumberArg::Float(f) => BigInt::from_f64(f.trunc()).map(Self).ok_or_else(|| {
                ValueError::invalid_argument(format!("Invalid varint value: '{f}'"))
            }),
            NumberArg::Str(s) => s.parse(),
        }
    }

    pub fn from_bigint(value: BigInt) -> Self {
        Self(value)
    }

    pub fn as_bigint(&self) -> &BigInt {
        &self.0
    }

    pub fn value(&self) -> String {
        self.0.to_string()
    }

    pub fn add(&self, other: &Self) -> Self {
        Self(&self.0 + &other.0)
    }

    pub fn sub(&self, other: &Self) -> Self {
        Self(&self.0 - &other.0)
    }

    pub fn mul(&self, other: &Self) -> Self {
        Self(&self.0 * &other.0)
    }

    pub fn div(&self, other: &Self) -> Result<Self> {
        if other.0.is_zero() {
            return Err(ValueError::divide_by_zero("Cannot divide by zero"));
        }
        Ok(Self(&self.0 / &other.0))
    }

    pub fn rem(&self, other: &Self) -> Result<Self> {
        if other.0.is_zero() {
            return Err(ValueError::divide_by_zero("Cannot modulo by zero"));
        }
        Ok(Self(&self.0 % &other.0))
    }

    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    pub fn neg(&self) -> Self {
        Self(-&self.0)
    }

    pub fn sqrt(&self) -> Result<Self> {
        if self.0.is_negative() {
            return Err(ValueError::range("Cannot take a square root of a negative number"));
        }
        Ok(Self(self.0.sqrt()))
    }

    pub fn to_int(&self) -> Result<i64> {
        self.0.to_i64().ok_or_else(|| {
            ValueError::range(format!(
                "Value is too big to fit in a 64-bit integer, {} given",
                self.0
            ))
        })
    }

    pub fn to_double(&self) -> f64 {
        self.0.to_f64().unwrap_or(f64::NAN)
    }

    pub fn hash_code(&self) -> u64 {
        hash::bytes_hash(&self.0.to_signed_bytes_le())
    }
}

impl FromStr for Varint {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self> {
        let lit = split_int_literal(s)?;
        let magnitude = BigInt::parse_bytes(lit.digits.as_bytes(), lit.radix)
            .ok_or_else(|| ValueError::invalid_argument(format!("Invalid integer value: '{s}'")))?;
        Ok(Self(if lit.negative { -magnitude } else { magnitude }))
    }
}

impl fmt::Display for Varint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
