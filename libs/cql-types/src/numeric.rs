//! Fixed-width integer wrappers: `Smallint`, `Tinyint`, `Bigint`.
//!
//! All three share one implementation generated by `fixed_int!`. Arithmetic
//! is only defined between two values of the same wrapper and uses checked
//! primitives, so overflow is detected directly rather than by re-deriving
//! the inverse operation.

use std::fmt;
use std::str::FromStr;

use crate::error::{ErrorKind, Result, ValueError};
use crate::hash;

/// Host-side numeric input accepted by numeric constructors.
#[derive(Debug, Clone, PartialEq)]
pub enum NumberArg {
    Int(i64),
    Float(f64),
    Str(String),
}

macro_rules! number_arg_from {
    ($variant:ident: $($t:ty),*) => {
        $(impl From<$t> for NumberArg {
            fn from(v: $t) -> Self {
                NumberArg::$variant(v.into())
            }
        })*
    };
}

number_arg_from!(Int: i8, i16, i32, i64, u8, u16, u32);
number_arg_from!(Float: f32, f64);

impl From<&str> for NumberArg {
    fn from(s: &str) -> Self {
        NumberArg::Str(s.to_string())
    }
}

impl From<String> for NumberArg {
    fn from(s: String) -> Self {
        NumberArg::Str(s)
    }
}

impl fmt::Display for NumberArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberArg::Int(n) => write!(f, "{n}"),
            NumberArg::Float(x) => write!(f, "{x}"),
            NumberArg::Str(s) => f.write_str(s),
        }
    }
}

/// An integer literal split into sign, radix and digits.
pub(crate) struct IntLiteral<'a> {
    pub negative: bool,
    pub radix: u32,
    pub digits: &'a str,
}

/// Split an integer literal: optional sign, then decimal, `0x` hex, `0b`
/// binary or leading-zero octal digits.
pub(crate) fn split_int_literal(s: &str) -> Result<IntLiteral<'_>> {
    let (negative, body) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, digits) = if let Some(rest) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        (16, rest)
    } else if let Some(rest) = body.strip_prefix("0b").or_else(|| body.strip_prefix("0B")) {
        (2, rest)
    } else if body.len() > 1 && body.starts_with('0') {
        (8, &body[1..])
    } else {
        (10, body)
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(ValueError::invalid_argument(format!("Invalid integer value: '{s}'")));
    }
    Ok(IntLiteral { negative, radix, digits })
}

/// Parse an integer literal. Malformed input is `InvalidArgument`; a
/// magnitude beyond `i128` is `Range`.
pub(crate) fn parse_int_literal(s: &str) -> Result<i128> {
    let IntLiteral { negative, radix, digits } = split_int_literal(s)?;
    let out_of_range = || ValueError::range(format!("value out of range: '{s}'"));
    let magnitude = u128::from_str_radix(digits, radix).map_err(|_| out_of_range())?;
    let magnitude = i128::try_from(magnitude).map_err(|_| out_of_range())?;
    Ok(if negative { -magnitude } else { magnitude })
}

macro_rules! fixed_int {
    ($(#[$meta:meta])* $name:ident, $prim:ty, $hash:path) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name($prim);

        impl $name {
            pub fn new(value: impl Into<NumberArg>) -> Result<Self> {
                let out_of_range = |given: &dyn fmt::Display| {
                    ValueError::range(format!(
                        "value must be between {} and {}, {} given",
                        <$prim>::MIN,
                        <$prim>::MAX,
                        given
                    ))
                };
                match value.into() {
                    NumberArg::Int(n) => <$prim>::try_from(n).map(Self).map_err(|_| out_of_range(&n)),
                    NumberArg::Float(f) => {
                        let t = f.trunc();
                        if f.is_nan() || t < <$prim>::MIN as f64 || t >= <$prim>::MAX as f64 + 1.0 {
                            Err(out_of_range(&f))
                        } else {
                            Ok(Self(t as $prim))
                        }
                    }
                    NumberArg::Str(s) => {
                        let n = parse_int_literal(&s).map_err(|e| match e.kind() {
                            ErrorKind::Range => out_of_range(&s),
                            _ => e,
                        })?;
                        <$prim>::try_from(n).map(Self).map_err(|_| out_of_range(&s))
                    }
                }
            }

            pub fn min() -> Self {
                Self(<$prim>::MIN)
            }

            pub fn max() -> Self {
                Self(<$prim>::MAX)
            }

            pub fn value(&self) -> $prim {
                self.0
            }

            pub fn to_int(&self) -> i64 {
                i64::from(self.0)
            }

            pub fn to_double(&self) -> f64 {
                self.0 as f64
            }

            pub fn add(&self, other: &Self) -> Result<Self> {
                self.0
                    .checked_add(other.0)
                    .map(Self)
                    .ok_or_else(|| ValueError::range("Sum is out of range"))
            }

            pub fn sub(&self, other: &Self) -> Result<Self> {
                self.0
                    .checked_sub(other.0)
                    .map(Self)
                    .ok_or_else(|| ValueError::range("Difference is out of range"))
            }

            pub fn mul(&self, other: &Self) -> Result<Self> {
                self.0
                    .checked_mul(other.0)
                    .map(Self)
                    .ok_or_else(|| ValueError::range("Product is out of range"))
            }

            pub fn div(&self, other: &Self) -> Result<Self> {
                if other.0 == 0 {
                    return Err(ValueError::divide_by_zero("Cannot divide by zero"));
                }
                self.0
                    .checked_div(other.0)
                    .map(Self)
                    .ok_or_else(|| ValueError::range("Quotient is out of range"))
            }

            /// Remainder; `MIN % -1` is 0.
            pub fn rem(&self, other: &Self) -> Result<Self> {
                if other.0 == 0 {
                    return Err(ValueError::divide_by_zero("Cannot modulo by zero"));
                }
                Ok(Self(self.0.wrapping_rem(other.0)))
            }

            pub fn abs(&self) -> Result<Self> {
                self.0
                    .checked_abs()
                    .map(Self)
                    .ok_or_else(|| ValueError::range("Value doesn't exist"))
            }

            pub fn neg(&self) -> Result<Self> {
                self.0
                    .checked_neg()
                    .map(Self)
                    .ok_or_else(|| ValueError::range("Value doesn't exist"))
            }

            /// Integer square root, truncated.
            pub fn sqrt(&self) -> Result<Self> {
                if self.0 < 0 {
                    return Err(ValueError::range(
                        "Cannot take a square root of a negative number",
                    ));
                }
                Ok(Self(self.0.isqrt()))
            }

            pub fn hash_code(&self) -> u64 {
                $hash(i64::from(self.0))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValueError;

            fn from_str(s: &str) -> Result<Self> {
                Self::new(s)
            }
        }

        impl From<$name> for NumberArg {
            fn from(v: $name) -> Self {
                NumberArg::Int(i64::from(v.0))
            }
        }
    };
}

fixed_int!(
    /// 16-bit signed integer, domain [-32768, 32767].
    Smallint,
    i16,
    hash::small_int_hash
);

fixed_int!(
    /// 8-bit signed integer, domain [-128, 127].
    Tinyint,
    i8,
    hash::small_int_hash
);

fixed_int!(
    /// 64-bit signed integer. Also carries `counter` values.
    Bigint,
    i64,
    hash::bigint_hash
);
