use std::fmt;

use crate::error::{Result, ValueError};
use crate::hash;
use crate::numeric::{Bigint, NumberArg};

/// Calendar-aware duration: months, days and nanoseconds, all sharing one
/// sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Duration {
    months: i32,
    days: i32,
    nanos: i64,
}

fn component_i32(name: &str, arg: NumberArg) -> Result<i32> {
    let n = Bigint::new(arg)?.value();
    i32::try_from(n).map_err(|_| {
        ValueError::range(format!(
            "{name} must be between {} and {}, {n} given",
            i32::MIN,
            i32::MAX
        ))
    })
}

impl Duration {
    pub fn new(
        months: impl Into<NumberArg>,
        days: impl Into<NumberArg>,
        nanos: impl Into<NumberArg>,
    ) -> Result<Self> {
        let months = component_i32("months", months.into())?;
        let days = component_i32("days", days.into())?;
        let nanos = Bigint::new(nanos)?.value();
        let all_non_negative = months >= 0 && days >= 0 && nanos >= 0;
        let all_non_positive = months <= 0 && days <= 0 && nanos <= 0;
        if !all_non_negative && !all_non_positive {
            return Err(ValueError::invalid_argument(
                "A duration must have all non-negative or non-positive attributes",
            ));
        }
        Ok(Self { months, days, nanos })
    }

    pub fn months(&self) -> i32 {
        self.months
    }

    pub fn days(&self) -> i32 {
        self.days
    }

    pub fn nanos(&self) -> i64 {
        self.nanos
    }

    pub fn hash_code(&self) -> u64 {
        let h = hash::combine_hash(
            hash::bigint_hash(i64::from(self.months)),
            hash::bigint_hash(i64::from(self.days)),
        );
        hash::combine_hash(h, hash::bigint_hash(self.nanos))
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let negative = self.months < 0 || self.days < 0 || self.nanos < 0;
        write!(
            f,
            "{}{}mo{}d{}ns",
            if negative { "-" } else { "" },
            self.months.unsigned_abs(),
            self.days.unsigned_abs(),
            self.nanos.unsigned_abs()
        )
    }
}
