//! Day-relative temporal wrappers: `Time` (nanoseconds since midnight) and
//! `Date` (days since the Unix epoch).

use std::fmt;

use chrono::{DateTime, Timelike, Utc};

use crate::error::{Result, ValueError};
use crate::numeric::{Bigint, NumberArg};

pub const NANOS_PER_SECOND: i64 = 1_000_000_000;
pub const SECONDS_PER_DAY: i64 = 86_400;
pub const NANOS_PER_DAY: i64 = SECONDS_PER_DAY * NANOS_PER_SECOND;

/// Nanoseconds since midnight, domain `[0, 86399999999999]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Time(i64);

impl Time {
    /// From an integer or numeric string.
    pub fn new(nanoseconds: impl Into<NumberArg>) -> Result<Self> {
        let arg = nanoseconds.into();
        let n = Bigint::new(arg.clone())
            .map_err(|_| time_out_of_range(&arg))?
            .value();
        if !(0..NANOS_PER_DAY).contains(&n) {
            return Err(time_out_of_range(&arg));
        }
        Ok(Self(n))
    }

    pub fn now() -> Self {
        let now = Utc::now();
        Self(
            i64::from(now.num_seconds_from_midnight()) * NANOS_PER_SECOND
                + i64::from(now.nanosecond() % 1_000_000_000),
        )
    }

    /// Only the epoch-seconds component is used, reduced to one day.
    pub fn from_datetime(dt: &DateTime<Utc>) -> Self {
        Self(dt.timestamp().rem_euclid(SECONDS_PER_DAY) * NANOS_PER_SECOND)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn seconds(&self) -> i64 {
        self.0 / NANOS_PER_SECOND
    }
}

fn time_out_of_range(given: &NumberArg) -> ValueError {
    ValueError::invalid_argument(format!(
        "nanoseconds must be nanoseconds since midnight, {given} given"
    ))
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Days since the Unix epoch, limited to the 32-bit range the native driver
/// stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Date(i64);

impl Date {
    /// From seconds since the epoch; the time of day is dropped.
    pub fn new(seconds: i64) -> Result<Self> {
        Self::from_days(seconds.div_euclid(SECONDS_PER_DAY))
    }

    pub fn from_days(days: i64) -> Result<Self> {
        if i32::try_from(days).is_err() {
            return Err(ValueError::range(format!(
                "days must be between {} and {}, {days} given",
                i32::MIN,
                i32::MAX
            )));
        }
        Ok(Self(days))
    }

    pub fn today() -> Self {
        Self(Utc::now().timestamp().div_euclid(SECONDS_PER_DAY))
    }

    pub fn from_datetime(dt: &DateTime<Utc>) -> Self {
        Self(dt.timestamp().div_euclid(SECONDS_PER_DAY))
    }

    pub fn days(&self) -> i64 {
        self.0
    }

    pub fn seconds(&self) -> i64 {
        self.0 * SECONDS_PER_DAY
    }

    /// Midnight of this date, optionally shifted by a time of day.
    pub fn to_datetime(&self, time: Option<Time>) -> Result<DateTime<Utc>> {
        let nanos = time.map_or(0, |t| t.value());
        let secs = self.seconds() + nanos / NANOS_PER_SECOND;
        DateTime::from_timestamp(secs, (nanos % NANOS_PER_SECOND) as u32)
            .ok_or_else(|| ValueError::range(format!("Date is out of range: {} days", self.0)))
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match DateTime::from_timestamp(self.seconds(), 0) {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%d")),
            None => write!(f, "{}", self.0),
        }
    }
}
