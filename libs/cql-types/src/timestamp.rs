use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};

use crate::error::{Result, ValueError};

/// Milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    /// `seconds * 1000 + microseconds / 1000`.
    pub fn new(seconds: i64, microseconds: i64) -> Result<Self> {
        seconds
            .checked_mul(1000)
            .and_then(|ms| ms.checked_add(microseconds / 1000))
            .map(Self)
            .ok_or_else(|| ValueError::range(format!("Timestamp is out of range: {seconds} seconds")))
    }

    pub fn from_millis(ms: i64) -> Self {
        Self(ms)
    }

    /// Wall clock, millisecond precision.
    pub fn now() -> Self {
        Self(Utc::now().timestamp_millis())
    }

    pub fn from_datetime(dt: &DateTime<Utc>) -> Self {
        Self(dt.timestamp_millis())
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// Integral seconds.
    pub fn time(&self) -> i64 {
        self.0 / 1000
    }

    pub fn seconds(&self) -> i64 {
        self.time()
    }

    /// Sub-second part in microseconds.
    pub fn microseconds(&self) -> i64 {
        (self.0 - self.time() * 1000) * 1000
    }

    /// `"<fraction> <seconds>"`, with the fraction printed to eight places.
    pub fn microtime(&self) -> String {
        format!("{:.8} {}", self.microseconds() as f64 / 1_000_000.0, self.time())
    }

    pub fn microtime_float(&self) -> f64 {
        self.0 as f64 / 1000.0
    }

    pub fn to_datetime(&self) -> Result<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
            .ok_or_else(|| ValueError::range(format!("Timestamp is out of range: {} ms", self.0)))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ----------------------------------------------------------------------------
// Client-side timestamp generation
// ----------------------------------------------------------------------------

/// Source of write timestamps attached to statements.
#[derive(Debug)]
pub enum TimestampGenerator {
    /// Strictly increasing microsecond timestamps from the local clock.
    Monotonic(MonotonicGenerator),
    /// Leave timestamp assignment to the server.
    ServerSide,
}

impl TimestampGenerator {
    pub fn monotonic() -> Self {
        TimestampGenerator::Monotonic(MonotonicGenerator::default())
    }

    pub fn server_side() -> Self {
        TimestampGenerator::ServerSide
    }

    /// Next timestamp in microseconds, or `None` when the server assigns it.
    pub fn next(&self) -> Option<i64> {
        match self {
            TimestampGenerator::Monotonic(g) => Some(g.next()),
            TimestampGenerator::ServerSide => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TimestampGenerator::Monotonic(_) => "monotonic",
            TimestampGenerator::ServerSide => "server_side",
        }
    }
}

#[derive(Debug, Default)]
pub struct MonotonicGenerator {
    last: AtomicI64,
}

impl MonotonicGenerator {
    /// Wall clock in microseconds, bumped past the last value handed out if
    /// the clock stalled or stepped back.
    pub fn next(&self) -> i64 {
        let now = Utc::now().timestamp_micros();
        let mut last = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(last + 1);
            match self
                .last
                .compare_exchange_weak(last, candidate, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return candidate,
                Err(actual) => last = actual,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combines_seconds_and_micros() {
        let ts = Timestamp::new(1234, 123_456).unwrap();
        assert_eq!(ts.value(), 1_234_123);
        assert_eq!(ts.time(), 1234);
        assert_eq!(ts.microseconds(), 123_000);
        assert_eq!(ts.microtime(), "0.12300000 1234");
        assert!((ts.microtime_float() - 1234.123).abs() < 1e-9);
        assert_eq!(ts.to_datetime().unwrap().timestamp_millis(), 1_234_123);
    }

    #[test]
    fn overflowing_seconds_is_range_error() {
        assert!(Timestamp::new(i64::MAX, 0).is_err());
    }

    #[test]
    fn now_is_close_to_clock() {
        let before = Utc::now().timestamp_millis();
        let ts = Timestamp::now();
        assert!(ts.value() >= before);
    }

    #[test]
    fn monotonic_generator_strictly_increases() {
        let generator = TimestampGenerator::monotonic();
        let mut prev = generator.next().unwrap();
        for _ in 0..10_000 {
            let next = generator.next().unwrap();
            assert!(next > prev);
            prev = next;
        }
        assert_eq!(TimestampGenerator::server_side().next(), None);
    }
}
