//! Random (`Uuid`) and time-based (`Timeuuid`) identifiers.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::{Mutex, OnceLock};

use chrono::{DateTime, Utc};
use uuid::Uuid as RawUuid;

use crate::error::{Result, ValueError};
use crate::hash;

/// 100ns intervals between 1582-10-15 and 1970-01-01.
const GREGORIAN_OFFSET: u64 = 0x01B2_1DD2_1381_4000;
const TICKS_PER_MILLI: u64 = 10_000;
/// Largest value the 60-bit v1 timestamp field holds.
const MAX_TICKS: u64 = 0x0FFF_FFFF_FFFF_FFFF;

fn parse_raw(s: &str) -> Result<RawUuid> {
    RawUuid::parse_str(s).map_err(|_| ValueError::invalid_argument(format!("Invalid UUID: '{s}'")))
}

fn raw_hash(raw: &RawUuid) -> u64 {
    let (hi, lo) = raw.as_u64_pair();
    hash::combine_hash(hash::bigint_hash(hi as i64), hash::bigint_hash(lo as i64))
}

// ----------------------------------------------------------------------------
// Uuid
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Uuid(RawUuid);

impl Uuid {
    /// Random version 4 identifier.
    pub fn new() -> Self {
        Self(RawUuid::new_v4())
    }

    pub fn from_raw(raw: RawUuid) -> Self {
        Self(raw)
    }

    pub fn uuid(&self) -> String {
        self.0.hyphenated().to_string()
    }

    pub fn version(&self) -> usize {
        self.0.get_version_num()
    }

    pub fn as_raw(&self) -> &RawUuid {
        &self.0
    }

    pub fn hash_code(&self) -> u64 {
        raw_hash(&self.0)
    }
}

impl Default for Uuid {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for Uuid {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self> {
        parse_raw(s).map(Self)
    }
}

impl fmt::Display for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

// ----------------------------------------------------------------------------
// Timeuuid
// ----------------------------------------------------------------------------

/// Node id and clock sequence are chosen once per process; ticks handed out
/// by `Timeuuid::new` strictly increase.
struct Generator {
    node: [u8; 6],
    clock_seq: u16,
    last_ticks: Mutex<u64>,
}

fn generator() -> &'static Generator {
    static GENERATOR: OnceLock<Generator> = OnceLock::new();
    GENERATOR.get_or_init(|| {
        let mut node: [u8; 6] = rand::random();
        // random node ids carry the multicast bit
        node[0] |= 0x01;
        Generator {
            node,
            clock_seq: rand::random::<u16>() & 0x3fff,
            last_ticks: Mutex::new(0),
        }
    })
}

fn ticks_now() -> u64 {
    let micros = Utc::now().timestamp_micros().max(0) as u64;
    micros * 10 + GREGORIAN_OFFSET
}

/// Version 1 identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timeuuid(RawUuid);

impl Timeuuid {
    /// Fresh identifier for the current time.
    pub fn new() -> Self {
        let g = generator();
        let ticks = {
            let mut last = g.last_ticks.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            let ticks = ticks_now().max(*last + 1);
            *last = ticks;
            ticks
        };
        Self::from_ticks(ticks, g.clock_seq, &g.node)
    }

    /// Identifier for an epoch-millisecond timestamp.
    pub fn from_millis(ms: i64) -> Result<Self> {
        if ms < 0 {
            return Err(ValueError::invalid_argument(format!(
                "Timestamp must be a positive integer, {ms} given"
            )));
        }
        let ticks = (ms as u64)
            .checked_mul(TICKS_PER_MILLI)
            .and_then(|t| t.checked_add(GREGORIAN_OFFSET))
            .filter(|t| *t <= MAX_TICKS)
            .ok_or_else(|| {
                ValueError::range(format!("Timestamp is out of range for a timeuuid, {ms} given"))
            })?;
        let g = generator();
        Ok(Self::from_ticks(ticks, g.clock_seq, &g.node))
    }

    fn from_ticks(ticks: u64, clock_seq: u16, node: &[u8; 6]) -> Self {
        let time_low = (ticks & 0xffff_ffff) as u32;
        let time_mid = ((ticks >> 32) & 0xffff) as u16;
        let time_hi_and_version = ((ticks >> 48) & 0x0fff) as u16 | 0x1000;
        let mut tail = [0u8; 8];
        tail[0] = ((clock_seq >> 8) & 0x3f) as u8 | 0x80;
        tail[1] = (clock_seq & 0xff) as u8;
        tail[2..].copy_from_slice(node);
        Self(RawUuid::from_fields(time_low, time_mid, time_hi_and_version, &tail))
    }

    /// Parse the canonical form; only version 1 identifiers are accepted.
    pub fn parse(s: &str) -> Result<Self> {
        Self::from_raw(parse_raw(s)?)
    }

    pub fn from_raw(raw: RawUuid) -> Result<Self> {
        match raw.get_version_num() {
            1 => Ok(Self(raw)),
            v => Err(ValueError::invalid_argument(format!(
                "UUID must be of type 1, type {v} given"
            ))),
        }
    }

    fn ticks(&self) -> u64 {
        let (time_low, time_mid, time_hi, _) = self.0.as_fields();
        (u64::from(time_hi & 0x0fff) << 48) | (u64::from(time_mid) << 32) | u64::from(time_low)
    }

    /// Embedded timestamp in epoch milliseconds.
    pub fn time(&self) -> i64 {
        (self.ticks() as i64 - GREGORIAN_OFFSET as i64).div_euclid(TICKS_PER_MILLI as i64)
    }

    pub fn uuid(&self) -> String {
        self.0.hyphenated().to_string()
    }

    pub fn version(&self) -> usize {
        self.0.get_version_num()
    }

    pub fn as_raw(&self) -> &RawUuid {
        &self.0
    }

    pub fn to_datetime(&self) -> Result<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.time())
            .ok_or_else(|| ValueError::range(format!("Timeuuid time is out of range: {}", self.0)))
    }

    pub fn hash_code(&self) -> u64 {
        raw_hash(&self.0)
    }
}

impl Default for Timeuuid {
    fn default() -> Self {
        Self::new()
    }
}

impl Ord for Timeuuid {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ticks()
            .cmp(&other.ticks())
            .then_with(|| self.0.as_bytes()[8..].cmp(&other.0.as_bytes()[8..]))
    }
}

impl PartialOrd for Timeuuid {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for Timeuuid {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Timeuuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn time_round_trips_millis() {
        for ts in [0, 1, 1_469_198_584_123, 4_102_444_800_000] {
            let t = Timeuuid::from_millis(ts).unwrap();
            assert_eq!(t.time(), ts);
            assert_eq!(t.version(), 1);
        }
    }

    #[test]
    fn negative_timestamp_rejected() {
        let err = Timeuuid::from_millis(-5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(err.message(), "Timestamp must be a positive integer, -5 given");
    }

    #[test]
    fn millis_bounded_by_timestamp_field() {
        let last = (MAX_TICKS - GREGORIAN_OFFSET) / TICKS_PER_MILLI;
        let last = i64::try_from(last).unwrap();
        assert_eq!(last, 103_072_857_660_684);
        assert_eq!(Timeuuid::from_millis(last).unwrap().time(), last);

        for ms in [last + 1, 200_000_000_000_000, i64::MAX] {
            let err = Timeuuid::from_millis(ms).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Range);
            assert_eq!(
                err.message(),
                format!("Timestamp is out of range for a timeuuid, {ms} given")
            );
        }
    }

    #[test]
    fn negative_bounds_rejected_before_range_check() {
        for ms in [-1, i64::MIN] {
            assert_eq!(Timeuuid::from_millis(ms).unwrap_err().kind(), ErrorKind::InvalidArgument);
        }
        assert_eq!(Timeuuid::from_millis(0).unwrap().time(), 0);
    }

    #[test]
    fn parse_checks_version() {
        let v1 = Timeuuid::from_millis(1000).unwrap();
        assert_eq!(Timeuuid::parse(&v1.uuid()).unwrap(), v1);

        let v4 = Uuid::new().uuid();
        let err = Timeuuid::parse(&v4).unwrap_err();
        assert_eq!(err.message(), "UUID must be of type 1, type 4 given");

        let err = Timeuuid::parse("not-a-uuid").unwrap_err();
        assert_eq!(err.message(), "Invalid UUID: 'not-a-uuid'");
    }

    #[test]
    fn generated_ids_increase() {
        let a = Timeuuid::new();
        let b = Timeuuid::new();
        assert!(a < b);
        assert_ne!(a, b);
    }

    #[test]
    fn orders_by_embedded_time() {
        let early = Timeuuid::from_millis(10).unwrap();
        let late = Timeuuid::from_millis(20).unwrap();
        assert!(early < late);
    }

    #[test]
    fn random_uuid_is_version_4() {
        let u = Uuid::new();
        assert_eq!(u.version(), 4);
        assert_eq!(u.uuid().parse::<Uuid>().unwrap(), u);
    }
}
