//! Deterministic hash helpers.
//!
//! Hashes are pure functions of a value's payload so two equal values hash
//! the same regardless of how they were constructed. They are not required
//! to equal the numeric value.

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Boost-style hash combination. Order-sensitive.
#[inline]
pub fn combine_hash(seed: u64, h: u64) -> u64 {
    seed ^ h
        .wrapping_add(0x9e37_79b9)
        .wrapping_add(seed << 6)
        .wrapping_add(seed >> 2)
}

#[inline]
pub fn bigint_hash(v: i64) -> u64 {
    let v = v as u64;
    v ^ (v >> 32)
}

/// Fixed-width small integers: `31 * 17 + value`.
#[inline]
pub fn small_int_hash(v: i64) -> u64 {
    (31u64 * 17).wrapping_add(v as u64)
}

#[inline]
pub fn double_hash(v: f64) -> u64 {
    bigint_hash(v.to_bits() as i64)
}

#[inline]
pub fn float_hash(v: f32) -> u64 {
    v.to_bits() as u64
}

/// FNV-1a over raw bytes.
pub fn bytes_hash(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET, |h, b| (h ^ u64::from(*b)).wrapping_mul(FNV_PRIME))
}

/// Order-independent combination used by sets and maps, where equal
/// contents may be stored in different orders.
#[inline]
pub fn unordered_combine(acc: u64, h: u64) -> u64 {
    acc.wrapping_add(h.wrapping_mul(FNV_PRIME) ^ (h >> 29))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combine_is_order_sensitive() {
        let a = combine_hash(combine_hash(0, 1), 2);
        let b = combine_hash(combine_hash(0, 2), 1);
        assert_ne!(a, b);
    }

    #[test]
    fn unordered_is_commutative() {
        let a = unordered_combine(unordered_combine(0, 11), 42);
        let b = unordered_combine(unordered_combine(0, 42), 11);
        assert_eq!(a, b);
    }

    #[test]
    fn bytes_hash_is_deterministic() {
        assert_eq!(bytes_hash(b"cassandra"), bytes_hash(b"cassandra"));
        assert_ne!(bytes_hash(b"a"), bytes_hash(b"b"));
    }
}
