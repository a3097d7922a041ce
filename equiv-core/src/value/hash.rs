//! Host-compatible hash functions

/// Hash of `true`
pub const HASH_TRUE: i32 = 1231;

/// Hash of `false`
pub const HASH_FALSE: i32 = 1237;

/// Polynomial string hash over UTF-16 code units
pub fn string_hash(s: &str) -> i32 {
    s.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as i32))
}

/// Fold a 64-bit value into 32 bits
pub(crate) fn long_hash(n: i64) -> i32 {
    (n ^ ((n as u64) >> 32) as i64) as i32
}

/// Bit pattern of a double with every NaN collapsed to one representation
pub(crate) fn canonical_bits(d: f64) -> u64 {
    if d.is_nan() {
        0x7ff8_0000_0000_0000
    } else {
        d.to_bits()
    }
}
