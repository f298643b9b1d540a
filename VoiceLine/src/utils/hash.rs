//! Hashing utilities

/// DJB2 hash over the UTF-16 code units of `s`, as a signed 32-bit integer.
///
/// Arithmetic wraps exactly like 32-bit two's complement, so long lines
/// commonly produce negative values. Fallback voice file names embed this
/// value verbatim (leading minus sign included), so it must never change.
pub fn stable_hash(s: &str) -> i32 {
    s.encode_utf16().fold(5381i32, |hash, unit| {
        hash.wrapping_mul(33).wrapping_add(i32::from(unit))
    })
}
