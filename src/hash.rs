//! Bucket index functions.
//!
//! A hash function maps a key and the current capacity to a bucket index in
//! `[0, capacity)`. It must be pure: the table calls it again with a new
//! capacity for every node during a resize and expects the same answer for
//! the same inputs.

/// The strategy injected into a [`HashTable`](crate::HashTable).
pub type HashFn = fn(i32, usize) -> usize;

/// Multiplier for the avalanche rounds of [`improved_hash`].
pub const MIX_MULTIPLIER: u32 = 0x45d9f3b;

/// Folds a signed value into `[0, capacity)`. Negative keys land in a valid
/// bucket instead of producing a negative remainder.
#[inline]
fn fold(value: i64, capacity: usize) -> usize {
    debug_assert!(capacity > 0);
    value.rem_euclid(capacity as i64) as usize
}

/// `key mod capacity`. Keys in an arithmetic progression with a step that
/// divides the capacity all collide.
#[inline]
pub fn simple_hash(key: i32, capacity: usize) -> usize {
    fold(key as i64, capacity)
}

/// Two multiply-xor-shift rounds followed by a final xor-shift before the
/// modulo, so that neighbouring keys spread across the table.
///
/// The mix works on the key's 32 bits as unsigned, which makes the shifts
/// logical and the multiplications wrap.
#[inline]
pub fn improved_hash(key: i32, capacity: usize) -> usize {
    let mut x: u32 = key as u32;
    x = ((x >> 16) ^ x).wrapping_mul(MIX_MULTIPLIER);
    x = ((x >> 16) ^ x).wrapping_mul(MIX_MULTIPLIER);
    x = (x >> 16) ^ x;
    fold(x as i64, capacity)
}
