//! Addition in the 2-element field, provided as two interchangeable backends.
//!
//! Over GF(2), addition is XOR. Bit-packed storage gets this directly from
//! bitwise operations (see [`crate::bitvec`]), but a store that only supports
//! ordinary arithmetic on its values can use the difference-squared form
//! instead: for x, y in {0, 1},
//!
//! ```text
//! (x - y)^2 == x XOR y
//! ```
//!
//! Both backends are total on {0, 1} and must agree there; callers are
//! expected to uphold the binary invariant (values are never 2, -1, etc.).

/// GF(2) addition via bitwise XOR.
#[inline]
pub fn add(x: u8, y: u8) -> u8 {
    x ^ y
}

/// GF(2) addition via the arithmetic identity `(x - y)^2`.
///
/// Equivalent to [`add`] on inputs in {0, 1}. Useful when the backing store
/// only exposes arithmetic, not boolean, operations on its elements.
#[inline]
pub fn add_arith(x: u8, y: u8) -> u8 {
    let d = x as i8 - y as i8;
    (d * d) as u8
}
