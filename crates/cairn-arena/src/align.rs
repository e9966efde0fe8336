//! Alignment and padding arithmetic.
//!
//! Pure functions over plain `usize` addresses. Nothing here touches
//! memory; [`StackArena`](crate::StackArena) feeds in the real address of
//! its first free byte and gets back how far to skip.

/// Largest alignment any arena honours. Larger requests are clamped.
pub const MAX_ALIGNMENT: usize = 128;

/// Alignment for untyped byte allocations when none is given.
pub const DEFAULT_ALIGNMENT: usize = 8;

/// Bytes to skip from `address` so that the result is `alignment`-aligned
/// and leaves at least `header_size` bytes in front of it.
///
/// Returns the minimal `p` with `(address + p) % alignment == 0` and
/// `p >= header_size`. When the natural alignment gap is too small for the
/// header, it is extended by whole multiples of `alignment`.
///
/// # Panics
///
/// Panics if `alignment` is not a power of two. Zero is not a power of two.
#[inline]
pub fn padding_with_header(address: usize, alignment: usize, header_size: usize) -> usize {
    assert!(
        alignment.is_power_of_two(),
        "alignment {alignment} is not a power of two"
    );
    let mask = alignment - 1;
    let mut padding = (alignment - (address & mask)) & mask;
    if padding < header_size {
        let needed = header_size - padding;
        padding += needed.div_ceil(alignment) * alignment;
    }
    padding
}

/// Clamp a requested alignment to the ceiling.
///
/// # Panics
///
/// Panics if `alignment` is not a power of two. Zero is not a power of two.
#[inline]
pub fn clamp_alignment(alignment: usize, max_alignment: usize) -> usize {
    assert!(
        alignment.is_power_of_two(),
        "alignment {alignment} is not a power of two"
    );
    alignment.min(max_alignment)
}
