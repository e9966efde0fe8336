//! Fixed-capacity LIFO arena over a borrowed byte buffer.
//!
//! [`StackArena`] hands out aligned, zero-filled byte ranges from one
//! caller-supplied buffer and releases them strictly in reverse order.
//! Each allocation stores an [`AllocationHeader`] in its own alignment gap,
//! so the arena's only bookkeeping is two cursors: `offset` (first free
//! byte) and `top` (payload start of the newest live allocation).
//!
//! ```text
//!  previous_offset                       top            offset
//!        |  gap (padding)  | header (24B) |   payload    |  free ...
//!        └──────── reservation = padding + size ────────┘
//! ```

use std::alloc::Layout;
use std::fmt;
use std::mem;

use crate::align::{clamp_alignment, padding_with_header};
use crate::config::ArenaConfig;
use crate::error::ArenaError;
use crate::handle::Allocation;
use crate::header::{AllocationHeader, HEADER_SIZE};

/// A stack allocator viewing a borrowed buffer.
///
/// The arena never owns, grows or frees the buffer. Capacity is the
/// buffer's length and is fixed for the arena's lifetime; the borrow keeps
/// the buffer alive and unaliased for as long as the arena exists.
///
/// Every allocation is zero-filled when handed out, and every byte
/// reclaimed by [`pop`](Self::pop) or [`reset`](Self::reset) is zeroed
/// again, so stale contents never leak into a later allocation.
///
/// # Example
///
/// ```rust
/// use cairn_arena::StackArena;
///
/// let mut buf = [0u8; 256];
/// let mut arena = StackArena::new(&mut buf);
///
/// let a = arena.allocate(16, 8).unwrap();
/// arena.get_mut(a).unwrap()[0] = 7;
///
/// let before = arena.offset();
/// let b = arena.allocate(4, 4).unwrap();
/// assert!(b.offset() >= a.end());
/// arena.pop();
/// assert_eq!(arena.offset(), before);
/// ```
pub struct StackArena<'buf> {
    /// Borrowed backing storage.
    buffer: &'buf mut [u8],
    /// First free byte. `0 <= offset < capacity` once anything is allocated.
    offset: usize,
    /// Payload start of the newest live allocation; 0 when empty.
    top: usize,
    max_alignment: usize,
    default_alignment: usize,
}

impl<'buf> StackArena<'buf> {
    /// Bind an arena to `buffer` with the default [`ArenaConfig`].
    ///
    /// No allocation or zeroing happens; the buffer's current contents are
    /// left as they are until an allocation covers them.
    pub fn new(buffer: &'buf mut [u8]) -> Self {
        Self {
            buffer,
            offset: 0,
            top: 0,
            max_alignment: ArenaConfig::DEFAULT_MAX_ALIGNMENT,
            default_alignment: ArenaConfig::DEFAULT_ALIGNMENT,
        }
    }

    /// Bind an arena to `buffer` with a custom configuration.
    pub fn with_config(buffer: &'buf mut [u8], config: &ArenaConfig) -> Result<Self, ArenaError> {
        config.validate()?;
        Ok(Self {
            buffer,
            offset: 0,
            top: 0,
            max_alignment: config.max_alignment,
            default_alignment: config.default_alignment,
        })
    }

    /// Reserve `size` zeroed bytes aligned to `alignment`.
    ///
    /// Alignments above the configured ceiling are clamped down to it.
    /// Fails with [`ArenaError::OutOfMemory`] when
    /// `offset + padding + size >= capacity`; the arena is left untouched.
    /// Note the `>=`: a request that would end exactly at the last byte
    /// is rejected.
    ///
    /// # Panics
    ///
    /// Panics if `alignment` is not a power of two.
    pub fn allocate(&mut self, size: usize, alignment: usize) -> Result<Allocation, ArenaError> {
        let alignment = clamp_alignment(alignment, self.max_alignment);
        let capacity = self.buffer.len();
        let address = self.buffer.as_ptr().addr() + self.offset;
        let padding = padding_with_header(address, alignment, HEADER_SIZE);

        let end = match self
            .offset
            .checked_add(padding)
            .and_then(|v| v.checked_add(size))
        {
            Some(end) if end < capacity => end,
            _ => {
                tracing::warn!(
                    requested = size,
                    padding,
                    offset = self.offset,
                    capacity,
                    "stack arena out of memory"
                );
                return Err(ArenaError::OutOfMemory {
                    requested: size,
                    padding,
                    offset: self.offset,
                    capacity,
                });
            }
        };

        let start = self.offset + padding;
        // Zero the whole reservation, gap included, before the header lands.
        self.buffer[self.offset..end].fill(0);
        let header = AllocationHeader {
            previous_offset: self.offset,
            padding: padding - HEADER_SIZE,
            previous_top: self.top,
        };
        header.encode(&mut self.buffer[start - HEADER_SIZE..start]);

        tracing::trace!(
            size,
            alignment,
            padding,
            offset = self.offset,
            start,
            "stack arena allocate"
        );
        self.top = start;
        self.offset = end;
        Ok(Allocation::new(start, size))
    }

    /// Reserve `size` zeroed bytes at the configured default alignment.
    pub fn allocate_bytes(&mut self, size: usize) -> Result<Allocation, ArenaError> {
        self.allocate(size, self.default_alignment)
    }

    /// Reserve space described by a [`Layout`].
    pub fn allocate_layout(&mut self, layout: Layout) -> Result<Allocation, ArenaError> {
        self.allocate(layout.size(), layout.align())
    }

    /// Reserve space for `count` values of `T`, aligned for `T`.
    ///
    /// The arena only deals in bytes; callers decode values out of
    /// [`get`](Self::get) themselves.
    pub fn allocate_array<T>(&mut self, count: usize) -> Result<Allocation, ArenaError> {
        let layout = Layout::array::<T>(count).map_err(|_| ArenaError::LayoutOverflow {
            count,
            element_size: mem::size_of::<T>(),
        })?;
        self.allocate_layout(layout)
    }

    /// Reserve `size` zeroed bytes and return them directly.
    ///
    /// Convenience for short-lived scratch use where holding a handle is
    /// not needed. The slice borrows the arena mutably.
    pub fn allocate_slice(
        &mut self,
        size: usize,
        alignment: usize,
    ) -> Result<&mut [u8], ArenaError> {
        let allocation = self.allocate(size, alignment)?;
        Ok(&mut self.buffer[allocation.range()])
    }

    /// Release the newest allocation.
    ///
    /// No-op on an empty arena. Zeroes the whole released reservation
    /// (gap, header and payload) and moves `offset` back to where it was
    /// before that allocation.
    pub fn pop(&mut self) {
        if self.offset == 0 {
            return;
        }
        let header_at = self.top - HEADER_SIZE;
        let header = AllocationHeader::decode(&self.buffer[header_at..self.top]);
        debug_assert_eq!(
            header.reservation_start(header_at),
            Some(header.previous_offset),
            "allocation header chain corrupted at {header_at}"
        );

        self.buffer[header.previous_offset..self.offset].fill(0);
        tracing::trace!(
            from = self.offset,
            to = header.previous_offset,
            "stack arena pop"
        );
        self.offset = header.previous_offset;
        self.top = header.previous_top;
    }

    /// Release every allocation at once, zeroing all used bytes.
    pub fn reset(&mut self) {
        self.buffer[..self.offset].fill(0);
        tracing::trace!(released = self.offset, "stack arena reset");
        self.offset = 0;
        self.top = 0;
    }

    /// Shared view of an allocation's payload.
    ///
    /// Returns `None` if the range lies beyond the live region, i.e. it was
    /// released by `pop`/`reset`. A released range that a later allocation
    /// has covered again resolves to the new occupant's bytes.
    pub fn get(&self, allocation: Allocation) -> Option<&[u8]> {
        if allocation.end() > self.offset {
            return None;
        }
        Some(&self.buffer[allocation.range()])
    }

    /// Mutable view of an allocation's payload. See [`get`](Self::get).
    pub fn get_mut(&mut self, allocation: Allocation) -> Option<&mut [u8]> {
        if allocation.end() > self.offset {
            return None;
        }
        Some(&mut self.buffer[allocation.range()])
    }

    /// The newest live allocation, if any.
    pub fn top(&self) -> Option<Allocation> {
        if self.offset == 0 {
            return None;
        }
        Some(Allocation::new(self.top, self.offset - self.top))
    }

    /// Live allocations, newest first.
    pub fn allocations(&self) -> Allocations<'_> {
        Allocations {
            buffer: self.buffer,
            top: self.top,
            end: self.offset,
        }
    }

    /// Number of live allocations. Walks the header chain.
    pub fn depth(&self) -> usize {
        self.allocations().count()
    }

    /// First free byte.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Total size of the borrowed buffer in bytes.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Bytes not yet reserved. Headers and padding come out of this too.
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.offset
    }

    /// Whether no allocation is live.
    pub fn is_empty(&self) -> bool {
        self.offset == 0
    }

    /// Alignment ceiling in effect.
    pub fn max_alignment(&self) -> usize {
        self.max_alignment
    }

    /// Alignment used by [`allocate_bytes`](Self::allocate_bytes).
    pub fn default_alignment(&self) -> usize {
        self.default_alignment
    }

    /// The whole backing buffer, headers and free space included.
    pub fn as_bytes(&self) -> &[u8] {
        self.buffer
    }

    /// Give the buffer back to the caller.
    pub fn into_inner(self) -> &'buf mut [u8] {
        self.buffer
    }
}

impl fmt::Debug for StackArena<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StackArena")
            .field("offset", &self.offset)
            .field("top", &self.top)
            .field("capacity", &self.buffer.len())
            .field("max_alignment", &self.max_alignment)
            .finish_non_exhaustive()
    }
}

/// Iterator over live allocations, newest first.
///
/// Produced by [`StackArena::allocations`].
#[derive(Clone)]
pub struct Allocations<'a> {
    buffer: &'a [u8],
    top: usize,
    end: usize,
}

impl Iterator for Allocations<'_> {
    type Item = Allocation;

    fn next(&mut self) -> Option<Allocation> {
        if self.end == 0 {
            return None;
        }
        let item = Allocation::new(self.top, self.end - self.top);
        let header_at = self.top - HEADER_SIZE;
        let header = AllocationHeader::decode(&self.buffer[header_at..self.top]);
        self.end = header.previous_offset;
        self.top = header.previous_top;
        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::MAX_ALIGNMENT;
    use cairn_test_utils::{is_zeroed, AlignedBuffer};
    use tracing_test::traced_test;

    #[test]
    fn new_arena_is_empty() {
        let mut buf = AlignedBuffer::<256>::zeroed();
        let arena = StackArena::new(buf.as_mut_slice());
        assert!(arena.is_empty());
        assert_eq!(arena.offset(), 0);
        assert_eq!(arena.capacity(), 256);
        assert_eq!(arena.remaining(), 256);
        assert_eq!(arena.top(), None);
        assert_eq!(arena.depth(), 0);
    }

    #[test]
    fn first_allocation_places_header_in_gap() {
        let mut buf = AlignedBuffer::<256>::zeroed();
        let mut arena = StackArena::new(buf.as_mut_slice());
        let a = arena.allocate(8, 8).unwrap();
        // Buffer base is 128-aligned, so the gap is exactly one header.
        assert_eq!(a.offset(), HEADER_SIZE);
        assert_eq!(a.len(), 8);
        assert_eq!(arena.offset(), HEADER_SIZE + 8);

        let header = AllocationHeader::decode(&arena.as_bytes()[0..HEADER_SIZE]);
        assert_eq!(header.previous_offset, 0);
        assert_eq!(header.padding, 0);
        assert_eq!(header.previous_top, 0);
    }

    #[test]
    fn returned_address_is_aligned() {
        let mut buf = AlignedBuffer::<1024>::zeroed();
        let mut arena = StackArena::new(buf.as_mut_slice());
        arena.allocate(3, 1).unwrap();
        for shift in 0..=7 {
            let alignment = 1usize << shift;
            let a = arena.allocate(5, alignment).unwrap();
            let addr = arena.get(a).unwrap().as_ptr().addr();
            assert_eq!(addr % alignment, 0, "alignment {alignment}");
        }
    }

    #[test]
    fn allocations_do_not_overlap() {
        let mut buf = AlignedBuffer::<512>::zeroed();
        let mut arena = StackArena::new(buf.as_mut_slice());
        let a = arena.allocate(10, 4).unwrap();
        let b = arena.allocate(10, 16).unwrap();
        let c = arena.allocate(1, 1).unwrap();
        // Each later payload starts past the previous payload plus a header.
        assert!(b.offset() >= a.end() + HEADER_SIZE);
        assert!(c.offset() >= b.end() + HEADER_SIZE);

        arena.get_mut(a).unwrap().fill(0xAA);
        arena.get_mut(b).unwrap().fill(0xBB);
        arena.get_mut(c).unwrap().fill(0xCC);
        assert!(arena.get(a).unwrap().iter().all(|&v| v == 0xAA));
        assert!(arena.get(b).unwrap().iter().all(|&v| v == 0xBB));
        assert_eq!(arena.get(c).unwrap(), &[0xCC]);
    }

    #[test]
    fn allocate_then_pop_restores_offset() {
        let mut buf = AlignedBuffer::<256>::zeroed();
        let mut arena = StackArena::new(buf.as_mut_slice());
        arena.allocate(7, 2).unwrap();
        let before = arena.offset();
        arena.allocate(33, 32).unwrap();
        arena.pop();
        assert_eq!(arena.offset(), before);
        arena.pop();
        assert_eq!(arena.offset(), 0);
    }

    #[test]
    fn pop_on_empty_is_noop() {
        let mut buf = AlignedBuffer::<64>::filled(0x5A);
        let mut arena = StackArena::new(buf.as_mut_slice());
        arena.pop();
        assert_eq!(arena.offset(), 0);
        assert!(arena.is_empty());
        // Nothing was zeroed either.
        assert!(arena.as_bytes().iter().all(|&v| v == 0x5A));
    }

    #[test]
    fn pop_zeroes_released_bytes() {
        let mut buf = AlignedBuffer::<256>::zeroed();
        let mut arena = StackArena::new(buf.as_mut_slice());
        let a = arena.allocate(16, 8).unwrap();
        arena.get_mut(a).unwrap().fill(0xFF);
        arena.pop();
        assert!(is_zeroed(arena.as_bytes()));
    }

    #[test]
    fn allocation_over_dirty_memory_is_zeroed() {
        let mut buf = AlignedBuffer::<256>::filled(0xEE);
        let mut arena = StackArena::new(buf.as_mut_slice());
        let a = arena.allocate(40, 16).unwrap();
        assert!(is_zeroed(arena.get(a).unwrap()));
        // The gap in front of the header is cleared as well.
        let header_at = a.offset() - HEADER_SIZE;
        assert!(is_zeroed(&arena.as_bytes()[..header_at]));
    }

    #[test]
    fn reused_region_is_zeroed_again() {
        let mut buf = AlignedBuffer::<256>::zeroed();
        let mut arena = StackArena::new(buf.as_mut_slice());
        let a = arena.allocate(32, 8).unwrap();
        arena.get_mut(a).unwrap().fill(0x11);
        arena.pop();
        let b = arena.allocate(32, 8).unwrap();
        assert_eq!(a, b);
        assert!(is_zeroed(arena.get(b).unwrap()));
    }

    #[test]
    fn request_reaching_capacity_fails() {
        let mut buf = AlignedBuffer::<16>::zeroed();
        let mut arena = StackArena::new(buf.as_mut_slice());
        let err = arena.allocate(16, 1).unwrap_err();
        assert_eq!(
            err,
            ArenaError::OutOfMemory {
                requested: 16,
                padding: HEADER_SIZE,
                offset: 0,
                capacity: 16,
            }
        );
        assert_eq!(arena.offset(), 0);
    }

    #[test]
    fn exact_fit_is_rejected() {
        // header (24) + size (8) == capacity (32): the `>=` boundary rejects it.
        let mut buf = AlignedBuffer::<32>::zeroed();
        let mut arena = StackArena::new(buf.as_mut_slice());
        assert!(arena.allocate(8, 8).is_err());
        // One byte less fits.
        assert!(arena.allocate(7, 1).is_ok());
        assert_eq!(arena.offset(), 31);
    }

    #[test]
    fn failed_allocation_leaves_state_unchanged() {
        let mut buf = AlignedBuffer::<128>::filled(0x42);
        let mut arena = StackArena::new(buf.as_mut_slice());
        let a = arena.allocate(8, 8).unwrap();
        let offset = arena.offset();
        let snapshot = arena.as_bytes().to_vec();

        assert!(arena.allocate(200, 8).is_err());
        assert_eq!(arena.offset(), offset);
        assert_eq!(arena.top(), Some(a));
        assert_eq!(arena.as_bytes(), snapshot.as_slice());
    }

    #[test]
    fn huge_request_reports_out_of_memory_instead_of_overflowing() {
        let mut buf = AlignedBuffer::<64>::zeroed();
        let mut arena = StackArena::new(buf.as_mut_slice());
        let err = arena.allocate(usize::MAX, 8).unwrap_err();
        assert!(matches!(err, ArenaError::OutOfMemory { .. }));
    }

    #[test]
    #[traced_test]
    fn out_of_memory_is_logged() {
        let mut buf = AlignedBuffer::<16>::zeroed();
        let mut arena = StackArena::new(buf.as_mut_slice());
        let _ = arena.allocate(16, 1);
        assert!(logs_contain("stack arena out of memory"));
    }

    #[test]
    fn oversized_alignment_is_clamped_to_max() {
        let mut buf_a = AlignedBuffer::<1024>::zeroed();
        let mut buf_b = AlignedBuffer::<1024>::zeroed();
        let mut clamped = StackArena::new(buf_a.as_mut_slice());
        let mut maximal = StackArena::new(buf_b.as_mut_slice());

        clamped.allocate(3, 1).unwrap();
        maximal.allocate(3, 1).unwrap();
        let a = clamped.allocate(10, 256).unwrap();
        let b = maximal.allocate(10, MAX_ALIGNMENT).unwrap();

        assert_eq!(a, b);
        assert_eq!(clamped.offset(), maximal.offset());
        let addr = clamped.get(a).unwrap().as_ptr().addr();
        assert_eq!(addr % 128, 0);
    }

    #[test]
    #[should_panic(expected = "not a power of two")]
    fn non_power_of_two_alignment_panics() {
        let mut buf = AlignedBuffer::<64>::zeroed();
        let mut arena = StackArena::new(buf.as_mut_slice());
        let _ = arena.allocate(4, 3);
    }

    #[test]
    fn configured_ceiling_clamps_lower() {
        let mut buf = AlignedBuffer::<256>::zeroed();
        let config = ArenaConfig {
            max_alignment: 16,
            default_alignment: 4,
        };
        let mut arena = StackArena::with_config(buf.as_mut_slice(), &config).unwrap();
        // Clamped to 16: the 24-byte header needs a 32-byte gap, not 64.
        let a = arena.allocate(1, 64).unwrap();
        assert_eq!(a.offset(), 32);
        assert_eq!(arena.max_alignment(), 16);
        assert_eq!(arena.default_alignment(), 4);
    }

    #[test]
    fn with_config_rejects_invalid_config() {
        let mut buf = AlignedBuffer::<64>::zeroed();
        let config = ArenaConfig {
            max_alignment: 12,
            default_alignment: 4,
        };
        assert!(matches!(
            StackArena::with_config(buf.as_mut_slice(), &config),
            Err(ArenaError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn allocate_bytes_uses_default_alignment() {
        let mut buf = AlignedBuffer::<256>::zeroed();
        let mut arena = StackArena::new(buf.as_mut_slice());
        arena.allocate(1, 1).unwrap();
        let a = arena.allocate_bytes(4).unwrap();
        assert_eq!(a.offset() % 8, 0);
    }

    #[test]
    fn allocate_array_uses_type_layout() {
        let mut buf = AlignedBuffer::<256>::zeroed();
        let mut arena = StackArena::new(buf.as_mut_slice());
        arena.allocate(1, 1).unwrap();
        let a = arena.allocate_array::<u64>(4).unwrap();
        assert_eq!(a.len(), 32);
        assert_eq!(a.offset() % mem::align_of::<u64>(), 0);
    }

    #[test]
    fn allocate_array_overflow_is_an_error() {
        let mut buf = AlignedBuffer::<64>::zeroed();
        let mut arena = StackArena::new(buf.as_mut_slice());
        let err = arena.allocate_array::<u64>(usize::MAX).unwrap_err();
        assert_eq!(
            err,
            ArenaError::LayoutOverflow {
                count: usize::MAX,
                element_size: 8,
            }
        );
        assert_eq!(arena.offset(), 0);
    }

    #[test]
    fn allocate_slice_returns_zeroed_payload() {
        let mut buf = AlignedBuffer::<128>::filled(0x77);
        let mut arena = StackArena::new(buf.as_mut_slice());
        let slice = arena.allocate_slice(12, 4).unwrap();
        assert_eq!(slice.len(), 12);
        assert!(is_zeroed(slice));
        slice[0] = 1;
        assert_eq!(arena.depth(), 1);
    }

    #[test]
    fn zero_size_allocation_still_takes_a_header() {
        let mut buf = AlignedBuffer::<64>::zeroed();
        let mut arena = StackArena::new(buf.as_mut_slice());
        let a = arena.allocate(0, 8).unwrap();
        assert!(a.is_empty());
        assert_eq!(arena.offset(), HEADER_SIZE);
        assert_eq!(arena.get(a), Some(&[][..]));
        arena.pop();
        assert!(arena.is_empty());
    }

    #[test]
    fn get_rejects_released_handles() {
        let mut buf = AlignedBuffer::<256>::zeroed();
        let mut arena = StackArena::new(buf.as_mut_slice());
        let a = arena.allocate(8, 8).unwrap();
        let b = arena.allocate(8, 8).unwrap();
        arena.pop();
        assert!(arena.get(b).is_none());
        assert!(arena.get_mut(b).is_none());
        assert!(arena.get(a).is_some());
        arena.reset();
        assert!(arena.get(a).is_none());
    }

    #[test]
    fn top_and_allocations_walk_newest_first() {
        let mut buf = AlignedBuffer::<512>::zeroed();
        let mut arena = StackArena::new(buf.as_mut_slice());
        let a = arena.allocate(5, 1).unwrap();
        let b = arena.allocate(17, 16).unwrap();
        let c = arena.allocate(0, 64).unwrap();

        assert_eq!(arena.top(), Some(c));
        let live: Vec<_> = arena.allocations().collect();
        assert_eq!(live, vec![c, b, a]);
        assert_eq!(arena.depth(), 3);

        arena.pop();
        assert_eq!(arena.top(), Some(b));
        assert_eq!(arena.allocations().collect::<Vec<_>>(), vec![b, a]);
    }

    #[test]
    fn reset_releases_everything_and_zeroes() {
        let mut buf = AlignedBuffer::<256>::zeroed();
        let mut arena = StackArena::new(buf.as_mut_slice());
        for _ in 0..4 {
            let a = arena.allocate(9, 4).unwrap();
            arena.get_mut(a).unwrap().fill(0xAB);
        }
        arena.reset();
        assert!(arena.is_empty());
        assert_eq!(arena.top(), None);
        assert!(is_zeroed(arena.as_bytes()));
    }

    #[test]
    fn into_inner_returns_buffer_with_payload() {
        let mut buf = AlignedBuffer::<64>::zeroed();
        let mut arena = StackArena::new(buf.as_mut_slice());
        let a = arena.allocate(4, 4).unwrap();
        arena.get_mut(a).unwrap().copy_from_slice(&[1, 2, 3, 4]);
        let bytes = arena.into_inner();
        assert_eq!(&bytes[a.range()], &[1, 2, 3, 4]);
    }

    #[test]
    fn debug_output_omits_buffer_contents() {
        let mut buf = AlignedBuffer::<64>::zeroed();
        let arena = StackArena::new(buf.as_mut_slice());
        let dbg = format!("{arena:?}");
        assert!(dbg.starts_with("StackArena { offset: 0"));
        assert!(dbg.contains("capacity: 64"));
    }
}
