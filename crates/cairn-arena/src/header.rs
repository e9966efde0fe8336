//! Inline allocation headers.
//!
//! Every live allocation has one [`AllocationHeader`] written into the
//! alignment gap directly in front of its payload. The layout is fixed and
//! independent of the host's pointer width:
//!
//! ```text
//! byte  0..8   previous_offset  u64 little-endian
//! byte  8..16  padding          u64 little-endian
//! byte 16..24  previous_top     u64 little-endian
//! ```
//!
//! Headers are encoded and decoded field by field; the arena never
//! reinterprets buffer bytes as a struct.

/// Encoded size of an [`AllocationHeader`] in bytes.
pub const HEADER_SIZE: usize = 24;

const PREVIOUS_OFFSET_AT: usize = 0;
const PADDING_AT: usize = 8;
const PREVIOUS_TOP_AT: usize = 16;

/// Bookkeeping needed to undo one allocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AllocationHeader {
    /// Arena offset immediately before the allocation was made.
    pub previous_offset: usize,
    /// Bytes inserted before the header to satisfy alignment, header excluded.
    pub padding: usize,
    /// Payload start of the allocation that was on top before this one,
    /// or 0 if the arena was empty.
    pub previous_top: usize,
}

impl AllocationHeader {
    /// Write this header into `dst`.
    ///
    /// # Panics
    ///
    /// Panics if `dst` is not exactly [`HEADER_SIZE`] bytes long.
    pub fn encode(&self, dst: &mut [u8]) {
        assert_eq!(dst.len(), HEADER_SIZE, "header slot has wrong length");
        write_u64(dst, PREVIOUS_OFFSET_AT, self.previous_offset as u64);
        write_u64(dst, PADDING_AT, self.padding as u64);
        write_u64(dst, PREVIOUS_TOP_AT, self.previous_top as u64);
    }

    /// Read a header back from `src`.
    ///
    /// # Panics
    ///
    /// Panics if `src` is not exactly [`HEADER_SIZE`] bytes long.
    pub fn decode(src: &[u8]) -> Self {
        assert_eq!(src.len(), HEADER_SIZE, "header slot has wrong length");
        Self {
            previous_offset: read_u64(src, PREVIOUS_OFFSET_AT) as usize,
            padding: read_u64(src, PADDING_AT) as usize,
            previous_top: read_u64(src, PREVIOUS_TOP_AT) as usize,
        }
    }

    /// Offset at which this header's reservation began, derived from its
    /// own position. Must equal `previous_offset` for an intact chain.
    pub(crate) fn reservation_start(&self, header_at: usize) -> Option<usize> {
        header_at.checked_sub(self.padding)
    }
}

fn write_u64(dst: &mut [u8], at: usize, value: u64) {
    dst[at..at + 8].copy_from_slice(&value.to_le_bytes());
}

fn read_u64(src: &[u8], at: usize) -> u64 {
    let mut word = [0u8; 8];
    word.copy_from_slice(&src[at..at + 8]);
    u64::from_le_bytes(word)
}
