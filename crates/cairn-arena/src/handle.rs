//! Allocation handles.
//!
//! An [`Allocation`] names a payload byte range inside an arena's buffer.
//! It carries no borrow, so several can be held at once; the bytes are
//! reached through [`StackArena::get`](crate::StackArena::get) and
//! [`StackArena::get_mut`](crate::StackArena::get_mut), which reject
//! handles whose region has already been reclaimed.

use std::fmt;
use std::ops::Range;

/// Location of one payload within a [`StackArena`](crate::StackArena).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Allocation {
    /// Byte offset of the payload start within the arena's buffer.
    pub(crate) offset: usize,
    /// Payload length in bytes.
    pub(crate) len: usize,
}

impl Allocation {
    pub(crate) fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// Byte offset of the payload start within the arena's buffer.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether this is a zero-length allocation.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// One past the last payload byte.
    pub fn end(&self) -> usize {
        self.offset + self.len
    }

    /// The payload as a buffer index range.
    pub fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }
}

impl fmt::Display for Allocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Allocation(off={}, len={})", self.offset, self.len)
    }
}
