//! Test fixtures for Cairn development.
//!
//! Arena tests reason about exact padding, which depends on the address of
//! the buffer's first byte. [`AlignedBuffer`] pins that address to a
//! 128-byte boundary so offsets computed in a test are the offsets the arena
//! produces. The text fixtures provide small CSV inputs in the pose format.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{AlignedBuffer, POSE_CSV, POSE_CSV_DIRTY};

/// Whether every byte is zero.
pub fn is_zeroed(bytes: &[u8]) -> bool {
    bytes.iter().all(|&b| b == 0)
}
