//! Arena-specific error types.

use thiserror::Error;

/// Errors that can occur during arena operations.
///
/// None of these leave the arena in a modified state: a failed call is
/// observably identical to no call at all.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ArenaError {
    /// The request does not fit in the remaining capacity.
    #[error(
        "arena out of memory: requested {requested} bytes (+{padding} padding) at offset {offset}, capacity {capacity} bytes"
    )]
    OutOfMemory {
        /// Payload bytes requested.
        requested: usize,
        /// Alignment padding (including the header) the request needed.
        padding: usize,
        /// Arena offset at the time of the request.
        offset: usize,
        /// Total capacity of the arena's buffer.
        capacity: usize,
    },
    /// An [`ArenaConfig`](crate::ArenaConfig) failed validation.
    #[error("invalid arena config: {reason}")]
    InvalidConfig {
        /// Which constraint was violated.
        reason: &'static str,
    },
    /// A typed array request whose byte size does not fit in `usize`.
    #[error("array layout overflow: {count} elements of {element_size} bytes")]
    LayoutOverflow {
        /// Number of elements requested.
        count: usize,
        /// Size of one element in bytes.
        element_size: usize,
    },
}
