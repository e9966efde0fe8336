//! Fixed-capacity LIFO stack arena with inline allocation headers.
//!
//! A [`StackArena`] borrows one contiguous byte buffer from its caller and
//! carves aligned, zero-filled allocations out of it in order. Allocations
//! are released strictly last-in-first-out with [`StackArena::pop`]; the
//! bookkeeping needed to undo each one lives in a small header written into
//! that allocation's own alignment gap.
//!
//! # Layout
//!
//! ```text
//! StackArena<'buf>
//! ├── buffer: &'buf mut [u8]      (borrowed, fixed capacity)
//! ├── offset                      (first free byte)
//! └── top                         (payload start of the newest allocation)
//!
//! [gap][header][payload A][gap][header][payload B] free...
//!               ^top(A)                ^top(B)     ^offset
//! ```
//!
//! # Guarantees
//!
//! - Returned payloads are aligned to the requested alignment (clamped to
//!   [`MAX_ALIGNMENT`]) in real memory, not just relative to the buffer.
//! - Allocate hands out zeroed bytes; pop and reset zero what they reclaim.
//! - A failed allocation changes nothing.
//! - No `unsafe`: all access is bounds-checked slicing.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod align;
pub mod config;
pub mod error;
pub mod handle;
pub mod header;
pub mod stack;

// Public re-exports for the primary API surface.
pub use align::{padding_with_header, DEFAULT_ALIGNMENT, MAX_ALIGNMENT};
pub use config::ArenaConfig;
pub use error::ArenaError;
pub use handle::Allocation;
pub use header::{AllocationHeader, HEADER_SIZE};
pub use stack::{Allocations, StackArena};
