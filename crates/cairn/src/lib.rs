//! Cairn: a fixed-capacity LIFO stack arena with its small companions.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Cairn sub-crates. For most users, adding `cairn` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use cairn::prelude::*;
//! use std::fmt::Write as _;
//!
//! let mut storage = vec![0u8; 1024];
//! let mut arena = StackArena::new(&mut storage);
//!
//! let scratch = arena.allocate(64, 16).unwrap();
//! assert_eq!(scratch.len(), 64);
//! assert!(arena.get(scratch).unwrap().iter().all(|&b| b == 0));
//!
//! let nested = arena.allocate_bytes(32).unwrap();
//! arena.get_mut(nested).unwrap().fill(0xAB);
//!
//! arena.pop();
//! arena.pop();
//! assert!(arena.is_empty());
//! assert_eq!(arena.offset(), 0);
//!
//! let axis = Vec3::X.cross(Vec3::Y);
//! let mut line = ByteString::new();
//! write!(line, "{axis}").unwrap();
//! assert_eq!(line.to_str_lossy(), "[   0.0000,    0.0000,    1.0000]");
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`arena`] | `cairn-arena` | `StackArena`, allocation headers, alignment helpers |
//! | [`math`] | `cairn-math` | `Vec3`, `Vec4`, `Mat3`, `Mat4` |
//! | [`text`] | `cairn-text` | `ByteString`, pose CSV records |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Stack arena and allocation bookkeeping (`cairn-arena`).
///
/// [`arena::StackArena`] is also available in the [`prelude`]; the header
/// layout and padding helper live here.
pub use cairn_arena as arena;

/// Vector and matrix math (`cairn-math`).
pub use cairn_math as math;

/// Byte strings and pose records (`cairn-text`).
///
/// [`text::ByteString`] loads and splits files; [`text::load_poses`] reads
/// pose CSV files into [`text::Pose`] values.
pub use cairn_text as text;

/// Common imports for typical Cairn usage.
///
/// ```rust
/// use cairn::prelude::*;
/// ```
pub mod prelude {
    // Arena
    pub use cairn_arena::{Allocation, ArenaConfig, ArenaError, StackArena};

    // Math
    pub use cairn_math::{Mat3, Mat4, Vec3, Vec4};

    // Text
    pub use cairn_text::{ByteString, Pose, TextError};
}
