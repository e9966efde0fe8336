//! Growable byte strings, delimiter splitting and CSV pose records.
//!
//! [`ByteString`] is a byte buffer that is not NUL-terminated and not
//! required to be UTF-8. It loads whole files, splits on a delimiter byte,
//! and implements [`std::fmt::Write`] so math values can be appended with
//! `write!`. The [`pose`] module builds on it to read pose CSV files.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod byte_string;
pub mod error;
pub mod pose;

pub use byte_string::ByteString;
pub use error::TextError;
pub use pose::{load_poses, parse_poses, Pose};
