//! Error types for byte strings and record parsing.

use std::collections::TryReserveError;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors from loading, growing or parsing text.
#[derive(Debug, Error)]
pub enum TextError {
    /// The file could not be opened or read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The file exists but holds no bytes.
    #[error("file {} is empty", .path.display())]
    EmptyFile {
        /// File that was empty.
        path: PathBuf,
    },
    /// The allocator refused to grow the buffer.
    #[error("out of memory growing byte string to {requested} bytes")]
    OutOfMemory {
        /// Capacity that was requested.
        requested: usize,
        /// Allocator error, when one was produced.
        #[source]
        source: Option<TryReserveError>,
    },
    /// The input contained no non-empty lines.
    #[error("no records found")]
    NoRecords,
    /// A record had the wrong number of fields.
    #[error("record {record}: expected {expected} fields, found {found}")]
    FieldCount {
        /// 1-based index among non-empty lines.
        record: usize,
        /// Fields required.
        expected: usize,
        /// Fields present.
        found: usize,
    },
    /// A field could not be parsed as the expected number type.
    #[error("record {record}, column {column}: invalid value {value:?}")]
    InvalidField {
        /// 1-based index among non-empty lines.
        record: usize,
        /// 1-based column.
        column: usize,
        /// The offending text, lossily decoded.
        value: String,
    },
}
