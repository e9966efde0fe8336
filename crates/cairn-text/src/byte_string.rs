//! Growable byte strings.

use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::TextError;

/// Capacity reserved by the first append into an empty string.
pub const INITIAL_CAPACITY: usize = 64;

/// A growable, non-NUL-terminated byte buffer.
///
/// Growth is explicit: the first append reserves [`INITIAL_CAPACITY`] bytes,
/// later appends double the capacity until the data fits. Allocation
/// failure is reported as [`TextError::OutOfMemory`] rather than aborting.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ByteString {
    bytes: Vec<u8>,
}

impl ByteString {
    /// An empty string with no storage.
    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Read a whole file into a new string.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, TextError> {
        let mut content = Self::new();
        content.read_file(path)?;
        Ok(content)
    }

    /// Replace this string's contents with the bytes of a file.
    ///
    /// An empty file is an error. On error the string is left unchanged.
    pub fn read_file(&mut self, path: impl AsRef<Path>) -> Result<(), TextError> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| TextError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if data.is_empty() {
            tracing::warn!(path = %path.display(), "file is empty");
            return Err(TextError::EmptyFile {
                path: path.to_path_buf(),
            });
        }
        tracing::debug!(path = %path.display(), bytes = data.len(), "loaded file");
        self.bytes = data;
        Ok(())
    }

    /// Ensure room for at least `capacity` bytes in total. Never shrinks.
    pub fn resize(&mut self, capacity: usize) -> Result<(), TextError> {
        if self.bytes.capacity() >= capacity {
            return Ok(());
        }
        let additional = capacity - self.bytes.len();
        self.bytes
            .try_reserve_exact(additional)
            .map_err(|source| TextError::OutOfMemory {
                requested: capacity,
                source: Some(source),
            })
    }

    /// Append `other`, growing by doubling.
    pub fn append(&mut self, other: &[u8]) -> Result<(), TextError> {
        if self.bytes.capacity() == 0 {
            self.resize(INITIAL_CAPACITY)?;
        }
        let needed = self
            .bytes
            .len()
            .checked_add(other.len())
            .ok_or(TextError::OutOfMemory {
                requested: usize::MAX,
                source: None,
            })?;
        let mut capacity = self.bytes.capacity();
        while capacity <= needed {
            capacity = capacity.checked_mul(2).ok_or(TextError::OutOfMemory {
                requested: needed,
                source: None,
            })?;
        }
        self.resize(capacity)?;
        self.bytes.extend_from_slice(other);
        Ok(())
    }

    /// Pieces between occurrences of `delimiter`.
    ///
    /// Empty pieces are dropped, so leading, trailing or repeated
    /// delimiters never produce empty records.
    pub fn split(&self, delimiter: u8) -> Vec<ByteString> {
        self.bytes
            .split(|&b| b == delimiter)
            .filter(|piece| !piece.is_empty())
            .map(ByteString::from)
            .collect()
    }

    /// Non-empty lines, accepting both `\n` and `\r\n` endings.
    pub fn lines(&self) -> Vec<ByteString> {
        self.bytes
            .split(|&b| b == b'\n')
            .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
            .filter(|line| !line.is_empty())
            .map(ByteString::from)
            .collect()
    }

    /// Drop the contents but keep the storage.
    pub fn reset(&mut self) {
        self.bytes.clear();
    }

    /// Whether the string holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Number of bytes held.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Bytes that fit without reallocating.
    pub fn capacity(&self) -> usize {
        self.bytes.capacity()
    }

    /// The contents.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The contents as text, replacing invalid UTF-8.
    pub fn to_str_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    /// Take the underlying bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl From<&[u8]> for ByteString {
    fn from(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
        }
    }
}

impl From<&str> for ByteString {
    fn from(text: &str) -> Self {
        Self::from(text.as_bytes())
    }
}

impl From<Vec<u8>> for ByteString {
    fn from(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl AsRef<[u8]> for ByteString {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Write for ByteString {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.append(s.as_bytes()).map_err(|_| fmt::Error)
    }
}

impl fmt::Display for ByteString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_str_lossy())
    }
}
