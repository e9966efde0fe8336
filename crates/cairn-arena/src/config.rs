//! Arena configuration parameters.

use crate::align::{DEFAULT_ALIGNMENT, MAX_ALIGNMENT};
use crate::error::ArenaError;

/// Configuration for a [`StackArena`](crate::StackArena).
///
/// Controls the alignment ceiling and the alignment used by
/// [`StackArena::allocate_bytes`](crate::StackArena::allocate_bytes).
/// Validated at construction; all values are immutable after creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Largest alignment the arena honours, in bytes.
    ///
    /// Requests above this are clamped down to it. Default: 128.
    /// Must be a power of two and no larger than [`MAX_ALIGNMENT`].
    pub max_alignment: usize,

    /// Alignment used when the caller does not name one.
    ///
    /// Default: 8. Must be a power of two and no larger than `max_alignment`.
    pub default_alignment: usize,
}

impl ArenaConfig {
    /// Default alignment ceiling.
    pub const DEFAULT_MAX_ALIGNMENT: usize = MAX_ALIGNMENT;

    /// Default alignment for untyped byte allocations.
    pub const DEFAULT_ALIGNMENT: usize = DEFAULT_ALIGNMENT;

    /// Create a config with default values.
    pub fn new() -> Self {
        Self {
            max_alignment: Self::DEFAULT_MAX_ALIGNMENT,
            default_alignment: Self::DEFAULT_ALIGNMENT,
        }
    }

    /// Check that both alignments are usable.
    pub fn validate(&self) -> Result<(), ArenaError> {
        if !self.max_alignment.is_power_of_two() {
            return Err(ArenaError::InvalidConfig {
                reason: "max_alignment must be a power of two",
            });
        }
        if self.max_alignment > MAX_ALIGNMENT {
            return Err(ArenaError::InvalidConfig {
                reason: "max_alignment must not exceed 128",
            });
        }
        if !self.default_alignment.is_power_of_two() {
            return Err(ArenaError::InvalidConfig {
                reason: "default_alignment must be a power of two",
            });
        }
        if self.default_alignment > self.max_alignment {
            return Err(ArenaError::InvalidConfig {
                reason: "default_alignment must not exceed max_alignment",
            });
        }
        Ok(())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new()
    }
}
