//! Arena configuration parameters.

use crate::error::ArenaError;

/// Configuration for heap-backed arena storage.
///
/// Controls the size and base alignment of the buffer built by
/// [`ArenaStorage::new`](crate::ArenaStorage::new). Validated at
/// construction; the resulting storage never grows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Usable capacity in bytes.
    ///
    /// Default: 65_536 (64KB). The owner picks it to bound every allocation
    /// made over the arena's lifetime, live or dead.
    pub capacity: usize,

    /// Alignment of the first usable byte.
    ///
    /// Default: 16. Must be a power of two no larger than
    /// [`MAX_BASE_ALIGN`](Self::MAX_BASE_ALIGN). Requests with an alignment
    /// up to this value never pay leading padding on an empty arena.
    pub base_align: usize,
}

impl ArenaConfig {
    /// Default capacity: 64KB.
    pub const DEFAULT_CAPACITY: usize = 64 * 1024;

    /// Default base alignment.
    pub const DEFAULT_BASE_ALIGN: usize = 16;

    /// Largest supported base alignment (one page).
    pub const MAX_BASE_ALIGN: usize = 4096;

    /// Create a config for the given capacity with the default alignment.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            base_align: Self::DEFAULT_BASE_ALIGN,
        }
    }

    /// Override the base alignment.
    pub fn with_base_align(mut self, base_align: usize) -> Self {
        self.base_align = base_align;
        self
    }

    /// Check the parameters.
    pub fn validate(&self) -> Result<(), ArenaError> {
        if self.capacity == 0 {
            return Err(ArenaError::ZeroCapacity);
        }
        if !self.base_align.is_power_of_two() || self.base_align > Self::MAX_BASE_ALIGN {
            return Err(ArenaError::InvalidBaseAlign {
                align: self.base_align,
            });
        }
        if self.capacity.checked_add(self.base_align).is_none() {
            return Err(ArenaError::CapacityOverflow {
                capacity: self.capacity,
            });
        }
        Ok(())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
