//! Arena-specific error types.
//!
//! Allocation failures are reported with the shared
//! [`AllocError`](strand_core::AllocError) so they flow unchanged through
//! strategy handles into containers. [`ArenaError`] covers building the
//! buffers an arena runs over.

use std::error::Error;
use std::fmt;

/// Errors that can occur while configuring arena storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// Capacity must be non-zero.
    ZeroCapacity,
    /// Base alignment must be a power of two no larger than
    /// [`ArenaConfig::MAX_BASE_ALIGN`](crate::ArenaConfig::MAX_BASE_ALIGN).
    InvalidBaseAlign {
        /// The rejected alignment.
        align: usize,
    },
    /// `capacity + base_align` overflows `usize`.
    CapacityOverflow {
        /// The requested capacity in bytes.
        capacity: usize,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroCapacity => write!(f, "arena capacity must be non-zero"),
            Self::InvalidBaseAlign { align } => {
                write!(f, "invalid arena base alignment: {align}")
            }
            Self::CapacityOverflow { capacity } => {
                write!(f, "arena capacity {capacity} overflows with alignment slack")
            }
        }
    }
}

impl Error for ArenaError {}
