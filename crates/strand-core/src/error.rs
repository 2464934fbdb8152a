//! Allocation error types.

use std::error::Error;
use std::fmt;

/// Errors returned by [`AllocStrategy::allocate`](crate::AllocStrategy::allocate).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllocError {
    /// The backing store cannot fit the request.
    OutOfSpace {
        /// Number of bytes requested (before alignment padding).
        requested: usize,
        /// Bytes still available in the backing store.
        remaining: usize,
    },
    /// `count * size_of::<T>()` does not fit in a `Layout`.
    CapacityOverflow,
    /// The requested alignment is not a power of two.
    InvalidAlignment {
        /// The rejected alignment.
        align: usize,
    },
    /// The global allocator returned null.
    Exhausted {
        /// Size of the layout that could not be served.
        layout_size: usize,
    },
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfSpace {
                requested,
                remaining,
            } => {
                write!(
                    f,
                    "out of space: requested {requested} bytes, {remaining} bytes remaining"
                )
            }
            Self::CapacityOverflow => write!(f, "allocation size overflows a layout"),
            Self::InvalidAlignment { align } => {
                write!(f, "alignment {align} is not a power of two")
            }
            Self::Exhausted { layout_size } => {
                write!(f, "global allocator failed to serve {layout_size} bytes")
            }
        }
    }
}

impl Error for AllocError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_space_display_names_both_sizes() {
        let err = AllocError::OutOfSpace {
            requested: 24,
            remaining: 8,
        };
        assert_eq!(
            err.to_string(),
            "out of space: requested 24 bytes, 8 bytes remaining"
        );
    }

    #[test]
    fn errors_are_comparable() {
        assert_eq!(AllocError::CapacityOverflow, AllocError::CapacityOverflow);
        assert_ne!(
            AllocError::CapacityOverflow,
            AllocError::Exhausted { layout_size: 8 }
        );
    }
}
