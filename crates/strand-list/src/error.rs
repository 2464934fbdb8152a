//! List-specific error types.

use std::convert::Infallible;
use std::error::Error;
use std::fmt;

use strand_core::AllocError;

/// Failure while building elements into a list with a fallible constructor.
///
/// Returned by the `try_*_with` family. Whichever variant is returned, the
/// operation has already been rolled back completely.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListError<E> {
    /// Node storage could not be obtained.
    Alloc(AllocError),
    /// The element constructor failed.
    Construct(E),
}

impl ListError<Infallible> {
    /// Narrow an error whose constructor cannot fail.
    pub fn into_alloc(self) -> AllocError {
        match self {
            Self::Alloc(err) => err,
            Self::Construct(never) => match never {},
        }
    }
}

impl<E> From<AllocError> for ListError<E> {
    fn from(err: AllocError) -> Self {
        Self::Alloc(err)
    }
}

impl<E: fmt::Display> fmt::Display for ListError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alloc(err) => write!(f, "node allocation failed: {err}"),
            Self::Construct(err) => write!(f, "element construction failed: {err}"),
        }
    }
}

impl<E: Error + 'static> Error for ListError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Alloc(err) => Some(err),
            Self::Construct(err) => Some(err),
        }
    }
}
