//! Element type with scripted construction failures.
//!
//! A [`Tracker`] hands out [`Flaky`] values and counts constructions and
//! drops. It can be armed to fail its k-th construction attempt: through
//! [`Tracker::make`] that surfaces as a [`ConstructError`], through
//! `Flaky::clone` as a panic.

use std::cell::Cell;
use std::error::Error;
use std::fmt;
use std::rc::Rc;

/// Construction counter shared by every [`Flaky`] it made.
#[derive(Debug, Default)]
pub struct Tracker {
    attempts: Cell<usize>,
    constructed: Cell<usize>,
    dropped: Cell<usize>,
    fail_on: Cell<Option<usize>>,
}

impl Tracker {
    /// A tracker that never fails.
    pub fn new() -> Rc<Self> {
        Rc::default()
    }

    /// A tracker whose `attempt`-th construction (1-based) fails.
    pub fn failing_on(attempt: usize) -> Rc<Self> {
        let tracker = Self::new();
        tracker.fail_on.set(Some(attempt));
        tracker
    }

    /// Re-arm (or disarm) the failure, counting from the attempts so far.
    pub fn fail_after(&self, further: Option<usize>) {
        self.fail_on
            .set(further.map(|n| self.attempts.get() + n));
    }

    /// Construct a value, or fail if this is the armed attempt.
    pub fn make(self: &Rc<Self>, value: u32) -> Result<Flaky, ConstructError> {
        let attempt = self.attempts.get() + 1;
        self.attempts.set(attempt);
        if self.fail_on.get() == Some(attempt) {
            return Err(ConstructError { attempt });
        }
        self.constructed.set(self.constructed.get() + 1);
        Ok(Flaky {
            value,
            tracker: Rc::clone(self),
        })
    }

    pub fn attempts(&self) -> usize {
        self.attempts.get()
    }

    pub fn constructed(&self) -> usize {
        self.constructed.get()
    }

    pub fn dropped(&self) -> usize {
        self.dropped.get()
    }

    /// Values constructed and not yet dropped.
    pub fn live(&self) -> usize {
        self.constructed.get() - self.dropped.get()
    }
}

/// The armed construction attempt was reached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstructError {
    pub attempt: usize,
}

impl fmt::Display for ConstructError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "construction attempt {} failed", self.attempt)
    }
}

impl Error for ConstructError {}

/// A tracked value.
pub struct Flaky {
    value: u32,
    tracker: Rc<Tracker>,
}

impl Flaky {
    pub fn value(&self) -> u32 {
        self.value
    }
}

impl Clone for Flaky {
    /// # Panics
    ///
    /// Panics on the tracker's armed attempt.
    fn clone(&self) -> Self {
        self.tracker
            .make(self.value)
            .unwrap_or_else(|err| panic!("{err}"))
    }
}

impl Drop for Flaky {
    fn drop(&mut self) {
        self.tracker.dropped.set(self.tracker.dropped.get() + 1);
    }
}

impl PartialEq for Flaky {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl fmt::Debug for Flaky {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Flaky").field(&self.value).finish()
    }
}
