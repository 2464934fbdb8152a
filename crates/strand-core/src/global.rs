//! Heap-backed default strategy.
//!
//! [`Global`] forwards to the process-wide Rust allocator. Every `Global`
//! handle is interchangeable with every other, so it compares equal
//! regardless of its value type and freely propagates on move-assignment.

use std::alloc::{self, Layout};
use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::error::AllocError;
use crate::strategy::AllocStrategy;

/// Strategy allocating through [`std::alloc`].
pub struct Global<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> Global<T> {
    /// Create a handle.
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for Global<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Global<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Global<T> {}

impl<T, U> PartialEq<Global<U>> for Global<T> {
    fn eq(&self, _other: &Global<U>) -> bool {
        true
    }
}

impl<T> Eq for Global<T> {}

impl<T> fmt::Debug for Global<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Global")
    }
}

impl<T> AllocStrategy for Global<T> {
    type Value = T;
    type Rebind<U> = Global<U>;

    const PROPAGATE_ON_MOVE_ASSIGN: bool = true;

    fn allocate(&self, count: usize) -> Result<NonNull<T>, AllocError> {
        let layout = Layout::array::<T>(count).map_err(|_| AllocError::CapacityOverflow)?;
        if layout.size() == 0 {
            return Ok(NonNull::dangling());
        }
        // SAFETY: layout has a non-zero size.
        let ptr = unsafe { alloc::alloc(layout) };
        NonNull::new(ptr.cast::<T>()).ok_or(AllocError::Exhausted {
            layout_size: layout.size(),
        })
    }

    unsafe fn deallocate(&self, ptr: NonNull<T>, count: usize) {
        let Ok(layout) = Layout::array::<T>(count) else {
            return;
        };
        if layout.size() == 0 {
            return;
        }
        // SAFETY: the caller guarantees `ptr` came from `allocate(count)`,
        // which used this exact layout.
        unsafe { alloc::dealloc(ptr.as_ptr().cast::<u8>(), layout) }
    }

    fn rebind<U>(&self) -> Global<U> {
        Global::new()
    }
}
