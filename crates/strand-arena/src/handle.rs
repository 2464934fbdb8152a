//! Arena-backed allocation strategy handles.
//!
//! An [`ArenaHandle`] is the [`AllocStrategy`] face of an [`Arena`]. It is a
//! single shared reference plus a type marker: `Copy`, free to rebind, and
//! equal to another handle exactly when both reference the same arena
//! instance. Two distinct arenas of identical capacity never compare equal.

use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ptr::{self, NonNull};

use strand_core::{AllocError, AllocStrategy};

use crate::arena::Arena;

/// Strategy handle allocating `T` from a referenced [`Arena`].
///
/// Propagation policy: the handle never propagates on copy-assignment,
/// move-assignment, or swap, and a copy-constructed container adopts the
/// source's handle.
pub struct ArenaHandle<'a, T> {
    arena: &'a Arena<'a>,
    _marker: PhantomData<fn() -> T>,
}

impl<'a, T> ArenaHandle<'a, T> {
    /// Create a handle referencing `arena`.
    pub fn new(arena: &'a Arena<'a>) -> Self {
        Self {
            arena,
            _marker: PhantomData,
        }
    }

    /// The referenced arena.
    pub fn arena(&self) -> &'a Arena<'a> {
        self.arena
    }
}

impl<T> Clone for ArenaHandle<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ArenaHandle<'_, T> {}

impl<'a, T, U> PartialEq<ArenaHandle<'a, U>> for ArenaHandle<'a, T> {
    fn eq(&self, other: &ArenaHandle<'a, U>) -> bool {
        ptr::eq(self.arena, other.arena)
    }
}

impl<T> Eq for ArenaHandle<'_, T> {}

impl<T> fmt::Debug for ArenaHandle<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArenaHandle")
            .field("arena", &(self.arena as *const Arena<'_>))
            .field("value", &std::any::type_name::<T>())
            .finish()
    }
}

impl<'a, T> AllocStrategy for ArenaHandle<'a, T> {
    type Value = T;
    type Rebind<U> = ArenaHandle<'a, U>;

    fn allocate(&self, count: usize) -> Result<NonNull<T>, AllocError> {
        let size = mem::size_of::<T>()
            .checked_mul(count)
            .ok_or(AllocError::CapacityOverflow)?;
        self.arena
            .allocate(size, mem::align_of::<T>())
            .map(NonNull::cast)
    }

    unsafe fn deallocate(&self, ptr: NonNull<T>, count: usize) {
        self.arena
            .deallocate(ptr.cast(), mem::size_of::<T>().saturating_mul(count));
    }

    fn rebind<U>(&self) -> ArenaHandle<'a, U> {
        ArenaHandle::new(self.arena)
    }
}
