//! The [`AllocStrategy`] trait.

use std::ptr::NonNull;

use crate::error::AllocError;

/// An injectable, reference-semantics allocation strategy.
///
/// A strategy handle is declared in terms of one value type
/// ([`Value`](AllocStrategy::Value)) and can be [rebound](AllocStrategy::rebind)
/// to allocate any other type from the same backing store. Containers use
/// this to turn a caller-supplied `A` for `T` into a handle for their
/// internal node type.
///
/// Allocation never runs a constructor and deallocation never runs a
/// destructor; both only move storage.
///
/// # Equality
///
/// `a == b` must hold iff storage obtained from `a` may be released through
/// `b`. For strategies backed by a store instance this is identity of the
/// store, never structural equality of its configuration. Clones and
/// rebinds of a handle compare equal to it.
///
/// # Propagation policy
///
/// The three `PROPAGATE_*` constants are properties of the strategy type,
/// not of any container. A container consults them to decide whether the
/// destination adopts the source's handle on copy-assignment,
/// move-assignment, and swap. All default to `false`.
pub trait AllocStrategy: Clone + PartialEq {
    /// The type this handle allocates storage for.
    type Value;

    /// The same strategy, allocating `U` instead.
    type Rebind<U>: AllocStrategy<Value = U>;

    /// Copy-assignment makes the destination adopt the source's handle.
    const PROPAGATE_ON_COPY_ASSIGN: bool = false;

    /// Move-assignment makes the destination adopt the source's handle.
    const PROPAGATE_ON_MOVE_ASSIGN: bool = false;

    /// Swapping two containers also swaps their handles.
    const PROPAGATE_ON_SWAP: bool = false;

    /// Obtain uninitialised storage for `count` values.
    ///
    /// The returned pointer is aligned for `Self::Value`. For zero-sized
    /// requests it may be dangling.
    fn allocate(&self, count: usize) -> Result<NonNull<Self::Value>, AllocError>;

    /// Release storage obtained from [`allocate`](AllocStrategy::allocate).
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by `allocate(count)` on a handle equal
    /// to `self`, must not have been released already, and must not hold a
    /// live value that still needs dropping.
    unsafe fn deallocate(&self, ptr: NonNull<Self::Value>, count: usize);

    /// A handle allocating `U` from the same backing store.
    fn rebind<U>(&self) -> Self::Rebind<U>;

    /// The handle a copy-constructed container should use.
    ///
    /// The default adopts the source's identity.
    fn select_on_copy(&self) -> Self {
        self.clone()
    }
}
