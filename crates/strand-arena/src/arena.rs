//! Bump-pointer arena over a borrowed fixed-size buffer.
//!
//! [`Arena`] carves aligned sub-ranges out of a buffer it borrows
//! exclusively for `'buf`. Allocation advances a single offset; the offset
//! never moves backwards, so every region handed out is disjoint from every
//! region handed out before it. There is no reset and no reuse.

use std::cell::Cell;
use std::fmt;
use std::marker::PhantomData;
use std::mem::MaybeUninit;
use std::ptr::NonNull;

use strand_core::AllocError;

use crate::handle::ArenaHandle;

/// Fixed-capacity bump allocator.
///
/// The arena is deliberately neither `Clone` nor `Copy`: two arenas sharing
/// one buffer would hand out overlapping regions. Share it by reference,
/// usually through [`ArenaHandle`].
///
/// The offset lives in a [`Cell`], so allocation only needs `&self` and the
/// arena is `!Sync`. All handles of one arena must be used from one thread.
pub struct Arena<'buf> {
    /// First byte of the borrowed buffer.
    base: NonNull<u8>,
    /// Length of the borrowed buffer in bytes.
    capacity: usize,
    /// Bump pointer: bytes consumed so far, padding included.
    offset: Cell<usize>,
    /// Successful `allocate` calls.
    allocations: Cell<usize>,
    _buf: PhantomData<&'buf mut [MaybeUninit<u8>]>,
}

impl<'buf> Arena<'buf> {
    /// Create an arena serving allocations from `buf`.
    ///
    /// The buffer stays borrowed until the arena is dropped.
    pub fn new(buf: &'buf mut [MaybeUninit<u8>]) -> Self {
        let capacity = buf.len();
        Self {
            base: NonNull::from(buf).cast::<u8>(),
            capacity,
            offset: Cell::new(0),
            allocations: Cell::new(0),
            _buf: PhantomData,
        }
    }

    /// Claim `size` bytes aligned to `align`.
    ///
    /// The current position is rounded up to the next address that is a
    /// multiple of `align`, then `size` bytes are claimed from there. If the
    /// rounded position plus `size` would pass the end of the buffer the
    /// request fails with [`AllocError::OutOfSpace`] and the offset is left
    /// untouched.
    ///
    /// The returned region is uninitialised.
    pub fn allocate(&self, size: usize, align: usize) -> Result<NonNull<u8>, AllocError> {
        if !align.is_power_of_two() {
            return Err(AllocError::InvalidAlignment { align });
        }
        let offset = self.offset.get();
        let addr = (self.base.as_ptr() as usize).wrapping_add(offset);
        let padding = addr.wrapping_neg() & (align - 1);

        let end = offset
            .checked_add(padding)
            .and_then(|start| start.checked_add(size))
            .filter(|&end| end <= self.capacity);
        let Some(end) = end else {
            return Err(AllocError::OutOfSpace {
                requested: size,
                remaining: self.remaining(),
            });
        };

        let start = end - size;
        self.offset.set(end);
        self.allocations.set(self.allocations.get() + 1);
        // SAFETY: start <= end <= capacity, so the pointer stays inside (or
        // one past the end of) the borrowed buffer.
        Ok(unsafe { NonNull::new_unchecked(self.base.as_ptr().add(start)) })
    }

    /// Claim a region described by `layout`.
    pub fn allocate_layout(&self, layout: std::alloc::Layout) -> Result<NonNull<u8>, AllocError> {
        self.allocate(layout.size(), layout.align())
    }

    /// Release a region. Always a no-op: space is reclaimed only when the
    /// arena is dropped.
    pub fn deallocate(&self, _ptr: NonNull<u8>, _size: usize) {}

    /// A strategy handle allocating `T` from this arena.
    pub fn handle<T>(&self) -> ArenaHandle<'_, T> {
        ArenaHandle::new(self)
    }

    /// Total buffer size in bytes.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes consumed so far, alignment padding included.
    pub fn used(&self) -> usize {
        self.offset.get()
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.capacity - self.offset.get()
    }

    /// Number of successful allocations.
    pub fn allocation_count(&self) -> usize {
        self.allocations.get()
    }

    /// Whether `ptr` points into this arena's buffer.
    pub fn contains(&self, ptr: NonNull<u8>) -> bool {
        let base = self.base.as_ptr() as usize;
        let addr = ptr.as_ptr() as usize;
        addr >= base && addr < base + self.capacity
    }
}

impl fmt::Debug for Arena<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("capacity", &self.capacity)
            .field("used", &self.used())
            .field("allocations", &self.allocation_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StackStorage;
    use proptest::prelude::*;
    use std::alloc::Layout;

    #[test]
    fn sequential_allocs_are_contiguous_when_aligned() {
        let mut storage = StackStorage::<64>::new();
        let arena = storage.arena();
        let a = arena.allocate(8, 8).unwrap();
        let b = arena.allocate(8, 8).unwrap();
        assert_eq!(b.as_ptr() as usize - a.as_ptr() as usize, 8);
        assert_eq!(arena.used(), 16);
        assert_eq!(arena.allocation_count(), 2);
    }

    #[test]
    fn alignment_padding_is_consumed() {
        let mut storage = StackStorage::<64>::new();
        let arena = storage.arena();
        arena.allocate(1, 1).unwrap();
        let p = arena.allocate(8, 8).unwrap();
        assert_eq!(p.as_ptr() as usize % 8, 0);
        assert_eq!(arena.used(), 16);
    }

    #[test]
    fn exhaustion_reports_out_of_space_and_keeps_offset() {
        let mut storage = StackStorage::<32>::new();
        let arena = storage.arena();
        arena.allocate(24, 8).unwrap();
        let err = arena.allocate(16, 8).unwrap_err();
        assert_eq!(
            err,
            AllocError::OutOfSpace {
                requested: 16,
                remaining: 8,
            }
        );
        assert_eq!(arena.used(), 24);
        assert!(arena.allocate(8, 8).is_ok());
        assert_eq!(arena.remaining(), 0);
    }

    #[test]
    fn padding_alone_can_exhaust() {
        let mut storage = StackStorage::<16>::new();
        let arena = storage.arena();
        arena.allocate(9, 1).unwrap();
        // 9 -> 16 after padding, no room for 8 more bytes.
        assert!(arena.allocate(8, 8).is_err());
        assert_eq!(arena.used(), 9);
    }

    #[test]
    fn layout_request_matches_size_and_align_request() {
        let mut storage = StackStorage::<32>::new();
        let arena = storage.arena();
        arena.allocate(1, 1).unwrap();

        let p = arena.allocate_layout(Layout::new::<u64>()).unwrap();
        assert_eq!(p.as_ptr() as usize % 8, 0);
        assert_eq!(arena.used(), 16);

        let q = arena.allocate(8, 8).unwrap();
        assert_eq!(q.as_ptr() as usize - p.as_ptr() as usize, 8);
        assert_eq!(arena.used(), 24);
        assert_eq!(arena.allocation_count(), 3);
    }

    #[test]
    fn oversized_layout_is_out_of_space() {
        let mut storage = StackStorage::<32>::new();
        let arena = storage.arena();
        arena.allocate(4, 4).unwrap();
        let err = arena.allocate_layout(Layout::new::<[u64; 8]>()).unwrap_err();
        assert_eq!(
            err,
            AllocError::OutOfSpace {
                requested: 64,
                remaining: 28,
            }
        );
        assert_eq!(arena.used(), 4);
        assert_eq!(arena.allocation_count(), 1);
    }

    #[test]
    fn exact_fit_succeeds() {
        let mut storage = StackStorage::<48>::new();
        let arena = storage.arena();
        assert!(arena.allocate(48, 16).is_ok());
        assert_eq!(arena.remaining(), 0);
    }

    #[test]
    fn zero_size_alloc_is_valid() {
        let mut storage = StackStorage::<16>::new();
        let arena = storage.arena();
        let p = arena.allocate(0, 4).unwrap();
        assert!(arena.contains(p));
        assert_eq!(arena.used(), 0);
    }

    #[test]
    fn invalid_alignment_rejected() {
        let mut storage = StackStorage::<16>::new();
        let arena = storage.arena();
        assert_eq!(
            arena.allocate(4, 3),
            Err(AllocError::InvalidAlignment { align: 3 })
        );
        assert_eq!(arena.allocation_count(), 0);
    }

    #[test]
    fn deallocate_never_reclaims() {
        let mut storage = StackStorage::<32>::new();
        let arena = storage.arena();
        let p = arena.allocate(16, 8).unwrap();
        arena.deallocate(p, 16);
        assert_eq!(arena.used(), 16);
        let q = arena.allocate(16, 8).unwrap();
        assert_ne!(p, q);
    }

    #[test]
    fn unaligned_external_buffer_is_handled() {
        let mut buf = [MaybeUninit::<u8>::uninit(); 40];
        // Start one byte in so the base address is odd.
        let arena = Arena::new(&mut buf[1..]);
        let p = arena.allocate(8, 8).unwrap();
        assert_eq!(p.as_ptr() as usize % 8, 0);
        assert!(arena.contains(p));
    }

    #[test]
    fn debug_shows_usage() {
        let mut storage = StackStorage::<16>::new();
        let arena = storage.arena();
        arena.allocate(4, 4).unwrap();
        assert_eq!(
            format!("{arena:?}"),
            "Arena { capacity: 16, used: 4, allocations: 1 }"
        );
    }

    proptest! {
        #[test]
        fn regions_are_aligned_disjoint_and_monotonic(
            requests in proptest::collection::vec((0usize..64, 0u32..5), 1..40),
        ) {
            let mut storage = StackStorage::<1024>::new();
            let arena = storage.arena();
            let mut last_end = 0usize;
            let base = arena.base.as_ptr() as usize;
            for (size, align_pow) in requests {
                let align = 1usize << align_pow;
                let before = arena.used();
                match arena.allocate(size, align) {
                    Ok(p) => {
                        let start = p.as_ptr() as usize - base;
                        prop_assert_eq!(p.as_ptr() as usize % align, 0);
                        prop_assert!(start >= last_end);
                        prop_assert!(start + size <= arena.capacity());
                        last_end = start + size;
                        prop_assert_eq!(arena.used(), last_end);
                    }
                    Err(AllocError::OutOfSpace { requested, .. }) => {
                        prop_assert_eq!(requested, size);
                        prop_assert_eq!(arena.used(), before);
                    }
                    Err(other) => prop_assert!(false, "unexpected error {other:?}"),
                }
                prop_assert!(arena.used() <= arena.capacity());
            }
        }
    }
}
