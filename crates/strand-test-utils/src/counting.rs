//! Ledger-keeping allocation strategy.
//!
//! Every handle produced from one [`CountingAlloc::new`] call (by cloning or
//! rebinding) shares one [`Ledger`]. Handles compare equal iff they share a
//! ledger, so two independently created `CountingAlloc`s behave like two
//! distinct arenas: storage from one may not be released through the other,
//! and the ledger panics if that happens.

use std::cell::RefCell;
use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;
use std::rc::Rc;

use indexmap::IndexMap;
use strand_core::{AllocError, AllocStrategy, Global};

/// Propagation policy selected at the type level.
pub trait Propagation: 'static {
    const COPY_ASSIGN: bool;
    const MOVE_ASSIGN: bool;
    const SWAP: bool;
    /// A copy-constructed container gets a handle with a fresh ledger.
    const FRESH_ON_COPY: bool = false;
}

/// Never propagate; copies share the source's ledger.
#[derive(Debug)]
pub enum NeverPropagate {}

impl Propagation for NeverPropagate {
    const COPY_ASSIGN: bool = false;
    const MOVE_ASSIGN: bool = false;
    const SWAP: bool = false;
}

/// Propagate on copy-assignment, move-assignment, and swap.
#[derive(Debug)]
pub enum AlwaysPropagate {}

impl Propagation for AlwaysPropagate {
    const COPY_ASSIGN: bool = true;
    const MOVE_ASSIGN: bool = true;
    const SWAP: bool = true;
}

/// Never propagate; copy construction selects a new, independent ledger.
#[derive(Debug)]
pub enum FreshOnCopy {}

impl Propagation for FreshOnCopy {
    const COPY_ASSIGN: bool = false;
    const MOVE_ASSIGN: bool = false;
    const SWAP: bool = false;
    const FRESH_ON_COPY: bool = true;
}

/// Shared allocation record.
#[derive(Debug, Default)]
pub struct Ledger {
    /// Live blocks: address → size in bytes.
    live: IndexMap<usize, usize>,
    allocations: usize,
    deallocations: usize,
    limit: Option<usize>,
}

/// Heap strategy that records every allocation.
pub struct CountingAlloc<T, P: Propagation = NeverPropagate> {
    ledger: Rc<RefCell<Ledger>>,
    _marker: PhantomData<(fn() -> T, P)>,
}

impl<T, P: Propagation> CountingAlloc<T, P> {
    /// A handle with a fresh, unlimited ledger.
    pub fn new() -> Self {
        Self::with_ledger(Rc::default())
    }

    /// A handle whose ledger refuses every allocation after `limit`
    /// successful ones.
    pub fn with_limit(limit: usize) -> Self {
        let alloc = Self::new();
        alloc.set_limit(Some(limit));
        alloc
    }

    fn with_ledger(ledger: Rc<RefCell<Ledger>>) -> Self {
        Self {
            ledger,
            _marker: PhantomData,
        }
    }

    /// Change the allocation budget. Counts already made stay counted.
    pub fn set_limit(&self, limit: Option<usize>) {
        self.ledger.borrow_mut().limit = limit;
    }

    /// Successful allocations so far.
    pub fn allocations(&self) -> usize {
        self.ledger.borrow().allocations
    }

    /// Deallocations so far.
    pub fn deallocations(&self) -> usize {
        self.ledger.borrow().deallocations
    }

    /// Blocks currently outstanding.
    pub fn live(&self) -> usize {
        self.ledger.borrow().live.len()
    }

    /// Bytes currently outstanding.
    pub fn live_bytes(&self) -> usize {
        self.ledger.borrow().live.values().sum()
    }

    /// Every allocation has been matched by a deallocation.
    pub fn is_balanced(&self) -> bool {
        let ledger = self.ledger.borrow();
        ledger.live.is_empty() && ledger.allocations == ledger.deallocations
    }
}

impl<T, P: Propagation> Default for CountingAlloc<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P: Propagation> Clone for CountingAlloc<T, P> {
    fn clone(&self) -> Self {
        Self::with_ledger(Rc::clone(&self.ledger))
    }
}

impl<T, U, P: Propagation> PartialEq<CountingAlloc<U, P>> for CountingAlloc<T, P> {
    fn eq(&self, other: &CountingAlloc<U, P>) -> bool {
        Rc::ptr_eq(&self.ledger, &other.ledger)
    }
}

impl<T, P: Propagation> Eq for CountingAlloc<T, P> {}

impl<T, P: Propagation> fmt::Debug for CountingAlloc<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ledger = self.ledger.borrow();
        f.debug_struct("CountingAlloc")
            .field("live", &ledger.live.len())
            .field("allocations", &ledger.allocations)
            .field("deallocations", &ledger.deallocations)
            .finish()
    }
}

impl<T, P: Propagation> AllocStrategy for CountingAlloc<T, P> {
    type Value = T;
    type Rebind<U> = CountingAlloc<U, P>;

    const PROPAGATE_ON_COPY_ASSIGN: bool = P::COPY_ASSIGN;
    const PROPAGATE_ON_MOVE_ASSIGN: bool = P::MOVE_ASSIGN;
    const PROPAGATE_ON_SWAP: bool = P::SWAP;

    fn allocate(&self, count: usize) -> Result<NonNull<T>, AllocError> {
        let mut ledger = self.ledger.borrow_mut();
        let size = mem::size_of::<T>()
            .checked_mul(count)
            .ok_or(AllocError::CapacityOverflow)?;
        if ledger.limit.is_some_and(|limit| ledger.allocations >= limit) {
            return Err(AllocError::Exhausted { layout_size: size });
        }
        let ptr = Global::<T>::new().allocate(count)?;
        if size > 0 {
            ledger.live.insert(ptr.as_ptr() as usize, size);
        }
        ledger.allocations += 1;
        Ok(ptr)
    }

    unsafe fn deallocate(&self, ptr: NonNull<T>, count: usize) {
        let size = mem::size_of::<T>() * count;
        {
            let mut ledger = self.ledger.borrow_mut();
            if size > 0 {
                match ledger.live.swap_remove(&(ptr.as_ptr() as usize)) {
                    Some(recorded) => assert_eq!(
                        recorded, size,
                        "block released with a different size than allocated"
                    ),
                    None => panic!("released a block this ledger does not own: {ptr:p}"),
                }
            }
            ledger.deallocations += 1;
        }
        // SAFETY: the ledger confirmed `ptr` came from `Global::allocate`
        // with the same element type and count.
        unsafe { Global::<T>::new().deallocate(ptr, count) };
    }

    fn rebind<U>(&self) -> CountingAlloc<U, P> {
        CountingAlloc::with_ledger(Rc::clone(&self.ledger))
    }

    fn select_on_copy(&self) -> Self {
        if P::FRESH_ON_COPY {
            Self::new()
        } else {
            self.clone()
        }
    }
}
