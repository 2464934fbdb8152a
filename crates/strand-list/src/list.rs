//! The allocator-aware sequence container.
//!
//! [`List`] is a circular doubly-linked list closed by an embedded sentinel.
//! Every node's storage is obtained from, and returned to, the strategy the
//! caller injected, rebound from the element type to [`Node`].
//!
//! # Failure model
//!
//! Operations that add elements either complete or leave the list exactly
//! as it was:
//!
//! - a single insertion allocates the node first, then builds the payload
//!   under a [`NodeGuard`]; a failing or panicking constructor releases the
//!   storage before the error surfaces;
//! - bulk construction and copy-assignment build a complete temporary list
//!   and only then exchange it with the destination, so a failure part way
//!   through drops the temporary (releasing every node it owned) and never
//!   touches the destination.
//!
//! Removal never fails.

use std::convert::Infallible;
use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;

use strand_core::{AllocError, AllocStrategy, Global};

use crate::cursor::{Cursor, CursorMut, RawCursor};
use crate::error::ListError;
use crate::iter::{IntoIter, Iter, IterMut};
use crate::node::{self, BaseNode, Link, Node, NodeGuard};

/// The strategy a `List<T, A>` actually allocates nodes with.
pub type NodeAlloc<T, A> = <A as AllocStrategy>::Rebind<Node<T>>;

/// A doubly-linked list allocating its nodes through `A`.
///
/// `A` is declared for the element type `T`; the list rebinds it to its
/// node type once, at construction, and keeps only the rebound handle.
///
/// # Example
///
/// ```
/// use strand_arena::StackStorage;
/// use strand_list::List;
///
/// let mut storage = StackStorage::<1024>::new();
/// let arena = storage.arena();
///
/// let mut list = List::new_in(arena.handle::<u32>());
/// list.push_back(2).unwrap();
/// list.push_front(1).unwrap();
/// list.push_back(3).unwrap();
///
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
/// assert_eq!(list.pop_front(), Some(1));
/// assert_eq!(list.len(), 2);
/// ```
///
/// # Thread safety
///
/// A list is `Send` or `Sync` exactly when both its elements and its node
/// strategy are. A list of non-`Send` values stays on its thread:
///
/// ```compile_fail
/// use std::rc::Rc;
/// use strand_list::List;
///
/// fn assert_send<X: Send>(_: &X) {}
///
/// let list: List<Rc<u8>> = List::new();
/// assert_send(&list);
/// ```
///
/// and so does a list allocating from a `strand_arena::Arena`,
/// whose handles are tied to the arena's thread:
///
/// ```compile_fail
/// use strand_arena::StackStorage;
/// use strand_list::List;
///
/// fn assert_send<X: Send>(_: &X) {}
///
/// let mut storage = StackStorage::<256>::new();
/// let arena = storage.arena();
/// let list: List<u8, _> = List::new_in(arena.handle::<u8>());
/// assert_send(&list);
/// ```
pub struct List<T, A: AllocStrategy<Value = T> = Global<T>> {
    alloc: NodeAlloc<T, A>,
    len: usize,
    sentinel: BaseNode,
    _owns: PhantomData<Box<Node<T>>>,
}

// SAFETY: the list exclusively owns its nodes; sending it sends the
// elements and the node strategy.
unsafe impl<T: Send, A: AllocStrategy<Value = T>> Send for List<T, A> where NodeAlloc<T, A>: Send {}

// SAFETY: `&List` only hands out `&T` and `&NodeAlloc`.
unsafe impl<T: Sync, A: AllocStrategy<Value = T>> Sync for List<T, A> where NodeAlloc<T, A>: Sync {}

impl<T> List<T> {
    /// Create an empty list on the global heap.
    pub fn new() -> Self {
        Self::new_in(Global::new())
    }
}

impl<T, A: AllocStrategy<Value = T>> List<T, A> {
    const PROPAGATE_ON_COPY_ASSIGN: bool =
        <NodeAlloc<T, A> as AllocStrategy>::PROPAGATE_ON_COPY_ASSIGN;
    const PROPAGATE_ON_MOVE_ASSIGN: bool =
        <NodeAlloc<T, A> as AllocStrategy>::PROPAGATE_ON_MOVE_ASSIGN;
    const PROPAGATE_ON_SWAP: bool = <NodeAlloc<T, A> as AllocStrategy>::PROPAGATE_ON_SWAP;

    /// Create an empty list allocating through `alloc`.
    pub fn new_in(alloc: A) -> Self {
        Self::from_node_alloc(alloc.rebind())
    }

    fn from_node_alloc(alloc: NodeAlloc<T, A>) -> Self {
        Self {
            alloc,
            len: 0,
            sentinel: BaseNode::unlinked(),
            _owns: PhantomData,
        }
    }

    /// Create a list of `len` default values.
    ///
    /// If an allocation fails or `T::default` panics, every node built so
    /// far is destroyed and released before the failure propagates.
    pub fn with_len_in(len: usize, alloc: A) -> Result<Self, AllocError>
    where
        T: Default,
    {
        let mut list = Self::new_in(alloc);
        for _ in 0..len {
            list.push_back_with(T::default)?;
        }
        Ok(list)
    }

    /// Create a list of `len` clones of `value`.
    ///
    /// Same rollback as [`with_len_in`](Self::with_len_in).
    pub fn from_elem_in(len: usize, value: &T, alloc: A) -> Result<Self, AllocError>
    where
        T: Clone,
    {
        let mut list = Self::new_in(alloc);
        for _ in 0..len {
            list.push_back_with(|| value.clone())?;
        }
        Ok(list)
    }

    /// Create a list of `len` elements produced by a fallible constructor.
    ///
    /// `make` receives the element's index. The first `Err` stops
    /// construction, destroys and releases everything built so far, and is
    /// returned as [`ListError::Construct`].
    pub fn try_from_fn_in<E, F>(len: usize, mut make: F, alloc: A) -> Result<Self, ListError<E>>
    where
        F: FnMut(usize) -> Result<T, E>,
    {
        let mut list = Self::new_in(alloc);
        for index in 0..len {
            list.try_emplace_before(None, || make(index))?;
        }
        Ok(list)
    }

    /// The node strategy this list allocates with.
    pub fn allocator(&self) -> &NodeAlloc<T, A> {
        &self.alloc
    }

    /// Number of elements. O(1).
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the list holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The first element.
    pub fn front(&self) -> Option<&T> {
        let head = self.sentinel.next?;
        // SAFETY: `head` is a live node owned by this list.
        Some(unsafe { Node::value(head) })
    }

    /// The first element, mutably.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        let head = self.sentinel.next?;
        // SAFETY: `head` is a live node owned by this list, borrowed
        // through `&mut self`.
        Some(unsafe { Node::value_mut(head) })
    }

    /// The last element.
    pub fn back(&self) -> Option<&T> {
        let tail = self.sentinel.prev?;
        // SAFETY: as in `front`.
        Some(unsafe { Node::value(tail) })
    }

    /// The last element, mutably.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        let tail = self.sentinel.prev?;
        // SAFETY: as in `front_mut`.
        Some(unsafe { Node::value_mut(tail) })
    }

    /// Front-to-back iterator.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.sentinel.next, self.sentinel.prev, self.len)
    }

    /// Front-to-back iterator over mutable references.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self.sentinel.next, self.sentinel.prev, self.len)
    }

    /// Cursor at the first element (at the end if empty).
    pub fn cursor_front(&self) -> Cursor<'_, T, A> {
        Cursor::new(self, RawCursor::new(self.sentinel.next, 0))
    }

    /// Cursor at the last element (at the end if empty).
    pub fn cursor_back(&self) -> Cursor<'_, T, A> {
        Cursor::new(self, RawCursor::new(self.sentinel.prev, self.len.saturating_sub(1)))
    }

    /// Cursor at the sentinel, one past the last element.
    pub fn cursor_end(&self) -> Cursor<'_, T, A> {
        Cursor::new(self, RawCursor::new(None, self.len))
    }

    /// Mutable cursor at the first element (at the end if empty).
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, T, A> {
        let raw = RawCursor::new(self.sentinel.next, 0);
        CursorMut::new(self, raw)
    }

    /// Mutable cursor at the last element (at the end if empty).
    pub fn cursor_back_mut(&mut self) -> CursorMut<'_, T, A> {
        let raw = RawCursor::new(self.sentinel.prev, self.len.saturating_sub(1));
        CursorMut::new(self, raw)
    }

    /// Mutable cursor at the sentinel.
    pub fn cursor_end_mut(&mut self) -> CursorMut<'_, T, A> {
        let raw = RawCursor::new(None, self.len);
        CursorMut::new(self, raw)
    }

    /// Prepend `value`.
    ///
    /// On failure the list is unchanged and `value` is dropped.
    pub fn push_front(&mut self, value: T) -> Result<(), AllocError> {
        self.push_front_with(|| value)
    }

    /// Append `value`.
    ///
    /// On failure the list is unchanged and `value` is dropped.
    pub fn push_back(&mut self, value: T) -> Result<(), AllocError> {
        self.push_back_with(|| value)
    }

    /// Allocate a node at the front, then build its payload with `make`.
    pub fn push_front_with<F>(&mut self, make: F) -> Result<(), AllocError>
    where
        F: FnOnce() -> T,
    {
        let head = self.sentinel.next;
        self.emplace_before(head, make).map(drop)
    }

    /// Allocate a node at the back, then build its payload with `make`.
    ///
    /// If `make` panics, the node's storage is released and the list is left
    /// as it was.
    pub fn push_back_with<F>(&mut self, make: F) -> Result<(), AllocError>
    where
        F: FnOnce() -> T,
    {
        self.emplace_before(None, make).map(drop)
    }

    /// Like [`push_front_with`](Self::push_front_with) with a fallible
    /// constructor.
    pub fn try_push_front_with<E, F>(&mut self, make: F) -> Result<(), ListError<E>>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let head = self.sentinel.next;
        self.try_emplace_before(head, make).map(drop)
    }

    /// Like [`push_back_with`](Self::push_back_with) with a fallible
    /// constructor.
    pub fn try_push_back_with<E, F>(&mut self, make: F) -> Result<(), ListError<E>>
    where
        F: FnOnce() -> Result<T, E>,
    {
        self.try_emplace_before(None, make).map(drop)
    }

    /// Remove and return the first element.
    pub fn pop_front(&mut self) -> Option<T> {
        let head = self.sentinel.next?;
        // SAFETY: `head` is a live node owned by this list.
        Some(unsafe { self.erase_node(head) })
    }

    /// Remove and return the last element.
    pub fn pop_back(&mut self) -> Option<T> {
        let tail = self.sentinel.prev?;
        // SAFETY: `tail` is a live node owned by this list.
        Some(unsafe { self.erase_node(tail) })
    }

    /// Insert `value` so that it ends up at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), AllocError> {
        assert!(
            index <= self.len,
            "insertion index (is {index}) should be <= len (is {})",
            self.len
        );
        let at = self.link_at(index);
        self.emplace_before(at, || value).map(drop)
    }

    /// Remove and return the element at `index`, if any.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        let node = self.link_at(index)?;
        // SAFETY: `link_at` only returns live nodes owned by this list.
        Some(unsafe { self.erase_node(node) })
    }

    /// Destroy every element.
    pub fn clear(&mut self) {
        while self.pop_back().is_some() {}
    }

    /// Move every element of `other` to the back of `self` in O(1).
    ///
    /// # Panics
    ///
    /// Panics if the two node strategies are not equal: `self` will
    /// eventually release the moved nodes through its own handle.
    pub fn append(&mut self, other: &mut Self) {
        assert!(
            self.alloc == other.alloc,
            "cannot append a list whose allocator is not equal"
        );
        let (Some(first), Some(last)) = (other.sentinel.next, other.sentinel.prev) else {
            return;
        };
        let back = self.sentinel.prev;
        self.links_mut(back).next = Some(first);
        // SAFETY: `first` is a live node owned by `other`; it changes owner
        // here and nothing else references its links.
        unsafe { node::links_mut(first) }.prev = back;
        self.sentinel.prev = Some(last);
        self.len += mem::take(&mut other.len);
        other.sentinel = BaseNode::unlinked();
    }

    /// Append every item of `iter`, all or nothing.
    ///
    /// Items are staged in a temporary list sharing this list's strategy
    /// and spliced in only once all of them were stored.
    pub fn try_extend<I>(&mut self, iter: I) -> Result<(), AllocError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut staged = Self::from_node_alloc(self.alloc.clone());
        for value in iter {
            staged.push_back(value)?;
        }
        self.append(&mut staged);
        Ok(())
    }

    /// Exchange contents with `other`.
    ///
    /// Lengths and sentinel links are exchanged in O(1). Boundary nodes
    /// refer to their sentinel through a `None` link, so once the sentinels
    /// are exchanged they already belong to the right list.
    ///
    /// Handles follow the contents only if the strategy declares
    /// `PROPAGATE_ON_SWAP`.
    ///
    /// # Panics
    ///
    /// Panics if the strategy does not propagate on swap and the two handles
    /// are not equal. Each list would otherwise end up releasing nodes
    /// through a strategy that did not allocate them.
    pub fn swap(&mut self, other: &mut Self) {
        if Self::PROPAGATE_ON_SWAP {
            mem::swap(&mut self.alloc, &mut other.alloc);
        } else {
            assert!(
                self.alloc == other.alloc,
                "cannot swap lists whose allocators are not equal and do not propagate on swap"
            );
        }
        self.swap_nodes(other);
    }

    /// Move the contents out, leaving `self` empty with its own handle.
    pub fn take(&mut self) -> Self {
        let mut taken = Self::from_node_alloc(self.alloc.clone());
        self.swap_nodes(&mut taken);
        taken
    }

    /// Replace the contents of `self` with those of `source`.
    ///
    /// - If the strategy propagates on move-assignment, `self` takes over
    ///   `source`'s nodes *and* handle.
    /// - Otherwise, if the two handles are equal, the nodes are taken over
    ///   and `self` keeps its handle.
    /// - Otherwise the elements are moved one by one into nodes allocated
    ///   through `self`'s handle. If that fails, `self` is unchanged and the
    ///   remaining elements of `source` are dropped.
    pub fn move_assign(&mut self, mut source: Self) -> Result<(), AllocError> {
        if Self::PROPAGATE_ON_MOVE_ASSIGN {
            self.swap_nodes(&mut source);
            mem::swap(&mut self.alloc, &mut source.alloc);
        } else if self.alloc == source.alloc {
            self.swap_nodes(&mut source);
        } else {
            let mut staged = Self::from_node_alloc(self.alloc.clone());
            while let Some(value) = source.pop_front() {
                staged.push_back(value)?;
            }
            self.swap_nodes(&mut staged);
        }
        Ok(())
    }

    /// Copy-construct: a new list with `select_on_copy`'s handle holding
    /// clones of every element, in order.
    pub fn try_clone(&self) -> Result<Self, AllocError>
    where
        T: Clone,
    {
        self.cloned_in(self.alloc.select_on_copy())
    }

    /// Copy-assign: replace the contents of `self` with clones of `source`.
    ///
    /// A complete copy is built first, with `source`'s handle if the
    /// strategy propagates on copy-assignment and with `self`'s otherwise.
    /// Only then are the contents exchanged, so on failure `self` is
    /// unmodified. When propagating, the handles are exchanged as well and
    /// the old nodes are released through the handle that allocated them.
    pub fn try_clone_from(&mut self, source: &Self) -> Result<(), AllocError>
    where
        T: Clone,
    {
        let alloc = if Self::PROPAGATE_ON_COPY_ASSIGN {
            source.alloc.clone()
        } else {
            self.alloc.clone()
        };
        let mut staged = source.cloned_in(alloc)?;
        self.swap_nodes(&mut staged);
        if Self::PROPAGATE_ON_COPY_ASSIGN {
            mem::swap(&mut self.alloc, &mut staged.alloc);
        }
        Ok(())
    }

    fn cloned_in(&self, alloc: NodeAlloc<T, A>) -> Result<Self, AllocError>
    where
        T: Clone,
    {
        let mut copy = Self::from_node_alloc(alloc);
        for value in self {
            copy.push_back_with(|| value.clone())?;
        }
        Ok(copy)
    }

    fn swap_nodes(&mut self, other: &mut Self) {
        mem::swap(&mut self.len, &mut other.len);
        mem::swap(&mut self.sentinel, &mut other.sentinel);
        self.debug_check_boundaries();
        other.debug_check_boundaries();
    }

    fn debug_check_boundaries(&self) {
        debug_assert!(self.links(self.sentinel.next).prev.is_none());
        debug_assert!(self.links(self.sentinel.prev).next.is_none());
    }

    // ── Link algebra ───────────────────────────────────────────

    /// The first node, or `None` (the sentinel) when empty.
    pub(crate) fn head(&self) -> Link {
        self.sentinel.next
    }

    /// The last node, or `None` (the sentinel) when empty.
    pub(crate) fn tail(&self) -> Link {
        self.sentinel.prev
    }

    pub(crate) fn next_of(&self, at: Link) -> Link {
        self.links(at).next
    }

    pub(crate) fn prev_of(&self, at: Link) -> Link {
        self.links(at).prev
    }

    /// The link pair at `at`, resolving `None` to the sentinel.
    fn links(&self, at: Link) -> &BaseNode {
        match at {
            // SAFETY: every `Some` link reachable from this list names a
            // live node the list owns.
            Some(node) => unsafe { node.as_ref() },
            None => &self.sentinel,
        }
    }

    fn links_mut(&mut self, at: Link) -> &mut BaseNode {
        match at {
            // SAFETY: as in `links`; `&mut self` excludes other borrows.
            Some(node) => unsafe { node::links_mut(node) },
            None => &mut self.sentinel,
        }
    }

    /// The node at `index`, walking from the nearer end. `None` if
    /// `index >= len`.
    fn link_at(&self, index: usize) -> Link {
        if index >= self.len {
            return None;
        }
        if index <= self.len / 2 {
            let mut at = self.sentinel.next;
            for _ in 0..index {
                at = self.next_of(at);
            }
            at
        } else {
            let mut at = self.sentinel.prev;
            for _ in 0..self.len - 1 - index {
                at = self.prev_of(at);
            }
            at
        }
    }

    /// Link the fresh node `node` immediately before `at`.
    ///
    /// # Safety
    ///
    /// `node` must be a live, unlinked node allocated through `self.alloc`.
    unsafe fn link_before(&mut self, at: Link, node: NonNull<BaseNode>) {
        let prev = self.links(at).prev;
        // SAFETY: the caller guarantees `node` is live and unreferenced.
        let links = unsafe { node::links_mut(node) };
        links.next = at;
        links.prev = prev;
        self.links_mut(prev).next = Some(node);
        self.links_mut(at).prev = Some(node);
        self.len += 1;
    }

    /// Allocate a node, build its payload with `make`, and link it before
    /// `at`. A failing `make` leaves the list untouched.
    pub(crate) fn try_emplace_before<E, F>(
        &mut self,
        at: Link,
        make: F,
    ) -> Result<NonNull<BaseNode>, ListError<E>>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let guard = NodeGuard::allocate(&self.alloc)?;
        let value = make().map_err(ListError::Construct)?;
        let node = guard.fill(value);
        // SAFETY: `node` was just allocated through `self.alloc` and is
        // not linked anywhere.
        unsafe { self.link_before(at, node) };
        Ok(node)
    }

    pub(crate) fn emplace_before<F>(&mut self, at: Link, make: F) -> Result<NonNull<BaseNode>, AllocError>
    where
        F: FnOnce() -> T,
    {
        self.try_emplace_before(at, || Ok::<T, Infallible>(make()))
            .map_err(ListError::into_alloc)
    }

    /// Unlink `node`, move its payload out, and release its storage.
    ///
    /// # Safety
    ///
    /// `node` must be a live node owned by this list.
    pub(crate) unsafe fn erase_node(&mut self, node: NonNull<BaseNode>) -> T {
        let (prev, next) = {
            let links = self.links(Some(node));
            (links.prev, links.next)
        };
        self.links_mut(prev).next = next;
        self.links_mut(next).prev = prev;
        self.len -= 1;
        // SAFETY: the node is live and now unreachable from the list; its
        // payload is read exactly once and its storage came from
        // `self.alloc.allocate(1)`.
        unsafe {
            let value = Node::<T>::take_value(node);
            self.alloc.deallocate(Node::from_base(node), 1);
            value
        }
    }
}

impl<T, A: AllocStrategy<Value = T>> Drop for List<T, A> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, A: AllocStrategy<Value = T>> Clone for List<T, A> {
    /// # Panics
    ///
    /// Panics if node storage cannot be allocated; use
    /// [`List::try_clone`] to handle that case.
    fn clone(&self) -> Self {
        self.try_clone()
            .unwrap_or_else(|err| panic!("list clone failed: {err}"))
    }

    fn clone_from(&mut self, source: &Self) {
        self.try_clone_from(source)
            .unwrap_or_else(|err| panic!("list clone_from failed: {err}"));
    }
}

impl<T, A: AllocStrategy<Value = T>> Extend<T> for List<T, A> {
    /// # Panics
    ///
    /// Panics if node storage cannot be allocated; use
    /// [`List::try_extend`] to handle that case.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.try_extend(iter)
            .unwrap_or_else(|err| panic!("list extend failed: {err}"));
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T, A: AllocStrategy<Value = T>> IntoIterator for List<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> IntoIter<T, A> {
        IntoIter::new(self)
    }
}

impl<'a, T, A: AllocStrategy<Value = T>> IntoIterator for &'a List<T, A> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T, A: AllocStrategy<Value = T>> IntoIterator for &'a mut List<T, A> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

impl<T, A, B> PartialEq<List<T, B>> for List<T, A>
where
    T: PartialEq,
    A: AllocStrategy<Value = T>,
    B: AllocStrategy<Value = T>,
{
    fn eq(&self, other: &List<T, B>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, A: AllocStrategy<Value = T>> Eq for List<T, A> {}

impl<T: fmt::Debug, A: AllocStrategy<Value = T>> fmt::Debug for List<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self).finish()
    }
}
