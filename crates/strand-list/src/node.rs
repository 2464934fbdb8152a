//! Node model: link pairs and payload nodes.
//!
//! Every element lives in a [`Node`], a [`BaseNode`] link pair followed by
//! the payload. The list's sentinel is a bare `BaseNode` embedded in the
//! list value itself.
//!
//! A list value can be moved by a plain byte copy, so the sentinel has no
//! stable address. Links therefore never point at it: a `None` link means
//! "the sentinel of the list that owns this node". An empty list's sentinel
//! has `None` on both sides, i.e. it refers to itself.

use std::marker::PhantomData;
use std::mem;
use std::ptr::{self, NonNull};

use strand_core::AllocStrategy;

/// A link to a node, or `None` for the owning list's sentinel.
pub(crate) type Link = Option<NonNull<BaseNode>>;

/// The `{next, prev}` link pair shared by every node and the sentinel.
#[derive(Debug)]
pub struct BaseNode {
    pub(crate) next: Link,
    pub(crate) prev: Link,
}

impl BaseNode {
    /// A link pair referring to the sentinel on both sides.
    pub(crate) const fn unlinked() -> Self {
        Self {
            next: None,
            prev: None,
        }
    }
}

/// A link pair plus one payload value.
///
/// `repr(C)` keeps the link pair at offset zero, so a `NonNull<BaseNode>`
/// taken from a node can be cast back to the node.
#[repr(C)]
pub struct Node<T> {
    base: BaseNode,
    value: T,
}

impl<T> Node<T> {
    /// View a payload node through its link pair.
    pub(crate) fn as_base(node: NonNull<Node<T>>) -> NonNull<BaseNode> {
        node.cast()
    }

    /// Recover the payload node behind a link pair.
    ///
    /// # Safety
    ///
    /// `base` must be the link pair of a live `Node<T>`.
    pub(crate) unsafe fn from_base(base: NonNull<BaseNode>) -> NonNull<Node<T>> {
        base.cast()
    }

    /// Shared access to the payload of the node behind `base`.
    ///
    /// # Safety
    ///
    /// `base` must be the link pair of a live `Node<T>`, and the payload must
    /// not be mutably borrowed for `'a`.
    pub(crate) unsafe fn value<'a>(base: NonNull<BaseNode>) -> &'a T {
        let node = unsafe { Self::from_base(base) };
        // SAFETY: the caller guarantees the node is live and unaliased.
        unsafe { &*ptr::addr_of!((*node.as_ptr()).value) }
    }

    /// Exclusive access to the payload of the node behind `base`.
    ///
    /// # Safety
    ///
    /// As [`Node::value`], and no other borrow of the payload may exist
    /// for `'a`.
    pub(crate) unsafe fn value_mut<'a>(base: NonNull<BaseNode>) -> &'a mut T {
        let node = unsafe { Self::from_base(base) };
        // SAFETY: the caller guarantees the node is live and unaliased.
        unsafe { &mut *ptr::addr_of_mut!((*node.as_ptr()).value) }
    }

    /// Move the payload out of the node behind `base`.
    ///
    /// # Safety
    ///
    /// `base` must be the link pair of a live `Node<T>`. Afterwards the
    /// payload is logically uninitialised and must not be read or dropped.
    pub(crate) unsafe fn take_value(base: NonNull<BaseNode>) -> T {
        let node = unsafe { Self::from_base(base) };
        // SAFETY: the caller guarantees the payload is initialised and is
        // never used again.
        unsafe { ptr::read(ptr::addr_of!((*node.as_ptr()).value)) }
    }
}

/// Mutable access to a node's link pair.
///
/// # Safety
///
/// `base` must be the link pair of a live node and no other reference to
/// that link pair may exist for `'a`.
pub(crate) unsafe fn links_mut<'a>(base: NonNull<BaseNode>) -> &'a mut BaseNode {
    unsafe { &mut *base.as_ptr() }
}

/// Node storage obtained from a strategy but not yet linked.
///
/// Dropping the guard releases the storage through the strategy without
/// touching the payload. [`NodeGuard::fill`] writes the payload and hands
/// the node out, disarming the guard. A panicking payload constructor
/// therefore never leaks node storage.
pub(crate) struct NodeGuard<'a, T, S>
where
    S: AllocStrategy<Value = Node<T>>,
{
    alloc: &'a S,
    node: NonNull<Node<T>>,
    _marker: PhantomData<T>,
}

impl<'a, T, S> NodeGuard<'a, T, S>
where
    S: AllocStrategy<Value = Node<T>>,
{
    /// Allocate storage for one node.
    pub(crate) fn allocate(alloc: &'a S) -> Result<Self, strand_core::AllocError> {
        let node = alloc.allocate(1)?;
        Ok(Self {
            alloc,
            node,
            _marker: PhantomData,
        })
    }

    /// Write `value` and an unlinked link pair, then release ownership of
    /// the storage to the caller.
    pub(crate) fn fill(self, value: T) -> NonNull<BaseNode> {
        let node = self.node;
        mem::forget(self);
        // SAFETY: `node` is freshly allocated, properly aligned storage for
        // one `Node<T>` that nothing else references.
        unsafe {
            node.as_ptr().write(Node {
                base: BaseNode::unlinked(),
                value,
            });
        }
        Node::as_base(node)
    }
}

impl<T, S> Drop for NodeGuard<'_, T, S>
where
    S: AllocStrategy<Value = Node<T>>,
{
    fn drop(&mut self) {
        // SAFETY: the storage came from `alloc.allocate(1)` and holds no
        // initialised payload.
        unsafe { self.alloc.deallocate(self.node, 1) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strand_core::Global;

    #[test]
    fn base_node_is_at_offset_zero() {
        let node = Node {
            base: BaseNode::unlinked(),
            value: 7u32,
        };
        let node_addr = &node as *const Node<u32> as usize;
        let base_addr = &node.base as *const BaseNode as usize;
        assert_eq!(node_addr, base_addr);
    }

    #[test]
    fn fill_then_take_round_trips_payload() {
        let alloc = Global::<Node<String>>::new();
        let guard = NodeGuard::allocate(&alloc).unwrap();
        let base = guard.fill("payload".to_string());
        unsafe {
            assert_eq!(Node::<String>::value(base), "payload");
            Node::<String>::value_mut(base).push('!');
            let value = Node::<String>::take_value(base);
            assert_eq!(value, "payload!");
            alloc.deallocate(Node::from_base(base), 1);
        }
    }

    #[test]
    fn filled_node_starts_unlinked() {
        let alloc = Global::<Node<u8>>::new();
        let base = NodeGuard::allocate(&alloc).unwrap().fill(1);
        unsafe {
            let links = links_mut(base);
            assert!(links.next.is_none());
            assert!(links.prev.is_none());
            alloc.deallocate(Node::<u8>::from_base(base), 1);
        }
    }
}
