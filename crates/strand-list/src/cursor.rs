//! Bidirectional positions within a [`List`].
//!
//! A cursor rests either on an element or on the sentinel ("the end"). The
//! sequence is circular: stepping forward from the last element reaches the
//! end, and stepping forward from the end wraps to the first element.
//!
//! A cursor borrows its list, so the borrow checker rules out the stale
//! positions a raw pointer would allow. A [`CursorMut`] is the only way to
//! restructure the list while holding a position; positions of other
//! elements are never disturbed by its edits.

use std::fmt;
use std::ptr;

use strand_core::{AllocError, AllocStrategy, Global};

use crate::list::List;
use crate::node::{Link, Node};

/// Position state shared by both cursor flavours.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct RawCursor {
    current: Link,
    index: usize,
}

impl RawCursor {
    pub(crate) fn new(current: Link, index: usize) -> Self {
        Self { current, index }
    }

    fn move_next<T, A: AllocStrategy<Value = T>>(&mut self, list: &List<T, A>) {
        match self.current {
            None => {
                self.current = list.head();
                self.index = 0;
            }
            Some(_) => {
                self.current = list.next_of(self.current);
                self.index += 1;
            }
        }
    }

    fn move_prev<T, A: AllocStrategy<Value = T>>(&mut self, list: &List<T, A>) {
        match self.current {
            None => {
                self.current = list.tail();
                self.index = list.len().saturating_sub(1);
            }
            Some(_) => {
                self.current = list.prev_of(self.current);
                self.index = match self.current {
                    None => list.len(),
                    Some(_) => self.index - 1,
                };
            }
        }
    }
}

/// A read-only position in a [`List`].
pub struct Cursor<'a, T, A: AllocStrategy<Value = T> = Global<T>> {
    raw: RawCursor,
    list: &'a List<T, A>,
}

impl<'a, T, A: AllocStrategy<Value = T>> Cursor<'a, T, A> {
    pub(crate) fn new(list: &'a List<T, A>, raw: RawCursor) -> Self {
        Self { raw, list }
    }

    /// Zero-based index of the current element; `len` at the end.
    pub fn index(&self) -> usize {
        self.raw.index
    }

    /// Whether the cursor rests on the sentinel.
    pub fn is_end(&self) -> bool {
        self.raw.current.is_none()
    }

    /// The element under the cursor, or `None` at the end.
    pub fn current(&self) -> Option<&'a T> {
        let node = self.raw.current?;
        // SAFETY: the list is borrowed for `'a` and owns `node`.
        Some(unsafe { Node::value(node) })
    }

    /// Step forward, wrapping from the end to the first element.
    pub fn move_next(&mut self) {
        self.raw.move_next(self.list);
    }

    /// Step backward, wrapping from the end to the last element.
    pub fn move_prev(&mut self) {
        self.raw.move_prev(self.list);
    }

    /// The element one step forward, without moving.
    pub fn peek_next(&self) -> Option<&'a T> {
        let next = self.list.next_of(self.raw.current)?;
        // SAFETY: as in `current`.
        Some(unsafe { Node::value(next) })
    }

    /// The element one step backward, without moving.
    pub fn peek_prev(&self) -> Option<&'a T> {
        let prev = self.list.prev_of(self.raw.current)?;
        // SAFETY: as in `current`.
        Some(unsafe { Node::value(prev) })
    }

    /// The list this cursor walks.
    pub fn as_list(&self) -> &'a List<T, A> {
        self.list
    }
}

impl<T, A: AllocStrategy<Value = T>> Clone for Cursor<'_, T, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, A: AllocStrategy<Value = T>> Copy for Cursor<'_, T, A> {}

/// Two cursors are equal when they rest on the same node of the same list.
impl<T, A: AllocStrategy<Value = T>> PartialEq for Cursor<'_, T, A> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.list, other.list) && self.raw.current == other.raw.current
    }
}

impl<T, A: AllocStrategy<Value = T>> Eq for Cursor<'_, T, A> {}

impl<T: fmt::Debug, A: AllocStrategy<Value = T>> fmt::Debug for Cursor<'_, T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("index", &self.raw.index)
            .field("current", &self.current())
            .finish()
    }
}

/// A position in a [`List`] that can also edit the list around it.
pub struct CursorMut<'a, T, A: AllocStrategy<Value = T> = Global<T>> {
    raw: RawCursor,
    list: &'a mut List<T, A>,
}

impl<'a, T, A: AllocStrategy<Value = T>> CursorMut<'a, T, A> {
    pub(crate) fn new(list: &'a mut List<T, A>, raw: RawCursor) -> Self {
        Self { raw, list }
    }

    /// Zero-based index of the current element; `len` at the end.
    pub fn index(&self) -> usize {
        self.raw.index
    }

    /// Whether the cursor rests on the sentinel.
    pub fn is_end(&self) -> bool {
        self.raw.current.is_none()
    }

    /// The element under the cursor.
    pub fn current(&self) -> Option<&T> {
        let node = self.raw.current?;
        // SAFETY: the list is borrowed through `self` and owns `node`.
        Some(unsafe { Node::value(node) })
    }

    /// The element under the cursor, mutably.
    pub fn current_mut(&mut self) -> Option<&mut T> {
        let node = self.raw.current?;
        // SAFETY: the list is exclusively borrowed through `&mut self`.
        Some(unsafe { Node::value_mut(node) })
    }

    /// Step forward, wrapping from the end to the first element.
    pub fn move_next(&mut self) {
        self.raw.move_next(self.list);
    }

    /// Step backward, wrapping from the end to the last element.
    pub fn move_prev(&mut self) {
        self.raw.move_prev(self.list);
    }

    /// The element one step forward, mutably, without moving.
    pub fn peek_next(&mut self) -> Option<&mut T> {
        let next = self.list.next_of(self.raw.current)?;
        // SAFETY: as in `current_mut`.
        Some(unsafe { Node::value_mut(next) })
    }

    /// The element one step backward, mutably, without moving.
    pub fn peek_prev(&mut self) -> Option<&mut T> {
        let prev = self.list.prev_of(self.raw.current)?;
        // SAFETY: as in `current_mut`.
        Some(unsafe { Node::value_mut(prev) })
    }

    /// A read-only cursor at the same position, borrowing from `self`.
    pub fn as_cursor(&self) -> Cursor<'_, T, A> {
        Cursor::new(&*self.list, self.raw)
    }

    /// Insert `value` immediately before the cursor.
    ///
    /// The cursor keeps resting on the same node; its index grows by one.
    /// At the end this appends to the list. On failure nothing changes.
    pub fn insert_before(&mut self, value: T) -> Result<(), AllocError> {
        self.list.emplace_before(self.raw.current, || value)?;
        self.raw.index += 1;
        Ok(())
    }

    /// Insert `value` immediately after the cursor.
    ///
    /// The cursor does not move. At the end this prepends to the list.
    pub fn insert_after(&mut self, value: T) -> Result<(), AllocError> {
        let next = self.list.next_of(self.raw.current);
        self.list.emplace_before(next, || value)?;
        if self.raw.current.is_none() {
            self.raw.index = self.list.len();
        }
        Ok(())
    }

    /// Remove the element under the cursor and return it.
    ///
    /// The cursor moves to the following position (possibly the end).
    /// Returns `None` and does nothing at the end.
    pub fn remove_current(&mut self) -> Option<T> {
        let node = self.raw.current?;
        let next = self.list.next_of(self.raw.current);
        // SAFETY: the cursor only ever rests on nodes owned by its list.
        let value = unsafe { self.list.erase_node(node) };
        self.raw.current = next;
        Some(value)
    }

    /// Remove the element under the cursor, dropping it.
    ///
    /// Returns whether an element was removed.
    pub fn erase(&mut self) -> bool {
        self.remove_current().is_some()
    }

    /// Prepend `value` to the list. The cursor stays on its node.
    pub fn push_front(&mut self, value: T) -> Result<(), AllocError> {
        self.list.push_front(value)?;
        self.raw.index += 1;
        Ok(())
    }

    /// Append `value` to the list. The cursor stays on its node.
    pub fn push_back(&mut self, value: T) -> Result<(), AllocError> {
        self.list.push_back(value)?;
        if self.raw.current.is_none() {
            self.raw.index += 1;
        }
        Ok(())
    }

    /// The list this cursor edits.
    pub fn as_list(&self) -> &List<T, A> {
        &*self.list
    }
}

impl<'a, T, A: AllocStrategy<Value = T>> From<CursorMut<'a, T, A>> for Cursor<'a, T, A> {
    fn from(cursor: CursorMut<'a, T, A>) -> Self {
        Cursor::new(cursor.list, cursor.raw)
    }
}

impl<T: fmt::Debug, A: AllocStrategy<Value = T>> fmt::Debug for CursorMut<'_, T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("index", &self.raw.index)
            .field("current", &self.current())
            .finish()
    }
}
