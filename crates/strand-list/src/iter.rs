//! Iterators over a [`List`](crate::List).
//!
//! The borrowing iterators walk the link chain from both ends and stop
//! after `len` steps, so they never need to recognise the sentinel.

use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;

use strand_core::{AllocStrategy, Global};

use crate::list::List;
use crate::node::{Link, Node};

/// Step from `at` to its successor.
///
/// # Safety
///
/// `at` must be a live node whose list is borrowed for the caller's use.
unsafe fn successor(at: Link) -> Link {
    // SAFETY: forwarded to the caller.
    at.and_then(|node| unsafe { node.as_ref() }.next)
}

/// Step from `at` to its predecessor. Same contract as [`successor`].
unsafe fn predecessor(at: Link) -> Link {
    // SAFETY: forwarded to the caller.
    at.and_then(|node| unsafe { node.as_ref() }.prev)
}

/// Borrowing iterator, front to back.
pub struct Iter<'a, T> {
    head: Link,
    tail: Link,
    len: usize,
    _marker: PhantomData<&'a Node<T>>,
}

impl<T> Iter<'_, T> {
    pub(crate) fn new(head: Link, tail: Link, len: usize) -> Self {
        Self {
            head,
            tail,
            len,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        let node = self.head?;
        self.len -= 1;
        // SAFETY: fewer than `len` steps were taken, so `node` is a live
        // element of the list borrowed for `'a`.
        unsafe {
            self.head = successor(Some(node));
            Some(Node::value(node))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        let node = self.tail?;
        self.len -= 1;
        // SAFETY: as in `next`.
        unsafe {
            self.tail = predecessor(Some(node));
            Some(Node::value(node))
        }
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self::new(self.head, self.tail, self.len)
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// Mutably borrowing iterator, front to back.
pub struct IterMut<'a, T> {
    head: Link,
    tail: Link,
    len: usize,
    _marker: PhantomData<&'a mut Node<T>>,
}

impl<T> IterMut<'_, T> {
    pub(crate) fn new(head: Link, tail: Link, len: usize) -> Self {
        Self {
            head,
            tail,
            len,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        if self.len == 0 {
            return None;
        }
        let node = self.head?;
        self.len -= 1;
        // SAFETY: each node is yielded at most once, from either end, while
        // the list is exclusively borrowed for `'a`.
        unsafe {
            self.head = successor(Some(node));
            Some(Node::value_mut(node))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.len == 0 {
            return None;
        }
        let node = self.tail?;
        self.len -= 1;
        // SAFETY: as in `next`.
        unsafe {
            self.tail = predecessor(Some(node));
            Some(Node::value_mut(node))
        }
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

impl<T> fmt::Debug for IterMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut").field("len", &self.len).finish()
    }
}

/// Owning iterator, front to back.
pub struct IntoIter<T, A: AllocStrategy<Value = T> = Global<T>> {
    list: List<T, A>,
}

impl<T, A: AllocStrategy<Value = T>> IntoIter<T, A> {
    pub(crate) fn new(list: List<T, A>) -> Self {
        Self { list }
    }
}

impl<T, A: AllocStrategy<Value = T>> Iterator for IntoIter<T, A> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T, A: AllocStrategy<Value = T>> DoubleEndedIterator for IntoIter<T, A> {
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back()
    }
}

impl<T, A: AllocStrategy<Value = T>> ExactSizeIterator for IntoIter<T, A> {}

impl<T, A: AllocStrategy<Value = T>> FusedIterator for IntoIter<T, A> {}

impl<T: fmt::Debug, A: AllocStrategy<Value = T>> fmt::Debug for IntoIter<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.list).finish()
    }
}

// SAFETY: `Iter` hands out `&T` only.
unsafe impl<T: Sync> Send for Iter<'_, T> {}
// SAFETY: as above.
unsafe impl<T: Sync> Sync for Iter<'_, T> {}
// SAFETY: `IterMut` behaves like `&mut T` for each element.
unsafe impl<T: Send> Send for IterMut<'_, T> {}
// SAFETY: as above.
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(values: &[i32]) -> List<i32> {
        values.iter().copied().collect()
    }

    #[test]
    fn iter_is_double_ended_and_exact() {
        let list = list_of(&[1, 2, 3, 4]);
        let mut iter = list.iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&4));
        assert_eq!(iter.len(), 2);
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next_back(), Some(&3));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn iter_rev_visits_back_to_front() {
        let list = list_of(&[1, 2, 3]);
        let back: Vec<_> = list.iter().rev().copied().collect();
        assert_eq!(back, [3, 2, 1]);
    }

    #[test]
    fn iter_mut_edits_every_element() {
        let mut list = list_of(&[1, 2, 3]);
        for value in &mut list {
            *value *= -1;
        }
        let mut iter = list.iter_mut();
        *iter.next_back().unwrap() = 0;
        assert_eq!(iter.len(), 2);
        assert_eq!(list_of(&[-1, -2, 0]), list);
    }

    #[test]
    fn into_iter_drains_both_ends() {
        let list = list_of(&[1, 2, 3, 4]);
        let mut iter = list.into_iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.next_back(), Some(4));
        assert_eq!(iter.collect::<Vec<_>>(), [2, 3]);
    }

    #[test]
    fn dropping_into_iter_drops_the_rest() {
        use std::rc::Rc;
        let tracker = Rc::new(());
        let mut list = List::new();
        for _ in 0..4 {
            list.push_back(Rc::clone(&tracker)).unwrap();
        }
        let mut iter = list.into_iter();
        drop(iter.next());
        drop(iter);
        assert_eq!(Rc::strong_count(&tracker), 1);
    }

    #[test]
    fn debug_shows_remaining_elements() {
        let list = list_of(&[7, 8]);
        let mut iter = list.iter();
        iter.next();
        assert_eq!(format!("{iter:?}"), "[8]");
    }
}
