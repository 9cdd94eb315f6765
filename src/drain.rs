//! Destructive in-order enumeration
//!
//! A Fibonacci heap has no cheap sorted view, so enumeration is done by
//! repeatedly dequeuing. [`IntoSorted`] consumes the heap; [`DrainSorted`]
//! borrows it and leaves whatever was not consumed behind as a valid, smaller
//! heap.

use std::iter::FusedIterator;

use crate::fibonacci::FibonacciHeap;
use crate::order::{Comparator, NaturalOrder};

/// Owning iterator yielding `(priority, item)` pairs best-first.
///
/// Created by [`FibonacciHeap::into_sorted`] or `into_iter()`.
#[derive(Debug)]
pub struct IntoSorted<T, P, C = NaturalOrder> {
    heap: FibonacciHeap<T, P, C>,
}

impl<T, P, C> IntoSorted<T, P, C> {
    /// Number of elements not yet yielded.
    pub fn remaining(&self) -> usize {
        self.heap.len()
    }

    /// Stops iterating and returns the elements not yet yielded as a heap.
    pub fn into_heap(self) -> FibonacciHeap<T, P, C> {
        self.heap
    }
}

impl<T, P, C: Comparator<P>> Iterator for IntoSorted<T, P, C> {
    type Item = (P, T);

    fn next(&mut self) -> Option<Self::Item> {
        self.heap.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.heap.len();
        (len, Some(len))
    }
}

impl<T, P, C: Comparator<P>> ExactSizeIterator for IntoSorted<T, P, C> {}

impl<T, P, C: Comparator<P>> FusedIterator for IntoSorted<T, P, C> {}

/// Borrowing iterator that dequeues as it goes.
///
/// Dropping it early leaves the remaining elements in the heap.
#[derive(Debug)]
pub struct DrainSorted<'a, T, P, C = NaturalOrder> {
    heap: &'a mut FibonacciHeap<T, P, C>,
}

impl<T, P, C: Comparator<P>> Iterator for DrainSorted<'_, T, P, C> {
    type Item = (P, T);

    fn next(&mut self) -> Option<Self::Item> {
        self.heap.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.heap.len();
        (len, Some(len))
    }
}

impl<T, P, C: Comparator<P>> ExactSizeIterator for DrainSorted<'_, T, P, C> {}

impl<T, P, C: Comparator<P>> FusedIterator for DrainSorted<'_, T, P, C> {}

impl<T, P, C: Comparator<P>> FibonacciHeap<T, P, C> {
    /// Consumes the heap, yielding its elements best-first.
    ///
    /// Each step is a dequeue, so the whole enumeration is O(n log n).
    pub fn into_sorted(self) -> IntoSorted<T, P, C> {
        IntoSorted { heap: self }
    }

    /// Dequeues elements best-first for as long as the iterator is polled.
    pub fn drain_sorted(&mut self) -> DrainSorted<'_, T, P, C> {
        DrainSorted { heap: self }
    }
}

impl<T, P, C: Comparator<P>> IntoIterator for FibonacciHeap<T, P, C> {
    type Item = (P, T);
    type IntoIter = IntoSorted<T, P, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_sorted()
    }
}
