//! Common traits for heap data structures
//!
//! This module provides a two-tier trait hierarchy for heap/priority queue data structures:
//!
//! - [`Heap`]: Base trait for mergeable heaps without handle support
//! - [`AddressableHeap`]: Extended trait adding handle-based `change_key` and `delete`
//!
//! [`FibonacciHeap`](crate::FibonacciHeap) implements both, for code that
//! wants to stay generic over the queue it drives.

use std::fmt;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// The heap has no elements to dequeue or peek
    Empty,
    /// The handle is no longer valid (element was removed)
    InvalidHandle,
    /// The handle was issued by a heap that does not own the element
    ForeignHandle,
    /// The heaps being merged order their elements in opposite directions
    IncompatibleMerge,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::Empty => write!(f, "heap is empty"),
            HeapError::InvalidHandle => {
                write!(f, "handle is no longer valid (element was removed)")
            }
            HeapError::ForeignHandle => {
                write!(f, "handle belongs to a different heap")
            }
            HeapError::IncompatibleMerge => {
                write!(f, "cannot merge heaps with different ordering directions")
            }
        }
    }
}

impl std::error::Error for HeapError {}

/// A handle to an element in the heap, used for `change_key` and `delete`
///
/// This is an opaque type that identifies a specific element in the heap.
/// Handles may be `Clone` but not necessarily `Copy`, depending on
/// the underlying implementation.
pub trait Handle: Clone + PartialEq + Eq {}

/// Base trait for mergeable heap/priority queue data structures
///
/// These heaps store (priority, item) pairs to separate the ordering key from
/// the data. Which end of the order is "top" depends on the heap's configured
/// direction; a default-constructed heap is a min-heap.
pub trait Heap<T, P> {
    /// Creates a new empty heap with the default ordering
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Inserts an element with the given priority
    fn push(&mut self, priority: P, item: T);

    /// Calls `f` with the top priority and item, without removing them
    ///
    /// # Time Complexity
    /// O(1) for all implementations
    fn peek_with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&P, &T) -> R;

    /// Removes and returns the top priority and associated item
    fn pop(&mut self) -> Option<(P, T)>;

    /// Moves every element of `other` into this heap, leaving `other` empty
    ///
    /// # Errors
    /// Returns `HeapError::IncompatibleMerge` if the heaps are ordered in
    /// different directions. Neither heap is modified in that case.
    fn merge(&mut self, other: &mut Self) -> Result<(), HeapError>;
}

/// Extended heap trait with handle-based operations
///
/// - `push_with_handle` returns a handle that can be used later
/// - `change_key` reprioritizes an element in place
/// - `delete` removes an arbitrary element
///
/// These operations are essential for algorithms like Dijkstra's shortest path
/// that need to update priorities of elements already in the heap.
pub trait AddressableHeap<T, P>: Heap<T, P> {
    /// The handle type for this heap
    type Handle: Handle;

    /// Inserts an element with the given priority, returning a handle
    fn push_with_handle(&mut self, priority: P, item: T) -> Self::Handle;

    /// Changes the priority of the element identified by the handle
    ///
    /// # Errors
    /// Returns `HeapError::InvalidHandle` if the element was already removed,
    /// or `HeapError::ForeignHandle` if it belongs to another heap.
    fn change_key(&mut self, handle: &Self::Handle, new_priority: P) -> Result<(), HeapError>;

    /// Removes the element identified by the handle, returning it
    fn delete(&mut self, handle: &Self::Handle) -> Result<(P, T), HeapError>;

    /// Returns true if the handle still refers to an element of this heap
    fn contains(&self, handle: &Self::Handle) -> bool;
}
