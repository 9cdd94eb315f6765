//! Vertex-keyed priority queue for graph algorithms
//!
//! Graph searches think in terms of vertices and tentative distances rather
//! than heap handles. [`VertexQueue`] keeps the handle bookkeeping in an
//! `FxHashMap` so that "relax this vertex" is a single call: the first sighting
//! enqueues it and any later improvement becomes a `change_key`.

use rustc_hash::FxHashMap;
use std::hash::Hash;

use crate::cell::CellHandle;
use crate::fibonacci::FibonacciHeap;
use crate::order::Direction;
use crate::traits::HeapError;

/// Priority queue of vertices keyed by distance
///
/// ```rust
/// use rust_fibonacci_heap::VertexQueue;
///
/// let mut queue = VertexQueue::new();
/// assert!(queue.enqueue('a', 10));
/// assert!(queue.enqueue('b', 4));
/// assert!(queue.enqueue('a', 2)); // improved
/// assert!(!queue.enqueue('a', 7)); // not an improvement, ignored
/// assert_eq!(queue.dequeue(), Some(('a', 2)));
/// ```
pub struct VertexQueue<V, D> {
    heap: FibonacciHeap<V, D>,
    handles: FxHashMap<V, CellHandle<V, D>>,
}

impl<V, D> VertexQueue<V, D>
where
    V: Clone + Eq + Hash,
    D: Ord,
{
    /// Creates a queue that yields the smallest distance first
    pub fn new() -> Self {
        Self::with_direction(Direction::Increasing)
    }

    /// Creates a queue with the given direction; `Decreasing` yields the
    /// largest distance first (e.g. widest-path searches)
    pub fn with_direction(direction: Direction) -> Self {
        VertexQueue {
            heap: FibonacciHeap::with_direction(direction),
            handles: FxHashMap::default(),
        }
    }

    /// Number of queued vertices
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns true if no vertex is queued
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns true if the vertex is currently queued
    pub fn contains(&self, vertex: &V) -> bool {
        self.handles.contains_key(vertex)
    }

    /// Queues a vertex, or improves the distance of one already queued.
    ///
    /// Returns false when the vertex was already queued with an equal or
    /// better distance; the queue is unchanged in that case.
    pub fn enqueue(&mut self, vertex: V, distance: D) -> bool {
        if let Some(handle) = self.handles.get(&vertex) {
            let improves = self
                .heap
                .with_priority(handle, |current| self.heap.order.precedes(&distance, current))
                .unwrap_or(false);
            return improves && self.heap.change_key(handle, distance).is_ok();
        }

        let handle = self.heap.enqueue(distance, vertex.clone());
        self.handles.insert(vertex, handle);
        true
    }

    /// Sets the distance of a queued vertex, in either direction
    ///
    /// # Errors
    /// `HeapError::InvalidHandle` if the vertex is not queued.
    pub fn update(&mut self, vertex: &V, distance: D) -> Result<(), HeapError> {
        let handle = self.handles.get(vertex).ok_or(HeapError::InvalidHandle)?;
        self.heap.change_key(handle, distance)
    }

    /// Removes and returns the best vertex with its distance
    pub fn dequeue(&mut self) -> Option<(V, D)> {
        let (distance, vertex) = self.heap.pop()?;
        self.handles.remove(&vertex);
        Some((vertex, distance))
    }

    /// Returns copies of the best vertex and its distance
    pub fn peek(&self) -> Option<(V, D)>
    where
        D: Clone,
    {
        let (distance, vertex) = self.heap.peek().ok()?;
        Some((vertex.clone(), distance.clone()))
    }

    /// Returns the queued distance of a vertex
    pub fn distance(&self, vertex: &V) -> Option<D>
    where
        D: Clone,
    {
        let handle = self.handles.get(vertex)?;
        self.heap.priority(handle).ok()
    }

    /// Drops a vertex from the queue, returning its distance
    pub fn remove(&mut self, vertex: &V) -> Option<D> {
        let handle = self.handles.remove(vertex)?;
        let (distance, _) = self.heap.delete(&handle).ok()?;
        Some(distance)
    }
}

impl<V, D> Default for VertexQueue<V, D>
where
    V: Clone + Eq + Hash,
    D: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}
