//! Fluent configuration for [`FibonacciHeap`]

use crate::fibonacci::FibonacciHeap;
use crate::order::{Comparator, Direction, NaturalOrder};

/// Builder for heaps with a non-default direction or comparator.
///
/// ```rust
/// use rust_fibonacci_heap::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::builder()
///     .direction("max".parse().unwrap())
///     .comparator(|a: &u32, b: &u32| (a % 10).cmp(&(b % 10)))
///     .build();
/// heap.enqueue(19, "nine");
/// heap.enqueue(25, "five");
/// assert_eq!(heap.dequeue(), Ok((19, "nine")));
/// ```
#[derive(Debug, Clone)]
pub struct HeapBuilder<C = NaturalOrder> {
    comparator: C,
    direction: Direction,
}

impl HeapBuilder<NaturalOrder> {
    /// Creates a builder for a min-heap ordered by `P: Ord`.
    pub fn new() -> Self {
        HeapBuilder {
            comparator: NaturalOrder,
            direction: Direction::default(),
        }
    }
}

impl Default for HeapBuilder<NaturalOrder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> HeapBuilder<C> {
    /// Sets which end of the order is dequeued first.
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Shorthand for `direction(Direction::Increasing)`.
    pub fn min_first(self) -> Self {
        self.direction(Direction::Increasing)
    }

    /// Shorthand for `direction(Direction::Decreasing)`.
    pub fn max_first(self) -> Self {
        self.direction(Direction::Decreasing)
    }

    /// Replaces the comparator.
    pub fn comparator<D>(self, comparator: D) -> HeapBuilder<D> {
        HeapBuilder {
            comparator,
            direction: self.direction,
        }
    }

    /// Creates the empty heap.
    pub fn build<T, P>(self) -> FibonacciHeap<T, P, C>
    where
        C: Comparator<P>,
    {
        FibonacciHeap::with_comparator(self.comparator, self.direction)
    }
}
