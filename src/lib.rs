//! Mergeable Fibonacci heap with cell handles
//!
//! This crate provides a Fibonacci heap priority queue whose elements are
//! addressed through handles, so they can be reprioritized or removed after
//! insertion.
//!
//! # Features
//!
//! - O(1) amortized `enqueue`, `merge`, and `change_key` toward the top
//! - O(log n) amortized `dequeue` and `delete`
//! - Min-heap or max-heap via [`Direction`], custom orderings via [`Comparator`]
//! - Stale and foreign handles are reported as errors, never undefined behaviour
//! - A vertex-keyed adapter and Dijkstra / A* / Prim built on it
//!
//! # Example
//!
//! ```rust
//! use rust_fibonacci_heap::{Direction, FibonacciHeap, HeapError};
//!
//! let mut heap = FibonacciHeap::new();
//! let handle1 = heap.enqueue(5, "item1");
//! let _handle2 = heap.enqueue(3, "item2");
//! heap.change_key(&handle1, 1).unwrap();
//! assert_eq!(heap.dequeue(), Ok((1, "item1")));
//! assert_eq!(heap.change_key(&handle1, 0), Err(HeapError::InvalidHandle));
//!
//! let mut max_heap = FibonacciHeap::with_direction(Direction::Decreasing);
//! max_heap.enqueue(1, "a");
//! assert_eq!(heap.merge(&mut max_heap), Err(HeapError::IncompatibleMerge));
//! ```

pub mod builder;
mod cell;
pub mod drain;
pub mod fibonacci;
pub mod order;
pub mod pathfinding;
pub mod traits;
pub mod validate;
pub mod vertex_queue;

pub use builder::HeapBuilder;
pub use cell::CellHandle;
pub use drain::{DrainSorted, IntoSorted};
pub use fibonacci::FibonacciHeap;
pub use order::{Comparator, Direction, NaturalOrder, ParseDirectionError};
pub use traits::{AddressableHeap, Handle, Heap, HeapError};
pub use validate::InvariantViolation;
pub use vertex_queue::VertexQueue;
