//! Ordering policy: a comparator plus a direction
//!
//! Every comparison the heap makes goes through [`Order::compare`], which
//! applies the configured [`Direction`] to the comparator's result. The heap
//! algorithms are written once in terms of "better" and never branch on the
//! direction themselves.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Whether the heap keeps its minimum or its maximum on top
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Min-heap: the smallest priority is dequeued first
    #[default]
    Increasing,
    /// Max-heap: the largest priority is dequeued first
    Decreasing,
}

impl Direction {
    /// Returns the opposite direction
    pub fn reverse(self) -> Self {
        match self {
            Direction::Increasing => Direction::Decreasing,
            Direction::Decreasing => Direction::Increasing,
        }
    }

    /// Orients a comparator result so that `Less` always means "better"
    #[inline]
    pub fn orient(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Increasing => ordering,
            Direction::Decreasing => ordering.reverse(),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Increasing => write!(f, "increasing"),
            Direction::Decreasing => write!(f, "decreasing"),
        }
    }
}

/// Error returned when parsing a [`Direction`] from a string fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDirectionError {
    input: String,
}

impl ParseDirectionError {
    /// The text that could not be parsed
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for ParseDirectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown direction '{}' (expected 'increasing' or 'decreasing')",
            self.input
        )
    }
}

impl std::error::Error for ParseDirectionError {}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "increasing" | "min" => Ok(Direction::Increasing),
            "decreasing" | "max" => Ok(Direction::Decreasing),
            _ => Err(ParseDirectionError {
                input: s.to_string(),
            }),
        }
    }
}

/// A total order over priorities
///
/// Implementations must be side-effect free and stable for the lifetime of
/// every heap that uses them, including heaps merged together.
///
/// Any `Fn(&P, &P) -> Ordering` closure is a comparator:
///
/// ```rust
/// use rust_fibonacci_heap::order::{Comparator, Direction};
/// use rust_fibonacci_heap::FibonacciHeap;
///
/// let by_len = |a: &String, b: &String| a.len().cmp(&b.len());
/// assert!(by_len.compare(&"ab".to_string(), &"abc".to_string()).is_lt());
///
/// let mut heap = FibonacciHeap::with_comparator(by_len, Direction::Increasing);
/// heap.enqueue("three".to_string(), 3);
/// heap.enqueue("one".to_string(), 1);
/// assert_eq!(heap.dequeue().unwrap(), ("one".to_string(), 1));
/// ```
pub trait Comparator<P> {
    /// Compares two priorities
    fn compare(&self, a: &P, b: &P) -> Ordering;
}

/// The priority type's own [`Ord`] implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NaturalOrder;

impl<P: Ord> Comparator<P> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &P, b: &P) -> Ordering {
        a.cmp(b)
    }
}

impl<P, F> Comparator<P> for F
where
    F: Fn(&P, &P) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &P, b: &P) -> Ordering {
        self(a, b)
    }
}

/// A comparator together with the direction it is applied in
#[derive(Debug, Clone, Copy, Default)]
pub struct Order<C> {
    comparator: C,
    direction: Direction,
}

impl<C> Order<C> {
    /// Creates a policy from a comparator and a direction
    pub fn new(comparator: C, direction: Direction) -> Self {
        Order {
            comparator,
            direction,
        }
    }

    /// The configured direction
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The underlying comparator
    #[inline]
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Compares two priorities; `Less` means `a` belongs closer to the top
    #[inline]
    pub fn compare<P>(&self, a: &P, b: &P) -> Ordering
    where
        C: Comparator<P>,
    {
        self.direction.orient(self.comparator.compare(a, b))
    }

    /// Returns true if `a` is strictly better than `b`
    #[inline]
    pub fn precedes<P>(&self, a: &P, b: &P) -> bool
    where
        C: Comparator<P>,
    {
        self.compare(a, b) == Ordering::Less
    }
}
