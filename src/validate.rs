//! Structural self-check
//!
//! Walks every ring of the heap and verifies the properties the amortized
//! bounds depend on. This is O(n) and meant for tests and debugging.

use rc_circular_list::{Linked, RingOps};
use std::fmt;
use std::rc::Rc;

use crate::cell::CellRef;
use crate::fibonacci::FibonacciHeap;
use crate::order::{Comparator, Order};

/// A broken structural invariant found by [`FibonacciHeap::check_invariants`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The element count does not match the number of reachable cells
    CountMismatch { recorded: usize, found: usize },
    /// The cached top is missing, not a root, or not the best root
    StaleExtremum,
    /// A sibling's `prev` link does not point back at its predecessor
    BrokenRing,
    /// A cell's parent link disagrees with the ring it is in
    BrokenParentLink,
    /// A child is strictly better than its parent
    HeapOrder,
    /// A root carries the child-lost mark
    MarkedRoot,
    /// A cell's recorded degree differs from its number of children
    WrongDegree { recorded: usize, found: usize },
    /// A subtree is smaller than its degree allows
    TooSmall { degree: usize, size: usize },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantViolation::CountMismatch { recorded, found } => {
                write!(f, "heap records {recorded} elements but {found} are reachable")
            }
            InvariantViolation::StaleExtremum => write!(f, "cached top is not the best root"),
            InvariantViolation::BrokenRing => write!(f, "sibling ring links are inconsistent"),
            InvariantViolation::BrokenParentLink => write!(f, "parent link is inconsistent"),
            InvariantViolation::HeapOrder => write!(f, "child is better than its parent"),
            InvariantViolation::MarkedRoot => write!(f, "root is marked"),
            InvariantViolation::WrongDegree { recorded, found } => {
                write!(f, "cell records degree {recorded} but has {found} children")
            }
            InvariantViolation::TooSmall { degree, size } => {
                write!(f, "subtree of degree {degree} holds only {size} cells")
            }
        }
    }
}

impl std::error::Error for InvariantViolation {}

impl<T, P, C: Comparator<P>> FibonacciHeap<T, P, C> {
    /// Verifies ring links, parent links, heap order, marks, degrees, subtree
    /// sizes, the element count and the cached top.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let Some(top) = &self.extremum else {
            return if self.len == 0 && self.roots.is_empty() {
                Ok(())
            } else {
                Err(InvariantViolation::StaleExtremum)
            };
        };

        let mut top_is_root = false;
        for root in self.roots.iter() {
            if Rc::ptr_eq(&root, top) {
                top_is_root = true;
            } else if self
                .order
                .precedes(&root.state.borrow().priority, &top.state.borrow().priority)
            {
                return Err(InvariantViolation::StaleExtremum);
            }
        }
        if !top_is_root {
            return Err(InvariantViolation::StaleExtremum);
        }

        let found = check_forest(&self.order, self.roots.head())?;
        if found != self.len {
            return Err(InvariantViolation::CountMismatch {
                recorded: self.len,
                found,
            });
        }
        Ok(())
    }
}

/// Checks every cell reachable from the root ring, returning how many were
/// found.
///
/// Trees can be as deep as the heap is large, so the walk keeps its own stack
/// of rings still to visit. Cells are recorded in pre-order next to the index
/// of their parent; subtree sizes are then summed in reverse, which sees every
/// child before its parent.
fn check_forest<T, P, C: Comparator<P>>(
    order: &Order<C>,
    roots: Option<&CellRef<T, P>>,
) -> Result<usize, InvariantViolation> {
    let mut visited: Vec<(CellRef<T, P>, Option<usize>)> = Vec::new();
    let mut pending: Vec<(CellRef<T, P>, Option<usize>)> = Vec::new();
    if let Some(head) = roots {
        pending.push((Rc::clone(head), None));
    }

    while let Some((head, parent)) = pending.pop() {
        for cell in RingOps::iter(&head) {
            check_cell(order, &cell, parent.map(|index| &visited[index].0))?;

            let index = visited.len();
            if let Some(child) = cell.state.borrow().children.head() {
                pending.push((Rc::clone(child), Some(index)));
            }
            visited.push((cell, parent));
        }
    }

    let mut sizes = vec![1usize; visited.len()];
    for (index, (cell, parent)) in visited.iter().enumerate().rev() {
        let degree = cell.state.borrow().degree;
        let size = sizes[index];
        if size < minimum_size(degree) {
            return Err(InvariantViolation::TooSmall { degree, size });
        }
        if let Some(parent) = *parent {
            sizes[parent] += size;
        }
    }
    Ok(visited.len())
}

/// Checks one cell against its ring neighbour and its parent.
fn check_cell<T, P, C: Comparator<P>>(
    order: &Order<C>,
    cell: &CellRef<T, P>,
    parent: Option<&CellRef<T, P>>,
) -> Result<(), InvariantViolation> {
    let next = cell.ring_link().next().ok_or(InvariantViolation::BrokenRing)?;
    if !next.ring_link().prev().is_some_and(|prev| Rc::ptr_eq(&prev, cell)) {
        return Err(InvariantViolation::BrokenRing);
    }

    let state = cell.state.borrow();
    match parent {
        None => {
            if !state.is_root() {
                return Err(InvariantViolation::BrokenParentLink);
            }
            if state.marked {
                return Err(InvariantViolation::MarkedRoot);
            }
        }
        Some(parent) => {
            if !state.parent.upgrade().is_some_and(|p| Rc::ptr_eq(&p, parent)) {
                return Err(InvariantViolation::BrokenParentLink);
            }
            if order.precedes(&state.priority, &parent.state.borrow().priority) {
                return Err(InvariantViolation::HeapOrder);
            }
        }
    }

    let children = state.children.len();
    if children != state.degree {
        return Err(InvariantViolation::WrongDegree {
            recorded: state.degree,
            found: children,
        });
    }
    Ok(())
}

/// Smallest subtree a cell of this degree can root: the Fibonacci number
/// F(degree + 2).
fn minimum_size(degree: usize) -> usize {
    let (mut smaller, mut minimum) = (1usize, 1usize);
    for _ in 0..degree {
        (smaller, minimum) = (minimum, smaller.saturating_add(minimum));
    }
    minimum
}
