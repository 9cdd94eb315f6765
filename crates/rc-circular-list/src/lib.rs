//! Circular doubly-linked rings of reference-counted nodes.
//!
//! This crate provides the sibling-ring primitive used by Fibonacci-style heaps:
//! every node embeds a [`RingLink`] and the ring itself owns its members through
//! the strong `next` pointers. `prev` pointers are weak, so a ring never forms a
//! reference cycle in the backward direction.
//!
//! # Circular vs Linear Lists
//!
//! In a circular list:
//! - A single node points to itself (both `next` and `prev`)
//! - There is no head or tail - any node can be the "entry point"
//! - Splicing two rings together is O(1)
//! - Iteration wraps around (must track starting point)
//!
//! # Ownership
//!
//! Because the forward links are strong, a ring keeps itself alive. Rings must
//! be dismantled with [`Ring::drain`] (or by dropping the owning [`Ring`], which
//! drains it) before their nodes can be freed.
//!
//! # Example
//!
//! ```rust
//! use rc_circular_list::{Linked, Ring, RingLink};
//! use std::rc::Rc;
//!
//! struct Node {
//!     link: RingLink<Node>,
//!     value: i32,
//! }
//!
//! impl Linked for Node {
//!     fn ring_link(&self) -> &RingLink<Node> {
//!         &self.link
//!     }
//! }
//!
//! let mut ring = Ring::new();
//! ring.push_back(Rc::new(Node { link: RingLink::new(), value: 1 }));
//! ring.push_back(Rc::new(Node { link: RingLink::new(), value: 2 }));
//!
//! let values: Vec<i32> = ring.iter().map(|n| n.value).collect();
//! assert_eq!(values, vec![1, 2]);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::iter::FusedIterator;
use std::rc::{Rc, Weak};

// =============================================================================
// RingLink
// =============================================================================

/// Link embedded in a node that allows it to be a member of one ring.
///
/// When unlinked, `next` is `None` and `prev` is dangling.
/// When linked (even as a single node), both point to members of the ring.
pub struct RingLink<N> {
    next: RefCell<Option<Rc<N>>>,
    prev: RefCell<Weak<N>>,
}

impl<N> RingLink<N> {
    /// Creates a new unlinked `RingLink`.
    #[inline]
    pub fn new() -> Self {
        RingLink {
            next: RefCell::new(None),
            prev: RefCell::new(Weak::new()),
        }
    }

    /// Checks whether the link is part of a ring.
    #[inline]
    pub fn is_linked(&self) -> bool {
        self.next.borrow().is_some()
    }

    /// Gets the next member of the ring.
    #[inline]
    pub fn next(&self) -> Option<Rc<N>> {
        self.next.borrow().clone()
    }

    /// Gets the previous member of the ring.
    #[inline]
    pub fn prev(&self) -> Option<Rc<N>> {
        self.prev.borrow().upgrade()
    }

    #[inline]
    fn set_next(&self, next: Option<Rc<N>>) -> Option<Rc<N>> {
        self.next.replace(next)
    }

    #[inline]
    fn set_prev(&self, prev: &Rc<N>) {
        *self.prev.borrow_mut() = Rc::downgrade(prev);
    }

    /// Resets both pointers, returning the old `next`.
    #[inline]
    fn clear(&self) -> Option<Rc<N>> {
        *self.prev.borrow_mut() = Weak::new();
        self.next.take()
    }
}

impl<N> Default for RingLink<N> {
    #[inline]
    fn default() -> Self {
        RingLink::new()
    }
}

impl<N> fmt::Debug for RingLink<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_linked() {
            write!(f, "RingLink(linked)")
        } else {
            write!(f, "RingLink(unlinked)")
        }
    }
}

/// Types that embed a [`RingLink`] pointing at their own type.
pub trait Linked: Sized {
    /// Returns the node's sibling link.
    fn ring_link(&self) -> &RingLink<Self>;
}

// =============================================================================
// RingOps
// =============================================================================

/// Operations for manipulating rings through their member nodes.
///
/// All operations are O(1) except [`RingOps::count`].
///
/// # Panics
///
/// Operations that require a linked node panic if handed an unlinked one;
/// this is a caller bug, equivalent to dereferencing a dangling pointer in an
/// intrusive list.
#[derive(Clone, Copy, Default, Debug)]
pub struct RingOps;

impl RingOps {
    /// Makes a single node into a ring of one element.
    ///
    /// After this, `node.next == node` and `node.prev == node`.
    #[inline]
    pub fn make_circular<N: Linked>(node: &Rc<N>) {
        let link = node.ring_link();
        debug_assert!(!link.is_linked(), "node is already linked");
        link.set_prev(node);
        link.set_next(Some(Rc::clone(node)));
    }

    /// Inserts `new` after `at`.
    ///
    /// `at` must be linked and `new` must not be.
    pub fn insert_after<N: Linked>(at: &Rc<N>, new: &Rc<N>) {
        debug_assert!(!new.ring_link().is_linked(), "new is already linked");

        let next = at
            .ring_link()
            .set_next(Some(Rc::clone(new)))
            .expect("insertion point is not linked");

        new.ring_link().set_prev(at);
        next.ring_link().set_prev(new);
        new.ring_link().set_next(Some(next));
    }

    /// Inserts `new` before `at`, i.e. at the tail of a ring whose head is `at`.
    ///
    /// `at` must be linked and `new` must not be.
    pub fn insert_before<N: Linked>(at: &Rc<N>, new: &Rc<N>) {
        let prev = at.ring_link().prev().expect("insertion point is not linked");
        Self::insert_after(&prev, new);
    }

    /// Removes a node from its ring and unlinks it.
    ///
    /// Returns `true` if the node was the only element (the ring is now empty),
    /// `false` if other nodes remain.
    pub fn remove<N: Linked>(node: &Rc<N>) -> bool {
        let link = node.ring_link();
        debug_assert!(link.is_linked(), "node is not linked");

        let prev = link.prev();
        match (prev, link.clear()) {
            (Some(prev), Some(next)) if !Rc::ptr_eq(&next, node) => {
                next.ring_link().set_prev(&prev);
                prev.ring_link().set_next(Some(next));
                false
            }
            _ => true,
        }
    }

    /// Splices two rings together.
    ///
    /// Returns an entry point into the merged ring, or `None` if both were empty.
    /// If either is `None`, returns the other.
    ///
    /// ```text
    /// Before:
    ///   Ring A: ... <-> a_prev <-> a <-> ...
    ///   Ring B: ... <-> b_prev <-> b <-> ...
    ///
    /// After:
    ///   ... <-> a_prev <-> b <-> ... <-> b_prev <-> a <-> ...
    /// ```
    pub fn splice<N: Linked>(a: Option<Rc<N>>, b: Option<Rc<N>>) -> Option<Rc<N>> {
        match (a, b) {
            (None, None) => None,
            (Some(a), None) | (None, Some(a)) => Some(a),
            (Some(a), Some(b)) => {
                let a_prev = a.ring_link().prev().expect("ring member is not linked");
                let b_prev = b.ring_link().prev().expect("ring member is not linked");

                a_prev.ring_link().set_next(Some(Rc::clone(&b)));
                b.ring_link().set_prev(&a_prev);

                b_prev.ring_link().set_next(Some(Rc::clone(&a)));
                a.ring_link().set_prev(&b_prev);

                Some(a)
            }
        }
    }

    /// Counts the members of the ring containing `start`.
    ///
    /// This is O(n) - use sparingly.
    pub fn count<N: Linked>(start: &Rc<N>) -> usize {
        Self::iter(start).count()
    }

    /// Iterates the ring forward, starting (and ending) at `start`.
    ///
    /// The ring must not be restructured while the iterator is alive.
    pub fn iter<N: Linked>(start: &Rc<N>) -> Iter<N> {
        Iter {
            start: Some(Rc::clone(start)),
            current: Some(Rc::clone(start)),
        }
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Forward iterator over the members of a ring.
pub struct Iter<N: Linked> {
    start: Option<Rc<N>>,
    current: Option<Rc<N>>,
}

impl<N: Linked> Iterator for Iter<N> {
    type Item = Rc<N>;

    fn next(&mut self) -> Option<Rc<N>> {
        let current = self.current.take()?;
        let start = self.start.as_ref();
        self.current = current
            .ring_link()
            .next()
            .filter(|next| !start.is_some_and(|start| Rc::ptr_eq(next, start)));
        Some(current)
    }
}

impl<N: Linked> FusedIterator for Iter<N> {}

/// Iterator that dismantles a ring, yielding each member unlinked.
///
/// Dropping the iterator early still unlinks the remaining members.
pub struct Drain<N: Linked> {
    current: Option<Rc<N>>,
}

impl<N: Linked> Drain<N> {
    fn new(start: Option<Rc<N>>) -> Self {
        if let Some(start) = &start {
            // Break the cycle so the walk below terminates at the tail.
            if let Some(last) = start.ring_link().prev() {
                last.ring_link().set_next(None);
            }
        }
        Drain { current: start }
    }
}

impl<N: Linked> Iterator for Drain<N> {
    type Item = Rc<N>;

    fn next(&mut self) -> Option<Rc<N>> {
        let current = self.current.take()?;
        self.current = current.ring_link().clear();
        Some(current)
    }
}

impl<N: Linked> FusedIterator for Drain<N> {}

impl<N: Linked> Drop for Drain<N> {
    fn drop(&mut self) {
        for _ in self.by_ref() {}
    }
}

// =============================================================================
// Ring
// =============================================================================

/// An owned ring with a designated head.
///
/// `push_back` appends at the tail (just before the head), so iteration from
/// the head visits nodes in insertion order.
pub struct Ring<N: Linked> {
    head: Option<Rc<N>>,
}

impl<N: Linked> Ring<N> {
    /// Creates an empty ring.
    pub fn new() -> Self {
        Ring { head: None }
    }

    /// Returns true if the ring has no members.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns the current entry point of the ring.
    #[inline]
    pub fn head(&self) -> Option<&Rc<N>> {
        self.head.as_ref()
    }

    /// Counts the members. O(n).
    pub fn len(&self) -> usize {
        self.head.as_ref().map_or(0, RingOps::count)
    }

    /// Appends an unlinked node at the tail. O(1).
    pub fn push_back(&mut self, node: Rc<N>) {
        match &self.head {
            None => {
                RingOps::make_circular(&node);
                self.head = Some(node);
            }
            Some(head) => RingOps::insert_before(head, &node),
        }
    }

    /// Removes a member of this ring. O(1).
    ///
    /// The node must belong to this ring; removing a node that belongs to a
    /// different ring corrupts both.
    pub fn remove(&mut self, node: &Rc<N>) {
        let successor = node.ring_link().next();
        if RingOps::remove(node) {
            self.head = None;
        } else if self.head.as_ref().is_some_and(|head| Rc::ptr_eq(head, node)) {
            self.head = successor;
        }
    }

    /// Moves every member of `other` into this ring, leaving `other` empty. O(1).
    pub fn append(&mut self, other: &mut Ring<N>) {
        self.head = RingOps::splice(self.head.take(), other.head.take());
    }

    /// Detaches the whole ring, leaving `self` empty. O(1).
    pub fn take(&mut self) -> Ring<N> {
        Ring {
            head: self.head.take(),
        }
    }

    /// Iterates from the head.
    pub fn iter(&self) -> Iter<N> {
        Iter {
            start: self.head.clone(),
            current: self.head.clone(),
        }
    }

    /// Empties the ring, yielding its members unlinked in ring order.
    pub fn drain(&mut self) -> Drain<N> {
        Drain::new(self.head.take())
    }
}

impl<N: Linked> Default for Ring<N> {
    fn default() -> Self {
        Ring::new()
    }
}

impl<N: Linked> Drop for Ring<N> {
    fn drop(&mut self) {
        drop(self.drain());
    }
}

impl<N: Linked> fmt::Debug for Ring<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ring").field("len", &self.len()).finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
