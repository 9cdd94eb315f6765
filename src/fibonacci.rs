//! Fibonacci Heap implementation
//!
//! A Fibonacci heap is a data structure for priority queue operations with:
//! - O(1) amortized insert, change_key (in the improving direction), and merge
//! - O(log n) amortized dequeue and delete
//!
//! The structure consists of a collection of heap-ordered trees. Roots are linked
//! in a circular doubly linked list and the heap caches a pointer to the best
//! root. Children of a node form their own ring.
//!
//! Cells are reference counted and owned by the rings they sit in; callers get
//! weak [`CellHandle`]s back, so a handle to an element that has since been
//! dequeued is detected and rejected instead of touching freed memory.

use rc_circular_list::Ring;
use smallvec::SmallVec;
use std::cell::Ref;
use std::cmp::Ordering;
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::{debug, trace};

use crate::builder::HeapBuilder;
use crate::cell::{CellHandle, CellNode, CellRef, OwnerTag};
use crate::order::{Comparator, Direction, NaturalOrder, Order};
use crate::traits::{AddressableHeap, Heap, HeapError};

/// Fibonacci Heap
///
/// `T` is the item type, `P` the priority type and `C` the comparator. The
/// default comparator uses `P: Ord`; the default direction is
/// [`Direction::Increasing`] (min-heap).
///
/// # Example
///
/// ```rust
/// use rust_fibonacci_heap::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// let handle = heap.enqueue(5, "item");
/// heap.enqueue(3, "other");
/// heap.change_key(&handle, 1).unwrap();
/// assert_eq!(heap.dequeue(), Ok((1, "item")));
/// assert_eq!(heap.dequeue(), Ok((3, "other")));
/// ```
pub struct FibonacciHeap<T, P, C = NaturalOrder> {
    pub(crate) roots: Ring<CellNode<T, P>>,
    pub(crate) extremum: Option<CellRef<T, P>>,
    pub(crate) len: usize,
    pub(crate) order: Order<C>,
    owner: Rc<OwnerTag>,
}

impl<T, P: Ord> FibonacciHeap<T, P> {
    /// Creates an empty min-heap ordered by `P: Ord`
    pub fn new() -> Self {
        Self::with_direction(Direction::Increasing)
    }

    /// Creates an empty heap ordered by `P: Ord` in the given direction
    pub fn with_direction(direction: Direction) -> Self {
        Self::with_comparator(NaturalOrder, direction)
    }
}

impl FibonacciHeap<(), ()> {
    /// Starts configuring a heap; the item and priority types are chosen by
    /// [`HeapBuilder::build`]
    pub fn builder() -> HeapBuilder {
        HeapBuilder::new()
    }
}

impl<T, P: Ord> Default for FibonacciHeap<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P, C> FibonacciHeap<T, P, C> {
    /// Returns the number of elements in the heap
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the heap is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.extremum.is_none()
    }

    /// Whether this heap keeps its minimum or its maximum on top
    #[inline]
    pub fn direction(&self) -> Direction {
        self.order.direction()
    }

    /// Removes every element. All outstanding handles become stale.
    pub fn clear(&mut self) {
        self.teardown();
    }

    /// Dismantles every ring without recursion; dropping a deep tree through
    /// nested `Ring` destructors would otherwise recurse once per level.
    fn teardown(&mut self) {
        self.extremum = None;
        self.len = 0;

        let mut pending = vec![self.roots.take()];
        while let Some(mut ring) = pending.pop() {
            for cell in ring.drain() {
                let children = cell.state.borrow_mut().children.take();
                if !children.is_empty() {
                    pending.push(children);
                }
            }
        }
    }
}

impl<T, P, C: Comparator<P>> FibonacciHeap<T, P, C> {
    /// Creates an empty heap using a custom comparator
    pub fn with_comparator(comparator: C, direction: Direction) -> Self {
        FibonacciHeap {
            roots: Ring::new(),
            extremum: None,
            len: 0,
            order: Order::new(comparator, direction),
            owner: OwnerTag::new(),
        }
    }

    /// Inserts an element, returning a handle for later `change_key`/`delete`
    ///
    /// # Time Complexity
    /// O(1)
    pub fn enqueue(&mut self, priority: P, item: T) -> CellHandle<T, P> {
        let cell = CellNode::new(priority, item, Rc::clone(&self.owner));
        let handle = CellHandle::new(&cell);

        self.roots.push_back(Rc::clone(&cell));
        self.promote_if_better(&cell);
        self.len += 1;
        handle
    }

    /// Returns the top priority and item without removing them
    ///
    /// # Errors
    /// Returns `HeapError::Empty` if the heap has no elements.
    pub fn peek(&self) -> Result<(Ref<'_, P>, Ref<'_, T>), HeapError> {
        let top = self.extremum.as_ref().ok_or(HeapError::Empty)?;
        Ok(Ref::map_split(top.state.borrow(), |state| {
            (&state.priority, &state.item)
        }))
    }

    /// Removes and returns the top priority and item
    ///
    /// The children of the removed root join the root list, then roots of
    /// equal degree are linked pairwise until all degrees are distinct.
    ///
    /// # Errors
    /// Returns `HeapError::Empty` if the heap has no elements.
    ///
    /// # Time Complexity
    /// O(log n) amortized, O(n) worst case
    pub fn dequeue(&mut self) -> Result<(P, T), HeapError> {
        let top = self.extremum.take().ok_or(HeapError::Empty)?;

        self.promote_children(&top);
        self.roots.remove(&top);
        self.len -= 1;

        if !self.roots.is_empty() {
            self.consolidate();
        }

        match CellNode::reclaim(top) {
            Ok(entry) => Ok(entry),
            Err(_) => unreachable!("dequeued cell is still linked into the heap"),
        }
    }

    /// Removes and returns the top element, or `None` if the heap is empty
    pub fn pop(&mut self) -> Option<(P, T)> {
        self.dequeue().ok()
    }

    /// Reprioritizes an element
    ///
    /// Setting a priority that compares equal to the current one is a no-op.
    /// Improving the priority (decrease-key on a min-heap) cuts the element
    /// loose when it beats its parent and cascades through marked ancestors.
    /// Worsening it is also allowed: the element and its children are moved to
    /// the root list so heap order is preserved.
    ///
    /// # Errors
    /// `HeapError::InvalidHandle` if the element was removed,
    /// `HeapError::ForeignHandle` if it belongs to another heap. The heap is
    /// unchanged on error.
    ///
    /// # Time Complexity
    /// O(1) amortized when improving, O(log n) amortized when worsening
    pub fn change_key(&mut self, handle: &CellHandle<T, P>, priority: P) -> Result<(), HeapError> {
        let cell = self.resolve(handle)?;
        let ordering = self.order.compare(&priority, &cell.state.borrow().priority);

        match ordering {
            Ordering::Equal => {}
            Ordering::Less => {
                cell.state.borrow_mut().priority = priority;
                self.improve(cell);
            }
            Ordering::Greater => {
                cell.state.borrow_mut().priority = priority;
                self.worsen(cell);
            }
        }
        Ok(())
    }

    /// Removes an arbitrary element, returning its priority and item
    ///
    /// The element is cut to the root list exactly as if its priority had been
    /// improved past every other element, then extracted.
    ///
    /// # Errors
    /// Same as [`change_key`](Self::change_key).
    pub fn delete(&mut self, handle: &CellHandle<T, P>) -> Result<(P, T), HeapError> {
        let cell = self.resolve(handle)?;
        if !cell.state.borrow().is_root() {
            self.cut(Rc::clone(&cell));
        }
        self.extremum = Some(cell);
        self.dequeue()
    }

    /// Moves every element of `other` into this heap, leaving `other` empty
    ///
    /// Handles issued by `other` stay valid and now refer to elements of `self`.
    ///
    /// # Errors
    /// Returns `HeapError::IncompatibleMerge` if the heaps have different
    /// directions; neither heap is modified.
    ///
    /// # Time Complexity
    /// O(1)
    pub fn merge(&mut self, other: &mut Self) -> Result<(), HeapError> {
        if self.direction() != other.direction() {
            debug!(
                ours = %self.direction(),
                theirs = %other.direction(),
                "rejected merge of heaps with different directions"
            );
            return Err(HeapError::IncompatibleMerge);
        }
        if other.is_empty() {
            return Ok(());
        }

        OwnerTag::forward_to(&other.owner, &self.owner);
        other.owner = OwnerTag::new();

        self.roots.append(&mut other.roots);
        self.len += std::mem::take(&mut other.len);
        if let Some(top) = other.extremum.take() {
            self.promote_if_better(&top);
        }
        Ok(())
    }

    /// Returns true if the handle refers to an element currently in this heap
    pub fn contains(&self, handle: &CellHandle<T, P>) -> bool {
        handle.upgrade().is_some_and(|cell| self.owns(&cell))
    }

    /// Returns a copy of the element's current priority
    pub fn priority(&self, handle: &CellHandle<T, P>) -> Result<P, HeapError>
    where
        P: Clone,
    {
        let cell = self.resolve(handle)?;
        let priority = cell.state.borrow().priority.clone();
        Ok(priority)
    }

    /// Calls `f` with the element's current priority without cloning it
    pub(crate) fn with_priority<R>(
        &self,
        handle: &CellHandle<T, P>,
        f: impl FnOnce(&P) -> R,
    ) -> Result<R, HeapError> {
        let cell = self.resolve(handle)?;
        let result = f(&cell.state.borrow().priority);
        Ok(result)
    }

    fn owns(&self, cell: &CellRef<T, P>) -> bool {
        let owner = OwnerTag::resolve(&cell.state.borrow().owner);
        Rc::ptr_eq(&owner, &self.owner)
    }

    fn resolve(&self, handle: &CellHandle<T, P>) -> Result<CellRef<T, P>, HeapError> {
        let Some(cell) = handle.upgrade() else {
            debug!("rejected handle to a removed element");
            return Err(HeapError::InvalidHandle);
        };
        if !self.owns(&cell) {
            debug!("rejected handle issued by another heap");
            return Err(HeapError::ForeignHandle);
        }
        Ok(cell)
    }

    /// Makes `cell` the cached extremum if it is strictly better. `cell` must be a root.
    fn promote_if_better(&mut self, cell: &CellRef<T, P>) {
        let better = match &self.extremum {
            None => true,
            Some(top) => {
                !Rc::ptr_eq(top, cell)
                    && self
                        .order
                        .precedes(&cell.state.borrow().priority, &top.state.borrow().priority)
            }
        };
        if better {
            self.extremum = Some(Rc::clone(cell));
        }
    }

    fn rescan_extremum(&mut self) {
        let mut best: Option<CellRef<T, P>> = None;
        for root in self.roots.iter() {
            let better = match &best {
                None => true,
                Some(best) => self
                    .order
                    .precedes(&root.state.borrow().priority, &best.state.borrow().priority),
            };
            if better {
                best = Some(root);
            }
        }
        self.extremum = best;
    }

    /// Moves all children of `cell` to the root list.
    fn promote_children(&mut self, cell: &CellRef<T, P>) {
        let mut children = {
            let mut state = cell.state.borrow_mut();
            state.degree = 0;
            state.children.take()
        };
        for child in children.iter() {
            let mut child_state = child.state.borrow_mut();
            child_state.parent = Weak::new();
            child_state.marked = false;
        }
        self.roots.append(&mut children);
    }

    fn improve(&mut self, cell: CellRef<T, P>) {
        let violates = {
            let state = cell.state.borrow();
            match state.parent.upgrade() {
                Some(parent) => self
                    .order
                    .precedes(&state.priority, &parent.state.borrow().priority),
                None => false,
            }
        };
        if violates {
            self.cut(Rc::clone(&cell));
        }
        if cell.state.borrow().is_root() {
            self.promote_if_better(&cell);
        }
    }

    fn worsen(&mut self, cell: CellRef<T, P>) {
        let was_top = self
            .extremum
            .as_ref()
            .is_some_and(|top| Rc::ptr_eq(top, &cell));

        if !cell.state.borrow().is_root() {
            self.cut(Rc::clone(&cell));
        }
        self.promote_children(&cell);

        if was_top {
            self.rescan_extremum();
        }
    }

    /// Cuts `cell` from its parent into the root list, then keeps cutting
    /// marked ancestors. The first unmarked non-root ancestor gets marked.
    fn cut(&mut self, cell: CellRef<T, P>) {
        let mut current = cell;
        let mut cuts = 0usize;

        loop {
            let parent = current.state.borrow().parent.upgrade();
            let Some(parent) = parent else { break };

            {
                let mut parent_state = parent.state.borrow_mut();
                parent_state.children.remove(&current);
                parent_state.degree -= 1;
            }
            {
                let mut state = current.state.borrow_mut();
                state.parent = Weak::new();
                state.marked = false;
            }
            self.roots.push_back(current);
            cuts += 1;

            let mut parent_state = parent.state.borrow_mut();
            if parent_state.is_root() {
                break;
            }
            if !parent_state.marked {
                parent_state.marked = true;
                break;
            }
            drop(parent_state);
            current = parent;
        }

        if cuts > 1 {
            trace!(cuts, "cascading cut");
        }
    }

    /// Links roots of equal degree until every root degree is unique, then
    /// re-establishes the extremum with one pass over the survivors.
    fn consolidate(&mut self) {
        // Max degree is O(log_phi n); 64 slots covers any heap that fits in memory
        // without spilling in practice.
        let mut by_degree: SmallVec<[Option<CellRef<T, P>>; 64]> = SmallVec::new();
        let mut roots_before = 0usize;

        let order = &self.order;
        for root in self.roots.drain() {
            roots_before += 1;
            let mut tree = root;
            loop {
                let degree = tree.state.borrow().degree;
                if degree >= by_degree.len() {
                    by_degree.resize(degree + 1, None);
                }
                match by_degree[degree].take() {
                    Some(other) => tree = link(order, tree, other),
                    None => {
                        by_degree[degree] = Some(tree);
                        break;
                    }
                }
            }
        }

        self.extremum = None;
        let mut roots_after = 0usize;
        for tree in by_degree.into_iter().flatten() {
            roots_after += 1;
            self.roots.push_back(Rc::clone(&tree));
            self.promote_if_better(&tree);
        }

        trace!(roots_before, roots_after, len = self.len, "consolidated root list");
    }
}

/// Makes the worse of two unlinked roots a child of the better one. Ties keep
/// `a` on top.
fn link<T, P, C: Comparator<P>>(
    order: &Order<C>,
    a: CellRef<T, P>,
    b: CellRef<T, P>,
) -> CellRef<T, P> {
    let b_wins = order.precedes(&b.state.borrow().priority, &a.state.borrow().priority);
    let (parent, child) = if b_wins { (b, a) } else { (a, b) };

    {
        let mut child_state = child.state.borrow_mut();
        child_state.parent = Rc::downgrade(&parent);
        child_state.marked = false;
    }
    {
        let mut parent_state = parent.state.borrow_mut();
        parent_state.children.push_back(child);
        parent_state.degree += 1;
    }
    parent
}

impl<T, P, C> Drop for FibonacciHeap<T, P, C> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<T, P, C> fmt::Debug for FibonacciHeap<T, P, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FibonacciHeap")
            .field("len", &self.len)
            .field("direction", &self.direction())
            .finish_non_exhaustive()
    }
}

impl<T, P, C> Heap<T, P> for FibonacciHeap<T, P, C>
where
    C: Comparator<P> + Default,
{
    fn new() -> Self {
        Self::with_comparator(C::default(), Direction::Increasing)
    }

    fn is_empty(&self) -> bool {
        FibonacciHeap::is_empty(self)
    }

    fn len(&self) -> usize {
        FibonacciHeap::len(self)
    }

    fn push(&mut self, priority: P, item: T) {
        self.enqueue(priority, item);
    }

    fn peek_with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&P, &T) -> R,
    {
        self.peek().ok().map(|(priority, item)| f(&*priority, &*item))
    }

    fn pop(&mut self) -> Option<(P, T)> {
        FibonacciHeap::pop(self)
    }

    fn merge(&mut self, other: &mut Self) -> Result<(), HeapError> {
        FibonacciHeap::merge(self, other)
    }
}

impl<T, P, C> AddressableHeap<T, P> for FibonacciHeap<T, P, C>
where
    C: Comparator<P> + Default,
{
    type Handle = CellHandle<T, P>;

    fn push_with_handle(&mut self, priority: P, item: T) -> Self::Handle {
        self.enqueue(priority, item)
    }

    fn change_key(&mut self, handle: &Self::Handle, new_priority: P) -> Result<(), HeapError> {
        FibonacciHeap::change_key(self, handle, new_priority)
    }

    fn delete(&mut self, handle: &Self::Handle) -> Result<(P, T), HeapError> {
        FibonacciHeap::delete(self, handle)
    }

    fn contains(&self, handle: &Self::Handle) -> bool {
        FibonacciHeap::contains(self, handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_root<T, P>(handle: &CellHandle<T, P>) -> bool {
        let cell = handle.upgrade().unwrap();
        let root = cell.state.borrow().is_root();
        root
    }

    fn is_marked<T, P>(handle: &CellHandle<T, P>) -> bool {
        let cell = handle.upgrade().unwrap();
        let marked = cell.state.borrow().marked;
        marked
    }

    #[test]
    fn test_basic_operations() {
        let mut heap = FibonacciHeap::new();
        assert!(heap.is_empty());
        assert_eq!(heap.len(), 0);

        heap.enqueue(5, "a");
        heap.enqueue(3, "b");
        heap.enqueue(7, "c");

        assert_eq!(heap.len(), 3);
        {
            let (priority, item) = heap.peek().unwrap();
            assert_eq!((*priority, *item), (3, "b"));
        }

        assert_eq!(heap.dequeue(), Ok((3, "b")));
        assert_eq!(heap.dequeue(), Ok((5, "a")));
        assert_eq!(heap.dequeue(), Ok((7, "c")));
        assert_eq!(heap.dequeue(), Err(HeapError::Empty));
        assert!(matches!(heap.peek(), Err(HeapError::Empty)));
    }

    #[test]
    fn test_decrease_key() {
        let mut heap = FibonacciHeap::new();
        let _h1 = heap.enqueue(10, "a");
        let h2 = heap.enqueue(20, "b");
        let h3 = heap.enqueue(30, "c");

        heap.change_key(&h2, 5).unwrap();
        assert_eq!(heap.priority(&h2), Ok(5));
        assert_eq!(*heap.peek().unwrap().1, "b");

        heap.change_key(&h3, 1).unwrap();
        assert_eq!(*heap.peek().unwrap().1, "c");
        heap.check_invariants().unwrap();
    }

    #[test]
    fn test_cascading_cut_marks_then_cuts() {
        let mut heap = FibonacciHeap::new();
        let handles: Vec<_> = (0..10).map(|i| heap.enqueue(i, i)).collect();

        assert_eq!(heap.dequeue(), Ok((0, 0)));
        // 1..=9 consolidate into 1(2, 3(4), 5(6, 7(8))) and 9
        assert!(!is_root(&handles[5]));
        assert!(!is_marked(&handles[5]));

        heap.change_key(&handles[6], 3).unwrap();
        assert!(is_root(&handles[6]));
        assert!(is_marked(&handles[5]), "first child loss marks the parent");
        assert!(!is_root(&handles[5]));

        heap.change_key(&handles[7], 2).unwrap();
        assert!(is_root(&handles[7]));
        assert!(is_root(&handles[5]), "second child loss cuts the parent");
        assert!(!is_marked(&handles[5]));
        heap.check_invariants().unwrap();

        let priorities: Vec<i32> = heap.into_sorted().map(|(p, _)| p).collect();
        assert_eq!(priorities, vec![1, 2, 2, 3, 3, 4, 5, 8, 9]);
    }

    #[test]
    fn test_same_priority_change_is_noop() {
        let mut heap = FibonacciHeap::new();
        let handles: Vec<_> = (0..8).map(|i| heap.enqueue(i, i)).collect();
        heap.dequeue().unwrap();

        let was_root = is_root(&handles[5]);
        heap.change_key(&handles[5], 5).unwrap();
        assert_eq!(is_root(&handles[5]), was_root);
        assert_eq!(heap.len(), 7);
        assert_eq!(*heap.peek().unwrap().0, 1);
    }

    #[test]
    fn test_increase_key_keeps_order() {
        let mut heap = FibonacciHeap::new();
        let handles: Vec<_> = (0..16).map(|i| heap.enqueue(i, i)).collect();
        heap.dequeue().unwrap();

        // 1 is the top and has children; push it to the bottom
        heap.change_key(&handles[1], 100).unwrap();
        heap.check_invariants().unwrap();
        assert_eq!(*heap.peek().unwrap().0, 2);

        heap.change_key(&handles[9], 50).unwrap();
        heap.check_invariants().unwrap();

        let items: Vec<i32> = heap.into_sorted().map(|(_, item)| item).collect();
        assert_eq!(items, vec![2, 3, 4, 5, 6, 7, 8, 10, 11, 12, 13, 14, 15, 9, 1]);
    }

    #[test]
    fn test_decreasing_direction() {
        let mut heap = FibonacciHeap::with_direction(Direction::Decreasing);
        let low = heap.enqueue(1, "low");
        heap.enqueue(5, "mid");
        heap.enqueue(9, "high");

        assert_eq!(*heap.peek().unwrap().1, "high");
        heap.change_key(&low, 10).unwrap();
        assert_eq!(heap.dequeue(), Ok((10, "low")));
        assert_eq!(heap.dequeue(), Ok((9, "high")));
    }

    #[test]
    fn test_delete_arbitrary() {
        let mut heap = FibonacciHeap::new();
        let handles: Vec<_> = (0..10).map(|i| heap.enqueue(i, i)).collect();
        heap.dequeue().unwrap();

        assert_eq!(heap.delete(&handles[7]), Ok((7, 7)));
        assert!(handles[7].is_removed());
        assert_eq!(heap.delete(&handles[7]), Err(HeapError::InvalidHandle));
        assert_eq!(heap.change_key(&handles[0], -1), Err(HeapError::InvalidHandle));
        assert_eq!(heap.len(), 8);
        heap.check_invariants().unwrap();
    }

    #[test]
    fn test_merge() {
        let mut heap1 = FibonacciHeap::new();
        heap1.enqueue(5, "a");
        heap1.enqueue(10, "b");

        let mut heap2 = FibonacciHeap::new();
        let c = heap2.enqueue(3, "c");
        heap2.enqueue(7, "d");

        heap1.merge(&mut heap2).unwrap();
        assert_eq!(*heap1.peek().unwrap().1, "c");
        assert_eq!(heap1.len(), 4);
        assert!(heap2.is_empty());
        assert_eq!(heap2.len(), 0);

        // handles from the absorbed heap now belong to heap1
        assert!(heap1.contains(&c));
        assert!(!heap2.contains(&c));
        heap1.change_key(&c, 0).unwrap();
        assert_eq!(heap2.change_key(&c, -1), Err(HeapError::ForeignHandle));
        heap1.check_invariants().unwrap();
    }

    #[test]
    fn test_merge_rejects_opposite_direction() {
        let mut min_heap = FibonacciHeap::new();
        min_heap.enqueue(1, ());
        let mut max_heap = FibonacciHeap::with_direction(Direction::Decreasing);
        max_heap.enqueue(2, ());

        assert_eq!(min_heap.merge(&mut max_heap), Err(HeapError::IncompatibleMerge));
        assert_eq!(max_heap.merge(&mut min_heap), Err(HeapError::IncompatibleMerge));
        assert_eq!(min_heap.len(), 1);
        assert_eq!(max_heap.len(), 1);
    }

    #[test]
    fn test_foreign_handle_rejected() {
        let mut a = FibonacciHeap::new();
        let mut b = FibonacciHeap::new();
        let handle = a.enqueue(1, 'a');
        b.enqueue(2, 'b');

        assert_eq!(b.change_key(&handle, 0), Err(HeapError::ForeignHandle));
        assert_eq!(b.delete(&handle), Err(HeapError::ForeignHandle));
        assert_eq!(b.len(), 1);
        assert_eq!(a.priority(&handle), Ok(1));
    }

    #[test]
    fn test_clear_invalidates_handles() {
        let mut heap = FibonacciHeap::new();
        let handles: Vec<_> = (0..32).map(|i| heap.enqueue(i, i)).collect();
        heap.dequeue().unwrap();
        heap.clear();

        assert!(heap.is_empty());
        assert!(handles.iter().all(|h| h.is_removed()));
        heap.enqueue(1, 1);
        assert_eq!(heap.len(), 1);
    }

    #[test]
    fn test_drop_releases_cells() {
        let handles: Vec<_> = {
            let mut heap = FibonacciHeap::new();
            let handles: Vec<_> = (0..64).map(|i| heap.enqueue(i, i.to_string())).collect();
            heap.dequeue().unwrap();
            heap.change_key(&handles[40], -1).unwrap();
            handles
        };
        assert!(handles.iter().all(|h| h.is_removed()));
    }
}
