//! Heap cells and the handles callers hold on to
//!
//! A cell is shared between the heap structure and nothing else: the heap owns
//! it through the strong `next` pointers of whichever sibling ring it is in
//! (plus the parent's child-ring head), while `parent` and `prev` are weak.
//! Callers only ever receive a [`CellHandle`], which is a weak reference. Once
//! the heap extracts a cell it reclaims it with `Rc::try_unwrap`, after which
//! every outstanding handle fails to upgrade and is reported as stale.
//!
//! Each cell also remembers the ownership tag of the heap that created it.
//! Tags are merged union-find style when heaps are merged, so ownership checks
//! stay O(α(n)) while merge itself stays O(1).

use rc_circular_list::{Linked, Ring, RingLink};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::traits::Handle;

pub(crate) type CellRef<T, P> = Rc<CellNode<T, P>>;

/// Identity of a heap, shared by every cell the heap created.
#[derive(Default)]
pub(crate) struct OwnerTag {
    forward: RefCell<Option<Rc<OwnerTag>>>,
}

impl OwnerTag {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(OwnerTag::default())
    }

    /// Follows the forwarding chain to the tag of the heap that currently owns
    /// every cell created under `tag`, compressing the path on the way.
    pub(crate) fn resolve(tag: &Rc<OwnerTag>) -> Rc<OwnerTag> {
        let mut root = Rc::clone(tag);
        loop {
            let next = root.forward.borrow().clone();
            match next {
                Some(next) => root = next,
                None => break,
            }
        }

        let mut current = Rc::clone(tag);
        while !Rc::ptr_eq(&current, &root) {
            let next = current.forward.replace(Some(Rc::clone(&root)));
            match next {
                Some(next) => current = next,
                None => break,
            }
        }
        root
    }

    /// Records that cells tagged with `absorbed` now belong to `owner`.
    pub(crate) fn forward_to(absorbed: &Rc<OwnerTag>, owner: &Rc<OwnerTag>) {
        debug_assert!(!Rc::ptr_eq(absorbed, owner));
        *absorbed.forward.borrow_mut() = Some(Rc::clone(owner));
    }
}

impl Drop for OwnerTag {
    /// Releases the forwarding chain one tag at a time; a chain left behind by
    /// many merges would otherwise be dropped recursively.
    fn drop(&mut self) {
        let mut next = self.forward.get_mut().take();
        while let Some(tag) = next {
            next = match Rc::try_unwrap(tag) {
                Ok(mut tag) => tag.forward.get_mut().take(),
                Err(_) => None,
            };
        }
    }
}

/// Mutable part of a cell.
pub(crate) struct CellState<T, P> {
    pub(crate) priority: P,
    pub(crate) item: T,
    pub(crate) degree: usize,
    pub(crate) marked: bool,
    pub(crate) parent: Weak<CellNode<T, P>>,
    pub(crate) children: Ring<CellNode<T, P>>,
    pub(crate) owner: Rc<OwnerTag>,
}

impl<T, P> CellState<T, P> {
    #[inline]
    pub(crate) fn is_root(&self) -> bool {
        self.parent.strong_count() == 0
    }
}

/// One heap element plus its structural bookkeeping.
///
/// The sibling link lives outside the `RefCell` so that ring surgery never
/// conflicts with a borrow of the cell's state.
pub(crate) struct CellNode<T, P> {
    siblings: RingLink<CellNode<T, P>>,
    pub(crate) state: RefCell<CellState<T, P>>,
}

impl<T, P> CellNode<T, P> {
    pub(crate) fn new(priority: P, item: T, owner: Rc<OwnerTag>) -> CellRef<T, P> {
        Rc::new(CellNode {
            siblings: RingLink::new(),
            state: RefCell::new(CellState {
                priority,
                item,
                degree: 0,
                marked: false,
                parent: Weak::new(),
                children: Ring::new(),
                owner,
            }),
        })
    }

    /// Takes the payload out of a cell the heap has fully detached.
    ///
    /// Returns the cell back if something still holds a strong reference.
    pub(crate) fn reclaim(cell: CellRef<T, P>) -> Result<(P, T), CellRef<T, P>> {
        Rc::try_unwrap(cell).map(|node| {
            let CellState { priority, item, .. } = node.state.into_inner();
            (priority, item)
        })
    }
}

impl<T, P> Linked for CellNode<T, P> {
    #[inline]
    fn ring_link(&self) -> &RingLink<Self> {
        &self.siblings
    }
}

/// Handle to an element in a [`FibonacciHeap`](crate::FibonacciHeap)
///
/// A handle does not keep its element alive. After the element is dequeued or
/// deleted the handle is stale, and every heap operation given it returns
/// [`HeapError::InvalidHandle`](crate::HeapError::InvalidHandle).
pub struct CellHandle<T, P> {
    cell: Weak<CellNode<T, P>>,
}

impl<T, P> CellHandle<T, P> {
    pub(crate) fn new(cell: &CellRef<T, P>) -> Self {
        CellHandle {
            cell: Rc::downgrade(cell),
        }
    }

    pub(crate) fn upgrade(&self) -> Option<CellRef<T, P>> {
        self.cell.upgrade()
    }

    /// Returns true once the element has left its heap
    pub fn is_removed(&self) -> bool {
        self.cell.strong_count() == 0
    }
}

impl<T, P> Clone for CellHandle<T, P> {
    fn clone(&self) -> Self {
        CellHandle {
            cell: Weak::clone(&self.cell),
        }
    }
}

impl<T, P> PartialEq for CellHandle<T, P> {
    fn eq(&self, other: &Self) -> bool {
        Weak::ptr_eq(&self.cell, &other.cell)
    }
}

impl<T, P> Eq for CellHandle<T, P> {}

impl<T, P> fmt::Debug for CellHandle<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellHandle")
            .field("cell", &self.cell.as_ptr())
            .field("removed", &self.is_removed())
            .finish()
    }
}

impl<T, P> Handle for CellHandle<T, P> {}
