//! Dijkstra, A* and Prim built on [`VertexQueue`]
//!
//! These are the consumers the heap's O(1) `change_key` exists for: every edge
//! relaxation that improves a tentative distance is a single `change_key`
//! instead of a duplicate insertion.
//!
//! Note: Dijkstra and A* are the same algorithm - A* just adds a heuristic to
//! guide the search. Dijkstra is A* with h(n) = 0.
//!
//! The node type carries its own goal context and implements `is_goal()` to
//! determine when the search should terminate.
//!
//! # Example
//!
//! ```rust
//! use rust_fibonacci_heap::pathfinding::{SearchNode, dijkstra};
//!
//! // Node carries its goal coordinates
//! #[derive(Clone, PartialEq, Eq, Hash)]
//! struct GridPos { x: i32, y: i32, goal_x: i32, goal_y: i32 }
//!
//! impl SearchNode for GridPos {
//!     type Cost = u32;
//!
//!     fn successors(&self) -> Vec<(Self, Self::Cost)> {
//!         vec![
//!             (GridPos { x: self.x + 1, y: self.y, ..*self }, 1),
//!             (GridPos { x: self.x - 1, y: self.y, ..*self }, 1),
//!             (GridPos { x: self.x, y: self.y + 1, ..*self }, 1),
//!             (GridPos { x: self.x, y: self.y - 1, ..*self }, 1),
//!         ]
//!     }
//!
//!     fn is_goal(&self) -> bool {
//!         self.x == self.goal_x && self.y == self.goal_y
//!     }
//! }
//!
//! let start = GridPos { x: 0, y: 0, goal_x: 2, goal_y: 2 };
//! let (path, cost) = dijkstra(&start).unwrap();
//! assert_eq!(cost, 4); // Manhattan distance
//! assert_eq!(path.len(), 5);
//! ```

use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::hash::Hash;
use std::ops::Add;
use tracing::debug;

use crate::vertex_queue::VertexQueue;

/// Trait for types that can be used as costs in pathfinding algorithms.
///
/// This requires the type to be orderable, copyable, and support addition.
/// `Default` must be the zero cost.
pub trait Cost: Ord + Copy + Add<Output = Self> + Default {}

impl<T> Cost for T where T: Ord + Copy + Add<Output = Self> + Default {}

/// Trait for nodes in a search graph.
///
/// The node carries all context needed to generate successors and to check
/// whether it is a goal.
pub trait SearchNode: Clone + Eq + Hash {
    /// The cost type for edge weights
    type Cost: Cost;

    /// Returns all successor nodes along with the cost to reach them.
    fn successors(&self) -> Vec<(Self, Self::Cost)>;

    /// Returns true if this node is a goal state.
    fn is_goal(&self) -> bool;
}

/// Trait for nodes that can provide a heuristic estimate for A* search.
///
/// The heuristic must be admissible (never overestimate the true cost)
/// for A* to find optimal paths.
pub trait AStarNode: SearchNode {
    /// Returns a heuristic estimate of the cost from this node to any goal.
    fn heuristic(&self) -> Self::Cost;
}

/// Queue priority for a search frontier entry, ordered by f-score only.
#[derive(Debug, Clone, Copy)]
pub struct PriorityCost<C> {
    /// The f-score: g + h (where h=0 for Dijkstra)
    pub f_score: C,
    /// The actual cost from start (g-score)
    pub g_score: C,
}

impl<C: Ord> PartialEq for PriorityCost<C> {
    fn eq(&self, other: &Self) -> bool {
        self.f_score == other.f_score
    }
}

impl<C: Ord> Eq for PriorityCost<C> {}

impl<C: Ord> PartialOrd for PriorityCost<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: Ord> Ord for PriorityCost<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f_score.cmp(&other.f_score)
    }
}

/// Per-node search bookkeeping.
struct Visit<N, C> {
    g_score: C,
    came_from: Option<N>,
    closed: bool,
}

/// Open set plus everything known about discovered nodes.
struct Frontier<N: SearchNode> {
    open: VertexQueue<N, PriorityCost<N::Cost>>,
    visits: FxHashMap<N, Visit<N, N::Cost>>,
}

impl<N: SearchNode> Frontier<N> {
    fn new(start: &N, h: N::Cost) -> Self {
        let zero = N::Cost::default();
        let mut frontier = Frontier {
            open: VertexQueue::new(),
            visits: FxHashMap::default(),
        };
        frontier.visits.insert(
            start.clone(),
            Visit {
                g_score: zero,
                came_from: None,
                closed: false,
            },
        );
        frontier.open.enqueue(
            start.clone(),
            PriorityCost {
                f_score: h,
                g_score: zero,
            },
        );
        frontier
    }

    /// Pops the best open node and closes it.
    fn pop_closest(&mut self) -> Option<(N, N::Cost)> {
        let (node, priority) = self.open.dequeue()?;
        if let Some(visit) = self.visits.get_mut(&node) {
            visit.closed = true;
        }
        Some((node, priority.g_score))
    }

    /// Records a path to `neighbor` through `via` if it is the best seen so far.
    fn relax(&mut self, via: &N, neighbor: N, g_score: N::Cost, h: N::Cost) {
        match self.visits.get_mut(&neighbor) {
            Some(visit) if visit.closed || g_score >= visit.g_score => return,
            Some(visit) => {
                visit.g_score = g_score;
                visit.came_from = Some(via.clone());
            }
            None => {
                self.visits.insert(
                    neighbor.clone(),
                    Visit {
                        g_score,
                        came_from: Some(via.clone()),
                        closed: false,
                    },
                );
            }
        }
        self.open.enqueue(
            neighbor,
            PriorityCost {
                f_score: g_score + h,
                g_score,
            },
        );
    }

    /// Walks `came_from` links back from `goal` to the start.
    fn path_to(&self, goal: N) -> Vec<N> {
        let came_from = |node: &N| self.visits.get(node).and_then(|visit| visit.came_from.clone());

        let mut current = came_from(&goal);
        let mut path = vec![goal];
        while let Some(prev) = current {
            current = came_from(&prev);
            path.push(prev);
        }
        path.reverse();
        path
    }
}

/// Runs Dijkstra's algorithm from the start node until `is_goal()` returns true.
///
/// # Returns
/// - `Some((path, cost))` if a path is found, with `path` running from the
///   start to the goal inclusive
/// - `None` if no path exists
pub fn dijkstra<N: SearchNode>(start: &N) -> Option<(Vec<N>, N::Cost)> {
    PathFinderBuilder::new(start.clone()).dijkstra()
}

/// Runs A* search from the start node until `is_goal()` returns true.
///
/// Uses the node's `heuristic()` method to guide the search.
pub fn astar<N: AStarNode>(start: &N) -> Option<(Vec<N>, N::Cost)> {
    PathFinderBuilder::new(start.clone()).astar()
}

/// Builder for pathfinding queries with search limits.
///
/// The node type's `is_goal()` method determines when to stop.
pub struct PathFinderBuilder<N: SearchNode> {
    start: N,
    max_cost: Option<N::Cost>,
    max_nodes: Option<usize>,
}

impl<N: SearchNode> PathFinderBuilder<N> {
    /// Creates a new builder starting from the given node.
    pub fn new(start: N) -> Self {
        PathFinderBuilder {
            start,
            max_cost: None,
            max_nodes: None,
        }
    }

    /// Sets the maximum path cost to explore.
    pub fn max_cost(mut self, cost: N::Cost) -> Self {
        self.max_cost = Some(cost);
        self
    }

    /// Sets the maximum number of nodes to expand.
    pub fn max_nodes(mut self, count: usize) -> Self {
        self.max_nodes = Some(count);
        self
    }

    /// Runs Dijkstra's algorithm with the configured limits.
    pub fn dijkstra(self) -> Option<(Vec<N>, N::Cost)> {
        self.search(|_| N::Cost::default())
    }

    /// Runs A* search with the configured limits.
    pub fn astar(self) -> Option<(Vec<N>, N::Cost)>
    where
        N: AStarNode,
    {
        self.search(|n| n.heuristic())
    }

    fn search(self, heuristic: impl Fn(&N) -> N::Cost) -> Option<(Vec<N>, N::Cost)> {
        let mut frontier = Frontier::new(&self.start, heuristic(&self.start));
        let mut expanded = 0usize;

        while let Some((current, g_score)) = frontier.pop_closest() {
            if self.max_nodes.is_some_and(|max| expanded >= max) {
                debug!(expanded, "search stopped at node limit");
                return None;
            }
            expanded += 1;

            if current.is_goal() {
                debug!(expanded, "search reached goal");
                let path = frontier.path_to(current);
                return Some((path, g_score));
            }

            for (neighbor, edge_cost) in current.successors() {
                let tentative = g_score + edge_cost;
                if self.max_cost.is_some_and(|max| tentative > max) {
                    continue;
                }
                let h = heuristic(&neighbor);
                frontier.relax(&current, neighbor, tentative, h);
            }
        }

        debug!(expanded, "search exhausted without reaching a goal");
        None
    }
}

/// Returns all nodes reachable from the start within a given cost budget,
/// in nondecreasing order of cost.
///
/// This is useful for "what's nearby" queries.
pub fn reachable_within<N: SearchNode>(start: &N, max_cost: N::Cost) -> Vec<(N, N::Cost)> {
    let mut frontier = Frontier::new(start, N::Cost::default());
    let mut result = Vec::new();

    while let Some((current, g_score)) = frontier.pop_closest() {
        for (neighbor, edge_cost) in current.successors() {
            let tentative = g_score + edge_cost;
            if tentative <= max_cost {
                frontier.relax(&current, neighbor, tentative, N::Cost::default());
            }
        }
        result.push((current, g_score));
    }

    result
}

/// Edges chosen by [`minimum_spanning_tree`] and their total weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanningForest<W> {
    /// Sum of the chosen edge weights
    pub total_weight: W,
    /// Chosen edges as `(from, to, weight)`, `from` being the vertex already
    /// in the tree when the edge was taken
    pub edges: Vec<(usize, usize, W)>,
}

/// Computes a minimum spanning forest of an undirected graph with Prim's
/// algorithm.
///
/// Vertices are `0..vertex_count`; each edge `(u, v, w)` connects `u` and `v`
/// in both directions. A disconnected graph yields one tree per component.
///
/// # Panics
/// Panics if an edge endpoint is not below `vertex_count`.
pub fn minimum_spanning_tree<W: Cost>(
    vertex_count: usize,
    edges: &[(usize, usize, W)],
) -> SpanningForest<W> {
    let mut adjacency: Vec<Vec<(usize, W)>> = vec![Vec::new(); vertex_count];
    for &(u, v, w) in edges {
        adjacency[u].push((v, w));
        adjacency[v].push((u, w));
    }

    let mut in_tree = vec![false; vertex_count];
    let mut attach_to: Vec<Option<usize>> = vec![None; vertex_count];
    let mut forest = SpanningForest {
        total_weight: W::default(),
        edges: Vec::with_capacity(vertex_count.saturating_sub(1)),
    };
    let mut queue = VertexQueue::new();

    for root in 0..vertex_count {
        if in_tree[root] {
            continue;
        }
        queue.enqueue(root, W::default());

        while let Some((vertex, weight)) = queue.dequeue() {
            in_tree[vertex] = true;
            if let Some(from) = attach_to[vertex] {
                forest.edges.push((from, vertex, weight));
                forest.total_weight = forest.total_weight + weight;
            }
            for &(next, w) in &adjacency[vertex] {
                if !in_tree[next] && queue.enqueue(next, w) {
                    attach_to[next] = Some(vertex);
                }
            }
        }
    }

    debug!(
        vertex_count,
        tree_edges = forest.edges.len(),
        "built minimum spanning forest"
    );
    forest
}
