//! Path reconstruction from parent links.

use gridsearch_core::{Coord, Dims, Grid};

/// Walk `parent` links from `end` back to the search origin and return the
/// cells in origin → `end` order.
///
/// The origin is the first node without a parent. Parent links form a tree
/// for the current run; the walk is capped at the grid size so a corrupted
/// chain cannot loop forever.
pub fn reconstruct(grid: &Grid, end: Coord) -> Vec<Coord> {
    let mut path = vec![end];
    let mut cur = end;
    while let Some(prev) = grid.parent(cur) {
        if path.len() > grid.len() {
            break;
        }
        path.push(prev);
        cur = prev;
    }
    path.reverse();
    path
}

// ---------------------------------------------------------------------------
// CameFrom
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Link {
    Unseen,
    Root,
    From(Coord),
}

/// Visited map from cell to predecessor, indexed by flat grid position.
///
/// Used by the bidirectional search, which keeps one map per wave instead
/// of writing into the grid's own parent links.
#[derive(Clone, Debug)]
pub struct CameFrom {
    dims: Dims,
    links: Vec<Link>,
    len: usize,
}

impl CameFrom {
    /// Empty map for a grid of size `dims`.
    pub fn new(dims: Dims) -> Self {
        Self {
            dims,
            links: vec![Link::Unseen; dims.len()],
            len: 0,
        }
    }

    /// Map containing only `root`, which has no predecessor.
    pub fn rooted_at(dims: Dims, root: Coord) -> Self {
        let mut map = Self::new(dims);
        map.set(root, Link::Root);
        map
    }

    fn set(&mut self, c: Coord, link: Link) {
        let Some(i) = self.dims.index(c) else {
            return;
        };
        if self.links[i] == Link::Unseen {
            self.len += 1;
        }
        self.links[i] = link;
    }

    /// Record that `c` was reached from `from`.
    pub fn insert(&mut self, c: Coord, from: Coord) {
        self.set(c, Link::From(from));
    }

    /// Whether `c` has been visited.
    pub fn contains(&self, c: Coord) -> bool {
        self.dims
            .index(c)
            .is_some_and(|i| self.links[i] != Link::Unseen)
    }

    /// Predecessor of `c`; `None` for the root or an unvisited cell.
    pub fn predecessor(&self, c: Coord) -> Option<Coord> {
        match self.links[self.dims.index(c)?] {
            Link::From(p) => Some(p),
            _ => None,
        }
    }

    /// Number of visited cells, root included.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether nothing has been visited.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Cells from `c` back to the root, in that order.
    pub fn chain(&self, c: Coord) -> Vec<Coord> {
        let mut out = vec![c];
        let mut cur = c;
        while let Some(prev) = self.predecessor(cur) {
            if out.len() > self.links.len() {
                break;
            }
            out.push(prev);
            cur = prev;
        }
        out
    }
}

/// Join the two halves of a bidirectional search.
///
/// `forward_node` is reached by the wave rooted at the start and
/// `backward_node` by the wave rooted at the target; the two must be
/// adjacent (or equal). The result runs start → `forward_node` →
/// `backward_node` → target.
pub fn merge(
    forward_node: Coord,
    backward_node: Coord,
    forward: &CameFrom,
    backward: &CameFrom,
) -> Vec<Coord> {
    let mut path = forward.chain(forward_node);
    path.reverse();
    let tail = backward.chain(backward_node);
    let skip = usize::from(forward_node == backward_node);
    path.extend(tail.into_iter().skip(skip));
    path
}
