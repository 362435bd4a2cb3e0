//! The [`Grid`] type: a fixed `rows × cols` array of [`Node`]s.
//!
//! Storage is a flat row-major `Vec<Node>`. A node's parent is stored as the
//! coordinate of its predecessor, so search trees never hold references into
//! the grid itself.

use std::fmt;

use crate::error::GridError;
use crate::geom::{Coord, Dims};

/// Sentinel cost meaning "not reached by the current search".
pub const UNREACHABLE: i32 = i32::MAX;

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// One grid cell.
///
/// `is_wall` and `is_dynamic` describe the environment and survive
/// [`reset`](Node::reset). `parent` and `cost` belong to the search run in
/// progress and are cleared by it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub coord: Coord,
    /// Permanent obstacle, only changed by editing.
    pub is_wall: bool,
    /// Transient obstacle spawned while a search runs.
    pub is_dynamic: bool,
    /// Predecessor in the current search tree.
    pub parent: Option<Coord>,
    /// Cumulative cost from the search origin, [`UNREACHABLE`] when unset.
    pub cost: i32,
}

impl Node {
    fn new(coord: Coord) -> Self {
        Self {
            coord,
            is_wall: false,
            is_dynamic: false,
            parent: None,
            cost: UNREACHABLE,
        }
    }

    /// Clear search state. Wall and dynamic flags are left alone.
    #[inline]
    pub fn reset(&mut self) {
        self.parent = None;
        self.cost = UNREACHABLE;
    }

    /// A node can be entered iff it is neither a wall nor a dynamic obstacle.
    #[inline]
    pub fn is_traversable(&self) -> bool {
        !self.is_wall && !self.is_dynamic
    }

    /// Whether the current search has assigned a cost to this node.
    #[inline]
    pub fn is_reached(&self) -> bool {
        self.cost != UNREACHABLE
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A mutable 2D grid of [`Node`]s.
#[derive(Debug, Clone)]
pub struct Grid {
    dims: Dims,
    nodes: Vec<Node>,
}

impl Grid {
    /// Create an open grid (no walls, no obstacles).
    pub fn new(rows: i32, cols: i32) -> Result<Self, GridError> {
        let dims = Dims::new(rows, cols);
        if dims.is_empty() {
            return Err(GridError::InvalidSize(dims));
        }
        let nodes = dims.iter().map(Node::new).collect();
        Ok(Self { dims, nodes })
    }

    /// Create a grid with the given walls.
    pub fn with_walls(
        rows: i32,
        cols: i32,
        walls: impl IntoIterator<Item = Coord>,
    ) -> Result<Self, GridError> {
        let mut grid = Self::new(rows, cols)?;
        for c in walls {
            grid.set_wall(c, true)?;
        }
        Ok(grid)
    }

    /// Grid size.
    #[inline]
    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.dims.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.dims.cols
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: construction rejects empty grids.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `c` is inside the grid.
    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        self.dims.contains(c)
    }

    /// Flat index of `c`, or `None` if out of bounds.
    #[inline]
    pub fn index(&self, c: Coord) -> Option<usize> {
        self.dims.index(c)
    }

    /// Node at `c`, or `None` if out of bounds.
    #[inline]
    pub fn node(&self, c: Coord) -> Option<&Node> {
        self.index(c).map(|i| &self.nodes[i])
    }

    /// Mutable node at `c`, or `None` if out of bounds.
    #[inline]
    pub fn node_mut(&mut self, c: Coord) -> Option<&mut Node> {
        let i = self.index(c)?;
        Some(&mut self.nodes[i])
    }

    fn slot(&mut self, c: Coord) -> Result<&mut Node, GridError> {
        self.node_mut(c).ok_or(GridError::OutOfBounds(c))
    }

    /// Row-major iterator over all nodes.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    // -----------------------------------------------------------------------
    // Environment flags
    // -----------------------------------------------------------------------

    /// Add or remove a wall.
    pub fn set_wall(&mut self, c: Coord, wall: bool) -> Result<(), GridError> {
        self.slot(c)?.is_wall = wall;
        Ok(())
    }

    /// Flag `c` as a dynamic obstacle.
    ///
    /// Walls and cells that are already dynamic are left unchanged. Returns
    /// whether the flag was newly set.
    pub fn set_dynamic(&mut self, c: Coord) -> Result<bool, GridError> {
        let node = self.slot(c)?;
        if node.is_wall || node.is_dynamic {
            return Ok(false);
        }
        node.is_dynamic = true;
        Ok(true)
    }

    /// Remove the dynamic flag from `c`. Returns whether it was set.
    pub fn clear_dynamic(&mut self, c: Coord) -> Result<bool, GridError> {
        let node = self.slot(c)?;
        Ok(std::mem::replace(&mut node.is_dynamic, false))
    }

    /// Remove every dynamic obstacle.
    pub fn clear_all_dynamic(&mut self) {
        for node in self.nodes.iter_mut() {
            node.is_dynamic = false;
        }
    }

    /// Whether `c` is a wall. Out-of-bounds cells are not.
    #[inline]
    pub fn is_wall(&self, c: Coord) -> bool {
        self.node(c).is_some_and(|n| n.is_wall)
    }

    /// Whether `c` holds a dynamic obstacle.
    #[inline]
    pub fn is_dynamic(&self, c: Coord) -> bool {
        self.node(c).is_some_and(|n| n.is_dynamic)
    }

    /// Whether `c` is inside the grid and can be entered.
    #[inline]
    pub fn is_traversable(&self, c: Coord) -> bool {
        self.node(c).is_some_and(Node::is_traversable)
    }

    /// Coordinates of all walls, row-major.
    pub fn walls(&self) -> impl Iterator<Item = Coord> + '_ {
        self.nodes.iter().filter(|n| n.is_wall).map(|n| n.coord)
    }

    /// Coordinates of all dynamic obstacles, row-major.
    pub fn dynamic_obstacles(&self) -> impl Iterator<Item = Coord> + '_ {
        self.nodes.iter().filter(|n| n.is_dynamic).map(|n| n.coord)
    }

    /// Check that `c` can serve as a search start or target.
    pub fn check_endpoint(&self, c: Coord) -> Result<(), GridError> {
        match self.node(c) {
            None => Err(GridError::OutOfBounds(c)),
            Some(n) if n.is_wall => Err(GridError::Blocked(c)),
            Some(_) => Ok(()),
        }
    }

    // -----------------------------------------------------------------------
    // Search state
    // -----------------------------------------------------------------------

    /// Clear `parent` and `cost` on every node.
    pub fn reset(&mut self) {
        for node in self.nodes.iter_mut() {
            node.reset();
        }
    }

    /// Search cost recorded at `c`, [`UNREACHABLE`] if unset or out of bounds.
    #[inline]
    pub fn cost(&self, c: Coord) -> i32 {
        self.node(c).map_or(UNREACHABLE, |n| n.cost)
    }

    /// Predecessor recorded at `c`.
    #[inline]
    pub fn parent(&self, c: Coord) -> Option<Coord> {
        self.node(c).and_then(|n| n.parent)
    }

    /// Record `parent` and `cost` for `c`. No-op if `c` is out of bounds.
    #[inline]
    pub fn link(&mut self, c: Coord, parent: Option<Coord>, cost: i32) {
        if let Some(node) = self.node_mut(c) {
            node.parent = parent;
            node.cost = cost;
        }
    }

    /// Append the traversable in-bounds neighbours of `c` to `buf`, in
    /// [`Direction::CLOCKWISE`](crate::Direction::CLOCKWISE) order.
    ///
    /// The caller clears `buf` before calling.
    pub fn neighbors(&self, c: Coord, buf: &mut Vec<Coord>) {
        for n in c.neighbors_8() {
            if self.is_traversable(n) {
                buf.push(n);
            }
        }
    }

    /// Allocating variant of [`neighbors`](Grid::neighbors).
    pub fn neighbor_list(&self, c: Coord) -> Vec<Coord> {
        let mut buf = Vec::with_capacity(8);
        self.neighbors(c, &mut buf);
        buf
    }
}

impl fmt::Display for Grid {
    /// Renders `#` for walls, `*` for dynamic obstacles and `.` otherwise,
    /// one line per row.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.nodes.chunks(self.dims.cols as usize).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for node in row {
                let ch = if node.is_wall {
                    '#'
                } else if node.is_dynamic {
                    '*'
                } else {
                    '.'
                };
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_empty() {
        assert_eq!(
            Grid::new(0, 4).unwrap_err(),
            GridError::InvalidSize(Dims::new(0, 4))
        );
        assert!(Grid::new(-1, 4).is_err());
    }

    #[test]
    fn nodes_know_their_coordinates() {
        let g = Grid::new(3, 4).unwrap();
        assert_eq!(g.len(), 12);
        let n = g.node(Coord::new(2, 1)).unwrap();
        assert_eq!(n.coord, Coord::new(2, 1));
        assert_eq!(n.cost, UNREACHABLE);
        assert!(n.parent.is_none());
        assert!(g.node(Coord::new(3, 0)).is_none());
    }

    #[test]
    fn neighbors_follow_clockwise_order() {
        let g = Grid::new(3, 3).unwrap();
        assert_eq!(
            g.neighbor_list(Coord::new(1, 1)),
            vec![
                Coord::new(0, 1),
                Coord::new(1, 2),
                Coord::new(2, 1),
                Coord::new(2, 2),
                Coord::new(1, 0),
                Coord::new(0, 0),
                Coord::new(0, 2),
                Coord::new(2, 0),
            ]
        );
    }

    #[test]
    fn neighbors_clip_bounds_and_obstacles() {
        let mut g = Grid::new(3, 3).unwrap();
        g.set_wall(Coord::new(0, 1), true).unwrap();
        g.set_dynamic(Coord::new(1, 1)).unwrap();
        // Corner: Up/Left/diagonals out of bounds, Right is a wall,
        // Down-Right is dynamic.
        assert_eq!(g.neighbor_list(Coord::new(0, 0)), vec![Coord::new(1, 0)]);
    }

    #[test]
    fn reset_keeps_environment() {
        let mut g = Grid::new(2, 2).unwrap();
        let a = Coord::new(0, 0);
        let b = Coord::new(1, 1);
        g.set_wall(a, true).unwrap();
        g.set_dynamic(b).unwrap();
        g.link(b, Some(Coord::new(0, 1)), 3);
        g.reset();
        assert!(g.is_wall(a));
        assert!(g.is_dynamic(b));
        assert_eq!(g.cost(b), UNREACHABLE);
        assert_eq!(g.parent(b), None);
    }

    #[test]
    fn dynamic_flag_skips_walls() {
        let mut g = Grid::new(2, 2).unwrap();
        let w = Coord::new(0, 1);
        g.set_wall(w, true).unwrap();
        assert!(!g.set_dynamic(w).unwrap());
        assert!(!g.is_dynamic(w));

        let c = Coord::new(1, 0);
        assert!(g.set_dynamic(c).unwrap());
        assert!(!g.set_dynamic(c).unwrap());
        assert!(g.clear_dynamic(c).unwrap());
        assert!(!g.clear_dynamic(c).unwrap());
    }

    #[test]
    fn clear_all_dynamic_keeps_walls() {
        let mut g = Grid::with_walls(3, 3, [Coord::new(1, 1)]).unwrap();
        for c in [Coord::new(0, 0), Coord::new(0, 2), Coord::new(2, 1)] {
            g.set_dynamic(c).unwrap();
        }
        assert_eq!(g.dynamic_obstacles().count(), 3);
        g.clear_all_dynamic();
        assert_eq!(g.dynamic_obstacles().count(), 0);
        assert_eq!(g.walls().collect::<Vec<_>>(), vec![Coord::new(1, 1)]);
        assert!(g.is_traversable(Coord::new(2, 1)));
    }

    #[test]
    fn editing_out_of_bounds_fails() {
        let mut g = Grid::new(2, 2).unwrap();
        let c = Coord::new(2, 0);
        assert_eq!(g.set_wall(c, true), Err(GridError::OutOfBounds(c)));
        assert_eq!(g.set_dynamic(c), Err(GridError::OutOfBounds(c)));
    }

    #[test]
    fn check_endpoint_rejects_walls() {
        let mut g = Grid::new(2, 2).unwrap();
        let w = Coord::new(1, 1);
        g.set_wall(w, true).unwrap();
        assert_eq!(g.check_endpoint(w), Err(GridError::Blocked(w)));
        assert_eq!(
            g.check_endpoint(Coord::new(-1, 0)),
            Err(GridError::OutOfBounds(Coord::new(-1, 0)))
        );
        assert!(g.check_endpoint(Coord::new(0, 0)).is_ok());
    }

    #[test]
    fn display_renders_rows() {
        let mut g = Grid::with_walls(2, 3, [Coord::new(0, 2)]).unwrap();
        g.set_dynamic(Coord::new(1, 0)).unwrap();
        assert_eq!(g.to_string(), "..#\n*..");
        assert_eq!(g.walls().collect::<Vec<_>>(), vec![Coord::new(0, 2)]);
        assert_eq!(
            g.dynamic_obstacles().collect::<Vec<_>>(),
            vec![Coord::new(1, 0)]
        );
    }
}
