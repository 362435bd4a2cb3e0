//! Geometry primitives: [`Coord`], [`Direction`] and [`Dims`].
//!
//! Coordinates are `(row, col)` pairs. Rows grow downward and columns grow
//! to the right, so "up" is `row - 1`.

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Coord
// ---------------------------------------------------------------------------

/// A grid cell address. Ordering is row-major.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Create a new coordinate.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return the coordinate shifted by one step in `dir`.
    #[inline]
    pub const fn step(self, dir: Direction) -> Self {
        let (dr, dc) = dir.delta();
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }

    /// All eight neighbours in [`Direction::CLOCKWISE`] order.
    ///
    /// No bounds filtering happens here; see [`Grid::neighbors`](crate::Grid::neighbors).
    #[inline]
    pub fn neighbors_8(self) -> [Coord; 8] {
        Direction::CLOCKWISE.map(|d| self.step(d))
    }

    /// Whether `other` is one king move away (the two cells are distinct).
    #[inline]
    pub fn is_adjacent(self, other: Coord) -> bool {
        chebyshev(self, other) == 1
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl Add for Coord {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Coord {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.row - rhs.row, self.col - rhs.col)
    }
}

/// Manhattan (L1) distance between two coordinates.
#[inline]
pub fn manhattan(a: Coord, b: Coord) -> i32 {
    (a.row - b.row).abs() + (a.col - b.col).abs()
}

/// Chebyshev (L∞) distance, i.e. the move count on an open 8-connected grid.
#[inline]
pub fn chebyshev(a: Coord, b: Coord) -> i32 {
    (a.row - b.row).abs().max((a.col - b.col).abs())
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// One of the eight king moves.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Right,
    Down,
    DownRight,
    Left,
    UpLeft,
    UpRight,
    DownLeft,
}

impl Direction {
    /// Neighbor enumeration order used by every search.
    ///
    /// Frontier expansion order, and therefore which of several equal-length
    /// paths a search returns, follows this order exactly.
    pub const CLOCKWISE: [Direction; 8] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::DownRight,
        Direction::Left,
        Direction::UpLeft,
        Direction::UpRight,
        Direction::DownLeft,
    ];

    /// `(d_row, d_col)` offset of this move.
    #[inline]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::DownRight => (1, 1),
            Direction::Left => (0, -1),
            Direction::UpLeft => (-1, -1),
            Direction::UpRight => (-1, 1),
            Direction::DownLeft => (1, -1),
        }
    }

    /// Whether the move changes both row and column.
    #[inline]
    pub const fn is_diagonal(self) -> bool {
        let (dr, dc) = self.delta();
        dr != 0 && dc != 0
    }
}

// ---------------------------------------------------------------------------
// Dims
// ---------------------------------------------------------------------------

/// Size of a grid: `rows × cols` cells addressed from `(0, 0)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dims {
    pub rows: i32,
    pub cols: i32,
}

impl Dims {
    /// Create new dimensions.
    #[inline]
    pub const fn new(rows: i32, cols: i32) -> Self {
        Self { rows, cols }
    }

    /// Total number of cells.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (self.rows as usize) * (self.cols as usize)
    }

    /// Whether the area is zero or negative.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.rows <= 0 || self.cols <= 0
    }

    /// Whether `c` addresses a cell inside these dimensions.
    #[inline]
    pub fn contains(self, c: Coord) -> bool {
        c.row >= 0 && c.row < self.rows && c.col >= 0 && c.col < self.cols
    }

    /// Flat row-major index of `c`, or `None` if out of bounds.
    #[inline]
    pub fn index(self, c: Coord) -> Option<usize> {
        if !self.contains(c) {
            return None;
        }
        Some(c.row as usize * self.cols as usize + c.col as usize)
    }

    /// Inverse of [`index`](Dims::index).
    #[inline]
    pub fn coord(self, idx: usize) -> Coord {
        let cols = self.cols.max(1) as usize;
        Coord::new((idx / cols) as i32, (idx % cols) as i32)
    }

    /// Row-major iterator over every coordinate.
    #[inline]
    pub fn iter(self) -> DimsIter {
        DimsIter {
            dims: self,
            next: 0,
        }
    }
}

impl IntoIterator for Dims {
    type Item = Coord;
    type IntoIter = DimsIter;
    #[inline]
    fn into_iter(self) -> DimsIter {
        self.iter()
    }
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Row-major iterator over the coordinates of a [`Dims`].
#[derive(Clone, Debug)]
pub struct DimsIter {
    dims: Dims,
    next: usize,
}

impl Iterator for DimsIter {
    type Item = Coord;

    #[inline]
    fn next(&mut self) -> Option<Coord> {
        if self.next >= self.dims.len() {
            return None;
        }
        let c = self.dims.coord(self.next);
        self.next += 1;
        Some(c)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.dims.len().saturating_sub(self.next);
        (rest, Some(rest))
    }
}

impl ExactSizeIterator for DimsIter {}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn coord_round_trip() {
        let c = Coord::new(3, 7);
        let json = serde_json::to_string(&c).unwrap();
        let back: Coord = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }
}
