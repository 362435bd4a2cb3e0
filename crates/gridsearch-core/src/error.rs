use std::fmt;

use crate::geom::{Coord, Dims};

/// Errors raised by grid construction, editing and layout parsing.
///
/// Search endpoints that violate a precondition (outside the grid or on a
/// wall) are rejected with [`OutOfBounds`](GridError::OutOfBounds) or
/// [`Blocked`](GridError::Blocked) before anything is mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Rows or columns were zero or negative.
    InvalidSize(Dims),
    /// A coordinate lies outside the grid.
    OutOfBounds(Coord),
    /// A search endpoint sits on a wall.
    Blocked(Coord),
    /// Layout lines have different widths.
    InconsistentWidth { row: usize, expected: usize, found: usize },
    /// A layout character outside the allowed alphabet.
    InvalidChar { ch: char, pos: Coord },
    /// The layout lacks its `S` or `T` marker.
    MissingMarker(char),
    /// The layout contains more than one `S` or `T` marker.
    DuplicateMarker { ch: char, pos: Coord },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize(dims) => write!(f, "grid: invalid size {dims}"),
            Self::OutOfBounds(c) => write!(f, "grid: coordinate {c} is out of bounds"),
            Self::Blocked(c) => write!(f, "grid: endpoint {c} is a wall"),
            Self::InconsistentWidth {
                row,
                expected,
                found,
            } => write!(
                f,
                "layout: line {row} has width {found}, expected {expected}"
            ),
            Self::InvalidChar { ch, pos } => {
                write!(f, "layout: invalid character \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::MissingMarker(ch) => write!(f, "layout: missing \u{201c}{ch}\u{201d} marker"),
            Self::DuplicateMarker { ch, pos } => {
                write!(f, "layout: duplicate \u{201c}{ch}\u{201d} marker at {pos}")
            }
        }
    }
}

impl std::error::Error for GridError {}
