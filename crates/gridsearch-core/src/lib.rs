//! **gridsearch-core** — the grid model shared by the *gridsearch* crates.
//!
//! This crate provides row/column geometry, the eight-direction neighbor
//! order every search relies on, the mutable [`Grid`] of [`Node`]s with its
//! wall and transient-obstacle flags, and an ASCII [`Layout`] format.

pub mod error;
pub mod geom;
pub mod grid;
pub mod layout;

pub use error::GridError;
pub use geom::{Coord, Dims, Direction, chebyshev, manhattan};
pub use grid::{Grid, Node, UNREACHABLE};
pub use layout::Layout;
