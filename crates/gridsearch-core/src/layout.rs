//! ASCII grid layouts.
//!
//! A [`Layout`] is parsed from text such as
//!
//! ```text
//! S..#.
//! .#.#.
//! ...*T
//! ```
//!
//! where `#` is a wall, `*` a dynamic obstacle, `.` open floor, and `S` / `T`
//! mark the (open) start and target cells. Leading and trailing blank lines
//! and per-line indentation are ignored, so layouts can be written inline in
//! raw string literals.

use crate::error::GridError;
use crate::geom::Coord;
use crate::grid::Grid;

/// A grid plus the start and target read from a text layout.
#[derive(Debug, Clone)]
pub struct Layout {
    pub grid: Grid,
    pub start: Coord,
    pub target: Coord,
}

impl Layout {
    /// Parse a layout. Every line must have the same width and exactly one
    /// `S` and one `T` must appear.
    pub fn parse(s: &str) -> Result<Self, GridError> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let width = lines.first().map_or(0, |l| l.chars().count());
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(GridError::InconsistentWidth {
                    row,
                    expected: width,
                    found,
                });
            }
        }

        let mut grid = Grid::new(lines.len() as i32, width as i32)?;
        let mut start = None;
        let mut target = None;

        for (row, line) in lines.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                let pos = Coord::new(row as i32, col as i32);
                match ch {
                    '.' => {}
                    '#' => grid.set_wall(pos, true)?,
                    '*' => {
                        grid.set_dynamic(pos)?;
                    }
                    'S' => place(&mut start, 'S', pos)?,
                    'T' => place(&mut target, 'T', pos)?,
                    _ => return Err(GridError::InvalidChar { ch, pos }),
                }
            }
        }

        Ok(Self {
            grid,
            start: start.ok_or(GridError::MissingMarker('S'))?,
            target: target.ok_or(GridError::MissingMarker('T'))?,
        })
    }

    /// Render the grid with the start and target markers drawn back in.
    /// A marker outside the grid is skipped.
    pub fn render(&self) -> String {
        let mut rows: Vec<Vec<char>> = self
            .grid
            .to_string()
            .lines()
            .map(|l| l.chars().collect())
            .collect();
        for (pos, ch) in [(self.start, 'S'), (self.target, 'T')] {
            if pos.row < 0 || pos.col < 0 {
                continue;
            }
            if let Some(cell) = rows
                .get_mut(pos.row as usize)
                .and_then(|r| r.get_mut(pos.col as usize))
            {
                *cell = ch;
            }
        }
        rows.into_iter()
            .map(|r| r.into_iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn place(slot: &mut Option<Coord>, ch: char, pos: Coord) -> Result<(), GridError> {
    if slot.is_some() {
        return Err(GridError::DuplicateMarker { ch, pos });
    }
    *slot = Some(pos);
    Ok(())
}
