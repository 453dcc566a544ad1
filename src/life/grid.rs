//! Grid representation shared by every board topology

use super::{Cell, Team};
use crate::error::LifeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A rectangular snapshot of cells, stored row-major.
///
/// Irregular shapes are realized on top of this by the board (barriers or an
/// out-of-bounds mask); the grid itself only knows its bounding box.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<Cell>,
}

impl Grid {
    /// Create a new grid filled with empty cells
    pub fn new(width: usize, height: usize) -> Result<Self, LifeError> {
        Self::filled(width, height, Cell::Empty)
    }

    /// Create a new grid filled with one state
    pub fn filled(width: usize, height: usize, cell: Cell) -> Result<Self, LifeError> {
        if width == 0 || height == 0 {
            return Err(LifeError::InvalidDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![cell; width * height],
        })
    }

    /// Create a grid from rows of cells
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, LifeError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 || height == 0 {
            return Err(LifeError::InvalidDimension { width, height });
        }

        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(LifeError::GridMismatch {
                    width,
                    height,
                    got_width: row.len(),
                    got_height: y + 1,
                });
            }
        }

        Ok(Self {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Convert 2D coordinates to the row-major index
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Get cell value at coordinates, `None` outside the bounding box
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        if self.contains(x, y) {
            Some(self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    /// Set cell value at coordinates
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) -> Result<(), LifeError> {
        if !self.contains(x, y) {
            return Err(LifeError::OutOfBounds { x, y });
        }
        let idx = self.index(x, y);
        self.cells[idx] = cell;
        Ok(())
    }

    pub fn same_dimensions(&self, other: &Grid) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Iterate `(x, y, cell)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| (i % self.width, i / self.width, cell))
    }

    /// Number of cells holding the given state
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Number of cells occupied by a team
    pub fn population(&self, team: Team) -> usize {
        self.count(team.cell())
    }

    /// Number of cells occupied by either team
    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_team()).count()
    }

    /// Check if no team holds any cell
    pub fn is_extinct(&self) -> bool {
        self.living_count() == 0
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            for cell in row {
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
