//! Hexagonal board in the odd-r offset layout
//!
//! ```text
//!  row 0:  ⬡ ⬡ ⬡ ⬡
//!  row 1:   ⬡ ⬡ ⬡ ⬡
//!  row 2:  ⬡ ⬡ ⬡ ⬡
//! ```
//!
//! Odd rows are shoved half a cell to the right, so the diagonal neighbors
//! depend on the parity of the row. Wrapping vertically only lines up when
//! the last row and the first row have different parity, so a wrapped board
//! must have an even height.

use super::{check_dimensions, offset_positions};
use crate::error::LifeError;
use crate::life::{Board, Boundary, Cell, Grid};

const EVEN_ROW: [(isize, isize); 6] = [(-1, 0), (1, 0), (-1, -1), (0, -1), (-1, 1), (0, 1)];
const ODD_ROW: [(isize, isize); 6] = [(-1, 0), (1, 0), (0, -1), (1, -1), (0, 1), (1, 1)];

/// A board where every cell has up to six neighbors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexagonalBoard {
    grid: Grid,
    boundary: Boundary,
}

impl HexagonalBoard {
    pub fn new(width: usize, height: usize, boundary: Boundary) -> Result<Self, LifeError> {
        Self::from_grid(Grid::new(width, height)?, boundary)
    }

    /// Fails with [`LifeError::InvalidDimension`] for a wrapped board of odd
    /// height, where the seam rows would not be mutual neighbors
    pub fn from_grid(grid: Grid, boundary: Boundary) -> Result<Self, LifeError> {
        if boundary == Boundary::Wrap && grid.height % 2 == 1 {
            return Err(LifeError::InvalidDimension {
                width: grid.width,
                height: grid.height,
            });
        }
        Ok(Self { grid, boundary })
    }
}

impl Board for HexagonalBoard {
    fn width(&self) -> usize {
        self.grid.width
    }

    fn height(&self) -> usize {
        self.grid.height
    }

    fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        self.grid.get(x, y)
    }

    fn set_cell(&mut self, x: usize, y: usize, cell: Cell) -> Result<(), LifeError> {
        self.grid.set(x, y, cell)
    }

    fn is_out_of_bounds(&self, x: usize, y: usize) -> bool {
        !self.grid.contains(x, y)
    }

    fn neighbor_positions(&self, x: usize, y: usize) -> Vec<(usize, usize)> {
        let offsets = if y % 2 == 0 { &EVEN_ROW } else { &ODD_ROW };
        offset_positions(&self.grid, self.boundary, x, y, offsets)
    }

    fn grid(&self) -> Grid {
        self.grid.clone()
    }

    fn set_grid(&mut self, grid: Grid) -> Result<(), LifeError> {
        check_dimensions(self.grid.width, self.grid.height, &grid)?;
        self.grid = grid;
        Ok(())
    }
}
