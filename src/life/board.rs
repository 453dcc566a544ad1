//! Board capability contract
//!
//! A board stores cells in some 2D shape and knows which positions are
//! adjacent. It applies no rules; that is the job of the [`World`](super::World).

use super::{Cell, Grid};
use crate::error::LifeError;
use serde::{Deserialize, Serialize};

/// How neighbor lookups behave past the edge of the bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Boundary {
    /// Positions past the edge do not exist
    #[default]
    Dead,
    /// The board is a torus
    Wrap,
    /// Positions past the edge reflect back onto the board
    Mirror,
}

impl Boundary {
    /// Resolve a possibly off-board coordinate along an axis of length `len`
    pub fn resolve(self, coord: isize, len: usize) -> Option<usize> {
        let len = len as isize;
        let resolved = match self {
            Boundary::Dead => coord,
            Boundary::Wrap => coord.rem_euclid(len),
            Boundary::Mirror => {
                if coord < 0 {
                    -coord - 1
                } else if coord >= len {
                    len - 1 - (coord - len)
                } else {
                    coord
                }
            }
        };

        if (0..len).contains(&resolved) {
            Some(resolved as usize)
        } else {
            None
        }
    }
}

/// Grid storage plus topology.
///
/// Implementations must have no hidden global state. The neighbor set is
/// "whatever is adjacent under this topology"; callers must not rely on its
/// order.
pub trait Board: Send + Sync {
    /// Width of the bounding box
    fn width(&self) -> usize;

    /// Height of the bounding box
    fn height(&self) -> usize;

    /// Cell at a position, `None` outside the bounding box
    fn cell(&self, x: usize, y: usize) -> Option<Cell>;

    /// Replace a single cell
    fn set_cell(&mut self, x: usize, y: usize, cell: Cell) -> Result<(), LifeError>;

    /// Whether a position is excluded from the occupiable area
    fn is_out_of_bounds(&self, x: usize, y: usize) -> bool;

    /// Positions adjacent to `(x, y)` under this topology
    fn neighbor_positions(&self, x: usize, y: usize) -> Vec<(usize, usize)>;

    /// Cells adjacent to `(x, y)` under this topology
    fn neighbors(&self, x: usize, y: usize) -> Vec<Cell> {
        self.neighbor_positions(x, y)
            .into_iter()
            .filter_map(|(nx, ny)| self.cell(nx, ny))
            .collect()
    }

    /// Snapshot of the whole board
    fn grid(&self) -> Grid;

    /// Replace the whole board at once
    fn set_grid(&mut self, grid: Grid) -> Result<(), LifeError>;
}

impl<B: Board + ?Sized> Board for Box<B> {
    fn width(&self) -> usize {
        (**self).width()
    }

    fn height(&self) -> usize {
        (**self).height()
    }

    fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        (**self).cell(x, y)
    }

    fn set_cell(&mut self, x: usize, y: usize, cell: Cell) -> Result<(), LifeError> {
        (**self).set_cell(x, y, cell)
    }

    fn is_out_of_bounds(&self, x: usize, y: usize) -> bool {
        (**self).is_out_of_bounds(x, y)
    }

    fn neighbor_positions(&self, x: usize, y: usize) -> Vec<(usize, usize)> {
        (**self).neighbor_positions(x, y)
    }

    fn neighbors(&self, x: usize, y: usize) -> Vec<Cell> {
        (**self).neighbors(x, y)
    }

    fn grid(&self) -> Grid {
        (**self).grid()
    }

    fn set_grid(&mut self, grid: Grid) -> Result<(), LifeError> {
        (**self).set_grid(grid)
    }
}
