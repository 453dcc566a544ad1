//! Irregular boards built by masking out part of another board

use super::check_dimensions;
use crate::error::LifeError;
use crate::life::{Board, Cell, Grid};

/// Wraps any board and excludes some positions from the occupiable area.
///
/// Masked positions are out of bounds: they are never reported as neighbors
/// and cannot be written one cell at a time. Bulk grid replacement still
/// carries their stored value so snapshots round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedBoard<B> {
    inner: B,
    occupiable: Vec<bool>,
}

impl<B: Board> MaskedBoard<B> {
    /// `occupiable` is row-major over the inner board's bounding box
    pub fn new(inner: B, occupiable: Vec<bool>) -> Result<Self, LifeError> {
        let (width, height) = (inner.width(), inner.height());
        if occupiable.len() != width * height {
            return Err(LifeError::GridMismatch {
                width,
                height,
                got_width: occupiable.len(),
                got_height: 1,
            });
        }
        Ok(Self { inner, occupiable })
    }

    /// Build the mask from a predicate over positions
    pub fn from_fn(inner: B, occupiable: impl Fn(usize, usize) -> bool) -> Self {
        let (width, height) = (inner.width(), inner.height());
        let mask = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| occupiable(x, y))
            .collect();
        Self {
            inner,
            occupiable: mask,
        }
    }

    pub fn inner(&self) -> &B {
        &self.inner
    }

    /// Number of positions that can hold a cell
    pub fn occupiable_count(&self) -> usize {
        self.occupiable.iter().filter(|&&open| open).count()
    }
}

impl<B: Board> Board for MaskedBoard<B> {
    fn width(&self) -> usize {
        self.inner.width()
    }

    fn height(&self) -> usize {
        self.inner.height()
    }

    fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        self.inner.cell(x, y)
    }

    fn set_cell(&mut self, x: usize, y: usize, cell: Cell) -> Result<(), LifeError> {
        if self.is_out_of_bounds(x, y) {
            return Err(LifeError::OutOfBounds { x, y });
        }
        self.inner.set_cell(x, y, cell)
    }

    fn is_out_of_bounds(&self, x: usize, y: usize) -> bool {
        if self.inner.is_out_of_bounds(x, y) {
            return true;
        }
        let idx = y * self.inner.width() + x;
        !self.occupiable.get(idx).copied().unwrap_or(false)
    }

    fn neighbor_positions(&self, x: usize, y: usize) -> Vec<(usize, usize)> {
        self.inner
            .neighbor_positions(x, y)
            .into_iter()
            .filter(|&(nx, ny)| !self.is_out_of_bounds(nx, ny))
            .collect()
    }

    fn grid(&self) -> Grid {
        self.inner.grid()
    }

    fn set_grid(&mut self, grid: Grid) -> Result<(), LifeError> {
        check_dimensions(self.inner.width(), self.inner.height(), &grid)?;
        self.inner.set_grid(grid)
    }
}
