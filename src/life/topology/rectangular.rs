//! Classic rectangular board with the Moore neighborhood

use super::{check_dimensions, offset_positions};
use crate::error::LifeError;
use crate::life::{Board, Boundary, Cell, Grid};

const MOORE: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// A rectangle where every cell has up to eight neighbors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RectangularBoard {
    grid: Grid,
    boundary: Boundary,
}

impl RectangularBoard {
    /// Create an empty board
    pub fn new(width: usize, height: usize, boundary: Boundary) -> Result<Self, LifeError> {
        Ok(Self::from_grid(Grid::new(width, height)?, boundary))
    }

    pub fn from_grid(grid: Grid, boundary: Boundary) -> Self {
        Self { grid, boundary }
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }
}

impl Board for RectangularBoard {
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
        offset_positions(&self.grid, self.boundary, x, y, &MOORE)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::life::cell::count_matching;

    fn ring() -> RectangularBoard {
        let a = Cell::TeamA;
        let e = Cell::Empty;
        let grid = Grid::from_rows(vec![vec![a, a, a], vec![a, e, a], vec![a, a, a]]).unwrap();
        RectangularBoard::from_grid(grid, Boundary::Dead)
    }

    #[test]
    fn test_neighbor_counting() {
        let board = ring();
        assert_eq!(board.neighbors(1, 1).len(), 8);
        assert_eq!(count_matching(&board.neighbors(1, 1), Cell::TeamA), 8);

        // Corner only sees the three in-bounds neighbors
        assert_eq!(board.neighbors(0, 0).len(), 3);
        assert_eq!(count_matching(&board.neighbors(0, 0), Cell::TeamA), 2);
    }

    #[test]
    fn test_boundary_conditions() {
        let a = Cell::TeamA;
        let e = Cell::Empty;
        let rows = vec![vec![a, e], vec![e, a]];

        let dead = RectangularBoard::from_grid(Grid::from_rows(rows.clone()).unwrap(), Boundary::Dead);
        assert_eq!(count_matching(&dead.neighbors(0, 0), a), 1);

        // Multiple wrapping positions point to (1, 1)
        let wrap = RectangularBoard::from_grid(Grid::from_rows(rows).unwrap(), Boundary::Wrap);
        assert_eq!(wrap.neighbors(0, 0).len(), 8);
        assert_eq!(count_matching(&wrap.neighbors(0, 0), a), 4);
    }

    #[test]
    fn test_zero_dimension() {
        assert!(matches!(
            RectangularBoard::new(0, 3, Boundary::Dead),
            Err(LifeError::InvalidDimension { width: 0, height: 3 })
        ));
    }

    #[test]
    fn test_set_grid_checks_dimensions() {
        let mut board = RectangularBoard::new(3, 3, Boundary::Dead).unwrap();
        assert!(matches!(
            board.set_grid(Grid::new(2, 3).unwrap()),
            Err(LifeError::GridMismatch { .. })
        ));

        let mut replacement = Grid::new(3, 3).unwrap();
        replacement.set(2, 2, Cell::TeamB).unwrap();
        board.set_grid(replacement.clone()).unwrap();
        assert_eq!(board.grid(), replacement);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut board = RectangularBoard::new(2, 2, Boundary::Dead).unwrap();
        assert!(board.is_out_of_bounds(2, 0));
        assert!(!board.is_out_of_bounds(1, 1));
        assert_eq!(board.cell(5, 5), None);
        assert_eq!(
            board.set_cell(2, 1, Cell::TeamA),
            Err(LifeError::OutOfBounds { x: 2, y: 1 })
        );
    }
}
