//! Concrete board topologies

pub mod hexagonal;
pub mod masked;
pub mod rectangular;

pub use hexagonal::HexagonalBoard;
pub use masked::MaskedBoard;
pub use rectangular::RectangularBoard;

use super::{Boundary, Grid};
use crate::error::LifeError;

/// Resolve relative offsets around `(x, y)` into on-board positions
pub(crate) fn offset_positions(
    grid: &Grid,
    boundary: Boundary,
    x: usize,
    y: usize,
    offsets: &[(isize, isize)],
) -> Vec<(usize, usize)> {
    offsets
        .iter()
        .filter_map(|&(dx, dy)| {
            let nx = boundary.resolve(x as isize + dx, grid.width)?;
            let ny = boundary.resolve(y as isize + dy, grid.height)?;
            Some((nx, ny))
        })
        .collect()
}

/// Reject a replacement grid whose bounding box differs from the board's
pub(crate) fn check_dimensions(
    width: usize,
    height: usize,
    replacement: &Grid,
) -> Result<(), LifeError> {
    if replacement.width == width && replacement.height == height {
        Ok(())
    } else {
        Err(LifeError::GridMismatch {
            width,
            height,
            got_width: replacement.width,
            got_height: replacement.height,
        })
    }
}
