//! Invariant checks between consecutive generations

use crate::life::{Cell, Grid};
use std::fmt;

/// Checks that a committed generation respects the engine invariants:
/// same bounding box, barriers untouched, no barrier created.
#[derive(Debug, Default, Clone, Copy)]
pub struct TransitionValidator;

/// A single broken invariant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    DimensionsChanged {
        before: (usize, usize),
        after: (usize, usize),
    },
    BarrierRemoved { x: usize, y: usize, now: Cell },
    BarrierCreated { x: usize, y: usize, was: Cell },
}

impl TransitionValidator {
    pub fn new() -> Self {
        Self
    }

    /// Collect every violation between `before` and `after`
    pub fn check(&self, before: &Grid, after: &Grid) -> Vec<Violation> {
        if !before.same_dimensions(after) {
            return vec![Violation::DimensionsChanged {
                before: (before.width, before.height),
                after: (after.width, after.height),
            }];
        }

        before
            .iter()
            .zip(&after.cells)
            .filter_map(|((x, y, was), &now)| match (was, now) {
                (Cell::Barrier, now) if now != Cell::Barrier => {
                    Some(Violation::BarrierRemoved { x, y, now })
                }
                (was, Cell::Barrier) if was != Cell::Barrier => {
                    Some(Violation::BarrierCreated { x, y, was })
                }
                _ => None,
            })
            .collect()
    }

    /// Check every consecutive pair of a recorded history
    pub fn check_history(&self, history: &[Grid]) -> Vec<(usize, Violation)> {
        history
            .windows(2)
            .enumerate()
            .flat_map(|(i, pair)| {
                self.check(&pair[0], &pair[1])
                    .into_iter()
                    .map(move |violation| (i + 1, violation))
            })
            .collect()
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::DimensionsChanged { before, after } => write!(
                f,
                "board changed size from {}x{} to {}x{}",
                before.0, before.1, after.0, after.1
            ),
            Violation::BarrierRemoved { x, y, now } => {
                write!(f, "barrier at ({}, {}) became '{}'", x, y, now)
            }
            Violation::BarrierCreated { x, y, was } => {
                write!(f, "'{}' at ({}, {}) became a barrier", was, x, y)
            }
        }
    }
}
