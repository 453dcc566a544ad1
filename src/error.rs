//! Error types for the Life2 engine

use crate::life::Cell;
use thiserror::Error;

/// Errors raised by the engine core and its board collaborators.
///
/// All of these are programmer or configuration errors: the core never
/// retries or swallows them, it hands them straight back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifeError {
    /// A rule with the same name is already registered.
    #[error("rule '{name}' is already registered")]
    DuplicateRule { name: String },

    /// No rule with the given name is registered.
    #[error("rule '{name}' is not registered")]
    UnknownRule { name: String },

    /// A rule expression produced a value it is not allowed to produce.
    #[error("rule '{rule}' returned an invalid state: {output:?}")]
    InvalidRuleOutput { rule: String, output: Cell },

    /// A board was configured with dimensions its topology cannot hold:
    /// a zero width or height, or an odd height on a wrapped hexagonal board.
    #[error("invalid board dimensions {width}x{height}")]
    InvalidDimension { width: usize, height: usize },

    /// A single-cell write targeted a coordinate outside the occupiable area.
    #[error("position ({x}, {y}) is out of bounds")]
    OutOfBounds { x: usize, y: usize },

    /// A bulk grid replacement did not match the board dimensions.
    #[error("grid is {got_width}x{got_height}, board expects {width}x{height}")]
    GridMismatch {
        width: usize,
        height: usize,
        got_width: usize,
        got_height: usize,
    },

    /// A character in a text board is not part of the format.
    #[error("invalid character '{ch}' at row {row}, column {col}")]
    InvalidCharacter { ch: char, row: usize, col: usize },
}
