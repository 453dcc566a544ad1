//! Life2 engine core: cells, rules, boards and the generation transition

pub mod board;
pub mod cell;
pub mod grid;
pub mod io;
pub mod rule;
pub mod rules_manager;
pub mod topology;
pub mod vote;
pub mod world;

pub use board::{Board, Boundary};
pub use cell::{Cell, Team};
pub use grid::Grid;
pub use io::{create_example_boards, load_grid_from_file, load_mask_from_file, save_grid_to_file};
pub use rule::{BuiltinRule, Expression, Rule};
pub use rules_manager::RulesManager;
pub use topology::{HexagonalBoard, MaskedBoard, RectangularBoard};
pub use vote::{Outcome, TieBreak};
pub use world::{EmptyCells, EngineConfig, Stats, World};
