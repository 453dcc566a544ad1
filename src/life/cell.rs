//! Cell states and teams

use serde::{Deserialize, Serialize};
use std::fmt;

/// The state a single board position can hold.
///
/// `Barrier` is only ever placed by board construction; no transition can
/// produce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    #[default]
    Empty = 0,
    TeamA = 1,
    TeamB = 2,
    Barrier = 3,
}

/// One of the two competing populations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    A,
    B,
}

impl Cell {
    /// Every cell state, in ordinal order
    pub const ALL: [Cell; 4] = [Cell::Empty, Cell::TeamA, Cell::TeamB, Cell::Barrier];

    /// Numeric ordinal of the state
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// The team occupying this cell, if any
    pub fn team(self) -> Option<Team> {
        match self {
            Cell::TeamA => Some(Team::A),
            Cell::TeamB => Some(Team::B),
            Cell::Empty | Cell::Barrier => None,
        }
    }

    pub fn is_team(self) -> bool {
        self.team().is_some()
    }

    /// Whether a rule is allowed to propose this state
    pub fn is_rule_output(self) -> bool {
        !matches!(self, Cell::Barrier)
    }

    /// Character used by the Life2 text format
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::TeamA => 'a',
            Cell::TeamB => 'b',
            Cell::Barrier => '#',
        }
    }

    /// Parse a Life2 text format character
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Cell::Empty),
            'a' => Some(Cell::TeamA),
            'b' => Some(Cell::TeamB),
            '#' => Some(Cell::Barrier),
            _ => None,
        }
    }
}

impl Team {
    pub fn cell(self) -> Cell {
        match self {
            Team::A => Cell::TeamA,
            Team::B => Cell::TeamB,
        }
    }

    pub fn opponent(self) -> Team {
        match self {
            Team::A => Team::B,
            Team::B => Team::A,
        }
    }
}

impl From<Team> for Cell {
    fn from(team: Team) -> Self {
        team.cell()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::A => write!(f, "A"),
            Team::B => write!(f, "B"),
        }
    }
}

/// Count how many cells in `neighbors` are equal to `cell`
pub fn count_matching(neighbors: &[Cell], cell: Cell) -> usize {
    neighbors.iter().filter(|&&n| n == cell).count()
}
