//! Reduction of several rule proposals into one next state

use super::{Cell, Team};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// What a proposal means relative to the cell's current state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Keep,
    BecomeEmpty,
    BecomeTeam(Team),
}

/// How to pick a winner when several outcomes share the highest tally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Follow [`Outcome::PRECEDENCE`]: keep, then empty, then team A, then team B
    #[default]
    KeepCurrent,
    /// The tied outcome voted first in registration order wins
    FirstRegistered,
}

impl Outcome {
    /// Fixed precedence used by [`TieBreak::KeepCurrent`], strongest first
    pub const PRECEDENCE: [Outcome; 4] = [
        Outcome::Keep,
        Outcome::BecomeEmpty,
        Outcome::BecomeTeam(Team::A),
        Outcome::BecomeTeam(Team::B),
    ];

    /// Interpret a proposed state for a cell currently holding `current`
    pub fn from_proposal(current: Cell, proposed: Cell) -> Self {
        if proposed == current {
            return Outcome::Keep;
        }
        match proposed {
            Cell::Empty => Outcome::BecomeEmpty,
            Cell::TeamA => Outcome::BecomeTeam(Team::A),
            Cell::TeamB => Outcome::BecomeTeam(Team::B),
            // rejected earlier by Rule::execute
            Cell::Barrier => Outcome::Keep,
        }
    }

    /// The state a cell holding `current` ends up in
    pub fn apply(self, current: Cell) -> Cell {
        match self {
            Outcome::Keep => current,
            Outcome::BecomeEmpty => Cell::Empty,
            Outcome::BecomeTeam(team) => team.cell(),
        }
    }
}

/// Majority vote over the proposals collected for one cell.
///
/// The outcome with the highest tally wins; ties go through `tie_break`.
/// No proposals at all means the cell keeps its state.
pub fn resolve(current: Cell, proposals: &[Cell], tie_break: TieBreak) -> Cell {
    let outcomes: Vec<Outcome> = proposals
        .iter()
        .map(|&proposed| Outcome::from_proposal(current, proposed))
        .collect();

    let tally = outcomes.iter().copied().counts();
    let Some(&top) = tally.values().max() else {
        return current;
    };
    let leads = |outcome: &Outcome| tally.get(outcome) == Some(&top);

    let winner = match tie_break {
        TieBreak::KeepCurrent => Outcome::PRECEDENCE.iter().copied().find(leads),
        TieBreak::FirstRegistered => outcomes.iter().copied().find(leads),
    };

    winner.map_or(current, |outcome| outcome.apply(current))
}
