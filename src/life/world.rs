//! Generation transitions: boards + rules → next board + statistics

use super::{vote, Board, Cell, Grid, Rule, RulesManager, TieBreak};
use crate::error::LifeError;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::AddAssign;

/// Whether empty cells are offered to the rules during a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyCells {
    /// Empty cells are evaluated like any other, so births can happen
    #[default]
    Evaluate,
    /// Empty cells are left untouched; birth rules never fire
    Skip,
}

/// Knobs of the transition engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    pub empty_cells: EmptyCells,
    pub tie_break: TieBreak,
    /// Evaluate rows on the rayon thread pool
    pub parallel: bool,
}

/// Birth and death counters per team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stats {
    pub birth_a: u64,
    pub death_a: u64,
    pub birth_b: u64,
    pub death_b: u64,
}

impl Stats {
    /// Count the transitions between two snapshots of the same board.
    ///
    /// A team cell turning empty is a death of that team; any cell turning
    /// into a team it did not hold is a birth of that team.
    pub fn between(before: &Grid, after: &Grid) -> Self {
        let mut stats = Stats::default();
        for (&old, &new) in before.cells.iter().zip(&after.cells) {
            if old == new {
                continue;
            }
            match (old, new) {
                (Cell::TeamA, Cell::Empty) => stats.death_a += 1,
                (Cell::TeamB, Cell::Empty) => stats.death_b += 1,
                (_, Cell::TeamA) => stats.birth_a += 1,
                (_, Cell::TeamB) => stats.birth_b += 1,
                _ => {}
            }
        }
        stats
    }

    /// Whether nothing changed
    pub fn is_quiet(&self) -> bool {
        *self == Stats::default()
    }

    pub fn total_births(&self) -> u64 {
        self.birth_a + self.birth_b
    }

    pub fn total_deaths(&self) -> u64 {
        self.death_a + self.death_b
    }
}

impl AddAssign for Stats {
    fn add_assign(&mut self, other: Self) {
        self.birth_a += other.birth_a;
        self.death_a += other.death_a;
        self.birth_b += other.birth_b;
        self.death_b += other.death_b;
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "A: +{} -{} | B: +{} -{}",
            self.birth_a, self.death_a, self.birth_b, self.death_b
        )
    }
}

/// Owns a board and the active rules, and advances them one generation at a
/// time.
///
/// Statistics accumulate over the whole lifetime of the world;
/// [`World::next_state`] also returns the counters of that single generation.
/// The world keeps no timing state: an outside loop decides when to step.
pub struct World<B> {
    board: B,
    rules: RulesManager,
    config: EngineConfig,
    stats: Stats,
    generation: u64,
}

impl<B: Board> World<B> {
    /// Create a world with the default engine configuration
    pub fn new<I>(board: B, rules: I) -> Result<Self, LifeError>
    where
        I: IntoIterator,
        I::Item: Into<Rule>,
    {
        Self::with_config(board, rules, EngineConfig::default())
    }

    pub fn with_config<I>(board: B, rules: I, config: EngineConfig) -> Result<Self, LifeError>
    where
        I: IntoIterator,
        I::Item: Into<Rule>,
    {
        if board.width() == 0 || board.height() == 0 {
            return Err(LifeError::InvalidDimension {
                width: board.width(),
                height: board.height(),
            });
        }

        Ok(Self {
            board,
            rules: RulesManager::with_rules(rules)?,
            config,
            stats: Stats::default(),
            generation: 0,
        })
    }

    /// Compute the next generation and commit it to the board.
    ///
    /// Every cell reads the frozen pre-transition snapshot, never a value
    /// computed during the same pass. If any rule misbehaves the pass is
    /// discarded and the board keeps its previous state.
    pub fn next_state(&mut self) -> Result<Stats, LifeError> {
        let current = self.board.grid();
        let (width, height) = (self.board.width(), self.board.height());
        if !(current.width == width && current.height == height) {
            return Err(LifeError::GridMismatch {
                width,
                height,
                got_width: current.width,
                got_height: current.height,
            });
        }

        let row = |y: usize| -> Result<Vec<Cell>, LifeError> {
            (0..width).map(|x| self.next_cell(&current, x, y)).collect()
        };
        let rows: Vec<Vec<Cell>> = if self.config.parallel {
            (0..height).into_par_iter().map(row).collect::<Result<_, _>>()?
        } else {
            (0..height).map(row).collect::<Result<_, _>>()?
        };

        let next = Grid {
            width,
            height,
            cells: rows.concat(),
        };
        let delta = Stats::between(&current, &next);

        self.board.set_grid(next)?;
        self.stats += delta;
        self.generation += 1;
        Ok(delta)
    }

    /// Advance several generations, stopping at the first failure
    pub fn advance(&mut self, generations: usize) -> Result<Stats, LifeError> {
        let mut total = Stats::default();
        for _ in 0..generations {
            total += self.next_state()?;
        }
        Ok(total)
    }

    fn next_cell(&self, current: &Grid, x: usize, y: usize) -> Result<Cell, LifeError> {
        let cell = current.cells[current.index(x, y)];
        if self.board.is_out_of_bounds(x, y) || cell == Cell::Barrier {
            return Ok(cell);
        }
        if cell == Cell::Empty && self.config.empty_cells == EmptyCells::Skip {
            return Ok(cell);
        }

        let neighbors = self.board.neighbors(x, y);
        let mut proposals = Vec::with_capacity(self.rules.len());
        for rule in self.rules.all() {
            if let Some(proposed) = rule.execute(cell, &neighbors)? {
                proposals.push(proposed);
            }
        }

        Ok(vote::resolve(cell, &proposals, self.config.tie_break))
    }

    /// Counters accumulated since creation or the last reset
    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = Stats::default();
    }

    /// Number of generations committed so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    /// Mutable access for editing between generations
    pub fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }

    pub fn rules(&self) -> &RulesManager {
        &self.rules
    }

    /// Registry changes must happen between generations
    pub fn rules_mut(&mut self) -> &mut RulesManager {
        &mut self.rules
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    pub fn set_config(&mut self, config: EngineConfig) {
        self.config = config;
    }

    pub fn into_board(self) -> B {
        self.board
    }
}
