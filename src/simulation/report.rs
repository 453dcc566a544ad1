//! Results of a simulation run

use crate::life::{Grid, Stats, Team};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Longest oscillation period looked for
pub const MAX_PERIOD: usize = 8;

/// Everything a run produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Board before the first generation
    pub initial: Grid,
    /// Board after the last committed generation
    pub final_state: Grid,
    /// Generations actually computed
    pub generations_run: usize,
    /// Whether the run ended because a generation changed nothing
    pub stopped_early: bool,
    /// Names of the active rules, in registration order
    pub rules: Vec<String>,
    /// Counters of every generation, in order
    pub per_generation: Vec<Stats>,
    /// Counters summed over the run
    pub totals: Stats,
    /// Every board from `initial` to `final_state`, when history is kept
    pub history: Vec<Grid>,
    pub stability: StabilityAnalysis,
    #[serde(skip)]
    pub elapsed: Duration,
}

/// Short summary used for json output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    pub generations_run: usize,
    pub stopped_early: bool,
    pub initial_population: Population,
    pub final_population: Population,
    pub totals: Stats,
    pub stability: StabilityAnalysis,
    pub elapsed_ms: u64,
}

/// Cells held by each team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Population {
    pub team_a: usize,
    pub team_b: usize,
}

/// What the tail of a run looks like
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StabilityAnalysis {
    /// No team holds any cell any more
    pub is_extinct: bool,
    /// The last generation changed nothing
    pub is_still_life: bool,
    /// The last states repeat with a period of 2 or more
    pub is_oscillator: bool,
    pub oscillation_period: Option<usize>,
}

impl Population {
    pub fn of(grid: &Grid) -> Self {
        Self {
            team_a: grid.population(Team::A),
            team_b: grid.population(Team::B),
        }
    }

    /// The team holding more cells, if any
    pub fn leader(&self) -> Option<Team> {
        match self.team_a.cmp(&self.team_b) {
            std::cmp::Ordering::Greater => Some(Team::A),
            std::cmp::Ordering::Less => Some(Team::B),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl SimulationReport {
    pub fn initial_population(&self) -> Population {
        Population::of(&self.initial)
    }

    pub fn final_population(&self) -> Population {
        Population::of(&self.final_state)
    }

    /// Get a specific state of the run, when history was kept
    pub fn state_at_generation(&self, generation: usize) -> Option<&Grid> {
        self.history.get(generation)
    }

    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            generations_run: self.generations_run,
            stopped_early: self.stopped_early,
            initial_population: self.initial_population(),
            final_population: self.final_population(),
            totals: self.totals,
            stability: self.stability.clone(),
            elapsed_ms: self.elapsed.as_millis() as u64,
        }
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Create from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Save to file
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

impl StabilityAnalysis {
    /// Analyze the most recent states of a run, oldest first
    pub fn analyze(recent: &[Grid]) -> Self {
        let Some(last) = recent.last() else {
            return Self::default();
        };

        let is_extinct = last.is_extinct();
        let is_still_life = recent.len() >= 2 && recent[recent.len() - 2] == *last;
        let oscillation_period = if is_still_life {
            None
        } else {
            Self::find_period(recent)
        };

        Self {
            is_extinct,
            is_still_life,
            is_oscillator: oscillation_period.is_some(),
            oscillation_period,
        }
    }

    /// Smallest period `p >= 2` such that the tail repeats every `p` states
    fn find_period(recent: &[Grid]) -> Option<usize> {
        let n = recent.len();
        (2..=MAX_PERIOD.min(n.saturating_sub(1))).find(|&period| {
            (0..period)
                .take_while(|&i| i + period < n)
                .all(|i| recent[n - 1 - i] == recent[n - 1 - i - period])
        })
    }
}

impl fmt::Display for StabilityAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_extinct {
            write!(f, "Extinct")
        } else if self.is_still_life {
            write!(f, "Still life")
        } else if let Some(period) = self.oscillation_period {
            write!(f, "Oscillator (period {})", period)
        } else {
            write!(f, "Evolving")
        }
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let initial = self.initial_population();
        let last = self.final_population();
        writeln!(f, "Simulation Report:")?;
        writeln!(f, "  Board: {}x{}", self.initial.width, self.initial.height)?;
        writeln!(f, "  Rules: {}", self.rules.join(", "))?;
        writeln!(
            f,
            "  Generations: {}{}",
            self.generations_run,
            if self.stopped_early { " (stopped early)" } else { "" }
        )?;
        writeln!(f, "  Team A: {} → {}", initial.team_a, last.team_a)?;
        writeln!(f, "  Team B: {} → {}", initial.team_b, last.team_b)?;
        writeln!(f, "  Totals: {}", self.totals)?;
        writeln!(f, "  Outcome: {}", self.stability)?;
        write!(f, "  Time: {:.3}s", self.elapsed.as_secs_f64())
    }
}
