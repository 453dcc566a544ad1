//! Life2: a two-team cellular automaton
//!
//! Cells belong to team A, team B, are empty, or are permanent barriers.
//! Every generation each registered rule proposes an outcome for each cell,
//! the proposals are resolved by vote and the whole board is updated at once.

pub mod config;
pub mod error;
pub mod life;
pub mod simulation;
pub mod utils;

pub use config::Settings;
pub use error::LifeError;
pub use life::{Board, Cell, Grid, Rule, RulesManager, Stats, Team, World};
pub use simulation::{Simulation, SimulationReport};

use anyhow::Result;

/// Main entry point: load the configured board and run it
pub fn run_simulation(settings: Settings) -> Result<SimulationReport> {
    let mut simulation = Simulation::new(settings)?;
    simulation.run()
}
