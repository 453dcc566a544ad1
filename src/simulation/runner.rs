//! Builds a world from settings and drives it generation by generation

use super::report::{SimulationReport, StabilityAnalysis, MAX_PERIOD};
use super::validator::TransitionValidator;
use crate::config::{Settings, Topology};
use crate::life::{
    load_grid_from_file, load_mask_from_file, Board, Boundary, Grid, HexagonalBoard, MaskedBoard,
    RectangularBoard, Rule, Stats, Team, World,
};
use anyhow::{Context, Result};
use std::collections::VecDeque;
use std::time::Instant;

/// An occupiable-area mask over a board's bounding box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    pub width: usize,
    pub height: usize,
    pub occupiable: Vec<bool>,
}

/// A configured run of the Life2 engine
pub struct Simulation {
    settings: Settings,
    world: World<Box<dyn Board>>,
    verbose: bool,
}

impl Simulation {
    /// Create a simulation, loading the board (and mask) named in the settings
    pub fn new(settings: Settings) -> Result<Self> {
        let grid = load_grid_from_file(&settings.input.board_file)
            .context("Failed to load board file")?;

        let mask = match settings.input.mask_file {
            Some(ref path) => {
                let (width, height, occupiable) =
                    load_mask_from_file(path).context("Failed to load mask file")?;
                Some(Mask {
                    width,
                    height,
                    occupiable,
                })
            }
            None => None,
        };

        Self::with_grid(settings, grid, mask)
    }

    /// Create a simulation from an explicit starting grid (useful for testing)
    pub fn with_grid(settings: Settings, grid: Grid, mask: Option<Mask>) -> Result<Self> {
        let board = build_board(
            settings.simulation.topology,
            settings.simulation.boundary,
            grid,
            mask,
        )?;
        let rules = settings.rules.iter().cloned().map(Rule::from);
        let world = World::with_config(board, rules, settings.engine)
            .context("Failed to set up the world")?;

        Ok(Self {
            settings,
            world,
            verbose: false,
        })
    }

    /// Print a line per generation while running
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Advance up to the configured number of generations
    pub fn run(&mut self) -> Result<SimulationReport> {
        let start_time = Instant::now();
        let generations = self.settings.simulation.generations;
        let save_history = self.settings.output.save_history;
        let validator = TransitionValidator::new();

        let initial = self.world.board().grid();
        let mut history = if save_history {
            vec![initial.clone()]
        } else {
            Vec::new()
        };
        let mut recent = VecDeque::with_capacity(2 * MAX_PERIOD + 1);
        recent.push_back(initial.clone());

        let mut per_generation = Vec::with_capacity(generations);
        let mut totals = Stats::default();
        let mut stopped_early = false;

        if self.verbose {
            println!(
                "Running {} generations on a {}x{} board with {} rules",
                generations,
                initial.width,
                initial.height,
                self.world.rules().len()
            );
        }

        for generation in 1..=generations {
            let delta = self
                .world
                .next_state()
                .with_context(|| format!("Generation {} failed", generation))?;
            let current = self.world.board().grid();

            if self.settings.simulation.verify_invariants {
                if let Some(previous) = recent.back() {
                    let violations = validator.check(previous, &current);
                    if let Some(violation) = violations.first() {
                        anyhow::bail!(
                            "Generation {} broke {} invariant(s), first: {}",
                            generation,
                            violations.len(),
                            violation
                        );
                    }
                }
            }

            if self.verbose {
                println!(
                    "Generation {}: {} (A: {}, B: {})",
                    generation,
                    delta,
                    current.population(Team::A),
                    current.population(Team::B)
                );
            }

            per_generation.push(delta);
            totals += delta;
            if save_history {
                history.push(current.clone());
            }
            if recent.len() == 2 * MAX_PERIOD + 1 {
                recent.pop_front();
            }
            recent.push_back(current);

            if delta.is_quiet() && self.settings.simulation.stop_when_stable {
                stopped_early = generation < generations;
                break;
            }
        }

        let recent: Vec<Grid> = recent.into_iter().collect();
        let stability = StabilityAnalysis::analyze(&recent);
        let final_state = self.world.board().grid();

        if self.verbose {
            println!("Finished after {} generations: {}", per_generation.len(), stability);
        }

        Ok(SimulationReport {
            initial,
            final_state,
            generations_run: per_generation.len(),
            stopped_early,
            rules: self.world.rules().names().into_iter().map(String::from).collect(),
            per_generation,
            totals,
            history,
            stability,
            elapsed: start_time.elapsed(),
        })
    }

    pub fn world(&self) -> &World<Box<dyn Board>> {
        &self.world
    }

    /// Mutable access, e.g. to register custom rules before running
    pub fn world_mut(&mut self) -> &mut World<Box<dyn Board>> {
        &mut self.world
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

/// Build the board described by a topology, optionally masked
pub fn build_board(
    topology: Topology,
    boundary: Boundary,
    grid: Grid,
    mask: Option<Mask>,
) -> Result<Box<dyn Board>> {
    let (width, height) = (grid.width, grid.height);
    let board: Box<dyn Board> = match topology {
        Topology::Rectangular => Box::new(RectangularBoard::from_grid(grid, boundary)),
        Topology::Hexagonal => Box::new(
            HexagonalBoard::from_grid(grid, boundary)
                .context("Hexagonal boards that wrap need an even height")?,
        ),
    };

    let Some(mask) = mask else {
        return Ok(board);
    };

    if mask.width != width || mask.height != height {
        anyhow::bail!(
            "Mask is {}x{} but the board is {}x{}",
            mask.width,
            mask.height,
            width,
            height
        );
    }

    let masked = MaskedBoard::new(board, mask.occupiable).context("Failed to apply mask")?;
    Ok(Box::new(masked))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::life::io::parse_grid_from_string;
    use crate::error::LifeError;
    use crate::life::{BuiltinRule, Cell, EmptyCells};
    use tempfile::tempdir;

    fn settings(generations: usize) -> Settings {
        let mut settings = Settings::default();
        settings.simulation.generations = generations;
        settings
    }

    fn grid(content: &str) -> Grid {
        parse_grid_from_string(content).unwrap()
    }

    #[test]
    fn test_blinker_run() {
        let start = grid(".....\n.....\n.aaa.\n.....\n.....\n");
        let mut simulation = Simulation::with_grid(settings(4), start.clone(), None).unwrap();
        let report = simulation.run().unwrap();

        assert_eq!(report.generations_run, 4);
        assert!(!report.stopped_early);
        assert_eq!(report.history.len(), 5);
        assert_eq!(report.final_state, start);
        assert_eq!(report.stability.oscillation_period, Some(2));
        assert_eq!(report.totals.birth_a, 8);
        assert_eq!(report.totals.death_a, 8);
    }

    #[test]
    fn test_stops_when_stable() {
        let block = grid("....\n.aa.\n.aa.\n....\n");
        let mut simulation = Simulation::with_grid(settings(10), block, None).unwrap();
        let report = simulation.run().unwrap();

        assert_eq!(report.generations_run, 1);
        assert!(report.stopped_early);
        assert!(report.stability.is_still_life);
    }

    #[test]
    fn test_history_can_be_skipped() {
        let mut settings = settings(3);
        settings.output.save_history = false;
        settings.simulation.stop_when_stable = false;
        let mut simulation = Simulation::with_grid(settings, grid("a.\n.b\n"), None).unwrap();
        let report = simulation.run().unwrap();

        assert!(report.history.is_empty());
        assert_eq!(report.per_generation.len(), 3);
        assert!(report.stability.is_extinct);
    }

    #[test]
    fn test_invalid_rule_output_aborts_run() {
        let start = grid("ab\n..\n");
        let mut simulation = Simulation::with_grid(settings(3), start.clone(), None).unwrap();
        let walls = Rule::new("walls", "", |_: Cell, _: &[Cell]| Some(Cell::Barrier));
        simulation.world_mut().rules_mut().add(walls).unwrap();

        let err = simulation.run().unwrap_err();
        let cause = err.downcast_ref::<LifeError>();
        assert!(matches!(cause, Some(LifeError::InvalidRuleOutput { .. })));
        assert_eq!(simulation.world().board().grid(), start);
    }

    #[test]
    fn test_mask_dimensions_checked() {
        let mask = Mask {
            width: 1,
            height: 1,
            occupiable: vec![true],
        };
        let result = Simulation::with_grid(settings(1), grid("..\n..\n"), Some(mask));
        assert!(result.is_err());
    }

    #[test]
    fn test_masked_hexagonal_run() {
        let mut settings = settings(2);
        settings.simulation.topology = Topology::Hexagonal;
        settings.simulation.verify_invariants = true;
        settings.rules = vec![BuiltinRule::Loneliness { min: 1 }.into()];
        let mask = Mask {
            width: 3,
            height: 2,
            occupiable: vec![false, true, true, true, true, true],
        };
        let start = grid("a.a\n..#\n");
        let mut simulation = Simulation::with_grid(settings, start, Some(mask)).unwrap();
        let report = simulation.run().unwrap();

        // (0, 0) is masked out and kept; the lonely cell at (2, 0) dies
        assert_eq!(report.final_state.get(0, 0), Some(Cell::TeamA));
        assert_eq!(report.final_state.get(2, 0), Some(Cell::Empty));
        assert_eq!(report.final_state.get(2, 1), Some(Cell::Barrier));
    }

    #[test]
    fn test_odd_height_hexagonal_wrap_rejected() {
        let mut settings = settings(1);
        settings.simulation.topology = Topology::Hexagonal;
        settings.simulation.boundary = Boundary::Wrap;

        let err = Simulation::with_grid(settings.clone(), grid("...\n...\n...\n"), None)
            .err()
            .unwrap();
        assert!(matches!(
            err.downcast_ref::<LifeError>(),
            Some(LifeError::InvalidDimension { width: 3, height: 3 })
        ));
        assert!(Simulation::with_grid(settings, grid("...\n...\n"), None).is_ok());
    }

    #[test]
    fn test_skip_empty_cells_setting() {
        let mut settings = settings(1);
        settings.engine.empty_cells = EmptyCells::Skip;
        let start = grid("aa.\na..\n...\n");
        let mut simulation = Simulation::with_grid(settings, start, None).unwrap();
        let report = simulation.run().unwrap();
        assert_eq!(report.totals.birth_a, 0);
    }

    #[test]
    fn test_new_loads_files() {
        let temp_dir = tempdir().unwrap();
        let board = temp_dir.path().join("board.txt");
        let mask = temp_dir.path().join("mask.txt");
        std::fs::write(&board, "a.\n.b\n").unwrap();
        std::fs::write(&mask, "11\n10\n").unwrap();

        let mut settings = settings(1);
        settings.input.board_file = board;
        settings.input.mask_file = Some(mask);

        let simulation = Simulation::new(settings).unwrap();
        assert!(simulation.world().board().is_out_of_bounds(1, 1));
        assert!(!simulation.world().board().is_out_of_bounds(0, 0));
    }
}
