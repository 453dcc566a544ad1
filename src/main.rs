//! Command line front end for the Life2 simulator

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use life2::{
    config::{CliOverrides, RuleConfig, Settings, Topology},
    life::{create_example_boards, load_grid_from_file, Board, Boundary, BuiltinRule},
    simulation::{Simulation, TransitionValidator},
    utils::{ColorOutput, ReportFormatter},
};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "life2")]
#[command(about = "Two-team Game of Life simulator")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Starting board file (overrides config)
        #[arg(short, long)]
        board: Option<PathBuf>,

        /// Number of generations (overrides config)
        #[arg(short, long)]
        generations: Option<usize>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Evaluate rows in parallel
        #[arg(short, long)]
        parallel: bool,

        /// Print every generation of the run
        #[arg(long)]
        show_history: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Create example configuration and board files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// List the built-in rules
    Rules,

    /// Check that one board is a valid successor of another
    Validate {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Board before the generation
        #[arg(long)]
        before: PathBuf,

        /// Board after the generation
        #[arg(long)]
        after: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            board,
            generations,
            output,
            parallel,
            show_history,
            verbose,
        } => run_command(
            config,
            board,
            generations,
            output,
            parallel,
            show_history,
            verbose,
        ),
        Commands::Setup { directory, force } => setup_command(directory, force),
        Commands::Rules => rules_command(),
        Commands::Validate {
            config,
            before,
            after,
        } => validate_command(config, before, after),
    }
}

fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!(
                "Config file {} not found, using defaults",
                config_path.display()
            ))
        );
        Ok(Settings::default())
    }
}

fn run_command(
    config_path: PathBuf,
    board_file: Option<PathBuf>,
    generations: Option<usize>,
    output_dir: Option<PathBuf>,
    parallel: bool,
    show_history: bool,
    verbose: bool,
) -> Result<()> {
    println!("{}", ColorOutput::info("▶ Starting Life2 simulation"));

    let mut settings = load_settings(&config_path)?;
    let cli_overrides = CliOverrides {
        generations,
        board_file,
        output_dir,
        parallel,
    };
    settings.merge_with_cli(&cli_overrides);

    if verbose {
        println!("Configuration:");
        println!("  Generations: {}", settings.simulation.generations);
        println!("  Topology: {:?}", settings.simulation.topology);
        println!("  Boundary: {:?}", settings.simulation.boundary);
        println!("  Board file: {}", settings.input.board_file.display());
        if let Some(ref mask_file) = settings.input.mask_file {
            println!("  Mask file: {}", mask_file.display());
        }
        println!("  Output dir: {}", settings.output.output_directory.display());
        println!();
    }

    settings
        .validate()
        .context("Configuration validation failed")?;

    let start_time = Instant::now();
    let mut simulation = Simulation::new(settings.clone())
        .context("Failed to create simulation")?
        .verbose(verbose);

    if verbose {
        println!("Starting board:");
        println!("{}", ColorOutput::grid(&simulation.world().board().grid()));
    }

    let report = simulation.run().context("Simulation failed")?;
    let total_time = start_time.elapsed();

    println!(
        "{}",
        ColorOutput::success(&format!(
            "✅ Ran {} generation(s) in {:.3}s",
            report.generations_run,
            total_time.as_secs_f64()
        ))
    );
    if report.stopped_early {
        println!("{}", ColorOutput::info("Board became stable, stopped early"));
    }

    println!("\n{}", ReportFormatter::format_report(&report, show_history));

    println!("\n{}", ColorOutput::info("💾 Saving report..."));
    ReportFormatter::save_report(
        &report,
        &settings.output.output_directory,
        settings.output.format,
    )
    .context("Failed to save report")?;

    println!(
        "{}",
        ColorOutput::success(&format!(
            "Report saved to {}",
            settings.output.output_directory.display()
        ))
    );

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("🛠️  Setting up project structure..."));

    let config_dir = directory.join("config");
    let input_dir = directory.join("input/boards");
    let output_dir = directory.join("output/runs");

    for dir in [&config_dir, &input_dir, &output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    write_config(&Settings::default(), &config_dir.join("default.yaml"), force)
        .context("Failed to create default configuration")?;

    let written = create_example_boards(&input_dir, force).context("Failed to create example boards")?;
    println!("Created {} example board(s) in: {}", written, input_dir.display());
    if written < 4 {
        println!("Kept existing boards (use --force to overwrite)");
    }

    let examples_dir = config_dir.join("examples");
    std::fs::create_dir_all(&examples_dir)?;

    // Glider crossing a torus
    let mut wrap_config = Settings::default();
    wrap_config.simulation.generations = 40;
    wrap_config.simulation.boundary = Boundary::Wrap;
    wrap_config.simulation.stop_when_stable = false;
    wrap_config.input.board_file = PathBuf::from("input/boards/skirmish.txt");
    write_config(&wrap_config, &examples_dir.join("wrap.yaml"), force)?;

    // Hexagonal board clipped to a diamond
    let mut hex_config = Settings::default();
    hex_config.simulation.topology = Topology::Hexagonal;
    hex_config.simulation.verify_invariants = true;
    hex_config.rules = vec![
        BuiltinRule::Loneliness { min: 2 }.into(),
        BuiltinRule::Overpopulation { max: 4 }.into(),
        BuiltinRule::MajorityBirth.into(),
    ];
    hex_config.input.mask_file = Some(PathBuf::from("input/boards/duel_mask.txt"));
    write_config(&hex_config, &examples_dir.join("hexagonal.yaml"), force)?;

    // Walled arena, two-team rules
    let mut arena_config = Settings::default();
    arena_config.simulation.generations = 25;
    arena_config.rules = BuiltinRule::two_team().into_iter().map(RuleConfig::from).collect();
    arena_config.engine.parallel = true;
    arena_config.input.board_file = PathBuf::from("input/boards/arena.txt");
    arena_config.output.format = life2::config::OutputFormat::Json;
    write_config(&arena_config, &examples_dir.join("arena.yaml"), force)?;


    println!("\n{}", ColorOutput::success("✅ Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Draw your own boards in {}", input_dir.display());
    println!("3. Run: cargo run -- run --config config/default.yaml");

    Ok(())
}

/// Write a settings file unless it exists and `force` is off
fn write_config(settings: &Settings, path: &PathBuf, force: bool) -> Result<()> {
    if path.exists() && !force {
        println!("Skipped: {} (already exists)", path.display());
        return Ok(());
    }
    settings.to_file(path)?;
    println!("Created: {}", path.display());
    Ok(())
}

fn rules_command() -> Result<()> {
    println!("{}", ColorOutput::info("Built-in rules:"));

    for rule in BuiltinRule::catalog() {
        println!("  {:<16} {}", rule.name(), rule.details());
    }

    let conway: Vec<String> = BuiltinRule::conway().iter().map(BuiltinRule::name).collect();
    println!("\nDefault rule set: {}", conway.join(", "));
    let two_team: Vec<String> = BuiltinRule::two_team().iter().map(BuiltinRule::name).collect();
    println!("Two-team rule set: {}", two_team.join(", "));

    Ok(())
}

fn validate_command(config_path: PathBuf, before_path: PathBuf, after_path: PathBuf) -> Result<()> {
    println!("{}", ColorOutput::info("🔍 Validating transition..."));

    let mut settings = load_settings(&config_path)?;
    settings.simulation.generations = 1;
    settings.input.board_file = before_path.clone();

    let before = load_grid_from_file(&before_path)
        .with_context(|| format!("Failed to load board from {}", before_path.display()))?;
    let after = load_grid_from_file(&after_path)
        .with_context(|| format!("Failed to load board from {}", after_path.display()))?;

    let violations = TransitionValidator::new().check(&before, &after);
    for violation in &violations {
        println!("{}", ColorOutput::error(&format!("  {}", violation)));
    }

    let mut simulation = Simulation::new(settings).context("Failed to create simulation")?;
    let report = simulation.run().context("Simulation failed")?;

    if violations.is_empty() && report.final_state == after {
        println!("{}", ColorOutput::success("✅ Transition is valid!"));
        return Ok(());
    }

    println!("{}", ColorOutput::error("❌ Transition is invalid"));
    if report.final_state != after {
        println!("Expected successor:");
        println!("{}", ReportFormatter::format_grid_with_coords(&report.final_state));
    }
    anyhow::bail!(
        "{} is not a valid successor of {}",
        after_path.display(),
        before_path.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "life2",
            "run",
            "--config",
            "test.yaml",
            "--generations",
            "5",
            "--parallel",
        ]);
        assert!(cli.is_ok());

        let cli = Cli::try_parse_from(["life2", "validate", "--before", "a.txt"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        let result = setup_command(temp_dir.path().to_path_buf(), false);

        assert!(result.is_ok());
        assert!(temp_dir.path().join("config/default.yaml").exists());
        assert!(temp_dir.path().join("config/examples/hexagonal.yaml").exists());
        assert!(temp_dir.path().join("input/boards/duel.txt").exists());

        let loaded = Settings::from_file(&temp_dir.path().join("config/examples/arena.yaml")).unwrap();
        assert!(loaded.engine.parallel);
        let names: Vec<String> = loaded.rules.iter().map(RuleConfig::name).collect();
        assert_eq!(names, vec!["loneliness", "team_change", "overpopulation", "birth"]);
    }

    #[test]
    fn test_validate_command() {
        let temp_dir = tempdir().unwrap();
        let before = temp_dir.path().join("before.txt");
        let after = temp_dir.path().join("after.txt");
        std::fs::write(&before, ".....\n..a..\n..a..\n..a..\n.....\n").unwrap();
        std::fs::write(&after, ".....\n.....\n.aaa.\n.....\n.....\n").unwrap();

        let config = temp_dir.path().join("missing.yaml");
        assert!(validate_command(config.clone(), before.clone(), after.clone()).is_ok());

        // Unchanged board is not the successor of a blinker
        std::fs::write(&after, ".....\n..a..\n..a..\n..a..\n.....\n").unwrap();
        let err = validate_command(config, before, after).unwrap_err();
        assert!(err.to_string().contains("not a valid successor"));
    }

    #[test]
    fn test_setup_keeps_existing_files() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path().to_path_buf();
        setup_command(root.clone(), false).unwrap();

        let arena_config = root.join("config/examples/arena.yaml");
        let duel = root.join("input/boards/duel.txt");
        std::fs::write(&arena_config, "edited").unwrap();
        std::fs::write(&duel, "a\n").unwrap();

        setup_command(root.clone(), false).unwrap();
        assert_eq!(std::fs::read_to_string(&arena_config).unwrap(), "edited");
        assert_eq!(std::fs::read_to_string(&duel).unwrap(), "a\n");

        setup_command(root, true).unwrap();
        assert!(Settings::from_file(&arena_config).is_ok());
        assert_ne!(std::fs::read_to_string(&duel).unwrap(), "a\n");
    }
}
