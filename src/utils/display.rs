//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::life::{Cell, Grid, Stats, Team};
use crate::simulation::SimulationReport;
use anyhow::{Context, Result};
use std::path::Path;

/// Format simulation reports for display
pub struct ReportFormatter;

impl ReportFormatter {
    /// Format a report for console output
    pub fn format_report(report: &SimulationReport, show_evolution: bool) -> String {
        let mut output = String::new();

        output.push_str(&report.to_string());
        output.push_str("\n\n");

        if show_evolution && !report.history.is_empty() {
            output.push_str("Evolution:\n");
            for (i, grid) in report.history.iter().enumerate() {
                output.push_str(&format!("Generation {}:\n", i));
                output.push_str(&Self::format_grid_compact(grid));
                output.push('\n');
            }
        } else {
            output.push_str("Initial State:\n");
            output.push_str(&Self::format_grid_compact(&report.initial));
            output.push('\n');
            output.push_str(&format!(
                "Final State (after {} generations):\n",
                report.generations_run
            ));
            output.push_str(&Self::format_grid_compact(&report.final_state));
        }

        output
    }

    /// Format per-generation counters as a table
    pub fn format_generation_table(per_generation: &[Stats]) -> String {
        let mut output = String::new();

        output.push_str("Gen  | +A    | -A    | +B    | -B\n");
        output.push_str("-----|-------|-------|-------|------\n");

        for (i, stats) in per_generation.iter().enumerate() {
            output.push_str(&format!(
                "{:4} | {:5} | {:5} | {:5} | {}\n",
                i + 1,
                stats.birth_a,
                stats.death_a,
                stats.birth_b,
                stats.death_b
            ));
        }

        output
    }

    /// Symbol used on the console for a cell
    pub fn symbol(cell: Cell) -> char {
        match cell {
            Cell::Empty => '·',
            Cell::TeamA => 'A',
            Cell::TeamB => 'B',
            Cell::Barrier => '█',
        }
    }

    /// Format a grid in compact form
    pub fn format_grid_compact(grid: &Grid) -> String {
        let mut output = String::new();
        for row in grid.cells.chunks(grid.width) {
            output.extend(row.iter().map(|&cell| Self::symbol(cell)));
            output.push('\n');
        }
        output
    }

    /// Format a grid with coordinates
    pub fn format_grid_with_coords(grid: &Grid) -> String {
        let mut output = String::new();

        output.push_str("   ");
        for x in 0..grid.width {
            output.push_str(&format!("{:2}", x % 10));
        }
        output.push('\n');

        for (y, row) in grid.cells.chunks(grid.width).enumerate() {
            output.push_str(&format!("{:2} ", y));
            for &cell in row {
                let symbol = Self::symbol(cell);
                output.push(symbol);
                output.push(symbol);
            }
            output.push('\n');
        }

        output
    }

    /// Save a report to the output directory in the configured format
    pub fn save_report<P: AsRef<Path>>(
        report: &SimulationReport,
        output_dir: P,
        format: OutputFormat,
    ) -> Result<()> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

        match format {
            OutputFormat::Text => {
                let content = Self::format_report(report, true);
                std::fs::write(output_dir.join("report.txt"), content)?;
                std::fs::write(output_dir.join("final.txt"), report.final_state.to_string())?;
            }
            OutputFormat::Json => {
                report.save_to_file(output_dir.join("report.json"))?;

                let summary_json = serde_json::to_string_pretty(&report.summary())?;
                std::fs::write(output_dir.join("summary.json"), summary_json)?;
            }
            OutputFormat::Visual => {
                let content = Self::create_visual_evolution(report);
                std::fs::write(output_dir.join("report_visual.txt"), content)?;
            }
        }

        Ok(())
    }

    /// Create a visual representation of the evolution
    fn create_visual_evolution(report: &SimulationReport) -> String {
        let mut output = String::new();

        output.push_str("Visual Evolution\n");
        output.push_str(&"=".repeat(50));
        output.push('\n');

        let frames: Vec<&Grid> = if report.history.is_empty() {
            vec![&report.initial, &report.final_state]
        } else {
            report.history.iter().collect()
        };

        for (i, grid) in frames.into_iter().enumerate() {
            output.push_str(&format!(
                "\nFrame {} (A: {}, B: {}):\n",
                i,
                grid.population(Team::A),
                grid.population(Team::B)
            ));
            output.push_str(&Self::format_grid_with_coords(grid));
        }

        output.push_str("\nPer-generation statistics:\n");
        output.push_str(&Self::format_generation_table(&report.per_generation));
        output.push_str(&format!("\nOutcome: {}\n", report.stability));

        output
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err()
            && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    /// Format success message
    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    /// Format error message
    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    /// Format warning message
    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    /// Format info message
    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }

    /// Paint a grid with one color per team
    pub fn grid(grid: &Grid) -> String {
        let mut output = String::new();
        for row in grid.cells.chunks(grid.width) {
            for &cell in row {
                let symbol = ReportFormatter::symbol(cell).to_string();
                let painted = match cell {
                    Cell::TeamA => Self::colored(&symbol, Color::Cyan),
                    Cell::TeamB => Self::colored(&symbol, Color::Magenta),
                    Cell::Empty | Cell::Barrier => symbol,
                };
                output.push_str(&painted);
            }
            output.push('\n');
        }
        output
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
            Color::Magenta => 35,
            Color::Cyan => 36,
        }
    }
}
