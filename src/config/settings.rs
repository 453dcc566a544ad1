//! Configuration settings for the Life2 simulator

use crate::life::{BuiltinRule, Boundary, EmptyCells, EngineConfig, Rule, TieBreak};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub simulation: SimulationConfig,
    pub engine: EngineConfig,
    pub rules: Vec<RuleConfig>,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub generations: usize,
    pub topology: Topology,
    pub boundary: Boundary,
    /// Stop as soon as a generation changes nothing
    pub stop_when_stable: bool,
    /// Check barrier and domain invariants after every generation
    pub verify_invariants: bool,
}

/// A built-in rule as listed in the config, optionally registered under its
/// own name so one kind can be used twice with different parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub rule: BuiltinRule,
}

impl RuleConfig {
    pub fn named(name: impl Into<String>, rule: BuiltinRule) -> Self {
        Self {
            name: Some(name.into()),
            rule,
        }
    }

    /// Name the rule is registered under
    pub fn name(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.rule.name())
    }
}

impl From<BuiltinRule> for RuleConfig {
    fn from(rule: BuiltinRule) -> Self {
        Self { name: None, rule }
    }
}

impl From<RuleConfig> for Rule {
    fn from(config: RuleConfig) -> Self {
        Rule::new(config.name(), config.rule.details(), config.rule)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topology {
    Rectangular,
    Hexagonal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub board_file: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub save_history: bool,
    pub output_directory: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
    Visual,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig {
                generations: 10,
                topology: Topology::Rectangular,
                boundary: Boundary::Dead,
                stop_when_stable: true,
                verify_invariants: false,
            },
            engine: EngineConfig {
                empty_cells: EmptyCells::Evaluate,
                tie_break: TieBreak::KeepCurrent,
                parallel: false,
            },
            rules: BuiltinRule::conway().into_iter().map(RuleConfig::from).collect(),
            input: InputConfig {
                board_file: PathBuf::from("input/boards/duel.txt"),
                mask_file: None,
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                save_history: true,
                output_directory: PathBuf::from("output/runs"),
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.simulation.generations == 0 {
            anyhow::bail!("Number of generations must be positive");
        }

        if self.rules.is_empty() {
            anyhow::bail!("At least one rule must be active");
        }

        let mut seen = HashSet::new();
        for rule in &self.rules {
            let name = rule.name();
            if !seen.insert(name.clone()) {
                anyhow::bail!("Rule '{}' is listed more than once", name);
            }
        }

        if !self.input.board_file.exists() {
            anyhow::bail!("Board file does not exist: {}", self.input.board_file.display());
        }

        if let Some(ref mask_file) = self.input.mask_file {
            if !mask_file.exists() {
                anyhow::bail!("Mask file does not exist: {}", mask_file.display());
            }
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(generations) = cli_overrides.generations {
            self.simulation.generations = generations;
        }
        if let Some(ref board_file) = cli_overrides.board_file {
            self.input.board_file = board_file.clone();
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
        }
        if cli_overrides.parallel {
            self.engine.parallel = true;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub generations: Option<usize>,
    pub board_file: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub parallel: bool,
}
