//! Configuration management for the Life2 simulator

pub mod settings;

pub use settings::{
    CliOverrides, InputConfig, OutputConfig, OutputFormat, RuleConfig, Settings,
    SimulationConfig, Topology,
};
