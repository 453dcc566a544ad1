//! Configured simulation runs and their reports

pub mod report;
pub mod runner;
pub mod validator;

pub use report::{Population, ReportSummary, SimulationReport, StabilityAnalysis};
pub use runner::{build_board, Mask, Simulation};
pub use validator::{TransitionValidator, Violation};
