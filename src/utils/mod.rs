//! Console and file output helpers

pub mod display;

pub use display::{Color, ColorOutput, ReportFormatter};
