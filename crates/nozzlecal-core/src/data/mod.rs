//! Configuration data model
//!
//! Plain serde-friendly values that are built once per generation run and
//! passed explicitly to the generator.

pub mod pattern;
pub mod printer;

pub use pattern::PatternParameters;
pub use printer::{PrinterConfiguration, ToolSettings};
