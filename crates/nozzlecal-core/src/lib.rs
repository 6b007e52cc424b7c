//! # NozzleCal Core
//!
//! Core types shared by the NozzleCal crates:
//!
//! - **error** - [`GenerationError`] and the crate [`Result`] alias
//! - **data** - printer configuration and calibration pattern dimensions
//! - **gcode** - typed G-code commands and the append-only [`CommandStream`]
//! - **geometry** - planar [`Point`] arithmetic
//! - **units** - feed rate and angle conversions

pub mod data;
pub mod error;
pub mod gcode;
pub mod geometry;
pub mod units;

pub use data::{PatternParameters, PrinterConfiguration, ToolSettings};
pub use error::{GenerationError, Result};
pub use gcode::{Command, CommandStream};
pub use geometry::Point;
