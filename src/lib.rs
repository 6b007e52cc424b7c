//! # NozzleCal
//!
//! Generates G-code for calibration prints that measure the positional
//! offsets between the nozzles of a multi-tool 3D printer.
//!
//! ## Architecture
//!
//! NozzleCal is organized as a workspace with multiple crates:
//!
//! 1. **nozzlecal-core** - Errors, configuration model, G-code command stream
//! 2. **nozzlecal-toolpath** - Motion primitives, pattern assembly, print jobs
//! 3. **nozzlecal-settings** - JSON/TOML configuration files
//! 4. **nozzlecal** - Command-line binary that ties the crates together
//!
//! ## Prints
//!
//! - **Interlocked calibration print**: per tool slot, a pair of reference
//!   combs and a pair of signal combs along each axis, framed by a square
//! - **Meander print**: a single primed meander for one tool

pub mod cli;

pub use nozzlecal_core::{
    Command, CommandStream, GenerationError, PatternParameters, Point, PrinterConfiguration,
    Result, ToolSettings,
};
pub use nozzlecal_settings::{Config, OutputSettings, SettingsError};
pub use nozzlecal_toolpath::{
    Axis, CalibrationPrint, CoordinateTransform, Direction, ExtrusionModel, GenerationSession,
    Layout, PatternAssembler,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging on stderr with:
/// - RUST_LOG environment variable support (default level INFO)
/// - Target and level on every line
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
