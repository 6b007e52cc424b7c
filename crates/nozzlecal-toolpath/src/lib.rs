//! # NozzleCal Toolpath
//!
//! Toolpath synthesis for multi-nozzle offset calibration prints.
//!
//! ## Layers
//!
//! - **transform** - rotation of the logical frame about the pattern center
//! - **extrusion** - filament feed for a bead of given length
//! - **session** - motion primitives over a single-owner generation session
//! - **direction** - travel directions and the shared sign table
//! - **pattern** - meanders, interlocked combs and framing squares
//! - **print** - start/stop sequences, layout and complete print jobs
//!
//! Data flows one way: [`CalibrationPrint`] lays out patterns, the
//! [`PatternAssembler`] composes primitives, and the [`GenerationSession`]
//! turns primitives into commands.

pub mod direction;
pub mod extrusion;
pub mod pattern;
pub mod print;
pub mod session;
pub mod transform;

pub use direction::{Axis, Direction};
pub use extrusion::ExtrusionModel;
pub use pattern::PatternAssembler;
pub use print::{meander_start, start_sequence, stop_sequence, CalibrationPrint, Layout};
pub use session::{GenerationSession, ToolState};
pub use transform::CoordinateTransform;
