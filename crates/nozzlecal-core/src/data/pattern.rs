//! Calibration pattern geometry
//!
//! [`PatternParameters`] holds the fixed dimensions of the meander and
//! interlocked comb families. Everything else about a layout (repetition
//! counts, effective lengths, bounding boxes) is derived from these values.

use crate::error::{GenerationError, Result};
use serde::{Deserialize, Serialize};

/// Dimensions of a calibration pattern family (all lengths in mm)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternParameters {
    /// Extent of a comb perpendicular to its travel direction
    pub width: f64,
    /// Spacing between meander traces
    pub pitch: f64,
    /// Part of the width covered only by the signal or only by the reference comb
    pub sigref_only: f64,
    /// Nominal length along the travel direction
    pub length: f64,
    /// Number of nested outlines in the framing square
    pub square_lines: usize,
    /// Gap between neighbouring combs
    pub spacing: f64,
    /// Clearance between the combs and the framing square
    pub spacing_to_square: f64,
    /// Travel distance of one interlocked tooth
    pub interlocked_period: f64,
    /// Trace spacing inside an interlocked tooth
    pub interlocked_pitch: f64,
    /// Distance of the priming spot before the meander start
    pub prime_gap: f64,
    /// Filament fed at the priming spot
    pub prime_amount: f64,
}

impl Default for PatternParameters {
    fn default() -> Self {
        Self {
            width: 8.0,
            pitch: 1.0,
            sigref_only: 2.0,
            length: 70.0,
            square_lines: 3,
            spacing: 3.0,
            spacing_to_square: 5.0,
            interlocked_period: 4.0,
            interlocked_pitch: 0.75,
            prime_gap: 10.0,
            prime_amount: 15.0,
        }
    }
}

impl PatternParameters {
    pub fn validate(&self) -> Result<()> {
        if self.width <= 0.0 {
            return Err(GenerationError::invalid_configuration("width must be > 0"));
        }
        if self.pitch <= 0.0 {
            return Err(GenerationError::invalid_configuration("pitch must be > 0"));
        }
        if self.interlocked_period <= 0.0 {
            return Err(GenerationError::invalid_configuration(
                "interlocked period must be > 0",
            ));
        }
        if self.interlocked_pitch <= 0.0 {
            return Err(GenerationError::invalid_configuration(
                "interlocked pitch must be > 0",
            ));
        }
        if self.length < 0.0 {
            return Err(GenerationError::invalid_configuration(
                "length must be >= 0",
            ));
        }
        if self.width <= 2.0 * self.pitch {
            return Err(GenerationError::invalid_configuration(
                "width must be larger than two pitches",
            ));
        }
        if self.sigref_only < 0.0 || self.sigref_only >= self.width {
            return Err(GenerationError::invalid_configuration(
                "sigref_only must be >= 0 and smaller than width",
            ));
        }
        Ok(())
    }

    /// Meander repetitions: each one advances two pitches
    pub fn repetitions(&self) -> usize {
        floor_count(self.length / self.pitch / 2.0)
    }

    /// Printed meander length, never longer than `length`
    pub fn effective_length(&self) -> f64 {
        self.repetitions() as f64 * self.pitch * 2.0
    }

    /// Interlocked repetitions: each one advances one period
    pub fn repetitions_interlocked(&self) -> usize {
        floor_count(self.length / self.interlocked_period)
    }

    /// Printed interlocked length, never longer than `length`
    pub fn effective_length_interlocked(&self) -> f64 {
        self.repetitions_interlocked() as f64 * self.interlocked_period
    }

    /// Width of the comb pairs of `n_tools` tools placed side by side
    pub fn total_one_dir_width(&self, n_tools: usize) -> f64 {
        n_tools as f64 * (self.width + self.spacing) * 2.0 - self.spacing
    }

    pub fn total_width(&self, n_tools: usize) -> f64 {
        self.total_one_dir_width(n_tools) + self.effective_length() + self.spacing
    }

    pub fn total_width_interlocked(&self, n_tools: usize) -> f64 {
        self.total_one_dir_width(n_tools) + self.effective_length_interlocked() + self.spacing
    }

    pub fn total_height(&self, n_tools: usize) -> f64 {
        self.total_one_dir_width(n_tools).max(self.effective_length())
    }

    pub fn total_height_interlocked(&self, n_tools: usize) -> f64 {
        self.total_one_dir_width(n_tools)
            .max(self.effective_length_interlocked())
    }
}

fn floor_count(value: f64) -> usize {
    if value.is_finite() && value > 0.0 {
        value.floor() as usize
    } else {
        0
    }
}
