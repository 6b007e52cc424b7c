//! Printer configuration
//!
//! Describes the tool changer and the shared print settings used by every
//! calibration job. Per-tool values live in one [`ToolSettings`] record per
//! tool so the tool list and its parameters can never disagree in length.
//! Records are addressed by their position in [`PrinterConfiguration::tools`],
//! not by tool identifier.

use crate::error::{GenerationError, Result};
use crate::geometry::Point;
use crate::units::degrees_to_radians;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Settings for one tool (nozzle) of the printer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    /// Tool number as used by the `T` and `G10 P` commands
    pub id: u32,
    /// Nozzle diameter in mm
    pub nozzle_diameter: f64,
    /// Standby temperature in °C
    pub standby_temperature: f64,
    /// Printing temperature in °C
    pub printing_temperature: f64,
    /// Multiplier applied to the computed bead volume
    pub extrusion_multiplier: f64,
    /// Filament retraction distance in mm
    pub retraction_distance: f64,
    /// X calibration offset applied to emitted coordinates (mm)
    pub x_offset: f64,
    /// Y calibration offset applied to emitted coordinates (mm)
    pub y_offset: f64,
}

impl ToolSettings {
    /// Default settings for the given tool number
    pub fn with_id(id: u32) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Calibration offset as a vector
    pub fn offset(&self) -> Point {
        Point::new(self.x_offset, self.y_offset)
    }
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            id: 1,
            nozzle_diameter: 0.4,
            standby_temperature: 175.0,
            printing_temperature: 200.0,
            extrusion_multiplier: 1.1,
            retraction_distance: 5.0,
            x_offset: 0.0,
            y_offset: 0.0,
        }
    }
}

/// Printer-wide configuration for one generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrinterConfiguration {
    /// Configured tools, in tool-changer order
    pub tools: Vec<ToolSettings>,
    /// Retraction feed speed in mm/s
    pub retraction_speed: f64,
    /// Z offset added to every layer height (mm)
    pub z_offset: f64,
    /// Pause after bed probing so paper can be inserted
    pub insert_pause: bool,
    /// Rotation center of the pattern
    pub center: Point,
    /// Pattern rotation in degrees, counter-clockwise about `center`
    pub rotation_degrees: f64,
    /// Bed temperature in °C
    pub bed_temperature: f64,
    /// Layer height in mm
    pub layer_height: f64,
    /// Print speed in mm/s
    pub print_speed: f64,
    /// Emit retraction/de-retraction moves
    pub enable_retraction: bool,
    /// Extra Z lift while retracted (mm)
    pub z_hop: f64,
    /// Filament diameter in mm
    pub filament_diameter: f64,
    /// Z height the head is parked at when the print ends (mm)
    pub park_height: f64,
}

impl Default for PrinterConfiguration {
    fn default() -> Self {
        Self {
            tools: (1..=5).map(ToolSettings::with_id).collect(),
            retraction_speed: 80.0,
            z_offset: 0.15,
            insert_pause: true,
            center: Point::ORIGIN,
            rotation_degrees: 15.0,
            bed_temperature: 60.0,
            layer_height: 0.2,
            print_speed: 30.0,
            enable_retraction: true,
            z_hop: 0.5,
            filament_diameter: 1.75,
            park_height: 25.0,
        }
    }
}

impl PrinterConfiguration {
    /// Pattern rotation in radians
    pub fn rotation(&self) -> f64 {
        degrees_to_radians(self.rotation_degrees)
    }

    /// Tool record at the given position
    pub fn tool(&self, index: usize) -> Option<&ToolSettings> {
        self.tools.get(index)
    }

    /// Position of a tool identifier in the tool list
    pub fn tool_index(&self, tool: u32) -> Result<usize> {
        self.tools
            .iter()
            .position(|t| t.id == tool)
            .ok_or(GenerationError::UnknownTool { tool })
    }

    /// Resolve requested tool identifiers to positions in the tool list.
    ///
    /// Repeated identifiers resolve to the same position; the caller decides
    /// how the repeats are used.
    pub fn find_tools(&self, requested: &[u32]) -> Result<Vec<usize>> {
        requested.iter().map(|&tool| self.tool_index(tool)).collect()
    }

    /// Replace the per-tool X/Y offsets slot by slot.
    ///
    /// Missing entries leave the existing offset untouched.
    pub fn apply_offsets(&mut self, x_offsets: &[f64], y_offsets: &[f64]) -> Result<()> {
        if x_offsets.len() > self.tools.len() || y_offsets.len() > self.tools.len() {
            return Err(GenerationError::invalid_configuration(format!(
                "{} tools configured but {} x offsets and {} y offsets given",
                self.tools.len(),
                x_offsets.len(),
                y_offsets.len()
            )));
        }
        for (tool, &x) in self.tools.iter_mut().zip(x_offsets) {
            tool.x_offset = x;
        }
        for (tool, &y) in self.tools.iter_mut().zip(y_offsets) {
            tool.y_offset = y;
        }
        for tool in &self.tools {
            debug!(tool = tool.id, x = tool.x_offset, y = tool.y_offset, "tool offset");
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.tools.is_empty() {
            return Err(GenerationError::invalid_configuration(
                "at least one tool must be configured",
            ));
        }

        let mut seen = HashSet::new();
        for tool in &self.tools {
            if !seen.insert(tool.id) {
                return Err(GenerationError::invalid_configuration(format!(
                    "tool {} is configured more than once",
                    tool.id
                )));
            }
            if tool.nozzle_diameter <= 0.0 {
                return Err(GenerationError::invalid_configuration(format!(
                    "nozzle diameter of tool {} must be > 0",
                    tool.id
                )));
            }
            if tool.retraction_distance < 0.0 {
                return Err(GenerationError::invalid_configuration(format!(
                    "retraction distance of tool {} must be >= 0",
                    tool.id
                )));
            }
        }

        if self.filament_diameter <= 0.0 {
            return Err(GenerationError::invalid_configuration(
                "filament diameter must be > 0",
            ));
        }
        if self.layer_height <= 0.0 {
            return Err(GenerationError::invalid_configuration(
                "layer height must be > 0",
            ));
        }
        if self.print_speed <= 0.0 {
            return Err(GenerationError::invalid_configuration(
                "print speed must be > 0",
            ));
        }
        if self.enable_retraction && self.retraction_speed <= 0.0 {
            return Err(GenerationError::invalid_configuration(
                "retraction speed must be > 0",
            ));
        }

        Ok(())
    }
}
