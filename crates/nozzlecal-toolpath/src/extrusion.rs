//! Filament feed calculation.
//!
//! A bead is modelled as a rectangle of nozzle diameter times layer height,
//! scaled by the tool's extrusion multiplier. The feed is the filament length
//! that holds the same volume.

use nozzlecal_core::{PrinterConfiguration, ToolSettings};
use std::f64::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtrusionModel {
    filament_diameter: f64,
    layer_height: f64,
}

impl ExtrusionModel {
    pub fn new(filament_diameter: f64, layer_height: f64) -> Self {
        Self {
            filament_diameter,
            layer_height,
        }
    }

    pub fn from_config(config: &PrinterConfiguration) -> Self {
        Self::new(config.filament_diameter, config.layer_height)
    }

    /// Filament cross-section in mm²
    pub fn filament_area(&self) -> f64 {
        self.filament_diameter * self.filament_diameter * PI * 0.25
    }

    /// Filament length holding `volume` mm³
    pub fn length_for_volume(&self, volume: f64) -> f64 {
        volume / self.filament_area()
    }

    /// Filament length needed to lay a bead of `length` mm with `tool`
    pub fn feed_length_for_bead(&self, length: f64, tool: &ToolSettings) -> f64 {
        let volume =
            length * tool.nozzle_diameter * self.layer_height * tool.extrusion_multiplier;
        self.length_for_volume(volume)
    }
}
