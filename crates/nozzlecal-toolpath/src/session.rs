//! Motion and extrusion primitives.
//!
//! A [`GenerationSession`] owns everything that changes while a print is
//! generated: the logical cursor, the active tool and offset slot, and the
//! command stream. Primitives take deltas in the logical frame; emitted
//! coordinates are shifted by the active offset slot's calibration offset and
//! then rotated about the pattern center.
//!
//! The cursor is never affected by offsets or rotation, so after any sequence
//! of relative primitives it equals the start point plus the sum of deltas.

use crate::extrusion::ExtrusionModel;
use crate::transform::CoordinateTransform;
use nozzlecal_core::units::feed_rate;
use nozzlecal_core::{
    Command, CommandStream, GenerationError, Point, PrinterConfiguration, Result, ToolSettings,
};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, SQRT_2};
use tracing::debug;

/// Selected tool and offset slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToolState {
    /// Position of the selected tool in the tool list
    pub active: Option<usize>,
    /// Position of the tool record whose X/Y offset is applied
    pub offset_slot: usize,
}

/// Single-owner state of one generation pass
#[derive(Debug, Clone)]
pub struct GenerationSession<'a> {
    config: &'a PrinterConfiguration,
    transform: CoordinateTransform,
    extrusion: ExtrusionModel,
    cursor: Point,
    tool: ToolState,
    stream: CommandStream,
}

impl<'a> GenerationSession<'a> {
    pub fn new(config: &'a PrinterConfiguration) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            transform: CoordinateTransform::new(config.center, config.rotation()),
            extrusion: ExtrusionModel::from_config(config),
            cursor: Point::ORIGIN,
            tool: ToolState::default(),
            stream: CommandStream::new(),
        })
    }

    pub fn config(&self) -> &'a PrinterConfiguration {
        self.config
    }

    pub fn transform(&self) -> &CoordinateTransform {
        &self.transform
    }

    /// Current position in the logical frame
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    pub fn tool_state(&self) -> ToolState {
        self.tool
    }

    pub fn active_tool(&self) -> Option<&'a ToolSettings> {
        let config = self.config;
        self.tool.active.and_then(|index| config.tool(index))
    }

    pub fn stream(&self) -> &CommandStream {
        &self.stream
    }

    /// End the pass and hand out the generated commands
    pub fn finish(self) -> CommandStream {
        self.stream
    }

    /// Append a command without touching cursor or tool state
    pub fn emit(&mut self, command: Command) {
        self.stream.push(command);
    }

    pub fn comment(&mut self, text: impl Into<String>) {
        self.emit(Command::Comment(text.into()));
    }

    /// Run `f` so that it either fully succeeds or leaves no trace.
    ///
    /// On error the commands emitted by `f` are dropped and the cursor and
    /// tool state are restored.
    pub fn transaction<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let cursor = self.cursor;
        let tool = self.tool;
        let committed = std::mem::take(&mut self.stream);

        let result = f(self);
        let mut produced = std::mem::replace(&mut self.stream, committed);

        match result {
            Ok(value) => {
                self.stream.append(&mut produced);
                Ok(value)
            }
            Err(err) => {
                self.cursor = cursor;
                self.tool = tool;
                Err(err)
            }
        }
    }

    fn require_tool(&self) -> Result<&'a ToolSettings> {
        self.active_tool().ok_or(GenerationError::NoActiveTool)
    }

    fn print_feed(&self) -> f64 {
        feed_rate(self.config.print_speed)
    }

    /// Machine coordinate of a logical point under the active offset slot
    pub fn machine_position(&self, p: Point) -> Point {
        let offset = self
            .config
            .tool(self.tool.offset_slot)
            .map(ToolSettings::offset)
            .unwrap_or(Point::ORIGIN);
        self.transform.rotate_about_center(p + offset)
    }

    /// Absolute travel move at print speed
    pub fn move_to(&mut self, target: Point) {
        self.cursor = target;
        let pos = self.machine_position(self.cursor);
        let feed = self.print_feed();
        self.emit(Command::Travel {
            x: pos.x,
            y: pos.y,
            feed: Some(feed),
        });
    }

    /// Relative travel move without a feed word
    pub fn move_by(&mut self, delta: Point) {
        self.cursor += delta;
        let pos = self.machine_position(self.cursor);
        self.emit(Command::Travel {
            x: pos.x,
            y: pos.y,
            feed: None,
        });
    }

    /// Relative extruding move
    pub fn line(&mut self, delta: Point) -> Result<()> {
        let tool = self.require_tool()?;
        self.cursor += delta;
        let pos = self.machine_position(self.cursor);
        let e = self.extrusion.feed_length_for_bead(delta.length(), tool);
        let feed = self.print_feed();
        self.emit(Command::Line {
            x: pos.x,
            y: pos.y,
            e,
            feed,
        });
        Ok(())
    }

    /// 90° arc from the cursor to `cursor + delta`
    pub fn quarter_turn(&mut self, delta: Point, clockwise: bool) -> Result<()> {
        let tool = self.require_tool()?;
        let distance = delta.length();
        let angle = if clockwise {
            delta.angle() - FRAC_PI_4
        } else {
            delta.angle() + FRAC_PI_4
        };
        let center = Point::new(angle.cos(), angle.sin()) * (distance / SQRT_2);
        self.arc(delta, center, FRAC_PI_4 * distance, clockwise, tool);
        Ok(())
    }

    /// 180° arc from the cursor to `cursor + delta`, centered on the chord
    pub fn u_turn(&mut self, delta: Point, clockwise: bool) -> Result<()> {
        let tool = self.require_tool()?;
        let distance = delta.length();
        self.arc(delta, delta * 0.5, FRAC_PI_2 * distance, clockwise, tool);
        Ok(())
    }

    // `center` is relative to the arc start, in the logical frame
    fn arc(&mut self, delta: Point, center: Point, length: f64, clockwise: bool, tool: &ToolSettings) {
        self.cursor += delta;
        let pos = self.machine_position(self.cursor);
        let ij = self.transform.rotate_about_origin(center);
        let e = self.extrusion.feed_length_for_bead(length, tool);
        let feed = self.print_feed();
        self.emit(Command::Arc {
            clockwise,
            x: pos.x,
            y: pos.y,
            i: ij.x,
            j: ij.y,
            e,
            feed,
        });
    }

    /// Rectangle of `size` starting and ending at the cursor
    pub fn square(&mut self, size: Point, clockwise: bool) -> Result<()> {
        self.require_tool()?;
        let edges = if clockwise {
            [
                Point::new(size.x, 0.0),
                Point::new(0.0, size.y),
                Point::new(-size.x, 0.0),
                Point::new(0.0, -size.y),
            ]
        } else {
            [
                Point::new(0.0, size.y),
                Point::new(size.x, 0.0),
                Point::new(0.0, -size.y),
                Point::new(-size.x, 0.0),
            ]
        };
        for edge in edges {
            self.line(edge)?;
        }
        Ok(())
    }

    /// Lift and pull filament back; nothing when retraction is disabled
    pub fn retract(&mut self) -> Result<()> {
        if !self.config.enable_retraction {
            return Ok(());
        }
        let tool = self.require_tool()?;
        let z = self.config.layer_height + self.config.z_hop + self.config.z_offset;
        self.emit(Command::Retraction {
            z,
            e: -tool.retraction_distance,
            feed: feed_rate(self.config.retraction_speed),
        });
        Ok(())
    }

    /// Return to layer height and push the retracted filament back
    pub fn reretract(&mut self) -> Result<()> {
        if !self.config.enable_retraction {
            return Ok(());
        }
        let tool = self.require_tool()?;
        let z = self.config.layer_height + self.config.z_offset;
        self.emit(Command::Retraction {
            z,
            e: tool.retraction_distance,
            feed: feed_rate(self.config.retraction_speed),
        });
        Ok(())
    }

    /// Feed filament without moving, e.g. to prime a nozzle
    pub fn extrude(&mut self, amount: f64) {
        let feed = self.print_feed();
        self.emit(Command::Feed { e: amount, feed });
    }

    /// Select the tool at `index`; no output if it is already active
    pub fn tool_change(&mut self, index: usize) -> Result<()> {
        let config = self.config;
        let tool = config.tool(index).ok_or_else(|| {
            GenerationError::invalid_configuration(format!(
                "tool index {} out of range ({} tools configured)",
                index,
                config.tools.len()
            ))
        })?;
        if self.tool.active == Some(index) {
            return Ok(());
        }
        debug!(tool = tool.id, "tool change");
        self.emit(Command::ToolSelect(tool.id));
        self.tool.active = Some(index);
        Ok(())
    }

    /// Forget the selected tool so the next tool change is always emitted
    pub fn reset_tool(&mut self) {
        self.tool.active = None;
    }

    /// Choose which tool record's offset is applied to emitted coordinates
    pub fn set_offset_slot(&mut self, slot: usize) -> Result<()> {
        if slot >= self.config.tools.len() {
            return Err(GenerationError::invalid_configuration(format!(
                "offset slot {} out of range ({} tools configured)",
                slot,
                self.config.tools.len()
            )));
        }
        self.tool.offset_slot = slot;
        Ok(())
    }
}
