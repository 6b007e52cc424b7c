//! Print jobs.
//!
//! [`CalibrationPrint`] turns a printer configuration and pattern dimensions
//! into complete command streams: the interlocked multi-tool calibration
//! print and the single-tool meander print. Tool identifiers are resolved
//! before anything is emitted, so an unknown tool never yields partial output.

use crate::direction::{Axis, Direction};
use crate::pattern::PatternAssembler;
use crate::session::GenerationSession;
use nozzlecal_core::{
    Command, CommandStream, GenerationError, PatternParameters, Point, PrinterConfiguration,
    Result,
};
use tracing::info;

/// Placement of the interlocked combs and their framing square
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub center: Point,
    /// Width of all vertical comb pairs side by side
    pub one_dir_width: f64,
    pub total_width: f64,
    pub total_height: f64,
    /// Printed length of one comb
    pub effective_length: f64,
    /// Distance between the origins of neighbouring comb pairs
    pub slot_pitch: f64,
    pub clearance: f64,
}

impl Layout {
    /// Layout of the interlocked print for `n_tools` tool slots
    pub fn interlocked(params: &PatternParameters, center: Point, n_tools: usize) -> Self {
        Self {
            center,
            one_dir_width: params.total_one_dir_width(n_tools),
            total_width: params.total_width_interlocked(n_tools),
            total_height: params.total_height_interlocked(n_tools),
            effective_length: params.effective_length_interlocked(),
            slot_pitch: 2.0 * (params.width + params.spacing),
            clearance: params.spacing_to_square,
        }
    }

    pub fn square_size(&self) -> Point {
        Point::new(
            self.total_width + 2.0 * self.clearance,
            self.total_height + 2.0 * self.clearance,
        )
    }

    /// Lower-left corner of the framing square
    pub fn square_origin(&self) -> Point {
        self.center - self.square_size() * 0.5
    }

    /// Origin of the vertical comb pair of `slot`
    pub fn vertical_origin(&self, slot: usize) -> Point {
        Point::new(
            self.center.x - self.total_width / 2.0 + slot as f64 * self.slot_pitch,
            self.center.y - self.effective_length / 2.0,
        )
    }

    /// Origin of the horizontal comb pair of `slot`
    pub fn horizontal_origin(&self, slot: usize) -> Point {
        Point::new(
            self.center.x + self.total_width / 2.0 - self.effective_length,
            self.center.y - self.one_dir_width / 2.0 + slot as f64 * self.slot_pitch,
        )
    }
}

/// Corner a meander starts from so that its footprint is centered on `center`
pub fn meander_start(params: &PatternParameters, center: Point, direction: Direction) -> Point {
    center
        - direction.tooth() * (params.width / 2.0)
        - direction.travel() * (params.effective_length() / 2.0)
}

/// Heat, home, probe and prepare the requested tools.
///
/// Clears the active tool so the first tool change is always emitted.
pub fn start_sequence(session: &mut GenerationSession<'_>, tool_indexes: &[usize]) -> Result<()> {
    let config = session.config();
    session.reset_tool();

    for &index in tool_indexes {
        let tool = config.tool(index).ok_or_else(|| {
            GenerationError::invalid_configuration(format!("tool index {} out of range", index))
        })?;
        session.emit(Command::ToolTemperature {
            tool: tool.id,
            standby: tool.standby_temperature,
            active: tool.printing_temperature,
        });
    }

    session.emit(Command::BedTemperature(config.bed_temperature));
    session.emit(Command::WaitForTemperatures);
    session.emit(Command::SelectWorkCoordinates);
    session.emit(Command::Home);
    session.emit(Command::ProbeBed);
    session.emit(Command::RelativeExtrusion);
    if config.insert_pause {
        session.emit(Command::Pause);
    }
    Ok(())
}

/// Park the head, release the motors and stop.
pub fn stop_sequence(session: &mut GenerationSession<'_>) {
    let park_height = session.config().park_height;
    session.emit(Command::Park(park_height));
    session.emit(Command::DisableMotors);
    session.emit(Command::Stop);
}

#[derive(Debug, Clone)]
pub struct CalibrationPrint {
    printer: PrinterConfiguration,
    patterns: PatternAssembler,
}

impl CalibrationPrint {
    pub fn new(printer: PrinterConfiguration, params: PatternParameters) -> Result<Self> {
        printer.validate()?;
        Ok(Self {
            printer,
            patterns: PatternAssembler::new(params)?,
        })
    }

    pub fn printer(&self) -> &PrinterConfiguration {
        &self.printer
    }

    /// Mutable access for adjusting tool offsets between runs
    pub fn printer_mut(&mut self) -> &mut PrinterConfiguration {
        &mut self.printer
    }

    pub fn params(&self) -> &PatternParameters {
        self.patterns.params()
    }

    pub fn patterns(&self) -> &PatternAssembler {
        &self.patterns
    }

    pub fn layout(&self, n_tools: usize) -> Layout {
        Layout::interlocked(self.params(), self.printer.center, n_tools)
    }

    /// Interlocked calibration print for the requested tool slots.
    ///
    /// The framing square and all reference combs are printed with
    /// `reference_tool` under offset slot 0. Slot `i` then prints its signal
    /// combs with `tools[i]` under offset slot `i`.
    pub fn full_interlocked_print(&self, tools: &[u32], reference_tool: u32) -> Result<CommandStream> {
        info!(?tools, reference_tool, "generating interlocked calibration print");

        if tools.is_empty() {
            return Err(GenerationError::invalid_configuration(
                "at least one tool must be requested",
            ));
        }
        let indexes = self.printer.find_tools(tools)?;
        let reference = self.printer.tool_index(reference_tool)?;
        if indexes.len() > self.printer.tools.len() {
            return Err(GenerationError::invalid_configuration(format!(
                "{} tool slots requested but only {} offset slots configured",
                indexes.len(),
                self.printer.tools.len()
            )));
        }

        let params = self.params();
        let layout = self.layout(indexes.len());
        let mut session = GenerationSession::new(&self.printer)?;

        start_sequence(&mut session, &indexes)?;

        session.tool_change(reference)?;
        session.set_offset_slot(0)?;
        self.patterns.square_pattern(
            &mut session,
            layout.square_origin(),
            layout.square_size(),
            true,
            params.square_lines,
        )?;

        for slot in 0..indexes.len() {
            session.comment(format!("print vertical interlocked reference pattern {}", slot));
            self.patterns.differential_interlocked_reference_pattern(
                &mut session,
                layout.vertical_origin(slot),
                Axis::Y,
            )?;
        }
        for slot in 0..indexes.len() {
            session.comment(format!("print horizontal interlocked reference pattern {}", slot));
            self.patterns.differential_interlocked_reference_pattern(
                &mut session,
                layout.horizontal_origin(slot),
                Axis::X,
            )?;
        }

        for (slot, &index) in indexes.iter().enumerate() {
            session.comment(format!("print vertical interlocked signal pattern {}", slot));
            session.tool_change(index)?;
            session.set_offset_slot(slot)?;
            self.patterns.differential_interlocked_signal_pattern(
                &mut session,
                layout.vertical_origin(slot),
                Axis::Y,
            )?;
            session.comment(format!("print horizontal interlocked signal pattern {}", slot));
            self.patterns.differential_interlocked_signal_pattern(
                &mut session,
                layout.horizontal_origin(slot),
                Axis::X,
            )?;
        }

        stop_sequence(&mut session);

        let stream = session.finish();
        info!(commands = stream.len(), "interlocked calibration print generated");
        Ok(stream)
    }

    /// Single meander printed with `tool`, preceded by a priming blob.
    ///
    /// The meander footprint (`width` across, effective length along the
    /// travel direction) is centered on the printer center for every
    /// direction. The priming blob sits `prime_gap` behind the start. The
    /// tool's own offset record is applied.
    pub fn meander_print(&self, tool: u32, direction: Direction) -> Result<CommandStream> {
        info!(tool, %direction, "generating meander print");

        let index = self.printer.tool_index(tool)?;
        let params = self.params();
        let start = meander_start(params, self.printer.center, direction);
        let t = direction.travel();
        let mut session = GenerationSession::new(&self.printer)?;

        start_sequence(&mut session, &[index])?;
        session.tool_change(index)?;
        session.set_offset_slot(index)?;

        session.move_to(start - t * params.prime_gap);
        session.extrude(params.prime_amount);
        session.retract()?;

        self.patterns.single_pattern(&mut session, start, direction)?;

        stop_sequence(&mut session);

        let stream = session.finish();
        info!(commands = stream.len(), "meander print generated");
        Ok(stream)
    }
}
