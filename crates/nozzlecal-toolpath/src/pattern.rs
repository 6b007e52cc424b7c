//! Calibration pattern assembly.
//!
//! Every pattern follows the same shape: travel to the start, de-retract,
//! repeat a fixed stitch unit, travel clear of the last trace, retract. The
//! first segment of the first stitch is a travel move so the blob left by
//! de-retraction stays isolated from the printed trace.
//!
//! Stitch units are written once in terms of the travel vector `t` and the
//! tooth vector `n` of a [`Direction`]; arc turn sense follows from
//! [`turns_clockwise`].

use crate::direction::{turns_clockwise, Axis, Direction};
use crate::session::GenerationSession;
use nozzlecal_core::{GenerationError, PatternParameters, Point, Result};
use tracing::{debug, warn};

/// Builds meanders, interlocked combs and framing squares
#[derive(Debug, Clone)]
pub struct PatternAssembler {
    params: PatternParameters,
}

impl PatternAssembler {
    pub fn new(params: PatternParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &PatternParameters {
        &self.params
    }

    /// Simple meander starting at `start`, advancing along `direction`.
    pub fn single_pattern(
        &self,
        session: &mut GenerationSession<'_>,
        start: Point,
        direction: Direction,
    ) -> Result<()> {
        let p = self.params.pitch;
        let width = self.params.width;
        let tooth = width - 2.0 * p;
        let repetitions = self.params.repetitions();
        let t = direction.travel();
        let n = direction.tooth();
        let outward = turns_clockwise(n, t);

        debug!(%direction, %start, repetitions, "single meander");
        if repetitions == 0 {
            warn!(length = self.params.length, pitch = p, "meander has no repetitions");
        }

        session.transaction(|s| {
            s.move_to(start);
            s.reretract()?;
            if direction.has_meander_lead_in() {
                s.line(n * p)?;
            }
            for i in 0..repetitions {
                first_segment(s, i, n * tooth)?;
                s.u_turn(t * p, outward)?;
                s.line(n * -tooth)?;
                s.u_turn(t * p, !outward)?;
            }
            s.move_by(n * width);
            s.retract()
        })
    }

    /// Reference comb: teeth grow from the far edge (`start + width·n`)
    /// back toward `start`.
    pub fn interlocked_reference_pattern(
        &self,
        session: &mut GenerationSession<'_>,
        start: Point,
        direction: Direction,
    ) -> Result<()> {
        let width = self.params.width;
        let tooth = width - self.params.sigref_only;
        let q = self.params.interlocked_pitch;
        let period = self.params.interlocked_period;
        let repetitions = self.params.repetitions_interlocked();
        let t = direction.travel();
        let n = direction.tooth();
        let turn_in = turns_clockwise(-n, t);
        let turn_out = turns_clockwise(n, t);

        debug!(%direction, %start, repetitions, "interlocked reference comb");
        if repetitions == 0 {
            warn!(length = self.params.length, period, "reference comb has no repetitions");
        }

        session.transaction(|s| {
            s.move_to(start + n * width + t * (period / 2.0));
            s.reretract()?;
            for i in 0..repetitions {
                first_segment(s, i, n * -tooth)?;
                s.u_turn(t * q, turn_in)?;
                s.line(n * tooth)?;
                s.quarter_turn(n * (q / 2.0) + t * (q / 2.0), turn_out)?;
                s.line(t * (period - 2.0 * q))?;
                s.quarter_turn(n * (-q / 2.0) + t * (q / 2.0), turn_out)?;
            }
            s.move_by(n * -tooth);
            s.retract()
        })
    }

    /// Signal comb: teeth grow from `start` toward `start + width·n`,
    /// meshing with a reference comb drawn at the same start.
    pub fn interlocked_signal_pattern(
        &self,
        session: &mut GenerationSession<'_>,
        start: Point,
        direction: Direction,
    ) -> Result<()> {
        let tooth = self.params.width - self.params.sigref_only;
        let q = self.params.interlocked_pitch;
        let period = self.params.interlocked_period;
        let repetitions = self.params.repetitions_interlocked();
        let t = direction.travel();
        let n = direction.tooth();
        let turn_out = turns_clockwise(n, t);
        let turn_in = turns_clockwise(-n, t);

        debug!(%direction, %start, repetitions, "interlocked signal comb");
        if repetitions == 0 {
            warn!(length = self.params.length, period, "signal comb has no repetitions");
        }

        session.transaction(|s| {
            s.move_to(start);
            s.reretract()?;
            for i in 0..repetitions {
                first_segment(s, i, n * tooth)?;
                s.u_turn(t * q, turn_out)?;
                s.line(n * -tooth)?;
                s.quarter_turn(n * (-q / 2.0) + t * (q / 2.0), turn_in)?;
                s.line(t * (period - 2.0 * q))?;
                s.quarter_turn(n * (q / 2.0) + t * (q / 2.0), turn_in)?;
            }
            s.move_by(n * tooth);
            s.retract()
        })
    }

    /// Two reference combs side by side, both travelling along the positive
    /// direction of `axis`.
    pub fn differential_interlocked_reference_pattern(
        &self,
        session: &mut GenerationSession<'_>,
        start: Point,
        axis: Axis,
    ) -> Result<()> {
        let direction = axis.positive();
        let t = direction.travel();
        let n = direction.tooth();
        let width = self.params.width;
        let length = self.params.length;
        let second = start + n * (self.params.spacing + width);

        session.transaction(|s| {
            self.interlocked_reference_pattern(s, start, direction)?;
            s.move_by(n * width);
            s.move_by(t * -length);
            self.interlocked_reference_pattern(s, second, direction)?;
            s.move_by(n * width);
            s.move_by(t * -length);
            Ok(())
        })
    }

    /// Two signal combs facing each other: the second one starts at the far
    /// end of the second reference comb and travels back.
    pub fn differential_interlocked_signal_pattern(
        &self,
        session: &mut GenerationSession<'_>,
        start: Point,
        axis: Axis,
    ) -> Result<()> {
        let direction = axis.positive();
        let t = direction.travel();
        let n = direction.tooth();
        let second = start
            + n * (self.params.spacing + self.params.width)
            + t * (self.params.effective_length_interlocked() + self.params.interlocked_pitch);

        session.transaction(|s| {
            self.interlocked_signal_pattern(s, start, direction)?;
            self.interlocked_signal_pattern(s, second, direction.reversed())
        })
    }

    /// `lines` nested rectangles, each inset by one nozzle diameter.
    pub fn square_pattern(
        &self,
        session: &mut GenerationSession<'_>,
        start: Point,
        size: Point,
        clockwise: bool,
        lines: usize,
    ) -> Result<()> {
        let nozzle = session
            .active_tool()
            .ok_or(GenerationError::NoActiveTool)?
            .nozzle_diameter;

        debug!(%start, %size, lines, "framing square");

        session.transaction(|s| {
            s.move_to(start);
            s.reretract()?;
            for i in 0..lines {
                let inset = i as f64 * nozzle;
                s.move_to(start + Point::new(inset, inset));
                s.square(size - Point::new(2.0 * inset, 2.0 * inset), clockwise)?;
            }
            s.retract()
        })
    }
}

fn first_segment(session: &mut GenerationSession<'_>, iteration: usize, delta: Point) -> Result<()> {
    if iteration == 0 {
        session.move_by(delta);
        Ok(())
    } else {
        session.line(delta)
    }
}
