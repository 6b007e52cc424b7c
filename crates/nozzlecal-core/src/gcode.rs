//! G-code commands and the append-only command stream.
//!
//! Commands are stored typed and rendered on demand. Number formatting is
//! fixed: coordinates, arc offsets and heights use 3 decimals, extrusion
//! amounts 4 decimals, feed rates (mm/min) and temperatures none.

use std::fmt;
use std::io::{self, Write};

/// A single machine instruction
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `;text`
    Comment(String),
    /// Non-extruding linear move, `G1 X Y [F]`
    Travel { x: f64, y: f64, feed: Option<f64> },
    /// Extruding linear move, `G1 X Y E F`
    Line { x: f64, y: f64, e: f64, feed: f64 },
    /// Extruding arc, `G2` (clockwise) or `G3`, with the center given
    /// relative to the start point
    Arc {
        clockwise: bool,
        x: f64,
        y: f64,
        i: f64,
        j: f64,
        e: f64,
        feed: f64,
    },
    /// Combined Z move and filament feed, `G1 Z E F`
    Retraction { z: f64, e: f64, feed: f64 },
    /// Filament feed without motion, `G1 E F`
    Feed { e: f64, feed: f64 },
    /// Tool temperatures, `G10 P R S`
    ToolTemperature {
        tool: u32,
        standby: f64,
        active: f64,
    },
    /// `M140 S`
    BedTemperature(f64),
    /// `M116`
    WaitForTemperatures,
    /// `G54`
    SelectWorkCoordinates,
    /// `G28`
    Home,
    /// `G32`
    ProbeBed,
    /// `M83`
    RelativeExtrusion,
    /// `M25`
    Pause,
    /// `T<tool>`
    ToolSelect(u32),
    /// Absolute Z move, `G1 Z`
    Park(f64),
    /// `M84`
    DisableMotors,
    /// `M0 H1`
    Stop,
}

impl Command {
    /// Whether the command feeds filament
    pub fn is_extruding(&self) -> bool {
        match self {
            Command::Line { .. } | Command::Arc { .. } => true,
            Command::Retraction { e, .. } | Command::Feed { e, .. } => *e > 0.0,
            _ => false,
        }
    }

    /// Target XY position of a motion command
    pub fn target(&self) -> Option<(f64, f64)> {
        match *self {
            Command::Travel { x, y, .. } | Command::Line { x, y, .. } | Command::Arc { x, y, .. } => {
                Some((x, y))
            }
            _ => None,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Command::Comment(ref text) => write!(f, ";{}", text),
            Command::Travel { x, y, feed: None } => write!(f, "G1 X{:.3} Y{:.3}", x, y),
            Command::Travel {
                x,
                y,
                feed: Some(feed),
            } => write!(f, "G1 X{:.3} Y{:.3} F{:.0}", x, y, feed),
            Command::Line { x, y, e, feed } => {
                write!(f, "G1 X{:.3} Y{:.3} E{:.4} F{:.0}", x, y, e, feed)
            }
            Command::Arc {
                clockwise,
                x,
                y,
                i,
                j,
                e,
                feed,
            } => write!(
                f,
                "{} X{:.3} Y{:.3} I{:.3} J{:.3} E{:.4} F{:.0}",
                if clockwise { "G2" } else { "G3" },
                x,
                y,
                i,
                j,
                e,
                feed
            ),
            Command::Retraction { z, e, feed } => {
                write!(f, "G1 Z{:.3} E{:.4} F{:.0}", z, e, feed)
            }
            Command::Feed { e, feed } => write!(f, "G1 E{:.4} F{:.0}", e, feed),
            Command::ToolTemperature {
                tool,
                standby,
                active,
            } => write!(f, "G10 P{} R{:.0} S{:.0}", tool, standby, active),
            Command::BedTemperature(temp) => write!(f, "M140 S{:.0}", temp),
            Command::WaitForTemperatures => f.write_str("M116"),
            Command::SelectWorkCoordinates => f.write_str("G54"),
            Command::Home => f.write_str("G28"),
            Command::ProbeBed => f.write_str("G32"),
            Command::RelativeExtrusion => f.write_str("M83"),
            Command::Pause => f.write_str("M25"),
            Command::ToolSelect(tool) => write!(f, "T{}", tool),
            Command::Park(z) => write!(f, "G1 Z{:.3}", z),
            Command::DisableMotors => f.write_str("M84"),
            Command::Stop => f.write_str("M0 H1"),
        }
    }
}

/// Ordered, append-only sequence of commands
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandStream {
    commands: Vec<Command>,
}

impl CommandStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Move all commands of `other` to the end of this stream
    pub fn append(&mut self, other: &mut CommandStream) {
        self.commands.append(&mut other.commands);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Command> {
        self.commands.iter()
    }

    pub fn last(&self) -> Option<&Command> {
        self.commands.last()
    }

    /// Rendered lines, one per command
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.commands.iter().map(Command::to_string)
    }

    /// Render the stream as G-code text, each line newline-terminated
    pub fn to_gcode(&self) -> String {
        let mut gcode = String::new();
        for command in &self.commands {
            gcode.push_str(&command.to_string());
            gcode.push('\n');
        }
        gcode
    }

    /// Write the rendered stream to any sink
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for command in &self.commands {
            writeln!(writer, "{}", command)?;
        }
        writer.flush()
    }
}

impl fmt::Display for CommandStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for command in &self.commands {
            writeln!(f, "{}", command)?;
        }
        Ok(())
    }
}

impl Extend<Command> for CommandStream {
    fn extend<I: IntoIterator<Item = Command>>(&mut self, iter: I) {
        self.commands.extend(iter);
    }
}

impl<'a> IntoIterator for &'a CommandStream {
    type Item = &'a Command;
    type IntoIter = std::slice::Iter<'a, Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

impl IntoIterator for CommandStream {
    type Item = Command;
    type IntoIter = std::vec::IntoIter<Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motion_formatting() {
        assert_eq!(
            Command::Travel {
                x: 1.0,
                y: -2.5,
                feed: Some(1800.0)
            }
            .to_string(),
            "G1 X1.000 Y-2.500 F1800"
        );
        assert_eq!(
            Command::Travel {
                x: 0.12345,
                y: 0.0,
                feed: None
            }
            .to_string(),
            "G1 X0.123 Y0.000"
        );
        assert_eq!(
            Command::Line {
                x: 10.0,
                y: 0.0,
                e: 0.31933,
                feed: 1800.0
            }
            .to_string(),
            "G1 X10.000 Y0.000 E0.3193 F1800"
        );
    }

    #[test]
    fn test_arc_formatting() {
        let arc = Command::Arc {
            clockwise: true,
            x: 1.0,
            y: 1.0,
            i: 1.0,
            j: 0.0,
            e: 0.05,
            feed: 1800.0,
        };
        assert_eq!(arc.to_string(), "G2 X1.000 Y1.000 I1.000 J0.000 E0.0500 F1800");

        let ccw = Command::Arc {
            clockwise: false,
            x: 0.0,
            y: 2.0,
            i: 0.0,
            j: 1.0,
            e: 0.1,
            feed: 1800.0,
        };
        assert!(ccw.to_string().starts_with("G3 "));
    }

    #[test]
    fn test_machine_formatting() {
        assert_eq!(
            Command::Retraction {
                z: 0.85,
                e: -5.0,
                feed: 4800.0
            }
            .to_string(),
            "G1 Z0.850 E-5.0000 F4800"
        );
        assert_eq!(
            Command::ToolTemperature {
                tool: 2,
                standby: 175.0,
                active: 200.0
            }
            .to_string(),
            "G10 P2 R175 S200"
        );
        assert_eq!(Command::BedTemperature(60.0).to_string(), "M140 S60");
        assert_eq!(Command::ToolSelect(3).to_string(), "T3");
        assert_eq!(Command::Park(25.0).to_string(), "G1 Z25.000");
        assert_eq!(Command::Stop.to_string(), "M0 H1");
        assert_eq!(
            Command::Comment("print vertical interlocked reference pattern 0".into()).to_string(),
            ";print vertical interlocked reference pattern 0"
        );
    }

    #[test]
    fn test_stream_rendering() {
        let mut stream = CommandStream::new();
        stream.push(Command::Home);
        stream.push(Command::RelativeExtrusion);
        assert_eq!(stream.to_gcode(), "G28\nM83\n");
        assert_eq!(stream.to_string(), stream.to_gcode());

        let mut sink = Vec::new();
        stream.write_to(&mut sink).unwrap();
        assert_eq!(String::from_utf8(sink).unwrap(), "G28\nM83\n");
    }

    #[test]
    fn test_stream_append_preserves_order() {
        let mut first = CommandStream::new();
        first.push(Command::Home);
        let mut second = CommandStream::new();
        second.push(Command::ProbeBed);
        second.push(Command::Pause);

        first.append(&mut second);
        assert!(second.is_empty());
        assert_eq!(
            first.lines().collect::<Vec<_>>(),
            vec!["G28", "G32", "M25"]
        );
    }
}
