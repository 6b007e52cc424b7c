//! Pattern directions and their sign table.
//!
//! Every comb or meander advances along a travel direction `t` while its
//! teeth extend along a tooth direction `n`. `n` is `+x` for the vertical
//! directions and `+y` for the horizontal ones, so a single primitive
//! sequence written in terms of `t` and `n` covers all four directions.

use nozzlecal_core::{GenerationError, Point};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const DIRECTIONS: &str = "+x, -x, +y, -y";
const AXES: &str = "x, y";

/// Axis-aligned travel direction of a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "+x")]
    PosX,
    #[serde(rename = "-x")]
    NegX,
    #[serde(rename = "+y")]
    PosY,
    #[serde(rename = "-y")]
    NegY,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::PosX,
        Direction::NegX,
        Direction::PosY,
        Direction::NegY,
    ];

    /// Unit vector the pattern advances along
    pub fn travel(self) -> Point {
        match self {
            Direction::PosX => Point::new(1.0, 0.0),
            Direction::NegX => Point::new(-1.0, 0.0),
            Direction::PosY => Point::new(0.0, 1.0),
            Direction::NegY => Point::new(0.0, -1.0),
        }
    }

    /// Unit vector the teeth extend along
    pub fn tooth(self) -> Point {
        self.axis().tooth()
    }

    pub fn axis(self) -> Axis {
        match self {
            Direction::PosX | Direction::NegX => Axis::X,
            Direction::PosY | Direction::NegY => Axis::Y,
        }
    }

    pub fn reversed(self) -> Direction {
        match self {
            Direction::PosX => Direction::NegX,
            Direction::NegX => Direction::PosX,
            Direction::PosY => Direction::NegY,
            Direction::NegY => Direction::PosY,
        }
    }

    /// Horizontal meanders start with a one-pitch lead-in along the tooth axis
    pub fn has_meander_lead_in(self) -> bool {
        self.axis() == Axis::X
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::PosX => "+x",
            Direction::NegX => "-x",
            Direction::PosY => "+y",
            Direction::NegY => "-y",
        };
        f.write_str(s)
    }
}

impl FromStr for Direction {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "+x" => Ok(Direction::PosX),
            "-x" => Ok(Direction::NegX),
            "+y" => Ok(Direction::PosY),
            "-y" => Ok(Direction::NegY),
            _ => Err(GenerationError::InvalidDirection {
                value: s.to_string(),
                expected: DIRECTIONS,
            }),
        }
    }
}

/// Axis of a differential comb pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Direction the first comb of a pair travels in
    pub fn positive(self) -> Direction {
        match self {
            Axis::X => Direction::PosX,
            Axis::Y => Direction::PosY,
        }
    }

    pub fn negative(self) -> Direction {
        self.positive().reversed()
    }

    /// Tooth direction of combs travelling along this axis
    pub fn tooth(self) -> Point {
        match self {
            Axis::X => Point::new(0.0, 1.0),
            Axis::Y => Point::new(1.0, 0.0),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

impl FromStr for Axis {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            _ => Err(GenerationError::InvalidDirection {
                value: s.to_string(),
                expected: AXES,
            }),
        }
    }
}

/// Whether turning from `heading` toward `toward` is a clockwise turn
pub fn turns_clockwise(heading: Point, toward: Point) -> bool {
    heading.cross(toward) < 0.0
}
