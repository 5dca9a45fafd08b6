//! Drive train trait
//!
//! Discrete, blocking motion primitives over the rover's differential
//! wheelbase. Each call returns only after the maneuver completes; there is
//! no in-flight correction or cancellation. The implementation owns the
//! drivetrain state handle for the life of the program.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rotation sense for discrete turns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TurnDirection {
    /// Clockwise (toward the rover's right)
    Clockwise,
    /// Counter-clockwise (toward the rover's left)
    CounterClockwise,
}

impl TurnDirection {
    /// Get the opposite direction
    pub fn opposite(self) -> Self {
        match self {
            TurnDirection::Clockwise => TurnDirection::CounterClockwise,
            TurnDirection::CounterClockwise => TurnDirection::Clockwise,
        }
    }
}

/// Blocking differential-drive motion primitives
pub trait DriveTrain {
    /// Rotate in place clockwise by the given angle in degrees
    fn turn_clockwise(&mut self, degrees: u16);

    /// Rotate in place counter-clockwise by the given angle in degrees
    fn turn_counterclockwise(&mut self, degrees: u16);

    /// Drive straight forward by the given distance in centimeters
    fn move_forward(&mut self, cm: f32);

    /// Drive straight backward by the given distance in centimeters
    fn move_backward(&mut self, cm: f32);

    /// Rotate in place in the given direction
    fn turn(&mut self, direction: TurnDirection, degrees: u16) {
        match direction {
            TurnDirection::Clockwise => self.turn_clockwise(degrees),
            TurnDirection::CounterClockwise => self.turn_counterclockwise(degrees),
        }
    }
}
