//! Remote keyboard teleoperation
//!
//! A host terminal drives the rover one keystroke at a time over the
//! serial link: `w`/`s` for forward/backward, `a`/`d` for the turns, `m`
//! to flash a message on the display, `n` to quit. Decoding is pure so the
//! table is testable; [`TeleopSession`] applies the motion commands and
//! reports the non-motion events for the caller to render.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::TeleopConfig;
use crate::traits::DriveTrain;

/// One decoded keystroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TeleopCommand {
    Forward,
    Backward,
    TurnLeft,
    TurnRight,
    ShowMessage,
    Quit,
}

impl TeleopCommand {
    /// Decode a received byte; unknown bytes are ignored
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'w' => Some(TeleopCommand::Forward),
            b's' => Some(TeleopCommand::Backward),
            b'a' => Some(TeleopCommand::TurnLeft),
            b'd' => Some(TeleopCommand::TurnRight),
            b'm' => Some(TeleopCommand::ShowMessage),
            b'n' => Some(TeleopCommand::Quit),
            _ => None,
        }
    }
}

/// What the caller should do after feeding a byte to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TeleopEvent {
    /// A motion command was executed
    Drove,
    /// Show the acknowledgment message on the display
    ShowMessage,
    /// The operator ended the session
    Quit,
    /// Byte did not decode to a command
    Ignored,
}

/// Keystroke-at-a-time teleoperation session
#[derive(Debug)]
pub struct TeleopSession {
    config: TeleopConfig,
    finished: bool,
}

impl TeleopSession {
    /// Start a session with the given step sizes
    pub fn new(config: TeleopConfig) -> Self {
        Self {
            config,
            finished: false,
        }
    }

    /// Check if the operator has quit
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Feed one received byte, executing motion commands immediately
    ///
    /// After `Quit`, further bytes are ignored.
    pub fn handle<D: DriveTrain>(&mut self, byte: u8, drive: &mut D) -> TeleopEvent {
        if self.finished {
            return TeleopEvent::Ignored;
        }

        match TeleopCommand::from_byte(byte) {
            Some(TeleopCommand::Forward) => {
                drive.move_forward(self.config.move_cm);
                TeleopEvent::Drove
            }
            Some(TeleopCommand::Backward) => {
                drive.move_backward(self.config.move_cm);
                TeleopEvent::Drove
            }
            Some(TeleopCommand::TurnLeft) => {
                drive.turn_counterclockwise(self.config.turn_deg);
                TeleopEvent::Drove
            }
            Some(TeleopCommand::TurnRight) => {
                drive.turn_clockwise(self.config.turn_deg);
                TeleopEvent::Drove
            }
            Some(TeleopCommand::ShowMessage) => TeleopEvent::ShowMessage,
            Some(TeleopCommand::Quit) => {
                self.finished = true;
                TeleopEvent::Quit
            }
            None => TeleopEvent::Ignored,
        }
    }
}
