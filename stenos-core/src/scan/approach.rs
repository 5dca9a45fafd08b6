//! Approach planning
//!
//! Turns a selected obstacle into at most one discrete turn plus one
//! forward move. Planning is pure; execution against a [`DriveTrain`] is a
//! separate step so tests can inspect plans without a drivetrain and the
//! firmware can display the plan before moving.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::object::Obstacle;
use crate::config::{ApproachConfig, FORWARD_DEG};
use crate::traits::{DriveTrain, TurnDirection};

/// One discrete in-place rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TurnCommand {
    pub direction: TurnDirection,
    pub degrees: u16,
}

/// Outcome of the approach decision
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ApproachPlan {
    /// Turn toward the target (if needed), then advance
    Advance {
        turn: Option<TurnCommand>,
        distance_cm: f32,
    },
    /// Nothing to approach; issue no motion commands
    Hold,
}

impl ApproachPlan {
    /// Execute the plan as blocking drive commands
    ///
    /// `Hold` issues nothing. `Advance` issues the turn (when present)
    /// followed by exactly one forward move. There is no re-sensing or
    /// correction during the maneuver.
    pub fn execute<D: DriveTrain>(&self, drive: &mut D) {
        match self {
            ApproachPlan::Hold => {}
            ApproachPlan::Advance { turn, distance_cm } => {
                if let Some(turn) = turn {
                    drive.turn(turn.direction, turn.degrees);
                }
                drive.move_forward(*distance_cm);
            }
        }
    }
}

/// Plan the maneuver toward an obstacle's midpoint
///
/// Midpoints left of forward-center produce a clockwise turn sized to the
/// angular gap minus the clearance offset, mirror-symmetric on the right;
/// a midpoint dead ahead needs no turn. The advance stops `stop_short_cm`
/// short of the measured distance, clamped at zero.
pub fn plan_approach(obstacle: &Obstacle, config: &ApproachConfig) -> ApproachPlan {
    let midpoint = obstacle.span.midpoint_deg();

    let turn = if midpoint == FORWARD_DEG {
        None
    } else {
        let (direction, gap) = if midpoint < FORWARD_DEG {
            (TurnDirection::Clockwise, FORWARD_DEG - midpoint)
        } else {
            (TurnDirection::CounterClockwise, midpoint - FORWARD_DEG)
        };
        let degrees = gap.saturating_sub(config.clearance_deg);
        (degrees > 0).then_some(TurnCommand { direction, degrees })
    };

    let distance_cm = (obstacle.distance_cm - config.stop_short_cm).max(0.0);

    ApproachPlan::Advance { turn, distance_cm }
}
