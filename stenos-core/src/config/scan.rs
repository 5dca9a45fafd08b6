//! Sweep and approach tuning
//!
//! The sweep grid itself is fixed: the head samples every even degree from
//! 0 to 178 inclusive, which is exactly [`SWEEP_SAMPLE_COUNT`] samples.
//! Later stages index obstacles by position on that grid, so the grid is a
//! set of consts rather than configuration. Everything the operator tunes
//! per rover is in [`ScanConfig`] and [`ApproachConfig`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// First sampled angle in degrees
pub const SWEEP_START_DEG: u16 = 0;

/// Last sampled angle in degrees
pub const SWEEP_END_DEG: u16 = 178;

/// Grid spacing in degrees
pub const SWEEP_STEP_DEG: u16 = 2;

/// Number of samples in one sweep
pub const SWEEP_SAMPLE_COUNT: usize =
    ((SWEEP_END_DEG - SWEEP_START_DEG) / SWEEP_STEP_DEG) as usize + 1;

/// Most obstacles one sweep can report
pub const MAX_OBSTACLES: usize = 16;

/// Forward-center angle; the approach turn closes the gap to this heading
pub const FORWARD_DEG: u16 = 90;

/// Sweep sampling tuning
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScanConfig {
    /// Smoothed distances below this count as part of an obstacle (cm)
    pub threshold_cm: f32,
    /// Reflective readings averaged per angle
    pub reads_per_angle: u8,
    /// Settle time before each reflective reading (ms)
    pub settle_ms: u32,
    /// Settle time around each echo measurement (ms)
    pub measure_settle_ms: u32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            threshold_cm: 65.0,
            reads_per_angle: 3,
            settle_ms: 100,
            measure_settle_ms: 500,
        }
    }
}

/// Approach maneuver tuning
///
/// `clearance_deg` shortens the turn so the rover aims slightly inside the
/// obstacle edge; `stop_short_cm` ends the advance before contact.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ApproachConfig {
    /// Subtracted from the computed turn (degrees)
    pub clearance_deg: u16,
    /// Subtracted from the measured distance (cm)
    pub stop_short_cm: f32,
}

impl Default for ApproachConfig {
    fn default() -> Self {
        Self {
            clearance_deg: 8,
            stop_short_cm: 13.0,
        }
    }
}

/// Teleoperation step sizes
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TeleopConfig {
    /// Distance per forward/backward keystroke (cm)
    pub move_cm: f32,
    /// Rotation per turn keystroke (degrees)
    pub turn_deg: u16,
}

impl Default for TeleopConfig {
    fn default() -> Self {
        Self {
            move_cm: 50.0,
            turn_deg: 82,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_is_ninety_samples() {
        assert_eq!(SWEEP_SAMPLE_COUNT, 90);
        let last = SWEEP_START_DEG + (SWEEP_SAMPLE_COUNT as u16 - 1) * SWEEP_STEP_DEG;
        assert_eq!(last, SWEEP_END_DEG);
    }

    #[test]
    fn test_default_tuning() {
        let cfg = ScanConfig::default();
        assert_eq!(cfg.reads_per_angle, 3);
        assert!(cfg.threshold_cm > 0.0);

        let approach = ApproachConfig::default();
        assert_eq!(approach.clearance_deg, 8);
    }
}
