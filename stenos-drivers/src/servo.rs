//! Sweep servo driver
//!
//! Maps commanded head angles to PWM match counts through a per-unit
//! calibration. Every servo horn sits differently on its spline, so the
//! two endpoint counts are measured on the bench per rover and injected;
//! the driver interpolates linearly between them.
//!
//! The servo gives no completion feedback. `point_to` programs the pulse
//! width and returns; callers own the settle delay (see
//! [`SweepActuator`]).

use stenos_core::traits::SweepActuator;
use stenos_hal::PwmChannel;

/// Highest commandable angle
pub const SWEEP_LIMIT_DEG: u16 = 180;

/// Per-unit servo calibration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ServoCalibration {
    /// Match counts that park the head at 0 degrees (full right)
    pub counts_at_0: u32,
    /// Match counts that park the head at 180 degrees (full left)
    pub counts_at_180: u32,
    /// Head mounted facing backward: command the supplement of the angle
    pub mirrored: bool,
}

impl ServoCalibration {
    /// Create a calibration from bench-measured endpoint counts
    pub const fn new(counts_at_0: u32, counts_at_180: u32) -> Self {
        Self {
            counts_at_0,
            counts_at_180,
            mirrored: false,
        }
    }

    /// Mark the head as mirror-mounted
    pub const fn mirrored(mut self) -> Self {
        self.mirrored = true;
        self
    }
}

impl Default for ServoCalibration {
    fn default() -> Self {
        // One rover's bench values at a 16MHz timer tick (0.5ms and 2.5ms
        // pulses); recalibrate per unit
        Self {
            counts_at_0: 8_000,
            counts_at_180: 40_000,
            mirrored: true,
        }
    }
}

/// Angle-addressable sweep head over one PWM channel
pub struct SweepServo<P> {
    pwm: P,
    calibration: ServoCalibration,
}

impl<P> SweepServo<P>
where
    P: PwmChannel,
{
    /// Create a servo driver with the given calibration
    pub fn new(pwm: P, calibration: ServoCalibration) -> Self {
        Self { pwm, calibration }
    }

    /// Match counts for a mechanical angle, clamped to the sweep limit
    pub fn counts_for(&self, degrees: u16) -> u32 {
        let degrees = degrees.min(SWEEP_LIMIT_DEG);
        let span = i64::from(self.calibration.counts_at_180) - i64::from(self.calibration.counts_at_0);
        let offset = span * i64::from(degrees) / i64::from(SWEEP_LIMIT_DEG);

        (i64::from(self.calibration.counts_at_0) + offset) as u32
    }

    /// Release the underlying PWM channel
    pub fn release(self) -> P {
        self.pwm
    }
}

impl<P> SweepActuator for SweepServo<P>
where
    P: PwmChannel,
{
    fn point_to(&mut self, degrees: u16) {
        let degrees = degrees.min(SWEEP_LIMIT_DEG);
        let mechanical = if self.calibration.mirrored {
            SWEEP_LIMIT_DEG - degrees
        } else {
            degrees
        };

        self.pwm.set_match_counts(self.counts_for(mechanical));
    }
}
