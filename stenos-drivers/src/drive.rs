//! Serial drivetrain driver
//!
//! The wheelbase speaks an opcode-plus-payload byte protocol over its own
//! UART: a start/full-mode handshake, then `DRIVE_DIRECT` with signed
//! per-wheel velocities in mm/s, big-endian. The discrete motion
//! primitives are time-based dead reckoning: command the wheels, busy-wait
//! the computed duration, command a stop. The speed and turn rate are
//! per-unit tunables like every other calibration in this firmware.

use stenos_core::traits::DriveTrain;
use stenos_hal::{DelayUs, UartTx};

/// Wheelbase opcodes
mod op {
    /// Open the command interface
    pub const START: u8 = 128;
    /// Full control mode (no internal safety reflexes)
    pub const FULL: u8 = 132;
    /// Per-wheel velocity command
    pub const DRIVE_DIRECT: u8 = 145;
}

/// Per-unit drivetrain tuning
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriveConfig {
    /// Wheel speed for straight moves and turns (mm/s)
    pub speed_mm_s: i16,
    /// Measured in-place rotation rate at that wheel speed (deg/s)
    pub turn_deg_per_s: f32,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            speed_mm_s: 150,
            turn_deg_per_s: 70.0,
        }
    }
}

/// Blocking [`DriveTrain`] over the wheelbase serial link
pub struct SerialDrive<T, D> {
    uart: T,
    delay: D,
    config: DriveConfig,
}

impl<T, D> SerialDrive<T, D>
where
    T: UartTx,
    D: DelayUs,
{
    /// Open the command interface and enter full mode
    pub fn new(mut uart: T, delay: D, config: DriveConfig) -> Self {
        let _ = uart.write_blocking(&[op::START, op::FULL]);
        Self {
            uart,
            delay,
            config,
        }
    }

    fn drive_wheels(&mut self, right_mm_s: i16, left_mm_s: i16) {
        let right = right_mm_s.to_be_bytes();
        let left = left_mm_s.to_be_bytes();
        let _ = self.uart.write_blocking(&[
            op::DRIVE_DIRECT,
            right[0],
            right[1],
            left[0],
            left[1],
        ]);
    }

    fn stop(&mut self) {
        self.drive_wheels(0, 0);
    }

    /// Straight-move duration for a distance in cm
    fn straight_ms(&self, cm: f32) -> u32 {
        if self.config.speed_mm_s == 0 || cm <= 0.0 {
            return 0;
        }
        let mm = cm * 10.0;
        (mm * 1000.0 / self.config.speed_mm_s as f32) as u32
    }

    /// In-place turn duration for an angle in degrees
    fn turn_ms(&self, degrees: u16) -> u32 {
        if self.config.turn_deg_per_s <= 0.0 {
            return 0;
        }
        (degrees as f32 * 1000.0 / self.config.turn_deg_per_s) as u32
    }

    fn timed_move(&mut self, right_mm_s: i16, left_mm_s: i16, duration_ms: u32) {
        if duration_ms == 0 {
            return;
        }
        self.drive_wheels(right_mm_s, left_mm_s);
        self.delay.delay_ms(duration_ms);
        self.stop();
    }
}

impl<T, D> DriveTrain for SerialDrive<T, D>
where
    T: UartTx,
    D: DelayUs,
{
    fn turn_clockwise(&mut self, degrees: u16) {
        let v = self.config.speed_mm_s;
        let duration = self.turn_ms(degrees);
        // Clockwise: left wheel forward, right wheel backward
        self.timed_move(-v, v, duration);
    }

    fn turn_counterclockwise(&mut self, degrees: u16) {
        let v = self.config.speed_mm_s;
        let duration = self.turn_ms(degrees);
        self.timed_move(v, -v, duration);
    }

    fn move_forward(&mut self, cm: f32) {
        let v = self.config.speed_mm_s;
        let duration = self.straight_ms(cm);
        self.timed_move(v, v, duration);
    }

    fn move_backward(&mut self, cm: f32) {
        let v = self.config.speed_mm_s;
        let duration = self.straight_ms(cm);
        self.timed_move(-v, -v, duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    #[derive(Default)]
    struct MockTx(Vec<u8>);

    impl UartTx for MockTx {
        type Error = ();

        fn write_blocking(&mut self, data: &[u8]) -> Result<(), ()> {
            self.0.extend_from_slice(data);
            Ok(())
        }

        fn flush(&mut self) -> Result<(), ()> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct SummingDelay {
        total_ms: u32,
    }

    impl DelayUs for SummingDelay {
        fn delay_us(&mut self, _us: u32) {}

        fn delay_ms(&mut self, ms: u32) {
            self.total_ms += ms;
        }
    }

    fn drive() -> SerialDrive<MockTx, SummingDelay> {
        SerialDrive::new(
            MockTx::default(),
            SummingDelay::default(),
            DriveConfig {
                speed_mm_s: 100,
                turn_deg_per_s: 50.0,
            },
        )
    }

    #[test]
    fn test_handshake_on_construction() {
        let drive = drive();
        assert_eq!(&drive.uart.0[..2], &[128, 132]);
    }

    #[test]
    fn test_forward_wire_format_and_timing() {
        let mut drive = drive();
        drive.move_forward(50.0);

        // 500mm at 100mm/s: 5 seconds between drive and stop
        assert_eq!(drive.delay.total_ms, 5_000);
        assert_eq!(
            &drive.uart.0[2..],
            &[145, 0, 100, 0, 100, 145, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_backward_negates_wheels() {
        let mut drive = drive();
        drive.move_backward(10.0);

        let neg = (-100i16).to_be_bytes();
        assert_eq!(
            &drive.uart.0[2..7],
            &[145, neg[0], neg[1], neg[0], neg[1]]
        );
    }

    #[test]
    fn test_clockwise_turn_opposes_wheels() {
        let mut drive = drive();
        drive.turn_clockwise(90);

        // 90 degrees at 50 deg/s: 1.8 seconds
        assert_eq!(drive.delay.total_ms, 1_800);

        let fwd = 100i16.to_be_bytes();
        let back = (-100i16).to_be_bytes();
        // Right wheel backward, left wheel forward
        assert_eq!(
            &drive.uart.0[2..7],
            &[145, back[0], back[1], fwd[0], fwd[1]]
        );
    }

    #[test]
    fn test_counterclockwise_mirrors() {
        let mut drive = drive();
        drive.turn_counterclockwise(90);

        let fwd = 100i16.to_be_bytes();
        let back = (-100i16).to_be_bytes();
        assert_eq!(
            &drive.uart.0[2..7],
            &[145, fwd[0], fwd[1], back[0], back[1]]
        );
    }

    #[test]
    fn test_zero_distance_sends_nothing() {
        let mut drive = drive();
        drive.move_forward(0.0);

        // Handshake only
        assert_eq!(drive.uart.0.len(), 2);
        assert_eq!(drive.delay.total_ms, 0);
    }
}
