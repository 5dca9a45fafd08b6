//! Scan-and-approach pipeline
//!
//! One cycle: sample the 180° arc, segment the smoothed distances into
//! angular spans, measure each span's midpoint with the echo sensor, select
//! the narrowest obstacle, and execute at most one turn plus one advance
//! toward it. Every stage is a pure function over the previous stage's
//! output; [`Pipeline`] sequences them over the hardware traits and keeps
//! the phase machine current for the UI.

pub mod approach;
pub mod object;
pub mod phase;
pub mod segment;
pub mod select;
pub mod sweep;

use core::fmt::Write;

use heapless::{String, Vec};
use stenos_hal::DelayUs;

use crate::config::{ApproachConfig, IrCalibration, ScanConfig, MAX_OBSTACLES, SWEEP_START_DEG, SWEEP_STEP_DEG};
use crate::traits::{DriveTrain, RangeSensor, SweepActuator, TelemetrySink};

pub use approach::{plan_approach, ApproachPlan, TurnCommand};
pub use object::{linear_width_cm, AngularSpan, Obstacle};
pub use phase::ScanPhase;
pub use segment::segment_sweep;
pub use select::narrowest;
pub use sweep::sample_sweep;

/// Everything one cycle learned and did
#[derive(Debug, Clone, PartialEq)]
pub struct ScanReport {
    /// Obstacles in sweep order
    pub obstacles: Vec<Obstacle, MAX_OBSTACLES>,
    /// Index of the approached obstacle, if any
    pub selected: Option<usize>,
    /// The executed maneuver
    pub plan: ApproachPlan,
}

impl ScanReport {
    /// The approached obstacle, if any
    pub fn target(&self) -> Option<&Obstacle> {
        self.selected.and_then(|index| self.obstacles.get(index))
    }
}

/// Sequences the scan stages over the hardware collaborators
pub struct Pipeline {
    scan: ScanConfig,
    calibration: IrCalibration,
    approach: ApproachConfig,
    phase: ScanPhase,
}

impl Pipeline {
    /// Create a pipeline with the given per-unit tuning
    pub fn new(scan: ScanConfig, calibration: IrCalibration, approach: ApproachConfig) -> Self {
        Self {
            scan,
            calibration,
            approach,
            phase: ScanPhase::Idle,
        }
    }

    /// Current phase, for status displays
    pub fn phase(&self) -> ScanPhase {
        self.phase
    }

    /// Run one full scan-and-approach cycle
    ///
    /// Blocks for the whole sweep (the settle delays dominate). Emits one
    /// telemetry line per measured obstacle. With no obstacle detected the
    /// cycle ends in [`ApproachPlan::Hold`] and no drive command is issued.
    pub fn run_cycle<A, R, D, V, T>(
        &mut self,
        actuator: &mut A,
        sensor: &mut R,
        drive: &mut V,
        delay: &mut D,
        telemetry: &mut T,
    ) -> ScanReport
    where
        A: SweepActuator,
        R: RangeSensor,
        D: DelayUs,
        V: DriveTrain,
        T: TelemetrySink,
    {
        self.phase = ScanPhase::Sampling;
        let smoothed = sweep::sample_sweep(actuator, sensor, delay, &self.scan, &self.calibration);

        self.phase = self.phase.next();
        let spans = segment::segment_sweep(&smoothed, self.scan.threshold_cm);

        self.phase = self.phase.next();
        let mut obstacles: Vec<Obstacle, MAX_OBSTACLES> = Vec::new();
        for span in spans {
            actuator.point_to(span.midpoint_deg());
            delay.delay_ms(self.scan.measure_settle_ms);
            let echo_cm = sensor.read().echo_cm;

            let obstacle = Obstacle::from_measurement(span, echo_cm);
            let mut line: String<64> = String::new();
            let _ = write!(
                line,
                "Object @ Angle:{} Distance:{:.0} LWidth:{:.2}",
                span.midpoint_deg(),
                obstacle.distance_cm,
                obstacle.linear_width_cm
            );
            telemetry.send_line(&line);

            // Same capacity as the span list, cannot fail
            let _ = obstacles.push(obstacle);
        }

        self.phase = self.phase.next();
        let selected = select::narrowest(&obstacles);

        self.phase = self.phase.next();
        let plan = match selected {
            Some(index) => {
                // Aim the head at the target while driving toward it
                actuator.point_to(obstacles[index].span.midpoint_deg());
                approach::plan_approach(&obstacles[index], &self.approach)
            }
            None => ApproachPlan::Hold,
        };
        plan.execute(drive);

        self.phase = ScanPhase::Complete;
        ScanReport {
            obstacles,
            selected,
            plan,
        }
    }
}

/// Sweep the arc and dump a `Degrees  Distance` table over telemetry
///
/// Diagnostic mode: no segmentation, no motion. Useful for checking a new
/// unit's reflective calibration against a tape measure.
pub fn survey<A, R, D, T>(
    actuator: &mut A,
    sensor: &mut R,
    delay: &mut D,
    telemetry: &mut T,
    config: &ScanConfig,
    calibration: &IrCalibration,
) where
    A: SweepActuator,
    R: RangeSensor,
    D: DelayUs,
    T: TelemetrySink,
{
    let smoothed = sweep::sample_sweep(actuator, sensor, delay, config, calibration);

    telemetry.send_line("Degrees Distance [cm]");
    for (index, &distance) in smoothed.iter().enumerate() {
        let angle = SWEEP_START_DEG + (index as u16) * SWEEP_STEP_DEG;
        let mut line: String<32> = String::new();
        let _ = write!(line, "{}       {:.2}", angle, distance);
        telemetry.send_line(&line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::RangeReading;
    use core::cell::Cell;
    use std::rc::Rc;
    use std::string::String as StdString;
    use std::vec::Vec as StdVec;

    // Actuator and sensor share the head angle through a cell, standing in
    // for the physical coupling of servo and sensor
    struct MockHead {
        angle: Rc<Cell<u16>>,
        commanded: StdVec<u16>,
    }

    impl SweepActuator for MockHead {
        fn point_to(&mut self, degrees: u16) {
            self.angle.set(degrees);
            self.commanded.push(degrees);
        }
    }

    struct MockSensor {
        angle: Rc<Cell<u16>>,
        near_range: core::ops::Range<u16>,
        echo_cm: f32,
    }

    impl RangeSensor for MockSensor {
        fn read(&mut self) -> RangeReading {
            let angle = self.angle.get();
            // Identity calibration in tests: raw IS the distance in cm
            let ir_raw = if self.near_range.contains(&angle) { 40 } else { 100 };
            RangeReading {
                ir_raw,
                echo_cm: self.echo_cm,
            }
        }
    }

    struct NoDelay;

    impl DelayUs for NoDelay {
        fn delay_us(&mut self, _us: u32) {}
    }

    #[derive(Debug, PartialEq)]
    enum DriveCmd {
        Cw(u16),
        Ccw(u16),
        Forward(f32),
        Backward(f32),
    }

    #[derive(Default)]
    struct DriveLog(StdVec<DriveCmd>);

    impl DriveTrain for DriveLog {
        fn turn_clockwise(&mut self, degrees: u16) {
            self.0.push(DriveCmd::Cw(degrees));
        }
        fn turn_counterclockwise(&mut self, degrees: u16) {
            self.0.push(DriveCmd::Ccw(degrees));
        }
        fn move_forward(&mut self, cm: f32) {
            self.0.push(DriveCmd::Forward(cm));
        }
        fn move_backward(&mut self, cm: f32) {
            self.0.push(DriveCmd::Backward(cm));
        }
    }

    #[derive(Default)]
    struct CapturedTelemetry(StdString);

    impl TelemetrySink for CapturedTelemetry {
        fn send_byte(&mut self, byte: u8) {
            self.0.push(byte as char);
        }
    }

    fn rig(near_range: core::ops::Range<u16>) -> (MockHead, MockSensor) {
        let angle = Rc::new(Cell::new(0));
        let head = MockHead {
            angle: Rc::clone(&angle),
            commanded: StdVec::new(),
        };
        let sensor = MockSensor {
            angle,
            near_range,
            echo_cm: 50.0,
        };
        (head, sensor)
    }

    fn pipeline_without_offsets() -> Pipeline {
        Pipeline::new(
            ScanConfig::default(),
            IrCalibration::new(1.0, 1.0),
            ApproachConfig {
                clearance_deg: 0,
                stop_short_cm: 0.0,
            },
        )
    }

    #[test]
    fn test_cycle_turns_and_advances_to_single_obstacle() {
        // Obstacle spanning 50..70 degrees, midpoint 60
        let (mut head, mut sensor) = rig(50..70);
        let mut drive = DriveLog::default();
        let mut telemetry = CapturedTelemetry::default();
        let mut pipeline = pipeline_without_offsets();

        let report = pipeline.run_cycle(&mut head, &mut sensor, &mut drive, &mut NoDelay, &mut telemetry);

        assert_eq!(report.selected, Some(0));
        let target = report.target().unwrap();
        assert_eq!(target.span.midpoint_deg(), 60);
        assert_eq!(drive.0, [DriveCmd::Cw(30), DriveCmd::Forward(50.0)]);
        assert!(telemetry.0.contains("Object @ Angle:60"));
        assert_eq!(pipeline.phase(), ScanPhase::Complete);

        // The head ends the cycle aimed at the target
        assert_eq!(*head.commanded.last().unwrap(), 60);
    }

    #[test]
    fn test_cycle_mirrors_right_side_obstacles() {
        let (mut head, mut sensor) = rig(110..130);
        let mut drive = DriveLog::default();
        let mut pipeline = pipeline_without_offsets();

        let report = pipeline.run_cycle(
            &mut head,
            &mut sensor,
            &mut drive,
            &mut NoDelay,
            &mut crate::traits::NullTelemetry,
        );

        assert_eq!(report.target().unwrap().span.midpoint_deg(), 120);
        assert_eq!(drive.0, [DriveCmd::Ccw(30), DriveCmd::Forward(50.0)]);
    }

    #[test]
    fn test_empty_sweep_issues_no_motion() {
        let (mut head, mut sensor) = rig(0..0);
        let mut drive = DriveLog::default();
        let mut pipeline = pipeline_without_offsets();

        let report = pipeline.run_cycle(
            &mut head,
            &mut sensor,
            &mut drive,
            &mut NoDelay,
            &mut crate::traits::NullTelemetry,
        );

        assert!(report.obstacles.is_empty());
        assert_eq!(report.selected, None);
        assert_eq!(report.plan, ApproachPlan::Hold);
        assert!(drive.0.is_empty());
    }

    #[test]
    fn test_survey_emits_header_and_ninety_rows() {
        let (mut head, mut sensor) = rig(0..0);
        let mut telemetry = CapturedTelemetry::default();

        survey(
            &mut head,
            &mut sensor,
            &mut NoDelay,
            &mut telemetry,
            &ScanConfig::default(),
            &IrCalibration::new(1.0, 1.0),
        );

        let lines: StdVec<&str> = telemetry.0.lines().collect();
        assert_eq!(lines.len(), 91);
        assert_eq!(lines[0], "Degrees Distance [cm]");
        assert!(lines[1].starts_with('0'));
        assert!(lines[90].starts_with("178"));
    }
}
