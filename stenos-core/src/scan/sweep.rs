//! Sweep sampling
//!
//! Drives the actuator across the grid and averages repeated reflective
//! readings into one smoothed distance per angle. Sampling is strictly
//! sequential: the next angle is not commanded until the current angle's
//! readings are all taken, because a reading is only meaningful once the
//! head has settled and settling is signaled by nothing but time.

use stenos_hal::DelayUs;

use crate::config::{IrCalibration, ScanConfig, SWEEP_SAMPLE_COUNT, SWEEP_START_DEG, SWEEP_STEP_DEG};
use crate::traits::{RangeSensor, SweepActuator};

/// Take one full sweep of smoothed reflective distances
///
/// Element `i` of the result is the mean of `reads_per_angle` calibrated
/// distance estimates at angle `SWEEP_START_DEG + i * SWEEP_STEP_DEG`,
/// with a settle delay before every reading.
pub fn sample_sweep<A, R, D>(
    actuator: &mut A,
    sensor: &mut R,
    delay: &mut D,
    config: &ScanConfig,
    calibration: &IrCalibration,
) -> [f32; SWEEP_SAMPLE_COUNT]
where
    A: SweepActuator,
    R: RangeSensor,
    D: DelayUs,
{
    let mut smoothed = [0.0f32; SWEEP_SAMPLE_COUNT];
    let reads = config.reads_per_angle.max(1);

    for (index, slot) in smoothed.iter_mut().enumerate() {
        let angle = SWEEP_START_DEG + (index as u16) * SWEEP_STEP_DEG;
        actuator.point_to(angle);

        let mut sum = 0.0f32;
        for _ in 0..reads {
            delay.delay_ms(config.settle_ms);
            let reading = sensor.read();
            sum += calibration.distance_cm(reading.ir_raw);
        }

        *slot = sum / reads as f32;
    }

    smoothed
}
