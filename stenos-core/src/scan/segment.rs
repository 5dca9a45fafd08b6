//! Sweep segmentation
//!
//! Walks the smoothed distance array in angle order and cuts it into
//! angular spans by threshold crossings. A span opens at the first sample
//! below threshold while none is open, and closes at the first sample back
//! at or above threshold. At most one span is open at a time; spans never
//! nest or overlap.
//!
//! A span still open after the last sample closes at the final grid angle.
//! The obstacle is real and partially characterized; discarding it would
//! blind the rover to anything touching the sweep edge.

use heapless::Vec;

use super::object::AngularSpan;
use crate::config::{MAX_OBSTACLES, SWEEP_START_DEG, SWEEP_STEP_DEG};

/// Segment one sweep of smoothed distances into angular spans
///
/// `samples[i]` is the smoothed distance at angle
/// `SWEEP_START_DEG + i * SWEEP_STEP_DEG`. Spans beyond [`MAX_OBSTACLES`]
/// are dropped; a sweep that cluttered is noise, not a map.
pub fn segment_sweep(samples: &[f32], threshold_cm: f32) -> Vec<AngularSpan, MAX_OBSTACLES> {
    let mut spans: Vec<AngularSpan, MAX_OBSTACLES> = Vec::new();
    let mut open_start: Option<u16> = None;

    for (index, &distance) in samples.iter().enumerate() {
        let angle = SWEEP_START_DEG + (index as u16) * SWEEP_STEP_DEG;

        match open_start {
            None if distance < threshold_cm => {
                open_start = Some(angle);
            }
            Some(start) if distance >= threshold_cm => {
                if spans.push(AngularSpan::new(start, angle)).is_err() {
                    return spans;
                }
                open_start = None;
            }
            _ => {}
        }
    }

    // Boundary policy: close a span that ran off the end of the sweep
    if let (Some(start), Some(last_index)) = (open_start, samples.len().checked_sub(1)) {
        let last_angle = SWEEP_START_DEG + (last_index as u16) * SWEEP_STEP_DEG;
        let _ = spans.push(AngularSpan::new(start, last_angle));
    }

    spans
}
