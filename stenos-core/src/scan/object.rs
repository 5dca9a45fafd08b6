//! Detected obstacle types
//!
//! A sweep produces angular spans (where the smoothed reflective distance
//! stayed below threshold) which the measure stage turns into obstacles by
//! attaching an echo distance and the chord-width estimate.

use core::f32::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Contiguous run of below-threshold samples on the sweep grid
///
/// `start_deg <= end_deg` always holds for a completed span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AngularSpan {
    /// Angle where the readings dropped below threshold (degrees)
    pub start_deg: u16,
    /// Angle where the readings returned to threshold (degrees)
    pub end_deg: u16,
}

impl AngularSpan {
    /// Create a span; callers guarantee `start <= end`
    pub const fn new(start_deg: u16, end_deg: u16) -> Self {
        Self { start_deg, end_deg }
    }

    /// Angular extent in degrees
    pub const fn angular_width_deg(&self) -> u16 {
        self.end_deg - self.start_deg
    }

    /// Center angle, truncated to the grid's integer degrees
    pub const fn midpoint_deg(&self) -> u16 {
        (self.start_deg + self.end_deg) / 2
    }
}

/// One obstacle characterized by the measure stage
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Obstacle {
    /// Angular extent on the sweep grid
    pub span: AngularSpan,
    /// Echo distance at the span midpoint (cm)
    pub distance_cm: f32,
    /// Estimated physical width (cm)
    pub linear_width_cm: f32,
}

impl Obstacle {
    /// Characterize a span with a measured midpoint distance
    pub fn from_measurement(span: AngularSpan, distance_cm: f32) -> Self {
        Self {
            span,
            distance_cm,
            linear_width_cm: linear_width_cm(span.angular_width_deg(), distance_cm),
        }
    }
}

/// Chord-width approximation: `2 * d * tan(width / 2)`
///
/// Treats the obstacle as a chord of the circle at the measured distance.
pub fn linear_width_cm(angular_width_deg: u16, distance_cm: f32) -> f32 {
    let half_angle_rad = (angular_width_deg as f32) * (PI / 180.0) / 2.0;
    2.0 * distance_cm * libm::tanf(half_angle_rad)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_geometry() {
        let span = AngularSpan::new(20, 40);
        assert_eq!(span.angular_width_deg(), 20);
        assert_eq!(span.midpoint_deg(), 30);
    }

    #[test]
    fn test_chord_width() {
        // 20 degrees at 50 cm: 2 * 50 * tan(10 deg) = 17.63
        let width = linear_width_cm(20, 50.0);
        assert!((width - 17.63).abs() < 0.01, "got {}", width);
    }

    #[test]
    fn test_zero_width_span() {
        let width = linear_width_cm(0, 80.0);
        assert_eq!(width, 0.0);
    }

    #[test]
    fn test_obstacle_from_measurement() {
        let obstacle = Obstacle::from_measurement(AngularSpan::new(20, 40), 50.0);
        assert!((obstacle.linear_width_cm - 17.63).abs() < 0.01);
        assert_eq!(obstacle.distance_cm, 50.0);
    }
}
