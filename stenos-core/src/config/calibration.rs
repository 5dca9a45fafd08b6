//! Reflective sensor calibration
//!
//! The IR sensor returns a unitless intensity that falls off with distance.
//! Each physical sensor gets a power-law fit `distance = a * raw^b`
//! re-derived empirically against a tape measure; the defaults here are one
//! rover's fit and will be wrong on another unit.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Power-law distance model for the reflective sensor
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IrCalibration {
    /// Multiplier `a` of the fit
    pub coefficient: f32,
    /// Exponent `b` of the fit (negative: intensity rises as range shrinks)
    pub exponent: f32,
}

impl IrCalibration {
    /// Create a calibration from fit parameters
    pub const fn new(coefficient: f32, exponent: f32) -> Self {
        Self {
            coefficient,
            exponent,
        }
    }

    /// Convert a raw reflective reading to a distance estimate in cm
    pub fn distance_cm(&self, raw: u16) -> f32 {
        self.coefficient * libm::powf(raw as f32, self.exponent)
    }
}

impl Default for IrCalibration {
    fn default() -> Self {
        Self {
            coefficient: 19_839.0,
            exponent: -1.031,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_falls_with_intensity() {
        let cal = IrCalibration::default();
        let near = cal.distance_cm(2000);
        let far = cal.distance_cm(500);
        assert!(near < far);
    }

    #[test]
    fn test_default_fit_scale() {
        // The default fit puts a mid-range reading in the tens of cm
        let cal = IrCalibration::default();
        let d = cal.distance_cm(500);
        assert!(d > 25.0 && d < 45.0, "unexpected distance {}", d);
    }

    #[test]
    fn test_custom_fit() {
        // Unity exponent degenerates to a linear model
        let cal = IrCalibration::new(2.0, 1.0);
        let d = cal.distance_cm(10);
        assert!((d - 20.0).abs() < 1e-4);
    }
}
