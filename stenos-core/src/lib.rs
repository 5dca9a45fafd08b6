//! Board-agnostic core logic for the Stenos rover firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware collaborator traits (sweep actuator, range sensor, drive train)
//! - The scan-and-approach pipeline (sample, segment, measure, select, approach)
//! - Sweep-cycle phase machine
//! - Calibration and tuning type definitions
//! - Interrupt-shared input cells (buttons, bump sensors)
//! - Teleoperation command decoding

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod input;
pub mod scan;
pub mod teleop;
pub mod traits;
