//! Configuration types
//!
//! Board-agnostic tuning and calibration structures. Every value that was
//! derived empirically on a particular rover (sensor curve fits, proximity
//! threshold, approach offsets) lives here as injectable data rather than a
//! literal in the algorithm code.

pub mod calibration;
pub mod scan;

pub use calibration::*;
pub use scan::*;
