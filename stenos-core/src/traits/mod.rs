//! Hardware collaborator traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod actuator;
pub mod drive;
pub mod rangefinder;
pub mod telemetry;

pub use actuator::SweepActuator;
pub use drive::{DriveTrain, TurnDirection};
pub use rangefinder::{RangeReading, RangeSensor};
pub use telemetry::{NullTelemetry, TelemetrySink};
