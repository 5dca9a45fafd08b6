//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in stenos-core and stenos-hal for the rover's peripherals:
//!
//! - Character LCD over a 4-bit busy-flag-gated parallel bus
//! - Sweep servo (calibrated angle to pulse-width mapping)
//! - Serial wheelbase drivetrain
//! - Button pad scanning
//! - UART telemetry sink

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod buttons;
pub mod charlcd;
pub mod drive;
pub mod servo;
pub mod telemetry;
