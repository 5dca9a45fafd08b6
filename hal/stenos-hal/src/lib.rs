//! Stenos Hardware Abstraction Layer
//!
//! This crate defines hardware abstraction traits that can be implemented
//! by chip-specific glue (TM4C123G today, anything with GPIO/UART/timer
//! peripherals tomorrow). This enables the same application code to run on
//! different hardware platforms - and, just as importantly, on the host
//! under `cargo test` with mock implementations.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (stenos-firmware, etc.)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  stenos-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ stenos-       │       │ host test     │
//! │ firmware glue │       │ mocks         │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`], [`gpio::FlexPin`] - Digital I/O
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial communication
//! - [`pwm::PwmChannel`] - Compare-match pulse output
//! - [`delay::DelayUs`] - Busy-wait timing

#![no_std]
#![deny(unsafe_code)]

pub mod delay;
pub mod gpio;
pub mod pwm;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use delay::DelayUs;
pub use gpio::{FlexPin, InputPin, OutputPin};
pub use pwm::PwmChannel;
pub use uart::{UartRx, UartTx};
