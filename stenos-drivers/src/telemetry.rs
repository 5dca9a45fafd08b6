//! UART telemetry sink
//!
//! Adapts a blocking UART transmitter to the core's byte-oriented
//! telemetry trait. Telemetry is diagnostics, not control: transmit errors
//! are dropped rather than propagated into the pipeline.

use core::fmt;

use stenos_core::traits::TelemetrySink;
use stenos_hal::UartTx;

/// [`TelemetrySink`] over any blocking UART transmitter
pub struct UartTelemetry<T> {
    uart: T,
}

impl<T> UartTelemetry<T>
where
    T: UartTx,
{
    pub fn new(uart: T) -> Self {
        Self { uart }
    }

    /// Release the underlying transmitter
    pub fn release(self) -> T {
        self.uart
    }
}

impl<T> TelemetrySink for UartTelemetry<T>
where
    T: UartTx,
{
    fn send_byte(&mut self, byte: u8) {
        let _ = self.uart.write_byte(byte);
    }
}

impl<T> fmt::Write for UartTelemetry<T>
where
    T: UartTx,
{
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.send_str(s);
        Ok(())
    }
}
