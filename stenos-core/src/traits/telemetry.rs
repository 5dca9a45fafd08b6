//! Telemetry sink trait
//!
//! Raw byte-oriented diagnostics channel, a serial link to a host terminal
//! on the reference hardware.

/// Byte-oriented diagnostics output
pub trait TelemetrySink {
    /// Send a single byte
    fn send_byte(&mut self, byte: u8);

    /// Send every byte of a string
    fn send_str(&mut self, s: &str) {
        for byte in s.bytes() {
            self.send_byte(byte);
        }
    }

    /// Send a string followed by a newline
    fn send_line(&mut self, s: &str) {
        self.send_str(s);
        self.send_byte(b'\n');
    }
}

/// Sink that discards everything, for headless operation and tests
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTelemetry;

impl TelemetrySink for NullTelemetry {
    fn send_byte(&mut self, _byte: u8) {}
}
