//! LCD bus pin-group abstraction
//!
//! The controller speaks a half-duplex 4-bit parallel protocol: four data
//! lines shared between writes and the busy-flag read-back, plus enable,
//! register-select, and read/write control lines. [`LcdBus`] is the seam
//! the driver talks to; [`PinLcdBus`] assembles one from individual pins.

use stenos_hal::{FlexPin, OutputPin};

/// Pin-group interface to the display controller
pub trait LcdBus {
    /// Drive the four data lines (bit 0 = D4 .. bit 3 = D7), reclaiming
    /// output mode if the lines were released
    fn write_nibble(&mut self, nibble: u8);

    /// Float the data lines so the controller can drive them
    fn release_data(&mut self);

    /// Sample the top data line (the busy flag during a status read)
    ///
    /// Only meaningful after [`release_data`](Self::release_data) with the
    /// read/write line in read mode and enable asserted.
    fn busy_line_high(&self) -> bool;

    /// Drive the enable (clock) line
    fn set_enable(&mut self, high: bool);

    /// Select the data register (`true`) or command register (`false`)
    fn set_register_select(&mut self, data: bool);

    /// Put the bus in read mode (`true`) or write mode (`false`)
    fn set_read(&mut self, read: bool);
}

/// [`LcdBus`] over seven discrete GPIO pins
pub struct PinLcdBus<D4, D5, D6, D7, EN, RS, RW> {
    d4: D4,
    d5: D5,
    d6: D6,
    d7: D7,
    en: EN,
    rs: RS,
    rw: RW,
}

impl<D4, D5, D6, D7, EN, RS, RW> PinLcdBus<D4, D5, D6, D7, EN, RS, RW> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(d4: D4, d5: D5, d6: D6, d7: D7, en: EN, rs: RS, rw: RW) -> Self {
        Self {
            d4,
            d5,
            d6,
            d7,
            en,
            rs,
            rw,
        }
    }
}

impl<D4, D5, D6, D7, EN, RS, RW> LcdBus for PinLcdBus<D4, D5, D6, D7, EN, RS, RW>
where
    D4: FlexPin,
    D5: FlexPin,
    D6: FlexPin,
    D7: FlexPin,
    EN: OutputPin,
    RS: OutputPin,
    RW: OutputPin,
{
    fn write_nibble(&mut self, nibble: u8) {
        self.d4.make_output();
        self.d5.make_output();
        self.d6.make_output();
        self.d7.make_output();

        self.d4.set_state(nibble & 0b0001 != 0);
        self.d5.set_state(nibble & 0b0010 != 0);
        self.d6.set_state(nibble & 0b0100 != 0);
        self.d7.set_state(nibble & 0b1000 != 0);
    }

    fn release_data(&mut self) {
        self.d4.make_input();
        self.d5.make_input();
        self.d6.make_input();
        self.d7.make_input();
    }

    fn busy_line_high(&self) -> bool {
        self.d7.is_high()
    }

    fn set_enable(&mut self, high: bool) {
        self.en.set_state(high);
    }

    fn set_register_select(&mut self, data: bool) {
        self.rs.set_state(data);
    }

    fn set_read(&mut self, read: bool) {
        self.rw.set_state(read);
    }
}
