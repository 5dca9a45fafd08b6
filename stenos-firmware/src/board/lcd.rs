//! LCD bus over PORTD (control) and PORTF (data)
//!
//! The four data lines sit on PF1-PF4 so a nibble shifts left one bit on
//! its way to the port. PF4 carries the controller's busy flag during a
//! status read, which is why the data direction register flips per access.

use stenos_drivers::charlcd::LcdBus;
use tm4c123x_hal::tm4c123x::{GPIO_PORTD, GPIO_PORTF};

const EN: u32 = 1 << 2;
const RS: u32 = 1 << 3;
const RW: u32 = 1 << 6;
const DATA_MASK: u32 = 0x1E; // PF1-PF4
const BUSY_LINE: u32 = 1 << 4; // PF4 = D7

/// [`LcdBus`] over the rover's LCD wiring
pub struct LcdPort {
    control: GPIO_PORTD,
    data: GPIO_PORTF,
}

impl LcdPort {
    /// Configure the pins and return the bus
    pub fn new(control: GPIO_PORTD, data: GPIO_PORTF) -> Self {
        control
            .den
            .modify(|r, w| unsafe { w.bits(r.bits() | EN | RS | RW) });
        control
            .dir
            .modify(|r, w| unsafe { w.bits(r.bits() | EN | RS | RW) });
        control
            .data
            .modify(|r, w| unsafe { w.bits(r.bits() & !(EN | RS | RW)) });

        data.den
            .modify(|r, w| unsafe { w.bits(r.bits() | DATA_MASK) });
        data.dir
            .modify(|r, w| unsafe { w.bits(r.bits() | DATA_MASK) });

        Self { control, data }
    }

    fn control_set(&self, mask: u32, high: bool) {
        self.control.data.modify(|r, w| unsafe {
            if high {
                w.bits(r.bits() | mask)
            } else {
                w.bits(r.bits() & !mask)
            }
        });
    }
}

impl LcdBus for LcdPort {
    fn write_nibble(&mut self, nibble: u8) {
        self.data
            .dir
            .modify(|r, w| unsafe { w.bits(r.bits() | DATA_MASK) });
        let shifted = (u32::from(nibble) & 0x0F) << 1;
        self.data
            .data
            .modify(|r, w| unsafe { w.bits((r.bits() & !DATA_MASK) | shifted) });
    }

    fn release_data(&mut self) {
        self.data
            .dir
            .modify(|r, w| unsafe { w.bits(r.bits() & !DATA_MASK) });
    }

    fn busy_line_high(&self) -> bool {
        self.data.data.read().bits() & BUSY_LINE != 0
    }

    fn set_enable(&mut self, high: bool) {
        self.control_set(EN, high);
    }

    fn set_register_select(&mut self, data: bool) {
        self.control_set(RS, data);
    }

    fn set_read(&mut self, read: bool) {
        self.control_set(RW, read);
    }
}
