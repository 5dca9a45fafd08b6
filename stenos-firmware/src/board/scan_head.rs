//! Combined reflective/echo range sensor
//!
//! The reflective side is the IR sensor on PB4 (AIN10), read through ADC0
//! sample sequencer 3. The echo side is a single-wire ultrasonic
//! transducer on PB3: drive a trigger pulse, float the pin, then time the
//! returned echo pulse against the free-running 32-bit TIMER3A.

use stenos_core::traits::{RangeReading, RangeSensor};
use stenos_hal::DelayUs;
use tm4c123x_hal::tm4c123x::{ADC0, GPIO_PORTB, TIMER3};

use super::{CpuDelay, CLOCK_HZ};

const ECHO_PIN: u32 = 1 << 3;
const IR_PIN: u32 = 1 << 4;
const IR_CHANNEL: u32 = 10; // AIN10

/// Echo wait budget in timer counts (about 100ms, far past any obstacle)
const ECHO_WINDOW: u32 = CLOCK_HZ / 10;

/// Speed of sound, cm per timer count, halved for the round trip
const CM_PER_COUNT: f32 = 34_300.0 / 2.0 / CLOCK_HZ as f32;

/// Reading reported when no echo arrives inside the window
const OUT_OF_RANGE_CM: f32 = 600.0;

/// [`RangeSensor`] over ADC0 and the PB3 transducer
pub struct ScanHead {
    adc: ADC0,
    timer: TIMER3,
    port: GPIO_PORTB,
    delay: CpuDelay,
}

impl ScanHead {
    /// Configure the ADC channel, echo pin, and timing source
    pub fn new(adc: ADC0, timer: TIMER3, port: GPIO_PORTB) -> Self {
        // PB4 as analog input
        port.afsel.modify(|r, w| unsafe { w.bits(r.bits() | IR_PIN) });
        port.den.modify(|r, w| unsafe { w.bits(r.bits() & !IR_PIN) });
        port.amsel.modify(|r, w| unsafe { w.bits(r.bits() | IR_PIN) });

        // PB3 as plain GPIO, direction flips per measurement
        port.afsel
            .modify(|r, w| unsafe { w.bits(r.bits() & !ECHO_PIN) });
        port.den.modify(|r, w| unsafe { w.bits(r.bits() | ECHO_PIN) });

        // Sequencer 3: one processor-triggered sample of AIN10
        adc.actss.modify(|r, w| unsafe { w.bits(r.bits() & !(1 << 3)) });
        adc.emux.modify(|r, w| unsafe { w.bits(r.bits() & !0xF000) });
        adc.ssmux3.write(|w| unsafe { w.bits(IR_CHANNEL) });
        adc.ssctl3.write(|w| unsafe { w.bits(0x6) }); // IE0 | END0
        adc.actss.modify(|r, w| unsafe { w.bits(r.bits() | (1 << 3)) });

        // Free-running 32-bit down-counter as the echo timebase
        timer.ctl.modify(|r, w| unsafe { w.bits(r.bits() & !0x1) });
        timer.cfg.write(|w| unsafe { w.bits(0x0) });
        timer.tamr.write(|w| unsafe { w.bits(0x2) }); // periodic
        timer.tailr.write(|w| unsafe { w.bits(0xFFFF_FFFF) });
        timer.ctl.modify(|r, w| unsafe { w.bits(r.bits() | 0x1) });

        Self {
            adc,
            timer,
            port,
            delay: CpuDelay,
        }
    }

    fn adc_sample(&mut self) -> u16 {
        self.adc.pssi.write(|w| unsafe { w.bits(1 << 3) });
        while self.adc.ris.read().bits() & (1 << 3) == 0 {}
        let raw = (self.adc.ssfifo3.read().bits() & 0xFFF) as u16;
        self.adc.isc.write(|w| unsafe { w.bits(1 << 3) });
        raw
    }

    fn now(&self) -> u32 {
        self.timer.tar.read().bits()
    }

    fn echo_level(&self) -> bool {
        self.port.data.read().bits() & ECHO_PIN != 0
    }

    fn ping(&mut self) -> f32 {
        // Trigger pulse out
        self.port
            .dir
            .modify(|r, w| unsafe { w.bits(r.bits() | ECHO_PIN) });
        self.port
            .data
            .modify(|r, w| unsafe { w.bits(r.bits() | ECHO_PIN) });
        self.delay.delay_us(5);
        self.port
            .data
            .modify(|r, w| unsafe { w.bits(r.bits() & !ECHO_PIN) });
        self.port
            .dir
            .modify(|r, w| unsafe { w.bits(r.bits() & !ECHO_PIN) });

        // Rising edge, bounded by the echo window (down-counting timer)
        let armed = self.now();
        while !self.echo_level() {
            if armed.wrapping_sub(self.now()) > ECHO_WINDOW {
                return OUT_OF_RANGE_CM;
            }
        }

        let start = self.now();
        while self.echo_level() {
            if start.wrapping_sub(self.now()) > ECHO_WINDOW {
                return OUT_OF_RANGE_CM;
            }
        }
        let flight = start.wrapping_sub(self.now());

        flight as f32 * CM_PER_COUNT
    }
}

impl RangeSensor for ScanHead {
    fn read(&mut self) -> RangeReading {
        RangeReading {
            ir_raw: self.adc_sample(),
            echo_cm: self.ping(),
        }
    }
}
