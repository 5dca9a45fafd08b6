//! Sweep servo PWM on TIMER1B (PB5 / T1CCP1)
//!
//! Split 16-bit timer in PWM mode with a 20ms period at the system clock.
//! The pulse width is the distance from the load value down to the match
//! value, so programming a pulse means writing `period - counts` into the
//! match registers (low 16 bits in TBMATCHR, overflow in TBPMR).

use stenos_hal::PwmChannel;
use tm4c123x_hal::tm4c123x::{GPIO_PORTB, TIMER1};

use super::CLOCK_HZ;

/// 20ms servo frame in timer counts
pub const PERIOD_COUNTS: u32 = CLOCK_HZ / 50;

const PIN: u32 = 1 << 5;

/// [`PwmChannel`] on TIMER1B
pub struct ServoPwm {
    timer: TIMER1,
    counts: u32,
}

impl ServoPwm {
    /// Route PB5 to the timer and start the PWM frame
    pub fn new(timer: TIMER1, portb: &GPIO_PORTB) -> Self {
        portb.den.modify(|r, w| unsafe { w.bits(r.bits() | PIN) });
        portb.afsel.modify(|r, w| unsafe { w.bits(r.bits() | PIN) });
        portb
            .pctl
            .modify(|r, w| unsafe { w.bits((r.bits() & !0x00F0_0000) | 0x0070_0000) });

        timer.ctl.modify(|r, w| unsafe { w.bits(r.bits() & !(1 << 8)) }); // TBEN off
        timer.cfg.write(|w| unsafe { w.bits(0x4) }); // split 16-bit
        timer.tbmr.write(|w| unsafe { w.bits(0xA) }); // PWM, periodic
        timer
            .tbilr
            .write(|w| unsafe { w.bits(PERIOD_COUNTS & 0xFFFF) });
        timer.tbpr.write(|w| unsafe { w.bits(PERIOD_COUNTS >> 16) });

        let mut pwm = Self { timer, counts: 0 };
        // Park mid-frame until the first real command
        pwm.set_match_counts(PERIOD_COUNTS / 2);
        pwm.timer
            .ctl
            .modify(|r, w| unsafe { w.bits(r.bits() | (1 << 8)) }); // TBEN on
        pwm
    }
}

impl PwmChannel for ServoPwm {
    fn set_match_counts(&mut self, counts: u32) {
        self.counts = counts.min(PERIOD_COUNTS);
        let matchpoint = PERIOD_COUNTS - self.counts;

        self.timer
            .tbmatchr
            .write(|w| unsafe { w.bits(matchpoint & 0xFFFF) });
        self.timer
            .tbpmr
            .write(|w| unsafe { w.bits(matchpoint >> 16) });
    }

    fn match_counts(&self) -> u32 {
        self.counts
    }
}
