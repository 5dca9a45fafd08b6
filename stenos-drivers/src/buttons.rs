//! Button pad scanner
//!
//! Four momentary buttons on active-low inputs with pull-ups. `pressed`
//! reports the instantaneous state; `poll_edge` reports a button only on
//! the press edge so a held button fires once. When several buttons are
//! down at once the highest-numbered one wins.

use stenos_core::input::ButtonLatch;
use stenos_hal::InputPin;

/// Scanner over four active-low button inputs
pub struct ButtonPad<B1, B2, B3, B4> {
    b1: B1,
    b2: B2,
    b3: B3,
    b4: B4,
    last: Option<u8>,
}

impl<B1, B2, B3, B4> ButtonPad<B1, B2, B3, B4>
where
    B1: InputPin,
    B2: InputPin,
    B3: InputPin,
    B4: InputPin,
{
    pub fn new(b1: B1, b2: B2, b3: B3, b4: B4) -> Self {
        Self {
            b1,
            b2,
            b3,
            b4,
            last: None,
        }
    }

    /// Currently pressed button number (1..=4), highest wins
    pub fn pressed(&self) -> Option<u8> {
        if self.b4.is_low() {
            Some(4)
        } else if self.b3.is_low() {
            Some(3)
        } else if self.b2.is_low() {
            Some(2)
        } else if self.b1.is_low() {
            Some(1)
        } else {
            None
        }
    }

    /// Button number on a new press edge, `None` while held or released
    pub fn poll_edge(&mut self) -> Option<u8> {
        let current = self.pressed();
        let edge = match (self.last, current) {
            (None, Some(button)) => Some(button),
            // A different button while one is held counts as a new press
            (Some(previous), Some(button)) if button != previous => Some(button),
            _ => None,
        };

        self.last = current;
        edge
    }

    /// Poll and record any press edge into an interrupt-style latch
    ///
    /// Lets polled hardware feed the same [`ButtonLatch`] an edge
    /// interrupt would.
    pub fn poll_into(&mut self, latch: &ButtonLatch) {
        if let Some(button) = self.poll_edge() {
            latch.record(button);
        }
    }
}
