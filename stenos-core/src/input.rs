//! Interrupt-shared input state
//!
//! The button edge interrupt fires in ISR context while the main loop
//! polls; the two sides meet in a single atomic word so there is nothing to
//! tear and nothing to lock. The packed layout is an event bit plus the
//! button id in the low byte.

use portable_atomic::{AtomicU32, Ordering};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const EVENT_BIT: u32 = 1 << 8;
const ID_MASK: u32 = 0xFF;

/// Single-producer (ISR) / single-consumer (poll loop) button event cell
#[derive(Debug)]
pub struct ButtonLatch {
    word: AtomicU32,
}

impl ButtonLatch {
    /// Create an empty latch
    pub const fn new() -> Self {
        Self {
            word: AtomicU32::new(0),
        }
    }

    /// Record a press from interrupt context
    ///
    /// A new press overwrites an undrained one; the loop only ever cares
    /// about the latest button.
    pub fn record(&self, button: u8) {
        self.word
            .store(EVENT_BIT | u32::from(button), Ordering::Release);
    }

    /// Drain the pending press, if any
    pub fn take(&self) -> Option<u8> {
        let word = self.word.swap(0, Ordering::AcqRel);
        (word & EVENT_BIT != 0).then_some((word & ID_MASK) as u8)
    }

    /// Look at the pending press without draining it
    pub fn peek(&self) -> Option<u8> {
        let word = self.word.load(Ordering::Acquire);
        (word & EVENT_BIT != 0).then_some((word & ID_MASK) as u8)
    }
}

impl Default for ButtonLatch {
    fn default() -> Self {
        Self::new()
    }
}

/// Bump sensor snapshot polled from the drivetrain sensor frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BumpState {
    pub left: bool,
    pub right: bool,
}

impl BumpState {
    /// Check if either bumper is pressed
    pub fn any(&self) -> bool {
        self.left || self.right
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latch_starts_empty() {
        let latch = ButtonLatch::new();
        assert_eq!(latch.take(), None);
    }

    #[test]
    fn test_take_drains() {
        let latch = ButtonLatch::new();
        latch.record(3);

        assert_eq!(latch.take(), Some(3));
        assert_eq!(latch.take(), None);
    }

    #[test]
    fn test_peek_does_not_drain() {
        let latch = ButtonLatch::new();
        latch.record(2);

        assert_eq!(latch.peek(), Some(2));
        assert_eq!(latch.take(), Some(2));
    }

    #[test]
    fn test_newer_press_wins() {
        let latch = ButtonLatch::new();
        latch.record(1);
        latch.record(4);

        assert_eq!(latch.take(), Some(4));
    }

    #[test]
    fn test_button_zero_is_a_real_event() {
        let latch = ButtonLatch::new();
        latch.record(0);
        assert_eq!(latch.take(), Some(0));
    }

    #[test]
    fn test_bump_any() {
        assert!(!BumpState::default().any());
        assert!(BumpState {
            left: true,
            right: false
        }
        .any());
    }
}
