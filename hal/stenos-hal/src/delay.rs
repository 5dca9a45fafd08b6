//! Busy-wait delay abstraction
//!
//! All device sequencing in this firmware is synchronous: the single thread
//! of control spins for settle times and bus hold times. Implementations
//! must wait *at least* the requested duration; there is no upper bound and
//! no timeout.

/// Busy-wait delay provider
pub trait DelayUs {
    /// Busy-wait for at least `us` microseconds
    fn delay_us(&mut self, us: u32);

    /// Busy-wait for at least `ms` milliseconds
    fn delay_ms(&mut self, ms: u32) {
        for _ in 0..ms {
            self.delay_us(1_000);
        }
    }
}

// Allow a shared delay source to be borrowed down the call stack
impl<T: DelayUs + ?Sized> DelayUs for &mut T {
    fn delay_us(&mut self, us: u32) {
        (**self).delay_us(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms);
    }
}
