//! Button interrupts on PE0-PE3
//!
//! Falling-edge interrupts record into the process-wide [`ButtonLatch`];
//! the main loop drains it at its own pace. The ISR touches nothing but
//! the latch and the interrupt-clear register.

use cortex_m::peripheral::NVIC;
use stenos_core::input::ButtonLatch;
use tm4c123x_hal::tm4c123x::{self, interrupt, GPIO_PORTE};

const BUTTON_MASK: u32 = 0x0F;

/// Latest button press, written from interrupt context
pub static BUTTONS: ButtonLatch = ButtonLatch::new();

/// Configure the pins and unmask the port interrupt
pub fn init(porte: GPIO_PORTE) {
    porte
        .dir
        .modify(|r, w| unsafe { w.bits(r.bits() & !BUTTON_MASK) });
    porte
        .den
        .modify(|r, w| unsafe { w.bits(r.bits() | BUTTON_MASK) });
    porte
        .pur
        .modify(|r, w| unsafe { w.bits(r.bits() | BUTTON_MASK) });

    // Falling-edge sensitive
    porte
        .is
        .modify(|r, w| unsafe { w.bits(r.bits() & !BUTTON_MASK) });
    porte
        .ibe
        .modify(|r, w| unsafe { w.bits(r.bits() & !BUTTON_MASK) });
    porte
        .iev
        .modify(|r, w| unsafe { w.bits(r.bits() & !BUTTON_MASK) });
    porte.icr.write(|w| unsafe { w.bits(BUTTON_MASK) });
    porte
        .im
        .modify(|r, w| unsafe { w.bits(r.bits() | BUTTON_MASK) });

    unsafe { NVIC::unmask(tm4c123x::Interrupt::GPIOE) };
}

#[interrupt]
fn GPIOE() {
    let porte = unsafe { &*GPIO_PORTE::ptr() };
    let pending = porte.mis.read().bits() & BUTTON_MASK;
    porte.icr.write(|w| unsafe { w.bits(pending) });

    // Highest-numbered button wins, matching the polled pad
    for bit in (0..4u8).rev() {
        if pending & (1 << bit) != 0 {
            BUTTONS.record(bit + 1);
            break;
        }
    }
}
