//! UART glue for the console and the wheelbase link
//!
//! UART0 (PA0/PA1) carries telemetry out and teleop keystrokes in; UART4
//! (PC4/PC5) is transmit-only toward the wheelbase. Register access goes
//! through the PAC pointer because TX and RX of one peripheral live in
//! separate owner structs.

use stenos_hal::uart::{DataBits, Parity, StopBits, UartConfig};
use stenos_hal::{UartRx, UartTx};
use tm4c123x_hal::tm4c123x::{self, GPIO_PORTA, GPIO_PORTC, UART0, UART4};

use super::CLOCK_HZ;

const FR_TXFF: u32 = 1 << 5;
const FR_RXFE: u32 = 1 << 4;

/// Enable UART, TX, and RX
const CTL_ENABLE: u32 = (1 << 0) | (1 << 8) | (1 << 9);

fn baud_divisors(baudrate: u32) -> (u32, u32) {
    // 16x oversampling: integer part plus 6-bit fraction
    let divisor_x64 = (CLOCK_HZ * 4) / baudrate; // (clk / (16 * baud)) * 64
    (divisor_x64 >> 6, divisor_x64 & 0x3F)
}

fn line_control(config: &UartConfig) -> u32 {
    let wlen = match config.data_bits {
        DataBits::Seven => 0x2,
        DataBits::Eight => 0x3,
    };
    let parity = match config.parity {
        Parity::None => 0x0,
        Parity::Odd => 0x1 << 1,
        Parity::Even => 0x3 << 1,
    };
    let stop = match config.stop_bits {
        StopBits::One => 0x0,
        StopBits::Two => 0x1 << 3,
    };

    (wlen << 5) | (1 << 4) | parity | stop // FIFOs always on
}

fn configure(regs: &tm4c123x::uart0::RegisterBlock, config: &UartConfig) {
    let (ibrd, fbrd) = baud_divisors(config.baudrate);

    regs.ctl.modify(|r, w| unsafe { w.bits(r.bits() & !1) });
    regs.ibrd.write(|w| unsafe { w.bits(ibrd) });
    regs.fbrd.write(|w| unsafe { w.bits(fbrd) });
    regs.lcrh.write(|w| unsafe { w.bits(line_control(config)) });
    regs.cc.write(|w| unsafe { w.bits(0) }); // system clock
    regs.ctl.write(|w| unsafe { w.bits(CTL_ENABLE) });
}

/// Console transmit half (UART0)
pub struct ConsoleTx {
    _private: (),
}

/// Console receive half (UART0)
pub struct ConsoleRx {
    _private: (),
}

/// Wheelbase transmit link (UART4)
pub struct WheelbaseTx {
    _private: (),
}

/// Bring up UART0 at 115200 and split it
pub fn console(uart: UART0, porta: &GPIO_PORTA) -> (ConsoleTx, ConsoleRx) {
    porta.afsel.modify(|r, w| unsafe { w.bits(r.bits() | 0x03) });
    porta
        .pctl
        .modify(|r, w| unsafe { w.bits((r.bits() & !0xFF) | 0x11) });
    porta.den.modify(|r, w| unsafe { w.bits(r.bits() | 0x03) });

    configure(&uart, &UartConfig::default());
    // The halves reach the registers through the PAC pointer from here on
    core::mem::forget(uart);

    (ConsoleTx { _private: () }, ConsoleRx { _private: () })
}

/// Bring up UART4 at 115200 toward the wheelbase
pub fn wheelbase(uart: UART4, portc: &GPIO_PORTC) -> WheelbaseTx {
    portc.afsel.modify(|r, w| unsafe { w.bits(r.bits() | 0x30) });
    portc
        .pctl
        .modify(|r, w| unsafe { w.bits((r.bits() & !0x00FF_0000) | 0x0011_0000) });
    portc.den.modify(|r, w| unsafe { w.bits(r.bits() | 0x30) });

    configure(&uart, &UartConfig::default());
    core::mem::forget(uart);

    WheelbaseTx { _private: () }
}

fn write_all(regs: &tm4c123x::uart0::RegisterBlock, data: &[u8]) {
    for &byte in data {
        while regs.fr.read().bits() & FR_TXFF != 0 {}
        regs.dr.write(|w| unsafe { w.bits(u32::from(byte)) });
    }
}

impl UartTx for ConsoleTx {
    type Error = core::convert::Infallible;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        let regs = unsafe { &*UART0::ptr() };
        write_all(regs, data);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        let regs = unsafe { &*UART0::ptr() };
        while regs.fr.read().bits() & (1 << 3) != 0 {} // BUSY
        Ok(())
    }
}

impl UartRx for ConsoleRx {
    type Error = core::convert::Infallible;

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        let regs = unsafe { &*UART0::ptr() };
        while regs.fr.read().bits() & FR_RXFE != 0 {}
        Ok((regs.dr.read().bits() & 0xFF) as u8)
    }

    fn try_read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        let regs = unsafe { &*UART0::ptr() };
        if regs.fr.read().bits() & FR_RXFE != 0 {
            Ok(None)
        } else {
            Ok(Some((regs.dr.read().bits() & 0xFF) as u8))
        }
    }
}

impl UartTx for WheelbaseTx {
    type Error = core::convert::Infallible;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        let regs = unsafe { &*UART4::ptr() };
        write_all(regs, data);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        let regs = unsafe { &*UART4::ptr() };
        while regs.fr.read().bits() & (1 << 3) != 0 {}
        Ok(())
    }
}
