//! TM4C123G board glue
//!
//! Owns the peripheral bring-up and hands back trait-level drivers the
//! application can use without knowing about registers. Everything here is
//! raw register access against the PAC; the traits keep it out of the rest
//! of the firmware.
//!
//! Pin map (matching the rover's wiring harness):
//! - LCD data: PF1-PF4, LCD control: PD2 (EN), PD3 (RS), PD6 (RW)
//! - Sweep servo: PB5 (T1CCP1, PWM)
//! - Reflective sensor: PB4 (AIN10), echo transducer: PB3
//! - Console/telemetry: UART0 on PA0/PA1
//! - Wheelbase link: UART4 on PC4/PC5
//! - Buttons: PE0-PE3 (active low, edge interrupt)

pub mod buttons;
pub mod lcd;
pub mod scan_head;
pub mod serial;
pub mod servo;

use stenos_drivers::charlcd::CharLcd;
use stenos_drivers::drive::{DriveConfig, SerialDrive};
use stenos_drivers::servo::{ServoCalibration, SweepServo};
use stenos_drivers::telemetry::UartTelemetry;
use stenos_hal::DelayUs;
use tm4c123x_hal as hal;

/// System clock: the 16MHz precision internal oscillator
pub const CLOCK_HZ: u32 = 16_000_000;
const CYCLES_PER_US: u32 = CLOCK_HZ / 1_000_000;

/// Cycle-counted busy-wait delay
///
/// `Clone`-able so every blocking driver can own a handle.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuDelay;

impl DelayUs for CpuDelay {
    fn delay_us(&mut self, us: u32) {
        cortex_m::asm::delay(us.saturating_mul(CYCLES_PER_US));
    }
}

/// All drivers the application needs, fully initialized
pub struct Board {
    pub lcd: CharLcd<lcd::LcdPort, CpuDelay>,
    pub servo: SweepServo<servo::ServoPwm>,
    pub scan_head: scan_head::ScanHead,
    pub drive: SerialDrive<serial::WheelbaseTx, CpuDelay>,
    pub telemetry: UartTelemetry<serial::ConsoleTx>,
    pub console_rx: serial::ConsoleRx,
    pub delay: CpuDelay,
}

impl Board {
    /// Bring up clocks, pins, and peripherals
    ///
    /// Panics if called twice; the peripherals exist once.
    pub fn init() -> Self {
        let p = hal::Peripherals::take().unwrap();
        let mut delay = CpuDelay;

        // Gate clocks to everything we use, then let the domains settle
        p.SYSCTL
            .rcgcgpio
            .modify(|r, w| unsafe { w.bits(r.bits() | 0x3F) }); // ports A-F
        p.SYSCTL
            .rcgctimer
            .modify(|r, w| unsafe { w.bits(r.bits() | (1 << 1) | (1 << 3)) }); // TIMER1, TIMER3
        p.SYSCTL
            .rcgcadc
            .modify(|r, w| unsafe { w.bits(r.bits() | 0x1) }); // ADC0
        p.SYSCTL
            .rcgcuart
            .modify(|r, w| unsafe { w.bits(r.bits() | (1 << 0) | (1 << 4)) }); // UART0, UART4
        delay.delay_us(10);

        let lcd_port = lcd::LcdPort::new(p.GPIO_PORTD, p.GPIO_PORTF);
        let lcd = CharLcd::new(lcd_port, delay);

        let servo_pwm = servo::ServoPwm::new(p.TIMER1, &p.GPIO_PORTB);
        let servo = SweepServo::new(servo_pwm, ServoCalibration::default());

        let scan_head = scan_head::ScanHead::new(p.ADC0, p.TIMER3, p.GPIO_PORTB);

        let (console_tx, console_rx) = serial::console(p.UART0, &p.GPIO_PORTA);
        let telemetry = UartTelemetry::new(console_tx);

        let wheel_tx = serial::wheelbase(p.UART4, &p.GPIO_PORTC);
        let drive = SerialDrive::new(wheel_tx, delay, DriveConfig::default());

        buttons::init(p.GPIO_PORTE);

        Self {
            lcd,
            servo,
            scan_head,
            drive,
            telemetry,
            console_rx,
            delay,
        }
    }
}
