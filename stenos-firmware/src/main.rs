//! Stenos - Scan-and-approach rover firmware
//!
//! Main firmware binary for TM4C123G-based rovers. Boots the display,
//! sweep head, and wheelbase link, then serves two inputs: button 1 runs
//! a scan-and-approach cycle, button 2 dumps a calibration survey over
//! telemetry, and console keystrokes drive teleoperation between cycles.

#![no_std]
#![no_main]

use cortex_m_rt::entry;
use defmt::info;
use {defmt_rtt as _, panic_probe as _};

use stenos_core::config::{ApproachConfig, IrCalibration, ScanConfig, TeleopConfig};
use stenos_core::scan::{self, Pipeline};
use stenos_core::teleop::{TeleopEvent, TeleopSession};
use stenos_hal::UartRx;

mod board;

use board::buttons::BUTTONS;

const SCAN_BUTTON: u8 = 1;
const SURVEY_BUTTON: u8 = 2;

#[entry]
fn main() -> ! {
    info!("Stenos firmware starting");

    let mut board = board::Board::init();
    info!("Peripherals initialized");

    let mut pipeline = Pipeline::new(
        ScanConfig::default(),
        IrCalibration::default(),
        ApproachConfig::default(),
    );
    let mut teleop = TeleopSession::new(TeleopConfig::default());

    if board.lcd.init().is_err() {
        // Only reachable under a bounded wait policy; try to recover anyway
        let _ = board.lcd.force_clear();
    }
    let _ = board.lcd.printf(format_args!("Stenos ready\n1:scan 2:survey"));

    loop {
        if let Some(button) = BUTTONS.take() {
            match button {
                SCAN_BUTTON => {
                    info!("scan cycle requested");
                    let _ = board.lcd.printf(format_args!("scanning..."));

                    let report = pipeline.run_cycle(
                        &mut board.servo,
                        &mut board.scan_head,
                        &mut board.drive,
                        &mut board.delay,
                        &mut board.telemetry,
                    );

                    match report.target() {
                        Some(target) => {
                            let _ = board.lcd.printf(format_args!(
                                "target {} deg\n{:.0}cm wide {:.1}",
                                target.span.midpoint_deg(),
                                target.distance_cm,
                                target.linear_width_cm,
                            ));
                        }
                        None => {
                            let _ = board.lcd.printf(format_args!("no obstacles"));
                        }
                    }
                }
                SURVEY_BUTTON => {
                    info!("calibration survey requested");
                    let _ = board.lcd.printf(format_args!("surveying..."));

                    scan::survey(
                        &mut board.servo,
                        &mut board.scan_head,
                        &mut board.delay,
                        &mut board.telemetry,
                        &ScanConfig::default(),
                        &IrCalibration::default(),
                    );

                    let _ = board.lcd.printf(format_args!("survey done"));
                }
                _ => {}
            }
        }

        if let Ok(Some(byte)) = board.console_rx.try_read_byte() {
            match teleop.handle(byte, &mut board.drive) {
                TeleopEvent::ShowMessage => {
                    let _ = board.lcd.printf(format_args!("Received an M"));
                }
                TeleopEvent::Quit => {
                    let _ = board.lcd.printf(format_args!("teleop ended"));
                }
                TeleopEvent::Drove | TeleopEvent::Ignored => {}
            }
        }
    }
}
