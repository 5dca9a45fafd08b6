//! Character LCD driver
//!
//! Drives a 20x4 character display over a half-duplex 4-bit parallel bus.
//! Every command and data byte goes out as two nibbles, gated by the
//! controller's busy flag: the driver polls the flag by switching the bus
//! to read mode, pulsing enable, and sampling the top data line.
//!
//! The busy wait has no timeout by default. Display hardware that stops
//! clearing its busy flag wedges the rover, and that is the documented
//! trade: on this class of hardware a silent fault is worse than a visible
//! hang. Tests (and cautious callers) can inject [`WaitPolicy::Bounded`].

pub mod bus;

use core::fmt;

use heapless::String;
use stenos_hal::DelayUs;

pub use bus::{LcdBus, PinLcdBus};

/// Characters per row
pub const LCD_COLS: usize = 20;

/// Rows on the panel
pub const LCD_ROWS: usize = 4;

/// Total visible characters
pub const LCD_TOTAL_CHARS: usize = LCD_COLS * LCD_ROWS;

/// DDRAM base address of each row; rows interleave in controller memory
const LINE_BASE: [u8; LCD_ROWS] = [0x00, 0x40, 0x14, 0x54];

/// Controller command opcodes
mod cmd {
    /// Clear display and home the cursor
    pub const CLEAR: u8 = 0x01;
    /// Home the cursor without clearing
    pub const RETURN_HOME: u8 = 0x02;
    /// Entry mode: increment address, no display shift
    pub const ENTRY_INCREMENT: u8 = 0x06;
    /// Display on, cursor on, blink on
    pub const DISPLAY_CURSOR_BLINK: u8 = 0x0F;
    /// Function set: 4-bit bus, two logical lines
    pub const FUNCTION_4BIT_2LINE: u8 = 0x28;
    /// Set DDRAM address (low bits carry the address)
    pub const SET_DDRAM: u8 = 0x80;
}

/// Errors the driver can report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LcdError {
    /// Bounded busy wait expired
    BusyTimeout,
    /// Forced clear finished with the busy flag still set
    StillBusy,
}

/// How long to spin on the busy flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WaitPolicy {
    /// Spin forever (source-faithful default)
    #[default]
    Unbounded,
    /// Give up after this many polls
    Bounded(u32),
}

/// 20x4 character LCD over a 4-bit busy-flag-gated bus
pub struct CharLcd<B, D> {
    bus: B,
    delay: D,
    wait: WaitPolicy,
    /// Last rendered frame, for change suppression in [`printf`](Self::printf)
    last_frame: String<LCD_TOTAL_CHARS>,
}

impl<B, D> CharLcd<B, D>
where
    B: LcdBus,
    D: DelayUs,
{
    /// Create a driver with the unbounded busy wait
    pub fn new(bus: B, delay: D) -> Self {
        Self::with_wait_policy(bus, delay, WaitPolicy::Unbounded)
    }

    /// Create a driver with an explicit busy-wait policy
    pub fn with_wait_policy(bus: B, delay: D, wait: WaitPolicy) -> Self {
        Self {
            bus,
            delay,
            wait,
            last_frame: String::new(),
        }
    }

    /// Wake the controller and configure 4-bit / 2-line mode
    ///
    /// The three blind `0x3` nibbles with shrinking delays are the
    /// controller family's power-on handshake; the busy flag is not valid
    /// until they have gone out.
    pub fn init(&mut self) -> Result<(), LcdError> {
        self.bus.set_enable(false);
        self.bus.set_register_select(false);
        self.bus.set_read(false);

        // Controller needs 40ms after power; leave margin
        self.delay.delay_ms(50);

        self.send_nibble(0x03);
        self.delay.delay_ms(10);
        self.send_nibble(0x03);
        self.delay.delay_us(170);
        self.send_nibble(0x03);
        self.delay.delay_us(170);
        self.send_nibble(0x02);

        self.send_command(cmd::FUNCTION_4BIT_2LINE)?;
        self.send_command(cmd::DISPLAY_CURSOR_BLINK)?;
        self.send_command(cmd::FUNCTION_4BIT_2LINE)?;
        self.send_command(cmd::ENTRY_INCREMENT)?;
        self.send_command(cmd::CLEAR)?;

        self.last_frame.clear();
        Ok(())
    }

    /// Poll the busy flag once
    ///
    /// Perturbs the bus direction; never interleave with a write in
    /// progress.
    pub fn is_busy(&mut self) -> bool {
        self.bus.set_register_select(false);
        self.bus.set_read(true);
        self.bus.release_data();

        self.bus.set_enable(true);
        let busy = self.bus.busy_line_high();
        self.bus.set_enable(false);

        self.bus.set_read(false);
        busy
    }

    /// Spin until the controller reports ready
    ///
    /// Under [`WaitPolicy::Unbounded`] this can only return `Ok`.
    pub fn wait_ready(&mut self) -> Result<(), LcdError> {
        match self.wait {
            WaitPolicy::Unbounded => {
                while self.is_busy() {}
                Ok(())
            }
            WaitPolicy::Bounded(max_polls) => {
                for _ in 0..max_polls {
                    if !self.is_busy() {
                        return Ok(());
                    }
                }
                Err(LcdError::BusyTimeout)
            }
        }
    }

    /// Clock one nibble onto the bus and release the data lines
    fn send_nibble(&mut self, nibble: u8) {
        self.bus.set_enable(true);
        self.bus.write_nibble(nibble & 0x0F);

        // Data hold time before the falling clock edge
        self.delay.delay_us(20);
        self.bus.set_enable(false);

        self.delay.delay_us(20);
        self.bus.write_nibble(0);
    }

    /// Send a command byte as two busy-gated nibbles
    pub fn send_command(&mut self, command: u8) -> Result<(), LcdError> {
        self.wait_ready()?;

        self.bus.set_register_select(false);
        self.bus.set_read(false);

        self.send_nibble(command >> 4);
        self.send_nibble(command & 0x0F);

        self.wait_ready()
    }

    /// Write one character at the cursor
    pub fn putc(&mut self, ch: u8) -> Result<(), LcdError> {
        self.wait_ready()?;

        self.bus.set_register_select(true);
        self.bus.set_read(false);

        self.send_nibble(ch >> 4);
        self.send_nibble(ch & 0x0F);

        self.wait_ready()
    }

    /// Write a string character by character
    pub fn puts(&mut self, s: &str) -> Result<(), LcdError> {
        for byte in s.bytes() {
            self.putc(byte)?;
        }
        Ok(())
    }

    /// Clear the display
    pub fn clear(&mut self) -> Result<(), LcdError> {
        self.send_command(cmd::CLEAR)
    }

    /// Move the cursor to the top-left corner
    pub fn home(&mut self) -> Result<(), LcdError> {
        self.send_command(cmd::RETURN_HOME)
    }

    /// Move the cursor to the start of a line (1-based, masked to range)
    pub fn goto_line(&mut self, line: u8) -> Result<(), LcdError> {
        let index = (line.wrapping_sub(1) & 0x03) as usize;
        self.send_command(cmd::SET_DDRAM | LINE_BASE[index])
    }

    /// Move the cursor to a column/row position
    ///
    /// Out-of-range coordinates are silently ignored.
    pub fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), LcdError> {
        if col as usize >= LCD_COLS || row as usize >= LCD_ROWS {
            return Ok(());
        }
        self.send_command(cmd::SET_DDRAM | (LINE_BASE[row as usize] + col))
    }

    /// Render formatted text, skipping the bus entirely when unchanged
    ///
    /// Formats into a frame buffer sized to the visible characters, then
    /// diffs against the previous frame: an identical frame issues zero
    /// bus operations. A changed frame clears and re-renders character by
    /// character, translating `\n` into a jump to the next row and issuing
    /// a row-address command at every row boundary.
    pub fn printf(&mut self, args: fmt::Arguments<'_>) -> Result<(), LcdError> {
        let mut frame: String<LCD_TOTAL_CHARS> = String::new();
        // Overflow truncates at the buffer; the panel cannot show more anyway
        let _ = fmt::Write::write_fmt(&mut frame, args);

        if frame == self.last_frame {
            return Ok(());
        }

        self.clear()?;
        let mut written = 0usize;
        for byte in frame.bytes() {
            if written >= LCD_TOTAL_CHARS {
                break;
            }

            if byte == b'\n' {
                // Skip the remainder of the current row
                written += LCD_COLS - written % LCD_COLS;
            } else {
                self.putc(byte)?;
                written += 1;
            }

            if written % LCD_COLS == 0 && written > 0 && written < LCD_TOTAL_CHARS {
                self.goto_line((written / LCD_COLS) as u8 + 1)?;
            }
        }

        self.last_frame = frame;
        Ok(())
    }

    /// Blind clear for recovering a wedged bus
    ///
    /// Bypasses the busy gate, clocks the clear command out, waits a fixed
    /// 2ms, then checks the flag once. `Err(StillBusy)` means the panel
    /// did not recover; the caller decides what to do about it.
    pub fn force_clear(&mut self) -> Result<(), LcdError> {
        self.bus.set_register_select(false);
        self.bus.set_read(false);

        self.send_nibble(cmd::CLEAR >> 4);
        self.delay.delay_us(1);
        self.send_nibble(cmd::CLEAR & 0x0F);

        self.delay.delay_ms(2);

        self.last_frame.clear();
        if self.is_busy() {
            Err(LcdError::StillBusy)
        } else {
            Ok(())
        }
    }

    /// Release the bus and delay source
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use std::vec::Vec;

    /// Recorded bus activity: nibbles latched while enable was high, and
    /// the register-select state they were latched under
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Latched {
        data_register: bool,
        nibble: u8,
    }

    #[derive(Default)]
    struct MockBus {
        latched: Vec<Latched>,
        enable: bool,
        data_register: bool,
        read_mode: bool,
        releases: u32,
        /// Busy polls left that report busy before the flag clears
        busy_polls: Cell<u32>,
        total_ops: u32,
    }

    impl MockBus {
        fn busy_for(polls: u32) -> Self {
            let bus = Self::default();
            bus.busy_polls.set(polls);
            bus
        }

        /// Latched nibble stream reassembled into (data_register, byte)
        fn bytes(&self) -> Vec<(bool, u8)> {
            self.latched
                .chunks(2)
                .filter(|pair| pair.len() == 2)
                .map(|pair| (pair[0].data_register, (pair[0].nibble << 4) | pair[1].nibble))
                .collect()
        }

        fn data_bytes(&self) -> Vec<u8> {
            self.bytes()
                .into_iter()
                .filter(|(data, _)| *data)
                .map(|(_, byte)| byte)
                .collect()
        }

        fn command_bytes(&self) -> Vec<u8> {
            self.bytes()
                .into_iter()
                .filter(|(data, _)| !*data)
                .map(|(_, byte)| byte)
                .collect()
        }
    }

    impl LcdBus for MockBus {
        fn write_nibble(&mut self, nibble: u8) {
            self.total_ops += 1;
            // Latch anything driven while enable is high
            if self.enable {
                self.latched.push(Latched {
                    data_register: self.data_register,
                    nibble,
                });
            }
        }

        fn release_data(&mut self) {
            self.total_ops += 1;
            self.releases += 1;
        }

        fn busy_line_high(&self) -> bool {
            let left = self.busy_polls.get();
            if left > 0 {
                self.busy_polls.set(left - 1);
                true
            } else {
                false
            }
        }

        fn set_enable(&mut self, high: bool) {
            self.total_ops += 1;
            self.enable = high;
        }

        fn set_register_select(&mut self, data: bool) {
            self.total_ops += 1;
            self.data_register = data;
        }

        fn set_read(&mut self, read: bool) {
            self.total_ops += 1;
            self.read_mode = read;
        }
    }

    struct NoDelay;

    impl DelayUs for NoDelay {
        fn delay_us(&mut self, _us: u32) {}
    }

    fn fresh_lcd() -> CharLcd<MockBus, NoDelay> {
        CharLcd::new(MockBus::default(), NoDelay)
    }

    #[test]
    fn test_wake_sequence_nibbles() {
        let mut lcd = fresh_lcd();
        lcd.init().unwrap();

        let nibbles: Vec<u8> = lcd.bus.latched.iter().map(|l| l.nibble).collect();
        // Blind wake handshake before any full command
        assert_eq!(&nibbles[..4], &[0x3, 0x3, 0x3, 0x2]);

        // Then the configuration commands, two nibbles each
        assert_eq!(
            lcd.bus.command_bytes()[2..],
            [0x28, 0x0F, 0x28, 0x06, 0x01][..]
        );
    }

    #[test]
    fn test_putc_sends_two_data_nibbles() {
        let mut lcd = fresh_lcd();
        lcd.putc(b'A').unwrap();

        assert_eq!(lcd.bus.data_bytes(), [b'A']);
    }

    #[test]
    fn test_busy_flag_gates_writes() {
        let mut lcd = CharLcd::new(MockBus::busy_for(3), NoDelay);
        lcd.putc(b'A').unwrap();

        // The wait released the data lines at least once per poll
        assert!(lcd.bus.releases >= 3);
        assert_eq!(lcd.bus.data_bytes(), [b'A']);
    }

    #[test]
    fn test_bounded_wait_times_out() {
        let mut lcd =
            CharLcd::with_wait_policy(MockBus::busy_for(u32::MAX), NoDelay, WaitPolicy::Bounded(8));
        assert_eq!(lcd.putc(b'A'), Err(LcdError::BusyTimeout));
        assert!(lcd.bus.data_bytes().is_empty());
    }

    #[test]
    fn test_goto_line_addresses() {
        let mut lcd = fresh_lcd();
        for line in 1..=4u8 {
            lcd.goto_line(line).unwrap();
        }

        assert_eq!(lcd.bus.command_bytes(), [0x80, 0xC0, 0x94, 0xD4]);
    }

    #[test]
    fn test_set_cursor_addressing() {
        let mut lcd = fresh_lcd();
        lcd.set_cursor(5, 1).unwrap();
        assert_eq!(lcd.bus.command_bytes(), [0x80 | 0x45]);

        lcd.set_cursor(0, 3).unwrap();
        assert_eq!(lcd.bus.command_bytes()[1], 0x80 | 0x54);
    }

    #[test]
    fn test_set_cursor_out_of_range_is_silent() {
        let mut lcd = fresh_lcd();
        lcd.set_cursor(20, 0).unwrap();
        lcd.set_cursor(0, 4).unwrap();
        lcd.set_cursor(255, 255).unwrap();

        assert_eq!(lcd.bus.total_ops, 0);
    }

    #[test]
    fn test_printf_renders_visible_characters() {
        let mut lcd = fresh_lcd();
        lcd.printf(format_args!("hello")).unwrap();

        assert_eq!(lcd.bus.data_bytes(), b"hello");
        // One clear command, nothing else
        assert_eq!(lcd.bus.command_bytes(), [0x01]);
    }

    #[test]
    fn test_printf_suppresses_unchanged_frame() {
        let mut lcd = fresh_lcd();
        lcd.printf(format_args!("dist {} cm", 42)).unwrap();

        let ops_after_first = lcd.bus.total_ops;
        lcd.printf(format_args!("dist {} cm", 42)).unwrap();

        assert_eq!(lcd.bus.total_ops, ops_after_first);
    }

    #[test]
    fn test_printf_rerenders_changed_frame() {
        let mut lcd = fresh_lcd();
        lcd.printf(format_args!("dist {} cm", 42)).unwrap();
        lcd.printf(format_args!("dist {} cm", 43)).unwrap();

        let ops_after_second = lcd.bus.total_ops;
        assert!(lcd.bus.data_bytes().len() > "dist 42 cm".len());
        assert!(ops_after_second > 0);
    }

    #[test]
    fn test_printf_row_boundary_commands() {
        let mut lcd = fresh_lcd();
        // 23 visible characters: spills 3 onto the second row
        lcd.printf(format_args!("{}", "abcdefghijklmnopqrstuvw")).unwrap();

        assert_eq!(lcd.bus.data_bytes().len(), 23);
        // Clear, then exactly one row-address command at column 20
        assert_eq!(lcd.bus.command_bytes(), [0x01, 0x80 | 0x40]);
    }

    #[test]
    fn test_printf_full_grid_has_three_row_jumps() {
        let mut lcd = fresh_lcd();
        let full = core::str::from_utf8(&[b'x'; LCD_TOTAL_CHARS]).unwrap();
        lcd.printf(format_args!("{}", full)).unwrap();

        assert_eq!(lcd.bus.data_bytes().len(), LCD_TOTAL_CHARS);
        // Row jumps at 20, 40, 60; none after the final cell
        assert_eq!(
            lcd.bus.command_bytes(),
            [0x01, 0x80 | 0x40, 0x80 | 0x14, 0x80 | 0x54]
        );
    }

    #[test]
    fn test_printf_newline_jumps_to_next_row() {
        let mut lcd = fresh_lcd();
        lcd.printf(format_args!("ab\ncd")).unwrap();

        assert_eq!(lcd.bus.data_bytes(), b"abcd");
        assert_eq!(lcd.bus.command_bytes(), [0x01, 0x80 | 0x40]);
    }

    #[test]
    fn test_force_clear_reports_stuck_bus() {
        let mut lcd = CharLcd::new(MockBus::busy_for(u32::MAX), NoDelay);
        assert_eq!(lcd.force_clear(), Err(LcdError::StillBusy));
    }

    #[test]
    fn test_force_clear_success() {
        let mut lcd = fresh_lcd();
        lcd.force_clear().unwrap();

        assert_eq!(lcd.bus.command_bytes(), [0x01]);
    }

    #[test]
    fn test_force_clear_resets_suppression() {
        let mut lcd = fresh_lcd();
        lcd.printf(format_args!("hi")).unwrap();
        lcd.force_clear().unwrap();

        let ops_before = lcd.bus.total_ops;
        lcd.printf(format_args!("hi")).unwrap();

        // The frame went out again rather than being suppressed
        assert!(lcd.bus.total_ops > ops_before);
    }
}
