//! UART serial communication abstractions
//!
//! Provides traits for blocking serial communication that can be
//! implemented by chip-specific glue.

/// UART transmitter
///
/// Blocking trait for sending data over a UART interface.
pub trait UartTx {
    /// Error type for transmit operations
    type Error;

    /// Write data to the UART
    ///
    /// Blocks until all data has been written or an error occurs.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Write a single byte to the UART
    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.write_blocking(&[byte])
    }

    /// Flush any buffered data
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// UART receiver
///
/// Blocking trait for receiving data from a UART interface.
pub trait UartRx {
    /// Error type for receive operations
    type Error;

    /// Read a single byte from the UART
    ///
    /// Blocks until a byte arrives or an error occurs.
    fn read_byte(&mut self) -> Result<u8, Self::Error>;

    /// Read a byte if one is already waiting
    ///
    /// Returns `Ok(None)` when the receive FIFO is empty.
    fn try_read_byte(&mut self) -> Result<Option<u8>, Self::Error>;
}

/// Combined UART interface
///
/// For UARTs that provide both TX and RX on a single peripheral.
pub trait Uart: UartTx + UartRx {}

// Blanket implementation
impl<T: UartTx + UartRx> Uart for T {}

/// UART configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baudrate: 115_200,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Seven,
    Eight,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}
