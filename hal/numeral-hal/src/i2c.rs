//! I2C bus abstractions
//!
//! Provides the trait for the I2C master operations the numeral driver needs,
//! plus an adapter for `embedded-hal` 1.0 blocking I2C peripherals.

use embedded_hal::i2c::{Error as _, ErrorKind, NoAcknowledgeSource};

/// I2C bus master
///
/// The driver only ever writes: a numeral never needs to be read back.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write data to a device at the given address as one transaction
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write, the first one usually being a register
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Check whether a device acknowledges its address
    ///
    /// Issues a zero-length write. Any error counts as "nothing there".
    fn probe(&mut self, address: u8) -> bool {
        self.write(address, &[]).is_ok()
    }
}

impl<T> I2cBus for &mut T
where
    T: I2cBus,
{
    type Error = T::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        T::write(self, address, data)
    }

    fn probe(&mut self, address: u8) -> bool {
        T::probe(self, address)
    }
}

/// Error from I2C operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cBusError {
    /// Bus error (misplaced start/stop)
    Bus,
    /// Arbitration lost
    ArbitrationLost,
    /// No device acknowledged the address
    AddressNack,
    /// Device stopped acknowledging data bytes
    DataNack,
    /// Overrun
    Overrun,
    /// Other error
    Other,
}

impl From<ErrorKind> for I2cBusError {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Bus => I2cBusError::Bus,
            ErrorKind::ArbitrationLoss => I2cBusError::ArbitrationLost,
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data) => I2cBusError::DataNack,
            ErrorKind::NoAcknowledge(_) => I2cBusError::AddressNack,
            ErrorKind::Overrun => I2cBusError::Overrun,
            _ => I2cBusError::Other,
        }
    }
}

/// Adapter turning an `embedded-hal` blocking I2C peripheral into an [`I2cBus`]
pub struct EmbeddedHalBus<I2C> {
    i2c: I2C,
}

impl<I2C> EmbeddedHalBus<I2C> {
    /// Wrap an `embedded-hal` I2C peripheral
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Give the peripheral back
    pub fn into_inner(self) -> I2C {
        self.i2c
    }
}

impl<I2C: embedded_hal::i2c::I2c> I2cBus for EmbeddedHalBus<I2C> {
    type Error = I2cBusError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.i2c
            .write(address, data)
            .map_err(|e| I2cBusError::from(e.kind()))
    }
}

/// I2C configuration
#[derive(Debug, Clone, Copy)]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self {
            frequency: 400_000, // the IS31FL3235A is happy in fast mode
        }
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode (400 kHz)
    pub const FAST: Self = Self { frequency: 400_000 };
}
