//! Driver errors

use numeral_core::{InvalidDigit, InvalidSegment};

use crate::is31fl3235a::InvalidChannel;

/// Registry errors, raised without touching the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistryError {
    /// All four numeral slots are taken
    Full,
    /// Address 0 (general call) or not a 7-bit address
    InvalidAddress(u8),
    /// Address is already registered
    DuplicateAddress(u8),
}

/// Errors from the numeral controller
///
/// `E` is the error type of the underlying [`numeral_hal::I2cBus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NumeralError<E> {
    /// A bus transaction failed
    Bus(E),
    /// More than four numerals registered
    RegistryFull,
    /// Address cannot belong to a numeral
    InvalidAddress(u8),
    /// Address was registered twice
    DuplicateAddress(u8),
    /// No numeral registered at this index
    InvalidDevice(usize),
    /// Digit outside 0-10
    InvalidDigit(u8),
    /// Segment outside 0-7
    InvalidSegment(u8),
    /// Channel outside 0-27
    InvalidChannel(u8),
}

impl<E> From<RegistryError> for NumeralError<E> {
    fn from(e: RegistryError) -> Self {
        match e {
            RegistryError::Full => NumeralError::RegistryFull,
            RegistryError::InvalidAddress(address) => NumeralError::InvalidAddress(address),
            RegistryError::DuplicateAddress(address) => NumeralError::DuplicateAddress(address),
        }
    }
}

impl<E> From<InvalidDigit> for NumeralError<E> {
    fn from(e: InvalidDigit) -> Self {
        NumeralError::InvalidDigit(e.0)
    }
}

impl<E> From<InvalidSegment> for NumeralError<E> {
    fn from(e: InvalidSegment) -> Self {
        NumeralError::InvalidSegment(e.0)
    }
}

impl<E> From<InvalidChannel> for NumeralError<E> {
    fn from(e: InvalidChannel) -> Self {
        NumeralError::InvalidChannel(e.0)
    }
}
