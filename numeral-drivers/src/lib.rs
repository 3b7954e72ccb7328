//! Hardware driver implementations
//!
//! This crate drives Clueboard Numeral modules over I2C:
//!
//! - [`is31fl3235a`] - register map, shadow state and register I/O for the
//!   28-channel LED driver on each numeral
//! - [`registry`] - address discovery and the ordered list of numerals
//! - [`numerals`] - the [`Numerals`] controller: segments, digits and
//!   multi-digit values across the whole chain

#![no_std]
#![deny(unsafe_code)]

pub mod error;
pub mod is31fl3235a;
pub mod numerals;
pub mod registry;

#[cfg(test)]
pub(crate) mod test_utils;

pub use error::{NumeralError, RegistryError};
pub use is31fl3235a::{InvalidChannel, Is31fl3235a};
pub use numerals::Numerals;
pub use registry::Registry;
