//! Numeral Hardware Abstraction Layer
//!
//! This crate defines the bus abstraction the numeral driver talks through.
//! Chip HALs either implement [`I2cBus`] directly or hand over any
//! `embedded-hal` 1.0 blocking I2C peripheral wrapped in [`EmbeddedHalBus`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (numeral-firmware, etc.)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  numeral-drivers (Numerals controller)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  numeral-hal (this crate - I2cBus)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ embedded-hal  │       │  test doubles │
//! │  I2c (rp2040) │       │  (FakeI2cBus) │
//! └───────────────┘       └───────────────┘
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;

pub use i2c::{EmbeddedHalBus, I2cBus, I2cBusError, I2cConfig};
