//! Board-agnostic core logic for Numeral displays
//!
//! This crate contains everything about a numeral that does not touch the
//! bus:
//!
//! - Gamma correction and the [`Rgb`] color type
//! - Segment to LED channel wiring
//! - Digit to segment table and multi-digit decomposition
//! - Decimal place assignment across chained numerals
//! - Configuration type definitions and the `numerals.toml` parser

#![no_std]
#![deny(unsafe_code)]

pub mod color;
pub mod config;
pub mod digit;
pub mod place;
pub mod segment;

pub use color::{gamma_correct, Rgb};
pub use config::{NumeralConfig, PwmFrequency, MAX_NUMERALS};
pub use digit::{Digit, Digits, InvalidDigit};
pub use place::PlaceOrder;
pub use segment::{InvalidSegment, Segment, SegmentChannels, CHANNEL_COUNT};
