//! Configuration types
//!
//! Board-agnostic configuration for a chain of numerals, plus the parser for
//! the `numerals.toml` format the firmware embeds.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
