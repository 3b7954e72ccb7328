//! Parser for `numerals.toml`
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! numeral configuration. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - A single `[numerals]` section
//! - Key = value pairs (string, integer, array of integers)
//! - Hex (`0x3e`) and decimal integers
//! - Comments (# ...)
//!
//! ```toml
//! [numerals]
//! addresses = [0x3f, 0x3e]     # empty or missing = scan the bus
//! pwm_frequency = "22khz"      # or "3khz"
//! place_order = "ones_last"    # or "ones_first"
//! color = [255, 96, 0]
//! ```

use heapless::Vec;

use super::types::{NumeralConfig, PwmFrequency, MAX_NUMERALS};
use crate::color::Rgb;
use crate::place::PlaceOrder;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown section header, or a key outside `[numerals]`
    InvalidSection,
    /// Unknown key or a line that is not `key = value`
    InvalidKey,
    /// Invalid value for the key
    InvalidValue,
    /// Too many items (exceeded heapless capacity)
    TooManyItems,
}

/// Parse TOML configuration into NumeralConfig
pub fn parse_config(input: &str) -> Result<NumeralConfig, ParseError> {
    let mut config = NumeralConfig::new();
    let mut in_section = false;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            if line[1..line.len() - 1].trim() != "numerals" {
                return Err(ParseError::InvalidSection);
            }
            in_section = true;
            continue;
        }

        if !in_section {
            return Err(ParseError::InvalidSection);
        }

        let (key, value) = line.split_once('=').ok_or(ParseError::InvalidKey)?;
        let value = value.trim();

        match key.trim() {
            "addresses" => config.addresses = parse_addresses(value)?,
            "pwm_frequency" => config.pwm_frequency = parse_frequency(value)?,
            "place_order" => config.place_order = parse_place_order(value)?,
            "color" => config.color = parse_color(value)?,
            _ => return Err(ParseError::InvalidKey),
        }
    }

    Ok(config)
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn unquote(value: &str) -> Result<&str, ParseError> {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or(ParseError::InvalidValue)
}

fn parse_int(value: &str) -> Result<u32, ParseError> {
    let value = value.trim();
    let parsed = match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => value.parse::<u32>(),
    };
    parsed.map_err(|_| ParseError::InvalidValue)
}

/// Parse `[a, b, ...]` into at most N integers
fn parse_int_array<const N: usize>(value: &str) -> Result<Vec<u32, N>, ParseError> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or(ParseError::InvalidValue)?
        .trim();

    let mut items = Vec::new();
    if inner.is_empty() {
        return Ok(items);
    }

    for item in inner.split(',') {
        // Tolerate a trailing comma
        if item.trim().is_empty() {
            continue;
        }
        items
            .push(parse_int(item)?)
            .map_err(|_| ParseError::TooManyItems)?;
    }
    Ok(items)
}

fn parse_addresses(value: &str) -> Result<Vec<u8, MAX_NUMERALS>, ParseError> {
    let mut addresses = Vec::new();
    for address in parse_int_array::<MAX_NUMERALS>(value)? {
        if address == 0 || address > 0x7f {
            return Err(ParseError::InvalidValue);
        }
        let address = address as u8;
        if addresses.contains(&address) {
            return Err(ParseError::InvalidValue);
        }
        addresses
            .push(address)
            .map_err(|_| ParseError::TooManyItems)?;
    }
    Ok(addresses)
}

fn parse_frequency(value: &str) -> Result<PwmFrequency, ParseError> {
    let value = unquote(value)?;
    if value.eq_ignore_ascii_case("22khz") {
        Ok(PwmFrequency::Khz22)
    } else if value.eq_ignore_ascii_case("3khz") {
        Ok(PwmFrequency::Khz3)
    } else {
        Err(ParseError::InvalidValue)
    }
}

fn parse_place_order(value: &str) -> Result<PlaceOrder, ParseError> {
    match unquote(value)? {
        "ones_last" => Ok(PlaceOrder::OnesLast),
        "ones_first" => Ok(PlaceOrder::OnesFirst),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_color(value: &str) -> Result<Rgb, ParseError> {
    let channels = parse_int_array::<3>(value)?;
    if channels.len() != 3 {
        return Err(ParseError::InvalidValue);
    }

    let channel = |v: u32| u8::try_from(v).map_err(|_| ParseError::InvalidValue);
    Ok(Rgb::new(
        channel(channels[0])?,
        channel(channels[1])?,
        channel(channels[2])?,
    ))
}
