//! Configuration type definitions

use heapless::Vec;

use crate::color::Rgb;
use crate::place::PlaceOrder;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum numerals on one bus (the IS31FL3235A has four address options)
pub const MAX_NUMERALS: usize = 4;

/// First (exclusive) address of the numeral address range
pub const ADDRESS_RANGE_START: u8 = 0x3b;

/// Last (inclusive) address of the numeral address range
pub const ADDRESS_RANGE_END: u8 = 0x3f;

/// PWM output frequency of the LED driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PwmFrequency {
    /// 3 kHz, the power-on default
    Khz3,
    /// 22 kHz, above the audible range
    #[default]
    Khz22,
}

impl PwmFrequency {
    /// Value for the PWM frequency register
    pub const fn register_value(self) -> u8 {
        match self {
            PwmFrequency::Khz3 => 0,
            PwmFrequency::Khz22 => 1,
        }
    }
}

/// Numeral chain configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NumeralConfig {
    /// Numeral addresses in registry order. Empty means scan the bus.
    pub addresses: Vec<u8, MAX_NUMERALS>,
    /// PWM frequency applied during setup
    pub pwm_frequency: PwmFrequency,
    /// Which numeral shows the ones place
    pub place_order: PlaceOrder,
    /// Default color for values shown by the application
    pub color: Rgb,
}

impl Default for NumeralConfig {
    fn default() -> Self {
        Self {
            addresses: Vec::new(),
            pwm_frequency: PwmFrequency::Khz22,
            place_order: PlaceOrder::OnesLast,
            color: Rgb::WHITE,
        }
    }
}

impl NumeralConfig {
    /// Create a config that scans for numerals
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether setup should scan the bus
    pub fn scans(&self) -> bool {
        self.addresses.is_empty()
    }
}

/// Candidate numeral addresses in scan order (highest first)
pub fn scan_addresses() -> impl Iterator<Item = u8> {
    ((ADDRESS_RANGE_START + 1)..=ADDRESS_RANGE_END).rev()
}
