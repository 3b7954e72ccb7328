//! Numeral discovery and registration
//!
//! The registry is the ordered list of known numerals. Order matters: it is
//! the order digits are assigned in when a multi-digit value is written (see
//! [`numeral_core::PlaceOrder`]).
//!
//! Discovery probes the four IS31FL3235A addresses from highest to lowest and
//! registers every address that acknowledges. The responding device is not
//! identified: any peripheral answering on one of those addresses is taken to
//! be a numeral. Register addresses by hand with [`Registry::add`] when other
//! devices share the bus.

use heapless::Vec;
use numeral_core::config::scan_addresses;
use numeral_core::MAX_NUMERALS;
use numeral_hal::I2cBus;

use crate::error::RegistryError;
use crate::is31fl3235a::Is31fl3235a;

/// Ordered set of up to four numerals
#[derive(Debug, Clone, Default)]
pub struct Registry {
    devices: Vec<Is31fl3235a, MAX_NUMERALS>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self { devices: Vec::new() }
    }

    /// Append the numeral at `address`, returning its index
    pub fn add(&mut self, address: u8) -> Result<usize, RegistryError> {
        if address == 0 || address > 0x7f {
            return Err(RegistryError::InvalidAddress(address));
        }
        if self.contains(address) {
            return Err(RegistryError::DuplicateAddress(address));
        }

        self.devices
            .push(Is31fl3235a::new(address))
            .map_err(|_| RegistryError::Full)?;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "numeral {} registered at {=u8:#x}",
            self.devices.len() - 1,
            address
        );

        Ok(self.devices.len() - 1)
    }

    /// Probe the numeral address range and register every device that acks
    ///
    /// Addresses already registered are skipped. Returns how many numerals
    /// were added.
    pub fn scan<BUS: I2cBus>(&mut self, bus: &mut BUS) -> Result<usize, RegistryError> {
        let mut found = 0;

        for address in scan_addresses() {
            if self.contains(address) {
                continue;
            }
            if bus.probe(address) {
                self.add(address)?;
                found += 1;
            } else {
                #[cfg(feature = "defmt")]
                defmt::trace!("no numeral at {=u8:#x}", address);
            }
        }

        Ok(found)
    }

    pub fn contains(&self, address: u8) -> bool {
        self.devices.iter().any(|d| d.address() == address)
    }

    /// Number of registered numerals
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Is31fl3235a> {
        self.devices.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Is31fl3235a> {
        self.devices.get_mut(index)
    }

    /// Registered numerals in registry order
    pub fn iter(&self) -> impl Iterator<Item = &Is31fl3235a> {
        self.devices.iter()
    }

    /// Registered addresses in registry order
    pub fn addresses(&self) -> Vec<u8, MAX_NUMERALS> {
        self.devices.iter().map(|d| d.address()).collect()
    }
}
