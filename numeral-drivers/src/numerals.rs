//! Multi-numeral controller
//!
//! [`Numerals`] owns the I2C bus and every registered numeral. It is the
//! public API of the driver:
//!
//! - discovery and setup of the chain
//! - segment level color control (shadow state only)
//! - digits and multi-digit values (written to the bus immediately)
//! - bulk refresh of all shadow state with [`Numerals::update`]
//!
//! # Usage
//!
//! ```ignore
//! let mut numerals = Numerals::new(EmbeddedHalBus::new(i2c));
//! numerals.setup()?;                      // scan, reset, power on
//! numerals.write_number(42, Rgb::RED)?;   // "42" on the last two numerals
//!
//! numerals.set_segment(0, 7, Rgb::BLUE)?; // decimal point, not yet visible
//! numerals.update()?;                     // now it is
//! ```

use heapless::Vec;
use numeral_core::{
    Digit, Digits, NumeralConfig, PlaceOrder, PwmFrequency, Rgb, Segment, CHANNEL_COUNT,
    MAX_NUMERALS,
};
use numeral_hal::I2cBus;

use crate::error::NumeralError;
use crate::is31fl3235a::Is31fl3235a;
use crate::registry::Registry;

type Result<T, BUS> = core::result::Result<T, NumeralError<<BUS as I2cBus>::Error>>;

/// Controller for a chain of up to four numerals on one bus
pub struct Numerals<BUS: I2cBus> {
    bus: BUS,
    registry: Registry,
    place_order: PlaceOrder,
    pwm_frequency: PwmFrequency,
}

impl<BUS: I2cBus> Numerals<BUS> {
    /// Create a controller with no numerals registered
    ///
    /// [`setup`](Self::setup) scans the bus unless numerals are added first.
    pub fn new(bus: BUS) -> Self {
        Self {
            bus,
            registry: Registry::new(),
            place_order: PlaceOrder::default(),
            pwm_frequency: PwmFrequency::default(),
        }
    }

    /// Create a controller from configuration
    ///
    /// Configured addresses are registered in order, which skips the scan.
    pub fn with_config(bus: BUS, config: &NumeralConfig) -> Result<Self, BUS> {
        let mut numerals = Self::new(bus);
        numerals.place_order = config.place_order;
        numerals.pwm_frequency = config.pwm_frequency;

        for &address in &config.addresses {
            numerals.add_device(address)?;
        }
        Ok(numerals)
    }

    /// Give the bus back
    pub fn release(self) -> BUS {
        self.bus
    }

    // ---- Registry ----

    /// Register the numeral at `address`, returning its index
    pub fn add_device(&mut self, address: u8) -> Result<usize, BUS> {
        Ok(self.registry.add(address)?)
    }

    /// Probe the numeral address range and register what answers
    ///
    /// Returns the number of numerals found.
    pub fn scan(&mut self) -> Result<usize, BUS> {
        Ok(self.registry.scan(&mut self.bus)?)
    }

    /// Scan if nothing is registered, then bring every numeral up
    ///
    /// Per numeral: software reset, write the on/off and PWM shadow state,
    /// set the PWM frequency and leave shutdown. Stops at the first failure.
    pub fn setup(&mut self) -> Result<(), BUS> {
        if self.registry.is_empty() {
            self.scan()?;
        }

        if self.registry.is_empty() {
            #[cfg(feature = "defmt")]
            defmt::warn!("no numerals found");
            return Ok(());
        }

        for index in 0..self.registry.len() {
            let frequency = self.pwm_frequency;
            let (device, bus) = self.split(index)?;

            bus_error(device, Self::bring_up(device, bus, frequency))?;

            #[cfg(feature = "defmt")]
            defmt::info!("numeral {} ready at {=u8:#x}", index, device.address());
        }

        Ok(())
    }

    fn bring_up(
        device: &Is31fl3235a,
        bus: &mut BUS,
        frequency: PwmFrequency,
    ) -> core::result::Result<(), BUS::Error> {
        device.software_reset(bus)?;
        device.flush_leds(bus)?;
        device.flush_pwm(bus)?;
        device.set_pwm_frequency(bus, frequency)?;
        device.power(bus, true)
    }

    /// Number of registered numerals
    pub fn count(&self) -> usize {
        self.registry.len()
    }

    /// Registered addresses, in registry order
    pub fn addresses(&self) -> Vec<u8, MAX_NUMERALS> {
        self.registry.addresses()
    }

    pub fn place_order(&self) -> PlaceOrder {
        self.place_order
    }

    pub fn set_place_order(&mut self, order: PlaceOrder) {
        self.place_order = order;
    }

    /// Shadow PWM values of a numeral
    pub fn pwm(&self, index: usize) -> Option<&[u8; CHANNEL_COUNT]> {
        self.registry.get(index).map(|d| d.state().pwm.values())
    }

    /// Shadow on/off mask of a numeral
    pub fn leds(&self, index: usize) -> Option<&[u8; CHANNEL_COUNT]> {
        self.registry.get(index).map(|d| d.state().leds.values())
    }

    // ---- Register I/O ----

    /// Write one byte to one register of a numeral
    pub fn write_register(&mut self, index: usize, register: u8, value: u8) -> Result<(), BUS> {
        let (device, bus) = self.split(index)?;
        bus_error(device, device.write_register(bus, register, value))
    }

    /// Enter (`false`) or leave (`true`) software shutdown
    pub fn power(&mut self, index: usize, on: bool) -> Result<(), BUS> {
        let (device, bus) = self.split(index)?;
        bus_error(device, device.power(bus, on))
    }

    /// Write the on/off shadow state of a numeral
    pub fn flush_leds(&mut self, index: usize) -> Result<(), BUS> {
        let (device, bus) = self.split(index)?;
        bus_error(device, device.flush_leds(bus))
    }

    /// Write and latch the PWM shadow state of a numeral
    pub fn flush_pwm(&mut self, index: usize) -> Result<(), BUS> {
        let (device, bus) = self.split(index)?;
        bus_error(device, device.flush_pwm(bus))
    }

    /// Write all shadow state of every numeral
    ///
    /// Use after batching [`set_segment`](Self::set_segment) or
    /// [`set_channel_enabled`](Self::set_channel_enabled) calls.
    pub fn update(&mut self) -> Result<(), BUS> {
        for index in 0..self.registry.len() {
            self.flush_leds(index)?;
            self.flush_pwm(index)?;
        }
        Ok(())
    }

    pub fn set_pwm_frequency(&mut self, index: usize, frequency: PwmFrequency) -> Result<(), BUS> {
        let (device, bus) = self.split(index)?;
        bus_error(device, device.set_pwm_frequency(bus, frequency))
    }

    /// Enable outputs, or force every output of the numeral off
    pub fn set_global_enable(&mut self, index: usize, enabled: bool) -> Result<(), BUS> {
        let (device, bus) = self.split(index)?;
        bus_error(device, device.set_global_enable(bus, enabled))
    }

    /// Software reset a numeral and drop its shadow state back to defaults
    ///
    /// The chip comes back in shutdown; call [`power`](Self::power) after.
    pub fn reset(&mut self, index: usize) -> Result<(), BUS> {
        self.device_mut(index)?.reset_state();
        let (device, bus) = self.split(index)?;
        bus_error(device, device.software_reset(bus))
    }

    // ---- Segments and digits ----

    /// Set the color of one segment (0-7, 7 is the decimal point)
    ///
    /// Only the shadow state changes. Nothing is written to the bus until a
    /// flush, a digit write or [`update`](Self::update).
    pub fn set_segment(&mut self, index: usize, segment: u8, color: Rgb) -> Result<(), BUS> {
        let segment = Segment::try_from(segment)?;
        self.device_mut(index)?.set_segment(segment, color);
        Ok(())
    }

    /// Turn a channel output on or off in the shadow state
    pub fn set_channel_enabled(&mut self, index: usize, channel: u8, on: bool) -> Result<(), BUS> {
        self.device_mut(index)?.set_channel_enabled(channel, on)?;
        Ok(())
    }

    /// Show a digit (0-9, 10 for blank) on one numeral
    ///
    /// Lit segments get `color`, the rest of A-G go dark. The decimal point
    /// keeps its color. The PWM state is written and latched.
    pub fn write_digit(&mut self, index: usize, digit: u8, color: Rgb) -> Result<(), BUS> {
        let digit = Digit::try_from(digit)?;
        self.show_digit(index, digit, color)
    }

    /// Color the decimal point of one numeral and write the PWM state
    pub fn set_decimal_point(&mut self, index: usize, color: Rgb) -> Result<(), BUS> {
        self.device_mut(index)?
            .set_segment(Segment::DecimalPoint, color);
        self.flush_pwm(index)
    }

    /// Turn every segment of one numeral off, decimal point included
    pub fn clear(&mut self, index: usize) -> Result<(), BUS> {
        let device = self.device_mut(index)?;
        for segment in Segment::ALL {
            device.set_segment(segment, Rgb::OFF);
        }
        self.flush_pwm(index)
    }

    /// Turn every segment of every numeral off
    pub fn clear_all(&mut self) -> Result<(), BUS> {
        for index in 0..self.registry.len() {
            self.clear(index)?;
        }
        Ok(())
    }

    // ---- Numbers ----

    /// Show a value across the chain, one digit per numeral
    ///
    /// Only the last four decimal digits of `value` are shown. The place
    /// order decides which numeral gets which place. Places without a
    /// numeral are dropped. Does nothing when no numeral is registered.
    pub fn write_number(&mut self, value: u32, color: Rgb) -> Result<(), BUS> {
        let digits = Digits::from_value(value);
        let count = self.registry.len();

        for (place, digit) in digits.iter() {
            if let Some(index) = self.place_order.device_for_place(place, count) {
                self.show_digit(index, digit, color)?;
            }
        }
        Ok(())
    }

    fn show_digit(&mut self, index: usize, digit: Digit, color: Rgb) -> Result<(), BUS> {
        let device = self.device_mut(index)?;
        for segment in Segment::DIGIT {
            let color = if digit.is_lit(segment) { color } else { Rgb::OFF };
            device.set_segment(segment, color);
        }
        self.flush_pwm(index)
    }

    fn split(&mut self, index: usize) -> Result<(&Is31fl3235a, &mut BUS), BUS> {
        let device = self
            .registry
            .get(index)
            .ok_or(NumeralError::InvalidDevice(index))?;
        Ok((device, &mut self.bus))
    }

    fn device_mut(&mut self, index: usize) -> Result<&mut Is31fl3235a, BUS> {
        self.registry
            .get_mut(index)
            .ok_or(NumeralError::InvalidDevice(index))
    }
}

/// Wrap a failed transaction of `device` as [`NumeralError::Bus`]
fn bus_error<E>(
    device: &Is31fl3235a,
    result: core::result::Result<(), E>,
) -> core::result::Result<(), NumeralError<E>> {
    result.map_err(|e| {
        #[cfg(feature = "defmt")]
        defmt::warn!("numeral {=u8:#x} write failed", device.address());
        #[cfg(not(feature = "defmt"))]
        let _ = device;
        NumeralError::Bus(e)
    })
}
