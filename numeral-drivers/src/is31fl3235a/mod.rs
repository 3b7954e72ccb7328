//! IS31FL3235A 28-channel LED driver
//!
//! Each numeral carries one IS31FL3235A. The driver keeps a shadow copy of
//! the per-channel on/off and PWM registers and writes whole banks at once.
//!
//! # Register writes
//!
//! Every write is a single I2C transaction: the register address followed by
//! one or more data bytes. The chip auto-increments the register address, so
//! a bank is written as `[base, ch0, ch1, ..., ch27]`.
//!
//! PWM registers are double buffered: new duty values only reach the outputs
//! after a write of 0 to the update register.

mod state;

pub use state::{RegisterBank, State, FRAME_LEN};

use numeral_core::{PwmFrequency, Rgb, Segment, CHANNEL_COUNT};
use numeral_hal::I2cBus;

/// IS31FL3235A register addresses
pub mod reg {
    /// Software shutdown (0 = shutdown, 1 = normal operation)
    pub const SHUTDOWN: u8 = 0x00;
    /// PWM duty for OUT1, OUT2-OUT28 follow at 0x06-0x20
    pub const PWM_BASE: u8 = 0x05;
    /// Write 0 to load the PWM registers into the outputs
    pub const PWM_UPDATE: u8 = 0x25;
    /// On/off for OUT1, OUT2-OUT28 follow at 0x2B-0x45
    pub const LED_CONTROL_BASE: u8 = 0x2a;
    /// Global control (0 = normal, 1 = all outputs off)
    pub const GLOBAL_CONTROL: u8 = 0x4a;
    /// Output frequency (0 = 3 kHz, 1 = 22 kHz)
    pub const PWM_FREQUENCY: u8 = 0x4b;
    /// Write 0 to reset every register to its power-on value
    pub const RESET: u8 = 0x4f;
}

/// Channel index outside 0-27
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidChannel(pub u8);

/// One numeral: its bus address and shadow register state
#[derive(Debug, Clone)]
pub struct Is31fl3235a {
    address: u8,
    state: State,
}

impl Is31fl3235a {
    /// Create a driver for the chip at `address` with default shadow state
    pub fn new(address: u8) -> Self {
        Self {
            address,
            state: State::default(),
        }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Current shadow state
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Put the shadow state back to its defaults (does not touch the chip)
    pub fn reset_state(&mut self) {
        self.state = State::default();
    }

    /// Set the shadow PWM of a segment's three channels, gamma corrected
    pub fn set_segment(&mut self, segment: Segment, color: Rgb) {
        let channels = segment.channels();
        let pwm = color.gamma_corrected();

        // Every mapped channel is below CHANNEL_COUNT
        self.state.pwm.set(channels.red as usize, pwm.r);
        self.state.pwm.set(channels.green as usize, pwm.g);
        self.state.pwm.set(channels.blue as usize, pwm.b);
    }

    /// Set a channel's shadow on/off bit
    pub fn set_channel_enabled(&mut self, channel: u8, on: bool) -> Result<(), InvalidChannel> {
        if channel as usize >= CHANNEL_COUNT {
            return Err(InvalidChannel(channel));
        }
        self.state.leds.set(channel as usize, on as u8);
        Ok(())
    }

    /// Write one byte to one register
    pub fn write_register<BUS: I2cBus>(
        &self,
        bus: &mut BUS,
        register: u8,
        value: u8,
    ) -> Result<(), BUS::Error> {
        bus.write(self.address, &[register, value])
    }

    /// Write the whole on/off bank
    pub fn flush_leds<BUS: I2cBus>(&self, bus: &mut BUS) -> Result<(), BUS::Error> {
        bus.write(self.address, &self.state.leds.frame())
    }

    /// Write the whole PWM bank, then latch it into the outputs
    pub fn flush_pwm<BUS: I2cBus>(&self, bus: &mut BUS) -> Result<(), BUS::Error> {
        bus.write(self.address, &self.state.pwm.frame())?;
        self.write_register(bus, reg::PWM_UPDATE, 0x00)
    }

    /// Leave (`true`) or enter (`false`) software shutdown
    pub fn power<BUS: I2cBus>(&self, bus: &mut BUS, on: bool) -> Result<(), BUS::Error> {
        self.write_register(bus, reg::SHUTDOWN, on as u8)
    }

    /// Reset every chip register to its power-on default
    pub fn software_reset<BUS: I2cBus>(&self, bus: &mut BUS) -> Result<(), BUS::Error> {
        self.write_register(bus, reg::RESET, 0x00)
    }

    pub fn set_pwm_frequency<BUS: I2cBus>(
        &self,
        bus: &mut BUS,
        frequency: PwmFrequency,
    ) -> Result<(), BUS::Error> {
        self.write_register(bus, reg::PWM_FREQUENCY, frequency.register_value())
    }

    /// Enable outputs (`true`) or force them all off (`false`)
    pub fn set_global_enable<BUS: I2cBus>(
        &self,
        bus: &mut BUS,
        enabled: bool,
    ) -> Result<(), BUS::Error> {
        self.write_register(bus, reg::GLOBAL_CONTROL, (!enabled) as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    const ADDRESS: u8 = 0x3c;

    #[test]
    fn test_write_register() {
        let mut bus = FakeI2cBus::with_devices(&[ADDRESS]);
        let chip = Is31fl3235a::new(ADDRESS);

        chip.power(&mut bus, true).unwrap();
        chip.power(&mut bus, false).unwrap();
        chip.software_reset(&mut bus).unwrap();
        chip.set_pwm_frequency(&mut bus, PwmFrequency::Khz22).unwrap();
        chip.set_global_enable(&mut bus, false).unwrap();
        chip.set_global_enable(&mut bus, true).unwrap();

        let expected: [[u8; 2]; 6] = [
            [0x00, 0x01],
            [0x00, 0x00],
            [0x4f, 0x00],
            [0x4b, 0x01],
            [0x4a, 0x01],
            [0x4a, 0x00],
        ];
        assert_eq!(bus.transactions.len(), expected.len());
        for (transaction, expected) in bus.transactions.iter().zip(expected.iter()) {
            assert_eq!(transaction.address, ADDRESS);
            assert_eq!(transaction.data.as_slice(), expected);
        }
    }

    #[test]
    fn test_flush_pwm_writes_bank_then_latch() {
        let mut bus = FakeI2cBus::with_devices(&[ADDRESS]);
        let mut chip = Is31fl3235a::new(ADDRESS);

        chip.set_segment(Segment::A, Rgb::new(255, 0, 128));
        chip.flush_pwm(&mut bus).unwrap();

        assert_eq!(bus.transactions.len(), 2);

        let bank = &bus.transactions[0].data;
        assert_eq!(bank.len(), FRAME_LEN);
        assert_eq!(bank[0], reg::PWM_BASE);
        // A is OUT17 (red), OUT16 (green), OUT15 (blue)
        assert_eq!(bank[17], 255);
        assert_eq!(bank[16], 0);
        assert_eq!(bank[15], 37);

        assert_eq!(bus.transactions[1].data.as_slice(), &[0x25, 0x00]);
    }

    #[test]
    fn test_flush_leds() {
        let mut bus = FakeI2cBus::with_devices(&[ADDRESS]);
        let mut chip = Is31fl3235a::new(ADDRESS);

        chip.set_channel_enabled(0, false).unwrap();
        chip.flush_leds(&mut bus).unwrap();

        let mut expected = [1u8; FRAME_LEN];
        expected[0] = reg::LED_CONTROL_BASE;
        expected[1] = 0;
        assert_eq!(bus.transactions[0].data.as_slice(), &expected);
    }

    #[test]
    fn test_set_channel_enabled_rejects_unknown_channel() {
        let mut chip = Is31fl3235a::new(ADDRESS);

        assert_eq!(chip.set_channel_enabled(27, false), Ok(()));
        assert_eq!(chip.state().leds.get(27), Some(0));

        assert_eq!(chip.set_channel_enabled(28, false), Err(InvalidChannel(28)));
        assert_eq!(chip.set_channel_enabled(u8::MAX, true), Err(InvalidChannel(255)));
        assert!(chip.state().leds.values()[..27].iter().all(|v| *v == 1));
    }

    #[test]
    fn test_set_segment_is_shadow_only() {
        let mut chip = Is31fl3235a::new(ADDRESS);

        chip.set_segment(Segment::DecimalPoint, Rgb::WHITE);

        let pwm = chip.state().pwm.values();
        assert_eq!(pwm[22], 255);
        assert_eq!(pwm[23], 255);
        assert_eq!(pwm[24], 255);
        assert_eq!(pwm.iter().filter(|v| **v != 0).count(), 3);

        chip.reset_state();
        assert_eq!(chip.state(), &State::default());
    }

    #[test]
    fn test_bus_error_propagates() {
        let mut bus = FakeI2cBus::new();
        let chip = Is31fl3235a::new(ADDRESS);

        assert_eq!(chip.flush_pwm(&mut bus), Err(FakeI2cError::Nack));
        // The latch is not attempted after a failed bank write
        assert_eq!(bus.transactions.len(), 1);
    }
}
