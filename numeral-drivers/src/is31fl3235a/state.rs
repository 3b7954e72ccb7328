//! Shadow copies of the on/off and PWM register banks

use numeral_core::CHANNEL_COUNT;

use super::reg;

/// Bytes in a bank write: start register followed by one byte per channel
pub const FRAME_LEN: usize = CHANNEL_COUNT + 1;

/// In-memory copy of a bank of 28 consecutive per-channel registers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterBank {
    base: u8,
    values: [u8; CHANNEL_COUNT],
}

impl RegisterBank {
    /// Bank starting at register `base`, every channel set to `fill`
    pub const fn new(base: u8, fill: u8) -> Self {
        Self {
            base,
            values: [fill; CHANNEL_COUNT],
        }
    }

    /// First register of the bank
    pub fn base(&self) -> u8 {
        self.base
    }

    pub fn get(&self, channel: usize) -> Option<u8> {
        self.values.get(channel).copied()
    }

    /// Set one channel, returning its previous value
    ///
    /// `None` and no change if the channel is past the end.
    pub fn set(&mut self, channel: usize, value: u8) -> Option<u8> {
        self.values
            .get_mut(channel)
            .map(|slot| core::mem::replace(slot, value))
    }

    pub fn values(&self) -> &[u8; CHANNEL_COUNT] {
        &self.values
    }

    /// The whole bank as one auto-incrementing write
    pub fn frame(&self) -> [u8; FRAME_LEN] {
        let mut frame = [0u8; FRAME_LEN];
        frame[0] = self.base;
        frame[1..].copy_from_slice(&self.values);
        frame
    }
}

/// Shadow state of one IS31FL3235A
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    /// On/off mask, one register per channel (0 or 1)
    pub leds: RegisterBank,
    /// PWM duty, one register per channel
    pub pwm: RegisterBank,
}

impl Default for State {
    // Every output enabled and dark
    fn default() -> Self {
        Self {
            leds: RegisterBank::new(reg::LED_CONTROL_BASE, 1),
            pwm: RegisterBank::new(reg::PWM_BASE, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = State::default();
        assert_eq!(state.leds.base(), 0x2a);
        assert!(state.leds.values().iter().all(|v| *v == 1));
        assert_eq!(state.pwm.base(), 0x05);
        assert!(state.pwm.values().iter().all(|v| *v == 0));
    }

    #[test]
    fn test_frame_layout() {
        let mut bank = RegisterBank::new(reg::PWM_BASE, 0);
        assert_eq!(bank.set(0, 0x11), Some(0));
        assert_eq!(bank.set(27, 0x22), Some(0));

        let frame = bank.frame();
        assert_eq!(frame.len(), 29);
        assert_eq!(frame[0], 0x05);
        assert_eq!(frame[1], 0x11);
        assert_eq!(frame[28], 0x22);
        assert!(frame[2..28].iter().all(|v| *v == 0));
    }

    #[test]
    fn test_out_of_range_channel() {
        let mut bank = RegisterBank::new(reg::PWM_BASE, 0);
        assert_eq!(bank.set(28, 0xff), None);
        assert_eq!(bank.get(28), None);
        assert_eq!(bank, RegisterBank::new(reg::PWM_BASE, 0));
    }
}
