//! Numeral counter firmware
//!
//! Counts up on a chain of Numeral displays hanging off I2C0 of an RP2040
//! (GPIO4 = SDA, GPIO5 = SCL). The chain is described by `numerals.toml`,
//! which is compiled in.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::i2c::{self, I2c};
use embassy_time::Timer;
use {defmt_rtt as _, panic_probe as _};

use numeral_core::config::{parse_config, NumeralConfig};
use numeral_core::digit::DISPLAY_MODULUS;
use numeral_drivers::Numerals;
use numeral_hal::{EmbeddedHalBus, I2cConfig};

/// Embedded configuration (compiled into firmware)
/// Edit numerals.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../numerals.toml");

/// Time between counter steps
const TICK_MS: u64 = 100;

/// Retry interval while the chain fails to come up
const SETUP_RETRY_MS: u64 = 1000;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Numeral firmware starting...");

    let p = embassy_rp::init(Default::default());

    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2cConfig::FAST.frequency;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config);
    info!("I2C0 up at {} Hz", I2cConfig::FAST.frequency);

    let config = load_config();
    let color = config.color;

    let mut numerals = match Numerals::with_config(EmbeddedHalBus::new(i2c), &config) {
        Ok(numerals) => numerals,
        Err(e) => {
            // parse_config already rejects what with_config would
            error!("Invalid numeral configuration: {}", e);
            halt().await
        }
    };

    while let Err(e) = numerals.setup() {
        error!("Numeral setup failed: {}, retrying", e);
        Timer::after_millis(SETUP_RETRY_MS).await;
    }

    if numerals.count() == 0 {
        warn!("No numerals on the bus, nothing to show");
        halt().await
    }
    info!(
        "{} numeral(s) at {:#x}",
        numerals.count(),
        numerals.addresses().as_slice()
    );

    let mut counter: u32 = 0;
    loop {
        if let Err(e) = numerals.write_number(counter, color) {
            warn!("Failed to show {}: {}", counter, e);
        }

        counter = (counter + 1) % DISPLAY_MODULUS;
        Timer::after_millis(TICK_MS).await;
    }
}

/// Parse the embedded configuration
///
/// build.rs validates numerals.toml, so a failure here means the parser and
/// the build check disagree. Fall back to scanning with defaults.
fn load_config() -> NumeralConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {}", e);
            error!("Using default configuration");
            NumeralConfig::default()
        }
    }
}

/// Park forever
async fn halt() -> ! {
    loop {
        Timer::after_secs(60).await;
        trace!("Halted");
    }
}
