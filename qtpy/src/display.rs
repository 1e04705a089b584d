//! Display bus configuration for the Adafruit 1.5" 128x128 SSD1327 OLED.
//!
//! The panel hangs off the QT Py RP2040 STEMMA QT connector:
//! - SDA: GPIO22 (I2C1 SDA)
//! - SCL: GPIO23 (I2C1 SCL)
//! - Reset: Tied to the module's power-on reset

use embassy_rp::i2c::Config as I2cConfig;

/// I2C clock for the display bus.
#[cfg(not(feature = "i2c-1mhz"))]
pub const I2C_FREQUENCY: u32 = 400_000;
#[cfg(feature = "i2c-1mhz")]
pub const I2C_FREQUENCY: u32 = 1_000_000;

/// 7-bit address of the panel.
#[cfg(not(feature = "addr-3c"))]
pub const PANEL_ADDRESS: u8 = oled_pulse_common::config::DISPLAY_ADDRESS;
#[cfg(feature = "addr-3c")]
pub const PANEL_ADDRESS: u8 = oled_pulse_common::config::ALT_DISPLAY_ADDRESS;

/// I2C configuration for the SSD1327 panel.
pub fn display_i2c_config() -> I2cConfig {
    let mut config = I2cConfig::default();
    config.frequency = I2C_FREQUENCY;
    config
}
