//! SSD1327 OLED pulse demo firmware for the Adafruit QT Py RP2040.
//!
//! Drives the Adafruit 1.5" 128x128 grayscale OLED over the STEMMA QT I2C
//! connector: five static info labels and an animated radial pulse below
//! them.
//!
//! # Architecture
//!
//! A single embassy task does everything:
//! - Bring-up: I2C, panel init, font selection, full-screen draw and flush
//! - Loop: render pulse, draw tile grid, flush the 32x32 window, advance, sleep
//!
//! Only the pulse window (512 bytes) crosses the bus each frame; the labels
//! stay in panel GDDRAM from the initial full flush.
//!
//! # Features
//!
//! - `addr-3c`: panel at I2C address 0x3C instead of 0x3D
//! - `i2c-1mhz`: run the bus at 1 MHz instead of 400 kHz

#![no_std]
#![no_main]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]

mod display;
mod font_flash;

use defmt::{info, warn};
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C1;
use embassy_time::{Instant, Timer};
use oled_pulse_common::config::FRAME_DELAY_MS;
use oled_pulse_common::profiling::FrameStats;
use oled_pulse_common::scene::compose_main_group;
use oled_pulse_common::{Framebuffer, LabelFont, Palette, PulseAnimation, Ssd1327};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use crate::display::{I2C_FREQUENCY, PANEL_ADDRESS, display_i2c_config};

bind_interrupts!(struct Irqs {
    I2C1_IRQ => i2c::InterruptHandler<I2C1>;
});

/// Grayscale lookup table shared by every tile grid.
static PALETTE: Palette = Palette::grayscale();

/// Full-screen framebuffer (8 KiB), kept out of the task future.
static FRAMEBUFFER: StaticCell<Framebuffer> = StaticCell::new();

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("OLED pulse demo starting...");

    let p = embassy_rp::init(Default::default());

    // STEMMA QT: SCL = GPIO23, SDA = GPIO22
    let bus = I2c::new_async(p.I2C1, p.PIN_23, p.PIN_22, Irqs, display_i2c_config());
    info!("I2C1 at {} Hz, panel address {=u8:#x}", I2C_FREQUENCY, PANEL_ADDRESS);

    let mut panel = Ssd1327::new(bus, PANEL_ADDRESS);
    panel.init().await.expect("SSD1327 init failed");
    info!("Display initialized");

    let (font, font_error) = LabelFont::load_or_fallback(font_flash::read_font(p.FLASH));
    match font_error {
        None => info!("Using BDF font from flash"),
        Some(err) => warn!("BDF font unavailable ({}), using built-in font", err),
    }

    let group = compose_main_group(&PALETTE).expect("main group fits");
    let pulse_area = group.tile_area().expect("main group has a tile grid");
    let framebuffer = FRAMEBUFFER.init(Framebuffer::new());
    let mut pulse = PulseAnimation::new();

    group.draw(framebuffer, &font, pulse.bitmap()).ok();
    panel.flush(framebuffer).await.expect("initial flush failed");

    info!("Entering main loop");
    let mut stats = FrameStats::new();

    loop {
        let render_start = Instant::now();
        pulse.render();
        group.draw_tiles(framebuffer, pulse.bitmap()).ok();
        let render_us = render_start.elapsed().as_micros() as u32;

        let flush_start = Instant::now();
        panel
            .flush_area(framebuffer, &pulse_area)
            .await
            .expect("pulse flush failed");
        let flush_us = flush_start.elapsed().as_micros() as u32;

        pulse.advance();

        if stats.record(render_us, flush_us) {
            info!(
                "frame {}: render {} us (max {}), flush {} us (max {})",
                stats.frames(),
                stats.render_us(),
                stats.max_render_us(),
                stats.flush_us(),
                stats.max_flush_us()
            );
        }

        Timer::after_millis(FRAME_DELAY_MS).await;
    }
}
