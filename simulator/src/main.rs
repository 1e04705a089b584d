//! SSD1327 OLED pulse demo simulator for Windows/Desktop.
//!
//! Renders the same scene and animation as the firmware into the same packed
//! [`Framebuffer`], then copies it to an `embedded-graphics-simulator`
//! window. The external font is read from [`FONT_PATH`] relative to the
//! working directory; when it is missing or unusable the built-in font is
//! used instead.
//!
//! Close the window to exit.

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod timing;

use std::time::Instant;
use std::{fs, io, thread};

use embedded_graphics::pixelcolor::Gray4;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use oled_pulse_common::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use oled_pulse_common::fonts::FONT_PATH;
use oled_pulse_common::profiling::FrameStats;
use oled_pulse_common::scene::compose_main_group;
use oled_pulse_common::{Framebuffer, LabelFont, Palette, PulseAnimation};

use crate::timing::{FRAME_DELAY, elapsed_us};

/// Grayscale lookup table shared by every tile grid.
static PALETTE: Palette = Palette::grayscale();

fn main() {
    let font_file = read_font_file();
    let (font, font_error) = LabelFont::load_or_fallback(font_file.as_deref());
    match font_error {
        None => println!("Loaded font {FONT_PATH}"),
        Some(err) => eprintln!("Font {FONT_PATH} unusable ({err}), using built-in font"),
    }

    let group = compose_main_group(&PALETTE).expect("main group fits");
    let pulse_area = group.tile_area().expect("main group has a tile grid");
    let mut framebuffer = Framebuffer::new();
    let mut pulse = PulseAnimation::new();

    // Labels are drawn once; the loop only touches the pulse area.
    group.draw(&mut framebuffer, &font, pulse.bitmap()).ok();

    let mut display: SimulatorDisplay<Gray4> = SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().scale(4).build();
    let mut window = Window::new("SSD1327 128x128 Pulse", &output_settings);

    display.draw_iter(framebuffer.pixels()).ok();
    window.update(&display);

    let mut stats = FrameStats::new();

    loop {
        if window.events().any(|event| matches!(event, SimulatorEvent::Quit)) {
            println!("Window closed after {} frames", stats.frames());
            return;
        }

        let render_start = Instant::now();
        pulse.render();
        group.draw_tiles(&mut framebuffer, pulse.bitmap()).ok();
        let render_us = elapsed_us(render_start);

        let flush_start = Instant::now();
        copy_area(&framebuffer, &mut display, &pulse_area);
        window.update(&display);
        let flush_us = elapsed_us(flush_start);

        pulse.advance();

        if stats.record(render_us, flush_us) {
            println!(
                "frame {}: render {} us (max {}), flush {} us (max {})",
                stats.frames(),
                stats.render_us(),
                stats.max_render_us(),
                stats.flush_us(),
                stats.max_flush_us()
            );
        }

        thread::sleep(FRAME_DELAY);
    }
}

/// Read the external font, or `None` if it cannot be read.
fn read_font_file() -> Option<Vec<u8>> {
    match fs::read(FONT_PATH) {
        Ok(bytes) => Some(bytes),
        Err(err) if err.kind() == io::ErrorKind::NotFound => None,
        Err(err) => {
            eprintln!("Failed to read {FONT_PATH}: {err}");
            None
        }
    }
}

/// Copy `area` from the framebuffer to the simulator display.
///
/// The simulator's counterpart of a windowed panel flush.
fn copy_area(
    framebuffer: &Framebuffer,
    display: &mut SimulatorDisplay<Gray4>,
    area: &Rectangle,
) {
    let pixels = area.points().filter_map(|p| {
        framebuffer
            .pixel(p.x as usize, p.y as usize)
            .map(|color| Pixel(p, color))
    });
    display.draw_iter(pixels).ok();
}
