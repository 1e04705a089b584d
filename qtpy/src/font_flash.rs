//! BDF font resource stored in external flash.
//!
//! The font is flashed separately from the program, e.g.
//!
//! ```bash
//! probe-rs download --chip RP2040 --binary-format bin --base-address 0x10100000 fonts/Arial_Bold_12.bdf
//! ```
//!
//! Erased flash reads as `0xFF`, so a board without a font reports the
//! resource as absent and the built-in font is used.

use embassy_rp::Peri;
use embassy_rp::flash::{Blocking, Flash};
use embassy_rp::peripherals::FLASH;
use oled_pulse_common::fonts::trim_flash_region;
use static_cell::StaticCell;

/// Total flash on the QT Py RP2040 (8 MB).
pub const FLASH_SIZE: usize = 8 * 1024 * 1024;

/// Offset of the font region from the start of flash (XIP `0x1010_0000`).
pub const FONT_OFFSET: u32 = 0x10_0000;

/// Maximum font size.
pub const FONT_REGION_SIZE: usize = 64 * 1024;

/// RAM copy of the font region. The parsed font borrows from it.
static FONT_BUFFER: StaticCell<[u8; FONT_REGION_SIZE]> = StaticCell::new();

/// Read the font region. Returns `None` if it is erased or unreadable.
///
/// # Panics
/// Panics if called more than once.
pub fn read_font(flash: Peri<'static, FLASH>) -> Option<&'static [u8]> {
    let buffer = FONT_BUFFER.init([0xFF; FONT_REGION_SIZE]);
    let mut flash = Flash::<_, Blocking, FLASH_SIZE>::new_blocking(flash);

    if let Err(err) = flash.blocking_read(FONT_OFFSET, buffer) {
        defmt::warn!("Font region read failed: {}", err);
        return None;
    }

    let region: &'static [u8] = buffer;
    trim_flash_region(region)
}
