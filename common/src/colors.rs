//! Color constants for the SSD1327 panel.
//!
//! The SSD1327 stores 4 bits per pixel, so everything that reaches the panel
//! is a [`Gray4`] (16 levels). Full 24-bit palette entries are reduced to
//! Gray4 by [`gray4_from_rgb`].

use embedded_graphics::pixelcolor::{Gray4, GrayColor};

/// Pixel off.
pub const BLACK: Gray4 = Gray4::BLACK;

/// Brightest level. Equivalent of 0xFFFFFF on this panel.
pub const WHITE: Gray4 = Gray4::WHITE;

/// Color of every static text label.
pub const LABEL_COLOR: Gray4 = WHITE;

/// Reduce a 0xRRGGBB color to the panel's 16 gray levels.
///
/// Uses integer Rec. 601 luma weights, then keeps the top 4 bits.
pub const fn gray4_from_rgb(rgb: u32) -> Gray4 {
    let r = (rgb >> 16) & 0xFF;
    let g = (rgb >> 8) & 0xFF;
    let b = rgb & 0xFF;
    let luma = (r * 299 + g * 587 + b * 114) / 1000;
    Gray4::new((luma >> 4) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gray4_extremes() {
        assert_eq!(gray4_from_rgb(0x000000), BLACK);
        assert_eq!(gray4_from_rgb(0xFFFFFF), WHITE);
    }

    #[test]
    fn test_gray4_keeps_top_nibble_of_gray() {
        assert_eq!(gray4_from_rgb(0x808080).luma(), 8);
        assert_eq!(gray4_from_rgb(0x0F0F0F).luma(), 0);
        assert_eq!(gray4_from_rgb(0x101010).luma(), 1);
    }
}
