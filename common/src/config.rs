//! Display, layout and animation configuration constants.
//!
//! # Pre-computed Layout Constants
//!
//! Positions such as the pulse tile origin are derived from the screen and
//! sprite sizes at compile time as `const`, so neither the simulator nor the
//! firmware does any layout arithmetic at runtime.

// =============================================================================
// Display Configuration
// =============================================================================

/// Display width in pixels (SSD1327 1.5" module: 128x128).
pub const SCREEN_WIDTH: u32 = 128;

/// Display height in pixels.
pub const SCREEN_HEIGHT: u32 = 128;

/// Default 7-bit I2C address of the SSD1327 module.
pub const DISPLAY_ADDRESS: u8 = 0x3D;

/// Alternate I2C address (address jumper bridged).
pub const ALT_DISPLAY_ADDRESS: u8 = 0x3C;

// =============================================================================
// Label Layout
// =============================================================================

/// Left edge of every text label.
pub const LABEL_X: i32 = 5;

/// Vertical center of the header label.
pub const HEADER_Y: i32 = 10;

/// Vertical distance between label centers.
pub const LINE_SPACING: i32 = 15;

// =============================================================================
// Pulse Sprite Layout
// =============================================================================

/// Side length of the square pulse bitmap.
pub const PULSE_SIZE: usize = 32;

/// Grid center used for ring distances (integer half, as in `size // 2`).
pub const PULSE_CENTER: i32 = (PULSE_SIZE / 2) as i32;

/// Gap between the pulse sprite and the bottom edge of the screen.
pub const PULSE_MARGIN: u32 = 5;

/// Pulse sprite X origin (centered horizontally).
pub const PULSE_X: i32 = ((SCREEN_WIDTH - PULSE_SIZE as u32) / 2) as i32;

/// Pulse sprite Y origin (bottom of the screen, above the margin).
pub const PULSE_Y: i32 = (SCREEN_HEIGHT - PULSE_SIZE as u32 - PULSE_MARGIN) as i32;

// =============================================================================
// Animation
// =============================================================================

/// Distance divisor in the ring function. Larger values = wider rings.
pub const RING_SPACING: f64 = 3.0;

/// Frame divisor in the ring function. Larger values = slower phase drift.
pub const PHASE_SPEED: f64 = 5.0;

/// Frame counter increment per redraw. Higher = faster animation.
pub const ANIMATION_SPEED: u32 = 2;

/// Sleep between redraws in milliseconds. Lower = smoother but more CPU and bus load.
pub const FRAME_DELAY_MS: u64 = 50;

/// Frames between heartbeat log lines (5 s at the nominal frame rate).
pub const HEARTBEAT_INTERVAL: u32 = 100;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulse_origin_is_centered_at_bottom() {
        assert_eq!(PULSE_X, 48);
        assert_eq!(PULSE_Y, 91);
        assert_eq!(PULSE_X as u32 * 2 + PULSE_SIZE as u32, SCREEN_WIDTH);
    }

    #[test]
    fn test_pulse_center() {
        assert_eq!(PULSE_CENTER, 16);
    }

    #[test]
    fn test_pulse_origin_is_byte_aligned() {
        // Two pixels per framebuffer byte, so an even X keeps flush windows tight.
        assert_eq!(PULSE_X % 2, 0);
        assert_eq!(PULSE_SIZE % 2, 0);
    }
}
