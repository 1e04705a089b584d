//! Radial brightness pulse animation.
//!
//! Every frame, each pixel of the square pulse bitmap is set to
//!
//! ```text
//! brightness = trunc(127 + 127 * sin(distance / RING_SPACING - frame / PHASE_SPEED)) mod 256
//! ```
//!
//! where `distance` is the Euclidean distance from the pixel to the grid
//! center. As `frame` grows the rings drift outward from the center.
//!
//! # Performance Considerations
//!
//! `distance / RING_SPACING` never changes, so [`PulseAnimation::new`]
//! computes it once per pixel. A frame then costs one `sin` per pixel
//! (1024 for the 32x32 sprite), which is what dominates render time on the
//! FPU-less RP2040.
//!
//! # Precision
//!
//! The math runs in `f64`. In `f32` the term `frame / PHASE_SPEED` loses its
//! fractional part after a few million frames and the pulse stalls. In `f64`
//! it stays precise over the whole `u32` frame range.
//!
//! # Frame Counter
//!
//! The frame counter advances by [`ANIMATION_SPEED`] per redraw using
//! wrapping arithmetic. It has no upper bound of its own.

use crate::config::{ANIMATION_SPEED, PHASE_SPEED, PULSE_CENTER, PULSE_SIZE, RING_SPACING};
use crate::tile::Bitmap;

/// Bitmap type driven by the pulse animation.
pub type PulseBitmap = Bitmap<PULSE_SIZE, PULSE_SIZE>;

/// Distance from `(x, y)` to the pulse grid center.
#[inline]
pub fn center_distance(
    x: usize,
    y: usize,
) -> f64 {
    let dx = x as i32 - PULSE_CENTER;
    let dy = y as i32 - PULSE_CENTER;
    libm::sqrt(f64::from(dx * dx + dy * dy))
}

/// Ring value for a pre-divided distance (`distance / RING_SPACING`).
#[inline]
fn ring_level(
    ring_phase: f64,
    frame: u32,
) -> u8 {
    let wave = libm::sin(ring_phase - f64::from(frame) / PHASE_SPEED);
    // Truncate toward zero, then wrap into a palette index.
    ((127.0 + 127.0 * wave) as i32).rem_euclid(256) as u8
}

/// Brightness (palette index) of pixel `(x, y)` at `frame`.
///
/// Pure function of its arguments; [`PulseAnimation::render`] produces
/// exactly these values.
pub fn brightness(
    x: usize,
    y: usize,
    frame: u32,
) -> u8 {
    ring_level(center_distance(x, y) / RING_SPACING, frame)
}

/// Owns the pulse bitmap and the frame counter.
pub struct PulseAnimation {
    /// Palette indices shown by the tile grid.
    bitmap: PulseBitmap,

    /// Pre-computed `distance / RING_SPACING` per pixel, indexed `[y][x]`.
    ring_phase: [[f64; PULSE_SIZE]; PULSE_SIZE],

    /// Animation phase counter.
    frame: u32,
}

impl PulseAnimation {
    /// Create the animation at frame 0 with a blank bitmap.
    pub fn new() -> Self {
        let mut ring_phase = [[0.0f64; PULSE_SIZE]; PULSE_SIZE];
        for (y, row) in ring_phase.iter_mut().enumerate() {
            for (x, phase) in row.iter_mut().enumerate() {
                *phase = center_distance(x, y) / RING_SPACING;
            }
        }

        Self {
            bitmap: PulseBitmap::new(),
            ring_phase,
            frame: 0,
        }
    }

    /// Current frame counter.
    #[inline]
    pub const fn frame(&self) -> u32 { self.frame }

    /// Bitmap as of the last [`render`](Self::render).
    #[inline]
    pub const fn bitmap(&self) -> &PulseBitmap { &self.bitmap }

    /// Recompute every pixel for the current frame.
    pub fn render(&mut self) {
        let frame = self.frame;
        for (y, phases) in self.ring_phase.iter().enumerate() {
            for (x, &phase) in phases.iter().enumerate() {
                self.bitmap[(x, y)] = ring_level(phase, frame);
            }
        }
    }

    /// Advance the phase counter by [`ANIMATION_SPEED`].
    #[inline]
    pub fn advance(&mut self) { self.frame = self.frame.wrapping_add(ANIMATION_SPEED); }

    /// Render the current frame, then advance. One loop iteration minus the sleep.
    pub fn step(&mut self) {
        self.render();
        self.advance();
    }
}

impl Default for PulseAnimation {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Brightness computed independently in double precision with std.
    fn expected(
        x: usize,
        y: usize,
        frame: u32,
    ) -> u8 {
        let dx = x as f64 - 16.0;
        let dy = y as f64 - 16.0;
        let wave = ((dx * dx + dy * dy).sqrt() / 3.0 - f64::from(frame) / 5.0).sin();
        ((127.0 + 127.0 * wave) as i32).rem_euclid(256) as u8
    }

    fn expected_center(frame: u32) -> u8 { expected(16, 16, frame) }

    #[test]
    fn test_center_at_frame_zero_is_127() {
        assert_eq!(center_distance(16, 16), 0.0);
        assert_eq!(brightness(16, 16, 0), 127);
    }

    #[test]
    fn test_center_follows_phase_only() {
        for frame in 0..400 {
            assert_eq!(brightness(16, 16, frame), expected_center(frame), "frame {frame}");
        }
    }

    #[test]
    fn test_grid_matches_double_precision_reference() {
        for frame in [0, 1, 7, 1_000_000, 16_777_216, 100_000_002, u32::MAX - 1] {
            for y in 0..PULSE_SIZE {
                for x in 0..PULSE_SIZE {
                    assert_eq!(brightness(x, y, frame), expected(x, y, frame), "({x}, {y}) @ {frame}");
                }
            }
        }
    }

    #[test]
    fn test_pulse_keeps_moving_at_large_frames() {
        assert_eq!(brightness(16, 16, 100_000_002), 184);
        assert_eq!(brightness(16, 16, 100_000_004), 135);

        let mut pulse = PulseAnimation::new();
        pulse.frame = 100_000_002;
        pulse.step();
        let before = pulse.bitmap()[(16, 16)];
        pulse.step();
        assert_ne!(pulse.bitmap()[(16, 16)], before);
    }

    #[test]
    fn test_brightness_is_deterministic() {
        for frame in [0, 1, 2, 17, 1000, u32::MAX] {
            for y in 0..PULSE_SIZE {
                for x in 0..PULSE_SIZE {
                    assert_eq!(brightness(x, y, frame), brightness(x, y, frame));
                }
            }
        }
    }

    #[test]
    fn test_brightness_never_exceeds_254() {
        // 127 + 127 * sin(..) truncates into 0..=254, so the wrap never triggers here.
        for frame in (0..200).step_by(3) {
            for y in 0..PULSE_SIZE {
                for x in 0..PULSE_SIZE {
                    assert!(brightness(x, y, frame) <= 254);
                }
            }
        }
    }

    #[test]
    fn test_distance_is_euclidean() {
        assert_eq!(center_distance(19, 20), 5.0);
        assert_eq!(center_distance(13, 12), 5.0);
        assert_eq!(center_distance(0, 0), 512.0f64.sqrt());
    }

    #[test]
    fn test_rings_are_radially_symmetric() {
        for frame in [0, 10, 33] {
            assert_eq!(brightness(16 + 4, 16, frame), brightness(16 - 4, 16, frame));
            assert_eq!(brightness(16, 16 + 4, frame), brightness(16 - 4, 16, frame));
            assert_eq!(brightness(16 + 3, 16 + 4, frame), brightness(16 - 4, 16 - 3, frame));
        }
    }

    #[test]
    fn test_render_matches_pure_function() {
        let mut pulse = PulseAnimation::new();
        for _ in 0..5 {
            pulse.render();
            let frame = pulse.frame();
            for y in 0..PULSE_SIZE {
                for x in 0..PULSE_SIZE {
                    assert_eq!(pulse.bitmap()[(x, y)], brightness(x, y, frame), "({x}, {y}) @ {frame}");
                }
            }
            pulse.advance();
        }
    }

    #[test]
    fn test_step_advances_by_animation_speed() {
        let mut pulse = PulseAnimation::new();
        assert_eq!(pulse.frame(), 0);
        pulse.step();
        assert_eq!(pulse.frame(), ANIMATION_SPEED);
        pulse.step();
        assert_eq!(pulse.frame(), 2 * ANIMATION_SPEED);
        assert_eq!(pulse.bitmap()[(16, 16)], brightness(16, 16, ANIMATION_SPEED));
    }

    #[test]
    fn test_advance_shifts_phase_by_speed_over_five() {
        // A ring at distance d and frame f + speed shows the value the ring at
        // distance d - 3 * speed / 5 showed at frame f.
        let frame = 10;
        let shift = RING_SPACING * f64::from(ANIMATION_SPEED) / PHASE_SPEED;
        for d in [2.0f64, 5.0, 9.0] {
            let later = ring_level(d / RING_SPACING, frame + ANIMATION_SPEED);
            let earlier = ring_level((d - shift) / RING_SPACING, frame);
            assert!(later.abs_diff(earlier) <= 1, "d={d}: {later} vs {earlier}");
        }
    }

    #[test]
    fn test_frame_counter_wraps() {
        let mut pulse = PulseAnimation::new();
        pulse.frame = u32::MAX;
        pulse.advance();
        assert_eq!(pulse.frame(), ANIMATION_SPEED - 1);
    }

    #[test]
    fn test_pixel_16_16_on_first_frame() {
        let mut pulse = PulseAnimation::new();
        pulse.render();
        assert_eq!(pulse.bitmap()[(16, 16)], 127);
    }
}
