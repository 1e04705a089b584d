//! Timing helpers for the simulator.
//!
//! These use `std::time` which is not available in `no_std` environments, so
//! they are defined here rather than in the common crate.

use std::time::{Duration, Instant};

use oled_pulse_common::config::FRAME_DELAY_MS;

/// Pause between redraws.
pub const FRAME_DELAY: Duration = Duration::from_millis(FRAME_DELAY_MS);

/// Microseconds since `start`, saturating at `u32::MAX`.
pub fn elapsed_us(start: Instant) -> u32 { u32::try_from(start.elapsed().as_micros()).unwrap_or(u32::MAX) }
