//! Shared code for the SSD1327 OLED pulse demo.
//!
//! This crate contains the platform-agnostic parts used by both the desktop
//! simulator and the QT Py RP2040 firmware:
//!
//! - [`config`]: Display geometry, bus address and animation constants
//! - [`colors`]: Gray4 color constants for the panel
//! - [`styles`]: Pre-computed text styles and the built-in fallback font
//! - [`tile`]: Palette-indexed bitmap, grayscale palette and tile grid
//! - [`pulse`]: The radial brightness pulse animation
//! - [`labels`]: Static text labels
//! - [`group`]: Ordered display group of labels and tile grids
//! - [`scene`]: Composition of the demo screen
//! - [`fonts`]: BDF font loading with built-in fallback
//! - [`framebuffer`]: 4-bit packed framebuffer (`DrawTarget`)
//! - [`ssd1327`]: Async I2C driver for the SSD1327 controller
//! - [`profiling`]: Frame timing statistics for the heartbeat log
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test -p oled-pulse-common
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`), allowing use of the standard
//! test framework while the firmware links the crate as `no_std`.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod colors;
pub mod config;
pub mod error;
pub mod fonts;
pub mod framebuffer;
pub mod group;
pub mod labels;
pub mod profiling;
pub mod pulse;
pub mod scene;
pub mod ssd1327;
pub mod styles;
pub mod tile;

// Re-export commonly used items
pub use error::{FontError, GroupFull};
pub use fonts::LabelFont;
pub use framebuffer::Framebuffer;
pub use group::Group;
pub use pulse::PulseAnimation;
pub use ssd1327::Ssd1327;
pub use tile::{Bitmap, Palette, TileGrid};
