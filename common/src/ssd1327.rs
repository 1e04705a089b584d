//! Async I2C driver for the SSD1327 128x128 4-bit grayscale OLED controller.
//!
//! The driver owns the bus and only moves bytes: drawing happens in a
//! [`Framebuffer`], which already holds pixels in GDDRAM order.
//!
//! # Wire Format
//!
//! Every I2C write starts with a control byte:
//!
//! | Control | Payload |
//! |---------|---------|
//! | `0x00` | Command byte followed by its parameters |
//! | `0x40` | GDDRAM data for the current window |
//!
//! Data is sent in writes of at most [`DATA_CHUNK`] bytes so the transfer
//! buffer stays on the stack.
//!
//! # Partial Updates
//!
//! [`Ssd1327::flush_area`] narrows the column/row window to the changed
//! rectangle before streaming. Columns are addressed in bytes (2 pixels), so
//! the window is widened to even pixel boundaries.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_hal_async::i2c::I2c;

use crate::framebuffer::{BYTES_PER_ROW, Framebuffer, HEIGHT};

/// Control byte preceding command bytes.
const CONTROL_COMMAND: u8 = 0x00;
/// Control byte preceding GDDRAM data.
const CONTROL_DATA: u8 = 0x40;

/// Maximum GDDRAM bytes per I2C write (excluding the control byte).
pub const DATA_CHUNK: usize = 128;

/// SSD1327 commands
mod cmd {
    pub const SET_COLUMN_ADDRESS: u8 = 0x15;
    pub const SET_ROW_ADDRESS: u8 = 0x75;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_REMAP: u8 = 0xA0;
    pub const SET_START_LINE: u8 = 0xA1;
    pub const SET_DISPLAY_OFFSET: u8 = 0xA2;
    pub const NORMAL_DISPLAY: u8 = 0xA4;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const FUNCTION_SELECT_A: u8 = 0xAB;
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_PHASE_LENGTH: u8 = 0xB1;
    pub const SET_CLOCK_DIV: u8 = 0xB3;
    pub const SET_SECOND_PRECHARGE: u8 = 0xB6;
    pub const DEFAULT_GRAY_TABLE: u8 = 0xB9;
    pub const SET_PRECHARGE_VOLTAGE: u8 = 0xBC;
    pub const SET_VCOMH: u8 = 0xBE;
    pub const FUNCTION_SELECT_B: u8 = 0xD5;
    pub const SET_COMMAND_LOCK: u8 = 0xFD;
}

/// Default contrast after [`Ssd1327::init`].
pub const DEFAULT_CONTRAST: u8 = 0x80;

/// Power-up sequence for a 128x128 panel.
///
/// Remap `0x51` sets bit 0 (column address remap), bit 4 (COM remap) and
/// bit 6 (COM split odd/even). Bit 1 (nibble remap) stays clear. On this
/// panel that shows the even pixel from the high nibble with row 0 at the top.
const INIT_SEQUENCE: &[&[u8]] = &[
    &[cmd::SET_COMMAND_LOCK, 0x12], // Unlock
    &[cmd::DISPLAY_OFF],
    &[cmd::SET_COLUMN_ADDRESS, 0x00, (BYTES_PER_ROW - 1) as u8],
    &[cmd::SET_ROW_ADDRESS, 0x00, (HEIGHT - 1) as u8],
    &[cmd::SET_CONTRAST, DEFAULT_CONTRAST],
    &[cmd::SET_REMAP, 0x51],
    &[cmd::SET_START_LINE, 0x00],
    &[cmd::SET_DISPLAY_OFFSET, 0x00],
    &[cmd::NORMAL_DISPLAY],
    &[cmd::SET_MUX_RATIO, (HEIGHT - 1) as u8],
    &[cmd::SET_PHASE_LENGTH, 0xF1],
    &[cmd::SET_CLOCK_DIV, 0x00],
    &[cmd::FUNCTION_SELECT_A, 0x01], // Internal VDD regulator
    &[cmd::SET_SECOND_PRECHARGE, 0x0F],
    &[cmd::SET_VCOMH, 0x0F],
    &[cmd::SET_PRECHARGE_VOLTAGE, 0x08],
    &[cmd::FUNCTION_SELECT_B, 0x62],
    &[cmd::DEFAULT_GRAY_TABLE],
    &[cmd::DISPLAY_ON],
];

/// Longest command including parameters.
const MAX_COMMAND_LEN: usize = 3;

/// GDDRAM window in controller units: byte columns and pixel rows, inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    pub first_column: u8,
    pub last_column: u8,
    pub first_row: u8,
    pub last_row: u8,
}

impl Window {
    /// The whole panel.
    pub const FULL: Self = Self {
        first_column: 0,
        last_column: (BYTES_PER_ROW - 1) as u8,
        first_row: 0,
        last_row: (HEIGHT - 1) as u8,
    };

    /// Window covering the on-screen part of `area`, widened to byte columns.
    ///
    /// Returns `None` if `area` is entirely off-screen or empty.
    pub fn covering(area: &Rectangle) -> Option<Self> {
        let screen = Rectangle::new(Point::zero(), Size::new((BYTES_PER_ROW * 2) as u32, HEIGHT as u32));
        let visible = area.intersection(&screen);
        let bottom_right = visible.bottom_right()?;
        Some(Self {
            first_column: (visible.top_left.x / 2) as u8,
            last_column: (bottom_right.x / 2) as u8,
            first_row: visible.top_left.y as u8,
            last_row: bottom_right.y as u8,
        })
    }

    /// Bytes per window row.
    #[inline]
    pub const fn row_len(&self) -> usize { (self.last_column - self.first_column) as usize + 1 }

    /// Total bytes in the window.
    #[inline]
    pub const fn byte_len(&self) -> usize { self.row_len() * (self.last_row - self.first_row + 1) as usize }
}

/// SSD1327 driver over an async I2C bus.
pub struct Ssd1327<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> Ssd1327<I2C>
where
    I2C: I2c,
{
    /// Create a driver for the panel at 7-bit `address`. Sends nothing.
    pub const fn new(
        i2c: I2C,
        address: u8,
    ) -> Self {
        Self { i2c, address }
    }

    /// 7-bit bus address.
    #[inline]
    pub const fn address(&self) -> u8 { self.address }

    /// Give the bus back.
    pub fn release(self) -> I2C { self.i2c }

    /// Run the power-up sequence and turn the panel on.
    pub async fn init(&mut self) -> Result<(), I2C::Error> {
        for command in INIT_SEQUENCE {
            self.command(command).await?;
        }
        Ok(())
    }

    /// Send one command with its parameters.
    async fn command(
        &mut self,
        command: &[u8],
    ) -> Result<(), I2C::Error> {
        let mut frame = [CONTROL_COMMAND; MAX_COMMAND_LEN + 1];
        let len = command.len().min(MAX_COMMAND_LEN);
        frame[1..=len].copy_from_slice(&command[..len]);
        self.i2c.write(self.address, &frame[..=len]).await
    }

    /// Restrict subsequent data writes to `window`.
    pub async fn set_window(
        &mut self,
        window: Window,
    ) -> Result<(), I2C::Error> {
        self.command(&[cmd::SET_COLUMN_ADDRESS, window.first_column, window.last_column])
            .await?;
        self.command(&[cmd::SET_ROW_ADDRESS, window.first_row, window.last_row])
            .await
    }

    /// Send the whole framebuffer.
    pub async fn flush(
        &mut self,
        framebuffer: &Framebuffer,
    ) -> Result<(), I2C::Error> {
        self.write_window(framebuffer, Window::FULL).await
    }

    /// Send only the part of the framebuffer inside `area`.
    ///
    /// Off-screen parts are clipped; an area entirely off-screen sends nothing.
    pub async fn flush_area(
        &mut self,
        framebuffer: &Framebuffer,
        area: &Rectangle,
    ) -> Result<(), I2C::Error> {
        match Window::covering(area) {
            Some(window) => self.write_window(framebuffer, window).await,
            None => Ok(()),
        }
    }

    async fn write_window(
        &mut self,
        framebuffer: &Framebuffer,
        window: Window,
    ) -> Result<(), I2C::Error> {
        self.set_window(window).await?;

        let columns = window.first_column as usize..=window.last_column as usize;
        let mut chunk = [CONTROL_DATA; DATA_CHUNK + 1];
        let mut filled = 0;

        for row in window.first_row..=window.last_row {
            for &byte in &framebuffer.row_bytes(row as usize)[columns.clone()] {
                filled += 1;
                chunk[filled] = byte;
                if filled == DATA_CHUNK {
                    self.i2c.write(self.address, &chunk).await?;
                    filled = 0;
                }
            }
        }
        if filled > 0 {
            self.i2c.write(self.address, &chunk[..=filled]).await?;
        }
        Ok(())
    }

    /// Set panel contrast (0-255).
    pub async fn set_contrast(
        &mut self,
        contrast: u8,
    ) -> Result<(), I2C::Error> {
        self.command(&[cmd::SET_CONTRAST, contrast]).await
    }

    /// Turn the panel on or off. GDDRAM is retained while off.
    pub async fn set_display_on(
        &mut self,
        on: bool,
    ) -> Result<(), I2C::Error> {
        self.command(&[if on { cmd::DISPLAY_ON } else { cmd::DISPLAY_OFF }])
            .await
    }
}
