//! 4-bit grayscale framebuffer in SSD1327 GDDRAM layout.
//!
//! Two pixels share a byte: the even column in the high nibble and the odd
//! column in the low nibble, rows stored top to bottom. This is the byte
//! order the controller expects with the remap configured in
//! [`Ssd1327::init`](crate::ssd1327::Ssd1327::init), so a flush is a plain copy.
//!
//! # Performance Optimizations
//!
//! - **Byte fills:** `clear()` writes whole bytes (2 pixels at a time)
//! - **Row slices:** [`Framebuffer::row_bytes`] lets the driver stream a
//!   window without repacking

use core::convert::Infallible;

use embedded_graphics::pixelcolor::Gray4;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Panel width in pixels.
pub const WIDTH: usize = 128;
/// Panel height in pixels.
pub const HEIGHT: usize = 128;
/// Bytes per row (two pixels per byte).
pub const BYTES_PER_ROW: usize = WIDTH / 2;
/// Total framebuffer size (8 KiB).
pub const BUFFER_SIZE: usize = BYTES_PER_ROW * HEIGHT;

/// Full-screen Gray4 framebuffer.
pub struct Framebuffer {
    buffer: [u8; BUFFER_SIZE],
}

impl Framebuffer {
    /// Create a black framebuffer.
    pub const fn new() -> Self { Self { buffer: [0; BUFFER_SIZE] } }

    /// Raw packed bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; BUFFER_SIZE] { &self.buffer }

    /// Packed bytes of row `y`.
    ///
    /// # Panics
    /// Panics if `y >= HEIGHT`.
    #[inline]
    pub fn row_bytes(
        &self,
        y: usize,
    ) -> &[u8] {
        let start = y * BYTES_PER_ROW;
        &self.buffer[start..start + BYTES_PER_ROW]
    }

    /// Color at `(x, y)`, or `None` outside the panel.
    pub fn pixel(
        &self,
        x: usize,
        y: usize,
    ) -> Option<Gray4> {
        if x >= WIDTH || y >= HEIGHT {
            return None;
        }
        let byte = self.buffer[y * BYTES_PER_ROW + x / 2];
        let nibble = if x % 2 == 0 { byte >> 4 } else { byte & 0x0F };
        Some(Gray4::new(nibble))
    }

    /// Set the pixel at `(x, y)`. Out-of-bounds coordinates are ignored.
    #[inline]
    pub fn set_pixel(
        &mut self,
        x: i32,
        y: i32,
        color: Gray4,
    ) {
        if x >= 0 && x < WIDTH as i32 && y >= 0 && y < HEIGHT as i32 {
            let idx = y as usize * BYTES_PER_ROW + x as usize / 2;
            let luma = color.into_storage();
            let byte = &mut self.buffer[idx];
            *byte = if x % 2 == 0 { (*byte & 0x0F) | (luma << 4) } else { (*byte & 0xF0) | luma };
        }
    }

    /// Every pixel, row by row.
    pub fn pixels(&self) -> impl Iterator<Item = Pixel<Gray4>> + '_ {
        (0..HEIGHT).flat_map(move |y| {
            (0..WIDTH).filter_map(move |x| {
                self.pixel(x, y)
                    .map(|color| Pixel(Point::new(x as i32, y as i32), color))
            })
        })
    }

    /// Whether every on-screen pixel in `area` is black.
    pub fn area_is_blank(
        &self,
        area: &Rectangle,
    ) -> bool {
        area.intersection(&self.bounding_box())
            .points()
            .all(|p| self.pixel(p.x as usize, p.y as usize) == Some(Gray4::BLACK))
    }
}

impl Default for Framebuffer {
    fn default() -> Self { Self::new() }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size { Size::new(WIDTH as u32, HEIGHT as u32) }
}

impl DrawTarget for Framebuffer {
    type Color = Gray4;
    type Error = Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color);
        }
        Ok(())
    }

    fn fill_contiguous<I>(
        &mut self,
        area: &Rectangle,
        colors: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        // Colors are laid out for the whole area, so walk it and skip clipped points.
        let bounds = self.bounding_box();
        for (point, color) in area.points().zip(colors) {
            if bounds.contains(point) {
                self.set_pixel(point.x, point.y, color);
            }
        }
        Ok(())
    }

    fn fill_solid(
        &mut self,
        area: &Rectangle,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        let drawable_area = area.intersection(&self.bounding_box());
        for point in drawable_area.points() {
            self.set_pixel(point.x, point.y, color);
        }
        Ok(())
    }

    fn clear(
        &mut self,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        let luma = color.into_storage();
        self.buffer.fill((luma << 4) | luma);
        Ok(())
    }
}
