//! Palette-indexed bitmaps and the tile grid that displays them.
//!
//! - [`Bitmap`]: fixed-size grid of 8-bit palette indices
//! - [`Palette`]: 256-entry color lookup table (grayscale ramp)
//! - [`TileGrid`]: places a bitmap on screen and maps it through a palette
//!
//! The palette keeps full 0xRRGGBB entries. [`Palette::shade`] reduces an
//! entry to the panel's 16 gray levels as it is drawn.

use core::ops::{Index, IndexMut};

use embedded_graphics::pixelcolor::Gray4;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::colors::gray4_from_rgb;

// =============================================================================
// Bitmap
// =============================================================================

/// Fixed-size grid of palette indices, indexed as `bitmap[(x, y)]`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Bitmap<const W: usize, const H: usize> {
    pixels: [[u8; W]; H],
}

impl<const W: usize, const H: usize> Bitmap<W, H> {
    /// Create a bitmap with every pixel set to index 0.
    pub const fn new() -> Self { Self { pixels: [[0; W]; H] } }

    /// Size as an embedded-graphics [`Size`].
    #[inline]
    pub const fn size(&self) -> Size { Size::new(W as u32, H as u32) }

    /// Set every pixel to `value`.
    #[cfg(test)]
    pub(crate) fn fill(
        &mut self,
        value: u8,
    ) {
        for row in &mut self.pixels {
            row.fill(value);
        }
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8; W]> { self.pixels.iter() }
}

impl<const W: usize, const H: usize> Default for Bitmap<W, H> {
    fn default() -> Self { Self::new() }
}

impl<const W: usize, const H: usize> Index<(usize, usize)> for Bitmap<W, H> {
    type Output = u8;

    #[inline]
    fn index(
        &self,
        (x, y): (usize, usize),
    ) -> &u8 {
        &self.pixels[y][x]
    }
}

impl<const W: usize, const H: usize> IndexMut<(usize, usize)> for Bitmap<W, H> {
    #[inline]
    fn index_mut(
        &mut self,
        (x, y): (usize, usize),
    ) -> &mut u8 {
        &mut self.pixels[y][x]
    }
}

// =============================================================================
// Palette
// =============================================================================

/// Number of palette entries (one per possible `u8` index).
pub const PALETTE_SIZE: usize = 256;

/// Indexed color lookup table.
pub struct Palette {
    /// Entries as 0xRRGGBB.
    colors: [u32; PALETTE_SIZE],
}

impl Palette {
    /// Grayscale ramp: entry `i` is `(i << 16) | (i << 8) | i`.
    pub const fn grayscale() -> Self {
        let mut colors = [0u32; PALETTE_SIZE];
        let mut i = 0;
        while i < PALETTE_SIZE {
            let level = i as u32;
            colors[i] = (level << 16) | (level << 8) | level;
            i += 1;
        }
        Self { colors }
    }

    /// Entry as 0xRRGGBB.
    #[inline]
    pub const fn rgb(
        &self,
        index: u8,
    ) -> u32 {
        self.colors[index as usize]
    }

    /// Entry as displayed on the panel.
    #[inline]
    pub const fn shade(
        &self,
        index: u8,
    ) -> Gray4 {
        gray4_from_rgb(self.rgb(index))
    }
}

// =============================================================================
// Tile Grid
// =============================================================================

/// Renders a bitmap at a fixed screen position through a palette.
///
/// The grid does not own its bitmap: the animation loop owns and mutates it,
/// and hands it over at draw time.
#[derive(Clone, Copy)]
pub struct TileGrid<'a> {
    position: Point,
    size: Size,
    palette: &'a Palette,
}

impl<'a> TileGrid<'a> {
    /// Create a tile grid of `size` pixels with its top-left corner at `position`.
    pub const fn new(
        palette: &'a Palette,
        position: Point,
        size: Size,
    ) -> Self {
        Self { position, size, palette }
    }

    /// Screen area covered by the grid.
    #[inline]
    pub const fn area(&self) -> Rectangle { Rectangle::new(self.position, self.size) }

    /// Draw `bitmap` through the palette.
    ///
    /// A bitmap smaller than the grid leaves the remaining area untouched;
    /// a larger one is cropped to the grid.
    pub fn draw<const W: usize, const H: usize, D>(
        &self,
        bitmap: &Bitmap<W, H>,
        target: &mut D,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Gray4>,
    {
        let area = Rectangle::new(self.position, bitmap.size()).intersection(&self.area());
        if area.size == Size::zero() {
            return Ok(());
        }

        let width = area.size.width as usize;
        let height = area.size.height as usize;
        let colors = bitmap
            .rows()
            .take(height)
            .flat_map(move |row| row.iter().take(width))
            .map(|&index| self.palette.shade(index));
        target.fill_contiguous(&area, colors)
    }
}
