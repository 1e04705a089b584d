//! Label font selection.
//!
//! The demo prefers an external BDF font (Arial Bold 12 in the reference
//! setup). When the font resource is missing or unusable the built-in
//! [`FALLBACK_FONT`] is used instead, so a font problem never stops the
//! display from coming up.
//!
//! # Font Resources
//!
//! | Target | Source |
//! |--------|--------|
//! | Simulator | `fonts/Arial_Bold_12.bdf` read from disk |
//! | Firmware | BDF text flashed into a reserved XIP region, see [`trim_flash_region`] |

pub mod bdf;

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;

pub use self::bdf::{BdfFont, BdfTextStyle};
use crate::error::FontError;
use crate::styles::{FALLBACK_FONT, LABEL_TEXT_STYLE};

/// Path of the external font, relative to the working directory.
pub const FONT_PATH: &str = "fonts/Arial_Bold_12.bdf";

/// Font used for every label.
#[derive(Clone)]
pub enum LabelFont<'a> {
    /// Parsed external BDF font.
    Bdf(BdfFont<'a>),
    /// Built-in monospace font.
    Builtin(&'static MonoFont<'static>),
}

impl<'a> LabelFont<'a> {
    /// The built-in fallback font.
    pub const fn fallback() -> Self { Self::Builtin(FALLBACK_FONT) }

    /// Parse an external font resource. `None` means the resource is absent.
    pub fn load(resource: Option<&'a [u8]>) -> Result<Self, FontError> {
        let bytes = resource.ok_or(FontError::Missing)?;
        let source = core::str::from_utf8(bytes).map_err(|_| FontError::NotUtf8)?;
        BdfFont::parse(source).map(Self::Bdf)
    }

    /// Like [`load`](Self::load), but fall back to the built-in font on error.
    ///
    /// The error is returned alongside so the caller can report it.
    pub fn load_or_fallback(resource: Option<&'a [u8]>) -> (Self, Option<FontError>) {
        match Self::load(resource) {
            Ok(font) => (font, None),
            Err(err) => (Self::fallback(), Some(err)),
        }
    }

    /// Whether an external font was loaded.
    #[inline]
    pub const fn is_custom(&self) -> bool { matches!(self, Self::Bdf(_)) }

    /// Height of one line of text.
    pub fn line_height(&self) -> u32 {
        match self {
            Self::Bdf(font) => font.line_height(),
            Self::Builtin(font) => font.character_size.height,
        }
    }

    /// Draw `text` left-aligned with its vertical middle at `position.y`.
    pub fn draw_text<C, D>(
        &self,
        text: &str,
        position: Point,
        color: C,
        target: &mut D,
    ) -> Result<Point, D::Error>
    where
        C: PixelColor,
        D: DrawTarget<Color = C>,
    {
        match self {
            Self::Bdf(font) => {
                Text::with_text_style(text, position, BdfTextStyle::new(font, color), LABEL_TEXT_STYLE).draw(target)
            }
            Self::Builtin(font) => {
                Text::with_text_style(text, position, MonoTextStyle::new(font, color), LABEL_TEXT_STYLE).draw(target)
            }
        }
    }
}

impl Default for LabelFont<'_> {
    fn default() -> Self { Self::fallback() }
}

/// Extract a font from a reserved flash region.
///
/// Erased flash reads as `0xFF`. The font text ends at the first `0xFF` or
/// `0x00` byte. Returns `None` when the region holds nothing.
pub fn trim_flash_region(region: &[u8]) -> Option<&[u8]> {
    let end = region.iter().position(|&b| b == 0xFF || b == 0x00).unwrap_or(region.len());
    (end > 0).then(|| &region[..end])
}

#[cfg(test)]
mod tests {
    use embedded_graphics::mock_display::MockDisplay;
    use embedded_graphics::pixelcolor::BinaryColor;

    use super::*;
    use crate::fonts::bdf::tests::TINY_FONT;

    #[test]
    fn test_load_bdf() {
        let font = LabelFont::load(Some(TINY_FONT.as_bytes())).unwrap();
        assert!(font.is_custom());
        assert_eq!(font.line_height(), 5);
    }

    #[test]
    fn test_missing_resource_falls_back() {
        let (font, err) = LabelFont::load_or_fallback(None);
        assert!(!font.is_custom());
        assert_eq!(err, Some(FontError::Missing));
        assert_eq!(font.line_height(), FALLBACK_FONT.character_size.height);
    }

    #[test]
    fn test_corrupt_resource_falls_back() {
        let (font, err) = LabelFont::load_or_fallback(Some(&[0xC3, 0x28, 0x0A]));
        assert!(!font.is_custom());
        assert_eq!(err, Some(FontError::NotUtf8));

        let (font, err) = LabelFont::load_or_fallback(Some(b"STARTFONT 2.1\nFONTBOUNDINGBOX 8\n"));
        assert!(!font.is_custom());
        assert_eq!(err, Some(FontError::InvalidNumber));
    }

    #[test]
    fn test_overflowing_metrics_fall_back() {
        for (from, to) in [
            ("FONTBOUNDINGBOX 4 5 0 -1", "FONTBOUNDINGBOX 4 2147483647 0 1"),
            ("FONT_ASCENT 4", "FONT_ASCENT 2147483647"),
        ] {
            let source = TINY_FONT.replace(from, to);
            let (font, err) = LabelFont::load_or_fallback(Some(source.as_bytes()));
            assert!(!font.is_custom(), "{to}");
            assert_eq!(err, Some(FontError::InvalidNumber));
            assert_eq!(font.line_height(), FALLBACK_FONT.character_size.height);
        }
    }

    #[test]
    fn test_valid_resource_has_no_error() {
        let (font, err) = LabelFont::load_or_fallback(Some(TINY_FONT.as_bytes()));
        assert!(font.is_custom());
        assert_eq!(err, None);
    }

    #[test]
    fn test_both_fonts_center_on_position() {
        let bdf = LabelFont::load(Some(TINY_FONT.as_bytes())).unwrap();
        for font in [bdf, LabelFont::fallback()] {
            let mut display: MockDisplay<BinaryColor> = MockDisplay::new();
            font.draw_text("I", Point::new(3, 30), BinaryColor::On, &mut display).unwrap();
            let area = display.affected_area();
            assert!(area.top_left.y <= 30 && area.bottom_right().unwrap().y >= 29, "{area:?}");
            assert!(area.top_left.x >= 3);
        }
    }

    #[test]
    fn test_trim_flash_region() {
        assert_eq!(trim_flash_region(&[]), None);
        assert_eq!(trim_flash_region(&[0xFF; 16]), None);
        assert_eq!(trim_flash_region(b"STARTFONT\n\xFF\xFF"), Some(&b"STARTFONT\n"[..]));
        assert_eq!(trim_flash_region(b"ENDFONT\n\0\0"), Some(&b"ENDFONT\n"[..]));
        assert_eq!(trim_flash_region(b"abc"), Some(&b"abc"[..]));
    }
}
