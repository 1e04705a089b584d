//! Zero-copy BDF (Glyph Bitmap Distribution Format) font parser and renderer.
//!
//! The parser borrows the font source and only records, per glyph, its
//! metrics and the slice of hex rows between `BITMAP` and `ENDCHAR`. Pixels
//! are decoded from those rows while drawing, so nothing is allocated.
//!
//! Only ASCII glyphs (encodings below 128) are kept, up to [`MAX_GLYPHS`].
//!
//! # Format Subset
//!
//! ```text
//! STARTFONT 2.1
//! FONTBOUNDINGBOX 12 14 -1 -3
//! STARTPROPERTIES 2
//! FONT_ASCENT 11
//! FONT_DESCENT 3
//! ENDPROPERTIES
//! CHARS 1
//! STARTCHAR A
//! ENCODING 65
//! DWIDTH 8 0
//! BBX 7 9 0 0
//! BITMAP
//! 10
//! ...
//! ENDCHAR
//! ENDFONT
//! ```
//!
//! Unknown keywords are ignored. `FONT_ASCENT`/`FONT_DESCENT` default to the
//! font bounding box, a glyph's `BBX` defaults to the font bounding box and
//! its `DWIDTH` to its bitmap width.
//!
//! Sizes must fit `u16` and offsets, ascent, descent and advances must fit
//! `i16`; anything larger, or a negative line height, is `InvalidNumber`.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::Baseline;
use embedded_graphics::text::renderer::{TextMetrics, TextRenderer};
use heapless::Vec;

use crate::error::FontError;

/// Maximum number of glyphs kept from a font.
pub const MAX_GLYPHS: usize = 128;

/// Glyph or font bounding box, relative to the glyph origin on the baseline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct BoundingBox {
    pub width: u32,
    pub height: u32,
    pub x_offset: i32,
    pub y_offset: i32,
}

/// One parsed glyph.
#[derive(Clone, Copy, Debug)]
pub struct Glyph<'a> {
    encoding: u32,
    advance: i32,
    bounding_box: BoundingBox,
    /// Hex rows, one per line, top row first.
    bitmap: &'a str,
}

impl<'a> Glyph<'a> {
    /// Character code.
    #[inline]
    pub const fn encoding(&self) -> u32 { self.encoding }

    /// Horizontal distance to the next glyph origin.
    #[inline]
    pub const fn advance(&self) -> i32 { self.advance }

    /// Bitmap placement relative to the origin.
    #[inline]
    pub const fn bounding_box(&self) -> BoundingBox { self.bounding_box }

    /// Whether bitmap pixel `(x, y)` is set. `y = 0` is the top row.
    pub fn pixel(
        &self,
        x: u32,
        y: u32,
    ) -> bool {
        if x >= self.bounding_box.width {
            return false;
        }
        self.rows()
            .nth(y as usize)
            .and_then(|row| row.as_bytes().get((x / 4) as usize))
            .and_then(|&digit| (digit as char).to_digit(16))
            .is_some_and(|nibble| nibble & (0x8 >> (x % 4)) != 0)
    }

    fn rows(&self) -> impl Iterator<Item = &'a str> {
        self.bitmap.lines().map(str::trim).filter(|row| !row.is_empty())
    }

    /// Set pixels as points, with the glyph origin at `origin`.
    fn points(
        self,
        origin: Point,
    ) -> impl Iterator<Item = Point> + 'a {
        let bbx = self.bounding_box;
        let top = origin.y.saturating_sub(bbx.y_offset + bbx.height as i32);
        let left = origin.x.saturating_add(bbx.x_offset);
        (0..bbx.height).flat_map(move |y| {
            (0..bbx.width)
                .filter(move |&x| self.pixel(x, y))
                .map(move |x| Point::new(left.saturating_add(x as i32), top.saturating_add(y as i32)))
        })
    }
}

/// A parsed BDF font borrowing its source text.
#[derive(Clone, Debug)]
pub struct BdfFont<'a> {
    bounding_box: BoundingBox,
    ascent: i32,
    descent: i32,
    line_height: u32,
    glyphs: Vec<Glyph<'a>, MAX_GLYPHS>,
}

/// Glyph fields collected between `STARTCHAR` and `ENDCHAR`.
#[derive(Default)]
struct PendingGlyph {
    encoding: Option<i64>,
    advance: Option<i32>,
    bounding_box: Option<BoundingBox>,
    bitmap_start: Option<usize>,
}

impl<'a> BdfFont<'a> {
    /// Parse BDF source text.
    pub fn parse(source: &'a str) -> Result<Self, FontError> {
        let mut lines = Lines::new(source);

        match lines.next_content() {
            Some((_, line)) if keyword(line) == "STARTFONT" => {}
            _ => return Err(FontError::NotBdf),
        }

        let mut bounding_box = None;
        let mut ascent = None;
        let mut descent = None;
        let mut glyphs = Vec::new();
        let mut pending: Option<PendingGlyph> = None;
        let mut finished = false;

        while let Some((line_start, line)) = lines.next_content() {
            let mut fields = line.split_ascii_whitespace();
            let key = fields.next().unwrap_or_default();

            if let Some(glyph) = pending.as_mut() {
                if glyph.bitmap_start.is_some() {
                    // Inside BITMAP: only ENDCHAR ends the hex rows.
                    match key {
                        "ENDCHAR" => {
                            let glyph = pending.take().unwrap_or_default();
                            let start = glyph.bitmap_start.unwrap_or(line_start);
                            let Some(bbx) = glyph.bounding_box.or(bounding_box) else {
                                return Err(FontError::MissingField("FONTBOUNDINGBOX"));
                            };
                            let bitmap = &source[start..line_start];
                            validate_rows(bitmap, bbx)?;
                            if let Some(encoding) = glyph.encoding.filter(|&e| (0..MAX_GLYPHS as i64).contains(&e)) {
                                // Glyphs beyond capacity are dropped, not an error.
                                glyphs
                                    .push(Glyph {
                                        encoding: encoding as u32,
                                        advance: glyph.advance.unwrap_or(bbx.width as i32),
                                        bounding_box: bbx,
                                        bitmap,
                                    })
                                    .ok();
                            }
                        }
                        "STARTCHAR" | "ENDFONT" => return Err(FontError::UnterminatedGlyph),
                        _ => {}
                    }
                    continue;
                }

                match key {
                    "ENCODING" => glyph.encoding = Some(parse_number(fields.next())?),
                    "DWIDTH" => glyph.advance = Some(parse_metric(fields.next())?),
                    "BBX" => glyph.bounding_box = Some(parse_bounding_box(&mut fields)?),
                    "BITMAP" => glyph.bitmap_start = Some(lines.position()),
                    "ENDCHAR" => {
                        // Glyph without bitmap rows (e.g. space).
                        let glyph = pending.take().unwrap_or_default();
                        let Some(bbx) = glyph.bounding_box.or(bounding_box) else {
                            return Err(FontError::MissingField("FONTBOUNDINGBOX"));
                        };
                        if let Some(encoding) = glyph.encoding.filter(|&e| (0..MAX_GLYPHS as i64).contains(&e)) {
                            glyphs
                                .push(Glyph {
                                    encoding: encoding as u32,
                                    advance: glyph.advance.unwrap_or(bbx.width as i32),
                                    bounding_box: BoundingBox {
                                        height: 0,
                                        ..bbx
                                    },
                                    bitmap: "",
                                })
                                .ok();
                        }
                    }
                    "STARTCHAR" | "ENDFONT" => return Err(FontError::UnterminatedGlyph),
                    _ => {}
                }
                continue;
            }

            match key {
                "FONTBOUNDINGBOX" => bounding_box = Some(parse_bounding_box(&mut fields)?),
                "FONT_ASCENT" => ascent = Some(parse_metric(fields.next())?),
                "FONT_DESCENT" => descent = Some(parse_metric(fields.next())?),
                "STARTCHAR" => pending = Some(PendingGlyph::default()),
                "ENDFONT" => {
                    finished = true;
                    break;
                }
                _ => {}
            }
        }

        if pending.is_some() {
            return Err(FontError::UnterminatedGlyph);
        }
        if !finished {
            return Err(FontError::MissingField("ENDFONT"));
        }
        let bounding_box = bounding_box.ok_or(FontError::MissingField("FONTBOUNDINGBOX"))?;
        if glyphs.is_empty() {
            return Err(FontError::NoGlyphs);
        }

        let ascent = match ascent {
            Some(ascent) => ascent,
            None => (bounding_box.height as i32)
                .checked_add(bounding_box.y_offset)
                .ok_or(FontError::InvalidNumber)?,
        };
        let descent = descent.unwrap_or(-bounding_box.y_offset);
        let line_height = ascent
            .checked_add(descent)
            .and_then(|height| u32::try_from(height).ok())
            .ok_or(FontError::InvalidNumber)?;

        Ok(Self {
            bounding_box,
            ascent,
            descent,
            line_height,
            glyphs,
        })
    }

    /// Font-wide bounding box.
    #[inline]
    pub const fn bounding_box(&self) -> BoundingBox { self.bounding_box }

    /// Pixels above the baseline.
    #[inline]
    pub const fn ascent(&self) -> i32 { self.ascent }

    /// Pixels below the baseline.
    #[inline]
    pub const fn descent(&self) -> i32 { self.descent }

    /// Number of glyphs kept.
    #[inline]
    pub fn glyph_count(&self) -> usize { self.glyphs.len() }

    /// Glyph for `c`, if the font has one.
    pub fn glyph(
        &self,
        c: char,
    ) -> Option<&Glyph<'a>> {
        self.glyphs.iter().find(|glyph| glyph.encoding == c as u32)
    }

    /// Total advance of `text`. Characters without a glyph take no space.
    pub fn text_width(
        &self,
        text: &str,
    ) -> u32 {
        text.chars()
            .filter_map(|c| self.glyph(c))
            .map(|glyph| glyph.advance.max(0) as u32)
            .fold(0, u32::saturating_add)
    }

    /// Height of one text line.
    #[inline]
    pub const fn line_height(&self) -> u32 { self.line_height }

    /// Baseline Y for text positioned at `y` with `baseline`.
    fn baseline_y(
        &self,
        y: i32,
        baseline: Baseline,
    ) -> i32 {
        match baseline {
            Baseline::Top => y.saturating_add(self.ascent),
            Baseline::Bottom => y.saturating_sub(self.descent),
            Baseline::Middle => y
                .saturating_sub((self.line_height as i32 - 1) / 2)
                .saturating_add(self.ascent),
            Baseline::Alphabetic => y,
        }
    }
}

/// Character style drawing text with a [`BdfFont`] in a single color.
#[derive(Clone, Copy, Debug)]
pub struct BdfTextStyle<'f, 'a, C> {
    font: &'f BdfFont<'a>,
    color: C,
}

impl<'f, 'a, C: PixelColor> BdfTextStyle<'f, 'a, C> {
    /// Create a text style.
    pub const fn new(
        font: &'f BdfFont<'a>,
        color: C,
    ) -> Self {
        Self { font, color }
    }
}

impl<C: PixelColor> TextRenderer for BdfTextStyle<'_, '_, C> {
    type Color = C;

    fn draw_string<D>(
        &self,
        text: &str,
        position: Point,
        baseline: Baseline,
        target: &mut D,
    ) -> Result<Point, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let mut origin = Point::new(position.x, self.font.baseline_y(position.y, baseline));
        for c in text.chars() {
            if let Some(&glyph) = self.font.glyph(c) {
                target.draw_iter(glyph.points(origin).map(|p| Pixel(p, self.color)))?;
                origin.x = origin.x.saturating_add(glyph.advance);
            }
        }
        Ok(Point::new(origin.x, position.y))
    }

    fn draw_whitespace<D>(
        &self,
        width: u32,
        position: Point,
        _baseline: Baseline,
        _target: &mut D,
    ) -> Result<Point, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        Ok(Point::new(position.x.saturating_add_unsigned(width), position.y))
    }

    fn measure_string(
        &self,
        text: &str,
        position: Point,
        baseline: Baseline,
    ) -> TextMetrics {
        let width = self.font.text_width(text);
        let top = self.font.baseline_y(position.y, baseline).saturating_sub(self.font.ascent);
        TextMetrics {
            bounding_box: Rectangle::new(Point::new(position.x, top), Size::new(width, self.font.line_height())),
            next_position: Point::new(position.x.saturating_add_unsigned(width), position.y),
        }
    }

    fn line_height(&self) -> u32 { self.font.line_height() }
}

// =============================================================================
// Parsing Helpers
// =============================================================================

/// Line iterator that keeps byte offsets into the source.
struct Lines<'a> {
    source: &'a str,
    offset: usize,
}

impl<'a> Lines<'a> {
    const fn new(source: &'a str) -> Self { Self { source, offset: 0 } }

    /// Byte offset of the next unread line.
    const fn position(&self) -> usize { self.offset }

    /// Next non-empty, non-comment line (trimmed) with its start offset.
    fn next_content(&mut self) -> Option<(usize, &'a str)> {
        while self.offset < self.source.len() {
            let start = self.offset;
            let rest = &self.source[start..];
            let len = rest.find('\n').map_or(rest.len(), |i| i + 1);
            self.offset += len;

            let line = rest[..len].trim();
            if !line.is_empty() && keyword(line) != "COMMENT" {
                return Some((start, line));
            }
        }
        None
    }
}

fn keyword(line: &str) -> &str { line.split_ascii_whitespace().next().unwrap_or_default() }

fn parse_number<T: core::str::FromStr>(field: Option<&str>) -> Result<T, FontError> {
    field.and_then(|f| f.parse().ok()).ok_or(FontError::InvalidNumber)
}

/// Signed font metric, limited to the `i16` range.
fn parse_metric(field: Option<&str>) -> Result<i32, FontError> { parse_number::<i16>(field).map(i32::from) }

/// Sizes are limited to `u16`, offsets to `i16`.
fn parse_bounding_box<'s>(fields: &mut impl Iterator<Item = &'s str>) -> Result<BoundingBox, FontError> {
    Ok(BoundingBox {
        width: parse_number::<u16>(fields.next())?.into(),
        height: parse_number::<u16>(fields.next())?.into(),
        x_offset: parse_metric(fields.next())?,
        y_offset: parse_metric(fields.next())?,
    })
}

/// Each bitmap row must be hex wide enough for the glyph.
fn validate_rows(
    bitmap: &str,
    bbx: BoundingBox,
) -> Result<(), FontError> {
    let min_digits = bbx.width.div_ceil(8) as usize * 2;
    let mut rows = 0;
    for row in bitmap.lines().map(str::trim).filter(|row| !row.is_empty()) {
        if row.len() < min_digits || !row.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(FontError::InvalidNumber);
        }
        rows += 1;
    }
    if rows < bbx.height {
        return Err(FontError::MissingField("BITMAP"));
    }
    Ok(())
}
