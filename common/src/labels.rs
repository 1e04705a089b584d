//! Static text labels.
//!
//! A [`Label`] is an immutable text/position/color triple. The demo screen
//! shows a header and four info lines ([`INFO_LABELS`]), stacked from top to
//! bottom in the order they are appended to the display group.

use embedded_graphics::pixelcolor::Gray4;
use embedded_graphics::prelude::*;

use crate::colors::LABEL_COLOR;
use crate::config::{HEADER_Y, LABEL_X, LINE_SPACING};
use crate::fonts::LabelFont;

/// A line of text anchored at its left edge and vertical middle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Label<'a> {
    text: &'a str,
    position: Point,
    color: Gray4,
}

impl<'a> Label<'a> {
    /// Create a label. `position.y` is the vertical middle of the text.
    pub const fn new(
        text: &'a str,
        position: Point,
        color: Gray4,
    ) -> Self {
        Self { text, position, color }
    }

    /// Label text.
    #[inline]
    pub const fn text(&self) -> &'a str { self.text }

    /// Anchor point (left edge, vertical middle).
    #[inline]
    pub const fn position(&self) -> Point { self.position }

    /// Text color.
    #[inline]
    pub const fn color(&self) -> Gray4 { self.color }

    /// Draw the label with `font`. Returns the position after the last glyph.
    pub fn draw<D>(
        &self,
        font: &LabelFont<'_>,
        target: &mut D,
    ) -> Result<Point, D::Error>
    where
        D: DrawTarget<Color = Gray4>,
    {
        font.draw_text(self.text, self.position, self.color, target)
    }
}

/// Anchor for info line `n` (0 = header).
const fn line(n: i32) -> Point { Point::new(LABEL_X, HEADER_Y + n * LINE_SPACING) }

/// Header plus four info lines, top to bottom.
pub const INFO_LABELS: [Label<'static>; 5] = [
    Label::new("1.5\" 128x128", line(0), LABEL_COLOR),
    Label::new("+ Easy setup", line(1), LABEL_COLOR),
    Label::new("- Slow (I2C)", line(2), LABEL_COLOR),
    Label::new("- Can't be left", line(3), LABEL_COLOR),
    Label::new("  on. No color.", line(4), LABEL_COLOR),
];

#[cfg(test)]
mod tests {
    use embedded_graphics::mock_display::MockDisplay;

    use super::*;
    use crate::colors::WHITE;

    #[test]
    fn test_info_label_positions() {
        let ys: Vec<i32> = INFO_LABELS.iter().map(|l| l.position().y).collect();
        assert_eq!(ys, vec![10, 25, 40, 55, 70]);
        assert!(INFO_LABELS.iter().all(|l| l.position().x == 5));
    }

    #[test]
    fn test_info_label_text_and_color() {
        assert_eq!(INFO_LABELS[0].text(), "1.5\" 128x128");
        assert_eq!(INFO_LABELS[3].text(), "- Can't be left");
        assert_eq!(INFO_LABELS[4].text(), "  on. No color.");
        assert!(INFO_LABELS.iter().all(|l| l.color() == WHITE));
    }

    #[test]
    fn test_label_draws_around_its_middle() {
        let label = Label::new("Hi", Point::new(2, 20), WHITE);
        let mut display: MockDisplay<Gray4> = MockDisplay::new();
        let end = label.draw(&LabelFont::fallback(), &mut display).unwrap();

        let area = display.affected_area();
        assert!(area.top_left.x >= 2);
        assert!(area.top_left.y < 20);
        assert!(area.bottom_right().unwrap().y > 20);
        assert!(end.x > 2);
    }
}
