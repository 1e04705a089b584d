//! Display group: an ordered collection of renderable elements.
//!
//! Elements are drawn in append order, so later elements paint over earlier
//! ones. The group is composed once at start-up and never reordered.
//!
//! # Update Strategy
//!
//! | Element | Update Frequency | Strategy |
//! |---------|-----------------|----------|
//! | Labels | Once | [`Group::draw`] at start-up |
//! | Tile grids | Every frame | [`Group::draw_tiles`] + windowed flush |

use embedded_graphics::pixelcolor::Gray4;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use heapless::Vec;

use crate::error::GroupFull;
use crate::fonts::LabelFont;
use crate::labels::Label;
use crate::tile::{Bitmap, TileGrid};

/// Maximum number of elements in a group.
pub const GROUP_CAPACITY: usize = 8;

/// Something a group can draw.
#[derive(Clone, Copy)]
pub enum Element<'a> {
    /// Static text.
    Label(Label<'a>),
    /// Palette-mapped bitmap.
    TileGrid(TileGrid<'a>),
}

/// Ordered collection of labels and tile grids.
pub struct Group<'a> {
    elements: Vec<Element<'a>, GROUP_CAPACITY>,
}

impl<'a> Group<'a> {
    /// Create an empty group.
    pub const fn new() -> Self { Self { elements: Vec::new() } }

    /// Append an element on top of the existing ones.
    pub fn append(
        &mut self,
        element: Element<'a>,
    ) -> Result<(), GroupFull> {
        self.elements.push(element).map_err(|_| GroupFull)
    }

    /// Number of elements.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize { self.elements.len() }

    /// Whether the group has no elements.
    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool { self.elements.is_empty() }

    /// Elements in draw order.
    #[cfg(test)]
    pub(crate) fn iter(&self) -> impl Iterator<Item = &Element<'a>> { self.elements.iter() }

    /// Labels in draw order.
    #[cfg(test)]
    pub(crate) fn labels(&self) -> impl Iterator<Item = &Label<'a>> {
        self.elements.iter().filter_map(|element| match element {
            Element::Label(label) => Some(label),
            Element::TileGrid(_) => None,
        })
    }

    /// Tile grids in draw order.
    pub fn tile_grids(&self) -> impl Iterator<Item = &TileGrid<'a>> {
        self.elements.iter().filter_map(|element| match element {
            Element::TileGrid(grid) => Some(grid),
            Element::Label(_) => None,
        })
    }

    /// Smallest rectangle covering every tile grid, or `None` without tile grids.
    pub fn tile_area(&self) -> Option<Rectangle> {
        self.tile_grids().map(TileGrid::area).reduce(envelope)
    }

    /// Draw every element. Tile grids show `bitmap`.
    pub fn draw<const W: usize, const H: usize, D>(
        &self,
        target: &mut D,
        font: &LabelFont<'_>,
        bitmap: &Bitmap<W, H>,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Gray4>,
    {
        for element in &self.elements {
            match element {
                Element::Label(label) => {
                    label.draw(font, target)?;
                }
                Element::TileGrid(grid) => grid.draw(bitmap, target)?,
            }
        }
        Ok(())
    }

    /// Redraw only the tile grids (labels are static).
    pub fn draw_tiles<const W: usize, const H: usize, D>(
        &self,
        target: &mut D,
        bitmap: &Bitmap<W, H>,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Gray4>,
    {
        for grid in self.tile_grids() {
            grid.draw(bitmap, target)?;
        }
        Ok(())
    }
}

/// Smallest rectangle containing both `a` and `b`.
fn envelope(
    a: Rectangle,
    b: Rectangle,
) -> Rectangle {
    let top_left = a.top_left.component_min(b.top_left);
    let end = (a.top_left + a.size).component_max(b.top_left + b.size);
    let size = end - top_left;
    Rectangle::new(top_left, Size::new(size.x as u32, size.y as u32))
}

impl Default for Group<'_> {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::mock_display::MockDisplay;

    use super::*;
    use crate::colors::WHITE;
    use crate::tile::Palette;

    static PALETTE: Palette = Palette::grayscale();

    fn tile_at(
        x: i32,
        y: i32,
    ) -> Element<'static> {
        Element::TileGrid(TileGrid::new(&PALETTE, Point::new(x, y), Size::new(2, 2)))
    }

    #[test]
    fn test_append_keeps_order() {
        let mut group = Group::new();
        assert!(group.is_empty());
        group.append(Element::Label(Label::new("a", Point::new(0, 5), WHITE))).unwrap();
        group.append(tile_at(10, 10)).unwrap();
        group.append(Element::Label(Label::new("b", Point::new(0, 20), WHITE))).unwrap();

        assert_eq!(group.len(), 3);
        let texts: Vec<&str, 4> = group.labels().map(Label::text).collect();
        assert_eq!(texts.as_slice(), &["a", "b"]);
        assert!(matches!(group.iter().nth(1), Some(Element::TileGrid(_))));
    }

    #[test]
    fn test_append_beyond_capacity_fails() {
        let mut group = Group::new();
        for i in 0..GROUP_CAPACITY {
            group.append(tile_at(i as i32 * 2, 0)).unwrap();
        }
        assert_eq!(group.append(tile_at(0, 4)), Err(GroupFull));
        assert_eq!(group.len(), GROUP_CAPACITY);
    }

    #[test]
    fn test_tile_area_envelopes_grids() {
        let mut group = Group::new();
        assert_eq!(group.tile_area(), None);
        group.append(tile_at(4, 4)).unwrap();
        group.append(tile_at(10, 6)).unwrap();
        assert_eq!(group.tile_area(), Some(Rectangle::new(Point::new(4, 4), Size::new(8, 4))));
    }

    #[test]
    fn test_draw_tiles_skips_labels() {
        let mut group = Group::new();
        group.append(Element::Label(Label::new("x", Point::new(0, 5), WHITE))).unwrap();
        group.append(tile_at(20, 20)).unwrap();

        let mut bitmap: Bitmap<2, 2> = Bitmap::new();
        bitmap.fill(255);
        let mut display: MockDisplay<Gray4> = MockDisplay::new();
        group.draw_tiles(&mut display, &bitmap).unwrap();

        assert_eq!(display.affected_area(), Rectangle::new(Point::new(20, 20), Size::new(2, 2)));
    }

    #[test]
    fn test_draw_includes_labels() {
        let mut group = Group::new();
        group.append(Element::Label(Label::new("X", Point::new(0, 10), WHITE))).unwrap();
        group.append(tile_at(20, 20)).unwrap();

        let bitmap: Bitmap<2, 2> = Bitmap::new();
        let mut display: MockDisplay<Gray4> = MockDisplay::new();
        group.draw(&mut display, &LabelFont::fallback(), &bitmap).unwrap();

        assert_eq!(display.get_pixel(Point::new(20, 20)), Some(Gray4::new(0)));
        assert!(display.affected_area().top_left.y < 10);
    }
}
