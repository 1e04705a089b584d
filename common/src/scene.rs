//! Composition of the demo screen.
//!
//! The root group holds the five info labels followed by the pulse tile grid
//! at the bottom center of the screen. Both the simulator and the firmware
//! build their screen through [`compose_main_group`].

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::config::{PULSE_SIZE, PULSE_X, PULSE_Y};
use crate::error::GroupFull;
use crate::group::{Element, Group};
use crate::labels::INFO_LABELS;
use crate::tile::{Palette, TileGrid};

/// Top-left corner of the pulse sprite.
pub const PULSE_ORIGIN: Point = Point::new(PULSE_X, PULSE_Y);

/// Screen area redrawn every frame.
pub const PULSE_AREA: Rectangle = Rectangle::new(PULSE_ORIGIN, Size::new(PULSE_SIZE as u32, PULSE_SIZE as u32));

/// Build the root group: labels top to bottom, then the pulse tile grid.
pub fn compose_main_group(palette: &Palette) -> Result<Group<'_>, GroupFull> {
    let mut group = Group::new();
    for label in INFO_LABELS {
        group.append(Element::Label(label))?;
    }
    group.append(Element::TileGrid(TileGrid::new(palette, PULSE_ORIGIN, PULSE_AREA.size)))?;
    Ok(group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::LabelFont;
    use crate::framebuffer::Framebuffer;
    use crate::pulse::PulseAnimation;

    static PALETTE: Palette = Palette::grayscale();

    #[test]
    fn test_main_group_order() {
        let group = compose_main_group(&PALETTE).unwrap();
        assert_eq!(group.len(), 6);
        assert!(group.iter().take(5).all(|e| matches!(e, Element::Label(_))));
        assert!(matches!(group.iter().last(), Some(Element::TileGrid(_))));

        let ys: Vec<i32> = group.labels().map(|l| l.position().y).collect();
        assert!(ys.windows(2).all(|w| w[0] < w[1]), "labels must stack top to bottom");
    }

    #[test]
    fn test_pulse_area() {
        let group = compose_main_group(&PALETTE).unwrap();
        assert_eq!(group.tile_area(), Some(PULSE_AREA));
        assert_eq!(PULSE_AREA.top_left, Point::new(48, 91));
        assert_eq!(PULSE_AREA.size, Size::new(32, 32));
    }

    #[test]
    fn test_labels_stay_clear_of_pulse() {
        let group = compose_main_group(&PALETTE).unwrap();
        let mut framebuffer = Framebuffer::new();
        for label in group.labels() {
            label.draw(&LabelFont::fallback(), &mut framebuffer).unwrap();
        }
        assert!(framebuffer.area_is_blank(&PULSE_AREA));
    }

    #[test]
    fn test_first_frame_center_pixel_on_screen() {
        let group = compose_main_group(&PALETTE).unwrap();
        let mut pulse = PulseAnimation::new();
        pulse.render();

        let mut framebuffer = Framebuffer::new();
        group.draw(&mut framebuffer, &LabelFont::fallback(), pulse.bitmap()).unwrap();

        // Index 127 maps to gray level 7.
        let center = PULSE_ORIGIN + Point::new(16, 16);
        assert_eq!(framebuffer.pixel(center.x as usize, center.y as usize).map(|c| c.into_storage()), Some(7));
    }
}
