//! Pre-computed static text styles.
//!
//! Label text is positioned by the vertical middle of the line, so every
//! label is drawn with [`LABEL_TEXT_STYLE`]. The character style depends on
//! which font was selected at start-up, so only the font reference and the
//! alignment/baseline are fixed here.

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::text::{Alignment, Baseline, TextStyle, TextStyleBuilder};
use profont::PROFONT_9_POINT;

/// Built-in fixed-width font used when no BDF font can be loaded.
pub const FALLBACK_FONT: &MonoFont<'static> = &PROFONT_9_POINT;

/// Left-aligned text anchored at the vertical middle of the line.
pub const LABEL_TEXT_STYLE: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Left)
    .baseline(Baseline::Middle)
    .build();
