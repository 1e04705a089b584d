//! Error types.
//!
//! Font loading is the only recoverable failure in the demo: every
//! [`FontError`] ends in the built-in fallback font being used instead.

use core::fmt;

/// Why an external BDF font could not be used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FontError {
    /// No font resource present (file not found, erased flash).
    Missing,
    /// Resource is not valid UTF-8 text.
    NotUtf8,
    /// Resource does not start with `STARTFONT`.
    NotBdf,
    /// A required BDF keyword was not found.
    MissingField(&'static str),
    /// A numeric or hex field could not be parsed.
    InvalidNumber,
    /// A glyph was opened with `STARTCHAR` but never closed with `ENDCHAR`.
    UnterminatedGlyph,
    /// The font contains no usable glyphs.
    NoGlyphs,
}

impl fmt::Display for FontError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("font resource missing"),
            Self::NotUtf8 => f.write_str("font resource is not UTF-8"),
            Self::NotBdf => f.write_str("not a BDF font"),
            Self::MissingField(field) => write!(f, "missing {field}"),
            Self::InvalidNumber => f.write_str("invalid number"),
            Self::UnterminatedGlyph => f.write_str("glyph missing ENDCHAR"),
            Self::NoGlyphs => f.write_str("font has no usable glyphs"),
        }
    }
}

/// A [`Group`](crate::group::Group) has no room for another element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GroupFull;

impl fmt::Display for GroupFull {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str("display group is full")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_error_messages() {
        assert_eq!(FontError::Missing.to_string(), "font resource missing");
        assert_eq!(FontError::MissingField("FONTBOUNDINGBOX").to_string(), "missing FONTBOUNDINGBOX");
    }

    #[test]
    fn test_group_full_message() {
        assert_eq!(GroupFull.to_string(), "display group is full");
    }
}
