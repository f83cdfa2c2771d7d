//! Font selection and text width measurement.
//!
//! Widths come from the Adobe font metrics of the standard Type 1 fonts,
//! in 1/1000 em. This is enough for stable line breaking; it is not a
//! shaping engine.

use crate::error::{Error, Result};

/// Standard font families available without embedding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// Helvetica (sans serif)
    #[default]
    Helvetica,
    /// Courier (monospaced)
    Courier,
}

impl FontFamily {
    /// Resolve a family from a font name, ignoring case.
    ///
    /// Unknown names fall back to Helvetica.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "helvetica" | "arial" | "sans" | "sans-serif" => FontFamily::Helvetica,
            "courier" | "courier new" | "mono" | "monospace" => FontFamily::Courier,
            other => {
                log::warn!("Unknown font '{}', using Helvetica", other);
                FontFamily::Helvetica
            }
        }
    }
}

/// Weight and slant of a font.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FontFace {
    /// Bold weight
    pub bold: bool,
    /// Italic / oblique slant
    pub italic: bool,
}

impl FontFace {
    /// Regular upright face.
    pub const REGULAR: FontFace = FontFace {
        bold: false,
        italic: false,
    };
}

/// A concrete font at a size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
    /// Font family
    pub family: FontFamily,
    /// Face within the family
    pub face: FontFace,
    /// Size in points
    pub size: f32,
}

impl FontSpec {
    /// Create a font spec.
    pub fn new(family: FontFamily, face: FontFace, size: f32) -> Self {
        Self { family, face, size }
    }

    /// Regular face of a family.
    pub fn regular(family: FontFamily, size: f32) -> Self {
        Self::new(family, FontFace::REGULAR, size)
    }

    /// PostScript name of the standard font.
    pub fn base_font(&self) -> &'static str {
        match (self.family, self.face.bold, self.face.italic) {
            (FontFamily::Helvetica, false, false) => "Helvetica",
            (FontFamily::Helvetica, true, false) => "Helvetica-Bold",
            (FontFamily::Helvetica, false, true) => "Helvetica-Oblique",
            (FontFamily::Helvetica, true, true) => "Helvetica-BoldOblique",
            (FontFamily::Courier, false, false) => "Courier",
            (FontFamily::Courier, true, false) => "Courier-Bold",
            (FontFamily::Courier, false, true) => "Courier-Oblique",
            (FontFamily::Courier, true, true) => "Courier-BoldOblique",
        }
    }
}

/// Measures the rendered width of text.
///
/// Closures `Fn(&str, &FontSpec) -> Result<f32>` implement this trait,
/// which is convenient for tests with synthetic widths.
pub trait TextMeasure {
    /// Width of `text` in points when set in `font`.
    fn width(&self, text: &str, font: &FontSpec) -> Result<f32>;
}

impl<F> TextMeasure for F
where
    F: Fn(&str, &FontSpec) -> Result<f32>,
{
    fn width(&self, text: &str, font: &FontSpec) -> Result<f32> {
        self(text, font)
    }
}

/// Width tables of the standard fonts.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardMetrics;

impl StandardMetrics {
    /// Create the standard metrics.
    pub fn new() -> Self {
        Self
    }

    fn glyph_width(family: FontFamily, bold: bool, c: char) -> u16 {
        match family {
            FontFamily::Courier => 600,
            FontFamily::Helvetica => {
                let table = if bold { &HELVETICA_BOLD } else { &HELVETICA };
                match c {
                    ' '..='~' => table[c as usize - 32],
                    // No-break space measures like a space.
                    '\u{A0}' => table[0],
                    '\t' | '\n' | '\r' => table[0],
                    _ => DEFAULT_WIDTH,
                }
            }
        }
    }
}

impl TextMeasure for StandardMetrics {
    fn width(&self, text: &str, font: &FontSpec) -> Result<f32> {
        if !font.size.is_finite() || font.size < 0.0 {
            return Err(Error::Translation(format!(
                "cannot measure text at font size {}",
                font.size
            )));
        }
        let units: u32 = text
            .chars()
            .map(|c| u32::from(Self::glyph_width(font.family, font.face.bold, c)))
            .sum();
        Ok(units as f32 * font.size / 1000.0)
    }
}

/// Width used for characters outside the ASCII tables.
const DEFAULT_WIDTH: u16 = 556;

/// Helvetica widths for code points 32..=126.
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold widths for code points 32..=126.
#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];
