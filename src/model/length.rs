//! Physical lengths with an explicit unit.

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::OnceLock;

/// Unit of a physical length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// PostScript point (1/72 inch)
    Pt,
    /// Twentieth of a point, the unit of most WordprocessingML measures
    Twip,
    /// English Metric Unit (1/914400 inch)
    Emu,
    /// Inch
    In,
    /// Centimetre
    Cm,
    /// Millimetre
    Mm,
}

impl Unit {
    /// Convert a magnitude in this unit to points.
    fn to_points(self, value: f32) -> f32 {
        match self {
            Unit::Pt => value,
            Unit::Twip => value / 20.0,
            Unit::Emu => value / 12_700.0,
            Unit::In => value * 72.0,
            Unit::Cm => value * 72.0 / 2.54,
            Unit::Mm => value * 72.0 / 25.4,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Unit::Pt => "pt",
            Unit::Twip => "twip",
            Unit::Emu => "emu",
            Unit::In => "in",
            Unit::Cm => "cm",
            Unit::Mm => "mm",
        }
    }
}

/// A length together with the unit it was declared in.
///
/// Lengths are resolved to points once, when the layout is computed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Length {
    /// Magnitude in `unit`
    pub value: f32,
    /// Declared unit
    pub unit: Unit,
}

impl Length {
    /// Create a length.
    pub const fn new(value: f32, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// Length in points.
    pub const fn pt(value: f32) -> Self {
        Self::new(value, Unit::Pt)
    }

    /// Length in twips.
    pub const fn twips(value: f32) -> Self {
        Self::new(value, Unit::Twip)
    }

    /// Length in inches.
    pub const fn inches(value: f32) -> Self {
        Self::new(value, Unit::In)
    }

    /// Length in millimetres.
    pub const fn mm(value: f32) -> Self {
        Self::new(value, Unit::Mm)
    }

    /// Zero length.
    pub const fn zero() -> Self {
        Self::pt(0.0)
    }

    /// Resolve to points.
    pub fn to_points(&self) -> f32 {
        self.unit.to_points(self.value)
    }
}

impl Default for Length {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for Length {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.value, self.unit.suffix())
    }
}

fn length_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*(-?\d+(?:\.\d+)?|-?\.\d+)\s*(pt|twips?|emu|in|cm|mm)?\s*$")
            .expect("length pattern is valid")
    })
}

impl FromStr for Length {
    type Err = Error;

    /// Parse strings like `"12pt"`, `"1in"`, `"2.5 cm"`. A bare number is points.
    fn from_str(s: &str) -> Result<Self> {
        let lower = s.to_ascii_lowercase();
        let caps = length_regex()
            .captures(&lower)
            .ok_or_else(|| Error::InvalidLength(s.to_string()))?;

        let value: f32 = caps[1]
            .parse()
            .map_err(|_| Error::InvalidLength(s.to_string()))?;

        let unit = match caps.get(2).map(|m| m.as_str()) {
            None | Some("pt") => Unit::Pt,
            Some("twip") | Some("twips") => Unit::Twip,
            Some("emu") => Unit::Emu,
            Some("in") => Unit::In,
            Some("cm") => Unit::Cm,
            Some("mm") => Unit::Mm,
            Some(other) => return Err(Error::InvalidLength(other.to_string())),
        };

        Ok(Length::new(value, unit))
    }
}

/// Paragraph line spacing as declared by the source document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", content = "value", rename_all = "snake_case")]
pub enum LineSpacing {
    /// Fixed distance between baselines
    Exact(Length),
    /// Multiple of single spacing (1.0 = single, 2.0 = double)
    Multiple(f32),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_unit_conversion() {
        assert!(approx(Length::twips(240.0).to_points(), 12.0));
        assert!(approx(Length::inches(1.0).to_points(), 72.0));
        assert!(approx(Length::mm(25.4).to_points(), 72.0));
        assert!(approx(Length::new(2.54, Unit::Cm).to_points(), 72.0));
        assert!(approx(Length::new(12_700.0, Unit::Emu).to_points(), 1.0));
    }

    #[test]
    fn test_parse_length() {
        assert_eq!("12pt".parse::<Length>().unwrap(), Length::pt(12.0));
        assert_eq!("1in".parse::<Length>().unwrap(), Length::inches(1.0));
        assert_eq!(" 2.5 CM ".parse::<Length>().unwrap(), Length::new(2.5, Unit::Cm));
        assert_eq!("72".parse::<Length>().unwrap(), Length::pt(72.0));
        assert_eq!("240twips".parse::<Length>().unwrap(), Length::twips(240.0));
    }

    #[test]
    fn test_parse_length_invalid() {
        assert!(matches!(
            "wide".parse::<Length>(),
            Err(Error::InvalidLength(_))
        ));
        assert!("12px".parse::<Length>().is_err());
        assert!("".parse::<Length>().is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        let len = Length::mm(20.0);
        assert_eq!(len.to_string(), "20mm");
        assert_eq!(len.to_string().parse::<Length>().unwrap(), len);
    }
}
