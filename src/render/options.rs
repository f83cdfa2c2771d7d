//! Rendering options and page geometry.

use crate::error::{Error, Result};
use crate::model::{Length, Metadata, SectionLayout};
use std::str::FromStr;

/// Page dimensions in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    /// Width in points
    pub width: f32,
    /// Height in points
    pub height: f32,
}

impl PageSize {
    /// ISO A4 (210 x 297 mm).
    pub const A4: PageSize = PageSize {
        width: 595.2756,
        height: 841.8898,
    };

    /// US Letter (8.5 x 11 inches).
    pub const LETTER: PageSize = PageSize {
        width: 612.0,
        height: 792.0,
    };

    /// US Legal (8.5 x 14 inches).
    pub const LEGAL: PageSize = PageSize {
        width: 612.0,
        height: 1008.0,
    };

    /// Create a custom page size.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Orient the page with its longer side horizontal.
    pub fn landscape(self) -> Self {
        Self {
            width: self.height.max(self.width),
            height: self.height.min(self.width),
        }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::A4
    }
}

impl FromStr for PageSize {
    type Err = Error;

    /// Parse `a4`, `letter`, `legal` or `WIDTHxHEIGHT` with lengths
    /// (e.g. `210mmx297mm`, `8.5in x 11in`).
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a4" => Ok(PageSize::A4),
            "letter" => Ok(PageSize::LETTER),
            "legal" => Ok(PageSize::LEGAL),
            custom => {
                let (w, h) = split_dimensions(custom)
                    .ok_or_else(|| Error::InvalidLength(format!("page size '{}'", s)))?;
                let width = w.parse::<Length>()?.to_points();
                let height = h.parse::<Length>()?.to_points();
                if width <= 0.0 || height <= 0.0 {
                    return Err(Error::InvalidLength(format!("page size '{}'", s)));
                }
                Ok(PageSize::new(width, height))
            }
        }
    }
}

/// Split `WxH` at the `x` separating two lengths; the unit suffixes
/// themselves never contain an `x`.
fn split_dimensions(s: &str) -> Option<(&str, &str)> {
    let (w, h) = s.split_once('x')?;
    if w.trim().is_empty() || h.trim().is_empty() {
        return None;
    }
    Some((w, h))
}

/// Page margins in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    /// Top margin
    pub top: f32,
    /// Right margin
    pub right: f32,
    /// Bottom margin
    pub bottom: f32,
    /// Left margin
    pub left: f32,
}

impl Margins {
    /// Same margin on every side.
    pub fn uniform(points: f32) -> Self {
        Self {
            top: points,
            right: points,
            bottom: points,
            left: points,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Margins::uniform(72.0)
    }
}

/// Options for building the paginated output.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Page dimensions
    pub page_size: PageSize,

    /// Page margins
    pub margins: Margins,

    /// Compress page content streams
    pub compress: bool,

    /// Metadata written to the PDF information dictionary
    pub metadata: Metadata,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size.
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the margins.
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Enable or disable content stream compression.
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Set document metadata.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Take page size and margins from a document section.
    pub fn with_section(mut self, section: &SectionLayout) -> Self {
        self.page_size = PageSize::new(
            section.page_width.to_points(),
            section.page_height.to_points(),
        );
        self.margins = Margins {
            top: section.margin_top.to_points(),
            right: section.margin_right.to_points(),
            bottom: section.margin_bottom.to_points(),
            left: section.margin_left.to_points(),
        };
        self
    }

    /// Width available to text between the left and right margins.
    pub fn content_width(&self) -> f32 {
        self.page_size.width - self.margins.left - self.margins.right
    }

    /// Check that the margins leave room for content.
    pub fn validate(&self) -> Result<()> {
        let height = self.page_size.height - self.margins.top - self.margins.bottom;
        if self.content_width() <= 0.0 || height <= 0.0 {
            return Err(Error::Render(format!(
                "margins leave no content area on a {}x{} page",
                self.page_size.width, self.page_size.height
            )));
        }
        Ok(())
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            page_size: PageSize::default(),
            margins: Margins::default(),
            compress: true,
            metadata: Metadata::default(),
        }
    }
}
