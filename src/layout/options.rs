//! Translation options and configuration.

/// Options for translating a document into layout blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslateOptions {
    /// Base font family for every text block
    pub font: String,

    /// Body font size in points
    pub font_size: f32,

    /// Leading used when a paragraph declares no line spacing
    pub default_leading: f32,

    /// Font size that line-spacing multipliers are applied to
    ///
    /// This is an approximation of word-processor semantics, which
    /// multiply the font's own line height instead.
    pub base_font_size: f32,
}

impl TranslateOptions {
    /// Create translate options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the font family.
    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = font.into();
        self
    }

    /// Set the body font size.
    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Set the default leading.
    pub fn with_default_leading(mut self, leading: f32) -> Self {
        self.default_leading = leading;
        self
    }

    /// Set the base size for line-spacing multipliers.
    pub fn with_base_font_size(mut self, size: f32) -> Self {
        self.base_font_size = size;
        self
    }
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            font: "Helvetica".to_string(),
            font_size: 11.0,
            default_leading: 14.0,
            base_font_size: 12.0,
        }
    }
}
