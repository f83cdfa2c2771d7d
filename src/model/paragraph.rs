//! Paragraph and run-level types.

use super::{Length, LineSpacing};
use serde::{Deserialize, Serialize};

/// A paragraph of text content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Paragraph {
    /// Text runs in document order
    pub runs: Vec<TextRun>,

    /// Paragraph formatting
    pub style: ParagraphStyle,
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph with a single plain run.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut p = Self::new();
        p.add_text(text);
        p
    }

    /// Set the paragraph formatting.
    pub fn with_style(mut self, style: ParagraphStyle) -> Self {
        self.style = style;
        self
    }

    /// Add plain text to the paragraph.
    pub fn add_text(&mut self, text: impl Into<String>) {
        self.runs.push(TextRun::new(text));
    }

    /// Add a styled text run.
    pub fn add_run(&mut self, run: TextRun) {
        self.runs.push(run);
    }

    /// Get plain text content of the paragraph.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    /// Check if the paragraph has no visible text.
    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|run| run.text.trim().is_empty())
    }
}

/// A run of text with consistent character formatting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Character formatting
    pub style: RunStyle,
}

impl TextRun {
    /// Create a new text run with default style.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: RunStyle::default(),
        }
    }

    /// Create a bold text run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self::new(text).with_style(RunStyle {
            bold: true,
            ..Default::default()
        })
    }

    /// Create an italic text run.
    pub fn italic(text: impl Into<String>) -> Self {
        Self::new(text).with_style(RunStyle {
            italic: true,
            ..Default::default()
        })
    }

    /// Create an underlined text run.
    pub fn underline(text: impl Into<String>) -> Self {
        Self::new(text).with_style(RunStyle {
            underline: true,
            ..Default::default()
        })
    }

    /// Replace the run's formatting.
    pub fn with_style(mut self, style: RunStyle) -> Self {
        self.style = style;
        self
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Character formatting flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStyle {
    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,

    /// Underlined text
    pub underline: bool,
}

impl RunStyle {
    /// Check if any styling is applied.
    pub fn has_styling(&self) -> bool {
        self.bold || self.italic || self.underline
    }
}

/// Paragraph formatting as declared by the source document.
///
/// Every attribute is optional; absent values take the layout defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParagraphStyle {
    /// Text alignment
    pub alignment: Alignment,

    /// Space before the paragraph
    pub space_before: Option<Length>,

    /// Space after the paragraph
    pub space_after: Option<Length>,

    /// Line spacing
    pub line_spacing: Option<LineSpacing>,

    /// Left indent
    pub left_indent: Option<Length>,

    /// Right indent
    pub right_indent: Option<Length>,

    /// First line indent; negative values produce a hanging indent
    pub first_line_indent: Option<Length>,
}

impl ParagraphStyle {
    /// Create an empty paragraph style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set alignment.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Set space before and after.
    pub fn with_spacing(mut self, before: Option<Length>, after: Option<Length>) -> Self {
        self.space_before = before;
        self.space_after = after;
        self
    }

    /// Set line spacing.
    pub fn with_line_spacing(mut self, spacing: LineSpacing) -> Self {
        self.line_spacing = Some(spacing);
        self
    }

    /// Set left, right and first line indents.
    pub fn with_indents(
        mut self,
        left: Option<Length>,
        right: Option<Length>,
        first_line: Option<Length>,
    ) -> Self {
        self.left_indent = left;
        self.right_indent = right;
        self.first_line_indent = first_line;
        self
    }
}

/// Paragraph alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Not set on the paragraph
    #[default]
    Default,
    /// Left alignment
    Left,
    /// Center alignment
    Center,
    /// Right alignment
    Right,
    /// Justified alignment
    Justify,
}
