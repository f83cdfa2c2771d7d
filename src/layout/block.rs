//! Layout blocks: the fixed-layout description produced by the translator.

use crate::model::Alignment;
use serde::{Deserialize, Serialize};

/// Horizontal alignment of a text block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TextAlign {
    /// Ragged right
    #[default]
    Left,
    /// Centered lines
    Center,
    /// Ragged left
    Right,
    /// Lines stretched to the full width, except the last
    Justify,
}

impl From<Alignment> for TextAlign {
    fn from(alignment: Alignment) -> Self {
        match alignment {
            Alignment::Left | Alignment::Default => TextAlign::Left,
            Alignment::Center => TextAlign::Center,
            Alignment::Right => TextAlign::Right,
            Alignment::Justify => TextAlign::Justify,
        }
    }
}

/// Resolved style of a text block. All lengths are in points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockStyle {
    /// Base font family name (e.g. "Helvetica")
    pub font: String,
    /// Font size
    pub size: f32,
    /// Distance between baselines
    pub leading: f32,
    /// Horizontal alignment
    pub alignment: TextAlign,
    /// Indent from the left margin
    pub left_indent: f32,
    /// Indent from the right margin
    pub right_indent: f32,
    /// Extra indent of the first line, relative to `left_indent`
    pub first_line_indent: f32,
}

impl Default for BlockStyle {
    fn default() -> Self {
        Self {
            font: "Helvetica".to_string(),
            size: 11.0,
            leading: 14.0,
            alignment: TextAlign::Left,
            left_indent: 0.0,
            right_indent: 0.0,
            first_line_indent: 0.0,
        }
    }
}

/// One unit of fixed-layout output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayoutBlock {
    /// Vertical whitespace of the given height
    Spacer {
        /// Height in points, never negative
        height: f32,
    },

    /// A styled paragraph
    Text {
        /// Escaped text with `<b>`, `<i>` and `<u>` tags
        markup: String,
        /// Resolved paragraph style
        style: BlockStyle,
    },
}

impl LayoutBlock {
    /// Create a spacer, clamping negative heights to zero.
    pub fn spacer(height: f32) -> Self {
        LayoutBlock::Spacer {
            height: height.max(0.0),
        }
    }

    /// Create a text block.
    pub fn text(markup: impl Into<String>, style: BlockStyle) -> Self {
        LayoutBlock::Text {
            markup: markup.into(),
            style,
        }
    }

    /// Check if this is a text block.
    pub fn is_text(&self) -> bool {
        matches!(self, LayoutBlock::Text { .. })
    }

    /// Markup of a text block.
    pub fn markup(&self) -> Option<&str> {
        match self {
            LayoutBlock::Text { markup, .. } => Some(markup),
            LayoutBlock::Spacer { .. } => None,
        }
    }

    /// Height of a spacer.
    pub fn spacer_height(&self) -> Option<f32> {
        match self {
            LayoutBlock::Spacer { height } => Some(*height),
            LayoutBlock::Text { .. } => None,
        }
    }
}
