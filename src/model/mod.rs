//! Document model types for word-processing content.
//!
//! This module defines the flow-formatting representation that the DOCX
//! reader produces and the layout translator consumes: paragraphs made of
//! runs, with optional paragraph formatting expressed as physical lengths.

mod document;
mod length;
mod paragraph;

pub use document::{Document, Metadata, SectionLayout};
pub use length::{Length, LineSpacing, Unit};
pub use paragraph::{Alignment, Paragraph, ParagraphStyle, RunStyle, TextRun};
